//! Path-pattern compiler.
//!
//! A pattern is a `/`-separated list of segments. Each segment is one of:
//!
//! | Segment | Matches | Example |
//! |---|---|---|
//! | literal | exactly its own text | `/user` |
//! | `:name` | one segment, no `/` | `/user/:id` |
//! | `*name` | the rest of the path, `/` included | `/static/*path` |
//!
//! A `*name` wildcard may only be the final segment. A marker anywhere but
//! the start of a segment is literal text, so `/v1:beta` is a plain route.
//! Patterns must already be in normalized form: no empty segment except a
//! trailing `/`, and no `.` or `..` segments. Request paths are normalized
//! before lookup, so such a route could never match.
//!
//! Parsing yields two things: the radix-tree route string fed to [`matchit`]
//! (`/user/{id}`, `/static/{*path}`), and the byte span of every capture in
//! the original text so reverse resolution is a single left-to-right splice.

use std::ops::Range;

/// Why a path pattern was rejected.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum PatternError {
    #[error("pattern must start with `/`")]
    MissingLeadingSlash,
    #[error("parameter at byte {position} has no name")]
    EmptyParamName { position: usize },
    #[error("parameter name `{name}` may only contain ASCII letters, digits and `_`")]
    InvalidParamName { name: String },
    #[error("wildcard `*{name}` must be the last segment")]
    WildcardNotLast { name: String },
    #[error("parameter `{name}` appears more than once")]
    DuplicateParam { name: String },
    #[error("empty segment at byte {position}")]
    EmptySegment { position: usize },
    #[error("dot segment `{segment}` at byte {position}")]
    DotSegment { segment: String, position: usize },
}

#[derive(Clone, Copy, Eq, PartialEq)]
enum CaptureKind {
    Param,
    Wildcard,
}

#[derive(Clone, Debug)]
pub(crate) struct Capture {
    pub(crate) name: String,
    /// Byte range of the whole token (marker included) in the raw pattern.
    pub(crate) span: Range<usize>,
}

/// A parsed, validated path pattern.
#[derive(Clone, Debug)]
pub(crate) struct Pattern {
    raw: String,
    tree_path: String,
    captures: Vec<Capture>,
}

impl Pattern {
    pub(crate) fn parse(raw: &str) -> Result<Self, PatternError> {
        let rest = raw.strip_prefix('/').ok_or(PatternError::MissingLeadingSlash)?;
        let segments: Vec<&str> = rest.split('/').collect();
        let last = segments.len() - 1;

        let mut tree_path = String::with_capacity(raw.len() + 8);
        let mut captures: Vec<Capture> = Vec::new();
        let mut offset = 1;

        for (i, seg) in segments.iter().enumerate() {
            tree_path.push('/');

            let kind = match seg.as_bytes().first() {
                Some(b':') => Some(CaptureKind::Param),
                Some(b'*') => Some(CaptureKind::Wildcard),
                _ => None,
            };

            match kind {
                None if seg.is_empty() && i != last => {
                    return Err(PatternError::EmptySegment { position: offset });
                }
                None if *seg == "." || *seg == ".." => {
                    return Err(PatternError::DotSegment {
                        segment: (*seg).to_owned(),
                        position: offset,
                    });
                }
                None => push_escaped(&mut tree_path, seg),
                Some(kind) => {
                    let name = &seg[1..];
                    if name.is_empty() {
                        return Err(PatternError::EmptyParamName { position: offset });
                    }
                    if !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
                        return Err(PatternError::InvalidParamName { name: name.to_owned() });
                    }
                    if kind == CaptureKind::Wildcard && i != last {
                        return Err(PatternError::WildcardNotLast { name: name.to_owned() });
                    }
                    if captures.iter().any(|c| c.name == name) {
                        return Err(PatternError::DuplicateParam { name: name.to_owned() });
                    }

                    tree_path.push('{');
                    if kind == CaptureKind::Wildcard {
                        tree_path.push('*');
                    }
                    tree_path.push_str(name);
                    tree_path.push('}');

                    captures.push(Capture {
                        name: name.to_owned(),
                        span: offset..offset + seg.len(),
                    });
                }
            }

            offset += seg.len() + 1;
        }

        Ok(Self { raw: raw.to_owned(), tree_path, captures })
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.raw
    }

    /// The route string in [`matchit`] syntax.
    pub(crate) fn tree_path(&self) -> &str {
        &self.tree_path
    }

    pub(crate) fn captures(&self) -> &[Capture] {
        &self.captures
    }

    /// Token text (`:id`, `*path`) of every capture, left to right.
    pub(crate) fn token_texts(&self) -> Vec<String> {
        self.captures()
            .iter()
            .map(|c| self.raw[c.span.clone()].to_owned())
            .collect()
    }

    /// Replaces each capture token with the matching entry of `values`.
    ///
    /// `values` must hold exactly one entry per capture. No escaping or
    /// validation is applied to the values.
    pub(crate) fn substitute(&self, values: &[String]) -> String {
        debug_assert_eq!(values.len(), self.captures.len());

        let extra: usize = values.iter().map(String::len).sum();
        let mut out = String::with_capacity(self.raw.len() + extra);
        let mut last = 0;
        for (capture, value) in self.captures.iter().zip(values) {
            out.push_str(&self.raw[last..capture.span.start]);
            out.push_str(value);
            last = capture.span.end;
        }
        out.push_str(&self.raw[last..]);
        out
    }
}

/// matchit reserves `{` and `}`; literal braces are doubled.
fn push_escaped(out: &mut String, literal: &str) {
    for ch in literal.chars() {
        match ch {
            '{' => out.push_str("{{"),
            '}' => out.push_str("}}"),
            c => out.push(c),
        }
    }
}
