//! HTTP method as a typed enum.
//!
//! Only the six verbs a controller can implement are represented. Anything
//! else (`OPTIONS`, `TRACE`, WebDAV verbs) fails to parse and is treated by
//! the router as a method no route implements.

use std::fmt;
use std::str::FromStr;

/// A verb a [`Controller`](crate::Controller) may implement.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Patch,
}

impl Method {
    /// Every supported verb, in slot order.
    pub const ALL: [Method; 6] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Delete,
        Self::Head,
        Self::Patch,
    ];

    /// Returns the uppercase wire representation (e.g. `"GET"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get    => "GET",
            Self::Post   => "POST",
            Self::Put    => "PUT",
            Self::Delete => "DELETE",
            Self::Head   => "HEAD",
            Self::Patch  => "PATCH",
        }
    }

    /// Position of this verb's slot in a controller.
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Parses a method token case-insensitively: `"get"`, `"Get"` and `"GET"`
/// all yield [`Method::Get`].
impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or(UnknownMethod)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&http::Method> for Method {
    type Error = UnknownMethod;

    fn try_from(m: &http::Method) -> Result<Self, Self::Error> {
        m.as_str().parse()
    }
}

/// The method token is not one of the six routable verbs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown HTTP method")]
pub struct UnknownMethod;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("get".parse::<Method>(), Ok(Method::Get));
        assert_eq!("Patch".parse::<Method>(), Ok(Method::Patch));
        assert_eq!("DELETE".parse::<Method>(), Ok(Method::Delete));
    }

    #[test]
    fn rejects_unroutable_verbs() {
        assert_eq!("OPTIONS".parse::<Method>(), Err(UnknownMethod));
        assert_eq!("".parse::<Method>(), Err(UnknownMethod));
        assert_eq!("GETS".parse::<Method>(), Err(UnknownMethod));
    }

    #[test]
    fn slot_indexes_follow_all() {
        for (i, m) in Method::ALL.into_iter().enumerate() {
            assert_eq!(m.index(), i);
        }
    }

    #[test]
    fn converts_from_http_method() {
        assert_eq!(Method::try_from(&http::Method::PUT), Ok(Method::Put));
        assert_eq!(Method::try_from(&http::Method::OPTIONS), Err(UnknownMethod));
    }
}
