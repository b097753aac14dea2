//! Hot-swappable router reference.
//!
//! A [`Router`] is never edited in place. To change routes at runtime, build
//! a new one and [`swap`](RouterHandle::swap) it in. Requests already running
//! keep the snapshot they loaded, and the next request sees the new one.
//! Nobody ever observes a half-built table.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::info;

use crate::error::BuildError;
use crate::route::RouteTable;
use crate::router::Router;

/// Shared, atomically replaceable [`Router`]. Cloning shares the same slot.
#[derive(Clone)]
pub struct RouterHandle {
    current: Arc<ArcSwap<Router>>,
}

impl RouterHandle {
    pub fn new(router: Router) -> Self {
        Self { current: Arc::new(ArcSwap::from_pointee(router)) }
    }

    /// The router in effect right now.
    pub fn load(&self) -> Arc<Router> {
        self.current.load_full()
    }

    /// Installs `router` and returns the one it replaced.
    pub fn swap(&self, router: Router) -> Arc<Router> {
        let routes = router.len();
        let previous = self.current.swap(Arc::new(router));
        info!(routes, previous = previous.len(), "router swapped");
        previous
    }

    /// Compiles `table`, installs the result and returns the router it
    /// replaced. On error the current router stays in place.
    pub fn rebuild(&self, table: RouteTable) -> Result<Arc<Router>, BuildError> {
        let router = Router::build(table)?;
        Ok(self.swap(router))
    }
}

impl From<Router> for RouterHandle {
    fn from(router: Router) -> Self {
        Self::new(router)
    }
}
