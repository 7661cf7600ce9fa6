//! Shared database connection cache.
//!
//! Holds at most one pooled store handle plus a tri-state availability flag.
//! Once the database has been found unavailable, no further construction is
//! attempted until [`ConnectionCache::reset`] is called.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, warn};

use super::ToolDependencies;
use super::database::TrademarkStore;

/// Whether the optional database has been probed yet, and with what outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    #[default]
    Unknown,
    Unavailable,
    Available,
}

#[derive(Default)]
struct CacheState {
    store: Option<Arc<dyn TrademarkStore>>,
    availability: Availability,
}

/// Lazily-initialized, resettable cache for the database pool.
#[derive(Default)]
pub struct ConnectionCache {
    state: Mutex<CacheState>,
}

impl std::fmt::Debug for ConnectionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionCache")
            .field("availability", &self.availability())
            .finish()
    }
}

impl ConnectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current availability flag.
    pub fn availability(&self) -> Availability {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .availability
    }

    /// Return the cached store, building it on first use.
    ///
    /// Returns `None` when no connection string is configured, the driver
    /// cannot be loaded, or pool construction fails. Failures are logged and
    /// never propagated. The lock is held across construction, so concurrent
    /// first callers observe a single pool.
    pub fn get_store(&self, deps: &ToolDependencies) -> Option<Arc<dyn TrademarkStore>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if state.availability == Availability::Unavailable {
            return None;
        }

        if let Some(store) = &state.store {
            return Some(store.clone());
        }

        let Some(database_url) = deps.database_url() else {
            info!("DATABASE_URL not configured - wordmark search will use manual fallback");
            state.availability = Availability::Unavailable;
            return None;
        };

        let store = (deps.driver_loader)().and_then(|driver| driver.connect(&database_url));

        match store {
            Ok(store) => {
                state.store = Some(store.clone());
                state.availability = Availability::Available;
                Some(store)
            }
            Err(e) => {
                warn!("Database unavailable: {}", e);
                state.availability = Availability::Unavailable;
                None
            }
        }
    }

    /// Forget the cached pool and availability.
    pub fn reset(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *state = CacheState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::deps::testing::{FakeDriver, FakeFetcher, FakeStore, deps_with};
    use std::sync::Barrier;
    use std::time::Duration;

    #[test]
    fn test_unavailable_without_database_url() {
        let driver = FakeDriver::new(FakeStore::with_rows(vec![]));
        let deps = deps_with(None, None, FakeFetcher::ok(""), driver.loader());

        assert!(deps.connections.get_store(&deps).is_none());
        assert_eq!(deps.connections.availability(), Availability::Unavailable);
        assert_eq!(driver.load_count(), 0);
        assert_eq!(driver.connect_count(), 0);
    }

    #[test]
    fn test_second_call_returns_identical_pool() {
        let driver = FakeDriver::new(FakeStore::with_rows(vec![]));
        let deps = deps_with(
            None,
            Some("postgres://localhost/trademarks"),
            FakeFetcher::ok(""),
            driver.loader(),
        );

        let first = deps.connections.get_store(&deps).unwrap();
        let second = deps.connections.get_store(&deps).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(driver.connect_count(), 1);
        assert_eq!(deps.connections.availability(), Availability::Available);
    }

    #[test]
    fn test_driver_failure_is_swallowed_and_sticky() {
        let driver = FakeDriver::failing();
        let deps = deps_with(
            None,
            Some("postgres://localhost/trademarks"),
            FakeFetcher::ok(""),
            driver.loader(),
        );

        assert!(deps.connections.get_store(&deps).is_none());
        assert!(deps.connections.get_store(&deps).is_none());
        assert_eq!(driver.load_count(), 1);
        assert_eq!(deps.connections.availability(), Availability::Unavailable);
    }

    #[test]
    fn test_missing_driver_marks_unavailable() {
        let deps = deps_with(
            None,
            Some("postgres://localhost/trademarks"),
            FakeFetcher::ok(""),
            FakeDriver::missing_loader(),
        );

        assert!(deps.connections.get_store(&deps).is_none());
        assert_eq!(deps.connections.availability(), Availability::Unavailable);
    }

    #[test]
    fn test_reset_allows_reconstruction() {
        let driver = FakeDriver::failing();
        let deps = deps_with(
            None,
            Some("postgres://localhost/trademarks"),
            FakeFetcher::ok(""),
            driver.loader(),
        );

        assert!(deps.connections.get_store(&deps).is_none());
        deps.connections.reset();
        assert_eq!(deps.connections.availability(), Availability::Unknown);

        assert!(deps.connections.get_store(&deps).is_none());
        assert_eq!(driver.load_count(), 2);
    }

    #[test]
    fn test_concurrent_first_calls_share_one_pool() {
        let driver = FakeDriver::new(FakeStore::with_rows(vec![]))
            .with_connect_delay(Duration::from_millis(50));
        let deps = deps_with(
            None,
            Some("postgres://localhost/trademarks"),
            FakeFetcher::ok(""),
            driver.loader(),
        );
        let start = Barrier::new(8);

        let stores: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        start.wait();
                        deps.connections.get_store(&deps)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(driver.connect_count(), 1);
        assert_eq!(driver.load_count(), 1);
        let first = stores[0].as_ref().unwrap();
        for store in &stores {
            assert!(Arc::ptr_eq(first, store.as_ref().unwrap()));
        }
    }
}
