//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::db::Database;
use crate::services::{ActivityFeed, NoActivity};

/// Application state shared across all handlers.
///
/// Built once at startup and injected with `Router::with_state`. Cheaply
/// cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    db: Database,
    activity: Arc<dyn ActivityFeed>,
}

impl AppState {
    /// Create application state with no external activity feed.
    #[must_use]
    pub fn new(config: StorefrontConfig, db: Database) -> Self {
        Self::with_activity_feed(config, db, Arc::new(NoActivity))
    }

    /// Create application state that reads dashboard activity from `activity`.
    #[must_use]
    pub fn with_activity_feed(
        config: StorefrontConfig,
        db: Database,
        activity: Arc<dyn ActivityFeed>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                db,
                activity,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the storage gateway.
    #[must_use]
    pub fn db(&self) -> &Database {
        &self.inner.db
    }

    /// Get the dashboard activity feed.
    #[must_use]
    pub fn activity(&self) -> &dyn ActivityFeed {
        self.inner.activity.as_ref()
    }
}
