//! Recent user activity kept outside the storefront database.
//!
//! Product views and forum posts are recorded by other systems. The dashboard
//! reads them through [`ActivityFeed`]; the default feed reports no activity.

use futures::future::BoxFuture;

use shopfront_core::UserId;

use crate::db::RepositoryError;

/// Source of recent product views and forum posts for a user.
pub trait ActivityFeed: Send + Sync {
    /// Up to `limit` recently viewed product names, newest first.
    fn recent_product_views(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> BoxFuture<'_, Result<Vec<String>, RepositoryError>>;

    /// Up to `limit` recent forum post titles, newest first.
    fn recent_forum_posts(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> BoxFuture<'_, Result<Vec<String>, RepositoryError>>;
}

/// Feed with no recorded activity.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoActivity;

impl ActivityFeed for NoActivity {
    fn recent_product_views(
        &self,
        _user_id: UserId,
        _limit: usize,
    ) -> BoxFuture<'_, Result<Vec<String>, RepositoryError>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn recent_forum_posts(
        &self,
        _user_id: UserId,
        _limit: usize,
    ) -> BoxFuture<'_, Result<Vec<String>, RepositoryError>> {
        Box::pin(async { Ok(Vec::new()) })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_activity_is_empty() {
        let feed = NoActivity;
        assert!(feed.recent_product_views(UserId::new(1), 5).await.unwrap().is_empty());
        assert!(feed.recent_forum_posts(UserId::new(1), 5).await.unwrap().is_empty());
    }
}
