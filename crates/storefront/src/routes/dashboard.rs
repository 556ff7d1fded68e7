//! Dashboard handler.

use axum::{Json, extract::State};
use tower_sessions::Session;
use tracing::instrument;

use crate::db::DashboardRepository;
use crate::error::{AppError, Result};
use crate::middleware::{RequireAuth, clear_current_user};
use crate::models::Dashboard;
use crate::state::AppState;

/// Entries requested from the activity feed for each list.
const ACTIVITY_LIMIT: usize = 5;

/// Show the logged-in user's dashboard.
///
/// The database reads share one connection. Activity from the external feed is
/// best effort: a failing feed yields empty lists instead of an error.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Dashboard>> {
    let Some(rows) = DashboardRepository::new(state.db()).load(user.id).await? else {
        // Account removed while the session was still live
        tracing::warn!("Session refers to a missing user");
        if let Err(e) = clear_current_user(&session).await {
            tracing::warn!(error = %e, "Failed to clear stale session");
        }
        return Err(AppError::Unauthorized("user no longer exists".to_owned()));
    };

    let activity = state.activity();
    let recent_product_views = activity
        .recent_product_views(user.id, ACTIVITY_LIMIT)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Product view feed unavailable");
            Vec::new()
        });
    let recent_forum_posts = activity
        .recent_forum_posts(user.id, ACTIVITY_LIMIT)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Forum post feed unavailable");
            Vec::new()
        });

    Ok(Json(Dashboard {
        user: rows.user,
        recent_orders: rows.recent_orders,
        recent_product_views,
        recent_forum_posts,
        recommendations: rows.recommendations,
        stats: rows.stats,
    }))
}
