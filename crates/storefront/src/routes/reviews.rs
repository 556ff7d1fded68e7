//! Review handlers.

use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
    response::Response,
};
use serde::Deserialize;
use serde_json::{Value, json};

use shopfront_core::{ProductId, Rating, UserId};

use super::{created, parse_field, required};
use crate::db::ReviewRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::NewReview;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReviewForm {
    pub product_id: String,
    pub rating: String,
    pub review_text: String,
}

impl ReviewForm {
    fn validate(self, user_id: UserId) -> Result<NewReview> {
        let product_id = ProductId::new(parse_field(&self.product_id, "product_id")?);
        let rating = Rating::new(parse_field(&self.rating, "rating")?)
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let review_text = required(&self.review_text, "review_text")?;

        Ok(NewReview {
            user_id,
            product_id,
            rating,
            review_text,
        })
    }
}

/// Review a product as the logged-in user.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    form: std::result::Result<Form<ReviewForm>, FormRejection>,
) -> Result<Response> {
    let Form(form) = form?;
    let review = form.validate(user.id)?;
    let product_id = review.product_id;

    let id = ReviewRepository::new(state.db()).create(review).await?;
    tracing::info!(user_id = %user.id, review_id = %id, product_id = %product_id, "Review added");

    Ok(created("Review added successfully"))
}

/// List the logged-in user's reviews.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Value>> {
    let reviews = ReviewRepository::new(state.db()).list_for_user(user.id).await?;
    Ok(Json(json!({ "user_reviews": reviews })))
}
