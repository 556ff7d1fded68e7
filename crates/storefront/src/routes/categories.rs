//! Category handlers. Neither requires authentication.

use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
    response::Response,
};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{created, required};
use crate::db::CategoryRepository;
use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CategoryForm {
    pub name: String,
}

/// Create a category.
pub async fn create(
    State(state): State<AppState>,
    form: std::result::Result<Form<CategoryForm>, FormRejection>,
) -> Result<Response> {
    let Form(form) = form?;
    let name = required(&form.name, "name")?;

    let id = CategoryRepository::new(state.db()).create(&name).await?;
    tracing::info!(category_id = %id, name = %name, "Category created");

    Ok(created("Category created successfully"))
}

/// List every category.
pub async fn index(State(state): State<AppState>) -> Result<Json<Value>> {
    let categories = CategoryRepository::new(state.db()).list().await?;
    Ok(Json(json!({ "categories": categories })))
}
