//! Product listing handler.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use shopfront_core::CategoryId;

use crate::db::ProductRepository;
use crate::db::products::{
    DEFAULT_PAGE_SIZE, FilterError, Page, PriceFilter, ProductFilter, ProductSort,
};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Listing query parameters.
///
/// Every field arrives as text; an empty value is treated as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductQuery {
    pub category: String,
    pub price_range: String,
    pub sort_by: String,
    pub search_query: String,
    pub page: String,
    pub page_size: String,
}

fn present(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn parse_number(value: &str, invalid: FilterError) -> std::result::Result<u32, FilterError> {
    value.parse().map_err(|_| invalid)
}

impl ProductQuery {
    /// Turn raw query text into a validated filter.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for an unparseable category, a malformed
    /// price range, an unknown sort field, or a page outside the allowed range.
    pub fn into_filter(self) -> Result<ProductFilter> {
        let category = present(&self.category)
            .map(|c| {
                c.parse::<i64>()
                    .map(CategoryId::new)
                    .map_err(|_| AppError::Validation("category is not a valid number".to_owned()))
            })
            .transpose()?;

        let price = present(&self.price_range)
            .map(str::parse::<PriceFilter>)
            .transpose()
            .map_err(filter_error)?;

        let sort = present(&self.sort_by)
            .map(str::parse::<ProductSort>)
            .transpose()
            .map_err(filter_error)?
            .unwrap_or_default();

        let number = present(&self.page)
            .map(|p| parse_number(p, FilterError::InvalidPage))
            .transpose()
            .map_err(filter_error)?
            .unwrap_or(1);
        let size = present(&self.page_size)
            .map(|s| parse_number(s, FilterError::InvalidPageSize))
            .transpose()
            .map_err(filter_error)?
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let page = Page::new(number, size).map_err(filter_error)?;

        Ok(ProductFilter {
            category,
            price,
            search: present(&self.search_query).map(ToOwned::to_owned),
            sort,
            page,
        })
    }
}

fn filter_error(e: FilterError) -> AppError {
    AppError::Validation(e.to_string())
}

/// List products matching the query.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    query: std::result::Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<Value>> {
    let Query(query) = query?;
    let filter = query.into_filter()?;
    let page = filter.page;

    let products = ProductRepository::new(state.db()).list(filter).await?;

    Ok(Json(json!({
        "products": products,
        "page": page.number(),
        "page_size": page.size(),
    })))
}
