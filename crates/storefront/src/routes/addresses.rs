//! Address handlers.

use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
    response::Response,
};
use serde::Deserialize;
use serde_json::{Value, json};

use shopfront_core::UserId;

use super::{created, required};
use crate::db::AddressRepository;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::NewAddress;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddressForm {
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl AddressForm {
    fn validate(self, user_id: UserId) -> Result<NewAddress> {
        let line2 = self.address_line2.trim();

        Ok(NewAddress {
            user_id,
            address_line1: required(&self.address_line1, "address_line1")?,
            address_line2: (!line2.is_empty()).then(|| line2.to_owned()),
            city: required(&self.city, "city")?,
            state: required(&self.state, "state")?,
            zip_code: required(&self.zip_code, "zip_code")?,
            country: required(&self.country, "country")?,
        })
    }
}

/// Add an address for the logged-in user.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    form: std::result::Result<Form<AddressForm>, FormRejection>,
) -> Result<Response> {
    let Form(form) = form?;
    let address = form.validate(user.id)?;

    let id = AddressRepository::new(state.db()).create(address).await?;
    tracing::info!(user_id = %user.id, address_id = %id, "Address added");

    Ok(created("Address added successfully"))
}

/// List the logged-in user's addresses.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Value>> {
    let addresses = AddressRepository::new(state.db())
        .list_for_user(user.id)
        .await?;
    Ok(Json(json!({ "user_addresses": addresses })))
}
