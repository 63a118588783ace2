// handlers/customers.rs - /customers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde_json::Value;

use crate::api::{parse_id, ApiResponse, ApiResult, RestoreQuery};
use crate::database::models::{Customer, CustomerChanges, LinkRequest};
use crate::error::ApiError;
use crate::services::{CustomerService, LinkOutcome};
use crate::state::AppState;

/// GET /customers
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Customer>> {
    Ok(ApiResponse::success(CustomerService::new(&state.db).list().await?))
}

/// GET /customers/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Customer> {
    let id = parse_id(&id, "id")?;
    Ok(ApiResponse::success(CustomerService::new(&state.db).find(id).await?))
}

/// POST /customers - find-or-create customer and profile, then link them
///
/// ```json
/// {
///   "customer": { "name": "Pavitar Singh", "phone_number": "1234566700" },
///   "profile": { "name": "developer" },
///   "self_granted": false,
///   "status": "active"
/// }
/// ```
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<LinkOutcome> {
    let Json(payload) = body?;
    let request: LinkRequest = ApiError::parse_payload(payload)?;
    let outcome = CustomerService::new(&state.db).create_and_link(request).await?;
    Ok(ApiResponse::created(outcome).with_message("Customer and Profile linked successfully"))
}

/// PUT /customers/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Customer> {
    let id = parse_id(&id, "id")?;
    let Json(payload) = body?;
    let changes: CustomerChanges = ApiError::parse_payload(payload)?;
    let customer = CustomerService::new(&state.db).update(id, changes).await?;
    Ok(ApiResponse::success(customer).with_message("Customer updated successfully!"))
}

/// DELETE /customers/:id - soft delete
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let id = parse_id(&id, "id")?;
    CustomerService::new(&state.db).delete(id).await?;
    Ok(ApiResponse::message("Customer deleted successfully!"))
}

/// GET /customers/restore?id=
pub async fn restore(
    State(state): State<AppState>,
    query: Result<Query<RestoreQuery>, QueryRejection>,
) -> ApiResult<Customer> {
    let Query(query) = query?;
    let id = query.require_id()?;
    let customer = CustomerService::new(&state.db).restore(id).await?;
    Ok(ApiResponse::success(customer).with_message("Customer restored successfully!"))
}
