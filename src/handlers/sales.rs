use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::AppState;
use crate::error::SaleError;
use crate::models::sale::{CreateSaleRequest, MessageResponse, NewSale, SalesResponse};
use crate::services::sales as store;

/// Handler for GET /
pub async fn hello_sales() -> &'static str {
    "Hello from the Sales API!"
}

/// Handler for POST /sales
pub async fn create_sale(
    State(state): State<AppState>,
    payload: Result<Json<CreateSaleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), SaleError> {
    let Json(request) =
        payload.map_err(|rejection| SaleError::Validation(rejection.body_text()))?;
    let sale = NewSale::try_from(request)?;

    let created = store::create_sale(&state.db, sale).await?;
    tracing::info!(
        id = created.id,
        transaction_id = %created.transaction_id,
        "Sale added"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Sale added successfully")),
    ))
}

/// Handler for GET /sales
pub async fn list_sales(State(state): State<AppState>) -> Result<Json<SalesResponse>, SaleError> {
    let sales = store::list_sales(&state.db).await?;
    tracing::debug!("Retrieved {} sales", sales.len());

    Ok(Json(sales))
}

/// Handler for DELETE /sales/{transaction_id}
pub async fn delete_sale(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> Result<Json<MessageResponse>, SaleError> {
    store::delete_sale(&state.db, &transaction_id).await?;
    tracing::info!(transaction_id = %transaction_id, "Sale deleted");

    Ok(Json(MessageResponse::new(format!(
        "Transaction {} deleted successfully",
        transaction_id
    ))))
}

/// Handler for DELETE /sales
pub async fn delete_all_sales(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, SaleError> {
    let rows_affected = store::delete_all_sales(&state.db).await?;
    tracing::info!(rows_affected, "All sales deleted");

    Ok(Json(MessageResponse::new(format!(
        "All sales history deleted ({} rows affected)",
        rows_affected
    ))))
}
