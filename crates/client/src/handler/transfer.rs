use crate::middleware::validate::SimpleValidatedJson;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use shared::{
    domain::{
        request::{CreateTransferRequest, ReceiveTransferRequest},
        response::{
            ApiResponse, ErrorResponse,
            transfer::{PendingTransferResponse, TransferResponse, WarehouseOptionsResponse},
        },
    },
    state::AppState,
    utils::AppError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/warehouses",
    tag = "Transfer",
    responses(
        (status = 200, description = "Departing and receiving warehouse options", body = ApiResponse<WarehouseOptionsResponse>),
    )
)]
pub async fn get_warehouses(State(data): State<Arc<AppState>>) -> impl IntoResponse {
    Json(data.di_container.transfer_service.get_warehouses())
}

#[utoipa::path(
    get,
    path = "/api/transfers",
    tag = "Transfer",
    responses(
        (status = 200, description = "Every transfer in table order", body = ApiResponse<Vec<TransferResponse>>),
        (status = 500, description = "Transfer store error", body = ErrorResponse),
    )
)]
pub async fn get_transfers(
    State(data): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let response = data.di_container.transfer_service.get_transfers().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/transfers/pending",
    tag = "Transfer",
    responses(
        (status = 200, description = "Transfers still waiting to be received", body = ApiResponse<Vec<PendingTransferResponse>>),
        (status = 500, description = "Transfer store error", body = ErrorResponse),
    )
)]
pub async fn get_pending_transfers(
    State(data): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let response = data
        .di_container
        .transfer_service
        .get_pending_transfers()
        .await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/transfers/{id}",
    tag = "Transfer",
    params(
        ("id" = Uuid, Path, description = "Transfer ID")
    ),
    responses(
        (status = 200, description = "Transfer details", body = ApiResponse<TransferResponse>),
        (status = 404, description = "Transfer not found", body = ErrorResponse),
    )
)]
pub async fn get_transfer(
    State(data): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let response = data.di_container.transfer_service.get_transfer(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/transfers",
    tag = "Transfer",
    request_body = CreateTransferRequest,
    responses(
        (status = 201, description = "Transfer sent", body = ApiResponse<TransferResponse>),
        (status = 400, description = "Missing SKU or sender name", body = ErrorResponse),
        (status = 500, description = "Transfer store error", body = ErrorResponse),
    )
)]
pub async fn create_transfer(
    State(data): State<Arc<AppState>>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateTransferRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = data
        .di_container
        .transfer_service
        .create_transfer(&body)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/transfers/{id}/receive",
    tag = "Transfer",
    params(
        ("id" = Uuid, Path, description = "Transfer ID")
    ),
    request_body = ReceiveTransferRequest,
    responses(
        (status = 200, description = "Goods receipt recorded", body = ApiResponse<TransferResponse>),
        (status = 400, description = "Missing receiver name", body = ErrorResponse),
        (status = 404, description = "Transfer not found", body = ErrorResponse),
        (status = 409, description = "Transfer already received", body = ErrorResponse),
    )
)]
pub async fn receive_transfer(
    State(data): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    SimpleValidatedJson(body): SimpleValidatedJson<ReceiveTransferRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = data
        .di_container
        .transfer_service
        .receive_transfer(id, &body)
        .await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn transfers_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/warehouses", get(get_warehouses))
        .route("/api/transfers", get(get_transfers))
        .route("/api/transfers/pending", get(get_pending_transfers))
        .route("/api/transfers/{id}", get(get_transfer))
        .route("/api/transfers", post(create_transfer))
        .route("/api/transfers/{id}/receive", post(receive_transfer))
        .with_state(app_state)
}
