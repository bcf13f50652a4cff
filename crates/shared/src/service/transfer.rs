use async_trait::async_trait;
use chrono::Timelike;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    abstract_trait::{DynClock, DynTransferRepository, TransferServiceTrait},
    domain::{
        request::{CreateTransferRequest, ReceiveTransferRequest},
        response::{
            ApiResponse,
            transfer::{PendingTransferResponse, TransferResponse, WarehouseOptionsResponse},
        },
    },
    model::transfer::{TransferReceipt, TransferRecord, TransferStatus},
    utils::{AppError, Method, Metrics, Status as StatusUtils},
};

pub const NO_PENDING_MESSAGE: &str = "There is currently no new stock to accept.";

#[derive(Clone)]
pub struct TransferService {
    transfer_repository: DynTransferRepository,
    clock: DynClock,
    metrics: Arc<Metrics>,
}

impl std::fmt::Debug for TransferService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferService")
            .field("transfer_repository", &"DynTransferRepository")
            .field("clock", &"DynClock")
            .finish()
    }
}

impl TransferService {
    pub fn new(
        transfer_repository: DynTransferRepository,
        clock: DynClock,
        metrics: Arc<Metrics>,
        registry: &mut Registry,
    ) -> Self {
        registry.register(
            "transfer_service_request_counter",
            "Total number of requests to the TransferService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "transfer_service_request_duration",
            "Histogram of request durations for the TransferService",
            metrics.request_duration.clone(),
        );

        Self {
            transfer_repository,
            clock,
            metrics,
        }
    }

    fn complete<T>(
        &self,
        operation: &str,
        method: Method,
        start: Instant,
        result: Result<T, AppError>,
    ) -> Result<T, AppError> {
        let elapsed = start.elapsed().as_secs_f64();
        let status = match &result {
            Ok(_) => {
                info!("Operation {operation} completed successfully in {elapsed:.3}s");
                StatusUtils::Success
            }
            Err(e @ (AppError::ValidationError(_) | AppError::AlreadyReceived(_))) => {
                warn!("Operation {operation} rejected: {e}");
                StatusUtils::Error
            }
            Err(e) => {
                error!("Operation {operation} failed: {e}");
                StatusUtils::Error
            }
        };

        self.metrics.record(method, status, elapsed);
        result
    }

    fn build_record(&self, input: &CreateTransferRequest) -> TransferRecord {
        let now = self.clock.now();

        TransferRecord {
            transfer_id: Uuid::new_v4(),
            sku: input.sku.trim().to_string(),
            send_date: now.date_naive(),
            send_time: now.time().with_nanosecond(0).unwrap_or(now.time()),
            origin_warehouse: input.origin,
            destination_warehouse: input.destination,
            sent_box_count: input.box_count,
            sender_name: input.sender_name.trim().to_string(),
            status: TransferStatus::Sent,
            received_date: None,
            received_time: None,
            received_box_count: None,
            receiver_name: None,
        }
    }

    fn build_receipt(&self, input: &ReceiveTransferRequest) -> TransferReceipt {
        let now = self.clock.now();

        TransferReceipt {
            received_date: now.date_naive(),
            received_time: now.time().with_nanosecond(0).unwrap_or(now.time()),
            received_box_count: input.received_box_count,
            receiver_name: input.receiver_name.trim().to_string(),
        }
    }

    async fn create(&self, input: &CreateTransferRequest) -> Result<TransferRecord, AppError> {
        input.validate()?;

        let record = self.build_record(input);
        self.transfer_repository.append(&record).await
    }

    async fn pending(&self) -> Result<Vec<TransferRecord>, AppError> {
        let records = self.transfer_repository.find_all().await?;
        Ok(records.into_iter().filter(TransferRecord::is_pending).collect())
    }

    async fn find(&self, id: Uuid) -> Result<TransferRecord, AppError> {
        self.transfer_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Transfer with ID {id} not found")))
    }

    async fn receive(
        &self,
        id: Uuid,
        input: &ReceiveTransferRequest,
    ) -> Result<TransferRecord, AppError> {
        input.validate()?;

        let receipt = self.build_receipt(input);
        self.transfer_repository.mark_received(id, &receipt).await
    }
}

#[async_trait]
impl TransferServiceTrait for TransferService {
    async fn create_transfer(
        &self,
        input: &CreateTransferRequest,
    ) -> Result<ApiResponse<TransferResponse>, AppError> {
        let span = info_span!(
            "CreateTransfer",
            sku = %input.sku,
            origin = %input.origin,
            destination = %input.destination,
            box_count = input.box_count
        );
        let start = Instant::now();

        let result = self.create(input).instrument(span).await;
        let record = self.complete("CreateTransfer", Method::Post, start, result)?;

        Ok(ApiResponse::success(
            format!("Success! Transfer ID: {}", record.transfer_id),
            TransferResponse::from(record),
        ))
    }

    async fn get_transfers(&self) -> Result<ApiResponse<Vec<TransferResponse>>, AppError> {
        let start = Instant::now();

        let result = self.transfer_repository.find_all().await;
        let records = self.complete("GetTransfers", Method::Get, start, result)?;

        Ok(ApiResponse::success(
            "Transfers retrieved successfully",
            records.into_iter().map(TransferResponse::from).collect(),
        ))
    }

    async fn get_pending_transfers(
        &self,
    ) -> Result<ApiResponse<Vec<PendingTransferResponse>>, AppError> {
        let start = Instant::now();

        let result = self.pending().await;
        let pending = self.complete("GetPendingTransfers", Method::Get, start, result)?;

        let message = if pending.is_empty() {
            NO_PENDING_MESSAGE.to_string()
        } else {
            format!("{} transfer(s) awaiting receipt", pending.len())
        };

        Ok(ApiResponse::success(
            message,
            pending
                .into_iter()
                .map(PendingTransferResponse::from)
                .collect(),
        ))
    }

    async fn get_transfer(&self, id: Uuid) -> Result<ApiResponse<TransferResponse>, AppError> {
        let start = Instant::now();

        let result = self.find(id).await;
        let record = self.complete("GetTransfer", Method::Get, start, result)?;

        Ok(ApiResponse::success(
            "Transfer retrieved successfully",
            TransferResponse::from(record),
        ))
    }

    async fn receive_transfer(
        &self,
        id: Uuid,
        input: &ReceiveTransferRequest,
    ) -> Result<ApiResponse<TransferResponse>, AppError> {
        let span = info_span!(
            "ReceiveTransfer",
            transfer_id = %id,
            received_box_count = input.received_box_count
        );
        let start = Instant::now();

        let result = self.receive(id, input).instrument(span).await;
        let record = self.complete("ReceiveTransfer", Method::Post, start, result)?;

        Ok(ApiResponse::success(
            "The goods receipt was successfully updated!",
            TransferResponse::from(record),
        ))
    }

    fn get_warehouses(&self) -> ApiResponse<WarehouseOptionsResponse> {
        ApiResponse::success(
            "Warehouse options retrieved successfully",
            WarehouseOptionsResponse::default(),
        )
    }
}
