use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        request::{CreateTransferRequest, ReceiveTransferRequest},
        response::{
            ApiResponse,
            transfer::{PendingTransferResponse, TransferResponse, WarehouseOptionsResponse},
        },
    },
    model::transfer::{TransferReceipt, TransferRecord},
    utils::AppError,
};

pub type DynTransferRepository = Arc<dyn TransferRepositoryTrait + Send + Sync>;
pub type DynTransferService = Arc<dyn TransferServiceTrait + Send + Sync>;

/// Narrow view of the shared transfer table.
#[async_trait]
pub trait TransferRepositoryTrait {
    /// Every row, in table order.
    async fn find_all(&self) -> Result<Vec<TransferRecord>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<TransferRecord>, AppError>;
    async fn append(&self, record: &TransferRecord) -> Result<TransferRecord, AppError>;
    /// Writes the receipt columns only while the row is still `Sent`.
    ///
    /// Fails with `NotFound` for an unknown id and `AlreadyReceived` when the row
    /// was fulfilled before this call.
    async fn mark_received(
        &self,
        id: Uuid,
        receipt: &TransferReceipt,
    ) -> Result<TransferRecord, AppError>;
}

#[async_trait]
pub trait TransferServiceTrait {
    async fn create_transfer(
        &self,
        input: &CreateTransferRequest,
    ) -> Result<ApiResponse<TransferResponse>, AppError>;
    async fn get_transfers(&self) -> Result<ApiResponse<Vec<TransferResponse>>, AppError>;
    async fn get_pending_transfers(
        &self,
    ) -> Result<ApiResponse<Vec<PendingTransferResponse>>, AppError>;
    async fn get_transfer(&self, id: Uuid) -> Result<ApiResponse<TransferResponse>, AppError>;
    async fn receive_transfer(
        &self,
        id: Uuid,
        input: &ReceiveTransferRequest,
    ) -> Result<ApiResponse<TransferResponse>, AppError>;
    fn get_warehouses(&self) -> ApiResponse<WarehouseOptionsResponse>;
}
