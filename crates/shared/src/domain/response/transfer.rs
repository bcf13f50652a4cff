use crate::model::transfer::{
    DATE_FORMAT, TIME_FORMAT, TransferRecord, TransferStatus, Warehouse,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone, PartialEq)]
pub struct TransferResponse {
    pub transfer_id: Uuid,
    pub sku: String,
    #[schema(example = "2025-03-14")]
    pub send_date: String,
    #[schema(example = "09:05:00")]
    pub send_time: String,
    pub origin_warehouse: Warehouse,
    pub destination_warehouse: Warehouse,
    pub sent_box_count: i32,
    pub sender_name: String,
    pub status: TransferStatus,
    pub received_date: Option<String>,
    pub received_time: Option<String>,
    pub received_box_count: Option<i32>,
    pub receiver_name: Option<String>,
}

impl From<TransferRecord> for TransferResponse {
    fn from(value: TransferRecord) -> Self {
        TransferResponse {
            transfer_id: value.transfer_id,
            sku: value.sku,
            send_date: value.send_date.format(DATE_FORMAT).to_string(),
            send_time: value.send_time.format(TIME_FORMAT).to_string(),
            origin_warehouse: value.origin_warehouse,
            destination_warehouse: value.destination_warehouse,
            sent_box_count: value.sent_box_count,
            sender_name: value.sender_name,
            status: value.status,
            received_date: value
                .received_date
                .map(|date| date.format(DATE_FORMAT).to_string()),
            received_time: value
                .received_time
                .map(|time| time.format(TIME_FORMAT).to_string()),
            received_box_count: value.received_box_count,
            receiver_name: value.receiver_name,
        }
    }
}

/// Row of the receiver's pending list.
#[derive(Debug, Deserialize, Serialize, ToSchema, Clone, PartialEq)]
pub struct PendingTransferResponse {
    pub transfer_id: Uuid,
    pub sku: String,
    pub origin_warehouse: Warehouse,
    pub destination_warehouse: Warehouse,
    pub sent_box_count: i32,
    pub sender_name: String,
    pub send_date: String,
    pub send_time: String,
}

impl From<TransferRecord> for PendingTransferResponse {
    fn from(value: TransferRecord) -> Self {
        PendingTransferResponse {
            transfer_id: value.transfer_id,
            sku: value.sku,
            origin_warehouse: value.origin_warehouse,
            destination_warehouse: value.destination_warehouse,
            sent_box_count: value.sent_box_count,
            sender_name: value.sender_name,
            send_date: value.send_date.format(DATE_FORMAT).to_string(),
            send_time: value.send_time.format(TIME_FORMAT).to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone, PartialEq)]
pub struct WarehouseOptionsResponse {
    pub origins: Vec<Warehouse>,
    pub destinations: Vec<Warehouse>,
}

impl Default for WarehouseOptionsResponse {
    fn default() -> Self {
        Self {
            origins: Warehouse::ORIGINS.to_vec(),
            destinations: Warehouse::DESTINATIONS.to_vec(),
        }
    }
}
