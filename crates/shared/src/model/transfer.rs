use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::schema::transfer::BoxTransfers;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowParseError {
    #[error("unknown transfer status '{0}'")]
    UnknownStatus(String),

    #[error("unknown warehouse '{0}'")]
    UnknownWarehouse(String),

    #[error("row has {found} cells, expected {expected}")]
    Width { found: usize, expected: usize },

    #[error("invalid value '{value}' in column {column}")]
    InvalidCell { column: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TransferStatus {
    Sent,
    Received,
}

impl TransferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Sent => "Sent",
            TransferStatus::Received => "Received",
        }
    }

    /// `Sent -> Received` is the only transition; `Received` is terminal.
    pub fn can_receive(&self) -> bool {
        matches!(self, TransferStatus::Sent)
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransferStatus {
    type Err = RowParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Sent" => Ok(TransferStatus::Sent),
            "Received" => Ok(TransferStatus::Received),
            other => Err(RowParseError::UnknownStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for TransferStatus {
    type Error = RowParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Warehouse {
    #[serde(rename = "WH 1")]
    Wh1,
    #[serde(rename = "WH 2")]
    Wh2,
    #[serde(rename = "WH 3")]
    Wh3,
    #[serde(rename = "WH 5")]
    Wh5,
    #[serde(rename = "WH VENUS")]
    WhVenus,
}

impl Warehouse {
    pub const ORIGINS: [Warehouse; 1] = [Warehouse::Wh3];

    pub const DESTINATIONS: [Warehouse; 4] = [
        Warehouse::Wh1,
        Warehouse::Wh2,
        Warehouse::Wh5,
        Warehouse::WhVenus,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Warehouse::Wh1 => "WH 1",
            Warehouse::Wh2 => "WH 2",
            Warehouse::Wh3 => "WH 3",
            Warehouse::Wh5 => "WH 5",
            Warehouse::WhVenus => "WH VENUS",
        }
    }

    pub fn is_origin(&self) -> bool {
        Self::ORIGINS.contains(self)
    }

    pub fn is_destination(&self) -> bool {
        Self::DESTINATIONS.contains(self)
    }
}

impl fmt::Display for Warehouse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Warehouse {
    type Err = RowParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WH 1" => Ok(Warehouse::Wh1),
            "WH 2" => Ok(Warehouse::Wh2),
            "WH 3" => Ok(Warehouse::Wh3),
            "WH 5" => Ok(Warehouse::Wh5),
            "WH VENUS" => Ok(Warehouse::WhVenus),
            other => Err(RowParseError::UnknownWarehouse(other.to_string())),
        }
    }
}

impl TryFrom<String> for Warehouse {
    type Error = RowParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Fulfilment columns, written together when a transfer is received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub received_date: NaiveDate,
    pub received_time: NaiveTime,
    pub received_box_count: i32,
    pub receiver_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct TransferRecord {
    pub transfer_id: Uuid,
    pub sku: String,
    pub send_date: NaiveDate,
    pub send_time: NaiveTime,
    #[sqlx(try_from = "String")]
    pub origin_warehouse: Warehouse,
    #[sqlx(try_from = "String")]
    pub destination_warehouse: Warehouse,
    pub sent_box_count: i32,
    pub sender_name: String,
    #[sqlx(try_from = "String")]
    pub status: TransferStatus,
    pub received_date: Option<NaiveDate>,
    pub received_time: Option<NaiveTime>,
    pub received_box_count: Option<i32>,
    pub receiver_name: Option<String>,
}

impl TransferRecord {
    pub fn is_pending(&self) -> bool {
        self.status == TransferStatus::Sent
    }

    pub fn apply_receipt(&mut self, receipt: &TransferReceipt) {
        self.status = TransferStatus::Received;
        self.received_date = Some(receipt.received_date);
        self.received_time = Some(receipt.received_time);
        self.received_box_count = Some(receipt.received_box_count);
        self.receiver_name = Some(receipt.receiver_name.clone());
    }

    /// Text of a single cell, receiver columns blank until fulfilled.
    pub fn cell(&self, column: BoxTransfers) -> String {
        match column {
            BoxTransfers::TransferId => self.transfer_id.to_string(),
            BoxTransfers::Sku => self.sku.clone(),
            BoxTransfers::SendDate => self.send_date.format(DATE_FORMAT).to_string(),
            BoxTransfers::SendTime => self.send_time.format(TIME_FORMAT).to_string(),
            BoxTransfers::OriginWarehouse => self.origin_warehouse.to_string(),
            BoxTransfers::DestinationWarehouse => self.destination_warehouse.to_string(),
            BoxTransfers::SentBoxCount => self.sent_box_count.to_string(),
            BoxTransfers::SenderName => self.sender_name.clone(),
            BoxTransfers::Status => self.status.to_string(),
            BoxTransfers::ReceivedDate => self
                .received_date
                .map(|date| date.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            BoxTransfers::ReceivedTime => self
                .received_time
                .map(|time| time.format(TIME_FORMAT).to_string())
                .unwrap_or_default(),
            BoxTransfers::ReceivedBoxCount => self
                .received_box_count
                .map(|count| count.to_string())
                .unwrap_or_default(),
            BoxTransfers::ReceiverName => self.receiver_name.clone().unwrap_or_default(),
            BoxTransfers::Table | BoxTransfers::RowNumber => String::new(),
        }
    }

    /// Cells in sheet order.
    pub fn to_row(&self) -> Vec<String> {
        BoxTransfers::LAYOUT
            .iter()
            .map(|column| self.cell(*column))
            .collect()
    }

    /// Parses cells given in sheet order.
    pub fn from_row(cells: &[String]) -> Result<Self, RowParseError> {
        if cells.len() != BoxTransfers::LAYOUT.len() {
            return Err(RowParseError::Width {
                found: cells.len(),
                expected: BoxTransfers::LAYOUT.len(),
            });
        }

        let get = |column: BoxTransfers| cell_at(cells, column);

        Ok(Self {
            transfer_id: parse_cell(BoxTransfers::TransferId, get(BoxTransfers::TransferId))?,
            sku: get(BoxTransfers::Sku).to_string(),
            send_date: parse_date(BoxTransfers::SendDate, get(BoxTransfers::SendDate))?,
            send_time: parse_time(BoxTransfers::SendTime, get(BoxTransfers::SendTime))?,
            origin_warehouse: get(BoxTransfers::OriginWarehouse).parse()?,
            destination_warehouse: get(BoxTransfers::DestinationWarehouse).parse()?,
            sent_box_count: parse_cell(BoxTransfers::SentBoxCount, get(BoxTransfers::SentBoxCount))?,
            sender_name: get(BoxTransfers::SenderName).to_string(),
            status: get(BoxTransfers::Status).parse()?,
            received_date: optional(get(BoxTransfers::ReceivedDate))
                .map(|value| parse_date(BoxTransfers::ReceivedDate, value))
                .transpose()?,
            received_time: optional(get(BoxTransfers::ReceivedTime))
                .map(|value| parse_time(BoxTransfers::ReceivedTime, value))
                .transpose()?,
            received_box_count: optional(get(BoxTransfers::ReceivedBoxCount))
                .map(|value| parse_cell(BoxTransfers::ReceivedBoxCount, value))
                .transpose()?,
            receiver_name: optional(get(BoxTransfers::ReceiverName)).map(str::to_string),
        })
    }
}

fn cell_at(cells: &[String], column: BoxTransfers) -> &str {
    column
        .position()
        .and_then(|position| cells.get(position - 1))
        .map(String::as_str)
        .unwrap_or_default()
}

fn optional(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}

fn invalid(column: BoxTransfers, value: &str) -> RowParseError {
    RowParseError::InvalidCell {
        column: column.header(),
        value: value.to_string(),
    }
}

fn parse_cell<T: FromStr>(column: BoxTransfers, value: &str) -> Result<T, RowParseError> {
    value.parse().map_err(|_| invalid(column, value))
}

fn parse_date(column: BoxTransfers, value: &str) -> Result<NaiveDate, RowParseError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid(column, value))
}

fn parse_time(column: BoxTransfers, value: &str) -> Result<NaiveTime, RowParseError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| invalid(column, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sent_record() -> TransferRecord {
        TransferRecord {
            transfer_id: Uuid::new_v4(),
            sku: "X1".to_string(),
            send_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            send_time: NaiveTime::from_hms_opt(9, 5, 0).unwrap(),
            origin_warehouse: Warehouse::Wh3,
            destination_warehouse: Warehouse::Wh1,
            sent_box_count: 5,
            sender_name: "Alice".to_string(),
            status: TransferStatus::Sent,
            received_date: None,
            received_time: None,
            received_box_count: None,
            receiver_name: None,
        }
    }

    #[test]
    fn sent_record_leaves_receiver_cells_blank() {
        let record = sent_record();
        let row = record.to_row();

        assert_eq!(row.len(), 13);
        assert_eq!(row[0], record.transfer_id.to_string());
        assert_eq!(row[2], "2025-03-14");
        assert_eq!(row[3], "09:05:00");
        assert_eq!(row[4], "WH 3");
        assert_eq!(row[8], "Sent");
        assert!(row[9..].iter().all(String::is_empty));
    }

    #[test]
    fn received_row_parses_back() {
        let mut record = sent_record();
        record.apply_receipt(&TransferReceipt {
            received_date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            received_time: NaiveTime::from_hms_opt(16, 30, 12).unwrap(),
            received_box_count: 4,
            receiver_name: "Bob".to_string(),
        });

        let parsed = TransferRecord::from_row(&record.to_row()).unwrap();
        assert_eq!(parsed, record);
        assert!(!parsed.is_pending());
    }

    #[test]
    fn from_row_rejects_unknown_status() {
        let mut row = sent_record().to_row();
        row[8] = "Lost".to_string();

        assert_eq!(
            TransferRecord::from_row(&row),
            Err(RowParseError::UnknownStatus("Lost".to_string()))
        );
    }

    #[test]
    fn from_row_rejects_short_rows() {
        let row = vec!["1".to_string(); 9];

        assert_eq!(
            TransferRecord::from_row(&row),
            Err(RowParseError::Width {
                found: 9,
                expected: 13
            })
        );
    }

    #[test]
    fn only_sent_can_be_received() {
        assert!(TransferStatus::Sent.can_receive());
        assert!(!TransferStatus::Received.can_receive());
        assert_eq!("Received".parse(), Ok(TransferStatus::Received));
    }

    #[test]
    fn warehouse_lists_follow_the_form_options() {
        assert!(Warehouse::Wh3.is_origin());
        assert!(!Warehouse::Wh1.is_origin());
        assert!(Warehouse::WhVenus.is_destination());
        assert!(!Warehouse::Wh3.is_destination());
        assert_eq!(
            serde_json::to_string(&Warehouse::WhVenus).unwrap(),
            "\"WH VENUS\""
        );
    }
}
