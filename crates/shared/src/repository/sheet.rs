use crate::abstract_trait::TransferRepositoryTrait;
use crate::model::transfer::{RowParseError, TransferReceipt, TransferRecord};
use crate::schema::transfer::BoxTransfers;
use crate::utils::AppError;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Header row plus string cells, addressed like a spreadsheet.
#[derive(Debug, Clone)]
pub struct Sheet {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new() -> Self {
        Self::with_header(BoxTransfers::headers().into_iter().map(String::from).collect())
    }

    /// A sheet whose columns may be laid out in any order.
    pub fn with_header(header: Vec<String>) -> Self {
        Sheet {
            header,
            rows: Vec::new(),
        }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// 0-based index of a column, looked up by its header text.
    pub fn column_index(&self, column: BoxTransfers) -> Result<usize, RowParseError> {
        self.header
            .iter()
            .position(|h| h == column.header())
            .ok_or_else(|| RowParseError::InvalidCell {
                column: column.header(),
                value: "<missing column>".to_string(),
            })
    }

    fn column_map(&self) -> Result<HashMap<BoxTransfers, usize>, RowParseError> {
        BoxTransfers::LAYOUT
            .iter()
            .map(|column| self.column_index(*column).map(|index| (*column, index)))
            .collect()
    }

    pub fn append_row(&mut self, record: &TransferRecord) -> Result<(), RowParseError> {
        let columns = self.column_map()?;
        let mut cells = vec![String::new(); self.header.len()];
        for (column, index) in columns {
            cells[index] = record.cell(column);
        }
        self.rows.push(cells);
        Ok(())
    }

    /// Row index of the first exact match in the id column.
    pub fn find_row(&self, id: &str) -> Result<Option<usize>, RowParseError> {
        let index = self.column_index(BoxTransfers::TransferId)?;
        Ok(self
            .rows
            .iter()
            .position(|cells| cells.get(index).map(String::as_str) == Some(id)))
    }

    pub fn update_cell(
        &mut self,
        row: usize,
        column: BoxTransfers,
        value: String,
    ) -> Result<(), RowParseError> {
        let index = self.column_index(column)?;
        if let Some(cell) = self.rows.get_mut(row).and_then(|cells| cells.get_mut(index)) {
            *cell = value;
        }
        Ok(())
    }

    pub fn record_at(&self, row: usize) -> Result<Option<TransferRecord>, RowParseError> {
        let Some(cells) = self.rows.get(row) else {
            return Ok(None);
        };
        let columns = self.column_map()?;
        let ordered: Vec<String> = BoxTransfers::LAYOUT
            .iter()
            .map(|column| {
                columns
                    .get(column)
                    .and_then(|index| cells.get(*index))
                    .cloned()
                    .unwrap_or_default()
            })
            .collect();
        TransferRecord::from_row(&ordered).map(Some)
    }

    pub fn records(&self) -> Result<Vec<TransferRecord>, RowParseError> {
        (0..self.rows.len())
            .filter_map(|row| self.record_at(row).transpose())
            .collect()
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}

/// Transfer table kept in process as a spreadsheet.
#[derive(Debug, Default)]
pub struct SheetTransferRepository {
    sheet: Mutex<Sheet>,
}

impl SheetTransferRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sheet(sheet: Sheet) -> Self {
        SheetTransferRepository {
            sheet: Mutex::new(sheet),
        }
    }

    pub async fn snapshot(&self) -> Sheet {
        self.sheet.lock().await.clone()
    }
}

#[async_trait]
impl TransferRepositoryTrait for SheetTransferRepository {
    async fn find_all(&self) -> Result<Vec<TransferRecord>, AppError> {
        let sheet = self.sheet.lock().await;
        let records = sheet.records().map_err(|e| {
            error!("❌ [Sheet] Failed to read transfer rows: {e}");
            AppError::StoreError(e)
        })?;

        info!("✅ [Sheet] Read {} transfer row(s)", records.len());
        Ok(records)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TransferRecord>, AppError> {
        let sheet = self.sheet.lock().await;
        match sheet.find_row(&id.to_string())? {
            Some(row) => Ok(sheet.record_at(row)?),
            None => {
                info!("🟡 [Sheet] No transfer found with ID: {id}");
                Ok(None)
            }
        }
    }

    async fn append(&self, record: &TransferRecord) -> Result<TransferRecord, AppError> {
        let mut sheet = self.sheet.lock().await;
        sheet.append_row(record)?;

        info!(
            "📦 [Sheet] Appended transfer {} at row {}",
            record.transfer_id,
            sheet.rows().len() + 1
        );
        Ok(record.clone())
    }

    async fn mark_received(
        &self,
        id: Uuid,
        receipt: &TransferReceipt,
    ) -> Result<TransferRecord, AppError> {
        let mut sheet = self.sheet.lock().await;

        let Some(row) = sheet.find_row(&id.to_string())? else {
            error!("❌ [Sheet] Transfer with ID {id} not found");
            return Err(AppError::NotFound(format!("Transfer with ID {id} not found")));
        };

        let Some(mut record) = sheet.record_at(row)? else {
            return Err(AppError::NotFound(format!("Transfer with ID {id} not found")));
        };

        if !record.status.can_receive() {
            warn!("⚠️ [Sheet] Transfer {id} was already received");
            return Err(AppError::AlreadyReceived(id.to_string()));
        }

        record.apply_receipt(receipt);
        for column in BoxTransfers::RECEIPT {
            sheet.update_cell(row, column, record.cell(column))?;
        }

        info!("✅ [Sheet] Transfer {id} marked as received at row {}", row + 2);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::transfer::{TransferStatus, Warehouse};
    use chrono::{NaiveDate, NaiveTime};

    fn record(sku: &str) -> TransferRecord {
        TransferRecord {
            transfer_id: Uuid::new_v4(),
            sku: sku.to_string(),
            send_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            send_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            origin_warehouse: Warehouse::Wh3,
            destination_warehouse: Warehouse::Wh2,
            sent_box_count: 7,
            sender_name: "Alice".to_string(),
            status: TransferStatus::Sent,
            received_date: None,
            received_time: None,
            received_box_count: None,
            receiver_name: None,
        }
    }

    fn receipt() -> TransferReceipt {
        TransferReceipt {
            received_date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            received_time: NaiveTime::from_hms_opt(11, 20, 0).unwrap(),
            received_box_count: 6,
            receiver_name: "Bob".to_string(),
        }
    }

    #[tokio::test]
    async fn receipt_touches_only_the_five_receipt_cells() {
        let repo = SheetTransferRepository::new();
        let sent = repo.append(&record("X1")).await.unwrap();
        let before = repo.snapshot().await.rows()[0].clone();

        repo.mark_received(sent.transfer_id, &receipt()).await.unwrap();

        let after = repo.snapshot().await.rows()[0].clone();
        assert_eq!(&after[..8], &before[..8]);
        assert_eq!(
            &after[8..],
            &["Received", "2025-03-15", "11:20:00", "6", "Bob"].map(String::from)
        );
    }

    #[tokio::test]
    async fn reordered_columns_are_addressed_by_header() {
        let mut header: Vec<String> = BoxTransfers::headers()
            .into_iter()
            .map(String::from)
            .collect();
        header.reverse();
        let repo = SheetTransferRepository::from_sheet(Sheet::with_header(header));

        let sent = repo.append(&record("X2")).await.unwrap();
        let received = repo.mark_received(sent.transfer_id, &receipt()).await.unwrap();

        let sheet = repo.snapshot().await;
        assert_eq!(sheet.rows()[0][0], "Bob");
        assert_eq!(sheet.rows()[0][4], "Received");
        assert_eq!(sheet.rows()[0][12], sent.transfer_id.to_string());
        assert_eq!(repo.find_all().await.unwrap(), vec![received]);
    }

    #[tokio::test]
    async fn second_receipt_is_rejected() {
        let repo = SheetTransferRepository::new();
        let sent = repo.append(&record("X3")).await.unwrap();
        repo.mark_received(sent.transfer_id, &receipt()).await.unwrap();

        let err = repo
            .mark_received(sent.transfer_id, &receipt())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AlreadyReceived(_)));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let repo = SheetTransferRepository::new();
        repo.append(&record("X4")).await.unwrap();

        let err = repo
            .mark_received(Uuid::new_v4(), &receipt())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn missing_column_is_reported() {
        let sheet = Sheet::with_header(vec!["Transfer_ID".to_string()]);
        assert!(sheet.column_index(BoxTransfers::Status).is_err());
    }
}
