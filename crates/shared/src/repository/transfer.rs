use crate::model::transfer::{TransferReceipt, TransferRecord, TransferStatus};
use crate::schema::transfer::BoxTransfers as TransferSchema;
use crate::utils::AppError;
use crate::{abstract_trait::TransferRepositoryTrait, config::ConnectionPool};
use anyhow::Result;
use async_trait::async_trait;
use sea_query::{Expr, Order, PostgresQueryBuilder, Query};
use sea_query_binder::{SqlxBinder, SqlxValues};
use tracing::{error, info, warn};
use uuid::Uuid;

pub struct TransferRepository {
    db_pool: ConnectionPool,
}

impl TransferRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

fn select_all_query() -> (String, SqlxValues) {
    Query::select()
        .columns(TransferSchema::LAYOUT)
        .from(TransferSchema::Table)
        .order_by(TransferSchema::RowNumber, Order::Asc)
        .build_sqlx(PostgresQueryBuilder)
}

/// Writes the receipt only while the row is still `Sent`, so a concurrent
/// receiver updates zero rows instead of overwriting the first receipt.
fn mark_received_query(id: Uuid, receipt: &TransferReceipt) -> (String, SqlxValues) {
    Query::update()
        .table(TransferSchema::Table)
        .values([
            (
                TransferSchema::Status,
                TransferStatus::Received.as_str().into(),
            ),
            (TransferSchema::ReceivedDate, receipt.received_date.into()),
            (TransferSchema::ReceivedTime, receipt.received_time.into()),
            (
                TransferSchema::ReceivedBoxCount,
                receipt.received_box_count.into(),
            ),
            (
                TransferSchema::ReceiverName,
                receipt.receiver_name.clone().into(),
            ),
        ])
        .and_where(Expr::col(TransferSchema::TransferId).eq(id))
        .and_where(Expr::col(TransferSchema::Status).eq(TransferStatus::Sent.as_str()))
        .returning(Query::returning().columns(TransferSchema::LAYOUT))
        .build_sqlx(PostgresQueryBuilder)
}

#[async_trait]
impl TransferRepositoryTrait for TransferRepository {
    async fn find_all(&self) -> Result<Vec<TransferRecord>, AppError> {
        info!("🔄 [Transfers] Fetching all transfer rows");

        let (sql, values) = select_all_query();

        info!("🧾 [Transfers] Generated SQL: {sql} | Values: {:?}", values);

        let rows = sqlx::query_as_with::<_, TransferRecord, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ [Transfers] Failed to fetch transfers: {e}");
                AppError::SqlxError(e)
            })?;

        info!("✅ [Transfers] Fetched {} transfer row(s)", rows.len());

        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TransferRecord>, AppError> {
        info!("🆔 [Transfers] Finding transfer by ID: {id}");

        let (sql, values) = Query::select()
            .columns(TransferSchema::LAYOUT)
            .from(TransferSchema::Table)
            .and_where(Expr::col(TransferSchema::TransferId).eq(id))
            .build_sqlx(PostgresQueryBuilder);

        let row = sqlx::query_as_with::<_, TransferRecord, _>(&sql, values)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ [Transfers] Database error while fetching transfer ID {id}: {e}");
                AppError::SqlxError(e)
            })?;

        match &row {
            Some(transfer) => info!(
                "✅ [Transfers] Found transfer: ID={}, SKU={}, Status={}",
                transfer.transfer_id, transfer.sku, transfer.status
            ),
            None => info!("🟡 [Transfers] No transfer found with ID: {id}"),
        }

        Ok(row)
    }

    async fn append(&self, record: &TransferRecord) -> Result<TransferRecord, AppError> {
        info!(
            "📦 [Transfers] Appending transfer {}: {} → {} | Boxes: {}",
            record.transfer_id,
            record.origin_warehouse,
            record.destination_warehouse,
            record.sent_box_count
        );

        let (sql, values) = Query::insert()
            .into_table(TransferSchema::Table)
            .columns(TransferSchema::LAYOUT)
            .values([
                record.transfer_id.into(),
                record.sku.clone().into(),
                record.send_date.into(),
                record.send_time.into(),
                record.origin_warehouse.code().into(),
                record.destination_warehouse.code().into(),
                record.sent_box_count.into(),
                record.sender_name.clone().into(),
                record.status.as_str().into(),
                record.received_date.into(),
                record.received_time.into(),
                record.received_box_count.into(),
                record.receiver_name.clone().into(),
            ])
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .returning(Query::returning().columns(TransferSchema::LAYOUT))
            .build_sqlx(PostgresQueryBuilder);

        info!("🧾 [Transfers] INSERT query: {sql} | Values: {:?}", values);

        let created = sqlx::query_as_with::<_, TransferRecord, _>(&sql, values)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| {
                error!(
                    "❌ [Transfers] Failed to append transfer {}: {e}",
                    record.transfer_id
                );
                AppError::SqlxError(e)
            })?;

        info!("✅ [Transfers] Appended transfer ID: {}", created.transfer_id);

        Ok(created)
    }

    async fn mark_received(
        &self,
        id: Uuid,
        receipt: &TransferReceipt,
    ) -> Result<TransferRecord, AppError> {
        info!(
            "📥 [Transfers] Marking transfer {id} received by {} ({} boxes)",
            receipt.receiver_name, receipt.received_box_count
        );

        let (sql, values) = mark_received_query(id, receipt);

        info!("🧾 [Transfers] UPDATE query: {sql} | Values: {:?}", values);

        let updated = sqlx::query_as_with::<_, TransferRecord, _>(&sql, values)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ [Transfers] Failed to update transfer {id}: {e}");
                AppError::SqlxError(e)
            })?;

        if let Some(record) = updated {
            info!("✅ [Transfers] Transfer {id} marked as received");
            return Ok(record);
        }

        match self.find_by_id(id).await? {
            Some(_) => {
                warn!("⚠️ [Transfers] Transfer {id} was already received");
                Err(AppError::AlreadyReceived(id.to_string()))
            }
            None => {
                error!("❌ [Transfers] Update failed: Transfer with ID {id} not found");
                Err(AppError::NotFound(format!("Transfer with ID {id} not found")))
            }
        }
    }
}
