use sea_query::Iden;

/// Columns of the shared transfer table.
///
/// `LAYOUT` is the sheet order operators see; `RowNumber` only exists in the SQL
/// store to keep rows in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Iden)]
pub enum BoxTransfers {
    Table,
    RowNumber,
    TransferId,
    Sku,
    SendDate,
    SendTime,
    OriginWarehouse,
    DestinationWarehouse,
    SentBoxCount,
    SenderName,
    Status,
    ReceivedDate,
    ReceivedTime,
    ReceivedBoxCount,
    ReceiverName,
}

impl BoxTransfers {
    pub const LAYOUT: [BoxTransfers; 13] = [
        BoxTransfers::TransferId,
        BoxTransfers::Sku,
        BoxTransfers::SendDate,
        BoxTransfers::SendTime,
        BoxTransfers::OriginWarehouse,
        BoxTransfers::DestinationWarehouse,
        BoxTransfers::SentBoxCount,
        BoxTransfers::SenderName,
        BoxTransfers::Status,
        BoxTransfers::ReceivedDate,
        BoxTransfers::ReceivedTime,
        BoxTransfers::ReceivedBoxCount,
        BoxTransfers::ReceiverName,
    ];

    /// Columns written when a transfer is received.
    pub const RECEIPT: [BoxTransfers; 5] = [
        BoxTransfers::Status,
        BoxTransfers::ReceivedDate,
        BoxTransfers::ReceivedTime,
        BoxTransfers::ReceivedBoxCount,
        BoxTransfers::ReceiverName,
    ];

    /// Header text of the column in the sheet.
    pub fn header(&self) -> &'static str {
        match self {
            BoxTransfers::Table => "box_transfers",
            BoxTransfers::RowNumber => "Row",
            BoxTransfers::TransferId => "Transfer_ID",
            BoxTransfers::Sku => "SKU",
            BoxTransfers::SendDate => "Date",
            BoxTransfers::SendTime => "Time",
            BoxTransfers::OriginWarehouse => "Origin_Warehouse",
            BoxTransfers::DestinationWarehouse => "Destination_Warehouse",
            BoxTransfers::SentBoxCount => "Sent_Box_Count",
            BoxTransfers::SenderName => "Sender",
            BoxTransfers::Status => "Status",
            BoxTransfers::ReceivedDate => "Received_Date",
            BoxTransfers::ReceivedTime => "Received_Time",
            BoxTransfers::ReceivedBoxCount => "Received_Count",
            BoxTransfers::ReceiverName => "Receiver_Name",
        }
    }

    /// 1-based position in `LAYOUT`, `None` for the table and bookkeeping columns.
    pub fn position(&self) -> Option<usize> {
        Self::LAYOUT
            .iter()
            .position(|column| column == self)
            .map(|index| index + 1)
    }

    pub fn headers() -> Vec<&'static str> {
        Self::LAYOUT.iter().map(|column| column.header()).collect()
    }
}
