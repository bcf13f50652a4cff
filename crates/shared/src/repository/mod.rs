pub mod sheet;
pub mod transfer;

pub use self::sheet::{Sheet, SheetTransferRepository};
pub use self::transfer::TransferRepository;
