pub mod transfer;

pub use self::transfer::{NO_PENDING_MESSAGE, TransferService};
