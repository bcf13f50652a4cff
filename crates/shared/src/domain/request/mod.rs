pub mod transfer;

pub use self::transfer::{CreateTransferRequest, ReceiveTransferRequest};
