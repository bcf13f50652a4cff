pub mod clock;
pub mod transfer;

pub use self::clock::{ClockTrait, DynClock};

pub use self::transfer::{
    DynTransferRepository, DynTransferService, TransferRepositoryTrait, TransferServiceTrait,
};
