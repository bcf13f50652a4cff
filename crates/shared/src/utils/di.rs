use std::sync::Arc;

use prometheus_client::registry::Registry;

use crate::{
    abstract_trait::{DynClock, DynTransferRepository, DynTransferService},
    service::TransferService,
    utils::Metrics,
};

#[derive(Clone)]
pub struct DependenciesInject {
    pub transfer_service: DynTransferService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("transfer_service", &"DynTransferService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(
        transfer_repository: DynTransferRepository,
        clock: DynClock,
        metrics: Arc<Metrics>,
        registry: &mut Registry,
    ) -> Self {
        let transfer_service = Arc::new(TransferService::new(
            transfer_repository,
            clock,
            metrics,
            registry,
        )) as DynTransferService;

        Self { transfer_service }
    }
}
