use std::sync::Arc;

use crate::application::DeliveryService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DeliveryService>,
}

impl AppState {
    pub fn new(service: DeliveryService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
