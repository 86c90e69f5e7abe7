// libs/appointment-cell/src/services/store.rs
use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::models::BookingError;
use crate::services::flow::BookingFlow;

/// In-memory booking flows keyed by id. A flow is visible only to the patient
/// who started it; to anyone else it does not exist.
#[derive(Debug, Default)]
pub struct BookingFlowStore {
    flows: RwLock<HashMap<Uuid, BookingFlow>>,
}

impl BookingFlowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, flow: BookingFlow) -> Uuid {
        let flow_id = flow.id();
        self.flows.write().await.insert(flow_id, flow);
        debug!("Stored booking flow {}", flow_id);
        flow_id
    }

    pub async fn get(&self, flow_id: Uuid, patient_id: &str) -> Result<BookingFlow, BookingError> {
        let flows = self.flows.read().await;
        flows
            .get(&flow_id)
            .filter(|flow| flow.patient_id() == patient_id)
            .cloned()
            .ok_or(BookingError::FlowNotFound)
    }

    /// Runs `apply` against the stored flow under the write lock.
    pub async fn update<T, F>(&self, flow_id: Uuid, patient_id: &str, apply: F) -> Result<T, BookingError>
    where
        F: FnOnce(&mut BookingFlow) -> Result<T, BookingError>,
    {
        let mut flows = self.flows.write().await;
        let flow = flows
            .get_mut(&flow_id)
            .filter(|flow| flow.patient_id() == patient_id)
            .ok_or(BookingError::FlowNotFound)?;
        apply(flow)
    }

    pub async fn remove(&self, flow_id: Uuid, patient_id: &str) -> Result<BookingFlow, BookingError> {
        let mut flows = self.flows.write().await;
        match flows.get(&flow_id) {
            Some(flow) if flow.patient_id() == patient_id => {}
            _ => return Err(BookingError::FlowNotFound),
        }
        let flow = flows.remove(&flow_id).ok_or(BookingError::FlowNotFound)?;
        debug!("Removed booking flow {}", flow_id);
        Ok(flow)
    }

    pub async fn len(&self) -> usize {
        self.flows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.flows.read().await.is_empty()
    }
}
