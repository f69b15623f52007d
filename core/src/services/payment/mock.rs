//! Mock payment gateway for testing checkout flows.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::{CheckoutSession, CreateSessionRequest, PaymentGateway, PaymentSessionStatus};

/// In-memory payment gateway.
///
/// Sessions are created unpaid; tests flip them paid with [`MockPaymentGateway::settle`]
/// to simulate the payer completing hosted checkout.
pub struct MockPaymentGateway {
    sessions: Arc<RwLock<HashMap<String, PaymentSessionStatus>>>,
    requests: Arc<RwLock<Vec<CreateSessionRequest>>>,
    counter: Arc<RwLock<u64>>,
    fail_next_create: Arc<RwLock<bool>>,
}

impl MockPaymentGateway {
    /// Create a new mock gateway
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            requests: Arc::new(RwLock::new(Vec::new())),
            counter: Arc::new(RwLock::new(0)),
            fail_next_create: Arc::new(RwLock::new(false)),
        }
    }

    /// Mark a session paid, as the provider would after hosted checkout
    pub async fn settle(&self, session_id: &str) {
        self.sessions
            .write()
            .await
            .insert(session_id.to_string(), PaymentSessionStatus::Paid);
    }

    /// Make the next `create_session` call fail with an upstream error
    pub async fn fail_next_create(&self) {
        *self.fail_next_create.write().await = true;
    }

    /// All create-session requests seen so far
    pub async fn requests(&self) -> Vec<CreateSessionRequest> {
        self.requests.read().await.clone()
    }
}

impl Default for MockPaymentGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_session(
        &self,
        request: CreateSessionRequest,
    ) -> Result<CheckoutSession, DomainError> {
        if std::mem::take(&mut *self.fail_next_create.write().await) {
            return Err(DomainError::upstream("payment", "simulated outage"));
        }

        let mut counter = self.counter.write().await;
        *counter += 1;
        let id = format!("cs_mock_{}", counter);

        self.requests.write().await.push(request);
        self.sessions
            .write()
            .await
            .insert(id.clone(), PaymentSessionStatus::Unpaid);

        Ok(CheckoutSession {
            url: format!("https://checkout.mock/pay/{}", id),
            id,
        })
    }

    async fn get_session_status(
        &self,
        session_id: &str,
    ) -> Result<PaymentSessionStatus, DomainError> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .copied()
            .ok_or_else(|| DomainError::upstream("payment", "unknown session"))
    }
}
