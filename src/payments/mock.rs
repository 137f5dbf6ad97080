use super::{
    PaymentDetails, PaymentMode, PaymentOutcome, PaymentService, Result, SubscriptionOutcome,
    SubscriptionPlan, subscription_plans,
};
use crate::config::PaymentsConfig;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

/// Payment service that approves every charge after a fixed delay
pub struct MockPaymentService {
    mode: PaymentMode,
    client_id: Option<String>,
    latency: Duration,
}

impl Default for MockPaymentService {
    fn default() -> Self {
        Self::new(PaymentMode::Sandbox, Duration::from_secs(2))
    }
}

impl MockPaymentService {
    pub fn new(mode: PaymentMode, latency: Duration) -> Self {
        Self {
            mode,
            client_id: None,
            latency,
        }
    }

    pub fn from_config(config: &PaymentsConfig) -> Self {
        Self {
            mode: config.mode,
            client_id: config.client_id.clone(),
            latency: config.latency(),
        }
    }

    pub fn mode(&self) -> PaymentMode {
        self.mode
    }

    // Only the first few characters ever reach the log
    fn masked_client_id(&self) -> String {
        match self.client_id.as_deref() {
            Some(id) => format!("{}...", id.chars().take(10).collect::<String>()),
            None => "<none>".to_string(),
        }
    }

    async fn round_trip(&self) {
        tokio::time::sleep(self.latency).await;
    }
}

fn mock_id(prefix: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", &token[..13])
}

#[async_trait]
impl PaymentService for MockPaymentService {
    fn plans(&self) -> Vec<SubscriptionPlan> {
        subscription_plans()
    }

    async fn process_payment(&self, details: &PaymentDetails) -> Result<PaymentOutcome> {
        info!(
            "Processing payment of {:.2} {} ({}) in {:?} mode, client {}",
            details.amount,
            details.currency,
            details.description,
            self.mode,
            self.masked_client_id()
        );
        self.round_trip().await;

        Ok(PaymentOutcome {
            success: true,
            transaction_id: Some(mock_id("mock-txn")),
        })
    }

    async fn process_subscription(&self, plan_id: &str) -> Result<SubscriptionOutcome> {
        let Some(plan) = self.plans().into_iter().find(|p| p.id == plan_id) else {
            warn!("Unknown subscription plan '{}'", plan_id);
            return Ok(SubscriptionOutcome::declined());
        };

        info!(
            "Processing {} subscription ({}) in {:?} mode, client {}",
            plan.name,
            plan.price_label(),
            self.mode,
            self.masked_client_id()
        );
        self.round_trip().await;

        Ok(SubscriptionOutcome {
            success: true,
            subscription_id: Some(mock_id("mock-sub")),
        })
    }
}
