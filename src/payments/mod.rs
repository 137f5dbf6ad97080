//! Subscription plans and the payment boundary.
//!
//! Screens talk to [`PaymentService`]; [`MockPaymentService`] answers every
//! request locally after a simulated provider round-trip.

mod mock;

pub use mock::MockPaymentService;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Payments result type
pub type Result<T> = std::result::Result<T, PaymentError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    #[error("Payment provider error: {0}")]
    Provider(String),

    #[error("Payment was cancelled")]
    Cancelled,
}

/// Which provider environment requests go to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    #[default]
    #[serde(alias = "SANDBOX")]
    Sandbox,
    #[serde(alias = "LIVE")]
    Live,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingPeriod {
    Month,
    Year,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Price per billing period, in `currency`
    pub price: f64,
    pub currency: String,
    pub period: BillingPeriod,
    pub features: Vec<String>,
}

impl SubscriptionPlan {
    fn monthly(id: &str, name: &str, description: &str, price: f64, features: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price,
            currency: "USD".to_string(),
            period: BillingPeriod::Month,
            features: features.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Price formatted for display, e.g. "$12.99/month"
    pub fn price_label(&self) -> String {
        let period = match self.period {
            BillingPeriod::Month => "month",
            BillingPeriod::Year => "year",
        };
        let symbol = if self.currency == "USD" { "$" } else { "" };
        format!("{symbol}{:.2}/{period}", self.price)
    }
}

/// The three plans offered in the app, cheapest first
pub fn subscription_plans() -> Vec<SubscriptionPlan> {
    vec![
        SubscriptionPlan::monthly(
            "basic",
            "Basic",
            "Perfect for casual viewers",
            6.99,
            &[
                "Unlimited streaming on mobile devices",
                "SD quality (480p)",
                "Watch on 1 screen at a time",
                "Cancel anytime",
            ],
        ),
        SubscriptionPlan::monthly(
            "standard",
            "Standard",
            "Most popular plan",
            12.99,
            &[
                "Unlimited streaming on all devices",
                "HD quality (1080p)",
                "Watch on 2 screens at a time",
                "Download videos for offline viewing",
                "Cancel anytime",
            ],
        ),
        SubscriptionPlan::monthly(
            "premium",
            "Premium",
            "Best value for families",
            18.99,
            &[
                "Unlimited streaming on all devices",
                "Ultra HD quality (4K) and HDR",
                "Watch on 4 screens at a time",
                "Download videos for offline viewing",
                "Exclusive content access",
                "Cancel anytime",
            ],
        ),
    ]
}

/// One-off charge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub amount: f64,
    pub currency: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentOutcome {
    pub success: bool,
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionOutcome {
    pub success: bool,
    pub subscription_id: Option<String>,
}

impl SubscriptionOutcome {
    pub fn declined() -> Self {
        Self {
            success: false,
            subscription_id: None,
        }
    }
}

#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Plans the user can subscribe to
    fn plans(&self) -> Vec<SubscriptionPlan>;

    async fn process_payment(&self, details: &PaymentDetails) -> Result<PaymentOutcome>;

    /// Subscribe to a plan by id. Unknown ids decline without contacting the provider.
    async fn process_subscription(&self, plan_id: &str) -> Result<SubscriptionOutcome>;
}
