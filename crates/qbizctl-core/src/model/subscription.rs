//! Subscription requests and responses

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscriptionType {
    #[serde(rename = "Q_LITE")]
    QLite,
    #[serde(rename = "Q_BUSINESS")]
    QBusiness,
}

impl SubscriptionType {
    pub const VALUES: &'static [&'static str] = &["Q_LITE", "Q_BUSINESS"];
}

/// The user or group a subscription is granted to. Exactly one should be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPrincipal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubscriptionDetails {
    #[serde(rename = "type")]
    pub subscription_type: Option<SubscriptionType>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionRequest {
    #[serde(skip)]
    pub application_id: String,
    pub principal: SubscriptionPrincipal,
    #[serde(rename = "type")]
    pub subscription_type: SubscriptionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateSubscriptionResponse {
    pub subscription_id: Option<String>,
    pub subscription_arn: Option<String>,
    pub current_subscription: Option<SubscriptionDetails>,
    pub next_subscription: Option<SubscriptionDetails>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListSubscriptionsRequest {
    #[serde(skip)]
    pub application_id: String,
    #[serde(skip)]
    pub max_results: Option<i32>,
    #[serde(skip)]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Subscription {
    pub subscription_id: Option<String>,
    pub subscription_arn: Option<String>,
    pub principal: Option<SubscriptionPrincipal>,
    pub current_subscription: Option<SubscriptionDetails>,
    pub next_subscription: Option<SubscriptionDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListSubscriptionsResponse {
    pub next_token: Option<String>,
    pub subscriptions: Vec<Subscription>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CancelSubscriptionRequest {
    #[serde(skip)]
    pub application_id: String,
    #[serde(skip)]
    pub subscription_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CancelSubscriptionResponse {
    pub subscription_arn: Option<String>,
    pub current_subscription: Option<SubscriptionDetails>,
    pub next_subscription: Option<SubscriptionDetails>,
}
