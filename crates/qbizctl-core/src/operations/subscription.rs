//! Subscription operations

use async_trait::async_trait;

use crate::adapter::{
    ConfirmSpec, InvocationContext, Operation, OperationDescriptor, OutputSelector, ParamKind,
    ParamSpec,
};
use crate::api::{ApiResult, QBusinessApi};
use crate::error::UsageError;
use crate::model::{
    CancelSubscriptionRequest, CancelSubscriptionResponse, CreateSubscriptionRequest,
    CreateSubscriptionResponse, ListSubscriptionsRequest, ListSubscriptionsResponse,
    SubscriptionPrincipal, SubscriptionType,
};

pub struct CreateSubscription;

pub static CREATE_SUBSCRIPTION: OperationDescriptor = OperationDescriptor {
    name: "CreateSubscription",
    params: &[
        ParamSpec::required("ApplicationId", ParamKind::String),
        ParamSpec::optional("Principal_User", ParamKind::String).aliases(&["User"]),
        ParamSpec::optional("Principal_Group", ParamKind::String).aliases(&["Group"]),
        ParamSpec::required("Type", ParamKind::Enum(SubscriptionType::VALUES))
            .aliases(&["SubscriptionType"]),
        ParamSpec::optional("ClientToken", ParamKind::String),
    ],
    response_fields: &[
        "SubscriptionId",
        "SubscriptionArn",
        "CurrentSubscription",
        "NextSubscription",
    ],
    default_output: OutputSelector::WholeResponse,
    confirm: None,
};

impl CreateSubscription {
    /// The principal is a union: exactly one of user or group
    fn principal(ctx: &InvocationContext) -> Result<SubscriptionPrincipal, UsageError> {
        let user = ctx.get::<String>("Principal_User")?;
        let group = ctx.get::<String>("Principal_Group")?;
        match (&user, &group) {
            (Some(_), Some(_)) => Err(UsageError::InvalidParameter {
                operation: CREATE_SUBSCRIPTION.name,
                parameter: "Principal_Group",
                reason: "Principal_User and Principal_Group are mutually exclusive".to_string(),
            }),
            (None, None) => Err(UsageError::MissingParameter {
                operation: CREATE_SUBSCRIPTION.name,
                parameter: "Principal_User",
            }),
            _ => Ok(SubscriptionPrincipal { user, group }),
        }
    }
}

#[async_trait]
impl Operation for CreateSubscription {
    type Request = CreateSubscriptionRequest;
    type Response = CreateSubscriptionResponse;

    fn descriptor(&self) -> &'static OperationDescriptor {
        &CREATE_SUBSCRIPTION
    }

    fn build_request(&self, ctx: &InvocationContext) -> Result<Self::Request, UsageError> {
        Ok(CreateSubscriptionRequest {
            application_id: ctx.require("ApplicationId")?,
            principal: Self::principal(ctx)?,
            subscription_type: ctx.require("Type")?,
            client_token: ctx.get("ClientToken")?,
        })
    }

    async fn call(
        &self,
        client: &dyn QBusinessApi,
        request: Self::Request,
    ) -> ApiResult<Self::Response> {
        client.create_subscription(request).await
    }
}

pub struct ListSubscriptions;

pub static LIST_SUBSCRIPTIONS: OperationDescriptor = OperationDescriptor {
    name: "ListSubscriptions",
    params: &[
        ParamSpec::required("ApplicationId", ParamKind::String),
        ParamSpec::optional("MaxResult", ParamKind::Integer).aliases(&["MaxResults", "MaxItems"]),
        ParamSpec::optional("NextToken", ParamKind::String),
    ],
    response_fields: &["NextToken", "Subscriptions"],
    default_output: OutputSelector::Field("Subscriptions"),
    confirm: None,
};

#[async_trait]
impl Operation for ListSubscriptions {
    type Request = ListSubscriptionsRequest;
    type Response = ListSubscriptionsResponse;

    fn descriptor(&self) -> &'static OperationDescriptor {
        &LIST_SUBSCRIPTIONS
    }

    fn build_request(&self, ctx: &InvocationContext) -> Result<Self::Request, UsageError> {
        Ok(ListSubscriptionsRequest {
            application_id: ctx.require("ApplicationId")?,
            max_results: ctx.get("MaxResult")?,
            next_token: ctx.get("NextToken")?,
        })
    }

    async fn call(
        &self,
        client: &dyn QBusinessApi,
        request: Self::Request,
    ) -> ApiResult<Self::Response> {
        client.list_subscriptions(request).await
    }
}

pub struct CancelSubscription;

pub static CANCEL_SUBSCRIPTION: OperationDescriptor = OperationDescriptor {
    name: "CancelSubscription",
    params: &[
        ParamSpec::required("ApplicationId", ParamKind::String),
        ParamSpec::required("SubscriptionId", ParamKind::String),
    ],
    response_fields: &["SubscriptionArn", "CurrentSubscription", "NextSubscription"],
    default_output: OutputSelector::WholeResponse,
    confirm: Some(ConfirmSpec {
        action: "cancel subscription",
        target: "SubscriptionId",
    }),
};

#[async_trait]
impl Operation for CancelSubscription {
    type Request = CancelSubscriptionRequest;
    type Response = CancelSubscriptionResponse;

    fn descriptor(&self) -> &'static OperationDescriptor {
        &CANCEL_SUBSCRIPTION
    }

    fn build_request(&self, ctx: &InvocationContext) -> Result<Self::Request, UsageError> {
        Ok(CancelSubscriptionRequest {
            application_id: ctx.require("ApplicationId")?,
            subscription_id: ctx.require("SubscriptionId")?,
        })
    }

    async fn call(
        &self,
        client: &dyn QBusinessApi,
        request: Self::Request,
    ) -> ApiResult<Self::Response> {
        client.cancel_subscription(request).await
    }
}
