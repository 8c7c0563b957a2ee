//! Subscription command implementations

use qbizctl_core::Bindings;
use qbizctl_core::operations::{CancelSubscription, CreateSubscription, ListSubscriptions};

use super::invoke::{InvokeEnv, page_bindings, run_operation};
use crate::cli::{ForceArgs, SubscriptionCommands};
use crate::error::Result;

pub async fn handle_subscription_command(
    command: &SubscriptionCommands,
    env: &InvokeEnv<'_>,
) -> Result<()> {
    match command {
        SubscriptionCommands::Create {
            application_id,
            user,
            group,
            subscription_type,
            client_token,
            input,
        } => {
            let bindings = Bindings::new()
                .set_opt("ApplicationId", application_id.clone())
                .set_opt("Principal_User", user.clone())
                .set_opt("Principal_Group", group.clone())
                .set_opt("Type", subscription_type.clone())
                .set_opt("ClientToken", client_token.clone());
            run_operation(env, CreateSubscription, bindings, input, ForceArgs::default()).await
        }
        SubscriptionCommands::List {
            application_id,
            page,
            input,
        } => {
            let bindings = page_bindings(
                Bindings::new().set_opt("ApplicationId", application_id.clone()),
                page,
            );
            run_operation(env, ListSubscriptions, bindings, input, ForceArgs::default()).await
        }
        SubscriptionCommands::Cancel {
            application_id,
            subscription_id,
            force,
            input,
        } => {
            let bindings = Bindings::new()
                .set_opt("ApplicationId", application_id.clone())
                .set_opt("SubscriptionId", subscription_id.clone());
            run_operation(env, CancelSubscription, bindings, input, *force).await
        }
    }
}
