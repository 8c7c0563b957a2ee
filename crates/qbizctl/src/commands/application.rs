//! Application command implementations

use qbizctl_core::Bindings;
use qbizctl_core::operations::{
    CreateApplication, DeleteApplication, GetApplication, ListApplications, UpdateApplication,
};

use super::invoke::{InvokeEnv, page_bindings, run_operation, tag_binding};
use crate::cli::{ApplicationCommands, ForceArgs};
use crate::error::Result;

pub async fn handle_application_command(
    command: &ApplicationCommands,
    env: &InvokeEnv<'_>,
) -> Result<()> {
    match command {
        ApplicationCommands::Create {
            display_name,
            role_arn,
            identity_center_instance_arn,
            description,
            kms_key_id,
            attachments_control_mode,
            tags,
            client_token,
            input,
        } => {
            let bindings = Bindings::new()
                .set_opt("DisplayName", display_name.clone())
                .set_opt("RoleArn", role_arn.clone())
                .set_opt("IdentityCenterInstanceArn", identity_center_instance_arn.clone())
                .set_opt("Description", description.clone())
                .set_opt("EncryptionConfiguration_KmsKeyId", kms_key_id.clone())
                .set_opt(
                    "AttachmentsConfiguration_AttachmentsControlMode",
                    attachments_control_mode.clone(),
                )
                .set_opt("ClientToken", client_token.clone());
            let bindings = tag_binding(bindings, tags);
            run_operation(env, CreateApplication, bindings, input, ForceArgs::default()).await
        }
        ApplicationCommands::Get {
            application_id,
            input,
        } => {
            let bindings = Bindings::new().set_opt("ApplicationId", application_id.clone());
            run_operation(env, GetApplication, bindings, input, ForceArgs::default()).await
        }
        ApplicationCommands::List { page, input } => {
            let bindings = page_bindings(Bindings::new(), page);
            run_operation(env, ListApplications, bindings, input, ForceArgs::default()).await
        }
        ApplicationCommands::Update {
            application_id,
            identity_center_instance_arn,
            display_name,
            description,
            role_arn,
            attachments_control_mode,
            force,
            input,
        } => {
            let bindings = Bindings::new()
                .set_opt("ApplicationId", application_id.clone())
                .set_opt("IdentityCenterInstanceArn", identity_center_instance_arn.clone())
                .set_opt("DisplayName", display_name.clone())
                .set_opt("Description", description.clone())
                .set_opt("RoleArn", role_arn.clone())
                .set_opt(
                    "AttachmentsConfiguration_AttachmentsControlMode",
                    attachments_control_mode.clone(),
                );
            run_operation(env, UpdateApplication, bindings, input, *force).await
        }
        ApplicationCommands::Delete {
            application_id,
            force,
            input,
        } => {
            let bindings = Bindings::new().set_opt("ApplicationId", application_id.clone());
            run_operation(env, DeleteApplication, bindings, input, *force).await
        }
    }
}
