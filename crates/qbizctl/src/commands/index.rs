//! Index command implementations

use qbizctl_core::Bindings;
use qbizctl_core::operations::{CreateIndex, DeleteIndex, GetIndex, ListIndices, UpdateIndex};

use super::invoke::{InvokeEnv, page_bindings, run_operation, tag_binding};
use crate::cli::{ForceArgs, IndexCommands};
use crate::error::Result;

fn index_bindings(application_id: Option<&str>, index_id: Option<&str>) -> Bindings {
    Bindings::new()
        .set_opt("ApplicationId", application_id)
        .set_opt("IndexId", index_id)
}

pub async fn handle_index_command(command: &IndexCommands, env: &InvokeEnv<'_>) -> Result<()> {
    match command {
        IndexCommands::Create {
            application_id,
            display_name,
            index_type,
            description,
            tags,
            units,
            client_token,
            input,
        } => {
            let bindings = Bindings::new()
                .set_opt("ApplicationId", application_id.clone())
                .set_opt("DisplayName", display_name.clone())
                .set_opt("Type", index_type.clone())
                .set_opt("Description", description.clone())
                .set_opt("CapacityConfiguration_Units", *units)
                .set_opt("ClientToken", client_token.clone());
            let bindings = tag_binding(bindings, tags);
            run_operation(env, CreateIndex, bindings, input, ForceArgs::default()).await
        }
        IndexCommands::Get {
            application_id,
            index_id,
            input,
        } => {
            let bindings = index_bindings(application_id.as_deref(), index_id.as_deref());
            run_operation(env, GetIndex, bindings, input, ForceArgs::default()).await
        }
        IndexCommands::List {
            application_id,
            page,
            input,
        } => {
            let bindings = page_bindings(
                Bindings::new().set_opt("ApplicationId", application_id.clone()),
                page,
            );
            run_operation(env, ListIndices, bindings, input, ForceArgs::default()).await
        }
        IndexCommands::Update {
            application_id,
            index_id,
            display_name,
            description,
            units,
            force,
            input,
        } => {
            let bindings = index_bindings(application_id.as_deref(), index_id.as_deref())
                .set_opt("DisplayName", display_name.clone())
                .set_opt("Description", description.clone())
                .set_opt("CapacityConfiguration_Units", *units);
            run_operation(env, UpdateIndex, bindings, input, *force).await
        }
        IndexCommands::Delete {
            application_id,
            index_id,
            force,
            input,
        } => {
            let bindings = index_bindings(application_id.as_deref(), index_id.as_deref());
            run_operation(env, DeleteIndex, bindings, input, *force).await
        }
    }
}
