//! Document command implementations

use qbizctl_core::Bindings;
use qbizctl_core::operations::{BatchDeleteDocument, BatchPutDocument, ListDocuments};

use super::invoke::{InvokeEnv, list_binding, page_bindings, run_operation};
use crate::cli::{DocumentCommands, ForceArgs};
use crate::error::Result;

pub async fn handle_document_command(
    command: &DocumentCommands,
    env: &InvokeEnv<'_>,
) -> Result<()> {
    match command {
        DocumentCommands::List {
            application_id,
            index_id,
            data_source_ids,
            page,
            input,
        } => {
            let bindings = Bindings::new()
                .set_opt("ApplicationId", application_id.clone())
                .set_opt("IndexId", index_id.clone());
            let bindings = list_binding(bindings, "DataSourceId", data_source_ids.clone());
            let bindings = page_bindings(bindings, page);
            run_operation(env, ListDocuments, bindings, input, ForceArgs::default()).await
        }
        DocumentCommands::BatchPut {
            application_id,
            index_id,
            documents,
            role_arn,
            data_source_sync_id,
            force,
            input,
        } => {
            let bindings = Bindings::new()
                .set_opt("ApplicationId", application_id.clone())
                .set_opt("IndexId", index_id.clone())
                .set_opt("RoleArn", role_arn.clone())
                .set_opt("DataSourceSyncId", data_source_sync_id.clone());
            let bindings = list_binding(bindings, "Document", documents.clone());
            run_operation(env, BatchPutDocument, bindings, input, *force).await
        }
        DocumentCommands::BatchDelete {
            application_id,
            index_id,
            document_ids,
            data_source_sync_id,
            force,
            input,
        } => {
            let bindings = Bindings::new()
                .set_opt("ApplicationId", application_id.clone())
                .set_opt("IndexId", index_id.clone())
                .set_opt("DataSourceSyncId", data_source_sync_id.clone());
            let bindings = list_binding(bindings, "DocumentId", document_ids.clone());
            run_operation(env, BatchDeleteDocument, bindings, input, *force).await
        }
    }
}
