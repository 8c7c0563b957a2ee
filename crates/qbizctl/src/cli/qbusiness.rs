//! Resource commands
//!
//! Flags for required parameters are optional at the clap level: they may
//! also arrive through `--input-json`, and the adapter reports anything
//! still missing.

use clap::{Args, Subcommand};
use serde_json::Value;

/// Structured parameters shared by every operation
#[derive(Args, Debug, Default, Clone)]
pub struct InputArgs {
    /// Parameters as a JSON object, inline or as @file. Flags override its values
    #[arg(long, value_name = "JSON|@FILE")]
    pub input_json: Option<String>,
}

/// Skip the confirmation prompt of a destructive operation
#[derive(Args, Debug, Default, Clone, Copy)]
pub struct ForceArgs {
    /// Proceed without asking for confirmation
    #[arg(long, short = 'f', visible_alias = "yes")]
    pub force: bool,
}

/// Paging controls for list operations
#[derive(Args, Debug, Default, Clone)]
pub struct PageArgs {
    /// Maximum number of items to return
    #[arg(long, visible_alias = "max-items")]
    pub max_results: Option<i64>,

    /// Token from a previous page
    #[arg(long)]
    pub next_token: Option<String>,
}

/// Parse a `KEY=VALUE` tag
pub fn parse_tag(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

/// Parse an inline JSON object
pub fn parse_json_object(raw: &str) -> Result<Value, String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) => Err("expected a JSON object".to_string()),
        Err(e) => Err(format!("invalid JSON: {}", e)),
    }
}

/// Application commands
#[derive(Subcommand, Debug)]
pub enum ApplicationCommands {
    /// Create an application
    #[command(after_help = "EXAMPLES:
    qbizctl application create --display-name Support --tag team=support
    qbizctl application create --input-json @application.json
")]
    Create {
        /// Application display name
        #[arg(long, visible_alias = "name")]
        display_name: Option<String>,

        /// IAM role the application assumes
        #[arg(long)]
        role_arn: Option<String>,

        /// Identity Center instance to use for user management
        #[arg(long)]
        identity_center_instance_arn: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// KMS key used to encrypt application data
        #[arg(long)]
        kms_key_id: Option<String>,

        /// ENABLED or DISABLED
        #[arg(long)]
        attachments_control_mode: Option<String>,

        /// Tag as KEY=VALUE (repeatable)
        #[arg(long = "tag", value_parser = parse_tag)]
        tags: Vec<(String, String)>,

        /// Idempotency token
        #[arg(long)]
        client_token: Option<String>,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Get an application
    #[command(visible_alias = "show")]
    Get {
        #[arg(long)]
        application_id: Option<String>,

        #[command(flatten)]
        input: InputArgs,
    },

    /// List applications
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        page: PageArgs,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Update an application
    Update {
        #[arg(long)]
        application_id: Option<String>,

        #[arg(long)]
        identity_center_instance_arn: Option<String>,

        #[arg(long, visible_alias = "name")]
        display_name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        role_arn: Option<String>,

        /// ENABLED or DISABLED
        #[arg(long)]
        attachments_control_mode: Option<String>,

        #[command(flatten)]
        force: ForceArgs,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Delete an application
    #[command(visible_alias = "rm")]
    Delete {
        #[arg(long)]
        application_id: Option<String>,

        #[command(flatten)]
        force: ForceArgs,

        #[command(flatten)]
        input: InputArgs,
    },
}

/// Index commands
#[derive(Subcommand, Debug)]
pub enum IndexCommands {
    /// Create an index
    #[command(after_help = "EXAMPLES:
    qbizctl index create --application-id app-1 --display-name Support
    qbizctl index create --application-id app-1 --display-name Support --type STARTER -s ^DisplayName
")]
    Create {
        #[arg(long)]
        application_id: Option<String>,

        #[arg(long, visible_alias = "name")]
        display_name: Option<String>,

        /// ENTERPRISE or STARTER
        #[arg(long = "type")]
        index_type: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Tag as KEY=VALUE (repeatable)
        #[arg(long = "tag", value_parser = parse_tag)]
        tags: Vec<(String, String)>,

        /// Provisioned capacity units
        #[arg(long)]
        units: Option<i64>,

        /// Idempotency token
        #[arg(long)]
        client_token: Option<String>,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Get an index
    #[command(visible_alias = "show")]
    Get {
        #[arg(long)]
        application_id: Option<String>,

        #[arg(long)]
        index_id: Option<String>,

        #[command(flatten)]
        input: InputArgs,
    },

    /// List the indices of an application
    #[command(visible_alias = "ls")]
    List {
        #[arg(long)]
        application_id: Option<String>,

        #[command(flatten)]
        page: PageArgs,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Update an index
    #[command(after_help = "EXAMPLES:
    qbizctl index update --application-id app-1 --index-id idx-1 --units 2 --force

    # Attribute configuration is only accepted as structured input
    qbizctl index update --input-json @index-attributes.json
")]
    Update {
        #[arg(long)]
        application_id: Option<String>,

        #[arg(long)]
        index_id: Option<String>,

        #[arg(long, visible_alias = "name")]
        display_name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Provisioned capacity units
        #[arg(long)]
        units: Option<i64>,

        #[command(flatten)]
        force: ForceArgs,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Delete an index
    #[command(visible_alias = "rm")]
    Delete {
        #[arg(long)]
        application_id: Option<String>,

        #[arg(long)]
        index_id: Option<String>,

        #[command(flatten)]
        force: ForceArgs,

        #[command(flatten)]
        input: InputArgs,
    },
}

/// Document commands
#[derive(Subcommand, Debug)]
pub enum DocumentCommands {
    /// List the documents of an index
    #[command(visible_alias = "ls")]
    List {
        #[arg(long)]
        application_id: Option<String>,

        #[arg(long)]
        index_id: Option<String>,

        /// Restrict to a data source (repeatable)
        #[arg(long = "data-source-id")]
        data_source_ids: Vec<String>,

        #[command(flatten)]
        page: PageArgs,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Add or update documents in an index
    #[command(name = "batch-put", visible_alias = "put")]
    #[command(after_help = "EXAMPLES:
    qbizctl document put --application-id app-1 --index-id idx-1 \\
        --document '{\"Id\": \"doc-1\", \"Title\": \"Handbook\"}'
")]
    BatchPut {
        #[arg(long)]
        application_id: Option<String>,

        #[arg(long)]
        index_id: Option<String>,

        /// Document as a JSON object (repeatable)
        #[arg(long = "document", value_parser = parse_json_object)]
        documents: Vec<Value>,

        /// IAM role used to read documents from S3
        #[arg(long)]
        role_arn: Option<String>,

        #[arg(long)]
        data_source_sync_id: Option<String>,

        #[command(flatten)]
        force: ForceArgs,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Remove documents from an index
    #[command(name = "batch-delete", visible_alias = "rm")]
    BatchDelete {
        #[arg(long)]
        application_id: Option<String>,

        #[arg(long)]
        index_id: Option<String>,

        /// Document identifier (repeatable)
        #[arg(long = "document-id")]
        document_ids: Vec<String>,

        #[arg(long)]
        data_source_sync_id: Option<String>,

        #[command(flatten)]
        force: ForceArgs,

        #[command(flatten)]
        input: InputArgs,
    },
}

/// Subscription commands
#[derive(Subcommand, Debug)]
pub enum SubscriptionCommands {
    /// Subscribe a user or group to an application
    #[command(after_help = "EXAMPLES:
    qbizctl subscription create --application-id app-1 --user user-1 --type Q_BUSINESS
")]
    Create {
        #[arg(long)]
        application_id: Option<String>,

        /// Identity Center user ID
        #[arg(long, conflicts_with = "group")]
        user: Option<String>,

        /// Identity Center group ID
        #[arg(long)]
        group: Option<String>,

        /// Q_LITE or Q_BUSINESS
        #[arg(long = "type")]
        subscription_type: Option<String>,

        /// Idempotency token
        #[arg(long)]
        client_token: Option<String>,

        #[command(flatten)]
        input: InputArgs,
    },

    /// List the subscriptions of an application
    #[command(visible_alias = "ls")]
    List {
        #[arg(long)]
        application_id: Option<String>,

        #[command(flatten)]
        page: PageArgs,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Cancel a subscription
    Cancel {
        #[arg(long)]
        application_id: Option<String>,

        #[arg(long)]
        subscription_id: Option<String>,

        #[command(flatten)]
        force: ForceArgs,

        #[command(flatten)]
        input: InputArgs,
    },
}
