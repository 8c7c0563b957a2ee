//! Application lifecycle operations

use async_trait::async_trait;

use crate::adapter::{
    ConfirmSpec, InvocationContext, Operation, OperationDescriptor, OutputSelector, ParamKind,
    ParamSpec,
};
use crate::api::{ApiResult, QBusinessApi};
use crate::error::UsageError;
use crate::model::{
    AttachmentsConfiguration, AttachmentsControlMode, CreateApplicationRequest,
    CreateApplicationResponse, DeleteApplicationRequest, DeleteApplicationResponse,
    EncryptionConfiguration, GetApplicationRequest, GetApplicationResponse,
    ListApplicationsRequest, ListApplicationsResponse, UpdateApplicationRequest,
    UpdateApplicationResponse,
};

const ATTACHMENTS_CONTROL_MODE: ParamSpec = ParamSpec::optional(
    "AttachmentsConfiguration_AttachmentsControlMode",
    ParamKind::Enum(AttachmentsControlMode::VALUES),
)
.aliases(&["AttachmentsControlMode"]);

fn attachments_configuration(
    ctx: &InvocationContext,
) -> Result<Option<AttachmentsConfiguration>, UsageError> {
    Ok(ctx
        .get::<AttachmentsControlMode>(ATTACHMENTS_CONTROL_MODE.name)?
        .map(|attachments_control_mode| AttachmentsConfiguration {
            attachments_control_mode,
        }))
}

pub struct CreateApplication;

pub static CREATE_APPLICATION: OperationDescriptor = OperationDescriptor {
    name: "CreateApplication",
    params: &[
        ParamSpec::required("DisplayName", ParamKind::String).aliases(&["Name"]),
        ParamSpec::optional("RoleArn", ParamKind::String),
        ParamSpec::optional("IdentityCenterInstanceArn", ParamKind::String),
        ParamSpec::optional("Description", ParamKind::String),
        ParamSpec::optional("EncryptionConfiguration_KmsKeyId", ParamKind::String)
            .aliases(&["KmsKeyId"]),
        ATTACHMENTS_CONTROL_MODE,
        ParamSpec::optional("Tag", ParamKind::RecordList).aliases(&["Tags"]),
        ParamSpec::optional("ClientToken", ParamKind::String),
    ],
    response_fields: &["ApplicationId", "ApplicationArn"],
    default_output: OutputSelector::Field("ApplicationId"),
    confirm: None,
};

#[async_trait]
impl Operation for CreateApplication {
    type Request = CreateApplicationRequest;
    type Response = CreateApplicationResponse;

    fn descriptor(&self) -> &'static OperationDescriptor {
        &CREATE_APPLICATION
    }

    fn build_request(&self, ctx: &InvocationContext) -> Result<Self::Request, UsageError> {
        Ok(CreateApplicationRequest {
            display_name: ctx.require("DisplayName")?,
            role_arn: ctx.get("RoleArn")?,
            identity_center_instance_arn: ctx.get("IdentityCenterInstanceArn")?,
            description: ctx.get("Description")?,
            encryption_configuration: ctx
                .get::<String>("EncryptionConfiguration_KmsKeyId")?
                .map(|kms_key_id| EncryptionConfiguration {
                    kms_key_id: Some(kms_key_id),
                }),
            attachments_configuration: attachments_configuration(ctx)?,
            tags: ctx.get("Tag")?,
            client_token: ctx.get("ClientToken")?,
        })
    }

    async fn call(
        &self,
        client: &dyn QBusinessApi,
        request: Self::Request,
    ) -> ApiResult<Self::Response> {
        client.create_application(request).await
    }
}

pub struct GetApplication;

pub static GET_APPLICATION: OperationDescriptor = OperationDescriptor {
    name: "GetApplication",
    params: &[ParamSpec::required("ApplicationId", ParamKind::String)],
    response_fields: &[
        "DisplayName",
        "ApplicationId",
        "ApplicationArn",
        "IdentityCenterApplicationArn",
        "RoleArn",
        "Status",
        "Description",
        "EncryptionConfiguration",
        "CreatedAt",
        "UpdatedAt",
        "Error",
        "AttachmentsConfiguration",
    ],
    default_output: OutputSelector::WholeResponse,
    confirm: None,
};

#[async_trait]
impl Operation for GetApplication {
    type Request = GetApplicationRequest;
    type Response = GetApplicationResponse;

    fn descriptor(&self) -> &'static OperationDescriptor {
        &GET_APPLICATION
    }

    fn build_request(&self, ctx: &InvocationContext) -> Result<Self::Request, UsageError> {
        Ok(GetApplicationRequest {
            application_id: ctx.require("ApplicationId")?,
        })
    }

    async fn call(
        &self,
        client: &dyn QBusinessApi,
        request: Self::Request,
    ) -> ApiResult<Self::Response> {
        client.get_application(request).await
    }
}

pub struct ListApplications;

pub static LIST_APPLICATIONS: OperationDescriptor = OperationDescriptor {
    name: "ListApplications",
    params: &[
        ParamSpec::optional("MaxResult", ParamKind::Integer).aliases(&["MaxResults", "MaxItems"]),
        ParamSpec::optional("NextToken", ParamKind::String),
    ],
    response_fields: &["NextToken", "Applications"],
    default_output: OutputSelector::Field("Applications"),
    confirm: None,
};

#[async_trait]
impl Operation for ListApplications {
    type Request = ListApplicationsRequest;
    type Response = ListApplicationsResponse;

    fn descriptor(&self) -> &'static OperationDescriptor {
        &LIST_APPLICATIONS
    }

    fn build_request(&self, ctx: &InvocationContext) -> Result<Self::Request, UsageError> {
        Ok(ListApplicationsRequest {
            max_results: ctx.get("MaxResult")?,
            next_token: ctx.get("NextToken")?,
        })
    }

    async fn call(
        &self,
        client: &dyn QBusinessApi,
        request: Self::Request,
    ) -> ApiResult<Self::Response> {
        client.list_applications(request).await
    }
}

pub struct UpdateApplication;

pub static UPDATE_APPLICATION: OperationDescriptor = OperationDescriptor {
    name: "UpdateApplication",
    params: &[
        ParamSpec::required("ApplicationId", ParamKind::String),
        ParamSpec::optional("IdentityCenterInstanceArn", ParamKind::String),
        ParamSpec::optional("DisplayName", ParamKind::String),
        ParamSpec::optional("Description", ParamKind::String),
        ParamSpec::optional("RoleArn", ParamKind::String),
        ATTACHMENTS_CONTROL_MODE,
    ],
    response_fields: &[],
    default_output: OutputSelector::WholeResponse,
    confirm: Some(ConfirmSpec {
        action: "update application",
        target: "ApplicationId",
    }),
};

#[async_trait]
impl Operation for UpdateApplication {
    type Request = UpdateApplicationRequest;
    type Response = UpdateApplicationResponse;

    fn descriptor(&self) -> &'static OperationDescriptor {
        &UPDATE_APPLICATION
    }

    fn build_request(&self, ctx: &InvocationContext) -> Result<Self::Request, UsageError> {
        Ok(UpdateApplicationRequest {
            application_id: ctx.require("ApplicationId")?,
            identity_center_instance_arn: ctx.get("IdentityCenterInstanceArn")?,
            display_name: ctx.get("DisplayName")?,
            description: ctx.get("Description")?,
            role_arn: ctx.get("RoleArn")?,
            attachments_configuration: attachments_configuration(ctx)?,
        })
    }

    async fn call(
        &self,
        client: &dyn QBusinessApi,
        request: Self::Request,
    ) -> ApiResult<Self::Response> {
        client.update_application(request).await
    }
}

pub struct DeleteApplication;

pub static DELETE_APPLICATION: OperationDescriptor = OperationDescriptor {
    name: "DeleteApplication",
    params: &[ParamSpec::required("ApplicationId", ParamKind::String)],
    response_fields: &[],
    default_output: OutputSelector::WholeResponse,
    confirm: Some(ConfirmSpec {
        action: "delete application",
        target: "ApplicationId",
    }),
};

#[async_trait]
impl Operation for DeleteApplication {
    type Request = DeleteApplicationRequest;
    type Response = DeleteApplicationResponse;

    fn descriptor(&self) -> &'static OperationDescriptor {
        &DELETE_APPLICATION
    }

    fn build_request(&self, ctx: &InvocationContext) -> Result<Self::Request, UsageError> {
        Ok(DeleteApplicationRequest {
            application_id: ctx.require("ApplicationId")?,
        })
    }

    async fn call(
        &self,
        client: &dyn QBusinessApi,
        request: Self::Request,
    ) -> ApiResult<Self::Response> {
        client.delete_application(request).await
    }
}
