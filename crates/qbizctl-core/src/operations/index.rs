//! Index lifecycle operations

use async_trait::async_trait;

use crate::adapter::{
    ConfirmSpec, InvocationContext, Operation, OperationDescriptor, OutputSelector, ParamKind,
    ParamSpec,
};
use crate::api::{ApiResult, QBusinessApi};
use crate::error::UsageError;
use crate::model::{
    CreateIndexRequest, CreateIndexResponse, DeleteIndexRequest, DeleteIndexResponse,
    GetIndexRequest, GetIndexResponse, IndexCapacityConfiguration, IndexType, ListIndicesRequest,
    ListIndicesResponse, UpdateIndexRequest, UpdateIndexResponse,
};

const CAPACITY_UNITS: ParamSpec =
    ParamSpec::optional("CapacityConfiguration_Units", ParamKind::Integer).aliases(&["Units"]);

fn capacity_configuration(
    ctx: &InvocationContext,
) -> Result<Option<IndexCapacityConfiguration>, UsageError> {
    Ok(ctx
        .get::<i32>(CAPACITY_UNITS.name)?
        .map(|units| IndexCapacityConfiguration { units: Some(units) }))
}

pub struct CreateIndex;

pub static CREATE_INDEX: OperationDescriptor = OperationDescriptor {
    name: "CreateIndex",
    params: &[
        ParamSpec::required("ApplicationId", ParamKind::String),
        ParamSpec::required("DisplayName", ParamKind::String),
        ParamSpec::optional("Type", ParamKind::Enum(IndexType::VALUES)).aliases(&["IndexType"]),
        ParamSpec::optional("Description", ParamKind::String),
        ParamSpec::optional("Tag", ParamKind::RecordList).aliases(&["Tags"]),
        CAPACITY_UNITS,
        ParamSpec::optional("ClientToken", ParamKind::String),
    ],
    response_fields: &["IndexId", "IndexArn"],
    default_output: OutputSelector::Field("IndexId"),
    confirm: None,
};

#[async_trait]
impl Operation for CreateIndex {
    type Request = CreateIndexRequest;
    type Response = CreateIndexResponse;

    fn descriptor(&self) -> &'static OperationDescriptor {
        &CREATE_INDEX
    }

    fn build_request(&self, ctx: &InvocationContext) -> Result<Self::Request, UsageError> {
        Ok(CreateIndexRequest {
            application_id: ctx.require("ApplicationId")?,
            display_name: ctx.require("DisplayName")?,
            index_type: ctx.get("Type")?,
            description: ctx.get("Description")?,
            tags: ctx.get("Tag")?,
            capacity_configuration: capacity_configuration(ctx)?,
            client_token: ctx.get("ClientToken")?,
        })
    }

    async fn call(
        &self,
        client: &dyn QBusinessApi,
        request: Self::Request,
    ) -> ApiResult<Self::Response> {
        client.create_index(request).await
    }
}

pub struct GetIndex;

pub static GET_INDEX: OperationDescriptor = OperationDescriptor {
    name: "GetIndex",
    params: &[
        ParamSpec::required("ApplicationId", ParamKind::String),
        ParamSpec::required("IndexId", ParamKind::String),
    ],
    response_fields: &[
        "ApplicationId",
        "IndexId",
        "DisplayName",
        "Type",
        "IndexArn",
        "Status",
        "Description",
        "CreatedAt",
        "UpdatedAt",
        "CapacityConfiguration",
        "DocumentAttributeConfigurations",
        "Error",
        "IndexStatistics",
    ],
    default_output: OutputSelector::WholeResponse,
    confirm: None,
};

#[async_trait]
impl Operation for GetIndex {
    type Request = GetIndexRequest;
    type Response = GetIndexResponse;

    fn descriptor(&self) -> &'static OperationDescriptor {
        &GET_INDEX
    }

    fn build_request(&self, ctx: &InvocationContext) -> Result<Self::Request, UsageError> {
        Ok(GetIndexRequest {
            application_id: ctx.require("ApplicationId")?,
            index_id: ctx.require("IndexId")?,
        })
    }

    async fn call(
        &self,
        client: &dyn QBusinessApi,
        request: Self::Request,
    ) -> ApiResult<Self::Response> {
        client.get_index(request).await
    }
}

pub struct ListIndices;

pub static LIST_INDICES: OperationDescriptor = OperationDescriptor {
    name: "ListIndices",
    params: &[
        ParamSpec::required("ApplicationId", ParamKind::String),
        ParamSpec::optional("MaxResult", ParamKind::Integer).aliases(&["MaxResults", "MaxItems"]),
        ParamSpec::optional("NextToken", ParamKind::String),
    ],
    response_fields: &["NextToken", "Indices"],
    default_output: OutputSelector::Field("Indices"),
    confirm: None,
};

#[async_trait]
impl Operation for ListIndices {
    type Request = ListIndicesRequest;
    type Response = ListIndicesResponse;

    fn descriptor(&self) -> &'static OperationDescriptor {
        &LIST_INDICES
    }

    fn build_request(&self, ctx: &InvocationContext) -> Result<Self::Request, UsageError> {
        Ok(ListIndicesRequest {
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
        client.list_indices(request).await
    }
}

pub struct UpdateIndex;

pub static UPDATE_INDEX: OperationDescriptor = OperationDescriptor {
    name: "UpdateIndex",
    params: &[
        ParamSpec::required("ApplicationId", ParamKind::String),
        ParamSpec::required("IndexId", ParamKind::String),
        ParamSpec::optional("DisplayName", ParamKind::String),
        ParamSpec::optional("Description", ParamKind::String),
        CAPACITY_UNITS,
        ParamSpec::optional("DocumentAttributeConfiguration", ParamKind::RecordList)
            .aliases(&["DocumentAttributeConfigurations"]),
    ],
    response_fields: &[],
    default_output: OutputSelector::WholeResponse,
    confirm: Some(ConfirmSpec {
        action: "update index",
        target: "IndexId",
    }),
};

#[async_trait]
impl Operation for UpdateIndex {
    type Request = UpdateIndexRequest;
    type Response = UpdateIndexResponse;

    fn descriptor(&self) -> &'static OperationDescriptor {
        &UPDATE_INDEX
    }

    fn build_request(&self, ctx: &InvocationContext) -> Result<Self::Request, UsageError> {
        Ok(UpdateIndexRequest {
            application_id: ctx.require("ApplicationId")?,
            index_id: ctx.require("IndexId")?,
            display_name: ctx.get("DisplayName")?,
            description: ctx.get("Description")?,
            capacity_configuration: capacity_configuration(ctx)?,
            document_attribute_configurations: ctx.get("DocumentAttributeConfiguration")?,
        })
    }

    async fn call(
        &self,
        client: &dyn QBusinessApi,
        request: Self::Request,
    ) -> ApiResult<Self::Response> {
        client.update_index(request).await
    }
}

pub struct DeleteIndex;

pub static DELETE_INDEX: OperationDescriptor = OperationDescriptor {
    name: "DeleteIndex",
    params: &[
        ParamSpec::required("ApplicationId", ParamKind::String),
        ParamSpec::required("IndexId", ParamKind::String),
    ],
    response_fields: &[],
    default_output: OutputSelector::WholeResponse,
    confirm: Some(ConfirmSpec {
        action: "delete index",
        target: "IndexId",
    }),
};

#[async_trait]
impl Operation for DeleteIndex {
    type Request = DeleteIndexRequest;
    type Response = DeleteIndexResponse;

    fn descriptor(&self) -> &'static OperationDescriptor {
        &DELETE_INDEX
    }

    fn build_request(&self, ctx: &InvocationContext) -> Result<Self::Request, UsageError> {
        Ok(DeleteIndexRequest {
            application_id: ctx.require("ApplicationId")?,
            index_id: ctx.require("IndexId")?,
        })
    }

    async fn call(
        &self,
        client: &dyn QBusinessApi,
        request: Self::Request,
    ) -> ApiResult<Self::Response> {
        client.delete_index(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::Bindings;
    use serde_json::json;

    #[test]
    fn test_create_index_request() {
        let ctx = InvocationContext::bind(
            &CREATE_INDEX,
            Bindings::new()
                .set("ApplicationId", "app-1")
                .set("DisplayName", "My Index")
                .set("Type", "starter")
                .set("Units", "2"),
        )
        .unwrap();
        let request = CreateIndex.build_request(&ctx).unwrap();
        assert_eq!(request.application_id, "app-1");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "displayName": "My Index",
                "type": "STARTER",
                "capacityConfiguration": {"units": 2}
            })
        );
    }

    #[test]
    fn test_update_index_attribute_configurations() {
        let ctx = InvocationContext::bind(
            &UPDATE_INDEX,
            Bindings::new()
                .set("ApplicationId", "app-1")
                .set("IndexId", "idx-1")
                .set(
                    "DocumentAttributeConfiguration",
                    json!({"Name": "category", "Type": "STRING", "Search": "ENABLED"}),
                ),
        )
        .unwrap();
        let request = UpdateIndex.build_request(&ctx).unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "documentAttributeConfigurations": [
                    {"name": "category", "type": "STRING", "search": "ENABLED"}
                ]
            })
        );
    }
}
