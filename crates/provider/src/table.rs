//! Table service client.

use async_trait::async_trait;
use stratus_error::{Result, StratusError};

use crate::transport::{CallSpec, Transport};

const SERVICE: &str = "dynamodb";

const CREATE_TABLE: CallSpec = CallSpec {
    service: SERVICE,
    target: "DynamoDB_20120810.CreateTable",
    operation: "create",
};
const DESCRIBE_TABLE: CallSpec = CallSpec {
    service: SERVICE,
    target: "DynamoDB_20120810.DescribeTable",
    operation: "lookup",
};
const DELETE_TABLE: CallSpec = CallSpec {
    service: SERVICE,
    target: "DynamoDB_20120810.DeleteTable",
    operation: "delete",
};

/// What the provider reports about a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescription {
    /// The table's ARN.
    pub arn: String,
    /// Provider lifecycle status (`CREATING`, `ACTIVE`, `DELETING`, ...).
    pub status: String,
}

/// Table operations an action may perform.
#[async_trait]
pub trait TableApi: Send + Sync {
    /// Create a table keyed by a single hash attribute.
    async fn create_table(
        &self,
        name: &str,
        hash_key: &str,
        hash_key_type: &str,
    ) -> Result<TableDescription>;

    /// Describe an existing table.
    async fn describe_table(&self, name: &str) -> Result<TableDescription>;

    /// Delete a table by name.
    async fn delete_table(&self, name: &str) -> Result<()>;
}

/// HTTP implementation of [`TableApi`] over the signed transport.
#[derive(Debug, Clone)]
pub struct HttpTableClient {
    transport: Transport,
}

impl HttpTableClient {
    /// Create a client over `transport`.
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl TableApi for HttpTableClient {
    async fn create_table(
        &self,
        name: &str,
        hash_key: &str,
        hash_key_type: &str,
    ) -> Result<TableDescription> {
        let body = serde_json::json!({
            "TableName": name,
            "AttributeDefinitions": [
                { "AttributeName": hash_key, "AttributeType": hash_key_type }
            ],
            "KeySchema": [
                { "AttributeName": hash_key, "KeyType": "HASH" }
            ],
            "BillingMode": "PAY_PER_REQUEST",
        });

        let response = self.transport.call(CREATE_TABLE, name, &body).await?;
        description_from(&response, "TableDescription", CREATE_TABLE, name)
    }

    async fn describe_table(&self, name: &str) -> Result<TableDescription> {
        let body = serde_json::json!({ "TableName": name });
        let response = self.transport.call(DESCRIBE_TABLE, name, &body).await?;
        description_from(&response, "Table", DESCRIBE_TABLE, name)
    }

    async fn delete_table(&self, name: &str) -> Result<()> {
        let body = serde_json::json!({ "TableName": name });
        self.transport.call(DELETE_TABLE, name, &body).await?;
        Ok(())
    }
}

fn description_from(
    response: &serde_json::Value,
    field: &str,
    spec: CallSpec,
    resource: &str,
) -> Result<TableDescription> {
    let missing = |what: &str| {
        StratusError::permanent_provider(
            spec.operation,
            resource,
            "MalformedResponse",
            format!("provider response is missing `{what}`"),
        )
    };

    let description = response.get(field).ok_or_else(|| missing(field))?;
    let arn = description
        .get("TableArn")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| missing("TableArn"))?;
    let status = description
        .get("TableStatus")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| missing("TableStatus"))?;

    Ok(TableDescription {
        arn: arn.to_string(),
        status: status.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use stratus_config::{EndpointConfig, Environment, ENDPOINT_URL_VAR};
    use wiremock::matchers::{body_partial_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn client_for(server: &MockServer) -> HttpTableClient {
        let env = Environment::from_pairs([(ENDPOINT_URL_VAR, server.uri())]);
        let endpoint = EndpointConfig::resolve(&env).unwrap();
        HttpTableClient::new(Transport::new(endpoint).unwrap())
    }

    #[tokio::test]
    async fn create_table_posts_key_schema() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("X-Amz-Target", "DynamoDB_20120810.CreateTable"))
            .and(body_partial_json(serde_json::json!({
                "TableName": "runs",
                "KeySchema": [{ "AttributeName": "run_id", "KeyType": "HASH" }],
                "BillingMode": "PAY_PER_REQUEST",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "TableDescription": {
                    "TableArn": "arn:aws:dynamodb:us-east-1:000000000000:table/runs",
                    "TableStatus": "CREATING",
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let description = client.create_table("runs", "run_id", "S").await.unwrap();
        assert_eq!(description.status, "CREATING");
        assert!(description.arn.ends_with("table/runs"));
    }

    #[tokio::test]
    async fn describe_reads_the_table_member() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("X-Amz-Target", "DynamoDB_20120810.DescribeTable"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Table": {
                    "TableArn": "arn:aws:dynamodb:us-east-1:000000000000:table/runs",
                    "TableStatus": "ACTIVE",
                }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let description = client.describe_table("runs").await.unwrap();
        assert_eq!(description.status, "ACTIVE");
    }

    #[tokio::test]
    async fn missing_table_surfaces_the_provider_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "__type": "com.amazonaws.dynamodb.v20120810#ResourceNotFoundException",
                "message": "Requested resource not found",
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.describe_table("gone").await.unwrap_err();
        assert_eq!(err.provider_code(), Some("ResourceNotFoundException"));
        assert!(crate::is_not_found(&err));
    }
}
