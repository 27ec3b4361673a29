//! Queue service client.

use async_trait::async_trait;
use indexmap::IndexMap;
use stratus_error::{Result, StratusError};

use crate::transport::{CallSpec, Transport};

const SERVICE: &str = "sqs";

const CREATE_QUEUE: CallSpec = CallSpec {
    service: SERVICE,
    target: "AmazonSQS.CreateQueue",
    operation: "create",
};
const GET_QUEUE_URL: CallSpec = CallSpec {
    service: SERVICE,
    target: "AmazonSQS.GetQueueUrl",
    operation: "lookup",
};
const DELETE_QUEUE: CallSpec = CallSpec {
    service: SERVICE,
    target: "AmazonSQS.DeleteQueue",
    operation: "delete",
};
const SEND_MESSAGE: CallSpec = CallSpec {
    service: SERVICE,
    target: "AmazonSQS.SendMessage",
    operation: "send",
};

/// Provider acknowledgement of a sent message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    /// Provider-assigned message identifier.
    pub message_id: String,
    /// Sequence number, assigned on FIFO queues.
    pub sequence_number: Option<String>,
}

/// Queue operations an action may perform.
///
/// The seam for test doubles: actions hold a `dyn QueueApi`, the runtime
/// hands them [`HttpQueueClient`], tests hand them fakes.
#[async_trait]
pub trait QueueApi: Send + Sync {
    /// Create a queue, returning its URL.
    async fn create_queue(
        &self,
        name: &str,
        attributes: &IndexMap<String, String>,
        tags: &IndexMap<String, String>,
    ) -> Result<String>;

    /// Resolve an existing queue's URL by name.
    async fn get_queue_url(&self, name: &str) -> Result<String>;

    /// Delete a queue by URL.
    async fn delete_queue(&self, queue_url: &str) -> Result<()>;

    /// Send one message, returning the provider's receipt.
    ///
    /// `attributes` become string-typed message attributes.
    async fn send_message(
        &self,
        queue_url: &str,
        body: &str,
        attributes: &IndexMap<String, String>,
        dedup_id: Option<&str>,
        group_id: Option<&str>,
        delay_seconds: Option<i64>,
    ) -> Result<SendReceipt>;
}

/// HTTP implementation of [`QueueApi`] over the signed transport.
#[derive(Debug, Clone)]
pub struct HttpQueueClient {
    transport: Transport,
}

impl HttpQueueClient {
    /// Create a client over `transport`.
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl QueueApi for HttpQueueClient {
    async fn create_queue(
        &self,
        name: &str,
        attributes: &IndexMap<String, String>,
        tags: &IndexMap<String, String>,
    ) -> Result<String> {
        let mut body = serde_json::json!({ "QueueName": name });
        if !attributes.is_empty() {
            body["Attributes"] = serde_json::to_value(attributes)
                .map_err(|e| StratusError::internal(format!("encoding attributes: {e}")))?;
        }
        if !tags.is_empty() {
            body["tags"] = serde_json::to_value(tags)
                .map_err(|e| StratusError::internal(format!("encoding tags: {e}")))?;
        }

        let response = self.transport.call(CREATE_QUEUE, name, &body).await?;
        require_str(&response, "QueueUrl", CREATE_QUEUE, name)
    }

    async fn get_queue_url(&self, name: &str) -> Result<String> {
        let body = serde_json::json!({ "QueueName": name });
        let response = self.transport.call(GET_QUEUE_URL, name, &body).await?;
        require_str(&response, "QueueUrl", GET_QUEUE_URL, name)
    }

    async fn delete_queue(&self, queue_url: &str) -> Result<()> {
        let body = serde_json::json!({ "QueueUrl": queue_url });
        self.transport.call(DELETE_QUEUE, queue_url, &body).await?;
        Ok(())
    }

    async fn send_message(
        &self,
        queue_url: &str,
        message_body: &str,
        attributes: &IndexMap<String, String>,
        dedup_id: Option<&str>,
        group_id: Option<&str>,
        delay_seconds: Option<i64>,
    ) -> Result<SendReceipt> {
        let mut body = serde_json::json!({
            "QueueUrl": queue_url,
            "MessageBody": message_body,
        });
        if !attributes.is_empty() {
            let mut rendered = serde_json::Map::new();
            for (name, value) in attributes {
                rendered.insert(
                    name.clone(),
                    serde_json::json!({ "DataType": "String", "StringValue": value }),
                );
            }
            body["MessageAttributes"] = serde_json::Value::Object(rendered);
        }
        if let Some(dedup_id) = dedup_id {
            body["MessageDeduplicationId"] = dedup_id.into();
        }
        if let Some(group_id) = group_id {
            body["MessageGroupId"] = group_id.into();
        }
        if let Some(delay) = delay_seconds {
            body["DelaySeconds"] = delay.into();
        }

        let response = self.transport.call(SEND_MESSAGE, queue_url, &body).await?;
        let message_id = require_str(&response, "MessageId", SEND_MESSAGE, queue_url)?;
        let sequence_number = response
            .get("SequenceNumber")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);
        Ok(SendReceipt {
            message_id,
            sequence_number,
        })
    }
}

fn require_str(
    response: &serde_json::Value,
    field: &str,
    spec: CallSpec,
    resource: &str,
) -> Result<String> {
    response
        .get(field)
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            StratusError::permanent_provider(
                spec.operation,
                resource,
                "MalformedResponse",
                format!("provider response is missing `{field}`"),
            )
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use stratus_config::{EndpointConfig, Environment, ENDPOINT_URL_VAR};
    use wiremock::matchers::{body_partial_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn client_for(server: &MockServer) -> HttpQueueClient {
        let env = Environment::from_pairs([(ENDPOINT_URL_VAR, server.uri())]);
        let endpoint = EndpointConfig::resolve(&env).unwrap();
        HttpQueueClient::new(Transport::new(endpoint).unwrap())
    }

    #[tokio::test]
    async fn create_queue_posts_name_attributes_and_tags() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("X-Amz-Target", "AmazonSQS.CreateQueue"))
            .and(body_partial_json(serde_json::json!({
                "QueueName": "jobs",
                "Attributes": { "VisibilityTimeout": "60" },
                "tags": { "team": "infra" },
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "QueueUrl": "http://sqs/000000000000/jobs"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let attributes = IndexMap::from([("VisibilityTimeout".to_string(), "60".to_string())]);
        let tags = IndexMap::from([("team".to_string(), "infra".to_string())]);
        let url = client.create_queue("jobs", &attributes, &tags).await.unwrap();
        assert_eq!(url, "http://sqs/000000000000/jobs");
    }

    #[tokio::test]
    async fn create_queue_omits_empty_members() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({ "QueueName": "bare" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "QueueUrl": "http://sqs/000000000000/bare"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let empty = IndexMap::new();
        let url = client.create_queue("bare", &empty, &empty).await.unwrap();
        assert_eq!(url, "http://sqs/000000000000/bare");
    }

    #[tokio::test]
    async fn send_message_returns_receipt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("X-Amz-Target", "AmazonSQS.SendMessage"))
            .and(body_partial_json(serde_json::json!({
                "MessageDeduplicationId": "run-42",
                "MessageGroupId": "deploys",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "MessageId": "msg-1",
                "SequenceNumber": "111",
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let receipt = client
            .send_message(
                "http://sqs/q",
                "payload",
                &IndexMap::new(),
                Some("run-42"),
                Some("deploys"),
                None,
            )
            .await
            .unwrap();
        assert_eq!(receipt.message_id, "msg-1");
        assert_eq!(receipt.sequence_number.as_deref(), Some("111"));
    }

    #[tokio::test]
    async fn missing_queue_url_in_response_is_a_named_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .create_queue("jobs", &IndexMap::new(), &IndexMap::new())
            .await
            .unwrap_err();
        assert_eq!(err.provider_code(), Some("MalformedResponse"));
    }
}
