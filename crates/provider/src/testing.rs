//! In-memory provider fakes.
//!
//! Behave like the real services at the semantic level the executor cares
//! about: duplicate creates fail with the provider's named condition,
//! lookups and deletes of missing resources fail with the not-found code.
//! Failures can be injected per-call to exercise retry paths.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::Mutex;
use stratus_error::{Result, StratusError};

use crate::queue::{QueueApi, SendReceipt};
use crate::table::{TableApi, TableDescription};

/// A message recorded by [`FakeQueueApi::send_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    /// Target queue URL.
    pub queue_url: String,
    /// Message body.
    pub body: String,
    /// Deduplication id, when supplied.
    pub dedup_id: Option<String>,
}

/// In-memory [`QueueApi`].
#[derive(Debug, Default)]
pub struct FakeQueueApi {
    queues: Mutex<IndexMap<String, String>>,
    sent: Mutex<Vec<SentMessage>>,
    injected: Mutex<VecDeque<StratusError>>,
    calls: AtomicU64,
    next_message: AtomicU64,
}

impl FakeQueueApi {
    /// Create an empty fake.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-create a queue, as if an earlier invocation made it.
    pub fn with_queue(self, name: &str) -> Self {
        let url = Self::url_for(name);
        self.queues.lock().insert(name.to_string(), url);
        self
    }

    /// Queue the next calls to fail with `error` (consumed in order).
    pub fn inject_failure(&self, error: StratusError) {
        self.injected.lock().push_back(error);
    }

    /// Total provider calls observed.
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Messages accepted so far.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().clone()
    }

    /// Whether a queue with `name` exists.
    pub fn has_queue(&self, name: &str) -> bool {
        self.queues.lock().contains_key(name)
    }

    fn url_for(name: &str) -> String {
        format!("http://sqs.local/000000000000/{name}")
    }

    fn begin_call(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.injected.lock().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl QueueApi for FakeQueueApi {
    async fn create_queue(
        &self,
        name: &str,
        _attributes: &IndexMap<String, String>,
        _tags: &IndexMap<String, String>,
    ) -> Result<String> {
        self.begin_call()?;
        let mut queues = self.queues.lock();
        if queues.contains_key(name) {
            return Err(StratusError::permanent_provider(
                "create",
                name,
                "QueueNameExists",
                "a queue with this name already exists",
            ));
        }
        let url = Self::url_for(name);
        queues.insert(name.to_string(), url.clone());
        Ok(url)
    }

    async fn get_queue_url(&self, name: &str) -> Result<String> {
        self.begin_call()?;
        self.queues.lock().get(name).cloned().ok_or_else(|| {
            StratusError::permanent_provider(
                "lookup",
                name,
                "QueueDoesNotExist",
                "no queue with this name",
            )
        })
    }

    async fn delete_queue(&self, queue_url: &str) -> Result<()> {
        self.begin_call()?;
        let mut queues = self.queues.lock();
        let existing = queues
            .iter()
            .find(|(_, url)| url.as_str() == queue_url)
            .map(|(name, _)| name.clone());
        match existing {
            Some(name) => {
                queues.shift_remove(&name);
                Ok(())
            }
            None => Err(StratusError::permanent_provider(
                "delete",
                queue_url,
                "QueueDoesNotExist",
                "no queue at this URL",
            )),
        }
    }

    async fn send_message(
        &self,
        queue_url: &str,
        body: &str,
        _attributes: &IndexMap<String, String>,
        dedup_id: Option<&str>,
        group_id: Option<&str>,
        _delay_seconds: Option<i64>,
    ) -> Result<SendReceipt> {
        self.begin_call()?;
        let n = self.next_message.fetch_add(1, Ordering::SeqCst) + 1;
        self.sent.lock().push(SentMessage {
            queue_url: queue_url.to_string(),
            body: body.to_string(),
            dedup_id: dedup_id.map(str::to_string),
        });
        Ok(SendReceipt {
            message_id: format!("m-{n}"),
            sequence_number: group_id.map(|_| format!("{n:020}")),
        })
    }
}

/// In-memory [`TableApi`].
#[derive(Debug, Default)]
pub struct FakeTableApi {
    tables: Mutex<IndexMap<String, TableDescription>>,
    injected: Mutex<VecDeque<StratusError>>,
    calls: AtomicU64,
}

impl FakeTableApi {
    /// Create an empty fake.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-create a table in `ACTIVE` status.
    pub fn with_table(self, name: &str) -> Self {
        self.tables.lock().insert(
            name.to_string(),
            TableDescription {
                arn: Self::arn_for(name),
                status: "ACTIVE".to_string(),
            },
        );
        self
    }

    /// Queue the next calls to fail with `error` (consumed in order).
    pub fn inject_failure(&self, error: StratusError) {
        self.injected.lock().push_back(error);
    }

    /// Total provider calls observed.
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Whether a table with `name` exists.
    pub fn has_table(&self, name: &str) -> bool {
        self.tables.lock().contains_key(name)
    }

    fn arn_for(name: &str) -> String {
        format!("arn:aws:dynamodb:us-east-1:000000000000:table/{name}")
    }

    fn begin_call(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.injected.lock().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TableApi for FakeTableApi {
    async fn create_table(
        &self,
        name: &str,
        _hash_key: &str,
        _hash_key_type: &str,
    ) -> Result<TableDescription> {
        self.begin_call()?;
        let mut tables = self.tables.lock();
        if tables.contains_key(name) {
            return Err(StratusError::permanent_provider(
                "create",
                name,
                "ResourceInUseException",
                "table already exists",
            ));
        }
        let description = TableDescription {
            arn: Self::arn_for(name),
            status: "CREATING".to_string(),
        };
        tables.insert(name.to_string(), description.clone());
        Ok(description)
    }

    async fn describe_table(&self, name: &str) -> Result<TableDescription> {
        self.begin_call()?;
        self.tables.lock().get(name).cloned().ok_or_else(|| {
            StratusError::permanent_provider(
                "lookup",
                name,
                "ResourceNotFoundException",
                "requested resource not found",
            )
        })
    }

    async fn delete_table(&self, name: &str) -> Result<()> {
        self.begin_call()?;
        let mut tables = self.tables.lock();
        if tables.shift_remove(name).is_none() {
            return Err(StratusError::permanent_provider(
                "delete",
                name,
                "ResourceNotFoundException",
                "requested resource not found",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fake_queue_mirrors_provider_semantics() {
        let fake = FakeQueueApi::new();
        let empty = IndexMap::new();

        let url = fake.create_queue("jobs", &empty, &empty).await.unwrap();
        let err = fake.create_queue("jobs", &empty, &empty).await.unwrap_err();
        assert!(crate::is_already_exists(&err));
        assert_eq!(fake.get_queue_url("jobs").await.unwrap(), url);

        fake.delete_queue(&url).await.unwrap();
        let err = fake.delete_queue(&url).await.unwrap_err();
        assert!(crate::is_not_found(&err));
    }

    #[tokio::test]
    async fn fake_table_mirrors_provider_semantics() {
        let fake = FakeTableApi::new();

        fake.create_table("runs", "run_id", "S").await.unwrap();
        let err = fake.create_table("runs", "run_id", "S").await.unwrap_err();
        assert!(crate::is_already_exists(&err));

        fake.delete_table("runs").await.unwrap();
        let err = fake.describe_table("runs").await.unwrap_err();
        assert!(crate::is_not_found(&err));
    }

    #[tokio::test]
    async fn injected_failures_are_consumed_in_order() {
        let fake = FakeQueueApi::new();
        fake.inject_failure(StratusError::transient_provider(
            "create", "jobs", "ServiceUnavailable", "503",
        ));

        let empty = IndexMap::new();
        let err = fake.create_queue("jobs", &empty, &empty).await.unwrap_err();
        assert!(err.is_retryable());
        // The failure is consumed; the next call succeeds.
        fake.create_queue("jobs", &empty, &empty).await.unwrap();
        assert_eq!(fake.call_count(), 2);
    }
}
