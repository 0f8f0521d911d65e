//! Redis-backed document store.

use super::reply::{parse_index_info, parse_search_reply};
use super::{DocumentStore, IndexInfo, SearchReply, StoreError, StoreResult};
use async_trait::async_trait;
use docfront_search::{Command, IndexDefinition, SearchOptions};
use redis::aio::ConnectionManager;
use redis::{Client, FromRedisValue, Value};
use std::time::Duration;

/// Store talking to a Redis instance with RedisJSON and RediSearch loaded.
///
/// Cloning is cheap: clones share one multiplexed connection.
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
    timeout: Duration,
}

impl RedisStore {
    /// Open the connection and check it answers `PING`.
    pub async fn connect(redis_url: &str, timeout: Duration) -> StoreResult<Self> {
        let client = Client::open(redis_url)?;

        let connection = tokio::time::timeout(timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| StoreError::Timeout(timeout))??;

        let store = Self {
            connection,
            timeout,
        };

        store.ping().await?;
        tracing::info!("Connected to Redis at {}", redis_url);

        Ok(store)
    }

    /// Send one command and wait for its reply, bounded by the timeout.
    async fn query<T: FromRedisValue>(&self, command: Command) -> StoreResult<T> {
        let mut cmd = redis::cmd(command.name);
        for arg in &command.args {
            cmd.arg(arg);
        }

        tracing::trace!(command = %command, "Sending engine command");

        let mut conn = self.connection.clone();
        match tokio::time::timeout(self.timeout, cmd.query_async::<_, T>(&mut conn)).await {
            Ok(result) => result.map_err(StoreError::from),
            Err(_) => {
                tracing::warn!(command = command.name, "Engine call timed out");
                Err(StoreError::Timeout(self.timeout))
            }
        }
    }

    /// Like [`query`](Self::query) for commands answering with a status line.
    async fn query_status(&self, command: Command) -> StoreResult<String> {
        let name = command.name;
        let reply: Value = self.query(command).await?;
        match reply {
            Value::Okay => Ok("OK".to_string()),
            Value::Status(s) => Ok(s),
            Value::Data(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            other => Err(StoreError::UnexpectedReply {
                command: name,
                detail: format!("{:?}", other),
            }),
        }
    }
}

#[async_trait]
impl DocumentStore for RedisStore {
    async fn ping(&self) -> StoreResult<()> {
        let _: String = self.query(Command::ping()).await?;
        Ok(())
    }

    async fn keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        self.query(Command::keys(pattern)).await
    }

    async fn json_get(&self, key: &str, paths: &[String]) -> StoreResult<Option<String>> {
        self.query(Command::json_get(key, paths)).await
    }

    async fn json_set(&self, key: &str, path: &str, value: &str) -> StoreResult<String> {
        self.query_status(Command::json_set(key, path, value)).await
    }

    async fn index_info(&self, index: &str) -> StoreResult<IndexInfo> {
        let reply: Value = self.query(Command::ft_info(index)).await?;
        parse_index_info(reply)
    }

    async fn create_index(&self, definition: &IndexDefinition) -> StoreResult<String> {
        definition.validate()?;
        self.query_status(Command::ft_create(definition)).await
    }

    async fn set_engine_config(&self, option: &str, value: &str) -> StoreResult<String> {
        self.query_status(Command::ft_config_set(option, value)).await
    }

    async fn search(
        &self,
        index: &str,
        query: &str,
        options: &SearchOptions,
    ) -> StoreResult<SearchReply> {
        let reply: Value = self.query(Command::ft_search(index, query, options)).await?;
        parse_search_reply(reply, options)
    }
}
