//! Fetcher abstraction: one GET, one JSON document

use crate::core::error::RequestFailed;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Value, RequestFailed>;
}
