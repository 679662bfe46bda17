use crate::domain::model::{Record, Table};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn source_location(&self) -> &str;
    fn output_path(&self) -> Option<&str>;
    fn delimiter(&self) -> char;
    fn pretty(&self) -> bool;
    fn indent(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn retry_attempts(&self) -> u32;
    fn retry_delay_seconds(&self) -> u64;
    fn request_headers(&self) -> &HashMap<String, String>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Table>;
    async fn transform(&self, table: Table) -> Result<Vec<Record>>;
    async fn load(&self, records: &[Record]) -> Result<Option<String>>;
}
