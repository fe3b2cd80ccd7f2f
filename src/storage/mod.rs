use anyhow::Result;
use async_trait::async_trait;

use crate::models::PriceTable;

pub mod codec;
mod file;

pub use file::DelimitedFileStore;

#[async_trait]
pub trait TableStore: Send + Sync {
    /// Loads the persisted table, or an empty one when nothing was saved yet.
    async fn load(&self) -> Result<PriceTable>;
    /// Replaces the persisted table as a whole.
    async fn save(&self, table: &PriceTable) -> Result<()>;
}
