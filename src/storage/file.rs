use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

use crate::models::PriceTable;
use crate::storage::{codec, TableStore};

/// Price table kept in a single delimited text file.
pub struct DelimitedFileStore {
    path: PathBuf,
}

impl DelimitedFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl TableStore for DelimitedFileStore {
    async fn load(&self) -> Result<PriceTable> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No price log at {}, starting a new one", self.path.display());
                return Ok(PriceTable::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", self.path.display()));
            }
        };

        let table = codec::decode(&contents);
        if table.is_empty() {
            warn!("Price log {} holds no rows", self.path.display());
            return Ok(table);
        }
        info!(
            "Loaded {} products over {} runs from {}",
            table.rows().len(),
            table.runs(),
            self.path.display()
        );
        Ok(table)
    }

    async fn save(&self, table: &PriceTable) -> Result<()> {
        let staging = self.staging_path();

        fs::write(&staging, codec::encode(table))
            .await
            .with_context(|| format!("Failed to write {}", staging.display()))?;
        fs::rename(&staging, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        info!("Saved price log to {}", self.path.display());
        Ok(())
    }
}
