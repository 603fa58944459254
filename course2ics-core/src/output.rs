//! Where generated files go.

use std::path::{Path, PathBuf};

use crate::error::{Course2IcsError, Course2IcsResult};
use crate::index::{INDEX_FILE_NAME, RunIndex};

/// Destination for event files and the run index.
///
/// Each write completes before it returns, so files of one row are on disk
/// before the next row starts.
#[allow(async_fn_in_trait)]
pub trait OutputSink {
    /// Write one event file and return its path.
    async fn write_event(&mut self, file_name: &str, contents: &str) -> Course2IcsResult<PathBuf>;

    /// Write the run index and return its path.
    async fn write_index(&mut self, index: &RunIndex) -> Course2IcsResult<PathBuf>;
}

/// An existing directory on disk.
#[derive(Debug, Clone)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    /// Open an output directory. It must already exist.
    pub async fn open(path: &Path) -> Course2IcsResult<Self> {
        let is_dir = tokio::fs::metadata(path)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);

        if !is_dir {
            return Err(Course2IcsError::Config(format!(
                "Output directory {} does not exist. Create it before running.",
                path.display()
            )));
        }

        Ok(OutputDir {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for OutputDir {
    async fn write_event(&mut self, file_name: &str, contents: &str) -> Course2IcsResult<PathBuf> {
        let path = self.path.join(file_name);
        tokio::fs::write(&path, contents).await?;
        Ok(path)
    }

    async fn write_index(&mut self, index: &RunIndex) -> Course2IcsResult<PathBuf> {
        let path = self.path.join(INDEX_FILE_NAME);
        tokio::fs::write(&path, index.to_json()?).await?;
        Ok(path)
    }
}
