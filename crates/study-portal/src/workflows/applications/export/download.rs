use std::fmt::Debug;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Finished export waiting to be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("invalid download file name '{0}'")]
    InvalidFileName(String),
    #[error("unable to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("download target unavailable: {0}")]
    Unavailable(String),
}

/// Hands a finished artifact to the user's download target.
pub trait FileDownloader: Debug + Send + Sync {
    fn deliver(&self, artifact: &ExportArtifact) -> Result<(), DownloadError>;
}

/// Writes artifacts into a local download directory, replacing files of the same name.
#[derive(Debug, Clone)]
pub struct DirectoryDownloader {
    root: PathBuf,
}

impl DirectoryDownloader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location a given file name resolves to inside the download directory.
    pub fn target_path(&self, file_name: &str) -> Result<PathBuf, DownloadError> {
        if !is_plain_file_name(file_name) {
            return Err(DownloadError::InvalidFileName(file_name.to_string()));
        }
        Ok(self.root.join(file_name))
    }
}

impl FileDownloader for DirectoryDownloader {
    fn deliver(&self, artifact: &ExportArtifact) -> Result<(), DownloadError> {
        let path = self.target_path(&artifact.file_name)?;
        let io_error = |source: std::io::Error| DownloadError::Io {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.root).map_err(|source| DownloadError::Io {
            path: self.root.clone(),
            source,
        })?;

        // Handle is dropped (and the file closed) before reporting success.
        {
            let mut file = File::create(&path).map_err(io_error)?;
            file.write_all(&artifact.bytes).map_err(io_error)?;
            file.flush().map_err(io_error)?;
        }

        debug!(path = %path.display(), bytes = artifact.len(), "export written");
        Ok(())
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}
