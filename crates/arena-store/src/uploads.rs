//! Public upload area for article images.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::Utc;
use tokio::{fs::OpenOptions, io::AsyncWriteExt};
use tracing::debug;

use crate::error::Result;

/// Same-millisecond uploads of one name tried before giving up.
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Directory on disk plus the URL prefix it is served under.
#[derive(Debug, Clone)]
pub struct UploadArea {
    dir: PathBuf,
    url_prefix: String,
}

impl UploadArea {
    pub fn new(dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        let url_prefix = url_prefix.into();
        Self {
            dir: dir.into(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// Write the bytes under a time-prefixed name and return the public URL.
    ///
    /// Existing files are never overwritten: a name already taken in the
    /// same millisecond gets a counter after the timestamp.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String> {
        let stamp = Utc::now().timestamp_millis();
        let name = sanitize_file_name(original_name);
        tokio::fs::create_dir_all(&self.dir).await?;

        let mut attempt = 1;
        loop {
            let file_name = match attempt {
                1 => format!("{stamp}-{name}"),
                n => format!("{stamp}-{n}-{name}"),
            };
            let path = self.dir.join(&file_name);
            match OpenOptions::new().write(true).create_new(true).open(&path).await {
                Ok(mut file) => {
                    file.write_all(bytes).await?;
                    file.flush().await?;
                    debug!(path = %path.display(), size = bytes.len(), "stored upload");
                    return Ok(format!("{}/{}", self.url_prefix, file_name));
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists && attempt < MAX_NAME_ATTEMPTS => {
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Last path component of the client name with whitespace runs turned into `-`.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let mut out = String::with_capacity(base.len());
    let mut in_space = false;
    for c in base.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('-');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    match out.trim_start_matches('.') {
        "" => "upload".to_string(),
        rest => rest.to_string(),
    }
}
