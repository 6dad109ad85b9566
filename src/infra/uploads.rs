//! Filesystem-backed storage for case-study imagery.
//!
//! Stored files live under `<root>/<yyyy>/<mm>/<dd>/<uuid>-<name>` and are
//! served back at `/uploads/{stored_path}`. Records in the database hold
//! only those public URLs, never binary data.

use std::error::Error as StdError;
use std::fmt::Write as FmtWrite;
use std::path::{Component, Path, PathBuf};

use bytes::Bytes;
use futures::{StreamExt, pin_mut, stream};
use sha2::{Digest, Sha256};
use slug::slugify;
use thiserror::Error;
use tokio::{fs, io::AsyncWriteExt};
use uuid::Uuid;

/// File extensions accepted from the admin image upload form.
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "avif"];

#[derive(Debug, Error)]
pub enum UploadStorageError {
    #[error("invalid stored path")]
    InvalidPath,
    #[error("unsupported file type")]
    UnsupportedType,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("uploaded file stream failed")]
    PayloadStream {
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
    #[error("uploaded file is empty")]
    EmptyPayload,
    #[error("uploaded file size exceeds supported range")]
    SizeOverflow,
}

/// Result of storing an upload payload.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub stored_path: String,
    pub checksum: String,
    pub size_bytes: i64,
}

impl StoredUpload {
    /// The URL the public site serves this file under, which is also what
    /// gets persisted on records.
    pub fn public_url(&self) -> String {
        format!("/uploads/{}", self.stored_path)
    }
}

/// Filesystem-backed upload storage.
#[derive(Debug)]
pub struct UploadStorage {
    root: PathBuf,
}

impl UploadStorage {
    /// Initialise storage rooted at the provided directory, creating it if
    /// necessary.
    pub fn new(root: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Store an image payload, streaming it to disk.
    pub async fn store_stream<S>(
        &self,
        original_name: &str,
        stream: S,
    ) -> Result<StoredUpload, UploadStorageError>
    where
        S: futures::Stream<Item = Result<Bytes, UploadStorageError>>,
    {
        if !has_allowed_extension(original_name) {
            return Err(UploadStorageError::UnsupportedType);
        }

        let stored_path = self.build_stored_path(original_name);
        let absolute = self.resolve(&stored_path)?;
        if let Some(parent) = absolute.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(&absolute).await?;
        let mut hasher = Sha256::new();
        let mut total_bytes: u64 = 0;

        pin_mut!(stream);
        while let Some(chunk_result) = stream.next().await {
            let chunk = match chunk_result {
                Ok(chunk) => chunk,
                Err(err) => {
                    drop(file);
                    let _ = fs::remove_file(&absolute).await;
                    return Err(err);
                }
            };
            if chunk.is_empty() {
                continue;
            }
            total_bytes = total_bytes
                .checked_add(chunk.len() as u64)
                .ok_or(UploadStorageError::SizeOverflow)?;
            file.write_all(&chunk).await?;
            hasher.update(&chunk);
        }
        file.flush().await?;

        if total_bytes == 0 {
            drop(file);
            let _ = fs::remove_file(&absolute).await;
            return Err(UploadStorageError::EmptyPayload);
        }

        let checksum = hex_from_bytes(&hasher.finalize());
        let size_bytes =
            i64::try_from(total_bytes).map_err(|_| UploadStorageError::SizeOverflow)?;

        Ok(StoredUpload {
            stored_path,
            checksum,
            size_bytes,
        })
    }

    /// Store a fully-buffered payload.
    pub async fn store(
        &self,
        original_name: &str,
        data: Bytes,
    ) -> Result<StoredUpload, UploadStorageError> {
        let stream = stream::once(async move { Ok::<_, UploadStorageError>(data) });
        self.store_stream(original_name, stream).await
    }

    /// Read a stored payload into memory for serving.
    pub async fn read(&self, stored_path: &str) -> Result<Bytes, UploadStorageError> {
        let absolute = self.resolve(stored_path)?;
        let data = fs::read(absolute).await?;
        Ok(Bytes::from(data))
    }

    /// Reject absolute paths and any traversal components before touching
    /// the filesystem.
    fn resolve(&self, stored_path: &str) -> Result<PathBuf, UploadStorageError> {
        let relative = Path::new(stored_path);
        if relative.is_absolute()
            || relative
                .components()
                .any(|component| matches!(component, Component::ParentDir | Component::Prefix(_)))
        {
            return Err(UploadStorageError::InvalidPath);
        }
        Ok(self.root.join(relative))
    }

    fn build_stored_path(&self, original_name: &str) -> String {
        let (year, month, day) = time::OffsetDateTime::now_utc().to_calendar_date();
        let directory = format!("{year}/{:02}/{:02}", month as u8, day);
        let identifier = Uuid::new_v4();
        let filename = sanitize_filename(original_name);
        format!("{directory}/{identifier}-{filename}")
    }
}

fn has_allowed_extension(original_name: &str) -> bool {
    Path::new(original_name)
        .extension()
        .and_then(|value| value.to_str())
        .map(|value| value.to_ascii_lowercase())
        .is_some_and(|ext| ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

fn sanitize_filename(original: &str) -> String {
    let path = Path::new(original);
    let stem = path
        .file_stem()
        .and_then(|value| value.to_str())
        .unwrap_or("upload");
    let mut base = slugify(stem);
    if base.is_empty() {
        base = "upload".to_string();
    }

    let extension = path
        .extension()
        .and_then(|value| value.to_str())
        .map(|value| value.trim_matches('.').to_ascii_lowercase())
        .filter(|value| !value.is_empty());

    match extension {
        Some(ext) => format!("{base}.{ext}"),
        None => base,
    }
}

fn hex_from_bytes(bytes: &[u8]) -> String {
    let mut output = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = FmtWrite::write_fmt(&mut output, format_args!("{byte:02x}"));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> (tempfile::TempDir, UploadStorage) {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = UploadStorage::new(dir.path().to_path_buf()).expect("storage");
        (dir, storage)
    }

    #[tokio::test]
    async fn stores_and_reads_back_with_a_public_url() {
        let (_dir, storage) = storage();
        let stored = storage
            .store("Before Shot.JPG", Bytes::from_static(b"fake image bytes"))
            .await
            .expect("store");

        assert!(stored.stored_path.ends_with("-before-shot.jpg"));
        assert!(stored.public_url().starts_with("/uploads/"));
        assert_eq!(stored.size_bytes, 16);

        let data = storage.read(&stored.stored_path).await.expect("read");
        assert_eq!(data, Bytes::from_static(b"fake image bytes"));
    }

    #[tokio::test]
    async fn rejects_non_image_extensions() {
        let (_dir, storage) = storage();
        let err = storage
            .store("script.exe", Bytes::from_static(b"nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, UploadStorageError::UnsupportedType));
    }

    #[tokio::test]
    async fn rejects_empty_payloads_and_cleans_up() {
        let (_dir, storage) = storage();
        let err = storage
            .store("empty.png", Bytes::new())
            .await
            .unwrap_err();
        assert!(matches!(err, UploadStorageError::EmptyPayload));
    }

    #[tokio::test]
    async fn refuses_traversal_on_read() {
        let (_dir, storage) = storage();
        let err = storage.read("../../etc/passwd").await.unwrap_err();
        assert!(matches!(err, UploadStorageError::InvalidPath));
        let err = storage.read("/etc/passwd").await.unwrap_err();
        assert!(matches!(err, UploadStorageError::InvalidPath));
    }
}
