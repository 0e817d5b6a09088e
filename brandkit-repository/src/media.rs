//! Filesystem store for uploaded logos and media.
//!
//! Each [`MediaKind`] has its own directory. Writes land in a hidden temp file
//! inside the target directory and are renamed into place, so readers never
//! observe a partially written upload.

use brandkit_error::{storage::StorageError, StorageResult};
use brandkit_models::{
    domain::prelude::{DeleteResult, ImageInfo, ImageList, UploadedFile},
    enums::media::MediaKind,
    settings::Upload,
};
use brandkit_utils::{
    hash::sha256v,
    path::{extension, extension_for_mime, sanitize_filename},
};
use chrono::{DateTime, Utc};
use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct MediaStore {
    logos_dir: PathBuf,
    media_dir: PathBuf,
    public_prefix: String,
}

impl MediaStore {
    pub fn new(upload: &Upload) -> Self {
        Self::with_dirs(&upload.logos_dir, &upload.media_dir, &upload.public_prefix)
    }

    pub fn with_dirs(
        logos_dir: impl AsRef<Path>,
        media_dir: impl AsRef<Path>,
        public_prefix: &str,
    ) -> Self {
        MediaStore {
            logos_dir: logos_dir.as_ref().to_path_buf(),
            media_dir: media_dir.as_ref().to_path_buf(),
            public_prefix: public_prefix.trim_end_matches('/').to_string(),
        }
    }

    #[inline]
    pub fn dir(&self, kind: MediaKind) -> &Path {
        match kind {
            MediaKind::Logos => &self.logos_dir,
            MediaKind::Media => &self.media_dir,
        }
    }

    /// Public URL of a stored file, e.g. `/uploads/logos/acme.png`.
    pub fn url_for(&self, kind: MediaKind, filename: &str) -> String {
        format!("{}/{}/{}", self.public_prefix, kind, filename)
    }

    /// Absolute location of `filename` inside the directory for `kind`.
    ///
    /// Fails with [`StorageError::InvalidInput`] for anything that is not a plain
    /// file name, so the result never escapes the kind's directory.
    pub fn resolve(&self, kind: MediaKind, filename: &str) -> StorageResult<PathBuf> {
        let name = sanitize_filename(filename)
            .ok_or_else(|| StorageError::InvalidInput(format!("invalid filename `{filename}`")))?;
        Ok(self.dir(kind).join(name))
    }

    /// Writes an upload and returns where it can be fetched.
    ///
    /// Without a caller supplied name the file is named after the SHA-256 of
    /// its content. A name without extension gets one derived from `mime`.
    /// Existing files with the same name are replaced.
    #[instrument(name = "media-store", skip(self, bytes), fields(size = bytes.len()))]
    pub async fn store(
        &self,
        kind: MediaKind,
        filename: Option<&str>,
        mime: Option<&str>,
        bytes: Vec<u8>,
    ) -> StorageResult<UploadedFile> {
        let ext = mime.and_then(extension_for_mime);
        let name = match filename.map(str::trim).filter(|n| !n.is_empty()) {
            Some(requested) => {
                let requested = sanitize_filename(requested).ok_or_else(|| {
                    StorageError::InvalidInput(format!("invalid filename `{requested}`"))
                })?;
                match (extension(requested), ext) {
                    (None, Some(ext)) => format!("{requested}.{ext}"),
                    _ => requested.to_string(),
                }
            }
            None => {
                let digest = sha256v(&bytes, None);
                match ext {
                    Some(ext) => format!("{digest}.{ext}"),
                    None => digest,
                }
            }
        };
        // a derived name may exceed the limit once the extension is added
        let target = self.resolve(kind, &name)?;
        let dir = self.dir(kind).to_path_buf();
        let size = bytes.len() as u64;

        let written = target.clone();
        tokio::task::spawn_blocking(move || write_atomically(&dir, &written, &bytes))
            .await
            .map_err(|e| StorageError::FileStore(io::Error::other(e)))??;

        info!(kind = %kind, filename = %name, "upload stored");
        Ok(UploadedFile {
            url: self.url_for(kind, &name),
            path: target.to_string_lossy().into_owned(),
            size,
        })
    }

    /// Stored uploads, newest first. `None` lists every kind.
    pub async fn list(&self, kind: Option<MediaKind>) -> StorageResult<ImageList> {
        let kinds = match kind {
            Some(kind) => vec![kind],
            None => MediaKind::ALL.to_vec(),
        };

        let mut images = Vec::new();
        for kind in kinds {
            self.collect(kind, &mut images).await?;
        }
        images.sort_by(|a, b| {
            b.modified_at
                .cmp(&a.modified_at)
                .then_with(|| a.filename.cmp(&b.filename))
        });

        Ok(ImageList {
            total: images.len(),
            images,
            types: MediaKind::ALL.to_vec(),
        })
    }

    #[instrument(name = "media-delete", skip(self))]
    pub async fn delete(&self, kind: MediaKind, filename: &str) -> StorageResult<DeleteResult> {
        let target = self.resolve(kind, filename)?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => {
                info!("upload deleted");
                Ok(DeleteResult {
                    success: true,
                    message: format!("deleted {kind}/{filename}"),
                })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StorageError::EntityNotFound(
                format!("upload {kind}/{filename}"),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn collect(&self, kind: MediaKind, images: &mut Vec<ImageInfo>) -> StorageResult<()> {
        let mut entries = match tokio::fs::read_dir(self.dir(kind)).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let Ok(filename) = entry.file_name().into_string() else {
                continue;
            };
            if filename.starts_with('.') {
                continue;
            }
            let meta = entry.metadata().await?;
            if !meta.is_file() {
                continue;
            }
            images.push(ImageInfo {
                url: self.url_for(kind, &filename),
                filename,
                kind,
                size: meta.len(),
                modified_at: meta.modified().ok().map(DateTime::<Utc>::from),
            });
        }
        Ok(())
    }
}

fn write_atomically(dir: &Path, target: &Path, bytes: &[u8]) -> io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::Builder::new()
        .prefix(".upload-")
        .tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}
