use super::{check_type, file_uri, pick_file, UploadCompletion, UploadQueue, UploadResponse, Uploader};
use crate::config::CarouselConfig;
use crate::error::UploadError;
use crate::item::{ItemId, PreviewSource};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Stores picked files in a local media directory and resolves them to `file://` urls.
///
/// Used when no upload endpoint is configured. Remote urls are kept as they are.
pub struct LocalUploader {
    config: CarouselConfig,
    media_dir: PathBuf,
    queue: UploadQueue,
}

impl LocalUploader {
    pub fn new(config: CarouselConfig, media_dir: PathBuf) -> Self {
        Self {
            config,
            media_dir,
            queue: UploadQueue::new(),
        }
    }

    /// Validates `path` and starts copying it; the preview is reported before the copy runs.
    pub fn upload_path(
        &mut self,
        path: PathBuf,
        on_preview: &mut dyn FnMut(PreviewSource) -> ItemId,
    ) -> Result<(), UploadError> {
        check_type(&self.config, &path)?;
        let item = on_preview(PreviewSource(file_uri(&path)));
        let media_dir = self.media_dir.clone();
        log::debug!("Storing {} for {item}", path.display());
        self.queue.spawn(item, move || store_file(&path, &media_dir));
        Ok(())
    }
}

impl Uploader for LocalUploader {
    fn upload_selected_file(
        &mut self,
        on_preview: &mut dyn FnMut(PreviewSource) -> ItemId,
    ) -> Result<(), UploadError> {
        match pick_file(&self.config) {
            Some(path) => self.upload_path(path, on_preview),
            None => {
                log::debug!("File selection cancelled");
                Ok(())
            }
        }
    }

    fn upload_by_url(&mut self, item: ItemId, url: &str) -> Result<(), UploadError> {
        let url = url.to_string();
        self.queue.spawn(item, move || Ok(UploadResponse::success(url)));
        Ok(())
    }

    fn poll_completions(&mut self) -> Vec<UploadCompletion> {
        self.queue.drain()
    }
}

/// Copies `source` into `media_dir` under a fresh name, keeping its extension.
fn store_file(source: &Path, media_dir: &Path) -> Result<UploadResponse, UploadError> {
    fs::create_dir_all(media_dir)?;
    let name = match source.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
        None => Uuid::new_v4().to_string(),
    };
    let target = media_dir.join(name);
    fs::copy(source, &target)?;
    Ok(UploadResponse::success(file_uri(&target)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for(uploader: &mut LocalUploader) -> UploadCompletion {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(done) = uploader.poll_completions().pop() {
                return done;
            }
            assert!(Instant::now() < deadline, "Upload did not finish");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_store_file_keeps_extension() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("photo.png");
        fs::write(&source, b"not really a png").unwrap();
        let media = dir.path().join("media");

        let url = store_file(&source, &media).unwrap().into_url().unwrap();
        assert!(url.starts_with("file://"));
        assert!(url.ends_with(".png"));

        let stored = Path::new(url.trim_start_matches("file://"));
        assert_eq!(fs::read(stored).unwrap(), b"not really a png");
    }

    #[test]
    fn test_upload_path_previews_then_completes() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("photo.jpg");
        fs::write(&source, b"jpeg bytes").unwrap();

        let mut uploader = LocalUploader::new(CarouselConfig::default(), dir.path().join("media"));
        let bound = ItemId::new();
        let mut previews = Vec::new();
        uploader
            .upload_path(source.clone(), &mut |preview| {
                previews.push(preview);
                bound
            })
            .unwrap();

        assert_eq!(previews, vec![PreviewSource(file_uri(&source))]);
        let done = wait_for(&mut uploader);
        assert_eq!(done.item, bound);
        assert!(done.result.unwrap().into_url().unwrap().ends_with(".jpg"));
    }

    #[test]
    fn test_rejected_type_has_no_preview() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("notes.txt");
        fs::write(&source, b"text").unwrap();

        let mut uploader = LocalUploader::new(CarouselConfig::default(), dir.path().join("media"));
        let mut called = false;
        let result = uploader.upload_path(source, &mut |_| {
            called = true;
            ItemId::new()
        });

        assert!(matches!(result, Err(UploadError::RejectedType { .. })));
        assert!(!called);
    }

    #[test]
    fn test_missing_source_fails_the_job() {
        let dir = tempfile::tempdir().unwrap();
        let mut uploader = LocalUploader::new(CarouselConfig::default(), dir.path().join("media"));
        uploader
            .upload_path(dir.path().join("gone.png"), &mut |_| ItemId::new())
            .unwrap();

        let done = wait_for(&mut uploader);
        assert!(matches!(done.result, Err(UploadError::Io(_))));
    }

    #[test]
    fn test_remote_url_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let mut uploader = LocalUploader::new(CarouselConfig::default(), dir.path().to_path_buf());
        let item = ItemId::new();
        uploader.upload_by_url(item, "https://x/y.png").unwrap();

        let done = wait_for(&mut uploader);
        assert_eq!(done.item, item);
        assert_eq!(done.result.unwrap().into_url().unwrap(), "https://x/y.png");
    }
}
