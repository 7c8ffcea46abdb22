//! Upload collaborators.
//!
//! An uploader picks a file, hands a preview back to the block synchronously, and finishes the
//! transfer on the rayon pool. Every job is tagged with the [`ItemId`] of the placeholder the
//! block inserted for it, so completions find their item by identity no matter in which order
//! they arrive.

mod http;
mod local;

pub use http::HttpUploader;
pub use local::LocalUploader;

use crate::config::CarouselConfig;
use crate::constants::{IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};
use crate::error::UploadError;
use crate::item::{ItemId, PreviewSource};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};

/// File descriptor returned by a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub url: String,
}

/// Upload endpoint response: `{ "success": true, "file": { "url": "..." } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default, deserialize_with = "truthy")]
    pub success: bool,
    #[serde(default)]
    pub file: Option<UploadedFile>,
}

impl UploadResponse {
    pub fn success(url: impl Into<String>) -> Self {
        Self {
            success: true,
            file: Some(UploadedFile { url: url.into() }),
        }
    }

    pub fn failure() -> Self {
        Self {
            success: false,
            file: None,
        }
    }

    /// Extracts the resolved url. Anything but a success carrying a non-blank url is an error.
    pub fn into_url(self) -> Result<String, UploadError> {
        match (self.success, self.file) {
            (true, Some(file)) if file.url.trim().is_empty() => Err(
                UploadError::MalformedResponse("success with an empty file url".to_string()),
            ),
            (true, Some(file)) => Ok(file.url),
            (true, None) => Err(UploadError::MalformedResponse(
                "success without file".to_string(),
            )),
            (false, _) => Err(UploadError::Unsuccessful),
        }
    }
}

/// Accepts `true`/`false` as well as `1`/`0`, which many upload backends send.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    })
}

pub fn parse_response(body: &str) -> Result<UploadResponse, UploadError> {
    serde_json::from_str(body).map_err(|err| UploadError::MalformedResponse(format!("{err}: {body}")))
}

/// Result of one upload job, bound to the placeholder it was started for.
#[derive(Debug)]
pub struct UploadCompletion {
    pub item: ItemId,
    pub result: Result<UploadResponse, UploadError>,
}

pub trait Uploader {
    /// Lets the user pick a file and starts uploading it.
    ///
    /// `on_preview` is called synchronously once a local preview exists; it returns the ID of the
    /// placeholder the job is bound to. Cancelling the picker is not an error.
    fn upload_selected_file(
        &mut self,
        on_preview: &mut dyn FnMut(PreviewSource) -> ItemId,
    ) -> Result<(), UploadError>;

    /// Starts resolving a remote url for the placeholder `item`.
    fn upload_by_url(&mut self, item: ItemId, url: &str) -> Result<(), UploadError>;

    /// Returns every job finished since the last call, without blocking.
    fn poll_completions(&mut self) -> Vec<UploadCompletion>;
}

/// Channel that carries job results from the rayon pool back to the UI thread.
pub struct UploadQueue {
    tx: Sender<UploadCompletion>,
    rx: Receiver<UploadCompletion>,
}

impl Default for UploadQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadQueue {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self { tx, rx }
    }

    pub fn spawn<F>(&self, item: ItemId, job: F)
    where
        F: FnOnce() -> Result<UploadResponse, UploadError> + Send + 'static,
    {
        let tx = self.tx.clone();
        rayon::spawn(move || {
            let result = job();
            if tx.send(UploadCompletion { item, result }).is_err() {
                log::debug!("Upload for {item} finished after its block was dropped");
            }
        });
    }

    /// Finished jobs, without blocking. The queue keeps its own sender, so the channel never
    /// disconnects while the queue lives.
    pub fn drain(&self) -> Vec<UploadCompletion> {
        self.rx.try_iter().collect()
    }
}

/// Extensions offered by the picker for the configured `types`. `None` means no filter.
pub fn picker_extensions(config: &CarouselConfig) -> Option<Vec<String>> {
    let mut extensions: Vec<String> = Vec::new();
    for filter in config.type_filters() {
        let known: &[&str] = match filter.as_str() {
            "*" | "*/*" => return None,
            "image/*" => IMAGE_EXTENSIONS,
            "video/*" => VIDEO_EXTENSIONS,
            other => mime_guess::get_mime_extensions_str(other).unwrap_or(&[]),
        };
        for ext in known {
            if !extensions.iter().any(|e| e.as_str() == *ext) {
                extensions.push(ext.to_string());
            }
        }
    }
    (!extensions.is_empty()).then_some(extensions)
}

/// Opens the native file dialog filtered by the configured types.
pub fn pick_file(config: &CarouselConfig) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new();
    if let Some(extensions) = picker_extensions(config) {
        dialog = dialog.add_filter("Media", &extensions);
    }
    dialog.pick_file()
}

/// Guesses the MIME type of `path` and checks it against the configured filter.
pub fn check_type(config: &CarouselConfig, path: &Path) -> Result<String, UploadError> {
    let mime = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    if config.accepts_mime(&mime) {
        Ok(mime)
    } else {
        Err(UploadError::RejectedType {
            mime,
            filter: config.types.clone(),
        })
    }
}

pub fn file_uri(path: &Path) -> String {
    format!("file://{}", path.display())
}

/// Uploader matching the config: HTTP when any endpoint is set, otherwise a local media store.
pub fn for_config(config: &CarouselConfig, media_dir: PathBuf) -> Result<Box<dyn Uploader>, UploadError> {
    if config.endpoints.by_file.is_some() || config.endpoints.by_url.is_some() {
        Ok(Box::new(HttpUploader::new(config.clone())?))
    } else {
        Ok(Box::new(LocalUploader::new(config.clone(), media_dir)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_parse_success() {
        let response = parse_response(r#"{"success":true,"file":{"url":"https://x/y.png"}}"#).unwrap();
        assert_eq!(response.into_url().unwrap(), "https://x/y.png");
    }

    #[test]
    fn test_parse_numeric_success() {
        let response = parse_response(r#"{"success":1,"file":{"url":"y.png","size":12}}"#).unwrap();
        assert_eq!(response.into_url().unwrap(), "y.png");
    }

    #[test]
    fn test_failure_shapes() {
        let failed = parse_response(r#"{"success":false}"#).unwrap();
        assert!(matches!(failed.into_url(), Err(UploadError::Unsuccessful)));

        let missing_file = parse_response(r#"{"success":true}"#).unwrap();
        assert!(matches!(
            missing_file.into_url(),
            Err(UploadError::MalformedResponse(_))
        ));

        let blank_url = parse_response(r#"{"success":true,"file":{"url":""}}"#).unwrap();
        assert!(matches!(
            blank_url.into_url(),
            Err(UploadError::MalformedResponse(_))
        ));

        let unrelated = parse_response(r#"{"status":"ok"}"#).unwrap();
        assert!(matches!(unrelated.into_url(), Err(UploadError::Unsuccessful)));

        assert!(matches!(
            parse_response("<html>502</html>"),
            Err(UploadError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_picker_extensions() {
        let config = CarouselConfig::default();
        let extensions = picker_extensions(&config).unwrap();
        assert!(extensions.contains(&"png".to_string()));
        assert!(!extensions.contains(&"mp4".to_string()));

        let config = CarouselConfig {
            types: "image/*, video/*, image/png".to_string(),
            ..Default::default()
        };
        let extensions = picker_extensions(&config).unwrap();
        assert!(extensions.contains(&"mp4".to_string()));
        assert_eq!(extensions.iter().filter(|e| *e == "png").count(), 1);

        let config = CarouselConfig {
            types: "*/*".to_string(),
            ..Default::default()
        };
        assert!(picker_extensions(&config).is_none());
    }

    #[test]
    fn test_check_type() {
        let config = CarouselConfig::default();
        assert_eq!(check_type(&config, Path::new("/tmp/a.PNG")).unwrap(), "image/png");
        assert!(matches!(
            check_type(&config, Path::new("/tmp/a.mp4")),
            Err(UploadError::RejectedType { .. })
        ));
    }

    #[test]
    fn test_url_endpoint_alone_selects_http_uploader() {
        let config = CarouselConfig {
            endpoints: crate::config::Endpoints {
                by_file: None,
                by_url: Some("http://127.0.0.1:9/fetch".to_string()),
            },
            ..Default::default()
        };
        let mut uploader = for_config(&config, std::env::temp_dir()).unwrap();

        // A local store would open the picker here; the endpoint uploader refuses up front.
        let result = uploader.upload_selected_file(&mut |_| ItemId::new());
        assert!(matches!(result, Err(UploadError::MissingEndpoint("file"))));
    }

    #[test]
    fn test_queue_delivers_tagged_completions() {
        let queue = UploadQueue::new();
        let first = ItemId::new();
        let second = ItemId::new();
        queue.spawn(first, || Ok(UploadResponse::success("a.png")));
        queue.spawn(second, || Err(UploadError::Unsuccessful));

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut done = Vec::new();
        while done.len() < 2 && Instant::now() < deadline {
            done.extend(queue.drain());
            std::thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(done.len(), 2);
        let ok = done.iter().find(|c| c.item == first).unwrap();
        assert!(ok.result.is_ok());
        let failed = done.iter().find(|c| c.item == second).unwrap();
        assert!(failed.result.is_err());
    }
}
