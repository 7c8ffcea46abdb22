use super::{check_type, file_uri, parse_response, pick_file, UploadCompletion, UploadQueue, UploadResponse, Uploader};
use crate::config::CarouselConfig;
use crate::error::UploadError;
use crate::item::{ItemId, PreviewSource};
use reqwest::blocking::{multipart, Client, RequestBuilder};
use std::collections::BTreeMap;
use std::path::Path;

/// Posts files to the configured endpoints.
///
/// Files go to `endpoints.by_file` as multipart form data under `field`, together with the
/// additional request data. Remote urls go to `endpoints.by_url` as JSON. Both carry the
/// additional request headers.
pub struct HttpUploader {
    config: CarouselConfig,
    client: Client,
    queue: UploadQueue,
}

impl HttpUploader {
    pub fn new(config: CarouselConfig) -> Result<Self, UploadError> {
        let client = Client::builder().build()?;
        Ok(Self {
            config,
            client,
            queue: UploadQueue::new(),
        })
    }

    fn endpoint(&self, by: &'static str) -> Result<String, UploadError> {
        let endpoint = match by {
            "file" => self.config.endpoints.by_file.as_ref(),
            _ => self.config.endpoints.by_url.as_ref(),
        };
        endpoint.cloned().ok_or(UploadError::MissingEndpoint(by))
    }
}

impl Uploader for HttpUploader {
    fn upload_selected_file(
        &mut self,
        on_preview: &mut dyn FnMut(PreviewSource) -> ItemId,
    ) -> Result<(), UploadError> {
        let endpoint = self.endpoint("file")?;
        let Some(path) = pick_file(&self.config) else {
            log::debug!("File selection cancelled");
            return Ok(());
        };
        check_type(&self.config, &path)?;
        let request = file_request(&self.client, &endpoint, &self.config, &path)?;

        let item = on_preview(PreviewSource(file_uri(&path)));
        log::debug!("Uploading {} to {endpoint} for {item}", path.display());
        self.queue.spawn(item, move || send(request));
        Ok(())
    }

    fn upload_by_url(&mut self, item: ItemId, url: &str) -> Result<(), UploadError> {
        let endpoint = self.endpoint("url")?;
        let request = url_request(&self.client, &endpoint, &self.config, url);
        log::debug!("Resolving {url} through {endpoint} for {item}");
        self.queue.spawn(item, move || send(request));
        Ok(())
    }

    fn poll_completions(&mut self) -> Vec<UploadCompletion> {
        self.queue.drain()
    }
}

/// Multipart POST of `path` under the configured field, plus the additional data and headers.
fn file_request(
    client: &Client,
    endpoint: &str,
    config: &CarouselConfig,
    path: &Path,
) -> Result<RequestBuilder, UploadError> {
    let mut form = multipart::Form::new().file(config.field.clone(), path)?;
    for (name, value) in &config.additional_request_data {
        form = form.text(name.clone(), value.clone());
    }
    Ok(with_headers(
        client.post(endpoint).multipart(form),
        &config.additional_request_headers,
    ))
}

/// JSON POST of `{url, ..additional data}` with the additional headers.
fn url_request(client: &Client, endpoint: &str, config: &CarouselConfig, url: &str) -> RequestBuilder {
    let mut payload = config.additional_request_data.clone();
    payload.insert("url".to_string(), url.to_string());
    with_headers(
        client.post(endpoint).json(&payload),
        &config.additional_request_headers,
    )
}

fn send(request: RequestBuilder) -> Result<UploadResponse, UploadError> {
    let body = request.send()?.text()?;
    parse_response(&body)
}

fn with_headers(mut request: RequestBuilder, headers: &BTreeMap<String, String>) -> RequestBuilder {
    for (name, value) in headers {
        request = request.header(name.as_str(), value.as_str());
    }
    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Endpoints;
    use reqwest::Method;
    use std::fs;

    const UPLOAD: &str = "http://127.0.0.1:9/upload";
    const FETCH: &str = "http://127.0.0.1:9/fetch";

    fn config() -> CarouselConfig {
        CarouselConfig {
            endpoints: Endpoints {
                by_file: Some(UPLOAD.to_string()),
                by_url: Some(FETCH.to_string()),
            },
            additional_request_data: BTreeMap::from([("album".to_string(), "7".to_string())]),
            additional_request_headers: BTreeMap::from([(
                "Authorization".to_string(),
                "Bearer t".to_string(),
            )]),
            field: "file".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_url_endpoint_is_reported() {
        let config = CarouselConfig {
            endpoints: Endpoints {
                by_file: Some(UPLOAD.to_string()),
                by_url: None,
            },
            ..Default::default()
        };
        let mut uploader = HttpUploader::new(config).unwrap();
        let result = uploader.upload_by_url(ItemId::new(), "https://x/y.png");
        assert!(matches!(result, Err(UploadError::MissingEndpoint("url"))));
    }

    #[test]
    fn test_file_request_carries_field_data_and_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cat.png");
        fs::write(&path, b"png bytes").unwrap();

        let mut request = file_request(&Client::new(), UPLOAD, &config(), &path)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.url().as_str(), UPLOAD);
        assert_eq!(request.headers()["authorization"], "Bearer t");
        let content_type = request.headers()["content-type"].to_str().unwrap().to_string();
        assert!(content_type.starts_with("multipart/form-data; boundary="));

        let body = request.body_mut().as_mut().unwrap().buffer().unwrap();
        let body = String::from_utf8_lossy(body);
        assert!(body.contains(r#"name="file"; filename="cat.png""#));
        assert!(body.contains("png bytes"));
        assert!(body.contains(r#"name="album""#));
    }

    #[test]
    fn test_file_request_fails_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = file_request(&Client::new(), UPLOAD, &config(), &dir.path().join("gone.png"));
        assert!(matches!(result, Err(UploadError::Io(_))));
    }

    #[test]
    fn test_url_request_posts_json_with_extra_data() {
        let request = url_request(&Client::new(), FETCH, &config(), "https://x/y.png")
            .build()
            .unwrap();

        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.url().as_str(), FETCH);
        assert_eq!(request.headers()["authorization"], "Bearer t");
        assert_eq!(request.headers()["content-type"], "application/json");

        let body = request.body().unwrap().as_bytes().unwrap();
        let json: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "url": "https://x/y.png", "album": "7" })
        );
    }
}
