//! reqwest-based transport.
//!
//! File parts are streamed in chunks; every chunk handed to the connection is
//! reported through a channel and turned into a progress tick while the
//! request is awaited.

use std::time::Duration;

use futures::channel::mpsc::{unbounded, UnboundedSender};
use futures::stream::{self, Stream, StreamExt};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};

use crate::error::{TransportError, TransportResult};
use crate::form::UploadForm;
use crate::models::UploadFile;
use crate::native::LocalFile;
use crate::transport::{is_success_status, parse_body, ProgressFn, Transport, TransportResponse};

/// Size of the chunks a file part is streamed in.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Multipart transport over HTTP.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            timeout,
        }
    }

    async fn build_form(
        form: &UploadForm<LocalFile>,
        sent: &UnboundedSender<u64>,
    ) -> TransportResult<Form> {
        let mut multipart = Form::new();
        for part in form.parts() {
            let bytes = tokio::fs::read(part.file.path()).await?;
            let length = bytes.len() as u64;
            let body = Body::wrap_stream(chunked(bytes, sent.clone()));
            let file_part = Part::stream_with_length(body, length)
                .file_name(part.file.name())
                .mime_str(&part.file.mime_type())
                .map_err(|e| TransportError::Request(e.to_string()))?;
            multipart = multipart.part(part.name, file_part);
        }
        Ok(multipart)
    }

    fn classify(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else if err.is_builder() {
            TransportError::Request(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

impl Transport<LocalFile> for HttpTransport {
    async fn send(
        &self,
        url: &str,
        form: UploadForm<LocalFile>,
        on_progress: ProgressFn,
    ) -> TransportResult<TransportResponse> {
        // Progress is reported against the file bytes, multipart framing excluded
        let total = form.total_size();
        let (sent_tx, mut sent_rx) = unbounded::<u64>();
        let multipart = Self::build_form(&form, &sent_tx).await?;
        drop(sent_tx);

        let request = self
            .client
            .post(url)
            .multipart(multipart)
            .timeout(self.timeout)
            .send();
        tokio::pin!(request);

        let mut loaded = 0u64;
        let result = loop {
            tokio::select! {
                Some(chunk) = sent_rx.next() => {
                    loaded += chunk;
                    on_progress(loaded, total);
                }
                result = &mut request => break result,
            }
        };

        let response = result.map_err(|e| self.classify(e))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| self.classify(e))?;

        if !is_success_status(status) {
            return Err(TransportError::Status { status, body: text });
        }

        Ok(TransportResponse {
            status,
            body: parse_body(&text)?,
        })
    }
}

/// Stream `bytes` in chunks, announcing each chunk's length as it is polled.
///
/// Only the chunk being handed over is copied.
fn chunked(
    bytes: Vec<u8>,
    sent: UnboundedSender<u64>,
) -> impl Stream<Item = Result<Vec<u8>, std::io::Error>> + Send + 'static {
    stream::unfold((bytes, 0usize), move |(bytes, offset)| {
        let sent = sent.clone();
        async move {
            if offset >= bytes.len() {
                return None;
            }
            let end = (offset + CHUNK_SIZE).min(bytes.len());
            let chunk = bytes[offset..end].to_vec();
            // Receiver gone means the request already settled
            let _ = sent.unbounded_send(chunk.len() as u64);
            Some((Ok(chunk), (bytes, end)))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Multipart;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::tempdir;

    /// Echo the received parts as `{name: [file_name, content_type, len]}`.
    async fn echo(mut multipart: Multipart) -> Json<Value> {
        let mut fields = serde_json::Map::new();
        while let Ok(Some(field)) = multipart.next_field().await {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let len = field.bytes().await.map(|b| b.len()).unwrap_or(0);
            fields.insert(name, json!([file_name, content_type, len]));
        }
        Json(Value::Object(fields))
    }

    async fn spawn_server() -> String {
        let app = Router::new()
            .route("/api/upload-image", post(echo))
            .route("/api/upload-image-collection", post(echo))
            .route("/broken", post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }))
            .route("/html", post(|| async { "<html>not json</html>" }))
            .route(
                "/slow",
                post(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Json(json!({"late": true}))
                }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn fixture(dir: &std::path::Path, name: &str, len: usize) -> LocalFile {
        let path = dir.join(name);
        std::fs::write(&path, vec![7u8; len]).unwrap();
        LocalFile::open(path).unwrap()
    }

    fn recorder() -> (ProgressFn, Rc<RefCell<Vec<(u64, u64)>>>) {
        let ticks = Rc::new(RefCell::new(Vec::new()));
        let sink = ticks.clone();
        (Rc::new(move |l: u64, t: u64| sink.borrow_mut().push((l, t))), ticks)
    }

    #[tokio::test]
    async fn test_uploads_image_and_collection_parts() {
        let base = spawn_server().await;
        let dir = tempdir().unwrap();
        let image = fixture(dir.path(), "cat.png", 3 * CHUNK_SIZE + 10);
        let archive = fixture(dir.path(), "cats.zip", 500);
        let form = UploadForm::new().part("image", image).part("collection", archive);

        let transport = HttpTransport::new(Duration::from_secs(10));
        let (on_progress, ticks) = recorder();
        let response = transport
            .send(&format!("{}/api/upload-image-collection", base), form, on_progress)
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body["image"], json!(["cat.png", "image/png", 3 * CHUNK_SIZE + 10]));
        assert_eq!(response.body["collection"], json!(["cats.zip", "application/zip", 500]));

        let ticks = ticks.borrow();
        let total = (3 * CHUNK_SIZE + 10 + 500) as u64;
        assert!(ticks.iter().all(|&(_, t)| t == total));
        assert!(ticks.windows(2).all(|w| w[0].0 <= w[1].0));
    }

    #[tokio::test]
    async fn test_server_error_is_status_failure() {
        let base = spawn_server().await;
        let dir = tempdir().unwrap();
        let form = UploadForm::new().part("image", fixture(dir.path(), "a.png", 16));

        let transport = HttpTransport::new(Duration::from_secs(10));
        let (on_progress, _) = recorder();
        let err = transport
            .send(&format!("{}/broken", base), form, on_progress)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            TransportError::Status {
                status: 500,
                body: "boom".into()
            }
        );
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let base = spawn_server().await;
        let dir = tempdir().unwrap();
        let form = UploadForm::new().part("image", fixture(dir.path(), "a.png", 16));

        let transport = HttpTransport::new(Duration::from_secs(10));
        let (on_progress, _) = recorder();
        let err = transport
            .send(&format!("{}/html", base), form, on_progress)
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_failure() {
        let dir = tempdir().unwrap();
        let form = UploadForm::new().part("image", fixture(dir.path(), "a.png", 16));

        // Bind then drop to get a port nobody listens on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let transport = HttpTransport::new(Duration::from_secs(5));
        let (on_progress, _) = recorder();
        let err = transport
            .send(&format!("http://127.0.0.1:{}/api/upload-image", port), form, on_progress)
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Network(_) | TransportError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_slow_backend_hits_timeout_ceiling() {
        let base = spawn_server().await;
        let dir = tempdir().unwrap();
        let form = UploadForm::new().part("image", fixture(dir.path(), "a.png", 16));

        let ceiling = Duration::from_millis(300);
        let transport = HttpTransport::new(ceiling);
        let (on_progress, _) = recorder();
        let err = transport
            .send(&format!("{}/slow", base), form, on_progress)
            .await
            .unwrap_err();

        assert_eq!(err, TransportError::Timeout(ceiling));
    }

    #[tokio::test]
    async fn test_chunked_announces_every_chunk() {
        let len = 2 * CHUNK_SIZE + 3;
        let (tx, rx) = unbounded::<u64>();

        let chunks: Vec<Vec<u8>> = chunked(vec![1u8; len], tx)
            .map(|chunk| chunk.unwrap())
            .collect()
            .await;
        let announced: Vec<u64> = rx.collect().await;

        let sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![CHUNK_SIZE, CHUNK_SIZE, 3]);
        assert_eq!(announced, vec![CHUNK_SIZE as u64, CHUNK_SIZE as u64, 3]);
    }

    #[tokio::test]
    async fn test_chunked_empty_file_yields_nothing() {
        let (tx, rx) = unbounded::<u64>();
        let chunks: Vec<_> = chunked(Vec::new(), tx).collect().await;
        assert!(chunks.is_empty());
        assert!(rx.collect::<Vec<u64>>().await.is_empty());
    }
}
