//! Network transport abstraction.
//!
//! A transport sends one [`UploadForm`] as `multipart/form-data` to a URL,
//! reports upload progress through a [`ProgressFn`] and resolves once the
//! response is known. Implementations:
//!
//! - `HttpTransport` (feature `native`) - reqwest
//! - `XhrTransport` (frontend crate) - browser `XMLHttpRequest`

use std::future::Future;
use std::rc::Rc;

use serde_json::Value;

use crate::error::TransportResult;
use crate::form::UploadForm;
use crate::models::UploadFile;

/// Progress callback: `(bytes_sent, bytes_total)`.
///
/// Ticks are advisory: they may skip values, arrive out of order or jump
/// straight to the total.
pub type ProgressFn = Rc<dyn Fn(u64, u64)>;

/// A successful (2xx) response.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Value,
}

/// Multipart HTTP client with upload progress.
///
/// Futures are not required to be `Send`; the workflow runs on a single
/// event loop (browser or current-thread runtime).
pub trait Transport<F: UploadFile> {
    /// POST `form` to `url`.
    ///
    /// Must fail for network errors, non-2xx statuses and bodies that are not
    /// JSON.
    fn send(
        &self,
        url: &str,
        form: UploadForm<F>,
        on_progress: ProgressFn,
    ) -> impl Future<Output = TransportResult<TransportResponse>>;
}

/// Accept `2xx` only.
pub fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Parse a response body as JSON. An empty body is malformed.
pub fn parse_body(text: &str) -> TransportResult<Value> {
    Ok(serde_json::from_str(text)?)
}
