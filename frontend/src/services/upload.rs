//! HTTP service for multipart uploads to the backend.
//!
//! Uses `XMLHttpRequest` rather than `fetch` because only XHR exposes
//! upload progress (`xhr.upload.onprogress`).

use std::time::Duration;

use imgupload::transport::{is_success_status, parse_body};
use imgupload::{
    submit, ProgressFn, Transport, TransportError, TransportResponse, TransportResult,
    UploadError, UploadFile, UploadForm,
};
use js_sys::Promise;
use leptos::spawn_local;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, FormData, ProgressEvent, XmlHttpRequest};

use crate::config::{upload_config, upload_timeout};
use crate::types::{BrowserFile, SessionSignal};

/// Browser transport.
#[derive(Clone, Debug)]
pub struct XhrTransport {
    timeout: Duration,
}

impl XhrTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Transport<BrowserFile> for XhrTransport {
    async fn send(
        &self,
        url: &str,
        form: UploadForm<BrowserFile>,
        on_progress: ProgressFn,
    ) -> TransportResult<TransportResponse> {
        let form_data = FormData::new().map_err(|e| request_error("create FormData", e))?;
        for part in form.parts() {
            form_data
                .append_with_blob_and_filename(part.name, &part.file.0, &part.file.name())
                .map_err(|e| request_error("append file", e))?;
        }

        let xhr = XmlHttpRequest::new().map_err(|e| request_error("create XMLHttpRequest", e))?;
        xhr.open_with_async("POST", url, true)
            .map_err(|e| request_error("open request", e))?;
        xhr.set_timeout(self.timeout.as_millis().min(u32::MAX as u128) as u32);

        let upload = xhr.upload().map_err(|e| request_error("access upload", e))?;
        let onprogress = Closure::wrap(Box::new(move |event: ProgressEvent| {
            if event.length_computable() {
                on_progress(event.loaded() as u64, event.total() as u64);
            }
        }) as Box<dyn FnMut(ProgressEvent)>);
        upload.set_onprogress(Some(onprogress.as_ref().unchecked_ref()));

        let settled = settle(&xhr);
        xhr.send_with_opt_form_data(Some(&form_data))
            .map_err(|e| TransportError::Network(format!("{:?}", e)))?;
        let outcome = JsFuture::from(settled).await;

        // Detach before the closure is dropped
        upload.set_onprogress(None);
        drop(onprogress);

        if let Err(reason) = outcome {
            return Err(classify_rejection(&event_type(&reason), self.timeout));
        }

        let status = xhr
            .status()
            .map_err(|e| TransportError::Network(format!("{:?}", e)))?;
        let text = xhr
            .response_text()
            .map_err(|e| TransportError::MalformedResponse(format!("{:?}", e)))?
            .unwrap_or_default();

        if !is_success_status(status) {
            return Err(TransportError::Status { status, body: text });
        }

        Ok(TransportResponse {
            status,
            body: parse_body(&text)?,
        })
    }
}

/// Promise resolving on `load`, rejecting with the event on `error`,
/// `timeout` or `abort`.
fn settle(xhr: &XmlHttpRequest) -> Promise {
    Promise::new(&mut |resolve, reject| {
        xhr.set_onload(Some(&resolve));
        xhr.set_onerror(Some(&reject));
        xhr.set_ontimeout(Some(&reject));
        xhr.set_onabort(Some(&reject));
    })
}

fn event_type(value: &JsValue) -> String {
    value
        .dyn_ref::<Event>()
        .map(|event| event.type_())
        .unwrap_or_else(|| "error".to_string())
}

/// Map the XHR event that rejected the request to a transport error.
pub fn classify_rejection(event_type: &str, timeout: Duration) -> TransportError {
    match event_type {
        "timeout" => TransportError::Timeout(timeout),
        "abort" => TransportError::Network("request aborted".to_string()),
        _ => TransportError::Network("request failed".to_string()),
    }
}

fn request_error(step: &str, err: JsValue) -> TransportError {
    TransportError::Request(format!("Failed to {}: {:?}", step, err))
}

/// Submit the session's current selection in the background.
///
/// Outcomes land in the session; this only logs what the user does not see.
pub fn spawn_upload(session: SessionSignal) {
    spawn_local(async move {
        let transport = XhrTransport::new(upload_timeout());
        let config = upload_config();

        match submit(&session, &transport, &config).await {
            Ok(response) => log::info!("✅ Upload finished ({})", response.status),
            Err(UploadError::ValidationBlocked) => {
                log::warn!("⚠️ Submit ignored: required files are missing")
            }
            Err(UploadError::Superseded) => log::info!("Upload superseded"),
            Err(UploadError::TransportFailed(cause)) => log::debug!("Upload failed: {}", cause),
        }
    });
}
