//! Submission driver.
//!
//! [`submit`] runs one submission end to end: it starts the submission on the
//! session, hands the form to the transport, forwards progress ticks and
//! records the terminal status. The session decides what is stale; the driver
//! only reports what happened.

use std::rc::Rc;

use crate::config::UploadConfig;
use crate::error::{UploadError, UploadResult};
use crate::models::UploadMode;
use crate::session::SessionHandle;
use crate::transport::{ProgressFn, Transport, TransportResponse};

/// Submit the files currently selected in `session`.
///
/// - `Err(ValidationBlocked)` - required files missing, nothing was sent
/// - `Err(TransportFailed)` - the request failed; the session shows the failure banner
/// - `Err(Superseded)` - a newer submission or a mode change replaced this one
///
/// A second call before the first settles is allowed: the latest call owns the
/// session, the earlier one finishes as `Superseded`.
pub async fn submit<H, T>(
    session: &H,
    transport: &T,
    config: &UploadConfig,
) -> UploadResult<TransportResponse>
where
    H: SessionHandle,
    T: Transport<H::File>,
{
    let submission = session
        .update(|s| s.begin_submit())
        .ok_or(UploadError::Superseded)??;

    let ticket = submission.ticket;
    let mode = submission.mode;
    let url = config.url_for(mode).ok_or(UploadError::ValidationBlocked)?;

    log::info!(
        "Submission #{} -> POST {} ({} bytes, fields: {:?})",
        ticket.id(),
        url,
        submission.form.total_size(),
        submission.form.field_names()
    );

    let progress_session = session.clone();
    let on_progress: ProgressFn = Rc::new(move |loaded: u64, total: u64| {
        progress_session.update(|s| s.record_progress(ticket, loaded, total));
    });

    let outcome = transport.send(&url, submission.form, on_progress).await;

    match &outcome {
        Ok(response) => log::debug!("API response: {}", response.body),
        Err(e) => log::error!("{} ({})", failure_context(mode), e),
    }

    match session.update(|s| s.finish(ticket, &outcome)).flatten() {
        Some(_) => outcome.map_err(UploadError::from),
        None => Err(UploadError::Superseded),
    }
}

fn failure_context(mode: UploadMode) -> &'static str {
    match mode {
        UploadMode::ImageWithCollection => "Error uploading image and collection",
        _ => "Error uploading image",
    }
}
