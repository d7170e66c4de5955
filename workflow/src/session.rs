//! Upload session state.
//!
//! [`UploadSession`] owns everything the workflow mutates: mode, selected
//! files (with their previews), progress and terminal status. Views read it
//! and change it only through the methods below.
//!
//! Every submission gets a [`SubmitTicket`]. Only the ticket of the latest
//! submission is live: starting a new submission or changing mode makes older
//! tickets stale, and their progress ticks and outcomes are dropped.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{TransportResult, UploadError, UploadResult};
use crate::form::{UploadForm, COLLECTION_FIELD, IMAGE_FIELD};
use crate::models::{Phase, Selection, UploadFile, UploadMode, UploadProgress, UploadStatus};
use crate::transport::TransportResponse;

/// Identifies one submission attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmitTicket(u64);

impl SubmitTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Everything a transport needs to run one submission.
#[derive(Debug)]
pub struct Submission<F> {
    pub ticket: SubmitTicket,
    pub mode: UploadMode,
    pub form: UploadForm<F>,
}

/// Upload workflow state.
///
/// `P` is the preview resource attached to the selected image; it is dropped
/// (and thereby released) whenever the image is replaced or the mode resets.
#[derive(Debug)]
pub struct UploadSession<F, P = ()> {
    mode: UploadMode,
    image: Option<Selection<F, P>>,
    collection: Option<Selection<F, P>>,
    progress: UploadProgress,
    status: Option<UploadStatus>,
    in_flight: Option<SubmitTicket>,
    next_ticket: u64,
}

impl<F: UploadFile, P> UploadSession<F, P> {
    pub fn new() -> Self {
        Self {
            mode: UploadMode::None,
            image: None,
            collection: None,
            progress: UploadProgress::ZERO,
            status: None,
            in_flight: None,
            next_ticket: 1,
        }
    }

    // -------------------------------------------------------------------------
    // Mode
    // -------------------------------------------------------------------------

    /// Enter `mode`, discarding files, progress and status.
    ///
    /// Applies even when `mode` is already active. Any submission in flight
    /// becomes stale.
    pub fn select_mode(&mut self, mode: UploadMode) {
        log::debug!("Switching upload mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.image = None;
        self.collection = None;
        self.progress = UploadProgress::ZERO;
        self.status = None;
        self.in_flight = None;
    }

    /// Back to the mode selector.
    pub fn reset(&mut self) {
        self.select_mode(UploadMode::None);
    }

    // -------------------------------------------------------------------------
    // File selection
    // -------------------------------------------------------------------------

    /// Replace the selected image. The previous preview is released.
    ///
    /// Ignored while no mode is selected; returns whether the file was taken.
    pub fn choose_image(&mut self, file: F, preview: Option<P>) -> bool {
        if self.mode == UploadMode::None {
            log::warn!("Ignoring image {}: no upload mode selected", file.name());
            return false;
        }
        log::debug!("Image selected: {} ({})", file.name(), file.mime_type());
        self.image = Some(match preview {
            Some(preview) => Selection::with_preview(file, preview),
            None => Selection::new(file),
        });
        true
    }

    /// Replace the selected collection.
    ///
    /// Ignored outside [`UploadMode::ImageWithCollection`]; returns whether
    /// the file was taken.
    pub fn choose_collection(&mut self, file: F) -> bool {
        if !self.mode.takes_collection() {
            log::warn!("Ignoring collection {} in mode {:?}", file.name(), self.mode);
            return false;
        }
        log::debug!("Collection selected: {}", file.name());
        self.collection = Some(Selection::new(file));
        true
    }

    // -------------------------------------------------------------------------
    // Submission
    // -------------------------------------------------------------------------

    /// Whether the current mode has all the files it needs.
    pub fn can_submit(&self) -> bool {
        match self.mode {
            UploadMode::None => false,
            UploadMode::SingleImage => self.image.is_some(),
            UploadMode::ImageWithCollection => self.image.is_some() && self.collection.is_some(),
        }
    }

    /// Start a submission from the files currently selected.
    ///
    /// Fails with [`UploadError::ValidationBlocked`] without touching any
    /// state when files are missing. Otherwise resets progress, clears the
    /// previous status and makes any earlier submission stale.
    pub fn begin_submit(&mut self) -> UploadResult<Submission<F>> {
        if !self.can_submit() {
            return Err(UploadError::ValidationBlocked);
        }

        let mut form = UploadForm::new();
        if let Some(image) = &self.image {
            form = form.part(IMAGE_FIELD, image.file().clone());
        }
        if self.mode.takes_collection() {
            if let Some(collection) = &self.collection {
                form = form.part(COLLECTION_FIELD, collection.file().clone());
            }
        }

        let ticket = SubmitTicket(self.next_ticket);
        self.next_ticket += 1;
        if let Some(previous) = self.in_flight.replace(ticket) {
            log::info!("Submission #{} superseded by #{}", previous.id(), ticket.id());
        }
        self.progress = UploadProgress::ZERO;
        self.status = None;

        Ok(Submission {
            ticket,
            mode: self.mode,
            form,
        })
    }

    /// Whether `ticket` belongs to the live submission.
    pub fn is_current(&self, ticket: SubmitTicket) -> bool {
        self.in_flight == Some(ticket)
    }

    /// Apply a transport progress tick.
    ///
    /// Progress never goes backwards within a submission. Ticks for stale
    /// tickets and ticks with an unknown total are ignored. Returns whether
    /// the displayed value changed.
    pub fn record_progress(&mut self, ticket: SubmitTicket, loaded: u64, total: u64) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        match UploadProgress::from_bytes(loaded, total) {
            Some(next) if next > self.progress => {
                self.progress = next;
                true
            }
            _ => false,
        }
    }

    /// Settle a submission.
    ///
    /// Returns the new status, or `None` when the ticket is stale and the
    /// outcome was dropped.
    pub fn finish(
        &mut self,
        ticket: SubmitTicket,
        outcome: &TransportResult<TransportResponse>,
    ) -> Option<UploadStatus> {
        if !self.is_current(ticket) {
            log::debug!("Dropping outcome of stale submission #{}", ticket.id());
            return None;
        }
        self.in_flight = None;

        let status = match outcome {
            Ok(_) => UploadStatus::Success(self.mode.success_message().to_string()),
            Err(_) => UploadStatus::Failure(self.mode.failure_message().to_string()),
        };
        self.status = Some(status.clone());
        Some(status)
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    pub fn mode(&self) -> UploadMode {
        self.mode
    }

    pub fn image(&self) -> Option<&Selection<F, P>> {
        self.image.as_ref()
    }

    pub fn collection(&self) -> Option<&Selection<F, P>> {
        self.collection.as_ref()
    }

    pub fn progress(&self) -> UploadProgress {
        self.progress
    }

    pub fn status(&self) -> Option<&UploadStatus> {
        self.status.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn phase(&self) -> Phase {
        if self.in_flight.is_some() {
            return Phase::Submitting;
        }
        match &self.status {
            Some(UploadStatus::Success(_)) => Phase::Succeeded,
            Some(UploadStatus::Failure(_)) => Phase::Failed,
            None if self.can_submit() => Phase::FilesSelected,
            None => Phase::Idle,
        }
    }
}

impl<F: UploadFile, P> Default for UploadSession<F, P> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Session access
// =============================================================================

/// Shared access to a session from async code and callbacks.
///
/// The browser wraps a reactive signal, the CLI and the tests an
/// `Rc<RefCell<_>>`. `None` means the session is gone (the view that owned it
/// was unmounted).
pub trait SessionHandle: Clone + 'static {
    type File: UploadFile;
    type Preview: 'static;

    fn update<R>(&self, f: impl FnOnce(&mut UploadSession<Self::File, Self::Preview>) -> R)
        -> Option<R>;

    fn with<R>(&self, f: impl FnOnce(&UploadSession<Self::File, Self::Preview>) -> R) -> Option<R>;
}

impl<F: UploadFile, P: 'static> SessionHandle for Rc<RefCell<UploadSession<F, P>>> {
    type File = F;
    type Preview = P;

    fn update<R>(&self, f: impl FnOnce(&mut UploadSession<F, P>) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }

    fn with<R>(&self, f: impl FnOnce(&UploadSession<F, P>) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use serde_json::json;
    use std::cell::Cell;

    #[derive(Clone, Debug, PartialEq)]
    struct Fake(&'static str);

    impl UploadFile for Fake {
        fn name(&self) -> String {
            self.0.to_string()
        }
        fn mime_type(&self) -> String {
            "image/png".to_string()
        }
        fn size(&self) -> u64 {
            100
        }
    }

    /// Counts releases through a shared counter.
    struct Preview(Rc<Cell<usize>>);

    impl Drop for Preview {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn ok() -> TransportResult<TransportResponse> {
        Ok(TransportResponse {
            status: 200,
            body: json!({"ok": true}),
        })
    }

    fn session_with_success() -> UploadSession<Fake, ()> {
        let mut session = UploadSession::new();
        session.select_mode(UploadMode::SingleImage);
        session.choose_image(Fake("a.png"), None);
        let submission = session.begin_submit().unwrap();
        session.record_progress(submission.ticket, 40, 100);
        session.finish(submission.ticket, &ok());
        session
    }

    #[test]
    fn test_select_mode_clears_everything() {
        for mode in [UploadMode::None, UploadMode::SingleImage, UploadMode::ImageWithCollection] {
            let mut session = session_with_success();
            assert!(session.status().is_some());

            session.select_mode(mode);

            assert_eq!(session.mode(), mode);
            assert!(session.image().is_none());
            assert!(session.collection().is_none());
            assert_eq!(session.progress(), UploadProgress::ZERO);
            assert!(session.status().is_none());
            assert_eq!(session.phase(), Phase::Idle);
        }
    }

    #[test]
    fn test_reselecting_same_mode_clears_files() {
        let mut session: UploadSession<Fake> = UploadSession::new();
        session.select_mode(UploadMode::ImageWithCollection);
        session.choose_image(Fake("a.png"), None);
        assert!(session.choose_collection(Fake("a.zip")));

        session.select_mode(UploadMode::ImageWithCollection);

        assert!(session.image().is_none());
        assert!(session.collection().is_none());
    }

    #[test]
    fn test_collection_rejected_outside_collection_mode() {
        let mut session: UploadSession<Fake> = UploadSession::new();
        session.select_mode(UploadMode::SingleImage);
        assert!(!session.choose_collection(Fake("a.zip")));
        assert!(session.collection().is_none());
    }

    #[test]
    fn test_image_rejected_without_mode() {
        let released = Rc::new(Cell::new(0));
        let mut session: UploadSession<Fake, Preview> = UploadSession::new();

        assert!(!session.choose_image(Fake("a.png"), Some(Preview(released.clone()))));
        assert!(session.image().is_none());
        assert_eq!(released.get(), 1);
        assert_eq!(session.phase(), Phase::Idle);

        session.select_mode(UploadMode::SingleImage);
        assert!(session.choose_image(Fake("a.png"), None));
        assert!(session.can_submit());
    }

    #[test]
    fn test_begin_submit_blocked_without_files() {
        let mut session: UploadSession<Fake> = UploadSession::new();
        assert_eq!(session.begin_submit().unwrap_err(), UploadError::ValidationBlocked);

        session.select_mode(UploadMode::SingleImage);
        assert_eq!(session.begin_submit().unwrap_err(), UploadError::ValidationBlocked);

        session.select_mode(UploadMode::ImageWithCollection);
        session.choose_image(Fake("a.png"), None);
        assert_eq!(session.begin_submit().unwrap_err(), UploadError::ValidationBlocked);
        assert!(session.status().is_none());
        assert!(!session.is_submitting());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_begin_submit_builds_form_for_mode() {
        let mut session: UploadSession<Fake> = UploadSession::new();
        session.select_mode(UploadMode::SingleImage);
        session.choose_image(Fake("a.png"), None);
        let single = session.begin_submit().unwrap();
        assert_eq!(single.form.field_names(), vec!["image"]);

        session.select_mode(UploadMode::ImageWithCollection);
        session.choose_image(Fake("b.png"), None);
        session.choose_collection(Fake("b.zip"));
        let both = session.begin_submit().unwrap();
        assert_eq!(both.form.field_names(), vec!["image", "collection"]);
        assert_eq!(both.form.get("collection"), Some(&Fake("b.zip")));
        assert_eq!(both.mode, UploadMode::ImageWithCollection);
    }

    #[test]
    fn test_progress_is_monotonic_within_submission() {
        let mut session: UploadSession<Fake> = UploadSession::new();
        session.select_mode(UploadMode::SingleImage);
        session.choose_image(Fake("a.png"), None);
        let ticket = session.begin_submit().unwrap().ticket;

        assert!(session.record_progress(ticket, 50, 100));
        assert!(!session.record_progress(ticket, 20, 100));
        assert_eq!(session.progress().percent(), 50);
        assert!(!session.record_progress(ticket, 70, 0));
        assert!(session.record_progress(ticket, 100, 100));
        assert_eq!(session.progress().percent(), 100);
    }

    #[test]
    fn test_new_submission_resets_progress_and_status() {
        let mut session = session_with_success();
        assert_eq!(session.phase(), Phase::Succeeded);

        let submission = session.begin_submit().unwrap();
        assert_eq!(session.progress(), UploadProgress::ZERO);
        assert!(session.status().is_none());
        assert_eq!(session.phase(), Phase::Submitting);

        let failed: TransportResult<TransportResponse> =
            Err(TransportError::Network("connection refused".into()));
        let status = session.finish(submission.ticket, &failed).unwrap();
        assert_eq!(status, UploadStatus::Failure("Error uploading image. Please try again.".into()));
        assert_eq!(session.phase(), Phase::Failed);
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut session: UploadSession<Fake> = UploadSession::new();
        session.select_mode(UploadMode::SingleImage);
        session.choose_image(Fake("a.png"), None);
        let first = session.begin_submit().unwrap().ticket;
        let second = session.begin_submit().unwrap().ticket;
        assert!(second > first);

        assert!(!session.record_progress(first, 90, 100));
        assert!(session.finish(first, &ok()).is_none());
        assert!(session.is_submitting());

        assert!(session.finish(second, &ok()).is_some());
        assert!(!session.is_submitting());
    }

    #[test]
    fn test_mode_change_makes_in_flight_stale() {
        let mut session: UploadSession<Fake> = UploadSession::new();
        session.select_mode(UploadMode::SingleImage);
        session.choose_image(Fake("a.png"), None);
        let ticket = session.begin_submit().unwrap().ticket;

        session.reset();

        assert!(session.finish(ticket, &ok()).is_none());
        assert!(session.status().is_none());
        assert_eq!(session.mode(), UploadMode::None);
    }

    #[test]
    fn test_previews_released_on_replace_and_reset() {
        let released = Rc::new(Cell::new(0));
        let mut session: UploadSession<Fake, Preview> = UploadSession::new();
        session.select_mode(UploadMode::SingleImage);

        session.choose_image(Fake("a.png"), Some(Preview(released.clone())));
        assert_eq!(released.get(), 0);

        session.choose_image(Fake("b.png"), Some(Preview(released.clone())));
        assert_eq!(released.get(), 1);
        assert!(session.image().unwrap().preview().is_some());

        session.select_mode(UploadMode::ImageWithCollection);
        assert_eq!(released.get(), 2);
    }

    #[test]
    fn test_phase_transitions() {
        let mut session: UploadSession<Fake> = UploadSession::new();
        assert_eq!(session.phase(), Phase::Idle);
        session.select_mode(UploadMode::SingleImage);
        assert_eq!(session.phase(), Phase::Idle);
        session.choose_image(Fake("a.png"), None);
        assert_eq!(session.phase(), Phase::FilesSelected);
        let ticket = session.begin_submit().unwrap().ticket;
        assert_eq!(session.phase(), Phase::Submitting);
        session.finish(ticket, &ok());
        assert_eq!(session.phase(), Phase::Succeeded);
    }
}
