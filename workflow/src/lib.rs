//! # imgupload - image and collection upload workflow
//!
//! Drives the upload of a single image, or of an image together with an
//! archive "collection", as one `multipart/form-data` POST, tracking upload
//! progress and a terminal success/failure status.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ select_mode  │────▶│ choose files │────▶│   submit()   │────▶│  Transport   │
//! │ (reset all)  │     │  + previews  │     │  (ticketed)  │     │ (multipart)  │
//! └──────────────┘     └──────────────┘     └──────┬───────┘     └──────┬───────┘
//!                                                  │  progress / outcome │
//!                                                  ◀─────────────────────┘
//! ```
//!
//! The same [`UploadSession`] backs the browser frontend (Leptos, WASM) and
//! the `imgupload` CLI.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::{cell::RefCell, rc::Rc};
//! use imgupload::{submit, HttpTransport, LocalFile, UploadConfig, UploadMode, UploadSession};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let config = UploadConfig::default();
//!     let session = Rc::new(RefCell::new(UploadSession::<LocalFile>::new()));
//!     session.borrow_mut().select_mode(UploadMode::SingleImage);
//!     session.borrow_mut().choose_image(LocalFile::open("cat.png").unwrap(), None);
//!
//!     let transport = HttpTransport::new(config.timeout());
//!     let _ = submit(&session, &transport, &config).await;
//!     println!("{:?}", session.borrow().status());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Transport, upload and config errors
//! - [`models`] - Mode, progress, status, phase, file abstraction
//! - [`form`] - Multipart payload model
//! - [`session`] - Upload session state and its operations
//! - [`transport`] - Transport trait
//! - [`controller`] - Async submission driver
//! - [`config`] - Endpoints and timeout
//! - [`accept`] - Advisory file-picker filters
//! - [`native`] - reqwest transport and on-disk files (feature `native`)

// Core
pub mod error;
pub mod models;
pub mod form;

// Workflow
pub mod session;
pub mod transport;
pub mod controller;

// Settings
pub mod config;
pub mod accept;

// Native collaborators
#[cfg(feature = "native")]
pub mod native;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{
    ConfigError,
    TransportError,
    TransportResult,
    UploadError,
    UploadResult,
};

pub use models::{
    Phase,
    Selection,
    StatusKind,
    UploadFile,
    UploadMode,
    UploadProgress,
    UploadStatus,
};

pub use form::{FormPart, UploadForm, COLLECTION_FIELD, IMAGE_FIELD};

pub use session::{SessionHandle, SubmitTicket, Submission, UploadSession};

pub use transport::{ProgressFn, Transport, TransportResponse};

pub use controller::submit;

pub use config::UploadConfig;

pub use accept::{guess_mime, matches_accept, COLLECTION_ACCEPT, IMAGE_ACCEPT};

#[cfg(feature = "native")]
pub use native::{HttpTransport, LocalFile};
