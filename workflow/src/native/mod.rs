//! Native (non-browser) collaborators.
//!
//! - [`LocalFile`] - a file on disk implementing [`crate::UploadFile`]
//! - [`HttpTransport`] - reqwest multipart transport with streamed progress

mod file;
mod http;

pub use file::*;
pub use http::*;
