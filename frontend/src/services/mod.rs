//! Browser services.
//!
//! # Services
//!
//! - [`upload`] - `XMLHttpRequest` transport with upload progress
//! - [`preview`] - object-URL previews released on drop

pub mod upload;
pub mod preview;

pub use upload::*;
pub use preview::*;
