//! Image Upload - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for uploading a single image, or an image together
//! with an archive collection, to the upload backend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  UploadHeader                                                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ModeSelector | SingleImageUpload | ImageCollectionUpload    │
//! │  ProgressSection (when progress > 0)                         │
//! │  StatusBanner (after a submission settles)                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  BackFooter                                                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! All views share one [`SessionSignal`]; the workflow itself lives in the
//! `imgupload` crate.
//!
//! # Modules
//!
//! - [`types`] - `BrowserFile`, `SessionSignal`
//! - [`components`] - UI components
//! - [`services`] - XHR transport and object-URL previews

use imgupload::UploadMode;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::*;

pub use types::{AppSession, BrowserFile, SessionSignal};

pub use components::*;

pub use services::*;

// =============================================================================
// Application
// =============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    // Session state for the whole page
    let session = SessionSignal::new();

    // Re-render the body only when the mode changes, not on every tick
    let mode = create_memo(move |_| session.mode());

    view! {
        <div class="container-fluid bg-dark min-vh-100 d-flex flex-column">
            <div class="row justify-content-center my-auto">
                <div class="col-12 col-md-8 col-lg-6">
                    <div class="card shadow-lg">
                        <UploadHeader/>
                        <div class="card-body p-4">
                            {move || match mode.get() {
                                UploadMode::None => view! { <ModeSelector session=session/> }.into_view(),
                                UploadMode::SingleImage => {
                                    view! { <SingleImageUpload session=session/> }.into_view()
                                }
                                UploadMode::ImageWithCollection => {
                                    view! { <ImageCollectionUpload session=session/> }.into_view()
                                }
                            }}
                            <ProgressSection session=session/>
                            <StatusBanner session=session/>
                        </div>
                        <BackFooter session=session/>
                    </div>
                </div>
            </div>
        </div>
    }
}
