//! Progress bar and status banner.
//!
//! Purely reactive: both read the session and render nothing when there is
//! nothing to show.

use imgupload::{StatusKind, UploadProgress};
use leptos::*;

use crate::types::SessionSignal;

/// Inline width for the progress fill.
pub fn progress_style(progress: UploadProgress) -> String {
    format!("width: {}%;", progress.percent())
}

/// Alert classes for a status kind.
pub fn banner_class(kind: StatusKind) -> String {
    format!("alert alert-{} mt-3", kind.variant())
}

/// Shown once some bytes were sent.
#[component]
pub fn ProgressSection(session: SessionSignal) -> impl IntoView {
    let progress = create_memo(move |_| session.progress());

    view! {
        <Show when=move || progress.get().is_visible() fallback=|| view! {}>
            <div class="progress mt-3">
                <div
                    class="progress-bar progress-bar-striped progress-bar-animated"
                    role="progressbar"
                    style=move || progress_style(progress.get())
                    aria-valuenow=move || progress.get().percent().to_string()
                    aria-valuemin="0"
                    aria-valuemax="100"
                >
                    {move || progress.get().to_string()}
                </div>
            </div>
        </Show>
    }
}

/// Terminal status of the latest submission.
#[component]
pub fn StatusBanner(session: SessionSignal) -> impl IntoView {
    let status = create_memo(move |_| session.status());

    move || {
        status.get().map(|status| {
            view! {
                <div class=banner_class(status.kind()) role="alert">
                    {status.message().to_string()}
                </div>
            }
        })
    }
}
