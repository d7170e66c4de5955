//! Footer component

use leptos::*;

use crate::types::SessionSignal;

/// "Back to Options": returns to the mode selector and clears the session.
#[component]
pub fn BackFooter(session: SessionSignal) -> impl IntoView {
    let on_back = move |_| {
        log::info!("↩️ Back to options");
        session.reset();
    };

    view! {
        <div class="card-footer text-center">
            <button class="btn btn-outline-secondary mt-2" on:click=on_back>
                "Back to Options"
            </button>
        </div>
    }
}
