use leptos::*;

use crate::APP_NAME;

/// Card header with the application title.
#[component]
pub fn UploadHeader() -> impl IntoView {
    view! {
        <div class="card-header bg-secondary text-white">
            <h1 class="text-center mb-0">
                <span class="me-2">"☁️"</span>
                {APP_NAME}
            </h1>
        </div>
    }
}
