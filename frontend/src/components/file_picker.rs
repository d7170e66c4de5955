//! Labelled file input.

use leptos::*;
use web_sys::{Event, File, HtmlInputElement};

/// `<input type="file">` reporting the first picked file.
///
/// Cancelling the dialog reports nothing, so the previous selection stays.
#[component]
pub fn FilePicker(
    /// Input id, also used by the label
    id: &'static str,
    /// Label text
    label: &'static str,
    /// Advisory accept filter
    accept: &'static str,
    /// Called with the chosen file
    #[prop(into)]
    on_file: Callback<File>,
) -> impl IntoView {
    let on_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            on_file.call(file);
        }
    };

    view! {
        <div class="mb-3">
            <label for=id class="form-label">{label}</label>
            <input
                type="file"
                id=id
                accept=accept
                class="form-control"
                on:change=on_change
            />
        </div>
    }
}
