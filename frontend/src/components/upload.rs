//! Upload forms for the two modes.
//!
//! Both forms only pick files and trigger the upload; the session owns the
//! selection, the preview and the outcome.

use imgupload::{UploadMode, COLLECTION_ACCEPT, IMAGE_ACCEPT};
use leptos::*;
use web_sys::File;

use crate::components::FilePicker;
use crate::config::{COLLECTION_PREVIEW_MAX_HEIGHT, SINGLE_PREVIEW_MAX_HEIGHT};
use crate::services::spawn_upload;
use crate::types::SessionSignal;

/// Preview of the selected image, if any.
#[component]
fn ImagePreview(session: SessionSignal, alt: &'static str, max_height: &'static str) -> impl IntoView {
    let preview = session.image_preview();

    move || {
        preview.get().map(|src| {
            view! {
                <div class="mb-3 text-center">
                    <img
                        src=src
                        alt=alt
                        class="img-fluid rounded"
                        style=format!("max-height: {}", max_height)
                    />
                </div>
            }
        })
    }
}

/// Submit button, disabled until the mode's files are present.
#[component]
fn SubmitButton(session: SessionSignal, mode: UploadMode, class: &'static str) -> impl IntoView {
    let submittable = session.submittable();
    let submitting = session.is_submitting();

    let on_submit = move |_| {
        if submittable.get_untracked() {
            spawn_upload(session);
        }
    };

    view! {
        <button
            class=class
            disabled=move || !submittable.get()
            on:click=on_submit
        >
            <span class="me-2">"⬆️"</span>
            {move || {
                if submitting.get() {
                    "Uploading..."
                } else {
                    mode.action_label()
                }
            }}
        </button>
    }
}

#[component]
pub fn SingleImageUpload(session: SessionSignal) -> impl IntoView {
    let on_image = move |file: File| session.choose_image(file);

    view! {
        <div>
            <FilePicker id="imageUpload" label="Select Image" accept=IMAGE_ACCEPT on_file=on_image/>
            <ImagePreview session=session alt="Preview" max_height=SINGLE_PREVIEW_MAX_HEIGHT/>
            <SubmitButton
                session=session
                mode=UploadMode::SingleImage
                class="btn btn-primary w-100"
            />
        </div>
    }
}

#[component]
pub fn ImageCollectionUpload(session: SessionSignal) -> impl IntoView {
    let on_image = move |file: File| session.choose_image(file);
    let on_collection = move |file: File| session.choose_collection(file);
    let collection = session.collection_label();

    view! {
        <div>
            <FilePicker id="imageUpload" label="Select Image" accept=IMAGE_ACCEPT on_file=on_image/>
            <ImagePreview
                session=session
                alt="Image Preview"
                max_height=COLLECTION_PREVIEW_MAX_HEIGHT
            />
            <FilePicker
                id="collectionUpload"
                label="Select Collection"
                accept=COLLECTION_ACCEPT
                on_file=on_collection
            />
            {move || {
                collection.get().map(|name| {
                    view! {
                        <div class="mb-3">
                            <div class="alert alert-info">"Selected collection: " {name}</div>
                        </div>
                    }
                })
            }}
            <SubmitButton
                session=session
                mode=UploadMode::ImageWithCollection
                class="btn btn-success w-100"
            />
        </div>
    }
}
