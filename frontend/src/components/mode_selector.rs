//! Mode selection buttons.

use imgupload::UploadMode;
use leptos::*;

use crate::types::SessionSignal;

#[component]
pub fn ModeSelector(session: SessionSignal) -> impl IntoView {
    let choose = move |mode: UploadMode| {
        move |_: ev::MouseEvent| {
            log::info!("Mode selected: {:?}", mode);
            session.select_mode(mode);
        }
    };

    view! {
        <div class="row g-4">
            <div class="col-12 col-sm-6">
                <button
                    class="btn btn-outline-primary btn-lg w-100 py-4"
                    on:click=choose(UploadMode::SingleImage)
                >
                    <span class="mb-2 fs-2">"🖼️"</span>
                    <br/>
                    "Upload Image"
                </button>
            </div>
            <div class="col-12 col-sm-6">
                <button
                    class="btn btn-outline-success btn-lg w-100 py-4"
                    on:click=choose(UploadMode::ImageWithCollection)
                >
                    <span class="mb-2 fs-2">"🗂️"</span>
                    <br/>
                    "Upload Image and Collection"
                </button>
            </div>
        </div>
    }
}
