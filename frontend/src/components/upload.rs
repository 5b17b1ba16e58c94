//! Video upload form.
//!
//! Hands the selected file to the controller, which handles validation,
//! upload and analysis.

use std::rc::Rc;

use leptos::*;
use video_analyzer::ViewState;

use crate::services::{Controller, SelectedVideo};

#[component]
pub fn UploadSection(
    state: ReadSignal<ViewState>,
    controller: Rc<Controller>,
) -> impl IntoView {
    let file_input = create_node_ref::<html::Input>();

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let file = file_input
            .get()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
            .map(SelectedVideo::new);

        let controller = controller.clone();
        spawn_local(async move {
            // The controller already published the error to the view
            if let Err(e) = controller.submit(file).await {
                log::warn!("❌ Submission failed: {}", e);
            }
        });
    };

    view! {
        <div class="upload-section" id="upload-section">
            <form id="upload-form" on:submit=on_submit>
                <div class="upload-icon">"🎬"</div>
                <div class="upload-text">"登山動画をアップロードしてください"</div>
                <div class="upload-hint">
                    "シーンを自動で検出し、説明文と編集提案を生成します"
                </div>

                <input
                    type="file"
                    id="video-file"
                    accept="video/*"
                    node_ref=file_input
                />

                <button
                    type="submit"
                    class="upload-button"
                    disabled=move || state.with(|s| s.is_working())
                >
                    "分析する"
                </button>
            </form>
        </div>
    }
}
