//! Analysis panel: loading indicator while working, results when done.

use leptos::*;
use video_analyzer::ViewState;

use super::{LoadingIndicator, ResultsList};

#[component]
pub fn AnalysisSection(
    state: ReadSignal<ViewState>,
    /// Back to the upload form
    on_reset: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="analysis-section" id="analysis-section">
            <Show
                when=move || state.with(|s| s.loading_visible())
                fallback=|| view! { }
            >
                <LoadingIndicator state=state/>
            </Show>

            <Show
                when=move || state.with(|s| s.results_visible())
                fallback=|| view! { }
            >
                <div class="results" id="results">
                    {move || state.with(|s| s.results.clone()).map(|results| view! {
                        <ResultsList results=results/>
                    })}
                </div>
                <button
                    class="btn btn-secondary"
                    id="reset-button"
                    on:click=move |_| on_reset.call(())
                >
                    "別の動画を分析する"
                </button>
            </Show>
        </div>
    }
}
