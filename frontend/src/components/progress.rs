use leptos::*;
use video_analyzer::ViewState;

#[component]
pub fn LoadingIndicator(state: ReadSignal<ViewState>) -> impl IntoView {
    view! {
        <div class="loading" id="loading">
            <div class="spinner"></div>
            <div class="progress" id="progress">
                {move || state.with(|s| s.progress_label().unwrap_or_default())}
            </div>
            <div class="activity">
                {move || state.with(|s| s.activity.clone().unwrap_or_default())}
            </div>
        </div>
    }
}
