use leptos::*;
use video_analyzer::ViewState;

/// Inline error message with a dismiss button.
#[component]
pub fn ErrorBanner(state: ReadSignal<ViewState>, on_dismiss: Callback<()>) -> impl IntoView {
    view! {
        <Show
            when=move || state.with(|s| s.error.is_some())
            fallback=|| view! { }
        >
            <div class="error-message" role="alert">
                <span>{move || state.with(|s| s.error.clone().unwrap_or_default())}</span>
                <button class="error-dismiss" on:click=move |_| on_dismiss.call(())>
                    "×"
                </button>
            </div>
        </Show>
    }
}
