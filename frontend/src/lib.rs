//! Mountain Video Analyzer - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for uploading hiking videos and browsing the
//! scenes detected by the analysis server.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                 │
//! │  ├── Hero (title, description)                              │
//! │  ├── ErrorBanner (when an error is set)                     │
//! │  ├── UploadSection (Idle)                                   │
//! │  └── AnalysisSection (Working / Done)                       │
//! │      ├── LoadingIndicator                                   │
//! │      └── ResultsList → SceneCard                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! All state lives in one `ViewState` signal fed by the controller from
//! `video_analyzer`.
//!
//! # Modules
//!
//! - [`config`] - Base URL and upload limit
//! - [`components`] - UI components
//! - [`services`] - `fetch` transport and signal wiring

use std::rc::Rc;

use leptos::*;
use leptos_router::*;

use video_analyzer::ViewState;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application
// =============================================================================

/// Root component, mounted by the `main.rs` binary that trunk builds.
#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    let (state, set_state) = create_signal(ViewState::default());

    let config = client_config();
    let controller = Rc::new(Controller::new(
        GlooAnalysisApi::new(&config),
        SignalSink(set_state),
        &config,
    ));

    let on_reset = {
        let controller = controller.clone();
        Callback::new(move |_: ()| controller.reset())
    };
    let on_dismiss = {
        let controller = controller.clone();
        Callback::new(move |_: ()| controller.dismiss_error())
    };

    view! {
        <div class="container">
            <Hero/>

            <ErrorBanner state=state on_dismiss=on_dismiss/>

            // Upload form only while idle
            <div style:display=move || panel_display(state.with(|s| s.upload_panel_visible()))>
                <UploadSection state=state controller=controller/>
            </div>

            // Loading indicator, then results
            <div style:display=move || panel_display(state.with(|s| s.analysis_panel_visible()))>
                <AnalysisSection state=state on_reset=on_reset/>
            </div>
        </div>

        <Footer/>
    }
}

/// CSS `display` value for a panel.
fn panel_display(visible: bool) -> &'static str {
    if visible {
        "block"
    } else {
        "none"
    }
}
