//! Rendered analysis: scene header and one card per scene.

use leptos::*;
use video_analyzer::render::{
    DESCRIPTION_LABEL, END_LABEL, NO_SCENES_MESSAGE, START_LABEL, SUGGESTION_LABEL,
};
use video_analyzer::{ResultsView, SceneEntry};

#[component]
pub fn ResultsList(results: ResultsView) -> impl IntoView {
    let header = results.header();
    match results {
        ResultsView::NoScenes => view! {
            <p class="no-scenes">{NO_SCENES_MESSAGE}</p>
        }
        .into_view(),

        ResultsView::Scenes { entries } => {
            view! {
                <div class="results-header">
                    <h3>{header}</h3>
                </div>
                <div class="scene-list">
                    {entries
                        .into_iter()
                        .map(|entry| view! { <SceneCard entry=entry/> })
                        .collect_view()}
                </div>
            }
            .into_view()
        }
    }
}

/// One scene with its times and optional texts.
#[component]
pub fn SceneCard(entry: SceneEntry) -> impl IntoView {
    let title = entry.title();

    view! {
        <div class="scene-item">
            <h4>{title}</h4>
            <p><strong>{START_LABEL} ":"</strong> " " {entry.start}</p>
            <p><strong>{END_LABEL} ":"</strong> " " {entry.end}</p>
            {entry.description.map(|text| view! {
                <p class="scene-description"><strong>{DESCRIPTION_LABEL} ":"</strong> " " {text}</p>
            })}
            {entry.suggestion.map(|text| view! {
                <p class="scene-suggestion"><strong>{SUGGESTION_LABEL} ":"</strong> " " {text}</p>
            })}
        </div>
    }
}
