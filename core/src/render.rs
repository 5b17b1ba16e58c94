//! Turns an [`AnalysisResult`] into the list shown in the results panel.
//!
//! [`render`] produces a host-neutral [`ResultsView`]: the browser maps it to
//! DOM nodes, the CLI prints it through its `Display` impl.

use serde::Serialize;
use std::fmt;

use crate::format::format_time;
use crate::types::AnalysisResult;

// =============================================================================
// Labels
// =============================================================================

pub const NO_SCENES_MESSAGE: &str = "シーンが検出されませんでした。";
pub const START_LABEL: &str = "開始時間";
pub const END_LABEL: &str = "終了時間";
pub const DESCRIPTION_LABEL: &str = "説明";
pub const SUGGESTION_LABEL: &str = "編集提案";

/// `検出されたシーン: N件`
pub fn scenes_header(count: usize) -> String {
    format!("検出されたシーン: {}件", count)
}

/// `シーン N`
pub fn scene_title(number: usize) -> String {
    format!("シーン {}", number)
}

// =============================================================================
// View Types
// =============================================================================

/// One rendered scene.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SceneEntry {
    /// 1-based position in the scene list.
    pub number: usize,
    pub start: String,
    pub end: String,
    pub description: Option<String>,
    pub suggestion: Option<String>,
}

impl SceneEntry {
    pub fn title(&self) -> String {
        scene_title(self.number)
    }
}

/// Content of the results panel.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultsView {
    /// The analysis found nothing.
    NoScenes,
    /// Scenes in the order the service returned them.
    Scenes { entries: Vec<SceneEntry> },
}

impl ResultsView {
    pub fn entries(&self) -> &[SceneEntry] {
        match self {
            ResultsView::NoScenes => &[],
            ResultsView::Scenes { entries } => entries,
        }
    }

    pub fn header(&self) -> Option<String> {
        match self {
            ResultsView::NoScenes => None,
            ResultsView::Scenes { entries } => Some(scenes_header(entries.len())),
        }
    }
}

/// Build the results panel content.
///
/// Scene order is kept as received. Each scene picks up the first
/// description and the first suggestion carrying its id.
pub fn render(result: &AnalysisResult) -> ResultsView {
    if result.scenes.is_empty() {
        return ResultsView::NoScenes;
    }

    let entries = result
        .scenes
        .iter()
        .enumerate()
        .map(|(index, scene)| SceneEntry {
            number: index + 1,
            start: format_time(scene.start_time),
            end: format_time(scene.end_time),
            description: result.description_for(&scene.scene_id).map(|d| d.text.clone()),
            suggestion: result.suggestion_for(&scene.scene_id).map(|s| s.text.clone()),
        })
        .collect();

    ResultsView::Scenes { entries }
}

impl fmt::Display for ResultsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = match self {
            ResultsView::NoScenes => return writeln!(f, "{}", NO_SCENES_MESSAGE),
            ResultsView::Scenes { entries } => entries,
        };

        writeln!(f, "{}", scenes_header(entries.len()))?;
        for entry in entries {
            writeln!(f)?;
            writeln!(f, "{}", entry.title())?;
            writeln!(f, "  {}: {}", START_LABEL, entry.start)?;
            writeln!(f, "  {}: {}", END_LABEL, entry.end)?;
            if let Some(ref text) = entry.description {
                writeln!(f, "  {}: {}", DESCRIPTION_LABEL, text)?;
            }
            if let Some(ref text) = entry.suggestion {
                writeln!(f, "  {}: {}", SUGGESTION_LABEL, text)?;
            }
        }
        Ok(())
    }
}
