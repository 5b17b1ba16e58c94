//! Wire types for the `/upload` and `/analyze` endpoints.
//!
//! # Categories
//!
//! - **Upload Types** - the filepath token returned by `/upload`
//! - **Analysis Types** - scenes and the texts attached to them
//!
//! Payloads are parsed and checked here, at the network boundary, so the
//! renderer never sees a malformed interval.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Upload Types
// =============================================================================

/// Response of `POST /upload`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    /// Server-side path of the stored video. Opaque to the client.
    pub filepath: String,
    /// Original file name, echoed back by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

// =============================================================================
// Analysis Types
// =============================================================================

/// Identifier linking a scene to its description and suggestion.
///
/// The analysis service sends integers (`1`, `2`, ...) while other producers
/// send strings; both normalize to the same textual id. Integral floats
/// (`1.0`) normalize like the integer they equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawSceneId")]
pub struct SceneId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSceneId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawSceneId> for SceneId {
    fn from(raw: RawSceneId) -> Self {
        match raw {
            RawSceneId::Text(s) => SceneId(s),
            RawSceneId::Number(n) => SceneId(number_id(&n)),
        }
    }
}

fn number_id(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        // Above 2^53 floats are no longer exact integers
        Some(f) if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

impl SceneId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SceneId {
    fn from(s: &str) -> Self {
        SceneId(s.to_string())
    }
}

impl From<u32> for SceneId {
    fn from(n: u32) -> Self {
        SceneId(n.to_string())
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A detected time interval, in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub scene_id: SceneId,
    pub start_time: f64,
    pub end_time: f64,
}

impl Scene {
    pub fn new(scene_id: impl Into<SceneId>, start_time: f64, end_time: f64) -> Self {
        Self { scene_id: scene_id.into(), start_time, end_time }
    }

    /// Check `0 <= start_time <= end_time` with both values finite.
    pub fn validate(&self) -> ClientResult<()> {
        let finite = self.start_time.is_finite() && self.end_time.is_finite();
        if !finite || self.start_time < 0.0 || self.end_time < 0.0 {
            return Err(ClientError::Decode(format!(
                "scene {} has an invalid time ({} - {})",
                self.scene_id, self.start_time, self.end_time
            )));
        }
        if self.start_time > self.end_time {
            return Err(ClientError::Decode(format!(
                "scene {} ends before it starts ({} > {})",
                self.scene_id, self.start_time, self.end_time
            )));
        }
        Ok(())
    }
}

/// Free text attached to one scene.
///
/// Descriptions and editing suggestions share this shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneNote {
    pub scene_id: SceneId,
    pub text: String,
}

impl SceneNote {
    pub fn new(scene_id: impl Into<SceneId>, text: impl Into<String>) -> Self {
        Self { scene_id: scene_id.into(), text: text.into() }
    }
}

/// Scene description produced by the analysis service.
pub type Description = SceneNote;

/// Editing advice produced by the analysis service.
pub type EditingSuggestion = SceneNote;

/// Response of `POST /analyze`.
///
/// Missing and `null` lists are read as empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub scenes: Vec<Scene>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub descriptions: Vec<Description>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub editing_suggestions: Vec<EditingSuggestion>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl AnalysisResult {
    /// Parse and validate an `/analyze` body.
    pub fn from_json(body: &str) -> ClientResult<Self> {
        let result: AnalysisResult = serde_json::from_str(body)?;
        result.validate()?;
        Ok(result)
    }

    /// Validate an already-parsed JSON value, as carried by a stream frame.
    pub fn from_value(value: serde_json::Value) -> ClientResult<Self> {
        let result: AnalysisResult = serde_json::from_value(value)?;
        result.validate()?;
        Ok(result)
    }

    pub fn validate(&self) -> ClientResult<()> {
        self.scenes.iter().try_for_each(Scene::validate)
    }

    /// First description whose id equals `id`.
    pub fn description_for(&self, id: &SceneId) -> Option<&Description> {
        self.descriptions.iter().find(|d| &d.scene_id == id)
    }

    /// First editing suggestion whose id equals `id`.
    pub fn suggestion_for(&self, id: &SceneId) -> Option<&EditingSuggestion> {
        self.editing_suggestions.iter().find(|s| &s.scene_id == id)
    }
}

impl UploadResult {
    /// Parse an `/upload` body.
    pub fn from_json(body: &str) -> ClientResult<Self> {
        Ok(serde_json::from_str(body)?)
    }
}
