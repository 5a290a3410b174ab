//! Learning roadmap payloads.
//!
//! Roadmaps come back from the generator as loosely shaped JSON. They are
//! parsed here into strict types: the roadmap skeleton (title, steps) must
//! be well formed or the whole payload is rejected, while individual
//! resources that fail validation are quarantined as
//! [`Resource::Unknown`] instead of leaking untyped JSON further in.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Upper bound on steps accepted from a single generation.
pub const MAX_ROADMAP_STEPS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resource {
    Link { title: String, url: String },
    Video { title: String, url: String },
    Document { title: String, url: Option<String> },
    Unknown { raw: Value },
}

impl Resource {
    /// Classify one generator-supplied resource.
    ///
    /// Accepts `type` or `kind` as the discriminator. Links and videos need
    /// an `http(s)` url; documents only need a title.
    pub fn from_value(raw: Value) -> Self {
        let field = |name: &str| {
            raw.get(name)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let kind = field("type").or_else(|| field("kind")).map(|k| k.to_lowercase());
        let title = field("title").or_else(|| field("name"));
        let url = field("url").filter(|u| u.starts_with("https://") || u.starts_with("http://"));

        match (kind.as_deref(), title, url) {
            (Some("link" | "article" | "website" | "tutorial"), Some(title), Some(url)) => {
                Self::Link { title, url }
            }
            (Some("video" | "course"), Some(title), Some(url)) => Self::Video { title, url },
            (Some("document" | "book" | "documentation" | "pdf"), Some(title), url) => {
                Self::Document { title, url }
            }
            _ => Self::Unknown { raw },
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub title: String,
    pub description: String,
    pub duration_weeks: Option<u32>,
    pub resources: Vec<Resource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    pub title: String,
    pub steps: Vec<RoadmapStep>,
}

#[derive(Debug, Deserialize)]
struct RawStep {
    title: String,
    description: String,
    #[serde(default)]
    duration_weeks: Option<u32>,
    #[serde(default)]
    resources: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawRoadmap {
    title: String,
    steps: Vec<RawStep>,
}

/// Parse and validate a generated roadmap.
pub fn parse_roadmap(value: Value) -> Result<Roadmap, CoreError> {
    let raw: RawRoadmap = serde_json::from_value(value)
        .map_err(|e| CoreError::Validation(format!("Malformed roadmap: {e}")))?;

    if raw.title.trim().is_empty() {
        return Err(CoreError::Validation("Roadmap title is empty".into()));
    }
    if raw.steps.is_empty() {
        return Err(CoreError::Validation("Roadmap has no steps".into()));
    }
    if raw.steps.len() > MAX_ROADMAP_STEPS {
        return Err(CoreError::Validation(format!(
            "Roadmap has {} steps, at most {MAX_ROADMAP_STEPS} allowed",
            raw.steps.len()
        )));
    }

    let steps = raw
        .steps
        .into_iter()
        .map(|s| RoadmapStep {
            title: s.title,
            description: s.description,
            duration_weeks: s.duration_weeks,
            resources: s.resources.into_iter().map(Resource::from_value).collect(),
        })
        .collect();

    Ok(Roadmap {
        title: raw.title,
        steps,
    })
}
