//! Launch types returned by the launch API.
//!
//! Every field the API may omit is optional so partial payloads still
//! deserialize. Rendering decides what to show for a missing value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable launch identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaunchId(pub String);

impl LaunchId {
    /// Link to the detail view for this launch.
    pub fn detail_href(&self) -> String {
        format!("/?id={}", self.0)
    }
}

impl From<String> for LaunchId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LaunchId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for LaunchId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LaunchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payload/purpose of a launch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Mission {
    /// Create a mission with a name and description.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
        }
    }
}

/// Launch status, e.g. "Go for Launch".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaunchStatus {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A single row in a search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchSummary {
    /// Identifier used to link to the detail view.
    pub id: LaunchId,

    /// Display name.
    pub name: String,

    /// Mission, when the API knows one.
    #[serde(default)]
    pub mission: Option<Mission>,
}

impl LaunchSummary {
    /// Create a summary with required fields.
    pub fn new(id: impl Into<LaunchId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mission: None,
        }
    }

    /// Attach a mission.
    pub fn with_mission(mut self, mission: Mission) -> Self {
        self.mission = Some(mission);
        self
    }

    /// Mission name, if both the mission and its name are present.
    pub fn mission_name(&self) -> Option<&str> {
        self.mission.as_ref().and_then(|m| m.name.as_deref())
    }
}

/// Everything the detail view shows about one launch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaunchDetail {
    #[serde(default)]
    pub id: Option<LaunchId>,
    #[serde(default)]
    pub name: Option<String>,
    /// Start of the launch window (ISO 8601, as given by the API).
    #[serde(default)]
    pub window_start: Option<String>,
    /// End of the launch window.
    #[serde(default)]
    pub window_end: Option<String>,
    #[serde(default)]
    pub status: Option<LaunchStatus>,
    #[serde(default)]
    pub mission: Option<Mission>,
    /// Image URL.
    #[serde(default)]
    pub image: Option<String>,
}

impl LaunchDetail {
    pub fn status_name(&self) -> Option<&str> {
        self.status.as_ref().and_then(|s| s.name.as_deref())
    }

    pub fn status_description(&self) -> Option<&str> {
        self.status.as_ref().and_then(|s| s.description.as_deref())
    }

    pub fn mission_name(&self) -> Option<&str> {
        self.mission.as_ref().and_then(|m| m.name.as_deref())
    }

    pub fn mission_description(&self) -> Option<&str> {
        self.mission.as_ref().and_then(|m| m.description.as_deref())
    }
}
