use serde::{Deserialize, Serialize};

/// Project used when a request leaves the project field empty.
pub const DEFAULT_PROJECT_NAME: &str = "default";

/// A namespace for feature sets.
///
/// Projects are created implicitly on the first write that names them and are
/// never deleted. An archived project rejects writes but stays readable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub archived: bool,
}

impl Project {
    /// Creates an active project.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            archived: false,
        }
    }

    /// Creates an archived project.
    pub fn archived(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            archived: true,
        }
    }
}
