//! Record types shared by the API client and the dashboard controller.

use serde::{Deserialize, Serialize};

/// A tutorial record as stored by the backend. `id` is server-assigned and
/// immutable; the remaining fields are user-editable. List endpoints return a
/// full snapshot of these, never a partial merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tutorial {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub published: bool,
}

/// Unsaved copy of a tutorial's editable fields. The controller owns two of
/// these: the create buffer and the edit buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorialDraft {
    pub title: String,
    pub description: String,
    pub published: bool,
}

impl TutorialDraft {
    /// Edit buffer contents for an existing record.
    pub fn from_tutorial(tutorial: &Tutorial) -> Self {
        Self {
            title: tutorial.title.clone(),
            description: tutorial.description.clone(),
            published: tutorial.published,
        }
    }

    /// The payload actually sent to the backend: title and description
    /// trimmed, published passed through.
    pub fn trimmed(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            published: self.published,
        }
    }
}
