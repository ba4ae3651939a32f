use serde::{Deserialize, Serialize};

/// Request body for creating or editing a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryDto {
    pub title: String,
    pub description: String,
    /// Optional on the service side; sent as an empty string when unused.
    #[serde(default)]
    pub url: String,
}

impl StoryDto {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: String::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Story created by the first step of the suite.
    pub fn sample() -> Self {
        Self::new("Test Story", "This is a test story.")
    }

    /// Replacement body sent by the edit step.
    pub fn sample_update() -> Self {
        Self::new("Updated Test Story", "This is an updated test story.")
    }

    /// Body the service must reject because the title is empty.
    pub fn untitled() -> Self {
        Self::new("", "This story has an invalid title.")
    }

    /// Body sent when editing an id that does not exist.
    pub fn nonexistent() -> Self {
        Self::new("Non-existent Story", "This story does not exist.")
    }
}
