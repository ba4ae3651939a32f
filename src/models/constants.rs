/// Login endpoint; the only request sent without a bearer token.
pub const AUTHENTICATION_PATH: &str = "/api/User/Authentication";

pub const CREATE_STORY_PATH: &str = "/api/Story/Create";

/// Prefix for edits; the story id is appended as one encoded path segment.
pub const EDIT_STORY_PATH: &str = "/api/Story/Edit";

pub const LIST_STORIES_PATH: &str = "/api/Story/All";

/// Prefix for deletes; the story id is appended as one encoded path segment.
pub const DELETE_STORY_PATH: &str = "/api/Story/Delete";

/// Id that is well-formed but never issued by the service.
pub const NONEXISTENT_STORY_ID: &str = "nonexistent-id";

/// Fragments the service puts in its response bodies.
pub mod markers {
    /// Key present in a successful create response.
    pub const STORY_ID_KEY: &str = "storyId";

    pub const CREATED: &str = "Successfully created!";

    pub const EDITED: &str = "Successfully edited";

    pub const DELETED: &str = "Deleted successfully!";

    /// Returned when editing a story that does not exist.
    pub const NO_SPOILERS: &str = "No spoilers...";

    /// Returned when deleting a story that does not exist.
    pub const UNABLE_TO_DELETE: &str = "Unable to delete this story spoiler!";
}
