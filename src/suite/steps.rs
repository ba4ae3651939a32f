//! The seven steps of the story suite.
//!
//! Each step sends one request and checks it. Steps that need the created
//! story id read it from the [`SuiteContext`]; only `create` writes it and
//! only `delete` clears it.

use reqwest::StatusCode;
use tracing::{info, warn};

use super::{Step, SuiteContext};
use crate::assertions::{expect_body_contains, expect_non_empty_array, expect_status};
use crate::client::ApiClient;
use crate::error::StepError;
use crate::models::constants::{markers, NONEXISTENT_STORY_ID};
use crate::models::{CreateStoryResponse, StoryDto};

/// Step table, executed in array order.
pub const STEPS: &[Step] = &[
    Step {
        order: 1,
        name: "create",
        description: "Create a story and capture its id",
        run: create_story,
    },
    Step {
        order: 2,
        name: "edit",
        description: "Edit the created story",
        run: edit_story,
    },
    Step {
        order: 3,
        name: "list",
        description: "List all stories",
        run: list_stories,
    },
    Step {
        order: 4,
        name: "delete",
        description: "Delete the created story",
        run: delete_story,
    },
    Step {
        order: 5,
        name: "create-invalid",
        description: "Reject a story with an empty title",
        run: create_invalid_story,
    },
    Step {
        order: 6,
        name: "edit-missing",
        description: "Edit a story that does not exist",
        run: edit_missing_story,
    },
    Step {
        order: 7,
        name: "delete-missing",
        description: "Delete a story that does not exist",
        run: delete_missing_story,
    },
];

pub fn create_story(client: &ApiClient, ctx: &mut SuiteContext) -> Result<(), StepError> {
    let response = client.create_story(&StoryDto::sample())?;

    expect_status(&response, StatusCode::CREATED)?;
    expect_body_contains(&response, markers::STORY_ID_KEY)?;
    expect_body_contains(&response, markers::CREATED)?;

    let created: CreateStoryResponse = response.json("create response")?;
    let story_id = created.story_id_or_empty();
    if story_id.is_empty() {
        warn!("create response has no storyId value; later steps will use an empty id");
    } else {
        info!(story_id = %story_id, "story created");
    }
    ctx.record_story_id(story_id);
    Ok(())
}

pub fn edit_story(client: &ApiClient, ctx: &mut SuiteContext) -> Result<(), StepError> {
    let response = client.edit_story(ctx.story_id(), &StoryDto::sample_update())?;

    expect_status(&response, StatusCode::OK)?;
    expect_body_contains(&response, markers::EDITED)?;
    Ok(())
}

pub fn list_stories(client: &ApiClient, _ctx: &mut SuiteContext) -> Result<(), StepError> {
    let response = client.list_stories()?;

    expect_status(&response, StatusCode::OK)?;
    let stories = expect_non_empty_array(&response)?;
    info!(count = stories.len(), "stories listed");
    Ok(())
}

pub fn delete_story(client: &ApiClient, ctx: &mut SuiteContext) -> Result<(), StepError> {
    let response = client.delete_story(ctx.story_id())?;

    expect_status(&response, StatusCode::OK)?;
    expect_body_contains(&response, markers::DELETED)?;

    if let Some(story_id) = ctx.take_story_id() {
        info!(story_id = %story_id, "story deleted");
    }
    Ok(())
}

pub fn create_invalid_story(client: &ApiClient, _ctx: &mut SuiteContext) -> Result<(), StepError> {
    let response = client.create_story(&StoryDto::untitled())?;

    expect_status(&response, StatusCode::BAD_REQUEST)?;
    Ok(())
}

pub fn edit_missing_story(client: &ApiClient, _ctx: &mut SuiteContext) -> Result<(), StepError> {
    let response = client.edit_story(NONEXISTENT_STORY_ID, &StoryDto::nonexistent())?;

    expect_status(&response, StatusCode::NOT_FOUND)?;
    expect_body_contains(&response, markers::NO_SPOILERS)?;
    Ok(())
}

// The service answers 400 here but 404 for the matching edit.
pub fn delete_missing_story(client: &ApiClient, _ctx: &mut SuiteContext) -> Result<(), StepError> {
    let response = client.delete_story(NONEXISTENT_STORY_ID)?;

    expect_status(&response, StatusCode::BAD_REQUEST)?;
    expect_body_contains(&response, markers::UNABLE_TO_DELETE)?;
    Ok(())
}
