pub mod constants;
pub mod responses;
pub mod story;

pub use responses::{CreateStoryResponse, LoginRequest, TokenResponse};
pub use story::StoryDto;
