//! Blocking HTTP wrapper for the story API.
//!
//! Every request is resolved against one base URL. Once a token is set, it is
//! attached as a bearer `Authorization` header to every request.

use reqwest::blocking::Client;
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::config::SuiteConfig;
use crate::error::SuiteError;
use crate::models::constants::{
    CREATE_STORY_PATH, DELETE_STORY_PATH, EDIT_STORY_PATH, LIST_STORIES_PATH,
};
use crate::models::StoryDto;

/// Longest body excerpt carried in error messages.
pub const BODY_EXCERPT_CHARS: usize = 200;

/// Create the underlying HTTP client.
///
/// Only the connect phase is bounded. The total request timeout is disabled,
/// so a server that accepts the connection and never answers blocks the run.
pub fn create_http_client(connect_timeout_secs: u64) -> Result<Client, SuiteError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .timeout(None::<Duration>)
        .user_agent(concat!("spoiler-suite/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(SuiteError::Client)
}

/// Status and body of a completed request.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self, what: &str) -> Result<T, SuiteError> {
        serde_json::from_str(&self.body).map_err(|source| SuiteError::Decode {
            what: what.to_string(),
            source,
        })
    }

    /// The body cut to [`BODY_EXCERPT_CHARS`] characters.
    pub fn excerpt(&self) -> String {
        let mut chars = self.body.chars();
        let head: String = chars.by_ref().take(BODY_EXCERPT_CHARS).collect();
        if chars.next().is_some() {
            format!("{head}...")
        } else {
            head
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Unauthenticated client; used for the login call.
    pub fn new(config: &SuiteConfig) -> Result<Self, SuiteError> {
        Ok(Self {
            http: create_http_client(config.connect_timeout_secs)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Same connection pool, with `token` attached to every later request.
    pub fn with_token(self, token: String) -> Self {
        Self {
            token: Some(token),
            ..self
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL of `prefix` with `story_id` appended as one percent-encoded path
    /// segment, so `/`, `?` or `#` in an id cannot change the route. An empty
    /// id leaves a trailing `/`.
    pub fn story_url(&self, prefix: &str, story_id: &str) -> Result<String, SuiteError> {
        let base = self.url(prefix);
        let invalid = |reason: String| SuiteError::InvalidUrl {
            url: base.clone(),
            reason,
        };
        let mut url = Url::parse(&base).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("URL cannot have path segments".to_string()))?
            .push(story_id);
        Ok(url.into())
    }

    pub fn get(&self, path: &str) -> Result<ApiResponse, SuiteError> {
        self.send::<()>(Method::GET, self.url(path), None)
    }

    pub fn delete(&self, path: &str) -> Result<ApiResponse, SuiteError> {
        self.send::<()>(Method::DELETE, self.url(path), None)
    }

    pub fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, SuiteError> {
        self.send(Method::POST, self.url(path), Some(body))
    }

    pub fn put_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, SuiteError> {
        self.send(Method::PUT, self.url(path), Some(body))
    }

    pub fn create_story(&self, story: &StoryDto) -> Result<ApiResponse, SuiteError> {
        self.post_json(CREATE_STORY_PATH, story)
    }

    pub fn edit_story(&self, story_id: &str, story: &StoryDto) -> Result<ApiResponse, SuiteError> {
        let url = self.story_url(EDIT_STORY_PATH, story_id)?;
        self.send(Method::PUT, url, Some(story))
    }

    pub fn list_stories(&self) -> Result<ApiResponse, SuiteError> {
        self.get(LIST_STORIES_PATH)
    }

    pub fn delete_story(&self, story_id: &str) -> Result<ApiResponse, SuiteError> {
        let url = self.story_url(DELETE_STORY_PATH, story_id)?;
        self.send::<()>(Method::DELETE, url, None)
    }

    fn send<T: Serialize + ?Sized>(
        &self,
        method: Method,
        url: String,
        body: Option<&T>,
    ) -> Result<ApiResponse, SuiteError> {
        let mut request = self.http.request(method.clone(), &url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let transport = |source| SuiteError::Transport {
            method: method.to_string(),
            url: url.clone(),
            source,
        };
        let response = request.send().map_err(transport)?;
        let status = response.status();
        let body = response.text().map_err(transport)?;

        debug!(%method, %url, status = status.as_u16(), "request completed");
        Ok(ApiResponse { status, body })
    }
}
