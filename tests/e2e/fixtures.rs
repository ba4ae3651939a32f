//! In-process fake of the story API.
//!
//! One `wiremock` responder handles every `/api/` route and keeps stories in
//! memory, so create/edit/list/delete behave statefully like the real
//! service, including its 404-on-edit / 400-on-delete asymmetry.

use serde_json::{json, Value};
use spoiler_suite::SuiteConfig;
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;
use wiremock::matchers::path_regex;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const FAKE_USERNAME: &str = "suite-user";
pub const FAKE_PASSWORD: &str = "suite-pass";
pub const FAKE_TOKEN: &str = "fake-jwt-token";

/// Story present before any test runs, so listings are never empty.
pub const SEEDED_STORY_ID: &str = "seeded-story";

/// Knobs for service misbehavior.
#[derive(Debug, Clone, Default)]
pub struct FakeOptions {
    /// Login succeeds but the body has no `accessToken`.
    pub omit_token: bool,
    /// Create succeeds with `"storyId": null`.
    pub null_story_id: bool,
    /// Create succeeds with a numeric `storyId`.
    pub numeric_story_id: bool,
    /// Listing answers 200 with a non-JSON body.
    pub malformed_listing: bool,
    /// Start with no stories at all.
    pub empty: bool,
}

#[derive(Debug)]
pub struct FakeState {
    options: FakeOptions,
    stories: Vec<Value>,
    next_id: u32,
}

impl FakeState {
    fn new(options: FakeOptions) -> Self {
        let stories = if options.empty {
            Vec::new()
        } else {
            vec![json!({
                "id": SEEDED_STORY_ID,
                "title": "Seeded Story",
                "description": "Present before the suite starts.",
                "url": ""
            })]
        };
        Self {
            options,
            stories,
            next_id: 1,
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.stories.iter().position(|s| s["id"] == id)
    }
}

struct FakeStoryApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeStoryApi {
    fn login(&self, state: &FakeState, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        if body["username"] != FAKE_USERNAME || body["password"] != FAKE_PASSWORD {
            return ResponseTemplate::new(401)
                .set_body_json(json!({"message": "Invalid credentials"}));
        }
        if state.options.omit_token {
            return ResponseTemplate::new(200)
                .set_body_json(json!({"username": FAKE_USERNAME}));
        }
        ResponseTemplate::new(200).set_body_json(json!({"accessToken": FAKE_TOKEN}))
    }

    fn create(&self, state: &mut FakeState, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let title = body["title"].as_str().unwrap_or_default();
        if title.is_empty() {
            return ResponseTemplate::new(400).set_body_json(json!({
                "errors": {"Title": ["The Title field is required."]}
            }));
        }

        let id = format!("story-{}", state.next_id);
        state.next_id += 1;
        state.stories.push(json!({
            "id": id,
            "title": title,
            "description": body["description"],
            "url": body["url"]
        }));

        let story_id = if state.options.null_story_id {
            Value::Null
        } else if state.options.numeric_story_id {
            json!(state.next_id - 1)
        } else {
            Value::String(id)
        };
        ResponseTemplate::new(201)
            .set_body_json(json!({"storyId": story_id, "message": "Successfully created!"}))
    }

    fn edit(&self, state: &mut FakeState, id: &str, request: &Request) -> ResponseTemplate {
        let Some(index) = state.position(id) else {
            return ResponseTemplate::new(404)
                .set_body_json(json!({"message": "No spoilers..."}));
        };
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let story = &mut state.stories[index];
        story["title"] = body["title"].clone();
        story["description"] = body["description"].clone();
        story["url"] = body["url"].clone();
        ResponseTemplate::new(200).set_body_json(json!({"message": "Successfully edited"}))
    }

    fn list(&self, state: &FakeState) -> ResponseTemplate {
        if state.options.malformed_listing {
            return ResponseTemplate::new(200).set_body_string("<html>maintenance</html>");
        }
        ResponseTemplate::new(200).set_body_json(Value::Array(state.stories.clone()))
    }

    fn delete(&self, state: &mut FakeState, id: &str) -> ResponseTemplate {
        match state.position(id) {
            Some(index) => {
                state.stories.remove(index);
                ResponseTemplate::new(200)
                    .set_body_json(json!({"message": "Deleted successfully!"}))
            }
            None => ResponseTemplate::new(400)
                .set_body_json(json!({"message": "Unable to delete this story spoiler!"})),
        }
    }
}

impl Respond for FakeStoryApi {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut state = self.state.lock().unwrap();
        let method = request.method.as_str();
        let path = request.url.path();

        if method == "POST" && path == "/api/User/Authentication" {
            return self.login(&state, request);
        }

        let authorized = request
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == format!("Bearer {FAKE_TOKEN}"));
        if !authorized {
            return ResponseTemplate::new(401);
        }

        match (method, path) {
            ("POST", "/api/Story/Create") => self.create(&mut state, request),
            ("GET", "/api/Story/All") => self.list(&state),
            ("PUT", p) if p.starts_with("/api/Story/Edit/") => {
                let id = p.trim_start_matches("/api/Story/Edit/").to_string();
                self.edit(&mut state, &id, request)
            }
            ("DELETE", p) if p.starts_with("/api/Story/Delete/") => {
                let id = p.trim_start_matches("/api/Story/Delete/").to_string();
                self.delete(&mut state, &id)
            }
            _ => ResponseTemplate::new(404),
        }
    }
}

/// A running fake service.
///
/// `wiremock` is async; the server is started on a private runtime and then
/// serves from its own thread, so tests drive it with the blocking client.
pub struct FakeServer {
    server: MockServer,
    state: Arc<Mutex<FakeState>>,
    _runtime: Runtime,
}

impl FakeServer {
    pub fn start() -> Self {
        Self::start_with(FakeOptions::default())
    }

    pub fn start_with(options: FakeOptions) -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to build tokio runtime");
        let server = runtime.block_on(MockServer::start());
        let state = Arc::new(Mutex::new(FakeState::new(options)));

        runtime.block_on(
            Mock::given(path_regex("^/api/"))
                .respond_with(FakeStoryApi {
                    state: Arc::clone(&state),
                })
                .mount(&server),
        );

        Self {
            server,
            state,
            _runtime: runtime,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Suite config pointed at this server with valid credentials.
    pub fn config(&self) -> SuiteConfig {
        SuiteConfig {
            base_url: self.uri(),
            username: FAKE_USERNAME.to_string(),
            password: FAKE_PASSWORD.to_string(),
            ..SuiteConfig::default()
        }
    }

    pub fn story_ids(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .stories
            .iter()
            .filter_map(|s| s["id"].as_str().map(str::to_string))
            .collect()
    }

    pub fn story(&self, id: &str) -> Option<Value> {
        let state = self.state.lock().unwrap();
        state.position(id).map(|i| state.stories[i].clone())
    }
}
