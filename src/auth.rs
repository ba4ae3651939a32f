use tracing::{info, warn};

use crate::client::ApiClient;
use crate::error::SuiteError;
use crate::models::constants::AUTHENTICATION_PATH;
use crate::models::{LoginRequest, TokenResponse};

/// Log in and return the bearer token.
///
/// `client` must be unauthenticated. A non-2xx status is an error. A 2xx
/// response without `accessToken` yields an empty token; the suite still runs
/// and every authenticated step then fails on its status check.
pub fn authenticate(
    client: &ApiClient,
    username: &str,
    password: &str,
) -> Result<String, SuiteError> {
    let response = client.post_json(AUTHENTICATION_PATH, &LoginRequest { username, password })?;

    if !response.status.is_success() {
        return Err(SuiteError::Authentication {
            status: response.status.as_u16(),
            body: response.excerpt(),
        });
    }

    let token = response
        .json::<TokenResponse>("authentication response")?
        .into_token();

    if token.is_empty() {
        warn!(
            username,
            "authentication response carried no accessToken, continuing with an empty token"
        );
    } else {
        info!(username, "authenticated");
    }
    Ok(token)
}

/// Authenticate and return a client that sends the token on every request.
pub fn authenticated_client(
    client: ApiClient,
    username: &str,
    password: &str,
) -> Result<ApiClient, SuiteError> {
    let token = authenticate(&client, username, password)?;
    Ok(client.with_token(token))
}
