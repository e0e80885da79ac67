use crate::core::error::ApiError;
use crate::models::auth::{LoginRequest, LoginResponse};
use crate::models::siswa::{Siswa, SiswaUpdate};
use crate::session::store::SessionStore;
use anyhow::{bail, Context, Result};
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Generic message used when the API gives no reason of its own
pub const GENERIC_FAILURE: &str = "Terjadi kesalahan";

/// API client for the remote Siswa backend
///
/// Every authenticated call goes through [`ApiClient::execute`], which turns
/// a 401 into [`ApiError::SessionExpired`] and clears the session so a stale
/// token never outlives the server's verdict.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration, session: Arc<SessionStore>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .context(format!("Invalid API base URL: {}", base_url))?;

        if base_url.cannot_be_a_base() {
            bail!("API base URL cannot be used as a base: {}", base_url);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Build `{base}/{segments...}`, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) if !token.is_empty() => builder.bearer_auth(token),
            _ => builder,
        }
    }

    /// Send an authenticated request and map the status uniformly
    async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = self.authorized(builder).send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!(url = %response.url(), "API rejected session token");
            if let Err(e) = self.session.clear() {
                warn!(error = %e, "Failed to clear expired session");
            }
            return Err(ApiError::SessionExpired);
        }

        if !status.is_success() {
            warn!(url = %response.url(), status = %status, "API returned error status");
            return Err(ApiError::Status(status));
        }

        Ok(response)
    }

    /// Exchange credentials for a bearer token.
    ///
    /// The login endpoint reports failures in its body, so the status code is
    /// not inspected here and a 401 does not touch the session.
    pub async fn login(&self, request: &LoginRequest) -> Result<String, ApiError> {
        let url = self.endpoint(&["auth", "login"]);
        debug!(url = %url, username = %request.username, "Sending login request");

        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();

        let body = response
            .json::<LoginResponse>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        match (body.success, body.token) {
            (true, Some(token)) if !token.is_empty() => {
                info!(username = %request.username, "Login accepted");
                Ok(token)
            }
            (true, _) => Err(ApiError::Decode("login response has no token".to_string())),
            (false, _) => {
                info!(username = %request.username, status = %status, "Login rejected");
                Err(ApiError::Rejected(
                    body.message.unwrap_or_else(|| GENERIC_FAILURE.to_string()),
                ))
            }
        }
    }

    /// `GET /siswa`
    pub async fn list_siswa(&self) -> Result<Vec<Siswa>, ApiError> {
        let url = self.endpoint(&["siswa"]);
        let response = self.execute(self.client.get(url)).await?;

        let records = response
            .json::<Vec<Siswa>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        debug!(count = records.len(), "Fetched siswa collection");
        Ok(records)
    }

    /// `GET /siswa/{id}`
    pub async fn get_siswa(&self, id: &str) -> Result<Siswa, ApiError> {
        let url = self.endpoint(&["siswa", id]);
        let response = self.execute(self.client.get(url)).await?;

        response
            .json::<Siswa>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// `PUT /siswa/{id}`
    pub async fn update_siswa(&self, id: &str, update: &SiswaUpdate) -> Result<(), ApiError> {
        let url = self.endpoint(&["siswa", id]);
        self.execute(self.client.put(url).json(update)).await?;

        info!(id = %id, "Siswa updated");
        Ok(())
    }

    /// `DELETE /siswa/{id}`
    pub async fn delete_siswa(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["siswa", id]);
        self.execute(self.client.delete(url)).await?;

        info!(id = %id, "Siswa deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Duration::from_secs(5), Arc::new(SessionStore::in_memory()))
            .unwrap()
    }

    #[test]
    fn test_api_client_creation() {
        assert!(ApiClient::new(
            "http://localhost:8000/api",
            Duration::from_secs(30),
            Arc::new(SessionStore::in_memory()),
        )
        .is_ok());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(ApiClient::new(
            "not a url",
            Duration::from_secs(30),
            Arc::new(SessionStore::in_memory()),
        )
        .is_err());
        assert!(ApiClient::new(
            "mailto:admin@example.com",
            Duration::from_secs(30),
            Arc::new(SessionStore::in_memory()),
        )
        .is_err());
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let api = client("http://localhost:8000/api");
        assert_eq!(
            api.endpoint(&["siswa", "abc"]).as_str(),
            "http://localhost:8000/api/siswa/abc"
        );

        let api = client("http://localhost:8000/api/");
        assert_eq!(
            api.endpoint(&["auth", "login"]).as_str(),
            "http://localhost:8000/api/auth/login"
        );
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let api = client("http://localhost:8000");
        assert_eq!(
            api.endpoint(&["siswa", "a/b c"]).as_str(),
            "http://localhost:8000/siswa/a%2Fb%20c"
        );
    }
}
