//! Typed REST client for the DraftDeck API.

use draftdeck_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ClientError;

/// A project as serialized by the server (sections included).
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    #[serde(rename = "docType")]
    pub doc_type: String,
    pub topic: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// A section as serialized by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub content: String,
    pub draft: bool,
    pub order_index: i32,
    pub liked: Option<bool>,
}

/// A comment as serialized by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    pub id: DbId,
    pub section_id: DbId,
    pub author_id: Option<DbId>,
    pub text: String,
}

/// The authenticated user.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
}

/// Payload for creating a project.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub title: String,
    pub doc_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaffold: Option<String>,
}

/// Result of a refine call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineOutcome {
    pub text: String,
    pub revision_id: DbId,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    user: User,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// Thin typed wrapper over the REST surface. Holds the bearer token after
/// login and attaches it to every request.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the given base URL (e.g. `http://localhost:3000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Sign up a new account.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<User, ClientError> {
        let response = self
            .http
            .post(self.url("/api/auth/signup"))
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Log in and retain the bearer token for subsequent calls.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, ClientError> {
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let body: LoginResponse = Self::parse(response).await?;
        self.token = Some(body.token);
        Ok(body.user)
    }

    /// All projects owned by the caller.
    pub async fn get_projects(&self) -> Result<Vec<Project>, ClientError> {
        let response = self
            .http
            .get(self.url("/api/projects"))
            .bearer_auth(self.token()?)
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Create a project.
    pub async fn create_project(&self, payload: &NewProject) -> Result<Project, ClientError> {
        let response = self
            .http
            .post(self.url("/api/projects"))
            .bearer_auth(self.token()?)
            .json(payload)
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Delete a project.
    pub async fn delete_project(&self, project_id: DbId) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/api/projects/{project_id}")))
            .bearer_auth(self.token()?)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Save a section's title and/or content.
    pub async fn save_section(
        &self,
        project_id: DbId,
        section_id: DbId,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Section, ClientError> {
        let response = self
            .http
            .put(self.url(&format!(
                "/api/projects/{project_id}/sections/{section_id}"
            )))
            .bearer_auth(self.token()?)
            .json(&json!({ "title": title, "content": content }))
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Refine a section with a prompt (appends a revision server-side).
    pub async fn refine_section(
        &self,
        project_id: DbId,
        section_id: DbId,
        prompt: &str,
    ) -> Result<RefineOutcome, ClientError> {
        let response = self
            .http
            .post(self.url(&format!("/api/projects/{project_id}/refine")))
            .bearer_auth(self.token()?)
            .json(&json!({ "sectionId": section_id, "prompt": prompt }))
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Comment on a section.
    pub async fn add_comment(
        &self,
        project_id: DbId,
        section_id: DbId,
        text: &str,
    ) -> Result<Comment, ClientError> {
        let response = self
            .http
            .post(self.url(&format!("/api/projects/{project_id}/comment")))
            .bearer_auth(self.token()?)
            .json(&json!({ "sectionId": section_id, "comment": text }))
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Rewrite a project's section order.
    pub async fn reorder_sections(
        &self,
        project_id: DbId,
        section_ids: &[DbId],
    ) -> Result<Vec<Section>, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/api/projects/{project_id}/sections/reorder")))
            .bearer_auth(self.token()?)
            .json(&json!({ "sectionIds": section_ids }))
            .send()
            .await?;
        Self::parse(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn token(&self) -> Result<&str, ClientError> {
        self.token.as_deref().ok_or(ClientError::NotAuthenticated)
    }

    /// Map non-2xx responses to [`ClientError::Api`].
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<ApiErrorBody>()
            .await
            .map(|b| b.error)
            .unwrap_or_else(|_| status.to_string());
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::check(response).await?;
        Ok(response.json::<T>().await?)
    }
}
