//! Appwrite Users API client
//!
//! Uses the server-side Users endpoints of an Appwrite project:
//! - `GET /users?search=<email>` to resolve an account
//! - `PATCH /users/{id}/verification` to set email verification
//! - `PATCH /users/{id}/password` to replace the password

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error, info};

use rr_core::domain::entities::DirectoryUser;
use rr_core::services::lifecycle::UserDirectoryTrait;
use rr_shared::config::DirectoryConfig;
use rr_shared::utils::mask_email;

use crate::InfrastructureError;

/// Appwrite connection settings
#[derive(Debug, Clone)]
pub struct AppwriteConfig {
    /// API endpoint including `/v1`, without trailing slash
    pub endpoint: String,
    pub project_id: String,
    pub api_key: String,
    pub request_timeout_secs: u64,
}

impl From<&DirectoryConfig> for AppwriteConfig {
    fn from(config: &DirectoryConfig) -> Self {
        Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            api_key: config.api_key.clone(),
            request_timeout_secs: config.request_timeout_secs,
        }
    }
}

/// User document as returned by the Users API
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AppwriteUser {
    #[serde(rename = "$id")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "emailVerification", default)]
    pub email_verification: bool,
}

impl From<AppwriteUser> for DirectoryUser {
    fn from(user: AppwriteUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: Some(user.name).filter(|name| !name.is_empty()),
            email_verified: user.email_verification,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserList {
    #[serde(default)]
    pub users: Vec<AppwriteUser>,
}

#[derive(Debug, Default, Deserialize)]
struct AppwriteErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// Picks the account whose email matches exactly; search is fuzzy
pub(crate) fn exact_match(list: UserList, email: &str) -> Option<DirectoryUser> {
    list.users
        .into_iter()
        .find(|user| user.email == email)
        .map(DirectoryUser::from)
}

/// Appwrite-backed user directory
pub struct AppwriteUserDirectory {
    client: Client,
    config: AppwriteConfig,
}

impl AppwriteUserDirectory {
    pub fn new(config: AppwriteConfig) -> Result<Self, InfrastructureError> {
        if config.project_id.is_empty() || config.api_key.is_empty() {
            return Err(InfrastructureError::Config(
                "Appwrite project id and API key are required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            endpoint = %config.endpoint,
            project_id = %config.project_id,
            "Appwrite user directory initialized"
        );

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.endpoint, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("X-Appwrite-Project", &self.config.project_id)
            .header("X-Appwrite-Key", &self.config.api_key)
    }

    /// Turns a non-success response into a directory error
    async fn check(response: Response, action: &str) -> Result<Response, InfrastructureError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.json::<AppwriteErrorBody>().await.unwrap_or_default();
        let reason = format!(
            "Appwrite {} failed with {}: {}",
            action,
            status,
            body.message
                .or(body.kind)
                .unwrap_or_else(|| "no details".to_string())
        );
        error!("{}", reason);
        Err(InfrastructureError::Directory(reason))
    }

    async fn lookup(&self, email: &str) -> Result<Option<DirectoryUser>, InfrastructureError> {
        debug!("Looking up directory user {}", mask_email(email));

        let response = self
            .authorize(self.client.get(self.url("/users")))
            .query(&[("search", email)])
            .send()
            .await?;
        let list: UserList = Self::check(response, "user search").await?.json().await?;

        Ok(exact_match(list, email))
    }

    async fn patch(&self, path: &str, body: serde_json::Value, action: &str) -> Result<(), InfrastructureError> {
        let response = self
            .authorize(self.client.patch(self.url(path)))
            .json(&body)
            .send()
            .await?;
        Self::check(response, action).await?;
        Ok(())
    }
}

#[async_trait]
impl UserDirectoryTrait for AppwriteUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<DirectoryUser>, String> {
        self.lookup(email).await.map_err(|e| e.to_string())
    }

    async fn set_email_verified(&self, user_id: &str, verified: bool) -> Result<(), String> {
        self.patch(
            &format!("/users/{}/verification", user_id),
            json!({ "emailVerification": verified }),
            "email verification update",
        )
        .await
        .map_err(|e| e.to_string())?;

        info!(user_id = user_id, verified = verified, "Updated email verification");
        Ok(())
    }

    async fn set_password(&self, user_id: &str, new_password: &str) -> Result<(), String> {
        self.patch(
            &format!("/users/{}/password", user_id),
            json!({ "password": new_password }),
            "password update",
        )
        .await
        .map_err(|e| e.to_string())?;

        info!(user_id = user_id, "Updated user password");
        Ok(())
    }
}
