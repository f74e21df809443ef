use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use crate::{admin::models::OwnerProfile, client::directory_client_error::DirectoryClientError};

/// Upper bound the user directory accepts per listing request.
const MAX_USERS_PER_REQUEST: usize = 100;

#[derive(Debug, Deserialize)]
pub struct DirectoryEmail {
    pub id: String,
    pub email_address: String,
}

#[derive(Debug, Deserialize)]
pub struct DirectoryUser {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub primary_email_address_id: Option<String>,
    #[serde(default)]
    pub email_addresses: Vec<DirectoryEmail>,
}

impl DirectoryUser {
    pub fn into_profile(self) -> OwnerProfile {
        let name = format!(
            "{} {}",
            self.first_name.unwrap_or_default(),
            self.last_name.unwrap_or_default()
        )
        .trim()
        .to_string();

        let email = self
            .email_addresses
            .into_iter()
            .find(|e| Some(&e.id) == self.primary_email_address_id.as_ref())
            .map(|e| e.email_address);

        OwnerProfile {
            name: if name.is_empty() { "Unnamed User".into() } else { name },
            email: email.unwrap_or_else(|| "No Email".into()),
        }
    }
}

/// Looks up account details in the identity provider's backend API.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    base_url: String,
    secret_key: String,
}

impl DirectoryClient {
    pub fn new(base_url: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            secret_key: secret_key.into(),
        }
    }

    pub async fn fetch_users(
        &self,
        client: &Client,
        user_ids: &[String],
    ) -> Result<Vec<DirectoryUser>, DirectoryClientError> {
        let mut users = Vec::with_capacity(user_ids.len());
        let limit = MAX_USERS_PER_REQUEST.to_string();

        for chunk in user_ids.chunks(MAX_USERS_PER_REQUEST) {
            let mut query: Vec<(&str, &str)> =
                chunk.iter().map(|id| ("user_id", id.as_str())).collect();
            query.push(("limit", limit.as_str()));

            let url = format!("{}/users", self.base_url.trim_end_matches('/'));
            debug!("DirectoryClient requesting {} users", chunk.len());
            let response = client
                .get(&url)
                .bearer_auth(&self.secret_key)
                .query(&query)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or("No body".into());
                error!("DirectoryClient request failed: {} - {}", status, body);
                return Err(DirectoryClientError::ApiError(status, body));
            }

            users.extend(response.json::<Vec<DirectoryUser>>().await?);
        }

        Ok(users)
    }
}
