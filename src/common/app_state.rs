use std::sync::Arc;

use reqwest::Client;
use serde::Deserialize;
use sqlx::{Pool, Postgres};
use tracing::info;

use crate::{
    client::directory_client::DirectoryClient, common::error::ServerError, config::config::CONFIG,
    play::registry::SessionRegistry,
};

pub struct AppState {
    pool: Pool<Postgres>,
    jwks: Jwks,
    sessions: Arc<SessionRegistry>,
    client: Client,
    directory: Option<DirectoryClient>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

#[allow(dead_code)]
#[derive(Debug, Deserialize, Clone)]
pub struct Jwk {
    pub kid: String,
    pub n: String,
    pub e: String,
    pub kty: String,
    pub alg: Option<String>,
    #[serde(rename(deserialize = "use"))]
    pub use_: Option<String>,
}

impl AppState {
    pub fn new(
        pool: Pool<Postgres>,
        jwks: Jwks,
        sessions: Arc<SessionRegistry>,
        client: Client,
        directory: Option<DirectoryClient>,
    ) -> Arc<Self> {
        Arc::new(Self {
            pool,
            jwks,
            sessions,
            client,
            directory,
        })
    }

    pub async fn from_connection_string(connection_string: &str) -> Result<Arc<Self>, ServerError> {
        let pool = Pool::<Postgres>::connect(connection_string).await?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| ServerError::Internal(format!("Failed to run migrations: {}", e)))?;

        let client = Client::new();
        let response = client.get(&CONFIG.auth.jwks_url).send().await?;
        let jwks = response.json::<Jwks>().await?;
        info!("Loaded {} signing keys", jwks.keys.len());

        let ttl = chrono::Duration::minutes(CONFIG.play.session_ttl_minutes);
        let sessions = Arc::new(SessionRegistry::new(ttl));

        let directory = match (&CONFIG.auth.directory_url, &CONFIG.auth.directory_secret) {
            (Some(url), Some(secret)) => Some(DirectoryClient::new(url, secret)),
            _ => {
                info!("No user directory configured, admin listing shows raw owner ids");
                None
            }
        };

        Ok(Self::new(pool, jwks, sessions, client, directory))
    }

    pub fn get_pool(&self) -> &Pool<Postgres> {
        &self.pool
    }

    pub fn get_jwks(&self) -> &Jwks {
        &self.jwks
    }

    pub fn get_sessions(&self) -> &Arc<SessionRegistry> {
        &self.sessions
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }

    pub fn get_directory(&self) -> Option<&DirectoryClient> {
        self.directory.as_ref()
    }
}
