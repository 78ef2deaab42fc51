// Gancio-style calendar client
// Cookie-session login, then the JSON event API. Every call carries the
// configured timeout; a timed-out call fails alone, never the whole run.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use sync_domain::entities::{EventDraft, RemoteEvent};
use sync_domain::ports::{CalendarApi, CredentialsProvider};

pub struct GancioClient {
    base_url: String,
    client: Client,
    credentials: Arc<dyn CredentialsProvider>,
}

impl GancioClient {
    pub fn new(
        base_url: &str,
        timeout_seconds: u64,
        credentials: Arc<dyn CredentialsProvider>,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds.max(3)))
            .cookie_store(true)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            credentials,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl CalendarApi for GancioClient {
    async fn authenticate(&self) -> anyhow::Result<()> {
        let credentials = self.credentials.credentials()?;
        // Establish the session cookie before posting credentials.
        self.client.get(self.url("/login")).send().await?;
        let response = self
            .client
            .post(self.url("/auth/login"))
            .form(&[
                ("email", credentials.email.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            anyhow::bail!("login rejected with status {}", response.status());
        }
        info!(email = %credentials.email, "calendar session established");
        Ok(())
    }

    async fn list_events(&self) -> anyhow::Result<Vec<RemoteEvent>> {
        let response = self
            .client
            .get(self.url("/api/events"))
            .send()
            .await?
            .error_for_status()?;
        let events: Vec<RemoteEvent> = response.json().await?;
        debug!(count = events.len(), "fetched remote events");
        Ok(events)
    }

    async fn create_event(&self, draft: &EventDraft) -> anyhow::Result<RemoteEvent> {
        let response = self
            .client
            .post(self.url("/api/event"))
            .json(draft)
            .send()
            .await?;
        if !response.status().is_success() {
            anyhow::bail!(
                "event creation rejected with status {}",
                response.status()
            );
        }
        Ok(response.json().await?)
    }

    async fn delete_event(&self, id: i64) -> anyhow::Result<()> {
        self.client
            .delete(self.url(&format!("/api/event/{id}")))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
