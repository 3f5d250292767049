use reqwest::Client;

use crate::error::CardError;
use crate::models::presence::PresencePayload;
use crate::models::RestEnvelope;

const FETCH_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// One-shot presence lookup against the relay's REST API.
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn fetch_presence(&self, user_id: &str) -> Result<PresencePayload, CardError> {
        let url = format!("{}/users/{}", self.base_url, user_id);
        let resp = self.client.get(&url).timeout(FETCH_TIMEOUT).send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(CardError::RelayStatus { status, body });
        }

        let envelope: RestEnvelope<PresencePayload> = resp.json().await?;
        match envelope {
            RestEnvelope {
                success: true,
                data: Some(data),
            } => Ok(data),
            _ => Err(CardError::Unsuccessful),
        }
    }
}
