use crate::domain::ports::MessageTransport;
use crate::error::{MailerError, Result};
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::RwLock;
use tracing::{debug, info};

pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_API_BASE: &str = "https://gmail.googleapis.com/gmail/v1";

/// Credentials and envelope settings for the Gmail transport.
#[derive(Clone)]
pub struct GmailConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Initial access token; may be empty, `authenticate` replaces it.
    pub access_token: String,
    pub refresh_token: String,
    pub email_to: String,
    pub email_from: String,
    pub reply_to: String,
    pub subject: String,
    pub token_url: String,
    pub api_base: String,
}

impl GmailConfig {
    /// Checks that every setting needed to refresh a token and address a
    /// message is present.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("refresh_token", &self.refresh_token),
            ("email_to", &self.email_to),
            ("email_from", &self.email_from),
            ("token_url", &self.token_url),
            ("api_base", &self.api_base),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(MailerError::Config(format!(
                "missing Gmail settings: {}",
                missing.join(", ")
            )))
        }
    }
}

impl fmt::Debug for GmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GmailConfig")
            .field("client_id", &self.client_id)
            .field("email_to", &self.email_to)
            .field("email_from", &self.email_from)
            .field("reply_to", &self.reply_to)
            .field("subject", &self.subject)
            .field("token_url", &self.token_url)
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    raw: &'a str,
}

#[derive(Deserialize)]
struct SendResponse {
    #[serde(default)]
    id: String,
}

/// Sends composed bodies as plain-text email through the Gmail REST API.
///
/// Holds the current OAuth2 access token behind a lock so a refresh from one
/// request is visible to all others.
pub struct GmailTransport {
    client: reqwest::Client,
    config: GmailConfig,
    access_token: RwLock<String>,
}

impl GmailTransport {
    pub fn new(config: GmailConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("photomailer/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            access_token: RwLock::new(config.access_token.clone()),
            config,
        })
    }

    /// Exchanges the refresh token for a fresh access token.
    pub async fn authenticate(&self) -> Result<()> {
        let response = self
            .client
            .post(&self.config.token_url)
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("refresh_token", self.config.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(MailerError::Auth(format!(
                "token endpoint returned {status}: {detail}"
            )));
        }

        let token: TokenResponse = response.json().await?;
        *self.access_token.write().await = token.access_token;
        info!("gmail access token refreshed");
        Ok(())
    }

    /// Renders the full RFC 5322 message for `body`.
    pub fn compose_message(&self, body: &str) -> String {
        let reply_to = if self.config.reply_to.trim().is_empty() {
            &self.config.email_from
        } else {
            &self.config.reply_to
        };
        format!(
            "From: {}\r\nTo: {}\r\nReply-To: {}\r\nSubject: {}\r\nMIME-Version: 1.0\r\nContent-Type: text/plain; charset=\"UTF-8\"\r\n\r\n{}",
            header_value(&self.config.email_from),
            header_value(&self.config.email_to),
            header_value(reply_to),
            encode_subject(&header_value(&self.config.subject)),
            body
        )
    }

    async fn post_message(&self, raw: &str) -> Result<reqwest::Response> {
        let token = self.access_token.read().await.clone();
        let url = format!(
            "{}/users/me/messages/send",
            self.config.api_base.trim_end_matches('/')
        );
        Ok(self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&SendRequest { raw })
            .send()
            .await?)
    }
}

#[async_trait]
impl MessageTransport for GmailTransport {
    async fn send(&self, body: &str) -> Result<()> {
        let raw = general_purpose::URL_SAFE.encode(self.compose_message(body));

        let mut response = self.post_message(&raw).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            debug!("gmail rejected access token, refreshing");
            self.authenticate().await?;
            response = self.post_message(&raw).await?;
        }

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(MailerError::Transport(format!(
                "gmail send returned {status}: {detail}"
            )));
        }

        // Delivered once the status is 2xx; the id is informational only.
        match response.json::<SendResponse>().await {
            Ok(sent) => debug!(id = %sent.id, "gmail accepted message"),
            Err(e) => debug!("gmail accepted message, response body unreadable: {e}"),
        }
        Ok(())
    }
}

/// Strips line breaks so a configured value cannot start a new header.
fn header_value(value: &str) -> String {
    value.chars().filter(|c| !matches!(c, '\r' | '\n')).collect()
}

/// RFC 2047 encoded-word for non-ASCII subjects.
fn encode_subject(subject: &str) -> String {
    if subject.is_ascii() {
        subject.to_string()
    } else {
        format!(
            "=?UTF-8?B?{}?=",
            general_purpose::STANDARD.encode(subject.as_bytes())
        )
    }
}
