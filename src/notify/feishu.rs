//! Direct Feishu open-API delivery with a lazily refreshed tenant token.
//!
//! The token is cached process-wide with its expiry instant and refreshed on
//! read when expired or within 60 seconds of expiry. Refresh is idempotent:
//! two concurrent refreshes just overwrite the cache with equivalent tokens,
//! so no coordination beyond the cache mutex is needed.

use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::Delivery;

const TOKEN_URL: &str = "https://open.feishu.cn/open-apis/auth/v3/tenant_access_token/internal";
const MESSAGE_URL: &str =
    "https://open.feishu.cn/open-apis/im/v1/messages?receive_id_type=chat_id";
const SEND_TIMEOUT: Duration = Duration::from_secs(15);

/// Refresh this long before the reported expiry to avoid sending with a
/// token that dies mid-flight.
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct CachedToken {
    pub token: String,
    pub expires_at: Instant,
}

/// A cached token is only usable while it stays valid past the margin.
pub fn needs_refresh(cached: Option<&CachedToken>, now: Instant) -> bool {
    match cached {
        Some(c) => c.expires_at.saturating_duration_since(now) <= REFRESH_MARGIN,
        None => true,
    }
}

pub struct FeishuDelivery {
    app_id: String,
    app_secret: String,
    chat_id: String,
    client: Client,
    token: Mutex<Option<CachedToken>>,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    app_id: &'a str,
    app_secret: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    code: i64,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    tenant_access_token: String,
    /// Remaining validity in seconds.
    #[serde(default)]
    expire: u64,
}

#[derive(Serialize)]
struct MessageRequest<'a> {
    receive_id: &'a str,
    msg_type: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct MessageResponse {
    code: i64,
    #[serde(default)]
    msg: String,
}

impl FeishuDelivery {
    pub fn new(app_id: String, app_secret: String, chat_id: String) -> Self {
        Self {
            app_id,
            app_secret,
            chat_id,
            client: Client::new(),
            token: Mutex::new(None),
        }
    }

    pub fn from_env() -> Option<Self> {
        let app_id = std::env::var("FEISHU_APP_ID").ok()?;
        let app_secret = std::env::var("FEISHU_APP_SECRET").ok()?;
        let chat_id = std::env::var("FEISHU_CHAT_ID").ok()?;
        Some(Self::new(app_id, app_secret, chat_id))
    }

    async fn tenant_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;
        if let Some(c) = cached.as_ref() {
            if !needs_refresh(Some(c), Instant::now()) {
                return Ok(c.token.clone());
            }
        }

        let resp: TokenResponse = self
            .client
            .post(TOKEN_URL)
            .timeout(SEND_TIMEOUT)
            .json(&TokenRequest {
                app_id: &self.app_id,
                app_secret: &self.app_secret,
            })
            .send()
            .await
            .context("feishu token request failed")?
            .json()
            .await
            .context("feishu token response decode failed")?;

        if resp.code != 0 {
            bail!("feishu token endpoint rejected request: {} ({})", resp.msg, resp.code);
        }

        let fresh = CachedToken {
            token: resp.tenant_access_token,
            expires_at: Instant::now() + Duration::from_secs(resp.expire),
        };
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }
}

#[async_trait::async_trait]
impl Delivery for FeishuDelivery {
    async fn send(&self, message: &str) -> Result<()> {
        let token = self.tenant_token().await?;

        let content = serde_json::json!({ "text": message }).to_string();
        let resp: MessageResponse = self
            .client
            .post(MESSAGE_URL)
            .timeout(SEND_TIMEOUT)
            .bearer_auth(&token)
            .json(&MessageRequest {
                receive_id: &self.chat_id,
                msg_type: "text",
                content,
            })
            .send()
            .await
            .context("feishu message request failed")?
            .json()
            .await
            .context("feishu message response decode failed")?;

        if resp.code != 0 {
            bail!("feishu rejected message: {} ({})", resp.msg, resp.code);
        }

        tracing::info!(chat_id = %self.chat_id, chars = message.chars().count(), "message delivered");
        Ok(())
    }
}
