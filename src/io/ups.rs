//! UPS web tracking transport
//!
//! Two requests per lookup:
//! 1. GET the public tracking page to obtain session cookies, including the
//!    `X-XSRF-TOKEN-ST` token
//! 2. POST the tracking number to the JSON status endpoint. The client's
//!    cookie store replays the session, and the token is echoed in `x-xsrf-token`
//!
//! The endpoint is undocumented; everything carrier-specific stays in this file.

use crate::domain::types::RawActivity;
use crate::error::TrackingError;
use crate::infra::config::Config;
use crate::io::source::{extract_activities, ActivitySource};
use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::Url;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Session cookie whose value must be echoed as `x-xsrf-token`
const XSRF_COOKIE: &str = "X-XSRF-TOKEN-ST";

/// Value of the XSRF cookie the store would send to `url`
fn xsrf_token(jar: &Jar, url: &Url) -> Option<String> {
    let header = jar.cookies(url)?;
    let cookies = header.to_str().ok()?;
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .filter(|(name, _)| *name == XSRF_COOKIE)
        .map(|(_, value)| value.to_string())
        .last()
}

pub struct UpsHttpClient {
    config: Config,
    cookies: Arc<Jar>,
    http_client: reqwest::Client,
}

impl UpsHttpClient {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        // Cookies set by the tracking page (and any redirect on the way) are
        // replayed to the status endpoint by the store.
        let cookies = Arc::new(Jar::default());

        // Created once for reuse (connection pooling)
        let http_client = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .user_agent(config.user_agent())
            .cookie_provider(cookies.clone())
            .build()?;

        Ok(Self { config, cookies, http_client })
    }

    fn status_payload(&self, tracking_id: &str) -> Value {
        json!({
            "Locale": self.config.locale(),
            "Requester": self.config.requester(),
            "TrackingNumber": [tracking_id],
            "returnToValue": "",
        })
    }

    async fn open_session(&self, tracking_id: &str) -> Result<String, TrackingError> {
        let url = self.config.tracking_page_url_for(tracking_id);

        self.http_client
            .get(&url)
            .header("accept-language", self.config.accept_language())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| TrackingError::transport(tracking_id, e))?;

        let status_url = Url::parse(self.config.status_url())
            .map_err(|e| TrackingError::transport(tracking_id, e))?;
        let token = xsrf_token(&self.cookies, &status_url).ok_or_else(|| {
            TrackingError::transport(tracking_id, format!("session cookie {} not issued", XSRF_COOKIE))
        })?;

        debug!(tracking_id = %tracking_id, "ups_session_opened");
        Ok(token)
    }

    async fn request_status(&self, tracking_id: &str, token: &str) -> Result<Value, TrackingError> {
        let referer = self.config.tracking_page_url_for(tracking_id);

        let response = self
            .http_client
            .post(self.config.status_url())
            .header("accept", "application/json, text/plain, */*")
            .header("accept-language", self.config.accept_language())
            .header("cache-control", "no-cache")
            .header("pragma", "no-cache")
            .header("origin", "https://www.ups.com")
            .header("referer", referer)
            .header("sec-fetch-dest", "empty")
            .header("sec-fetch-mode", "cors")
            .header("sec-fetch-site", "same-origin")
            .header("x-xsrf-token", token)
            .json(&self.status_payload(tracking_id))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| TrackingError::transport(tracking_id, e))?;

        response.json::<Value>().await.map_err(|e| TrackingError::transport(tracking_id, e))
    }
}

#[async_trait]
impl ActivitySource for UpsHttpClient {
    async fn fetch_raw_activities(
        &self,
        tracking_id: &str,
    ) -> Result<Vec<RawActivity>, TrackingError> {
        let start = Instant::now();
        info!(tracking_id = %tracking_id, "ups_status_requested");

        let token = self.open_session(tracking_id).await?;
        let body = self.request_status(tracking_id, &token).await?;
        let activities = extract_activities(tracking_id, body)?;

        info!(
            tracking_id = %tracking_id,
            activities = activities.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "ups_status_received"
        );
        Ok(activities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_url() -> Url {
        Url::parse("https://www.ups.com/track/api/Track/GetStatus?loc=en_US").unwrap()
    }

    #[test]
    fn test_xsrf_token_read_from_store() {
        let jar = Jar::default();
        let url = status_url();
        jar.add_cookie_str("X-CSRF-TOKEN=abc; Path=/; Secure", &url);
        jar.add_cookie_str("X-XSRF-TOKEN-ST=tok123; path=/; samesite=strict", &url);

        assert_eq!(xsrf_token(&jar, &url).as_deref(), Some("tok123"));
    }

    #[test]
    fn test_xsrf_token_missing() {
        let jar = Jar::default();
        let url = status_url();
        assert_eq!(xsrf_token(&jar, &url), None);

        jar.add_cookie_str("X-CSRF-TOKEN=abc; Path=/", &url);
        assert_eq!(xsrf_token(&jar, &url), None);
    }

    #[test]
    fn test_xsrf_token_scoped_to_host() {
        let jar = Jar::default();
        let other = Url::parse("https://example.com/").unwrap();
        jar.add_cookie_str("X-XSRF-TOKEN-ST=tok123; Path=/", &other);
        assert_eq!(xsrf_token(&jar, &status_url()), None);
    }

    #[test]
    fn test_status_payload() {
        let client = UpsHttpClient::new(Config::default()).unwrap();
        let payload = client.status_payload("1Z0333056837575011");
        assert_eq!(payload["Locale"], "en_US");
        assert_eq!(payload["Requester"], "wt/trackdetails");
        assert_eq!(payload["TrackingNumber"][0], "1Z0333056837575011");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let config = Config::default()
            .with_tracking_page_url("http://127.0.0.1:9/track?n={tracking_id}")
            .with_http_timeout_ms(2000);
        let client = UpsHttpClient::new(config).unwrap();

        let err = client.fetch_raw_activities("1Z000").await.unwrap_err();
        assert!(matches!(err, TrackingError::Transport { ref tracking_id, .. } if tracking_id == "1Z000"));
    }
}
