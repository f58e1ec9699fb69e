//! Reading service over HTTP.
//!
//! Endpoints, relative to the base URL:
//! - `POST fortune` with `{"cards": [...], "intention": ...}`, answering
//!   `{"fortune": "...", "tokens_used": n}`
//! - `GET token_status`, answering `{"total_cost": x}`
//! - `GET health`, any 200 meaning the service is up
//!
//! Internet reachability is a GET on `probe_url`.
//!
//! Service requests carry a `Token` header and a `Hash` header holding the
//! hex SHA-256 of the token followed by the shared secret. The service
//! skips the check only when it runs in dev mode.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::provider::{
    split_paragraphs, Connectivity, ConnectivityProbe, ProviderError, Reading, ReadingRequest,
    TextProvider, TokenMeter, TOKEN_COST_LIMIT,
};

pub const PRODUCTION_URL: &str = "https://tarot-generate-arcade.onrender.com/";
pub const DEV_URL: &str = "http://127.0.0.1:5000/";
/// The service only answers three-card readings.
pub const READING_CARDS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub probe_url: String,
    /// Seconds allowed for connectivity and status checks.
    pub probe_timeout: f32,
    /// Seconds allowed for a reading to be generated.
    pub request_timeout: f32,
    pub token_cost_limit: f64,
    /// Sent as the `Token` header.
    pub auth_token: String,
    /// Shared secret mixed into the `Hash` header. Never sent itself.
    #[serde(skip_serializing)]
    pub secret_hash: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: PRODUCTION_URL.to_string(),
            probe_url: "https://health.aws.amazon.com/health/status".to_string(),
            probe_timeout: 3.0,
            request_timeout: 60.0,
            token_cost_limit: TOKEN_COST_LIMIT,
            auth_token: "player_access".to_string(),
            secret_hash: String::new(),
        }
    }
}

impl BackendConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Defaults, pointed at the local server when `TAROT_DEPLOY_MODE=dev`.
    /// `TAROT_BACKEND_URL` overrides either. The request secret comes from
    /// `TAROT_SECRET_HASH`.
    pub fn from_env() -> Self {
        let mode = std::env::var("TAROT_DEPLOY_MODE").ok();
        let url = std::env::var("TAROT_BACKEND_URL").ok();
        let secret = std::env::var("TAROT_SECRET_HASH").ok();
        Self::from_vars(mode.as_deref(), url.as_deref(), secret.as_deref())
    }

    fn from_vars(mode: Option<&str>, url: Option<&str>, secret: Option<&str>) -> Self {
        let mut config = Self::default();
        let dev = mode == Some("dev");
        if dev {
            config.base_url = DEV_URL.to_string();
        }
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        match secret {
            Some(secret) => config.secret_hash = secret.to_string(),
            None if !dev => log::warn!("TAROT_SECRET_HASH not set; the service will refuse readings"),
            None => {}
        }
        log::info!("Reading service at {}", config.base_url);
        config
    }

    /// `Hash` header value: hex SHA-256 of the token then the secret.
    pub fn request_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.auth_token.as_bytes());
        hasher.update(self.secret_hash.as_bytes());
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }

    /// `path` joined onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

#[derive(Serialize)]
struct FortuneRequest<'a> {
    cards: &'a [String],
    intention: &'a str,
}

#[derive(Deserialize)]
struct FortuneResponse {
    fortune: String,
    #[serde(default)]
    tokens_used: u32,
}

#[derive(Deserialize)]
struct TokenStatus {
    total_cost: f64,
}

fn parse_reading(body: &str) -> Result<Reading, ProviderError> {
    let response: FortuneResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Malformed(e.to_string()))?;
    let paragraphs = split_paragraphs(&response.fortune);
    if paragraphs.is_empty() {
        return Err(ProviderError::Empty);
    }
    Ok(Reading {
        paragraphs,
        token_count: response.tokens_used,
    })
}

fn parse_total_cost(body: &str) -> Result<f64, ProviderError> {
    serde_json::from_str::<TokenStatus>(body)
        .map(|s| s.total_cost)
        .map_err(|e| ProviderError::Malformed(e.to_string()))
}

fn request_error(err: ureq::Error) -> ProviderError {
    match err {
        ureq::Error::StatusCode(status) => ProviderError::Status {
            status,
            body: String::new(),
        },
        other => ProviderError::Unreachable(other.to_string()),
    }
}

fn agent(timeout: f32) -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs_f32(timeout.max(0.1))))
        .build();
    ureq::Agent::new_with_config(config)
}

/// One client for all three collaborator roles.
pub struct HttpBackend {
    config: BackendConfig,
    request_hash: String,
    probe: ureq::Agent,
    requests: ureq::Agent,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            request_hash: config.request_hash(),
            probe: agent(config.probe_timeout),
            requests: agent(config.request_timeout),
            config,
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn reachable(&self, url: &str) -> bool {
        match self.probe.get(url).call() {
            Ok(response) => response.status().as_u16() == 200,
            Err(err) => {
                log::debug!("Probe {} failed: {}", url, err);
                false
            }
        }
    }
}

impl TextProvider for HttpBackend {
    fn generate(&self, request: &ReadingRequest) -> Result<Reading, ProviderError> {
        if request.cards.len() != READING_CARDS {
            return Err(ProviderError::Rejected(format!(
                "readings take exactly {} cards, got {}",
                READING_CARDS,
                request.cards.len()
            )));
        }
        let body = serde_json::to_string(&FortuneRequest {
            cards: &request.cards,
            intention: &request.intention,
        })
        .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        let text = self
            .requests
            .post(&self.config.endpoint("fortune"))
            .header("Content-Type", "application/json")
            .header("Token", &self.config.auth_token)
            .header("Hash", &self.request_hash)
            .send(body)
            .map_err(request_error)?
            .into_body()
            .read_to_string()
            .map_err(request_error)?;
        parse_reading(&text)
    }
}

impl ConnectivityProbe for HttpBackend {
    fn check(&self) -> Connectivity {
        let internet = self.reachable(&self.config.probe_url);
        // Without internet the service cannot be up either.
        let backend = internet && self.reachable(&self.config.endpoint("health"));
        Connectivity { internet, backend }
    }
}

impl TokenMeter for HttpBackend {
    fn total_cost(&self) -> Result<f64, ProviderError> {
        let text = self
            .probe
            .get(&self.config.endpoint("token_status"))
            .header("Token", &self.config.auth_token)
            .header("Hash", &self.request_hash)
            .call()
            .map_err(request_error)?
            .into_body()
            .read_to_string()
            .map_err(request_error)?;
        parse_total_cost(&text)
    }

    fn cost_limit(&self) -> f64 {
        self.config.token_cost_limit
    }
}
