//! Upstream reference source
//!
//! The upstream API wraps every list in a `{"data": [...]}` envelope and
//! identifies records by either numeric or string ids.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use refdata_core::constants::{UPSTREAM_ACTIVE_STATUS, UPSTREAM_COUNTRY_PAGE};
use refdata_core::{log_debug, Config, Error, Result};

/// Identifier as issued by the upstream source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UpstreamId {
    /// Numeric id
    Number(i64),
    /// String id
    Text(String),
}

impl fmt::Display for UpstreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamId::Number(n) => write!(f, "{}", n),
            UpstreamId::Text(s) => f.write_str(s),
        }
    }
}

/// Country record from the upstream source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamCountry {
    /// Upstream id, used to fetch the country's states
    pub id: UpstreamId,
    /// Display name
    pub name: String,
    /// ISO code
    #[serde(default, alias = "iso_code")]
    pub iso2: Option<String>,
    /// Dialling prefix
    #[serde(default, alias = "phone_code")]
    pub dial_code: Option<String>,
    /// Flag image URL
    #[serde(default, alias = "flag_url")]
    pub flag: Option<String>,
    /// Currency code
    #[serde(default)]
    pub currency_code: Option<String>,
    /// Currency symbol
    #[serde(default)]
    pub currency_symbol: Option<String>,
    /// Currency name
    #[serde(default)]
    pub currency_name: Option<String>,
    /// Numeric status enum; 1 is active
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<i64>,
}

/// Status as it arrives on the wire
#[derive(Deserialize)]
#[serde(untagged)]
enum RawStatus {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(#[allow(dead_code)] serde::de::IgnoredAny),
}

/// Integral numbers and numeric strings keep their value, anything else is `None`
fn lenient_status<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let status = match Option::<RawStatus>::deserialize(deserializer)? {
        Some(RawStatus::Integer(n)) => Some(n),
        Some(RawStatus::Float(f)) if f.fract() == 0.0 => Some(f as i64),
        Some(RawStatus::Text(text)) => text.trim().parse().ok(),
        Some(RawStatus::Float(_)) | Some(RawStatus::Other(_)) | None => None,
    };
    Ok(status)
}

/// State record from the upstream source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamState {
    /// Upstream id, used to fetch the state's LGAs
    pub id: UpstreamId,
    /// Display name
    pub name: String,
}

/// LGA record from the upstream source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamLga {
    /// Upstream id
    pub id: UpstreamId,
    /// Display name
    pub name: String,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: Vec<T>,
}

/// Source of country, state and LGA lists for the import pipeline
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    /// First page of active countries
    async fn active_countries(&self) -> Result<Vec<UpstreamCountry>>;

    /// States of one country
    async fn states(&self, country: &UpstreamId) -> Result<Vec<UpstreamState>>;

    /// LGAs of one state
    async fn lgas(&self, state: &UpstreamId) -> Result<Vec<UpstreamLga>>;
}

/// [`ReferenceSource`] backed by the upstream REST API
#[derive(Debug, Clone)]
pub struct HttpReferenceSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpReferenceSource {
    /// Client for `base_url` with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("refdata-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::config(format!("Failed to build upstream client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Client for the upstream configured in `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.require_upstream()?, config.upstream_timeout())
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = format!("{}{}", self.base_url, path);
        log_debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::upstream(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::upstream(format!("GET {} returned {}", url, status)));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| Error::upstream(format!("GET {} returned an unreadable body: {}", url, e)))?;

        Ok(envelope.data)
    }
}

#[async_trait]
impl ReferenceSource for HttpReferenceSource {
    async fn active_countries(&self) -> Result<Vec<UpstreamCountry>> {
        let query = [
            ("status", UPSTREAM_ACTIVE_STATUS.to_string()),
            ("page", UPSTREAM_COUNTRY_PAGE.to_string()),
        ];
        self.fetch_list("/countries", &query).await
    }

    async fn states(&self, country: &UpstreamId) -> Result<Vec<UpstreamState>> {
        self.fetch_list(&format!("/countries/{}/states", country), &[]).await
    }

    async fn lgas(&self, state: &UpstreamId) -> Result<Vec<UpstreamLga>> {
        self.fetch_list(&format!("/states/{}/lgas", state), &[]).await
    }
}
