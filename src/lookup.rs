//! Lookup service client.
//!
//! Queries the three inference services (gender, age, nationality) for a
//! name and merges their answers into a single [`NameRecord`].
//!
//! # Failure policy
//!
//! All three calls must succeed. If any one fails (transport error, non-2xx
//! status, or an undecodable body) the whole lookup fails and no partial
//! record is produced. There are no retries; each request is bounded by
//! `lookup.timeout_secs`.
//!
//! # Decoding
//!
//! Response decoding is lenient: unknown fields are ignored and missing or
//! `null` fields take defaults (`age: null` becomes `0`, `gender: null`
//! becomes no gender).

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::config::LookupConfig;
use crate::error::{LookupError, Service};
use crate::models::{CountryProbability, GenderInfo, NameRecord};

/// Source of merged lookups for a normalized name.
///
/// The controller only talks to this trait, so tests can substitute a
/// scripted client for [`HttpLookupClient`].
#[async_trait]
pub trait LookupClient: Send + Sync {
    /// Fetch and merge all three estimates for `name`.
    ///
    /// `country_hint` is an ISO 3166-1 alpha-2 code; `None` or an empty
    /// string omits the parameter.
    async fn fetch(&self, name: &str, country_hint: Option<&str>)
        -> Result<NameRecord, LookupError>;
}

/// Body of the age service (`agify`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgeResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub count: Option<i64>,
}

/// Body of the gender service (`genderize`). `probability` is in `0..=1`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenderResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub probability: Option<f32>,
    #[serde(default)]
    pub count: Option<i64>,
}

/// Body of the nationality service (`nationalize`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NationalityResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Vec<CountryProbability>,
}

/// Merge the three service answers into one record.
///
/// The record is keyed by `requested`, the normalized name that was sent;
/// the names echoed by the services are ignored. Age comes from the age
/// service, the gender probability is scaled to a percentage, and the nationality
/// list is kept in service order.
pub fn merge(
    requested: &str,
    age: AgeResponse,
    gender: GenderResponse,
    nationality: NationalityResponse,
) -> NameRecord {
    let gender = gender.gender.map(|label| GenderInfo {
        label,
        probability: gender.probability.unwrap_or(0.0) * 100.0,
    });

    NameRecord {
        name: requested.to_string(),
        age: age.age.unwrap_or(0),
        gender,
        nationality: nationality.country,
    }
}

/// [`LookupClient`] backed by the public HTTP services.
pub struct HttpLookupClient {
    client: reqwest::Client,
    config: LookupConfig,
    api_key: Option<String>,
}

impl HttpLookupClient {
    pub fn new(config: &LookupConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("nameinfo/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
            api_key: config.resolved_api_key(),
        })
    }

    fn url_for(&self, service: Service) -> &str {
        match service {
            Service::Gender => &self.config.gender_url,
            Service::Age => &self.config.age_url,
            Service::Nationality => &self.config.nationality_url,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        service: Service,
        name: &str,
        country_hint: Option<&str>,
    ) -> Result<T, LookupError> {
        let mut query: Vec<(&str, &str)> = vec![("name", name)];
        if let Some(country) = country_hint.filter(|c| !c.is_empty()) {
            query.push(("country_id", country));
        }
        if let Some(key) = self.api_key.as_deref() {
            query.push(("apikey", key));
        }

        let url = self.url_for(service);
        tracing::debug!(%service, url, name, "requesting estimate");

        let response = self
            .client
            .get(url)
            .query(&query)
            .send()
            .await
            .map_err(|source| LookupError::Network { service, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status { service, status });
        }

        let body = response
            .text()
            .await
            .map_err(|source| LookupError::Network { service, source })?;

        serde_json::from_str(&body).map_err(|source| LookupError::Decode { service, source })
    }
}

#[async_trait]
impl LookupClient for HttpLookupClient {
    async fn fetch(
        &self,
        name: &str,
        country_hint: Option<&str>,
    ) -> Result<NameRecord, LookupError> {
        let (gender, age, nationality) = tokio::try_join!(
            self.get_json::<GenderResponse>(Service::Gender, name, country_hint),
            self.get_json::<AgeResponse>(Service::Age, name, country_hint),
            self.get_json::<NationalityResponse>(Service::Nationality, name, country_hint),
        )?;

        Ok(merge(name, age, gender, nationality))
    }
}
