//! ipapi-compatible country lookup.

use std::net::IpAddr;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::geo::{CountryLookup, GeoError};

#[derive(Debug, Deserialize)]
struct LookupResponse {
    country_code: Option<String>,
    country: Option<String>,
}

pub struct IpApiLookup {
    client: reqwest::Client,
    base_url: String,
}

impl IpApiLookup {
    /// `base_url` is `https://ipapi.co` in production.
    pub fn new(base_url: impl Into<String>) -> IpApiLookup {
        IpApiLookup {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }
}

#[async_trait]
impl CountryLookup for IpApiLookup {
    async fn country_for_ip(&self, ip: IpAddr) -> Result<Option<String>, GeoError> {
        let url = format!("{}/{ip}/json/", self.base_url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| GeoError::Lookup(err.to_string()))?;
        if !response.status().is_success() {
            return Err(GeoError::Lookup(format!(
                "lookup returned status {}",
                response.status()
            )));
        }
        let body: LookupResponse = response
            .json()
            .await
            .map_err(|err| GeoError::Lookup(err.to_string()))?;
        Ok(body
            .country_code
            .or(body.country)
            .map(|code| code.trim().to_ascii_uppercase())
            .filter(|code| !code.is_empty()))
    }
}
