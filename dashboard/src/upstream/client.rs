use anyhow::{bail, Context};
use chrono::NaiveDate;
use intensitycore::api::{decode_national, decode_regional, NationalForecastEntry, RegionalForecastEntry};
use reqwest::header::ACCEPT;

/// Thin client for the public carbon-intensity API.
pub struct IntensityClient {
    http: reqwest::Client,
    base_url: String,
}

impl IntensityClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("building upstream HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn national_url(&self, date: NaiveDate) -> String {
        format!("{}/intensity/date/{}", self.base_url, date.format("%Y-%m-%d"))
    }

    pub fn regional_url(&self, date: NaiveDate) -> String {
        format!(
            "{}/regional/intensity/{}T00:00Z/fw24h",
            self.base_url,
            date.format("%Y-%m-%d")
        )
    }

    async fn get_body(&self, url: &str) -> anyhow::Result<String> {
        log::debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .with_context(|| format!("requesting {}", url))?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            bail!("upstream {} returned {}: {}", url, status, text);
        }
        response
            .text()
            .await
            .with_context(|| format!("reading body of {}", url))
    }

    pub async fn national(&self, date: NaiveDate) -> anyhow::Result<Vec<NationalForecastEntry>> {
        let url = self.national_url(date);
        let body = self.get_body(&url).await?;
        decode_national(&body).with_context(|| format!("decoding national forecast for {}", date))
    }

    pub async fn regional(&self, date: NaiveDate) -> anyhow::Result<Vec<RegionalForecastEntry>> {
        let url = self.regional_url(date);
        let body = self.get_body(&url).await?;
        decode_regional(&body).with_context(|| format!("decoding regional forecast for {}", date))
    }
}
