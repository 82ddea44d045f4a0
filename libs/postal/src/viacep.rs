//! ViaCEP client (`GET /ws/{cep}/json/`).

use std::time::Duration;

use async_trait::async_trait;
use barblab_ident::Cep;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::Deserialize;
use tracing::debug;

use crate::address::{Address, LookupOutcome};
use crate::error::LookupError;
use crate::PostalLookup;

/// Public ViaCEP endpoint.
pub const DEFAULT_VIACEP_URL: &str = "https://viacep.com.br";

/// HTTP client for the ViaCEP service.
#[derive(Debug, Clone)]
pub struct ViaCepClient {
    client: reqwest::Client,
    base_url: String,
}

impl ViaCepClient {
    /// Create a client for `base_url` whose requests give up after `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, cep: &Cep) -> String {
        format!("{}/ws/{}/json/", self.base_url, cep.digits())
    }
}

#[async_trait]
impl PostalLookup for ViaCepClient {
    async fn lookup(&self, cep: &Cep) -> Result<LookupOutcome, LookupError> {
        debug!(cep = %cep.digits(), "Looking up CEP");

        let response = self.client.get(self.url(cep)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body: serde_json::Value = response.json().await?;
        parse_body(body)
    }
}

/// ViaCEP response shape (Portuguese field names).
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    logradouro: Option<String>,
    #[serde(default)]
    bairro: Option<String>,
    #[serde(default)]
    localidade: Option<String>,
    #[serde(default)]
    uf: Option<String>,
}

impl From<ViaCepResponse> for Address {
    fn from(r: ViaCepResponse) -> Self {
        Self {
            street: non_blank(r.logradouro),
            neighborhood: non_blank(r.bairro),
            city: non_blank(r.localidade),
            region: non_blank(r.uf),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Unknown CEPs come back as HTTP 200 with `{"erro": true}` (older
/// deployments send the string `"true"`).
fn parse_body(body: serde_json::Value) -> Result<LookupOutcome, LookupError> {
    if !body.is_object() {
        return Err(LookupError::Malformed(format!(
            "expected a JSON object, got {body}"
        )));
    }

    let not_found = match body.get("erro") {
        Some(serde_json::Value::Bool(flag)) => *flag,
        Some(serde_json::Value::String(flag)) => flag.eq_ignore_ascii_case("true"),
        _ => false,
    };
    if not_found {
        return Ok(LookupOutcome::NotFound);
    }

    let response: ViaCepResponse =
        serde_json::from_value(body).map_err(|e| LookupError::Malformed(e.to_string()))?;
    Ok(LookupOutcome::Found(response.into()))
}
