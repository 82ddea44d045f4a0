//! HTTP client for the booking backend.
//!
//! The backend keeps login state in a session cookie. Redirects are never
//! followed: the admin login reports success as a `302` carrying the cookie.

use anyhow::{Context, Result};
use async_trait::async_trait;
use barblab_forms::submit::{BookingPayload, LoginPayload, RegisterPayload};
use barblab_forms::{Availability, AvailabilityCheck};
use barblab_ident::Cpf;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE, SET_COOKIE};
use reqwest::redirect::Policy;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{Config, Session};
use crate::error::CliError;
use crate::models::{AppointmentRecord, ClientRecord, CpfExists, Me, OkResponse};

/// Message the admin login page shows on bad credentials.
const ADMIN_LOGIN_FAILED: &str = "Usuário ou senha incorretos.";

/// API client for the booking backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client from config and an optional saved session.
    pub fn new(config: &Config, session: Option<&Session>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(session) = session {
            headers.insert(
                COOKIE,
                HeaderValue::from_str(&session.cookie).context("Invalid session cookie")?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .redirect(Policy::none())
            .timeout(config.request_timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_url().trim_end_matches('/').to_string(),
        })
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Make a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, CliError> {
        let response = self.client.get(self.url(path)).send().await?;

        self.handle_response(response).await
    }

    /// Make a GET request and return the raw body.
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, CliError> {
        let response = self.client.get(self.url(path)).send().await?;

        if response.status().is_success() {
            Ok(response.bytes().await?.to_vec())
        } else {
            self.handle_error(response).await
        }
    }

    /// Make a POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CliError> {
        let response = self.client.post(self.url(path)).json(body).send().await?;

        self.handle_response(response).await
    }

    /// Make a POST request and also return the session cookie the backend
    /// set, if any.
    async fn post_for_session<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(T, Option<String>), CliError> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        let cookie = session_cookie(response.headers());

        let value = self.handle_response(response).await?;
        Ok((value, cookie))
    }

    /// Make a DELETE request.
    pub async fn delete(&self, path: &str) -> Result<(), CliError> {
        let response = self.client.delete(self.url(path)).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            self.handle_error(response).await
        }
    }

    // -------------------------------------------------------------------------
    // Client endpoints
    // -------------------------------------------------------------------------

    /// Create an account. The backend logs the new client in.
    pub async fn register(
        &self,
        payload: &RegisterPayload,
    ) -> Result<(OkResponse, Option<String>), CliError> {
        self.post_for_session("/api/register", payload).await
    }

    /// Log in as a client.
    ///
    /// Wrong credentials come back as `401` with a message, which is reported
    /// as-is instead of as a missing session.
    pub async fn login(
        &self,
        payload: &LoginPayload,
    ) -> Result<(OkResponse, Option<String>), CliError> {
        let response = self
            .client
            .post(self.url("/api/login"))
            .json(payload)
            .send()
            .await?;

        if response.status().as_u16() == 401 {
            let message = error_message(response, "CPF ou senha incorretos.").await;
            return Err(CliError::api(401, message));
        }

        let cookie = session_cookie(response.headers());
        let value = self.handle_response(response).await?;
        Ok((value, cookie))
    }

    /// Log out the client session. Returns the updated session cookie, if
    /// the backend set one.
    pub async fn logout(&self) -> Result<(OkResponse, Option<String>), CliError> {
        self.post_for_session("/api/logout", &serde_json::json!({}))
            .await
    }

    /// The logged-in client, or `None` without a client session.
    pub async fn me(&self) -> Result<Option<Me>, CliError> {
        self.get("/api/me").await
    }

    /// Book an appointment for the logged-in client.
    pub async fn book(&self, payload: &BookingPayload) -> Result<OkResponse, CliError> {
        self.post("/api/agendar", payload).await
    }

    // -------------------------------------------------------------------------
    // Admin endpoints
    // -------------------------------------------------------------------------

    /// Log in to the admin panel and return the new session cookie.
    ///
    /// The panel answers a good login with a redirect and a bad one with the
    /// login page itself.
    pub async fn admin_login(&self, user: &str, password: &str) -> Result<String, CliError> {
        let response = self
            .client
            .post(self.url("/admin-login"))
            .form(&[("usuario", user), ("senha", password)])
            .send()
            .await?;
        let status = response.status();

        if status.is_redirection() {
            return session_cookie(response.headers()).ok_or_else(|| {
                CliError::Other(anyhow::anyhow!("Admin login did not set a session cookie"))
            });
        }

        if status.is_success() {
            debug!("Admin login page returned instead of redirect");
            return Err(CliError::api(401, ADMIN_LOGIN_FAILED));
        }

        self.handle_error(response).await
    }

    /// Leave the admin panel. Returns the updated session cookie, if any.
    pub async fn admin_logout(&self) -> Result<Option<String>, CliError> {
        let response = self.client.get(self.url("/admin-logout")).send().await?;
        let status = response.status();

        if status.is_redirection() || status.is_success() {
            Ok(session_cookie(response.headers()))
        } else {
            self.handle_error(response).await
        }
    }

    /// All clients, newest first.
    pub async fn clients(&self) -> Result<Vec<ClientRecord>, CliError> {
        self.get("/api/admin/clients").await
    }

    /// All appointments, newest first.
    pub async fn appointments(&self) -> Result<Vec<AppointmentRecord>, CliError> {
        self.get("/api/admin/agendamentos").await
    }

    /// Delete a client and their appointments.
    pub async fn delete_client(&self, id: i64) -> Result<(), CliError> {
        self.delete(&format!("/api/admin/client/{}", id)).await
    }

    /// Delete one appointment.
    pub async fn delete_appointment(&self, id: i64) -> Result<(), CliError> {
        self.delete(&format!("/api/admin/agendamento/{}", id)).await
    }

    /// The client list as CSV.
    pub async fn export_csv(&self) -> Result<Vec<u8>, CliError> {
        self.get_bytes("/api/admin/export_csv").await
    }

    // -------------------------------------------------------------------------
    // Response handling
    // -------------------------------------------------------------------------

    /// Handle a successful or error response.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, CliError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to parse response: {}", e)))
        } else {
            self.handle_error(response).await
        }
    }

    /// Handle an error response.
    async fn handle_error<T>(&self, response: reqwest::Response) -> Result<T, CliError> {
        let status = response.status().as_u16();
        let path = response.url().path().to_string();

        match status {
            401 => Err(CliError::NotAuthenticated),
            404 => Err(CliError::NotFound(path)),
            _ => {
                let fallback = format!("Request failed with status {}", status);
                Err(CliError::api(status, error_message(response, &fallback).await))
            }
        }
    }
}

#[async_trait]
impl AvailabilityCheck for ApiClient {
    async fn check(&self, cpf: &Cpf) -> Availability {
        let response = match self
            .client
            .get(self.url("/api/check_cpf"))
            .query(&[("cpf", cpf.digits())])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "CPF availability check failed");
                return Availability::Unknown;
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "CPF availability check rejected");
            return Availability::Unknown;
        }

        match response.json::<CpfExists>().await {
            Ok(CpfExists { exists: true }) => Availability::Taken,
            Ok(CpfExists { exists: false }) => Availability::Available,
            Err(e) => {
                warn!(error = %e, "Malformed CPF availability response");
                Availability::Unknown
            }
        }
    }
}

/// Error body structure.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: String,
}

/// Reads the `error` field of a response body, or returns `fallback`.
async fn error_message(response: reqwest::Response, fallback: &str) -> String {
    response
        .json::<ApiErrorResponse>()
        .await
        .map(|body| body.error)
        .unwrap_or_else(|_| fallback.to_string())
}

/// Extracts the `name=value` pair of the first `Set-Cookie` header.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|pair| pair.trim().to_string())
        .filter(|pair| !pair.is_empty())
}
