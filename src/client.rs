use std::fmt;

use reqwest::{header, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value as JsonValue};
use tokio::time::sleep;

use crate::{
    request::{ApiRequest, Body},
    types::{
        Appointments, BillingHistory, ChatMessage, LoginResponse, MedicalHistory, WearableSnapshot,
    },
    Credentials, MediNetError, Result, RetryPolicy, Role,
};

/// Message surfaced when a failed response carries no usable `error` field.
const FALLBACK_MESSAGE: &str = "Oops! We couldn’t complete your request. \
     Please try again later, or contact support for help.";

#[derive(Clone)]
/// HTTP client for the MediNet portal REST API.
///
/// Every request funnels through [`MediNetClient::fetch_with_retry`]: one
/// logical call issues up to `max_attempts` sequential attempts with
/// exponential backoff in between and produces exactly one outcome.
pub struct MediNetClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
    retry: RetryPolicy,
}

impl fmt::Debug for MediNetClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediNetClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("retry", &self.retry)
            .finish()
    }
}

impl MediNetClient {
    /// Creates a client for an already-authenticated session.
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        let base_url = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            credentials,
            retry: RetryPolicy::default(),
        }
    }

    /// Applies a retry policy other than the default.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Creates a client from environment variables.
    ///
    /// Reads:
    /// - `MEDINET_BASE_URL` — portal origin (e.g. `https://portal.example.org`)
    /// - `MEDINET_TOKEN` — bearer token (prefix optional)
    /// - `MEDINET_CSRF_TOKEN` — CSRF token
    /// - `MEDINET_USER_ID` — numeric user id
    /// - `MEDINET_ROLE` — `admin`, `doctor` or `patient`
    ///
    /// Returns an error if any variable is missing, empty or malformed.
    pub fn from_env() -> Result<Self> {
        let base_url = require_env("MEDINET_BASE_URL")?;
        let token = require_env("MEDINET_TOKEN")?;
        let csrf_token = require_env("MEDINET_CSRF_TOKEN")?;
        let user_id = require_env("MEDINET_USER_ID")?
            .parse::<u64>()
            .map_err(|_| {
                MediNetError::Credentials("MEDINET_USER_ID is not a valid user id".to_owned())
            })?;
        let role = Role::parse(&require_env("MEDINET_ROLE")?)?;
        Ok(Self::new(
            base_url,
            Credentials::new(token, csrf_token, user_id, role),
        ))
    }

    /// Logs into the portal and returns a client for the new session.
    ///
    /// Sends `POST /login` as a URL-encoded form without auth headers; the
    /// CSRF token is only attached to the requests that follow. The session
    /// display name falls back to the local part of `email` when the server
    /// omits one.
    pub async fn login(
        base_url: impl Into<String>,
        email: &str,
        password: &str,
        role: Role,
        csrf_token: impl Into<String>,
    ) -> Result<Self> {
        let csrf_token = csrf_token.into();
        let mut client = Self::new(base_url, Credentials::new("", &csrf_token, 0, role));
        let request = ApiRequest::post_form(
            "/login",
            [
                ("email", email),
                ("password", password),
                ("role", role.as_str()),
            ],
        )
        .unauthenticated();
        let response: LoginResponse = decode_payload(client.fetch_with_retry(&request).await?)?;
        client.credentials = Credentials::from_login(email, role, csrf_token, response);
        Ok(client)
    }

    /// Credential context of this session.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Fetches the patient's medical history.
    pub async fn medical_history(&self) -> Result<MedicalHistory> {
        let request = ApiRequest::get(format!(
            "/api/patients/medical-history/{}",
            self.credentials.user_id
        ));
        decode_payload(self.fetch_with_retry(&request).await?)
    }

    /// Fetches the patient's appointments.
    pub async fn appointments(&self) -> Result<Appointments> {
        let request = ApiRequest::get(format!(
            "/api/appointments/patient/{}",
            self.credentials.user_id
        ));
        decode_payload(self.fetch_with_retry(&request).await?)
    }

    /// Fetches the patient's billing history.
    pub async fn billing_history(&self) -> Result<BillingHistory> {
        let request = ApiRequest::get(format!(
            "/api/patients/billing/history/{}",
            self.credentials.user_id
        ));
        decode_payload(self.fetch_with_retry(&request).await?)
    }

    /// Fetches the latest wearable snapshot.
    pub async fn wearable(&self) -> Result<WearableSnapshot> {
        let request = ApiRequest::get(format!(
            "/api/patients/wearable/{}",
            self.credentials.user_id
        ));
        decode_payload(self.fetch_with_retry(&request).await?)
    }

    /// Saves the patient's care plan. The acknowledgement payload is
    /// returned as-is.
    pub async fn save_care_plan(&self, care_plan: &str) -> Result<JsonValue> {
        let request = ApiRequest::post_json(
            format!("/api/patients/careplan/{}", self.credentials.user_id),
            json!({ "care_plan": care_plan }),
        );
        self.fetch_with_retry(&request).await
    }

    /// Saves a prescription. The acknowledgement payload is returned as-is.
    pub async fn save_prescription(&self, prescription: &str) -> Result<JsonValue> {
        let request = ApiRequest::post_json(
            format!("/api/prescriptions/{}", self.credentials.user_id),
            json!({ "prescription": prescription }),
        );
        self.fetch_with_retry(&request).await
    }

    /// Sends a telemedicine chat message and returns the echoed message.
    pub async fn send_chat(&self, message: &str) -> Result<ChatMessage> {
        let request = ApiRequest::post_json(
            "/api/telemedicine/chat",
            json!({ "message": message }),
        );
        decode_payload(self.fetch_with_retry(&request).await?)
    }

    /// Issues a request, retrying failures with exponential backoff.
    ///
    /// Attempts are strictly sequential. A transport failure or any non-2xx
    /// status counts as a failed attempt and is retried until the policy's
    /// attempt budget is exhausted; the caller sees only the terminal
    /// outcome. Every non-2xx status is retried, 4xx included, matching the
    /// portal's behavior.
    pub async fn fetch_with_retry(&self, request: &ApiRequest) -> Result<JsonValue> {
        let attempts = self.retry.attempts();
        let mut attempt = 0u32;
        loop {
            let response = self.build_request(request).send().await;

            let failure = match response {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let body = response.text().await.map_err(MediNetError::Transport)?;
                        return serde_json::from_str(&body).map_err(|err| {
                            MediNetError::Decode(format!("invalid response JSON: {err}"))
                        });
                    }

                    let message = match response.text().await {
                        Ok(body) => extract_error_message(&body),
                        Err(_) => FALLBACK_MESSAGE.to_owned(),
                    };

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        tracing::warn!(
                            path = %request.path,
                            delay_ms = self.retry.delay_before(attempt + 1).as_millis() as u64,
                            "rate limit exceeded, backing off"
                        );
                    }

                    MediNetError::Api {
                        status: status.as_u16(),
                        message,
                    }
                }
                Err(err) => MediNetError::Transport(err),
            };

            attempt += 1;
            if attempt >= attempts {
                return Err(failure);
            }

            let delay = self.retry.delay_before(attempt);
            tracing::debug!(
                path = %request.path,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "retrying portal request"
            );
            sleep(delay).await;
        }
    }

    fn build_request(&self, request: &ApiRequest) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.http.request(request.method.clone(), url);
        if request.authenticated {
            builder = builder
                .header(
                    header::AUTHORIZATION,
                    normalize_bearer_authorization(&self.credentials.token),
                )
                .header("X-CSRF-Token", &self.credentials.csrf_token);
        }
        match &request.body {
            Some(Body::Json(value)) => builder = builder.json(value),
            Some(Body::Form(pairs)) => builder = builder.form(pairs),
            None => {}
        }
        builder
    }
}

/// Extracts the portal's `error` field from a failed response body.
///
/// Unparseable bodies, missing fields, non-string fields and empty strings
/// all fall back to the generic message.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<JsonValue>(body)
        .ok()
        .and_then(|value| value.get("error")?.as_str().map(str::to_owned))
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_owned())
}

fn decode_payload<T: DeserializeOwned>(payload: JsonValue) -> Result<T> {
    serde_json::from_value(payload)
        .map_err(|err| MediNetError::Decode(format!("unexpected payload shape: {err}")))
}

fn require_env(name: &str) -> Result<String> {
    let value = std::env::var(name)
        .map_err(|_| MediNetError::Credentials(format!("missing {name} environment variable")))?;
    if value.trim().is_empty() {
        return Err(MediNetError::Credentials(format!("{name} is set but empty")));
    }
    Ok(value)
}

fn normalize_bearer_authorization(token: &str) -> String {
    let trimmed = token.trim();
    let prefix = trimmed.get(..7);
    if prefix.is_some_and(|value| value.eq_ignore_ascii_case("bearer ")) {
        trimmed.to_owned()
    } else {
        format!("Bearer {trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::{
        extract_error_message, normalize_bearer_authorization, MediNetClient, FALLBACK_MESSAGE,
    };
    use crate::{Credentials, Role};

    #[test]
    fn normalize_bearer_adds_prefix_when_missing() {
        assert_eq!(
            normalize_bearer_authorization("abc123"),
            "Bearer abc123".to_owned()
        );
    }

    #[test]
    fn normalize_bearer_keeps_existing_prefix() {
        assert_eq!(
            normalize_bearer_authorization("bEaReR abc123"),
            "bEaReR abc123".to_owned()
        );
    }

    #[test]
    fn extract_error_message_reads_error_field() {
        assert_eq!(
            extract_error_message(r#"{"error": "Service busy"}"#),
            "Service busy"
        );
    }

    #[test]
    fn extract_error_message_falls_back_on_garbage() {
        assert_eq!(extract_error_message("<html>502</html>"), FALLBACK_MESSAGE);
        assert_eq!(extract_error_message(""), FALLBACK_MESSAGE);
    }

    #[test]
    fn extract_error_message_falls_back_on_non_string_or_empty_field() {
        assert_eq!(extract_error_message(r#"{"error": 503}"#), FALLBACK_MESSAGE);
        assert_eq!(extract_error_message(r#"{"error": ""}"#), FALLBACK_MESSAGE);
    }

    #[test]
    fn debug_redacts_credentials() {
        let client = MediNetClient::new(
            "https://portal.example.org",
            Credentials::new("secret-jwt", "secret-csrf", 7, Role::Patient),
        );
        let debug = format!("{client:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret-jwt"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = MediNetClient::new(
            "https://portal.example.org/",
            Credentials::new("jwt", "csrf", 7, Role::Admin),
        );
        let debug = format!("{client:?}");
        assert!(debug.contains("\"https://portal.example.org\""));
    }
}
