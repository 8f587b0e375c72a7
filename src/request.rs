use reqwest::Method;
use serde_json::Value as JsonValue;

/// Request body container.
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    /// JSON document, sent with `Content-Type: application/json`.
    Json(JsonValue),
    /// URL-encoded form pairs, as the login page submits them.
    Form(Vec<(String, String)>),
}

/// Single portal request, immutable once issued.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the portal base URL, e.g. `/api/telemedicine/chat`.
    pub path: String,
    /// Optional request body.
    pub body: Option<Body>,
    /// Whether the bearer and CSRF headers are attached. Everything except
    /// the login request is authenticated.
    pub authenticated: bool,
}

impl ApiRequest {
    /// Creates a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
            authenticated: true,
        }
    }

    /// Creates a POST request with a JSON body.
    pub fn post_json(path: impl Into<String>, body: JsonValue) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: Some(Body::Json(body)),
            authenticated: true,
        }
    }

    /// Creates a POST request with a URL-encoded form body.
    pub fn post_form<I, K, V>(path: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            method: Method::POST,
            path: path.into(),
            body: Some(Body::Form(
                pairs
                    .into_iter()
                    .map(|(key, value)| (key.into(), value.into()))
                    .collect(),
            )),
            authenticated: true,
        }
    }

    /// Marks the request as carrying no auth headers.
    pub fn unauthenticated(mut self) -> Self {
        self.authenticated = false;
        self
    }
}
