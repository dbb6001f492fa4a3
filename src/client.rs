use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, RequestBuilder, Response, header};
use serde::Deserialize;
use url::Url;

use crate::client_logger::ClientLogger;
use crate::error::{Error, Result};
use crate::observability::{CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS};
use crate::types::{
    ChatReply, ChatRequest, ChatSession, DeleteAllResponse, LoginParams, Message,
    NewSessionResponse, RegisterParams, SessionHistory, SessionListResponse, UserIdentity,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for a parley chat server.
///
/// All requests ride a cookie jar: signing in via [`Backend::login`] stores
/// the session cookie and every subsequent call presents it. There are no
/// bearer tokens.
#[derive(Clone)]
pub struct Backend {
    base_url: Url,
    client: ReqwestClient,
    timeout: Duration,
    logger: Option<Arc<dyn ClientLogger>>,
}

impl Backend {
    /// Create a new backend client.
    ///
    /// The server URL can be provided directly or read from the
    /// PARLEY_SERVER_URL environment variable.
    pub fn new(base_url: Option<String>) -> Result<Self> {
        Self::with_options(base_url, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = match base_url {
            Some(url) => url,
            None => env::var("PARLEY_SERVER_URL").map_err(|_| {
                Error::validation(
                    "server URL not provided and PARLEY_SERVER_URL environment variable not set",
                    Some("base_url".to_string()),
                )
            })?,
        };
        // A trailing slash keeps Url::join from eating the last path segment.
        let base_url = if base_url.ends_with('/') {
            base_url
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&base_url)?;

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            base_url,
            client,
            timeout,
            logger: None,
        })
    }

    /// Attach a logger that observes requests passing through this client.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Returns the server URL this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    fn map_transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::timeout(
                format!("Request timed out: {}", e),
                Some(self.timeout.as_secs_f64()),
            )
        } else if e.is_connect() {
            Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
        } else {
            Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
        }
    }

    /// Process API response errors and convert to our Error type.
    async fn process_error_response(response: Response) -> Error {
        let status = response.status();
        let status_code = status.as_u16();

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|val| val.to_str().ok())
            .and_then(|val| val.parse::<u64>().ok());

        // The server reports errors as {"detail": ...}; older endpoints use
        // {"error": ...}. Checked in that order.
        #[derive(Deserialize)]
        struct ErrorResponse {
            detail: Option<String>,
            error: Option<String>,
        }

        let fallback = format!(
            "HTTP {}: {}",
            status_code,
            status.canonical_reason().unwrap_or("request failed")
        );
        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let parsed = serde_json::from_str::<ErrorResponse>(&error_body).ok();
        let message = parsed
            .and_then(|e| e.detail.or(e.error))
            .unwrap_or(fallback);

        match status_code {
            400 => Error::bad_request(message, None),
            401 => Error::authentication(message),
            403 => Error::permission(message),
            404 => Error::not_found(message, None, None),
            408 => Error::timeout(message, None),
            429 => Error::rate_limit(message, retry_after),
            500 => Error::internal_server(message),
            502..=504 => Error::service_unavailable(message, retry_after),
            _ => Error::api(status_code, message),
        }
    }

    /// Issue a request, record metrics, and surface non-2xx as errors.
    async fn execute(&self, endpoint: &str, builder: RequestBuilder) -> Result<Response> {
        CLIENT_REQUESTS.click();
        let start = Instant::now();
        let outcome = builder
            .headers(self.default_headers())
            .send()
            .await
            .map_err(|e| self.map_transport_error(e));
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());

        let response = match outcome {
            Ok(response) => response,
            Err(err) => {
                CLIENT_REQUEST_ERRORS.click();
                if let Some(logger) = &self.logger {
                    logger.log_failure(endpoint, &err.to_string());
                }
                return Err(err);
            }
        };

        if !response.status().is_success() {
            let err = Self::process_error_response(response).await;
            CLIENT_REQUEST_ERRORS.click();
            if let Some(logger) = &self.logger {
                logger.log_failure(endpoint, &err.to_string());
            }
            return Err(err);
        }

        Ok(response)
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
        response.json::<T>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    /// Probe the identity endpoint.
    ///
    /// Succeeds iff the cookie jar holds a live session.
    pub async fn me(&self) -> Result<UserIdentity> {
        let url = self.endpoint("auth/me")?;
        let response = self.execute("auth/me", self.client.get(url)).await?;
        Self::parse_json(response).await
    }

    /// Sign in. On success the server sets a session cookie on this client.
    pub async fn login(&self, params: &LoginParams) -> Result<()> {
        let url = self.endpoint("auth/login")?;
        let form = [
            ("username", params.username.as_str()),
            ("password", params.password.as_str()),
        ];
        self.execute("auth/login", self.client.post(url).form(&form))
            .await?;
        Ok(())
    }

    /// Create an account. Does not sign in.
    pub async fn register(&self, params: &RegisterParams) -> Result<()> {
        let url = self.endpoint("auth/register")?;
        self.execute("auth/register", self.client.post(url).json(params))
            .await?;
        Ok(())
    }

    /// Invalidate the server-side session. Best-effort callers should
    /// swallow the error.
    pub async fn logout(&self) -> Result<()> {
        let url = self.endpoint("auth/logout")?;
        self.execute("auth/logout", self.client.post(url)).await?;
        Ok(())
    }

    /// Send one chat message and get the reply.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        let url = self.endpoint("chat")?;
        let response = self
            .execute("chat", self.client.post(url).json(request))
            .await?;
        let reply: ChatReply = Self::parse_json(response).await?;
        if let Some(logger) = &self.logger {
            logger.log_chat(request, &reply);
        }
        Ok(reply)
    }

    /// Start a new session and return its id.
    pub async fn new_session(&self) -> Result<String> {
        let url = self.endpoint("chat/new")?;
        let response = self.execute("chat/new", self.client.post(url)).await?;
        let created: NewSessionResponse = Self::parse_json(response).await?;
        Ok(created.session_id)
    }

    /// List sessions in server-defined order.
    pub async fn sessions(&self) -> Result<Vec<ChatSession>> {
        let url = self.endpoint("chat/sessions")?;
        let response = self.execute("chat/sessions", self.client.get(url)).await?;
        let list: SessionListResponse = Self::parse_json(response).await?;
        if let Some(logger) = &self.logger {
            logger.log_sessions(&list.sessions);
        }
        Ok(list.sessions)
    }

    /// Delete one session.
    pub async fn delete_session(&self, session_id: &str) -> Result<()> {
        let url = self.endpoint(&format!("chat/sessions/{session_id}"))?;
        self.execute("chat/sessions/:id", self.client.delete(url))
            .await?;
        Ok(())
    }

    /// Delete every session and return how many were removed.
    pub async fn delete_all_sessions(&self) -> Result<u64> {
        let url = self.endpoint("chat/sessions")?;
        let response = self
            .execute("chat/sessions", self.client.delete(url))
            .await?;
        let deleted: DeleteAllResponse = Self::parse_json(response).await?;
        Ok(deleted.count)
    }

    /// Fetch a session's message history, oldest first.
    pub async fn history(&self, session_id: &str) -> Result<Vec<Message>> {
        let url = self.endpoint(&format!("chat/history/{session_id}"))?;
        let response = self
            .execute("chat/history/:id", self.client.get(url))
            .await?;
        let history: SessionHistory = Self::parse_json(response).await?;
        Ok(history.messages)
    }
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backend")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
