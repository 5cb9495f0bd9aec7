use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::ApiError;
use super::notify::{Notifier, TracingNotifier};

#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Whole-request timeout; `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

/// JSON client for the backend. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.base.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(base_url: &str, options: &ClientOptions) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let mut builder = Client::builder().user_agent(Self::user_agent());
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            base,
            notifier: Arc::new(TracingNotifier),
        })
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn user_agent() -> &'static str {
        concat!("kusi-cli/", env!("CARGO_PKG_VERSION"))
    }

    /// Resolves a server-relative route against the base endpoint.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.reported(self.url(path))?;
        self.send(Method::GET, path, self.client.get(url)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.reported(self.url(path))?;
        self.send(Method::POST, path, self.client.post(url).json(body))
            .await
    }

    /// POST with scalar arguments carried in the query string.
    pub async fn post_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let mut url = self.reported(self.url(path))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        self.send(Method::POST, path, self.client.post(url)).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        debug!(%method, path, "Sending backend request");
        let result = Self::exchange(request).await;
        if let Err(err) = &result {
            counter!("kusi_api_request_failed_total", "kind" => kind_label(err)).increment(1);
            debug!(%method, path, error = %err, "Backend request failed");
        }
        self.reported(result)
    }

    async fn exchange<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let resp = request.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode {
            message: err.to_string(),
        })
    }

    /// Tells the notifier about a failure before handing it back.
    fn reported<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(err) = &result {
            self.notifier.notify(&err.user_message());
        }
        result
    }
}

fn kind_label(err: &ApiError) -> &'static str {
    match err.kind() {
        super::ApiErrorKind::Network => "network",
        super::ApiErrorKind::HttpStatus => "http_status",
        super::ApiErrorKind::Decode => "decode",
        super::ApiErrorKind::Url => "url",
    }
}
