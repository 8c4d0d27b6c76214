// Async HTTP client for the Kong Admin API.
//
// Owns the reqwest::Client (and therefore the connection pool), the admin
// base URL, and a cancellation token. Resource services borrow it; the
// pagination and method-fallback layers are inherent methods in their own
// modules.

use std::future::Future;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::reference::ResourcePath;
use crate::transport::TransportConfig;

const BODY_PREVIEW_CHARS: usize = 200;

// ── Error response shape from the Admin API ──────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Kong Admin API.
///
/// Cheap to clone; clones share the connection pool. No per-call state is
/// kept between requests, so one instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    cancel: CancellationToken,
}

impl Client {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an admin API root (e.g. `http://localhost:8001`) and a
    /// transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    ///
    /// A path on the base URL, such as a workspace prefix, is kept and
    /// every resource path is appended below it.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        Ok(Self {
            http,
            base_url,
            cancel: CancellationToken::new(),
        })
    }

    /// A clone of this client whose requests abort once `token` is
    /// cancelled, returning [`Error::Cancelled`].
    ///
    /// Cancelling between pages of a `list_all` stops the walk and drops
    /// whatever was already collected.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            cancel: token,
        }
    }

    /// The admin API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append `path`'s segments to the base URL, encoding each one.
    pub(crate) fn url(&self, path: &ResourcePath) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase)
            })?;
            segments.pop_if_empty().extend(path.segments());
        }
        Ok(url)
    }

    // ── Cancellation ─────────────────────────────────────────────────

    /// Race `fut` against the cancellation token. The token is checked
    /// first, so an already-cancelled client never polls `fut`.
    pub(crate) async fn cancellable<F: Future>(&self, fut: F) -> Result<F::Output, Error> {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(Error::Cancelled),
            out = fut => Ok(out),
        }
    }

    // ── Request execution ────────────────────────────────────────────

    /// Issue one request and return the response if its status is 2xx.
    async fn send<B>(
        &self,
        method: Method,
        path: &ResourcePath,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<reqwest::Response, Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.url(path)?;
        if query.is_empty() {
            debug!("{method} {url}");
        } else {
            debug!("{method} {url} params={query:?}");
        }

        let mut builder = self.http.request(method, url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let resp = self.cancellable(builder.send()).await??;
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    /// Issue one request and decode the JSON response body into `T`.
    ///
    /// This is the uniform entry point for resource services not covered
    /// by this crate.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &ResourcePath,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        let resp = self.send(method, path, query, body).await?;
        self.decode(resp).await
    }

    /// Issue one request and discard the (usually empty) response body.
    ///
    /// The body is still read to the end so the connection can go back to
    /// the pool.
    pub async fn request_empty<B>(
        &self,
        method: Method,
        path: &ResourcePath,
        body: Option<&B>,
    ) -> Result<(), Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        let resp = self.send(method, path, &[], body).await?;
        self.cancellable(resp.bytes()).await??;
        Ok(())
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &ResourcePath) -> Result<T, Error> {
        self.request::<T, ()>(Method::GET, path, &[], None).await
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &ResourcePath,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        self.request::<T, ()>(Method::GET, path, params, None).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &ResourcePath,
        body: &B,
    ) -> Result<T, Error> {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    pub(crate) async fn post_no_body(&self, path: &ResourcePath) -> Result<(), Error> {
        self.request_empty::<()>(Method::POST, path, None).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &ResourcePath,
        body: &B,
    ) -> Result<T, Error> {
        self.request(Method::PUT, path, &[], Some(body)).await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &ResourcePath,
        body: &B,
    ) -> Result<T, Error> {
        self.request(Method::PATCH, path, &[], Some(body)).await
    }

    pub(crate) async fn delete(&self, path: &ResourcePath) -> Result<(), Error> {
        self.request_empty::<()>(Method::DELETE, path, None).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn decode<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, Error> {
        let body = self.cancellable(resp.text()).await??;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = match self.cancellable(resp.text()).await {
            Ok(text) => text.unwrap_or_default(),
            Err(cancelled) => return cancelled,
        };
        debug!(status = status.as_u16(), "admin API returned an error");

        let parsed = serde_json::from_str::<ErrorResponse>(&raw).ok();
        let (message, name) = match parsed {
            Some(err) => (err.message, err.name),
            None => (None, None),
        };

        Error::Api {
            status: status.as_u16(),
            message: message.unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw.chars().take(BODY_PREVIEW_CHARS).collect()
                }
            }),
            name,
            body: raw,
        }
    }
}
