// Verb fallback for endpoints that moved between HTTP methods.
//
// Kong 3.0 stopped accepting POST on some create endpoints (targets) in
// favor of PUT. Writes against those endpoints try the old verb first and,
// only on 405 Method Not Allowed, repeat the identical request once with
// the new verb.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::Client;
use crate::error::Error;
use crate::reference::ResourcePath;

/// The verb to try first and the verb to use if it is rejected with 405.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodFallback {
    pub primary: Method,
    pub fallback: Method,
}

impl MethodFallback {
    pub fn new(primary: Method, fallback: Method) -> Self {
        Self { primary, fallback }
    }

    /// `POST`, then `PUT`.
    pub fn post_then_put() -> Self {
        Self::new(Method::POST, Method::PUT)
    }
}

impl Client {
    /// Send a write with `methods.primary`; if, and only if, that returns
    /// 405, send the same path and body once more with `methods.fallback`.
    ///
    /// At most two requests are made. When the fallback fails too, its
    /// error is returned. Any other failure of the first attempt is
    /// returned as-is.
    pub async fn write_with_fallback<T, B>(
        &self,
        methods: &MethodFallback,
        path: &ResourcePath,
        body: Option<&B>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        match self.request(methods.primary.clone(), path, &[], body).await {
            Err(err) if err.is_method_not_allowed() => {
                debug!(
                    %path,
                    primary = %methods.primary,
                    fallback = %methods.fallback,
                    "method not allowed, retrying with fallback verb"
                );
                self.request(methods.fallback.clone(), path, &[], body).await
            }
            result => result,
        }
    }
}
