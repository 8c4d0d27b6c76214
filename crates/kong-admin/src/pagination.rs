// Cursor pagination for Admin API list endpoints.
//
// Kong pages with an opaque `offset` token: every list response carries
// `data`, a `next` link (null on the last page) and, while more pages
// remain, the `offset` to send back. The token is never built or
// interpreted locally; it is copied from one response into the next
// request as-is.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::client::Client;
use crate::error::Error;
use crate::reference::ResourcePath;

/// Page size used when a list call is made without a control.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Page size used by `list_all` walks.
pub const LIST_ALL_PAGE_SIZE: u32 = 1000;

/// Largest page the Admin API will serve.
pub const MAX_PAGE_SIZE: u32 = 1000;

// ── ListOpt ──────────────────────────────────────────────────────────

/// Controls one list call: page size, tag filter, and the continuation
/// token from the previous page.
///
/// Build the first one with [`ListOpt::with_size`]; every later one comes
/// back from the server in [`Page::next`]. Size and tags may be changed
/// between pages, the token may not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOpt {
    pub size: u32,
    /// Only return entities carrying these tags.
    pub tags: Vec<String>,
    /// `true`: entity must carry every tag. `false`: any one of them.
    pub match_all_tags: bool,
    offset: Option<String>,
}

impl Default for ListOpt {
    fn default() -> Self {
        Self::with_size(DEFAULT_PAGE_SIZE)
    }
}

impl ListOpt {
    pub fn with_size(size: u32) -> Self {
        Self {
            size,
            tags: Vec::new(),
            match_all_tags: false,
            offset: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I, match_all: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self.match_all_tags = match_all;
        self
    }

    /// The server's continuation token, if this control came from a page.
    pub fn offset(&self) -> Option<&str> {
        self.offset.as_deref()
    }

    fn query(&self) -> Result<Vec<(&'static str, String)>, Error> {
        if self.size == 0 {
            return Err(Error::InvalidInput {
                field: "size",
                reason: "must be greater than zero",
            });
        }
        let size = if self.size > MAX_PAGE_SIZE {
            debug!(requested = self.size, max = MAX_PAGE_SIZE, "clamping page size");
            MAX_PAGE_SIZE
        } else {
            self.size
        };

        let mut params = vec![("size", size.to_string())];
        if let Some(offset) = &self.offset {
            params.push(("offset", offset.clone()));
        }
        if !self.tags.is_empty() {
            let sep = if self.match_all_tags { "," } else { "/" };
            params.push(("tags", self.tags.join(sep)));
        }
        Ok(params)
    }

    /// Same preferences, positioned at `offset`.
    fn advance(&self, offset: String) -> Self {
        Self {
            offset: Some(offset),
            ..self.clone()
        }
    }
}

// ── Page ─────────────────────────────────────────────────────────────

/// One page of a list response.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub data: Vec<T>,
    /// Control for the following page; `None` on the last page.
    pub next: Option<ListOpt>,
}

/// Wire shape of a list response.
#[derive(Deserialize)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
    #[serde(default)]
    next: Option<String>,
    #[serde(default)]
    offset: Option<String>,
}

/// Pull the continuation token out of a list response.
///
/// `next` decides whether another page exists. The token is the
/// top-level `offset` when present, otherwise the `offset` query
/// parameter embedded in the `next` link.
fn continuation(
    base: &Url,
    next: Option<&str>,
    offset: Option<String>,
) -> Result<Option<String>, Error> {
    let Some(next) = next.filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    if let Some(offset) = offset.filter(|o| !o.is_empty()) {
        return Ok(Some(offset));
    }

    let link = base.join(next)?;
    link.query_pairs()
        .find(|(key, _)| key == "offset")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .map(Some)
        .ok_or_else(|| Error::Deserialization {
            message: "next page link carries no offset".into(),
            body: next.to_owned(),
        })
}

// ── Client integration ───────────────────────────────────────────────

impl Client {
    /// Fetch exactly one page of `path`.
    ///
    /// `opt = None` requests the first page at [`DEFAULT_PAGE_SIZE`].
    pub async fn list_page<T: DeserializeOwned>(
        &self,
        path: &ResourcePath,
        opt: Option<&ListOpt>,
    ) -> Result<Page<T>, Error> {
        let opt = opt.cloned().unwrap_or_default();
        let params = opt.query()?;
        let resp: ListResponse<T> = self.get_with_params(path, &params).await?;
        let next = continuation(self.base_url(), resp.next.as_deref(), resp.offset)?
            .map(|offset| opt.advance(offset));

        Ok(Page {
            data: resp.data,
            next,
        })
    }

    /// Walk every page of `path` in order and return all entities.
    ///
    /// Pages are fetched one after another, since each request needs the
    /// previous page's token. Any error aborts the walk and nothing
    /// collected so far is returned.
    pub async fn list_all<T: DeserializeOwned>(
        &self,
        path: &ResourcePath,
    ) -> Result<Vec<T>, Error> {
        let mut all = Vec::new();
        let mut opt = Some(ListOpt::with_size(LIST_ALL_PAGE_SIZE));
        let mut pages = 0_usize;

        while let Some(current) = opt {
            let page = self.list_page::<T>(path, Some(&current)).await?;
            pages += 1;
            trace!(%path, pages, fetched = page.data.len(), "fetched page");
            all.extend(page.data);
            opt = page.next;
        }

        debug!(%path, pages, total = all.len(), "listed all entities");
        Ok(all)
    }
}
