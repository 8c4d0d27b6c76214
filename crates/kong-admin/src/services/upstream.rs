// Upstream endpoints (`/upstreams`)

use tracing::debug;

use crate::client::Client;
use crate::error::Error;
use crate::models::Upstream;
use crate::pagination::{ListOpt, Page};
use crate::reference::{NameOrId, ResourcePath, require_field};

/// Upstreams, the parents of targets.
#[derive(Debug, Clone, Copy)]
pub struct UpstreamService<'a> {
    client: &'a Client,
}

impl Client {
    pub fn upstreams(&self) -> UpstreamService<'_> {
        UpstreamService { client: self }
    }
}

fn upstreams() -> ResourcePath {
    ResourcePath::collection("upstreams")
}

impl UpstreamService<'_> {
    /// `PUT /upstreams/{id}` when `upstream.id` is set, otherwise
    /// `POST /upstreams`. `name` is required.
    pub async fn create(&self, upstream: &Upstream) -> Result<Upstream, Error> {
        let name = require_field("upstream name", upstream.name.as_deref())?;
        debug!(name, "creating upstream");

        match upstream.id {
            Some(id) => {
                let path = upstreams().entity("upstream id", &id.into())?;
                self.client.put(&path, upstream).await
            }
            None => self.client.post(&upstreams(), upstream).await,
        }
    }

    /// `GET /upstreams/{name_or_id}`
    pub async fn get(&self, name_or_id: &NameOrId) -> Result<Upstream, Error> {
        let path = upstreams().entity("upstream name or id", name_or_id)?;
        self.client.get(&path).await
    }

    /// `PATCH /upstreams/{id}`; `upstream.id` is required.
    pub async fn update(&self, upstream: &Upstream) -> Result<Upstream, Error> {
        let id = upstream.id.ok_or_else(|| Error::empty("upstream id"))?;
        let path = upstreams().entity("upstream id", &id.into())?;
        debug!(%id, "updating upstream");
        self.client.patch(&path, upstream).await
    }

    /// `DELETE /upstreams/{name_or_id}`
    pub async fn delete(&self, name_or_id: &NameOrId) -> Result<(), Error> {
        let path = upstreams().entity("upstream name or id", name_or_id)?;
        debug!(%name_or_id, "deleting upstream");
        self.client.delete(&path).await
    }

    pub async fn list(&self, opt: Option<&ListOpt>) -> Result<Page<Upstream>, Error> {
        self.client.list_page(&upstreams(), opt).await
    }

    pub async fn list_all(&self) -> Result<Vec<Upstream>, Error> {
        self.client.list_all(&upstreams()).await
    }
}
