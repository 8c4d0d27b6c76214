// ACL group endpoints
//
// ACL memberships live under a consumer (`/consumers/{consumer}/acls`).
// The global `/acls` collection is list-only.

use tracing::debug;

use crate::client::Client;
use crate::error::Error;
use crate::models::AclGroup;
use crate::pagination::{ListOpt, Page};
use crate::reference::{NameOrId, ResourcePath, require_field};

/// ACL groups bound to consumers.
#[derive(Debug, Clone, Copy)]
pub struct AclService<'a> {
    client: &'a Client,
}

impl Client {
    pub fn acls(&self) -> AclService<'_> {
        AclService { client: self }
    }
}

fn consumer_acls(consumer: &NameOrId) -> Result<ResourcePath, Error> {
    ResourcePath::scoped("consumers", "consumer", consumer, "acls")
}

impl AclService<'_> {
    /// Add `acl` to `consumer`.
    ///
    /// `PUT /consumers/{consumer}/acls/{id}` when `acl.id` is set,
    /// otherwise `POST /consumers/{consumer}/acls`. `group` is required.
    pub async fn create(&self, consumer: &NameOrId, acl: &AclGroup) -> Result<AclGroup, Error> {
        let path = consumer_acls(consumer)?;
        let group = require_field("group", acl.group.as_deref())?;
        debug!(%consumer, group, "creating ACL group");

        match acl.id {
            Some(id) => self.client.put(&path.entity("acl id", &id.into())?, acl).await,
            None => self.client.post(&path, acl).await,
        }
    }

    /// `GET /consumers/{consumer}/acls/{group_or_id}`
    pub async fn get(
        &self,
        consumer: &NameOrId,
        group_or_id: &NameOrId,
    ) -> Result<AclGroup, Error> {
        let path = consumer_acls(consumer)?.entity("ACL group or id", group_or_id)?;
        self.client.get(&path).await
    }

    /// Patch the fields set on `acl`.
    ///
    /// `PATCH /consumers/{consumer}/acls/{id}`; `acl.id` is required.
    pub async fn update(&self, consumer: &NameOrId, acl: &AclGroup) -> Result<AclGroup, Error> {
        let path = consumer_acls(consumer)?;
        let id = acl.id.ok_or_else(|| Error::empty("acl id"))?;
        debug!(%consumer, %id, "updating ACL group");
        self.client.patch(&path.entity("acl id", &id.into())?, acl).await
    }

    /// `DELETE /consumers/{consumer}/acls/{group_or_id}`
    pub async fn delete(&self, consumer: &NameOrId, group_or_id: &NameOrId) -> Result<(), Error> {
        let path = consumer_acls(consumer)?.entity("ACL group or id", group_or_id)?;
        debug!(%consumer, %group_or_id, "deleting ACL group");
        self.client.delete(&path).await
    }

    /// One page of every ACL group across all consumers (`GET /acls`).
    pub async fn list(&self, opt: Option<&ListOpt>) -> Result<Page<AclGroup>, Error> {
        self.client
            .list_page(&ResourcePath::collection("acls"), opt)
            .await
    }

    /// One page of `consumer`'s ACL groups.
    pub async fn list_for_consumer(
        &self,
        consumer: &NameOrId,
        opt: Option<&ListOpt>,
    ) -> Result<Page<AclGroup>, Error> {
        let path = consumer_acls(consumer)?;
        self.client.list_page(&path, opt).await
    }

    /// Every ACL group across all consumers.
    pub async fn list_all(&self) -> Result<Vec<AclGroup>, Error> {
        self.client.list_all(&ResourcePath::collection("acls")).await
    }

    /// Every ACL group of `consumer`.
    pub async fn list_all_for_consumer(
        &self,
        consumer: &NameOrId,
    ) -> Result<Vec<AclGroup>, Error> {
        let path = consumer_acls(consumer)?;
        self.client.list_all(&path).await
    }
}
