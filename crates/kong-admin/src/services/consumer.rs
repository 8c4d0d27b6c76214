// Consumer endpoints (`/consumers`)

use tracing::debug;

use crate::client::Client;
use crate::error::Error;
use crate::models::Consumer;
use crate::pagination::{ListOpt, Page};
use crate::reference::{NameOrId, ResourcePath};

/// Consumers, the parents of ACL groups and credentials.
#[derive(Debug, Clone, Copy)]
pub struct ConsumerService<'a> {
    client: &'a Client,
}

impl Client {
    pub fn consumers(&self) -> ConsumerService<'_> {
        ConsumerService { client: self }
    }
}

fn consumers() -> ResourcePath {
    ResourcePath::collection("consumers")
}

impl ConsumerService<'_> {
    /// `PUT /consumers/{id}` when `consumer.id` is set, otherwise
    /// `POST /consumers`. Needs a `username` or a `custom_id`.
    pub async fn create(&self, consumer: &Consumer) -> Result<Consumer, Error> {
        let has_name = [&consumer.username, &consumer.custom_id]
            .iter()
            .any(|v| v.as_deref().is_some_and(|s| !s.is_empty()));
        if !has_name {
            return Err(Error::InvalidInput {
                field: "consumer",
                reason: "needs a username or custom_id",
            });
        }
        debug!(username = ?consumer.username, "creating consumer");

        match consumer.id {
            Some(id) => {
                let path = consumers().entity("consumer id", &id.into())?;
                self.client.put(&path, consumer).await
            }
            None => self.client.post(&consumers(), consumer).await,
        }
    }

    /// `GET /consumers/{username_or_id}`
    pub async fn get(&self, username_or_id: &NameOrId) -> Result<Consumer, Error> {
        let path = consumers().entity("consumer username or id", username_or_id)?;
        self.client.get(&path).await
    }

    /// `PATCH /consumers/{id}`; `consumer.id` is required.
    pub async fn update(&self, consumer: &Consumer) -> Result<Consumer, Error> {
        let id = consumer.id.ok_or_else(|| Error::empty("consumer id"))?;
        let path = consumers().entity("consumer id", &id.into())?;
        debug!(%id, "updating consumer");
        self.client.patch(&path, consumer).await
    }

    /// `DELETE /consumers/{username_or_id}`
    pub async fn delete(&self, username_or_id: &NameOrId) -> Result<(), Error> {
        let path = consumers().entity("consumer username or id", username_or_id)?;
        debug!(%username_or_id, "deleting consumer");
        self.client.delete(&path).await
    }

    pub async fn list(&self, opt: Option<&ListOpt>) -> Result<Page<Consumer>, Error> {
        self.client.list_page(&consumers(), opt).await
    }

    pub async fn list_all(&self) -> Result<Vec<Consumer>, Error> {
        self.client.list_all(&consumers()).await
    }
}
