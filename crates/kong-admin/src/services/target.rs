// Target endpoints
//
// Targets live under an upstream (`/upstreams/{upstream}/targets`) and are
// addressable by id or by their `host:port` address. Creation goes through
// the POST -> PUT fallback because Kong 3.0 dropped POST here.

use tracing::debug;

use crate::client::Client;
use crate::error::Error;
use crate::models::Target;
use crate::negotiate::MethodFallback;
use crate::pagination::{ListOpt, Page};
use crate::reference::{NameOrId, ResourcePath, require_field};

/// Load-balancer targets bound to upstreams.
#[derive(Debug, Clone, Copy)]
pub struct TargetService<'a> {
    client: &'a Client,
}

impl Client {
    pub fn targets(&self) -> TargetService<'_> {
        TargetService { client: self }
    }
}

fn upstream_targets(upstream: &NameOrId) -> Result<ResourcePath, Error> {
    ResourcePath::scoped("upstreams", "upstream", upstream, "targets")
}

/// Reference for an existing target: its id, else its address.
fn target_ref(target: &Target) -> Result<NameOrId, Error> {
    if let Some(id) = target.id {
        return Ok(id.into());
    }
    match target.target.as_deref() {
        Some(address) if !address.is_empty() => Ok(address.into()),
        _ => Err(Error::InvalidInput {
            field: "target",
            reason: "needs an id or a target address",
        }),
    }
}

impl TargetService<'_> {
    /// Create `target` under `upstream`.
    ///
    /// `POST /upstreams/{upstream}/targets`, repeated as `PUT` when the
    /// gateway answers 405. `target.target` is required. A set `id` is
    /// sent in the body and used by the gateway.
    pub async fn create(&self, upstream: &NameOrId, target: &Target) -> Result<Target, Error> {
        let path = upstream_targets(upstream)?;
        let address = require_field("target", target.target.as_deref())?;
        debug!(%upstream, address, "creating target");
        self.client
            .write_with_fallback(&MethodFallback::post_then_put(), &path, Some(target))
            .await
    }

    /// `GET /upstreams/{upstream}/targets/{target_or_id}`
    pub async fn get(&self, upstream: &NameOrId, target_or_id: &NameOrId) -> Result<Target, Error> {
        let path = upstream_targets(upstream)?.entity("target or id", target_or_id)?;
        self.client.get(&path).await
    }

    /// Patch the fields set on `target`, addressed by its id or, failing
    /// that, its address.
    pub async fn update(&self, upstream: &NameOrId, target: &Target) -> Result<Target, Error> {
        let path = upstream_targets(upstream)?;
        let reference = target_ref(target)?;
        debug!(%upstream, %reference, "updating target");
        self.client
            .patch(&path.entity("target or id", &reference)?, target)
            .await
    }

    /// `DELETE /upstreams/{upstream}/targets/{target_or_id}`
    pub async fn delete(&self, upstream: &NameOrId, target_or_id: &NameOrId) -> Result<(), Error> {
        let path = upstream_targets(upstream)?.entity("target or id", target_or_id)?;
        debug!(%upstream, %target_or_id, "deleting target");
        self.client.delete(&path).await
    }

    /// One page of `upstream`'s targets.
    pub async fn list(
        &self,
        upstream: &NameOrId,
        opt: Option<&ListOpt>,
    ) -> Result<Page<Target>, Error> {
        let path = upstream_targets(upstream)?;
        self.client.list_page(&path, opt).await
    }

    /// Every target of `upstream`.
    pub async fn list_all(&self, upstream: &NameOrId) -> Result<Vec<Target>, Error> {
        let path = upstream_targets(upstream)?;
        self.client.list_all(&path).await
    }

    /// Mark `target` healthy in the upstream's load balancer.
    ///
    /// Like every target call, an empty `upstream` is reported before a
    /// target with neither id nor address.
    ///
    /// `POST /upstreams/{upstream}/targets/{id-or-address}/healthy`
    pub async fn mark_healthy(&self, upstream: &NameOrId, target: &Target) -> Result<(), Error> {
        self.set_health(upstream, target, "healthy").await
    }

    /// Mark `target` unhealthy in the upstream's load balancer.
    ///
    /// `POST /upstreams/{upstream}/targets/{id-or-address}/unhealthy`
    pub async fn mark_unhealthy(&self, upstream: &NameOrId, target: &Target) -> Result<(), Error> {
        self.set_health(upstream, target, "unhealthy").await
    }

    async fn set_health(
        &self,
        upstream: &NameOrId,
        target: &Target,
        state: &'static str,
    ) -> Result<(), Error> {
        let path = upstream_targets(upstream)?;
        let reference = target_ref(target)?;
        let path = path.entity("target or id", &reference)?.action(state);
        debug!(%upstream, %reference, state, "setting target health");
        self.client.post_no_body(&path).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn target_ref_prefers_id() {
        let id = Uuid::new_v4();
        let target = Target {
            id: Some(id),
            target: Some("10.0.0.1:80".into()),
            ..Target::default()
        };
        assert_eq!(target_ref(&target).unwrap(), NameOrId::from(id));
    }

    #[test]
    fn target_ref_falls_back_to_address() {
        let target = Target {
            target: Some("10.0.0.1:80".into()),
            ..Target::default()
        };
        assert_eq!(target_ref(&target).unwrap().as_str(), "10.0.0.1:80");
    }

    #[test]
    fn target_ref_needs_one_of_them() {
        let target = Target {
            target: Some(String::new()),
            ..Target::default()
        };
        assert!(target_ref(&target).unwrap_err().is_invalid_input());
    }
}
