// kong-admin: Async Rust client for the Kong Admin API

pub mod client;
pub mod error;
pub mod models;
pub mod negotiate;
pub mod pagination;
pub mod reference;
pub mod services;
pub mod transport;

pub use client::Client;
pub use error::Error;
pub use models::{AclGroup, Consumer, ForeignKey, Target, Upstream};
pub use negotiate::MethodFallback;
pub use pagination::{DEFAULT_PAGE_SIZE, LIST_ALL_PAGE_SIZE, ListOpt, MAX_PAGE_SIZE, Page};
pub use reference::{NameOrId, ResourcePath};
pub use transport::{TlsMode, TransportConfig};

// Re-exported so callers can build a cancellation context and custom
// requests without depending on these crates directly.
pub use reqwest::Method;
pub use tokio_util::sync::CancellationToken;
