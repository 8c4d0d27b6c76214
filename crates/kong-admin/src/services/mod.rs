// Per-resource façades over `Client`.
//
// Each service borrows the client, checks required references and fields
// locally, and delegates paths, paging and verb fallback to the core.

pub mod acl;
pub mod consumer;
pub mod target;
pub mod upstream;

pub use acl::AclService;
pub use consumer::ConsumerService;
pub use target::TargetService;
pub use upstream::UpstreamService;
