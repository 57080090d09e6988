pub mod resolve_request;
pub mod resolve_response;

pub use resolve_request::ResolveRequest;
pub use resolve_response::{ResolveOutcome, ResolveResponse};
