pub mod cancellation;
pub mod error;
pub mod result;

pub use cancellation::CancellationToken;
pub use error::{ExitCode, ResolveError};
pub use result::Result;
