pub mod oracle;
pub mod presenter;
pub mod progress;
pub mod registry;
pub mod scanner;

pub use oracle::{NameOracle, OracleRequest};
pub use presenter::OutputPresenter;
pub use progress::ProgressReporter;
pub use registry::PackageRegistry;
pub use scanner::ProjectScanner;
