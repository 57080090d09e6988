pub mod project_scanner;
pub mod requirements_writer;

pub use project_scanner::FileSystemScanner;
pub use requirements_writer::{FileSystemWriter, StdoutPresenter};
