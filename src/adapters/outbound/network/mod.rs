pub mod caching_registry;
pub mod gemini_oracle;
pub mod pypi_client;

pub use caching_registry::CachingRegistry;
pub use gemini_oracle::GeminiOracle;
pub use pypi_client::PyPiRegistry;
