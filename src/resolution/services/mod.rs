pub mod extractor;
pub mod graph_builder;
pub mod merger;
pub mod requirements;
pub mod version;

pub use extractor::{is_standard_lib, ImportExtractor};
pub use graph_builder::TransitiveGraphBuilder;
pub use merger::DependencyMerger;
