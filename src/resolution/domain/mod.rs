pub mod candidate;
pub mod classification;
pub mod graph;
pub mod package_record;
pub mod resolved;
pub mod snapshot;

pub use candidate::{normalize_name, ImportCandidate};
pub use classification::OracleClassification;
pub use graph::{DependencyGraph, GraphEdge, GraphNode};
pub use package_record::PackageRecord;
pub use resolved::{DependencySet, ResolvedDependency};
pub use snapshot::ProjectSnapshot;
