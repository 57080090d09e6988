use crate::resolution::services::version;

/// A dependency that passed oracle classification and registry
/// verification.
///
/// `update_available` is always derivable from `registry_version` and
/// `pinned_version` via the version comparator; it is stored for
/// convenience but recomputing it must reproduce the same boolean.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDependency {
    pub name: String,
    pub is_dev: bool,
    pub pinned_version: Option<String>,
    pub registry_version: Option<String>,
    pub update_available: bool,
    pub is_valid: bool,
    pub description: String,
}

impl ResolvedDependency {
    /// Recomputes the update flag from the two version strings.
    pub fn compute_update_available(&self) -> bool {
        match (&self.registry_version, &self.pinned_version) {
            (Some(latest), Some(pinned)) => version::is_newer(latest, pinned),
            _ => false,
        }
    }
}

/// The resolved dependency collection, partitioned into production and
/// development groups.
#[derive(Debug, Clone, Default)]
pub struct DependencySet {
    prod: Vec<ResolvedDependency>,
    dev: Vec<ResolvedDependency>,
}

impl DependencySet {
    pub fn new(dependencies: Vec<ResolvedDependency>) -> Self {
        let (dev, prod) = dependencies.into_iter().partition(|d| d.is_dev);
        Self { prod, dev }
    }

    pub fn production(&self) -> &[ResolvedDependency] {
        &self.prod
    }

    pub fn development(&self) -> &[ResolvedDependency] {
        &self.dev
    }

    pub fn len(&self) -> usize {
        self.prod.len() + self.dev.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prod.is_empty() && self.dev.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedDependency> {
        self.prod.iter().chain(self.dev.iter())
    }

    pub fn get(&self, name: &str) -> Option<&ResolvedDependency> {
        self.iter().find(|d| d.name == name)
    }

    /// Moves a dependency between the production and development
    /// partitions, preserving all other fields. Returns false if no
    /// dependency with that name exists or it is already in the
    /// requested partition.
    pub fn reclassify(&mut self, name: &str, is_dev: bool) -> bool {
        let (source, dest) = if is_dev {
            (&mut self.prod, &mut self.dev)
        } else {
            (&mut self.dev, &mut self.prod)
        };

        if let Some(index) = source.iter().position(|d| d.name == name) {
            let mut dep = source.remove(index);
            dep.is_dev = is_dev;
            dest.push(dep);
            return true;
        }
        false
    }

    /// Accepts every available update: pins each flagged dependency to
    /// its registry version and clears the flag. Returns the number of
    /// dependencies updated.
    pub fn accept_all_updates(&mut self) -> usize {
        let mut updated = 0;
        for dep in self.prod.iter_mut().chain(self.dev.iter_mut()) {
            if dep.update_available {
                if let Some(latest) = dep.registry_version.clone() {
                    dep.pinned_version = Some(latest);
                    dep.update_available = false;
                    updated += 1;
                }
            }
        }
        updated
    }
}
