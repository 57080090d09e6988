use crate::ports::outbound::PackageRegistry;
use crate::resolution::domain::{normalize_name, PackageRecord};
use crate::resolution::services::version;
use crate::shared::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://pypi.org/pypi";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct PyPiDocument {
    info: PyPiInfo,
    #[serde(default)]
    releases: HashMap<String, Vec<PyPiReleaseFile>>,
}

#[derive(Debug, Deserialize)]
struct PyPiInfo {
    name: String,
    version: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    license: Option<String>,
    #[serde(default)]
    home_page: Option<String>,
    #[serde(default)]
    project_urls: Option<HashMap<String, Option<String>>>,
    #[serde(default)]
    requires_dist: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct PyPiReleaseFile {
    #[serde(default)]
    requires_dist: Option<Vec<String>>,
}

/// PyPiRegistry adapter for fetching release metadata from the PyPI
/// JSON API.
///
/// The adapter never returns an error: any transport failure, non-2xx
/// status or malformed body degrades to `None`, which upstream caching
/// turns into a confirmed-negative entry.
pub struct PyPiRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl PyPiRegistry {
    /// Creates a registry client against the public PyPI API.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a registry client against a custom base URL, e.g. a
    /// mirror or a test server.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let user_agent = format!("depure/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Rejects names that could break out of the URL path.
    fn is_safe_url_component(component: &str) -> bool {
        !component.contains('/')
            && !component.contains('\\')
            && !component.contains("..")
            && !component.contains('#')
            && !component.contains('?')
            && !component.contains('@')
    }

    async fn fetch_document(&self, canonical_name: &str) -> Option<PyPiDocument> {
        if !Self::is_safe_url_component(canonical_name) {
            return None;
        }

        let url = format!(
            "{}/{}/json",
            self.base_url,
            urlencoding::encode(canonical_name)
        );

        let response = self.client.get(&url).send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }
        response.json().await.ok()
    }
}

/// Picks the latest version: the highest version-sorted entry among
/// coercible release keys, falling back to the registry's
/// self-reported current version.
fn select_latest_version(document: &PyPiDocument) -> String {
    document
        .releases
        .keys()
        .filter_map(|key| version::coerce(key).map(|coerced| (coerced, key)))
        .max()
        .map(|(_, key)| key.clone())
        .unwrap_or_else(|| document.info.version.clone())
}

/// Strips extras (`[...]`), environment markers and version
/// specifiers from a `requires_dist` entry, keeping only the bare,
/// normalized dependency name.
fn clean_requirement_name(raw: &str) -> Option<String> {
    let cut = raw
        .find([';', '[', '=', '<', '>', '!', '~', '(', ' '])
        .unwrap_or(raw.len());
    let name = normalize_name(&raw[..cut]);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Converts a PyPI metadata document into a PackageRecord.
///
/// Requirement names come from the latest release's `requires_dist`
/// when present, otherwise from the top-level `info.requires_dist`.
fn build_record(document: &PyPiDocument) -> PackageRecord {
    let latest_version = select_latest_version(document);

    let release_requirements = document
        .releases
        .get(&latest_version)
        .and_then(|files| files.first())
        .and_then(|file| file.requires_dist.as_ref());
    let raw_requirements = release_requirements
        .or(document.info.requires_dist.as_ref())
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let mut requirement_names = Vec::new();
    for raw in raw_requirements {
        if let Some(name) = clean_requirement_name(raw) {
            if !requirement_names.contains(&name) {
                requirement_names.push(name);
            }
        }
    }

    let homepage = document
        .info
        .home_page
        .clone()
        .filter(|url| !url.is_empty())
        .or_else(|| {
            let urls = document.info.project_urls.as_ref()?;
            urls.get("Homepage")
                .or_else(|| urls.get("Source Code"))
                .cloned()
                .flatten()
        });

    PackageRecord {
        canonical_name: normalize_name(&document.info.name),
        latest_version,
        summary: document.info.summary.clone(),
        license: document.info.license.clone(),
        homepage,
        requirement_names,
        fetched_at: Utc::now(),
    }
}

#[async_trait]
impl PackageRegistry for PyPiRegistry {
    async fn lookup(&self, name: &str) -> Option<PackageRecord> {
        let canonical_name = normalize_name(name);
        if canonical_name.is_empty() {
            return None;
        }
        let document = self.fetch_document(&canonical_name).await?;
        Some(build_record(&document))
    }
}
