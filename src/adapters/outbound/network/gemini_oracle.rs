use crate::ports::outbound::{NameOracle, OracleRequest};
use crate::resolution::domain::OracleClassification;
use crate::shared::{ResolveError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
}

/// The payload shape expected back from the oracle. A response missing
/// the `dependencies` array is a hard error for the whole run.
#[derive(Debug, Deserialize)]
struct OracleResolution {
    dependencies: Vec<RawOracleDependency>,
}

#[derive(Debug, Deserialize)]
struct RawOracleDependency {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "isDev")]
    is_dev: Option<serde_json::Value>,
    #[serde(default)]
    description: Option<String>,
}

/// GeminiOracle adapter for LLM-backed name resolution.
///
/// One batched generateContent call per resolution run, asking for a
/// JSON object mapping each candidate import to its canonical PyPI
/// name and a prod/dev classification. The response is validated
/// strictly; nothing unvalidated crosses this boundary.
#[derive(Debug)]
pub struct GeminiOracle {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiOracle {
    pub fn new(model: &str, api_key: &str) -> Result<Self> {
        Self::with_endpoint(DEFAULT_ENDPOINT, model, api_key)
    }

    pub fn with_endpoint(endpoint: &str, model: &str, api_key: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(ResolveError::OracleNotConfigured {
                missing: "API key".to_string(),
                hint: "Export the key in the environment variable named by oracle.api_key_env"
                    .to_string(),
            }
            .into());
        }
        if model.trim().is_empty() {
            return Err(ResolveError::OracleNotConfigured {
                missing: "model name".to_string(),
                hint: "Set oracle.model in depure.config.yml (e.g. gemini-1.5-flash)".to_string(),
            }
            .into());
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn build_prompt(request: &OracleRequest) -> String {
        let mut prompt = String::from(
            "You are a precise Python dependency analyzer. Your task is to identify \
             the correct PyPI package name for each candidate import below and to \
             distinguish external packages from local modules. You must also decide \
             whether a package is primarily for development (testing, linting, typing).\n",
        );

        if let Some(file_tree) = &request.file_tree {
            prompt.push_str(
                "\nHere is the complete file and folder structure of the project:\n```\n",
            );
            prompt.push_str(file_tree);
            prompt.push_str("\n```\n");
            prompt.push_str(
                "Any import that resolves to a file or folder in this structure is a \
                 local module and must be excluded from the result.\n",
            );
        }

        if let Some(notes) = &request.framework_notes {
            prompt.push_str("\nFramework context: ");
            prompt.push_str(notes);
            prompt.push('\n');
        }

        prompt.push_str("\nCandidate imports:\n");
        for candidate in &request.candidates {
            prompt.push_str(candidate);
            prompt.push('\n');
        }

        prompt.push_str(
            "\nRespond ONLY with a valid JSON object with a single root key \
             \"dependencies\", an array of objects with three keys:\n\
             1. \"name\": the official, lowercased PyPI package name (e.g. \
             \"beautifulsoup4\" for an import of \"bs4\").\n\
             2. \"isDev\": boolean, true for development-only packages (pytest, \
             black, mypy, flake8).\n\
             3. \"description\": a concise one-sentence description of the package.\n\
             \nYour JSON response:",
        );
        prompt
    }

    /// Strips markdown code fences some models wrap around the JSON.
    fn strip_fences(content: &str) -> &str {
        let trimmed = content.trim();
        if let Some(rest) = trimmed.strip_prefix("```json").or_else(|| trimmed.strip_prefix("```"))
        {
            if let Some(inner) = rest.rsplit_once("```") {
                return inner.0.trim();
            }
        }
        trimmed
    }

    /// The `!!isDev` coercion: booleans pass through, anything else is
    /// interpreted conservatively.
    fn coerce_is_dev(value: Option<&serde_json::Value>) -> bool {
        match value {
            Some(serde_json::Value::Bool(b)) => *b,
            Some(serde_json::Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    fn parse_response(content: &str) -> Result<Vec<OracleClassification>> {
        let payload = Self::strip_fences(content);
        let resolution: OracleResolution =
            serde_json::from_str(payload).map_err(|e| ResolveError::OracleMalformedResponse {
                details: format!("expected a JSON object with a \"dependencies\" array ({})", e),
                raw: content.to_string(),
            })?;

        Ok(resolution
            .dependencies
            .iter()
            .filter_map(|raw| {
                OracleClassification::from_raw(
                    raw.name.as_deref().unwrap_or(""),
                    Self::coerce_is_dev(raw.is_dev.as_ref()),
                    raw.description.as_deref(),
                )
            })
            .collect())
    }

    async fn query(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        );

        let body = json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "generationConfig": {
                "temperature": 0.1,
                "maxOutputTokens": 4096,
                "responseMimeType": "application/json",
            }
        });

        let response = self.client.post(&url).json(&body).send().await.map_err(|e| {
            ResolveError::OracleTransport {
                details: e.to_string(),
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let details = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .and_then(|error| error.message)
                .unwrap_or_else(|| format!("HTTP status {}", status));
            return Err(ResolveError::OracleTransport { details }.into());
        }

        let parsed: GenerateContentResponse =
            response
                .json()
                .await
                .map_err(|e| ResolveError::OracleTransport {
                    details: format!("unreadable response body: {}", e),
                })?;

        let text = parsed
            .candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .and_then(|content| content.parts.first())
            .and_then(|part| part.text.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty());

        match text {
            Some(text) => Ok(text.to_string()),
            None => Err(ResolveError::OracleMalformedResponse {
                details: "empty response from the oracle service".to_string(),
                raw: String::new(),
            }
            .into()),
        }
    }
}

#[async_trait]
impl NameOracle for GeminiOracle {
    async fn resolve(&self, request: &OracleRequest) -> Result<Vec<OracleClassification>> {
        if request.candidates.is_empty() {
            return Ok(Vec::new());
        }
        let prompt = Self::build_prompt(request);
        let content = self.query(&prompt).await?;
        Self::parse_response(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_api_key() {
        let result = GeminiOracle::new("gemini-1.5-flash", "");
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("not configured"));
        assert!(err.contains("API key"));
    }

    #[test]
    fn test_new_requires_model() {
        let result = GeminiOracle::new("", "some-key");
        assert!(result.is_err());
        assert!(format!("{}", result.unwrap_err()).contains("model name"));
    }

    #[test]
    fn test_parse_response_valid() {
        let content = r#"{"dependencies": [
            {"name": "beautifulsoup4", "isDev": false, "description": "HTML parser"},
            {"name": "pytest", "isDev": true}
        ]}"#;
        let classifications = GeminiOracle::parse_response(content).unwrap();
        assert_eq!(classifications.len(), 2);
        assert_eq!(classifications[0].name, "beautifulsoup4");
        assert!(!classifications[0].is_dev);
        assert_eq!(classifications[0].description, "HTML parser");
        assert!(classifications[1].is_dev);
    }

    #[test]
    fn test_parse_response_missing_dependencies_array_is_hard_error() {
        let result = GeminiOracle::parse_response(r#"{"packages": []}"#);
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("malformed response"));
        assert!(err.contains("packages"));
    }

    #[test]
    fn test_parse_response_strips_code_fences() {
        let content = "```json\n{\"dependencies\": [{\"name\": \"requests\"}]}\n```";
        let classifications = GeminiOracle::parse_response(content).unwrap();
        assert_eq!(classifications.len(), 1);
        assert_eq!(classifications[0].name, "requests");
    }

    #[test]
    fn test_parse_response_normalizes_and_drops_empty_names() {
        let content = r#"{"dependencies": [
            {"name": "Flask_RESTful", "isDev": false},
            {"name": "", "isDev": true},
            {"isDev": true}
        ]}"#;
        let classifications = GeminiOracle::parse_response(content).unwrap();
        assert_eq!(classifications.len(), 1);
        assert_eq!(classifications[0].name, "flask-restful");
    }

    #[test]
    fn test_parse_response_coerces_is_dev() {
        let content = r#"{"dependencies": [
            {"name": "a", "isDev": "true"},
            {"name": "b", "isDev": 1},
            {"name": "c"}
        ]}"#;
        let classifications = GeminiOracle::parse_response(content).unwrap();
        assert!(classifications[0].is_dev);
        assert!(!classifications[1].is_dev);
        assert!(!classifications[2].is_dev);
    }

    #[test]
    fn test_build_prompt_includes_context() {
        let request = OracleRequest {
            candidates: vec!["bs4".to_string(), "scrapy".to_string()],
            file_tree: Some("app.py\nmy_utils/__init__.py".to_string()),
            framework_notes: Some("Django project".to_string()),
        };
        let prompt = GeminiOracle::build_prompt(&request);
        assert!(prompt.contains("bs4"));
        assert!(prompt.contains("scrapy"));
        assert!(prompt.contains("my_utils/__init__.py"));
        assert!(prompt.contains("Django project"));
        assert!(prompt.contains("\"dependencies\""));
    }
}
