use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Connection settings for an OpenAI-compatible content generator.
#[derive(Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Clone, Debug, Default)]
pub struct GeneratorSettingsDraft {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GeneratorSettingsError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl GeneratorSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft.
    ///
    /// Returns `Ok(None)` when no API key is set: generation then falls back to
    /// the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorSettingsError` if the base URL is present but invalid.
    pub fn validate(self) -> Result<Option<GeneratorSettings>, GeneratorSettingsError> {
        let api_key = normalize_optional(self.api_key);
        let base_url = normalize_optional(self.base_url);
        let model = normalize_optional(self.model);

        if let Some(url) = base_url.as_ref() {
            if Url::parse(url).is_err() {
                return Err(GeneratorSettingsError::InvalidBaseUrl(url.clone()));
            }
        }

        Ok(api_key.map(|api_key| GeneratorSettings {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }))
    }
}

impl GeneratorSettings {
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Chat completions endpoint under the configured base URL.
    #[must_use]
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for GeneratorSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorSettings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
