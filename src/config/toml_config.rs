use crate::config::NormalizerConfig;
use crate::core::normalize::NormalizationRules;
use crate::utils::error::{NormalizeError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var regex"));

/// Optional file-based settings. Every key may be omitted.
///
/// ```toml
/// [io]
/// input = "data/cdf.txt"
/// output = "${WEB_SRC}/cdfData.out.ts"
/// const_name = "cdfData"
///
/// [rules]
/// category_canonical = "Bursaries"
/// category_misspellings = ["busaries", "burseries"]
///
/// [[rules.sub_category]]
/// from = "n/a"
/// to = "N/A"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub io: IoConfig,
    pub rules: Option<NormalizationRules>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IoConfig {
    pub input: Option<String>,
    pub output: Option<String>,
    pub const_name: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| NormalizeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// Overlay the keys present in this file onto `config`.
    pub fn apply_to(&self, config: &mut NormalizerConfig) {
        if let Some(input) = &self.io.input {
            config.input_path = input.clone();
        }
        if let Some(output) = &self.io.output {
            config.output_path = output.clone();
        }
        if let Some(const_name) = &self.io.const_name {
            config.const_name = const_name.clone();
        }
        if let Some(rules) = &self.rules {
            config.rules = rules.clone();
        }
    }
}
