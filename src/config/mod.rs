pub mod cli;
pub mod toml_config;

use crate::core::artifact::DEFAULT_CONST_NAME;
use crate::core::normalize::NormalizationRules;
use crate::core::ConfigProvider;
use crate::utils::error::{NormalizeError, Result};
use crate::utils::validation::{
    validate_identifier, validate_non_empty_string, validate_path, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_INPUT_PATH: &str = "cdf.txt";
pub const DEFAULT_OUTPUT_PATH: &str = "cdfData.out.ts";

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizerConfig {
    pub input_path: String,
    pub output_path: String,
    pub const_name: String,
    pub rules: NormalizationRules,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            input_path: DEFAULT_INPUT_PATH.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            const_name: DEFAULT_CONST_NAME.to_string(),
            rules: NormalizationRules::default(),
        }
    }
}

impl ConfigProvider for NormalizerConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn const_name(&self) -> &str {
        &self.const_name
    }

    fn rules(&self) -> &NormalizationRules {
        &self.rules
    }
}

impl Validate for NormalizerConfig {
    fn validate(&self) -> Result<()> {
        validate_path("io.input", &self.input_path)?;
        validate_path("io.output", &self.output_path)?;
        if self.input_path == self.output_path {
            return Err(NormalizeError::InvalidConfigValueError {
                field: "io.output".to_string(),
                value: self.output_path.clone(),
                reason: "Output would overwrite the input file".to_string(),
            });
        }

        validate_identifier("io.const_name", &self.const_name)?;

        if !self.rules.category_misspellings.is_empty() {
            validate_non_empty_string("rules.category_canonical", &self.rules.category_canonical)?;
        }
        for (index, replacement) in self.rules.sub_category.iter().enumerate() {
            if replacement.from.is_empty() {
                return Err(NormalizeError::InvalidConfigValueError {
                    field: format!("rules.sub_category[{}].from", index),
                    value: String::new(),
                    reason: "Replacement source cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "cdf-normalize")]
#[command(about = "Normalize CDF disbursement records into a TypeScript data module")]
pub struct CliConfig {
    /// Input JSON file with a top-level "data" array [default: cdf.txt]
    #[arg(long)]
    pub input: Option<String>,

    /// Output TypeScript file [default: cdfData.out.ts]
    #[arg(long)]
    pub output: Option<String>,

    /// Name of the exported constant [default: cdfData]
    #[arg(long)]
    pub const_name: Option<String>,

    /// Optional TOML file with [io] and [rules] sections
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory that input and output paths are resolved against
    #[arg(long, default_value = ".")]
    pub base_dir: String,

    /// Normalize and print a summary without writing the output
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Defaults, then the TOML file, then flags; the result is validated.
    pub fn resolve(&self) -> Result<NormalizerConfig> {
        let mut config = NormalizerConfig::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading config file: {}", path);
            toml_config::TomlConfig::from_file(path)?.apply_to(&mut config);
        }

        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(const_name) = &self.const_name {
            config.const_name = const_name.clone();
        }

        config.validate()?;
        Ok(config)
    }
}
