pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::pipelines::CdfPipeline;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, NormalizerConfig};
pub use core::artifact::{parse_artifact, render_artifact};
pub use core::normalize::{
    normalize_category, normalize_record, normalize_sub_category, parse_amount, NormalizationRules,
    Normalizer,
};
pub use core::{etl::EtlEngine, summary::RunSummary};
pub use domain::model::{Amount, InputRecord, OutputRecord};
pub use utils::error::{NormalizeError, Result};
