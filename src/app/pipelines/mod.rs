pub mod cdf_pipeline;

pub use cdf_pipeline::CdfPipeline;
