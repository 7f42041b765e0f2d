pub mod artifact;
pub mod etl;
pub mod normalize;
pub mod summary;

pub use crate::domain::model::{Amount, InputRecord, OutputRecord, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
