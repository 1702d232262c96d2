pub mod catalog;
pub mod etl;
pub mod header;
pub mod matching;
pub mod normalize;
pub mod pipeline;
pub mod ranking;

pub use crate::domain::model::{SourceTables, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, SourceConfig, Storage};
pub use crate::utils::error::Result;
