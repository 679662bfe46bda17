pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{ConvertConfig, LocalStorage};

pub use adapters::source::Source;
pub use crate::core::builder::{place, read_path};
pub use crate::core::coerce::coerce;
pub use crate::core::path::parse_header;
pub use crate::core::transform::{transform, transform_rows};
pub use crate::core::{etl::EtlEngine, pipeline::CsvJsonPipeline};
pub use domain::model::{ConvertOutcome, HeaderPath, Record, Segment, Table};
pub use utils::error::{ConvertError, Result};
