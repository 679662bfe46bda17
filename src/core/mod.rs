pub mod builder;
pub mod coerce;
pub mod etl;
pub mod path;
pub mod pipeline;
pub mod transform;

pub use crate::domain::model::{ConvertOutcome, HeaderPath, Record, Segment, Table};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
