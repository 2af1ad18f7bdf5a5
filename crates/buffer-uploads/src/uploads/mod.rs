mod allocation;
mod batch;
mod create_info;
mod error;
mod manager;
mod statistics;

pub use allocation::ResourceLocator;
pub use create_info::*;
pub use error::*;
pub use manager::*;
pub use statistics::UploadStatistics;

pub(crate) use statistics::UploadCounters;
