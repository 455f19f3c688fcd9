pub mod config;
pub mod error;
pub mod maven;
pub mod relative_path;
pub mod storage;
pub mod util;

pub use error::{ContentError, Result};
pub use relative_path::RelativePath;
