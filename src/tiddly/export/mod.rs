pub mod batch;
pub mod error;
pub mod io;
pub mod logging;
pub mod markup;
pub mod model;
pub mod report;
pub mod section;
pub mod select;

pub use error::{Result, ToolError};
