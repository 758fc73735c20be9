//! LabelMark Application
//!
//! Command-line shell that replays a recorded annotation session against a
//! canvas and writes the result as SVG.

mod config;
mod error;
mod runner;
mod script;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use runner::Session;
pub use script::{Action, DragPart, PolylineMode, Script};
