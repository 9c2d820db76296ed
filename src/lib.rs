// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod model;
pub mod render;

pub use engine::{Board, CalendarBatch, Homecal, Rendered};
pub use error::{HomecalError, Issue, Severity};
