pub mod cache;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod paths;
pub mod record_db;
pub mod remote;
pub mod report;
pub mod seed;
pub mod sync;

pub use error::{ChecklistError, Result};
