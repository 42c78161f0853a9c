//! Core abstractions for outline derivation
//!
//! This module defines the shared data model, the traits each pipeline stage
//! implements, the error taxonomy and the logging setup.

mod chumsky_utils;
mod error;
mod formatter;
pub mod logging;
mod parser;
mod types;

pub use chumsky_utils::*;
pub use error::*;
pub use formatter::*;
pub use logging::*;
pub use parser::*;
pub use types::*;
