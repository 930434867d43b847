//! Upload Table Processing Module
//!
//! Format-dispatching parser and the single schema validator shared by every
//! entry point that accepts an upload.

pub mod parser;
pub mod validator;

pub use parser::{parse, TableFormat};
pub use validator::{validate, MANUFACTURER_HEADER, PART_NUMBER_HEADER};
