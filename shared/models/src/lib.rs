//! # Pricecheck Domain Models
//!
//! Data shapes shared by the parser, validator, enrichment client and
//! orchestrator.
//!
//! ## Key Models
//!
//! - **Table**: normalized grid of string cells parsed from an upload
//! - **ValidatedRow**: manufacturer/part-number pair that passed validation
//! - **Quote**: one external price result for a part
//! - **NewPriceResult** / **PriceResult**: append-only persisted quote records
//! - **JobResultEntry**: per-row summary returned by a job

pub mod table;
pub mod quote;
pub mod job;

pub use table::*;
pub use quote::*;
pub use job::*;
