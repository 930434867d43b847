//! Repository module for database operations

pub mod price_result;

pub use price_result::PriceResultRepository;
