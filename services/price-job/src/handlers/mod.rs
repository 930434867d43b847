pub mod health;
pub mod job;

pub use health::*;
pub use job::*;
