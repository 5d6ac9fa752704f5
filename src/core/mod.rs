pub mod catalog;
pub mod currency;
pub mod equity;
pub mod error;
pub mod holding;
pub mod scenario;
