pub mod aggregate;
pub mod classify;
pub mod demo;
pub mod revalue;
