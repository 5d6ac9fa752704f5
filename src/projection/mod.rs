pub mod growth;
pub mod vesting;
