pub mod equities;
pub mod family_office;
pub mod real_estate;
pub mod snapshot;
