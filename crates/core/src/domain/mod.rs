pub mod allocation;
pub mod profile;
pub mod report;
pub mod risk;
pub mod validation;
