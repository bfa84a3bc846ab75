//! Domain definitions.

pub mod agent;
#[cfg(test)]
pub(crate) mod fixture;
pub mod mortgage;
pub mod property;
pub mod valuation;

pub use self::{agent::Agent, property::Property};
