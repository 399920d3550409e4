//! Scripts for linking the charity contracts together, seeding them with a
//! test charity and recording their addresses.

#![deny(missing_docs)]

pub mod artifacts;
pub mod cli;
pub mod commands;
pub mod constants;
pub mod deployments;
pub mod errors;
pub mod handles;
pub mod plan;
pub mod transactor;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;
