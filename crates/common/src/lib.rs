//! Shared runtime helpers for the JeevanDhara workspace: logging setup and
//! startup environment checks.

pub mod env;
pub mod utils;
