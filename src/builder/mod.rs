//! Builder API for configuring machines.
//!
//! [`FsmBuilder`] collects a whole transition table and validates it in one
//! pass, so a misconfigured table fails setup with every defect listed.

pub mod error;
pub mod machine;
pub mod validation;

pub use error::{BuildError, ConfigViolation};
pub use machine::FsmBuilder;
pub use validation::validate_table;
