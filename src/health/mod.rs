// src/health/mod.rs
mod checker;
mod status;
mod target;

pub use checker::{evaluate, CheckError, ErrorKind, LivenessChecker};
pub use status::{CheckOutcome, CheckStatus};
pub use target::{Credentials, Expectation, LivenessCheck, Target};
