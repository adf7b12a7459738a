// src/health/status.rs
use super::checker::CheckError;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pending,
    Passed,
    Failed,
}

#[derive(Debug)]
pub struct CheckOutcome {
    pub name: String,
    pub status: CheckStatus,
    pub elapsed: Duration,
    pub error: Option<CheckError>,
}

impl CheckOutcome {
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Pending,
            elapsed: Duration::ZERO,
            error: None,
        }
    }

    /// Settle a pending outcome. A finished outcome is returned unchanged.
    pub fn complete(mut self, result: Result<(), CheckError>, elapsed: Duration) -> Self {
        if self.status != CheckStatus::Pending {
            return self;
        }

        self.elapsed = elapsed;
        match result {
            Ok(()) => self.status = CheckStatus::Passed,
            Err(e) => {
                self.status = CheckStatus::Failed;
                self.error = Some(e);
            }
        }
        self
    }

    pub fn passed(&self) -> bool {
        self.status == CheckStatus::Passed
    }
}
