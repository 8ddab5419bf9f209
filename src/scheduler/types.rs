use crate::model::PeriodId;
use thiserror::Error;

/// Nombre de premières lignes (direction / seniors) jamais sollicitées.
pub const EXCLUDED_PREFIX: usize = 3;

/// Options de planification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanOptions {
    pub excluded_prefix: usize,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            excluded_prefix: EXCLUDED_PREFIX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    DoubleBooking,
    AbsentSubstitute,
    ExcludedSubstitute,
    UnknownSubstitute,
    NoDuty,
    AlreadyTeaching,
}

#[derive(Debug, Clone)]
pub struct Conflict {
    pub absent: String,
    pub period: PeriodId,
    pub substitute: String,
    pub kind: ConflictKind,
}

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("unknown staff member: {0}")]
    UnknownStaff(String),
    #[error("no absent staff selected")]
    NoAbsentees,
    #[error("unknown day: {0} (expected mon..sat)")]
    UnknownDay(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
