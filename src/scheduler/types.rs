use crate::model::{ShiftId, TradeId, TradeStatus};
use thiserror::Error;

/// Règle de repos minimal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestPolicy {
    pub min_rest_hours: u32,
}

impl Default for RestPolicy {
    fn default() -> Self {
        Self { min_rest_hours: 11 }
    }
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid time range: end must be after start")]
    InvalidTimeRange,
    #[error("rest conflict: only {gap_hours}h between shift {existing} and the new shift")]
    RestConflict { existing: ShiftId, gap_hours: i64 },
    #[error("department mismatch: {offered} cannot be traded against {requested}")]
    DepartmentMismatch { offered: String, requested: String },
    #[error("trade {trade} already {status}")]
    AlreadyResolved { trade: TradeId, status: TradeStatus },
    #[error("unknown shift: {0}")]
    UnknownShift(String),
    #[error("unknown trade: {0}")]
    UnknownTrade(String),
    #[error("no shift selected for trade")]
    NothingSelected,
}

/// Catégorie plate d'une erreur, pour choisir l'alerte côté présentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    RestConflict,
    InvalidRange,
    DepartmentMismatch,
    AlreadyResolved,
    NotFound,
    NothingSelected,
}

impl SchedError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SchedError::InvalidTimeRange => ErrorKind::InvalidRange,
            SchedError::RestConflict { .. } => ErrorKind::RestConflict,
            SchedError::DepartmentMismatch { .. } => ErrorKind::DepartmentMismatch,
            SchedError::AlreadyResolved { .. } => ErrorKind::AlreadyResolved,
            SchedError::UnknownShift(_) | SchedError::UnknownTrade(_) => ErrorKind::NotFound,
            SchedError::NothingSelected => ErrorKind::NothingSelected,
        }
    }
}
