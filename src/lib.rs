#![forbid(unsafe_code)]
//! Garde — bibliothèque de gestion de gardes hospitalières (sans BD, sans réseau).
//!
//! - Contrôle du repos minimal à l'ajout d'une garde.
//! - Cycle de vie des demandes d'échange (proposition, acceptation, refus).
//! - Pools « mes gardes » / « gardes disponibles » disjoints.
//! - Tout en UTC ; l'affichage local reste en dehors de la lib.

/// Événement `tracing` compilé seulement avec la feature `logging`.
macro_rules! trace_event {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "logging")]
        tracing::$level!($($arg)+);
    };
}

pub mod fixtures;
#[cfg(feature = "serde")]
pub mod io;
pub mod model;
pub mod scheduler;
pub mod workload;

pub use model::{ActorId, ActorProfile, Board, Shift, ShiftId, TradeId, TradeRequest, TradeStatus};
pub use scheduler::{has_conflict, ErrorKind, RestPolicy, SchedError, Scheduler};
pub use workload::{daily_loads, BalanceStatus, DayLoad, WorkloadSummary};
