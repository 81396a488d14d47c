mod conflicts;
mod trade;
mod types;
mod util;

pub use conflicts::has_conflict;
pub use types::{ErrorKind, RestPolicy, SchedError};

use crate::model::{ActorId, ActorProfile, Board, Shift, ShiftId, TradeId, TradeRequest};
use chrono::{DateTime, Utc};

/// Scheduler : encapsule le Board d'un acteur et son profil injecté.
///
/// Toutes les opérations prennent `&mut self` et valident avant de muter :
/// un échec laisse pools et demandes inchangés.
#[derive(Debug, Default)]
pub struct Scheduler {
    profile: ActorProfile,
    policy: RestPolicy,
    board: Board,
}

impl Scheduler {
    pub fn new(profile: ActorProfile) -> Self {
        Self::with_board(profile, Board::default())
    }

    pub fn with_board(profile: ActorProfile, board: Board) -> Self {
        Self {
            profile,
            policy: RestPolicy::default(),
            board,
        }
    }

    pub fn with_policy(mut self, policy: RestPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn profile(&self) -> &ActorProfile {
        &self.profile
    }
    pub fn policy(&self) -> RestPolicy {
        self.policy
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn into_board(self) -> Board {
        self.board
    }

    /// Crée une garde dans le service de l'acteur et l'ajoute à « mes gardes ».
    pub fn add_shift(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<ShiftId, SchedError> {
        let candidate = Shift::new(start, end, self.profile.department.clone());
        conflicts::add_shift(self, candidate)
    }

    /// Variante acceptant une garde déjà construite (service imposé par l'appelant).
    pub fn add_existing_shift(&mut self, candidate: Shift) -> Result<ShiftId, SchedError> {
        conflicts::add_shift(self, candidate)
    }

    pub fn has_conflict(&self, candidate: &Shift) -> bool {
        self.policy.conflicts(candidate, &self.board.mine)
    }

    /// Suppression par le propriétaire.
    pub fn remove_shift(&mut self, shift_id: &ShiftId) -> Result<Shift, SchedError> {
        util::take_shift(&mut self.board.mine, shift_id)
            .ok_or_else(|| SchedError::UnknownShift(shift_id.as_str().to_string()))
    }

    pub fn propose_trade(
        &mut self,
        offered: Option<&ShiftId>,
        requested: Option<&ShiftId>,
        proposer: &ActorId,
    ) -> Result<TradeId, SchedError> {
        trade::propose(self, offered, requested, proposer)
    }

    pub fn accept_trade(&mut self, trade_id: &TradeId) -> Result<(), SchedError> {
        trade::accept(self, trade_id)
    }

    pub fn decline_trade(&mut self, trade_id: &TradeId) -> Result<(), SchedError> {
        trade::decline(self, trade_id)
    }

    pub fn my_department_shifts(&self) -> Vec<&Shift> {
        self.board.my_shifts_in(&self.profile.department).collect()
    }

    pub fn tradeable_shifts(&self) -> Vec<&Shift> {
        self.board.available_in(&self.profile.department).collect()
    }

    pub fn incoming_pending(&self) -> Vec<&TradeRequest> {
        self.board
            .trades
            .iter()
            .filter(|t| t.is_incoming && t.is_pending())
            .collect()
    }

    pub fn pending_incoming_count(&self) -> usize {
        self.incoming_pending().len()
    }

    pub fn trade_history(&self) -> &[TradeRequest] {
        &self.board.trades
    }
}
