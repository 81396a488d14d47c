use crate::model::{Shift, ShiftId, TradeId, TradeRequest};
use chrono::{DateTime, Utc};

/// Écart en heures entières de `from` à `to`, tronqué vers zéro.
pub(super) fn whole_hours(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_hours()
}

pub(super) fn find_shift_index(shifts: &[Shift], shift_id: &ShiftId) -> Option<usize> {
    shifts.iter().position(|s| &s.id == shift_id)
}

pub(super) fn find_trade_index(trades: &[TradeRequest], trade_id: &TradeId) -> Option<usize> {
    trades.iter().position(|t| &t.id == trade_id)
}

/// Retire une garde d'un pool en conservant l'ordre des autres.
pub(super) fn take_shift(shifts: &mut Vec<Shift>, shift_id: &ShiftId) -> Option<Shift> {
    find_shift_index(shifts, shift_id).map(|idx| shifts.remove(idx))
}

/// Ajoute une garde si elle n'est pas déjà présente (par identifiant).
pub(super) fn push_unique(shifts: &mut Vec<Shift>, shift: Shift) {
    if find_shift_index(shifts, &shift.id).is_none() {
        shifts.push(shift);
    }
}
