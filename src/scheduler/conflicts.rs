use super::{util, RestPolicy, SchedError, Scheduler};
use crate::model::{Shift, ShiftId};

/// Vrai si `candidate` démarre à moins de 11 h de la fin d'une garde existante.
///
/// Seule la frontière `existing.end → candidate.start` est examinée, en valeur
/// absolue : la fin du candidat n'est pas comparée au début de la garde suivante.
pub fn has_conflict(candidate: &Shift, existing: &[Shift]) -> bool {
    RestPolicy::default().conflicts(candidate, existing)
}

impl RestPolicy {
    pub fn conflicts(&self, candidate: &Shift, existing: &[Shift]) -> bool {
        self.first_conflict(candidate, existing).is_some()
    }

    /// Première garde trop proche, avec l'écart observé en heures entières.
    pub fn first_conflict<'a>(&self, candidate: &Shift, existing: &'a [Shift]) -> Option<(&'a Shift, i64)> {
        existing.iter().find_map(|shift| {
            let gap = util::whole_hours(shift.end, candidate.start).abs();
            (gap < i64::from(self.min_rest_hours)).then_some((shift, gap))
        })
    }
}

pub(super) fn add_shift(scheduler: &mut Scheduler, candidate: Shift) -> Result<ShiftId, SchedError> {
    if !candidate.is_valid_range() {
        return Err(SchedError::InvalidTimeRange);
    }

    if let Some((existing, gap_hours)) = scheduler.policy.first_conflict(&candidate, &scheduler.board.mine) {
        trace_event!(debug, shift = %existing.id, gap_hours, "rest conflict, shift rejected");
        return Err(SchedError::RestConflict {
            existing: existing.id.clone(),
            gap_hours,
        });
    }

    let id = candidate.id.clone();
    trace_event!(info, shift = %id, department = %candidate.department, "shift added");
    scheduler.board.mine.push(candidate);
    Ok(id)
}
