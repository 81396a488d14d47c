use super::{util, SchedError, Scheduler};
use crate::model::{ActorId, Shift, ShiftId, TradeId, TradeRequest, TradeStatus};

/// Pool d'où provient la garde offerte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Mine,
    Available,
}

pub(super) fn propose(
    scheduler: &mut Scheduler,
    offered: Option<&ShiftId>,
    requested: Option<&ShiftId>,
    proposer: &ActorId,
) -> Result<TradeId, SchedError> {
    let Some(offered) = offered else {
        return Err(SchedError::NothingSelected);
    };

    let board = &scheduler.board;
    let source = if util::find_shift_index(&board.available, offered).is_some() {
        Source::Available
    } else if util::find_shift_index(&board.mine, offered).is_some() {
        Source::Mine
    } else {
        return Err(SchedError::UnknownShift(offered.as_str().to_string()));
    };

    if let Some(requested) = requested {
        if requested == offered || util::find_shift_index(&board.mine, requested).is_none() {
            return Err(SchedError::UnknownShift(requested.as_str().to_string()));
        }
    }

    // Validation terminée : les retraits et la création forment une seule étape.
    let board = &mut scheduler.board;
    let original = match source {
        Source::Available => util::take_shift(&mut board.available, offered),
        Source::Mine => util::take_shift(&mut board.mine, offered),
    }
    .ok_or_else(|| SchedError::UnknownShift(offered.as_str().to_string()))?;
    // Une demande entrante vise une garde du destinataire : elle reste dans ses pools.
    let is_incoming = proposer != &scheduler.profile.actor;
    let requested = requested.and_then(|id| {
        if is_incoming {
            board.mine.iter().find(|s| &s.id == id).cloned()
        } else {
            util::take_shift(&mut board.mine, id)
        }
    });

    let request = TradeRequest::pending(original, requested, proposer.clone(), is_incoming);
    let id = request.id.clone();
    trace_event!(
        info,
        trade = %id,
        sender = %proposer,
        incoming = is_incoming,
        "trade proposed"
    );
    board.trades.push(request);
    Ok(id)
}

pub(super) fn accept(scheduler: &mut Scheduler, trade_id: &TradeId) -> Result<(), SchedError> {
    let pos = pending_index(scheduler, trade_id)?;

    let (original, requested) = {
        let trade = &scheduler.board.trades[pos];
        if let Some(requested) = &trade.requested_shift {
            if requested.department != trade.original_shift.department {
                trace_event!(debug, trade = %trade_id, "department mismatch, trade left pending");
                return Err(SchedError::DepartmentMismatch {
                    offered: trade.original_shift.department.clone(),
                    requested: requested.department.clone(),
                });
            }
            // la contrepartie d'une demande entrante doit encore être à nous
            if trade.is_incoming && util::find_shift_index(&scheduler.board.mine, &requested.id).is_none() {
                return Err(SchedError::UnknownShift(requested.id.as_str().to_string()));
            }
        }
        (
            trade.original_shift.clone(),
            trade.requested_shift.as_ref().map(|s| s.id.clone()),
        )
    };

    let board = &mut scheduler.board;
    resolve(&mut board.trades[pos], TradeStatus::Accepted)?;
    util::push_unique(&mut board.mine, original);
    if let Some(requested) = requested {
        util::take_shift(&mut board.mine, &requested);
    }
    trace_event!(info, trade = %trade_id, "trade accepted");
    Ok(())
}

pub(super) fn decline(scheduler: &mut Scheduler, trade_id: &TradeId) -> Result<(), SchedError> {
    let pos = pending_index(scheduler, trade_id)?;

    let board = &mut scheduler.board;
    // Seule une proposition de l'acteur a retiré la contrepartie de « mes gardes ».
    let (original, requested): (Shift, Option<Shift>) = {
        let trade = &board.trades[pos];
        let requested = trade.requested_shift.clone().filter(|_| !trade.is_incoming);
        (trade.original_shift.clone(), requested)
    };

    resolve(&mut board.trades[pos], TradeStatus::Declined)?;
    util::push_unique(&mut board.available, original);
    if let Some(requested) = requested {
        util::push_unique(&mut board.mine, requested);
    }
    trace_event!(info, trade = %trade_id, "trade declined");
    Ok(())
}

fn pending_index(scheduler: &Scheduler, trade_id: &TradeId) -> Result<usize, SchedError> {
    let Some(pos) = util::find_trade_index(&scheduler.board.trades, trade_id) else {
        return Err(SchedError::UnknownTrade(trade_id.as_str().to_string()));
    };
    let trade = &scheduler.board.trades[pos];
    if trade.status().is_terminal() {
        return Err(SchedError::AlreadyResolved {
            trade: trade_id.clone(),
            status: trade.status(),
        });
    }
    Ok(pos)
}

fn resolve(trade: &mut TradeRequest, to: TradeStatus) -> Result<(), SchedError> {
    trade.resolve(to).map_err(|status| SchedError::AlreadyResolved {
        trade: trade.id.clone(),
        status,
    })
}
