#![forbid(unsafe_code)]
use chrono::{DateTime, Duration, TimeZone, Utc};
use garde::{
    model::{ActorProfile, Board, Shift, ShiftId, TradeStatus},
    ErrorKind, SchedError, Scheduler,
};

fn at(d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, d, h, 0, 0).unwrap()
}

fn named(id: &str, start: DateTime<Utc>, hours: i64, department: &str) -> Shift {
    Shift::new(start, start + Duration::hours(hours), department).with_id(ShiftId::new(id))
}

fn scheduler_with(mine: Vec<Shift>, available: Vec<Shift>) -> Scheduler {
    Scheduler::with_board(
        ActorProfile::default(),
        Board {
            mine,
            available,
            trades: Vec::new(),
        },
    )
}

#[test]
fn add_shift_respects_eleven_hour_rest() {
    let mut s = Scheduler::new(ActorProfile::default());
    s.add_shift(at(5, 8), at(5, 20)).unwrap();

    let err = s.add_shift(at(6, 6), at(6, 14)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RestConflict);
    assert!(matches!(err, SchedError::RestConflict { gap_hours: 10, .. }));

    s.add_shift(at(6, 7), at(6, 15)).unwrap();
    assert_eq!(s.board().mine.len(), 2);
    assert!(s.board().mine.iter().all(|sh| sh.department == "Cardiology"));
}

#[test]
fn inverted_range_is_rejected_before_conflict_check() {
    let mut s = Scheduler::new(ActorProfile::default());
    s.add_shift(at(5, 0), at(5, 9)).unwrap();
    // 10:00 → 09:00 serait aussi en conflit ; l'intervalle est refusé d'abord
    let err = s.add_shift(at(5, 10), at(5, 9)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRange);
    assert_eq!(s.board().mine.len(), 1);
}

#[test]
fn propose_removes_offered_shift_once() {
    let mut s = scheduler_with(vec![], vec![named("b", at(7, 8), 12, "Cardiology")]);
    let me = s.profile().actor.clone();
    s.propose_trade(Some(&ShiftId::new("b")), None, &me).unwrap();
    assert!(s.board().available.is_empty());

    let err = s.propose_trade(Some(&ShiftId::new("b")), None, &me).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(s.board().trades.len(), 1);
}

#[test]
fn department_mismatch_leaves_everything_untouched() {
    let mut s = scheduler_with(
        vec![named("a", at(5, 8), 12, "Neurology")],
        vec![named("b", at(7, 8), 12, "Cardiology")],
    );
    let me = s.profile().actor.clone();
    let id = s
        .propose_trade(Some(&ShiftId::new("b")), Some(&ShiftId::new("a")), &me)
        .unwrap();
    let mine_before = s.board().mine.clone();
    let available_before = s.board().available.clone();

    let err = s.accept_trade(&id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DepartmentMismatch);
    assert_eq!(s.board().mine, mine_before);
    assert_eq!(s.board().available, available_before);
    assert_eq!(s.board().find_trade(&id).unwrap().status(), TradeStatus::Pending);
}

#[test]
fn mismatch_message_names_both_departments() {
    let mut s = scheduler_with(
        vec![named("a", at(5, 8), 12, "Neurology")],
        vec![named("b", at(7, 8), 12, "Cardiology")],
    );
    let me = s.profile().actor.clone();
    let id = s
        .propose_trade(Some(&ShiftId::new("b")), Some(&ShiftId::new("a")), &me)
        .unwrap();
    let err = s.accept_trade(&id).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"department mismatch: Cardiology cannot be traded against Neurology");
}

#[test]
fn decline_twice_changes_pools_once() {
    let mut s = scheduler_with(vec![], vec![named("b", at(7, 8), 12, "Cardiology")]);
    let me = s.profile().actor.clone();
    let id = s.propose_trade(Some(&ShiftId::new("b")), None, &me).unwrap();
    let before = s.board().available.len();

    s.decline_trade(&id).unwrap();
    assert_eq!(s.board().available.len(), before + 1);

    let err = s.decline_trade(&id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyResolved);
    assert_eq!(s.board().available.len(), before + 1);
    assert_eq!(s.board().find_trade(&id).unwrap().status(), TradeStatus::Declined);
}

#[test]
fn declined_trade_cannot_be_accepted() {
    let mut s = scheduler_with(vec![], vec![named("b", at(7, 8), 12, "Cardiology")]);
    let me = s.profile().actor.clone();
    let id = s.propose_trade(Some(&ShiftId::new("b")), None, &me).unwrap();
    s.decline_trade(&id).unwrap();
    let err = s.accept_trade(&id).unwrap_err();
    assert!(matches!(
        err,
        SchedError::AlreadyResolved { status: TradeStatus::Declined, .. }
    ));
    assert!(s.board().mine.is_empty());
}

#[test]
fn end_to_end_trade() {
    let a = named("A", at(5, 8), 12, "Cardiology");
    let b = named("B", at(8, 8), 12, "Cardiology");
    let mut s = scheduler_with(vec![a.clone()], vec![b.clone()]);
    let me = s.profile().actor.clone();

    let id = s.propose_trade(Some(&b.id), Some(&a.id), &me).unwrap();
    assert!(s.board().mine.is_empty());
    assert!(s.board().available.is_empty());
    let trade = s.board().find_trade(&id).unwrap();
    assert_eq!(trade.status(), TradeStatus::Pending);
    assert_eq!(trade.original_shift, b);
    assert_eq!(trade.requested_shift.as_ref(), Some(&a));

    s.accept_trade(&id).unwrap();
    assert_eq!(s.board().mine, vec![b]);
    assert!(s.board().available.is_empty());
    assert_eq!(s.board().find_trade(&id).unwrap().status(), TradeStatus::Accepted);
    assert_eq!(s.trade_history().len(), 1);
}

#[test]
fn inbox_counts_only_pending_incoming() {
    let now = at(5, 9);
    let profile = ActorProfile::default();
    let mut s = Scheduler::with_board(profile.clone(), garde::fixtures::sample_board(&profile, now));
    assert_eq!(s.pending_incoming_count(), 1);
    assert_eq!(s.my_department_shifts().len(), 1);
    assert_eq!(s.tradeable_shifts().len(), 3);

    let incoming = s.incoming_pending()[0].id.clone();
    s.accept_trade(&incoming).unwrap();
    assert_eq!(s.pending_incoming_count(), 0);
    let mine: Vec<&str> = s.board().mine.iter().map(|sh| sh.id.as_str()).collect();
    assert_eq!(mine, vec!["mine-2", "incoming-1"]);
}

#[test]
fn owner_can_remove_a_shift() {
    let mut s = scheduler_with(vec![named("a", at(5, 8), 12, "Cardiology")], vec![]);
    let removed = s.remove_shift(&ShiftId::new("a")).unwrap();
    assert_eq!(removed.id.as_str(), "a");
    assert_eq!(
        s.remove_shift(&ShiftId::new("a")).unwrap_err().kind(),
        ErrorKind::NotFound
    );
}
