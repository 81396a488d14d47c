//! Jeu de données d'exemple, relatif à `now` et aux identifiants stables.
use crate::model::{ActorId, ActorProfile, Board, Shift, ShiftId, TradeId, TradeRequest};
use chrono::{DateTime, Duration, Utc};

pub const SAMPLE_SENDER: &str = "Dr. Chen";

fn shift(id: &str, now: DateTime<Utc>, from_h: i64, to_h: i64, department: &str) -> Shift {
    Shift::new(now + Duration::hours(from_h), now + Duration::hours(to_h), department).with_id(ShiftId::new(id))
}

/// Board d'exemple :
/// - `mine-1` (service de l'acteur) et `mine-2` (Neurology) dans « mes gardes » ;
/// - `avail-1..3` dans le service de l'acteur, disponibles à l'échange ;
/// - `trade-chen` : demande entrante en attente, offrant `incoming-1` contre `mine-1`.
pub fn sample_board(profile: &ActorProfile, now: DateTime<Utc>) -> Board {
    let dept = profile.department.as_str();
    let mine_1 = shift("mine-1", now, 24, 32, dept);
    let mine = vec![mine_1.clone(), shift("mine-2", now, 48, 56, "Neurology")];
    let available = vec![
        shift("avail-1", now, 24 * 3, 24 * 4, dept),
        shift("avail-2", now, 24 * 5, 24 * 6, dept),
        shift("avail-3", now, 24 * 7, 24 * 8, dept),
    ];

    let sender = ActorId::new(SAMPLE_SENDER);
    let mut incoming = TradeRequest::pending(
        shift("incoming-1", now, 24 * 2, 24 * 3, dept),
        Some(mine_1),
        sender.clone(),
        sender != profile.actor,
    );
    incoming.id = TradeId::new("trade-chen");

    Board {
        mine,
        available,
        trades: vec![incoming],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn sample_board_is_disjoint_and_has_one_inbox_item() {
        let now = Utc.with_ymd_and_hms(2025, 7, 5, 9, 0, 0).unwrap();
        let board = sample_board(&ActorProfile::default(), now);
        assert!(board.pools_disjoint());
        assert_eq!(board.mine.len(), 2);
        assert_eq!(board.available_in("Cardiology").count(), 3);
        assert_eq!(board.trades.len(), 1);
        assert!(board.trades[0].is_incoming && board.trades[0].is_pending());
        assert!(board.trades[0].same_department());
    }
}
