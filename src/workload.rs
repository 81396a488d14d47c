//! Bilan de charge : heures travaillées / heures de repos par jour UTC.
use crate::model::Shift;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Heures travaillées et de repos sur une journée UTC.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DayLoad {
    pub day: NaiveDate,
    pub work_hours: f64,
    pub off_hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BalanceStatus {
    Balanced,
    NeedsRest,
    BurnoutRisk,
}

impl BalanceStatus {
    pub fn from_index(work_index: f64) -> Self {
        if work_index < 1.0 {
            BalanceStatus::Balanced
        } else if work_index < 1.4 {
            BalanceStatus::NeedsRest
        } else {
            BalanceStatus::BurnoutRisk
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            BalanceStatus::Balanced => "Excellent work-life balance",
            BalanceStatus::NeedsRest => "Needs more rest",
            BalanceStatus::BurnoutRisk => "High burnout risk!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorkloadSummary {
    pub total_work_hours: f64,
    pub total_off_hours: f64,
    pub work_index: f64,
    pub status: BalanceStatus,
}

impl WorkloadSummary {
    pub fn from_days(days: &[DayLoad]) -> Self {
        let total_work_hours: f64 = days.iter().map(|d| d.work_hours).sum();
        let total_off_hours: f64 = days.iter().map(|d| d.off_hours).sum();
        let work_index = if total_off_hours > 0.0 {
            total_work_hours / total_off_hours
        } else {
            0.0
        };
        Self {
            total_work_hours,
            total_off_hours,
            work_index,
            status: BalanceStatus::from_index(work_index),
        }
    }
}

/// Découpe les gardes sur `days` journées UTC à partir de `from`.
///
/// Les chevauchements entre gardes ne sont pas dédupliqués ; le travail d'une
/// journée est plafonné à 24 h.
pub fn daily_loads(shifts: &[Shift], from: NaiveDate, days: u32) -> Vec<DayLoad> {
    (0..days)
        .filter_map(|offset| from.checked_add_signed(Duration::days(i64::from(offset))))
        .map(|day| {
            let day_start = midnight(day);
            let day_end = day_start + Duration::days(1);
            let minutes: i64 = shifts
                .iter()
                .map(|s| clipped_minutes(s.start, s.end, day_start, day_end))
                .sum();
            let work_hours = (minutes as f64 / 60.0).min(24.0);
            DayLoad {
                day,
                work_hours,
                off_hours: 24.0 - work_hours,
            }
        })
        .collect()
}

fn midnight(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(chrono::NaiveTime::MIN))
}

fn clipped_minutes(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> i64 {
    let lo = start.max(window_start);
    let hi = end.min(window_end);
    if hi > lo {
        (hi - lo).num_minutes()
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, d).unwrap()
    }

    fn shift(d: u32, h: u32, hours: i64) -> Shift {
        let start = Utc.with_ymd_and_hms(2025, 7, d, h, 0, 0).unwrap();
        Shift::new(start, start + Duration::hours(hours), "Cardiology")
    }

    #[test]
    fn night_shift_is_split_across_days() {
        let loads = daily_loads(&[shift(1, 20, 12)], date(1), 2);
        assert_eq!(loads.len(), 2);
        assert_eq!(loads[0].work_hours, 4.0);
        assert_eq!(loads[1].work_hours, 8.0);
        assert_eq!(loads[1].off_hours, 16.0);
    }

    #[test]
    fn status_thresholds() {
        assert_eq!(BalanceStatus::from_index(0.99), BalanceStatus::Balanced);
        assert_eq!(BalanceStatus::from_index(1.0), BalanceStatus::NeedsRest);
        assert_eq!(BalanceStatus::from_index(1.39), BalanceStatus::NeedsRest);
        assert_eq!(BalanceStatus::from_index(1.4), BalanceStatus::BurnoutRisk);
    }

    #[test]
    fn index_is_zero_without_rest() {
        let loads = daily_loads(&[shift(1, 0, 24)], date(1), 1);
        let summary = WorkloadSummary::from_days(&loads);
        assert_eq!(summary.total_off_hours, 0.0);
        assert_eq!(summary.work_index, 0.0);
        assert_eq!(summary.status, BalanceStatus::Balanced);
    }

    #[test]
    fn long_shifts_push_towards_burnout() {
        let shifts: Vec<Shift> = (1..=3).map(|d| shift(d, 6, 15)).collect();
        let summary = WorkloadSummary::from_days(&daily_loads(&shifts, date(1), 3));
        assert_eq!(summary.total_work_hours, 45.0);
        assert_eq!(summary.total_off_hours, 27.0);
        assert_eq!(summary.status, BalanceStatus::BurnoutRisk);
    }
}
