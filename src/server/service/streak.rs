//! Daily activity streaks.
//!
//! A streak counts consecutive calendar days (UTC) with recorded activity.

use chrono::NaiveDate;

use crate::server::model::user::Streak;

/// Records activity on `today`.
///
/// Activity on the day already recorded changes nothing, activity on the next day
/// extends the streak and anything later restarts it at 1. A `today` earlier than
/// the recorded day leaves the streak untouched.
pub fn record_activity(streak: Streak, today: NaiveDate) -> Streak {
    let current = match streak.last_date {
        Some(last) if last >= today => return streak,
        Some(last) if last.succ_opt() == Some(today) => streak.current + 1,
        _ => 1,
    };

    Streak {
        current,
        longest: streak.longest.max(current),
        last_date: Some(today),
    }
}

/// The streak as it should be shown on `today`.
///
/// A streak whose last activity is older than yesterday has lapsed and reads as 0.
pub fn as_of(streak: Streak, today: NaiveDate) -> Streak {
    let lapsed = match streak.last_date {
        Some(last) => last.succ_opt().is_some_and(|next| next < today),
        None => true,
    };

    if lapsed {
        Streak {
            current: 0,
            ..streak
        }
    } else {
        streak
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn first_activity_starts_streak() {
        let streak = record_activity(Streak::default(), day(10));

        assert_eq!(
            streak,
            Streak {
                current: 1,
                longest: 1,
                last_date: Some(day(10))
            }
        );
    }

    #[test]
    fn same_day_is_counted_once() {
        let once = record_activity(Streak::default(), day(10));
        let twice = record_activity(once, day(10));

        assert_eq!(once, twice);
    }

    #[test]
    fn consecutive_days_extend_streak() {
        let mut streak = Streak::default();
        for d in 10..=13 {
            streak = record_activity(streak, day(d));
        }

        assert_eq!(streak.current, 4);
        assert_eq!(streak.longest, 4);
    }

    #[test]
    fn gap_restarts_but_keeps_longest() {
        let streak = Streak {
            current: 5,
            longest: 5,
            last_date: Some(day(10)),
        };

        let restarted = record_activity(streak, day(13));

        assert_eq!(restarted.current, 1);
        assert_eq!(restarted.longest, 5);
        assert_eq!(restarted.last_date, Some(day(13)));
    }

    #[test]
    fn earlier_day_is_ignored() {
        let streak = Streak {
            current: 2,
            longest: 3,
            last_date: Some(day(10)),
        };

        assert_eq!(record_activity(streak, day(9)), streak);
    }

    #[test]
    fn lapsed_streak_reads_as_zero() {
        let streak = Streak {
            current: 4,
            longest: 6,
            last_date: Some(day(10)),
        };

        assert_eq!(as_of(streak, day(11)).current, 4);
        assert_eq!(as_of(streak, day(12)).current, 0);
        assert_eq!(as_of(streak, day(12)).longest, 6);
        assert_eq!(as_of(Streak::default(), day(12)).current, 0);
    }
}
