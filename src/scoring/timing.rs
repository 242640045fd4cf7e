//! Posting-time factor, evaluated on local wall-clock time.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

/// Weekday bonus: +5 Monday to Friday, nothing on weekends.
pub fn weekday_score(day: Weekday) -> i32 {
    match day {
        Weekday::Sat | Weekday::Sun => 0,
        _ => 5,
    }
}

/// Hour-of-day component: morning peak, lunch bump, late-night penalty.
pub fn hour_score(hour: u32) -> i32 {
    match hour {
        8..=10 => 15,
        12..=13 => 10,
        18..=23 | 0..=5 => -10,
        _ => 0,
    }
}

/// Combined timing factor, always within `-10..=20`.
pub fn timing_score(at: NaiveDateTime) -> i32 {
    weekday_score(at.weekday()) + hour_score(at.hour())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .expect("valid test timestamp")
    }

    #[test]
    fn tuesday_morning_is_peak() {
        // 2024-06-04 is a Tuesday
        assert_eq!(timing_score(at(2024, 6, 4, 9, 30)), 20);
    }

    #[test]
    fn weekend_late_night_is_worst() {
        // 2024-06-08 is a Saturday
        assert_eq!(timing_score(at(2024, 6, 8, 23, 0)), -10);
    }

    #[test]
    fn hour_boundaries() {
        assert_eq!(hour_score(7), 0);
        assert_eq!(hour_score(8), 15);
        assert_eq!(hour_score(10), 15);
        assert_eq!(hour_score(11), 0);
        assert_eq!(hour_score(12), 10);
        assert_eq!(hour_score(13), 10);
        assert_eq!(hour_score(14), 0);
        assert_eq!(hour_score(17), 0);
        assert_eq!(hour_score(18), -10);
        assert_eq!(hour_score(0), -10);
        assert_eq!(hour_score(5), -10);
        assert_eq!(hour_score(6), 0);
    }

    #[test]
    fn every_hour_stays_in_range() {
        for day in 3..=9 {
            for hour in 0..24 {
                let score = timing_score(at(2024, 6, day, hour, 0));
                assert!((-10..=20).contains(&score), "{day} {hour} -> {score}");
            }
        }
    }
}
