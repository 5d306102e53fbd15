//! crates/daykeep_core/src/streak.rs
//!
//! Pure streak computations over a habit's completion history. No I/O and no
//! mutation: every function is a plain function of the habit snapshot and a
//! reference day, so repeated calls on unchanged data give identical answers.
//!
//! Weekly and monthly habits are only checked for same-day presence; their
//! streaks never exceed 1. Daily habits walk backward one calendar day at a
//! time until the first gap.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::domain::{Frequency, Habit};

/// Streak lengths that warrant a celebratory nudge.
pub const STREAK_MILESTONES: [u32; 8] = [3, 7, 14, 21, 30, 50, 75, 100];

/// Upper bound on the backward walk, so pathological histories terminate.
const MAX_LOOKBACK_DAYS: u32 = 3650;

pub fn is_milestone(streak: u32) -> bool {
    STREAK_MILESTONES.contains(&streak)
}

/// True when some completion falls on the given calendar day. Membership is
/// existence, not count: duplicate records for a day change nothing.
pub fn is_completed_on(habit: &Habit, day: NaiveDate) -> bool {
    habit.completions.iter().any(|c| c.date == day)
}

/// Consecutive-day run ending on `reference`, or 0 when `reference` itself
/// has no completion. Non-daily habits report same-day presence only.
pub fn current_streak(habit: &Habit, reference: NaiveDate) -> u32 {
    if habit.frequency != Frequency::Daily {
        return u32::from(is_completed_on(habit, reference));
    }

    let days = completion_days(habit);
    if !days.contains(&reference) {
        return 0;
    }
    run_ending_on(&days, reference)
}

/// Best contiguous run anywhere in the history. For non-daily habits this is
/// 1 as soon as any completion exists.
pub fn longest_streak(habit: &Habit) -> u32 {
    let days = completion_days(habit);
    if habit.frequency != Frequency::Daily {
        return u32::from(!days.is_empty());
    }

    days.iter()
        .map(|&day| run_ending_on(&days, day))
        .max()
        .unwrap_or(0)
}

/// Collapses the completion list into a day set. The wire order of
/// completions is unspecified, and duplicates per day are tolerated.
fn completion_days(habit: &Habit) -> BTreeSet<NaiveDate> {
    habit.completions.iter().map(|c| c.date).collect()
}

fn run_ending_on(days: &BTreeSet<NaiveDate>, end: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut cursor = end;
    for _ in 0..MAX_LOOKBACK_DAYS {
        if !days.contains(&cursor) {
            break;
        }
        streak += 1;
        match cursor.pred_opt() {
            Some(previous) => cursor = previous,
            None => break,
        }
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Frequency, Habit, HabitCompletion};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn day(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn habit_with(frequency: Frequency, days: &[NaiveDate]) -> Habit {
        let stamp = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        Habit {
            id: "h1".to_string(),
            name: "Morning run".to_string(),
            description: None,
            frequency,
            goal: None,
            color: None,
            icon: None,
            completions: days
                .iter()
                .enumerate()
                .map(|(i, &date)| HabitCompletion {
                    id: format!("c{i}"),
                    habit_id: "h1".to_string(),
                    date,
                    notes: None,
                    created_at: stamp,
                })
                .collect(),
            created_at: stamp,
            updated_at: stamp,
        }
    }

    #[test]
    fn empty_history_has_no_streaks() {
        let habit = habit_with(Frequency::Daily, &[]);
        assert_eq!(current_streak(&habit, day("2024-01-03")), 0);
        assert_eq!(longest_streak(&habit), 0);
        assert!(!is_completed_on(&habit, day("2024-01-03")));
    }

    #[test]
    fn missing_reference_day_resets_the_current_streak() {
        let habit = habit_with(Frequency::Daily, &[day("2024-01-01"), day("2024-01-02")]);
        assert_eq!(current_streak(&habit, day("2024-01-03")), 0);
        assert_eq!(longest_streak(&habit), 2);
    }

    #[test]
    fn consecutive_days_count_back_from_the_reference() {
        let habit = habit_with(
            Frequency::Daily,
            &[day("2024-01-01"), day("2024-01-02"), day("2024-01-03")],
        );
        assert_eq!(current_streak(&habit, day("2024-01-03")), 3);
        assert_eq!(longest_streak(&habit), 3);
    }

    #[test]
    fn isolated_days_do_not_join_a_run() {
        let habit = habit_with(
            Frequency::Daily,
            &[day("2024-01-14"), day("2024-01-15"), day("2024-01-05")],
        );
        assert_eq!(longest_streak(&habit), 2);
        assert_eq!(current_streak(&habit, day("2024-01-15")), 2);
    }

    #[test]
    fn duplicate_completions_do_not_inflate_streaks() {
        let habit = habit_with(
            Frequency::Daily,
            &[day("2024-01-02"), day("2024-01-02"), day("2024-01-01")],
        );
        assert!(is_completed_on(&habit, day("2024-01-02")));
        assert_eq!(current_streak(&habit, day("2024-01-02")), 2);
        assert_eq!(longest_streak(&habit), 2);
    }

    #[test]
    fn completion_order_on_the_wire_does_not_matter() {
        let shuffled = habit_with(
            Frequency::Daily,
            &[day("2024-01-02"), day("2023-12-31"), day("2024-01-01")],
        );
        assert_eq!(current_streak(&shuffled, day("2024-01-02")), 3);
        assert_eq!(longest_streak(&shuffled), 3);
    }

    #[test]
    fn weekly_habits_only_check_same_day_presence() {
        let habit = habit_with(Frequency::Weekly, &[day("2024-01-01")]);
        assert_eq!(current_streak(&habit, day("2024-01-01")), 1);
        assert_eq!(current_streak(&habit, day("2024-01-02")), 0);
        assert_eq!(longest_streak(&habit), 1);

        let empty = habit_with(Frequency::Monthly, &[]);
        assert_eq!(longest_streak(&empty), 0);
    }

    #[test]
    fn repeated_computation_is_stable() {
        let habit = habit_with(
            Frequency::Daily,
            &[day("2024-01-01"), day("2024-01-02"), day("2024-01-03")],
        );
        let first = (
            current_streak(&habit, day("2024-01-03")),
            longest_streak(&habit),
        );
        let second = (
            current_streak(&habit, day("2024-01-03")),
            longest_streak(&habit),
        );
        assert_eq!(first, second);
    }

    #[test]
    fn backward_walk_is_bounded() {
        let end = day("2024-01-01");
        let mut days = Vec::new();
        let mut cursor = end;
        for _ in 0..4000 {
            days.push(cursor);
            cursor = cursor.pred_opt().unwrap();
        }
        let habit = habit_with(Frequency::Daily, &days);
        assert_eq!(current_streak(&habit, end), 3650);
    }

    #[test]
    fn milestone_set_matches_the_celebrated_lengths() {
        for streak in [3, 7, 14, 21, 30, 50, 75, 100] {
            assert!(is_milestone(streak));
        }
        for streak in [0, 1, 2, 6, 8, 99, 101] {
            assert!(!is_milestone(streak));
        }
    }
}
