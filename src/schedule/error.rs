use std::collections::BTreeSet;

use crate::exercises::join_sentence;
use crate::week::WeekDay;

/// Rejected schedule change. Always recoverable by picking different input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{count} workout day(s) a week is not enough for proper growth, pick at least 2")]
    TooFewWorkoutDays { count: usize },
    #[error("{count} workout days leaves too little rest, keep at least 2 rest days")]
    TooManyWorkoutDays { count: usize },
    #[error("{day} is not a workout day")]
    UnknownOrRestDay { day: WeekDay },
    #[error("Select at least one muscle group for {day}")]
    EmptyMuscleSelection { day: WeekDay },
    #[error(
        "You can't train these on consecutive days ({first} -> {second}): {}",
        overlap_list(.groups)
    )]
    ConsecutiveMuscleOverlap {
        first: WeekDay,
        second: WeekDay,
        groups: BTreeSet<String>,
    },
    #[error("No exercises found for '{muscle_group}'")]
    UnknownMuscleGroup { muscle_group: String },
}

fn overlap_list(groups: &BTreeSet<String>) -> String {
    let groups: Vec<&str> = groups.iter().map(String::as_str).collect();
    join_sentence(&groups)
}
