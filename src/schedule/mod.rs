//! Weekly schedule model and the rules for building it
//!
//! - `WeekSchedule` always holds seven days, Monday to Sunday
//! - `ScheduleBuilder` validates proposed changes and returns a new schedule
//! - Rejected changes leave the input schedule untouched

pub mod builder;
pub mod error;

pub use builder::ScheduleBuilder;
pub use error::ValidationError;

use std::collections::BTreeSet;

use crate::exercises::ExerciseAssignment;
use crate::week::WeekDay;

/// Lifecycle of a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayState {
    Rest,
    WorkoutUnassigned,
    WorkoutAssigned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySchedule {
    day: WeekDay,
    is_rest_day: bool,
    muscle_groups: BTreeSet<String>,
    exercises: Vec<ExerciseAssignment>,
}

impl DaySchedule {
    pub fn rest(day: WeekDay) -> Self {
        Self {
            day,
            is_rest_day: true,
            muscle_groups: BTreeSet::new(),
            exercises: Vec::new(),
        }
    }

    /// Workout day with nothing assigned yet
    pub fn workout(day: WeekDay) -> Self {
        Self {
            is_rest_day: false,
            ..Self::rest(day)
        }
    }

    /// Rebuild a day from stored parts; `None` if a rest day would carry training data
    pub fn from_parts(
        day: WeekDay,
        is_rest_day: bool,
        muscle_groups: BTreeSet<String>,
        exercises: Vec<ExerciseAssignment>,
    ) -> Option<Self> {
        if is_rest_day && (!muscle_groups.is_empty() || !exercises.is_empty()) {
            return None;
        }
        Some(Self {
            day,
            is_rest_day,
            muscle_groups,
            exercises,
        })
    }

    pub fn day(&self) -> WeekDay {
        self.day
    }

    pub fn is_rest_day(&self) -> bool {
        self.is_rest_day
    }

    pub fn muscle_groups(&self) -> &BTreeSet<String> {
        &self.muscle_groups
    }

    pub fn exercises(&self) -> &[ExerciseAssignment] {
        &self.exercises
    }

    pub fn targets(&self, muscle_group: &str) -> bool {
        self.muscle_groups.contains(muscle_group)
    }

    pub fn state(&self) -> DayState {
        if self.is_rest_day {
            DayState::Rest
        } else if self.muscle_groups.is_empty() {
            DayState::WorkoutUnassigned
        } else {
            DayState::WorkoutAssigned
        }
    }

    fn has_descriptor(&self, descriptor: &str) -> bool {
        self.exercises.iter().any(|e| e.descriptor() == descriptor)
    }
}

/// Seven days, one per `WeekDay`, indexed by `WeekDay::index`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekSchedule {
    days: [DaySchedule; 7],
}

impl Default for WeekSchedule {
    fn default() -> Self {
        Self {
            days: WeekDay::ALL.map(DaySchedule::rest),
        }
    }
}

impl WeekSchedule {
    /// All rest days
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from days in Monday..Sunday order; `None` on gaps, duplicates or bad order
    pub fn from_days(days: Vec<DaySchedule>) -> Option<Self> {
        let days: [DaySchedule; 7] = days.try_into().ok()?;
        if days.iter().zip(WeekDay::ALL).any(|(d, wd)| d.day != wd) {
            return None;
        }
        Some(Self { days })
    }

    pub fn day(&self, day: WeekDay) -> &DaySchedule {
        &self.days[day.index()]
    }

    fn day_mut(&mut self, day: WeekDay) -> &mut DaySchedule {
        &mut self.days[day.index()]
    }

    pub fn days(&self) -> impl Iterator<Item = &DaySchedule> {
        self.days.iter()
    }

    pub fn workout_days(&self) -> impl Iterator<Item = &DaySchedule> {
        self.days.iter().filter(|d| !d.is_rest_day)
    }

    pub fn rest_day_count(&self) -> usize {
        self.days.iter().filter(|d| d.is_rest_day).count()
    }
}
