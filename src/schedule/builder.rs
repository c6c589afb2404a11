//! Schedule construction rules

use std::collections::{BTreeMap, BTreeSet};

use super::{DaySchedule, ValidationError, WeekSchedule};
use crate::exercises::{ExerciseAssignment, FocusType, MuscleCatalog};
use crate::week::WeekDay;

pub const MIN_WORKOUT_DAYS: usize = 2;
pub const MAX_WORKOUT_DAYS: usize = 5;

/// Validates proposed changes against the catalog and returns updated schedules.
///
/// Every operation works on a copy, so an `Err` leaves the caller's schedule as it was.
pub struct ScheduleBuilder<'a> {
    catalog: &'a MuscleCatalog,
}

impl<'a> ScheduleBuilder<'a> {
    pub fn new(catalog: &'a MuscleCatalog) -> Self {
        Self { catalog }
    }

    /// Mark `days` as workout days and every other day as rest.
    /// All muscle groups and exercises are cleared for reassignment.
    pub fn set_workout_days(
        &self,
        _schedule: &WeekSchedule,
        days: &BTreeSet<WeekDay>,
    ) -> Result<WeekSchedule, ValidationError> {
        let count = days.len();
        if count < MIN_WORKOUT_DAYS {
            return Err(ValidationError::TooFewWorkoutDays { count });
        }
        if count > MAX_WORKOUT_DAYS {
            return Err(ValidationError::TooManyWorkoutDays { count });
        }

        let mut next = WeekSchedule::new();
        for day in days {
            *next.day_mut(*day) = DaySchedule::workout(*day);
        }
        Ok(next)
    }

    /// Replace muscle groups on the given workout days.
    ///
    /// The batch is rejected as a whole if any key is a rest day, any set is empty,
    /// or two workout days next to each other would share a muscle group.
    pub fn assign_muscle_groups(
        &self,
        schedule: &WeekSchedule,
        per_day: &BTreeMap<WeekDay, BTreeSet<String>>,
    ) -> Result<WeekSchedule, ValidationError> {
        if let Some(day) = per_day.keys().find(|d| schedule.day(**d).is_rest_day()) {
            return Err(ValidationError::UnknownOrRestDay { day: *day });
        }
        if let Some((day, _)) = per_day.iter().find(|(_, groups)| groups.is_empty()) {
            return Err(ValidationError::EmptyMuscleSelection { day: *day });
        }

        let mut next = schedule.clone();
        for (day, groups) in per_day {
            next.day_mut(*day).muscle_groups = groups.clone();
        }

        let workout: Vec<&DaySchedule> = next.workout_days().collect();
        for pair in workout.windows(2) {
            let (first, second) = (pair[0], pair[1]);
            if !first.day.is_adjacent(second.day) {
                continue;
            }
            let groups: BTreeSet<String> = first
                .muscle_groups
                .intersection(&second.muscle_groups)
                .cloned()
                .collect();
            if !groups.is_empty() {
                return Err(ValidationError::ConsecutiveMuscleOverlap {
                    first: first.day,
                    second: second.day,
                    groups,
                });
            }
        }

        Ok(next)
    }

    /// Append exercises to every day that targets `muscle_group`.
    /// Exercises whose descriptor is already on the day are skipped.
    pub fn add_exercise_assignment(
        &self,
        schedule: &WeekSchedule,
        muscle_group: &str,
        exercises: &[(String, FocusType)],
    ) -> Result<WeekSchedule, ValidationError> {
        if !self.catalog.contains(muscle_group) {
            return Err(ValidationError::UnknownMuscleGroup {
                muscle_group: muscle_group.to_string(),
            });
        }

        let mut next = schedule.clone();
        for day in next.days.iter_mut().filter(|d| d.targets(muscle_group)) {
            for (name, focus) in exercises {
                let assignment = ExerciseAssignment::new(name.as_str(), muscle_group, *focus);
                if !day.has_descriptor(&assignment.descriptor()) {
                    day.exercises.push(assignment);
                }
            }
        }
        Ok(next)
    }

    /// All days back to rest
    pub fn reset(&self, _schedule: &WeekSchedule) -> WeekSchedule {
        WeekSchedule::new()
    }
}
