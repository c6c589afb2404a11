//! weekplan - Personal weekly workout schedule planner
//!
//! Pick workout days, spread muscle groups so none is trained two days
//! in a row, and attach exercises with a training focus.

pub mod exercises;
pub mod schedule;
pub mod store;
pub mod tui;
pub mod week;

pub use exercises::{ExerciseAssignment, FocusType, MuscleCatalog};
pub use schedule::{DaySchedule, DayState, ScheduleBuilder, ValidationError, WeekSchedule};
pub use store::ScheduleStore;
pub use week::{ParseError, WeekDay};
