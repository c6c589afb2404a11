//! Store module - JSON file storage for the weekly schedule

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::exercises::{ExerciseAssignment, FocusType};
use crate::schedule::{DaySchedule, WeekSchedule};
use crate::week::WeekDay;

/// Whole persisted document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleDocument {
    pub workout_schedule: Vec<DayRecord>,
}

/// One day as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayRecord {
    pub name: WeekDay,
    pub rest: bool,
    #[serde(default)]
    pub workout_purpose: Vec<String>,
    #[serde(default)]
    pub exercises: Vec<ExerciseEntry>,
}

/// An exercise is either a bare descriptor string ("Bench Press (Strength) - 5x6"),
/// the layout older schedule files use, or a full record. Records are always written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ExerciseEntry {
    Descriptor(String),
    Record(ExerciseRecord),
}

impl ExerciseEntry {
    /// `muscle_group` fills in the target for bare descriptors
    fn into_assignment(self, muscle_group: &str) -> Result<ExerciseAssignment> {
        match self {
            ExerciseEntry::Record(r) => {
                Ok(ExerciseAssignment::new(r.name, r.muscle_group, r.focus))
            }
            ExerciseEntry::Descriptor(text) => {
                ExerciseAssignment::parse_descriptor(&text, muscle_group)
                    .with_context(|| format!("unrecognised exercise '{}'", text))
            }
        }
    }
}

/// Exercise as stored on disk. Sets, reps and descriptor are written for readers
/// of the file; on load they are derived from `focus` again.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExerciseRecord {
    pub name: String,
    pub muscle_group: String,
    pub focus: FocusType,
    #[serde(default)]
    pub sets: u32,
    #[serde(default)]
    pub reps: u32,
    #[serde(default)]
    pub descriptor: String,
}

impl From<&ExerciseAssignment> for ExerciseRecord {
    fn from(ex: &ExerciseAssignment) -> Self {
        Self {
            name: ex.name.clone(),
            muscle_group: ex.muscle_group.clone(),
            focus: ex.focus,
            sets: ex.sets(),
            reps: ex.reps(),
            descriptor: ex.descriptor(),
        }
    }
}

impl From<&WeekSchedule> for ScheduleDocument {
    fn from(week: &WeekSchedule) -> Self {
        let workout_schedule = week
            .days()
            .map(|d| DayRecord {
                name: d.day(),
                rest: d.is_rest_day(),
                workout_purpose: d.muscle_groups().iter().cloned().collect(),
                exercises: d
                    .exercises()
                    .iter()
                    .map(|e| ExerciseEntry::Record(e.into()))
                    .collect(),
            })
            .collect();
        Self { workout_schedule }
    }
}

impl TryFrom<ScheduleDocument> for WeekSchedule {
    type Error = anyhow::Error;

    fn try_from(doc: ScheduleDocument) -> Result<Self> {
        let mut days = Vec::with_capacity(doc.workout_schedule.len());
        for record in doc.workout_schedule {
            let muscle_groups: BTreeSet<String> = record.workout_purpose.into_iter().collect();
            // Bare descriptors only name their muscle group when the day trains one group
            let target = match muscle_groups.len() {
                1 => muscle_groups.first().cloned().unwrap_or_default(),
                _ => String::new(),
            };
            let exercises = record
                .exercises
                .into_iter()
                .map(|e| e.into_assignment(&target))
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("exercises on {}", record.name))?;
            let day = DaySchedule::from_parts(record.name, record.rest, muscle_groups, exercises);
            let Some(day) = day else {
                bail!("{} is a rest day but has muscle groups or exercises", record.name);
            };
            days.push(day);
        }
        let count = days.len();
        WeekSchedule::from_days(days).with_context(|| {
            format!("expected Monday..Sunday exactly once in order, got {} day(s)", count)
        })
    }
}

/// Single-document schedule store backed by a JSON file
pub struct ScheduleStore {
    path: PathBuf,
}

impl ScheduleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored schedule. A missing file is `Ok(None)`.
    pub fn load(&self) -> Result<Option<WeekSchedule>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no schedule stored yet");
                return Ok(None);
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("reading schedule {}", self.path.display()));
            }
        };

        let doc: ScheduleDocument = serde_json::from_str(&text)
            .with_context(|| format!("parsing schedule {}", self.path.display()))?;
        let week = WeekSchedule::try_from(doc)
            .with_context(|| format!("invalid schedule {}", self.path.display()))?;
        Ok(Some(week))
    }

    /// Stored schedule, or an all-rest week on first use
    pub fn load_or_default(&self) -> Result<WeekSchedule> {
        Ok(self.load()?.unwrap_or_default())
    }

    /// Replace the stored document. Writes a sibling temp file and renames it,
    /// so readers see either the old or the new schedule.
    pub fn save(&self, week: &WeekSchedule) -> Result<()> {
        let doc = ScheduleDocument::from(week);
        let json = serde_json::to_string_pretty(&doc)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing schedule {}", self.path.display()))?;

        info!(
            path = %self.path.display(),
            workout_days = 7 - week.rest_day_count(),
            "schedule saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercises::MuscleCatalog;
    use crate::schedule::ScheduleBuilder;
    use std::collections::BTreeMap;

    fn temp_path(name: &str) -> PathBuf {
        let file = format!("weekplan-{}-{}.json", std::process::id(), name);
        let path = std::env::temp_dir().join(file);
        let _ = fs::remove_file(&path);
        path
    }

    fn sample_week() -> WeekSchedule {
        let catalog = MuscleCatalog::builtin();
        let builder = ScheduleBuilder::new(&catalog);
        let days: BTreeSet<WeekDay> =
            [WeekDay::Monday, WeekDay::Wednesday, WeekDay::Friday].into();
        let week = builder.set_workout_days(&WeekSchedule::new(), &days).unwrap();
        let groups = BTreeMap::from([
            (
                WeekDay::Monday,
                BTreeSet::from(["Chest".to_string(), "Triceps".to_string()]),
            ),
            (WeekDay::Wednesday, BTreeSet::from(["Legs".to_string()])),
        ]);
        let week = builder.assign_muscle_groups(&week, &groups).unwrap();
        builder
            .add_exercise_assignment(
                &week,
                "Chest",
                &[
                    ("Bench Press".to_string(), FocusType::Strength),
                    ("Cable Fly".to_string(), FocusType::Endurance),
                ],
            )
            .unwrap()
    }

    #[test]
    fn test_missing_file_is_none() {
        let store = ScheduleStore::new(temp_path("missing"));
        assert!(store.load().unwrap().is_none());
        assert_eq!(store.load_or_default().unwrap(), WeekSchedule::new());
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("roundtrip");
        let store = ScheduleStore::new(&path);
        let week = sample_week();

        store.save(&week).unwrap();
        assert_eq!(store.load().unwrap(), Some(week));
        assert!(!path.with_extension("json.tmp").exists());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_document_layout() {
        let doc = ScheduleDocument::from(&sample_week());
        let json = serde_json::to_value(&doc).unwrap();
        let days = json["workout_schedule"].as_array().unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0]["name"], "Monday");
        assert_eq!(days[0]["rest"], false);
        assert_eq!(days[0]["workout_purpose"], serde_json::json!(["Chest", "Triceps"]));
        assert_eq!(days[0]["exercises"][0]["descriptor"], "Bench Press (Strength) - 5x6");
        assert_eq!(days[1]["rest"], true);
        assert_eq!(days[6]["name"], "Sunday");
    }

    #[test]
    fn test_rejects_missing_day() {
        let mut doc = ScheduleDocument::from(&WeekSchedule::new());
        doc.workout_schedule.pop();
        assert!(WeekSchedule::try_from(doc).is_err());
    }

    #[test]
    fn test_rejects_rest_day_with_exercises() {
        let mut doc = ScheduleDocument::from(&sample_week());
        doc.workout_schedule[0].rest = true;
        assert!(WeekSchedule::try_from(doc).is_err());
    }

    #[test]
    fn test_load_reports_bad_json() {
        let path = temp_path("garbage");
        fs::write(&path, "{ not json").unwrap();
        assert!(ScheduleStore::new(&path).load().is_err());
        fs::remove_file(&path).unwrap();
    }

    fn descriptor_document(monday: &str) -> String {
        let mut days: Vec<String> = WeekDay::ALL[1..]
            .iter()
            .map(|d| {
                format!(r#"{{"name":"{}","rest":true,"workout_purpose":[],"exercises":[]}}"#, d)
            })
            .collect();
        days.insert(0, monday.to_string());
        format!(r#"{{"workout_schedule":[{}]}}"#, days.join(","))
    }

    #[test]
    fn test_loads_descriptor_strings() {
        let path = temp_path("descriptors");
        let monday = r#"{"name":"Monday","rest":false,"workout_purpose":["Chest"],
            "exercises":["Bench Press (Strength) - 5x6","Cable Fly (Hypertrophy) - 4x12"]}"#;
        fs::write(&path, descriptor_document(monday)).unwrap();

        let week = ScheduleStore::new(&path).load().unwrap().unwrap();
        let exercises = week.day(WeekDay::Monday).exercises();
        assert_eq!(
            exercises,
            &[
                ExerciseAssignment::new("Bench Press", "Chest", FocusType::Strength),
                ExerciseAssignment::new("Cable Fly", "Chest", FocusType::Hypertrophy),
            ]
        );
        assert_eq!(week.rest_day_count(), 6);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_descriptor_on_multi_group_day_has_no_muscle_group() {
        let monday = r#"{"name":"Monday","rest":false,"workout_purpose":["Chest","Triceps"],
            "exercises":["Skull Crusher (Endurance) - 3x20"]}"#;
        let doc: ScheduleDocument = serde_json::from_str(&descriptor_document(monday)).unwrap();
        let week = WeekSchedule::try_from(doc).unwrap();
        let ex = &week.day(WeekDay::Monday).exercises()[0];
        assert_eq!(ex.muscle_group, "");
        assert_eq!(ex.descriptor(), "Skull Crusher (Endurance) - 3x20");
    }

    #[test]
    fn test_rejects_malformed_descriptor() {
        let monday = r#"{"name":"Monday","rest":false,"workout_purpose":["Chest"],
            "exercises":["Bench Press"]}"#;
        let doc: ScheduleDocument = serde_json::from_str(&descriptor_document(monday)).unwrap();
        assert!(WeekSchedule::try_from(doc).is_err());
    }
}
