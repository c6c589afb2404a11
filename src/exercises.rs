//! Exercise definitions and the muscle group catalog

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::schedule::ValidationError;
use crate::week::ParseError;

/// Training style, fixes sets and reps
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FocusType {
    Strength,
    #[default]
    Hypertrophy,
    Endurance,
}

impl FocusType {
    pub const ALL: [FocusType; 3] = [
        FocusType::Strength,
        FocusType::Hypertrophy,
        FocusType::Endurance,
    ];

    /// (sets, reps)
    pub fn volume(self) -> (u32, u32) {
        match self {
            FocusType::Strength => (5, 6),
            FocusType::Hypertrophy => (4, 12),
            FocusType::Endurance => (3, 20),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FocusType::Strength => "Strength",
            FocusType::Hypertrophy => "Hypertrophy",
            FocusType::Endurance => "Endurance",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            FocusType::Strength => "heavy weight, short sets for explosiveness and strength",
            FocusType::Hypertrophy => "moderate weight tuned for muscle growth",
            FocusType::Endurance => "light weight, high rep range for endurance",
        }
    }
}

impl fmt::Display for FocusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FocusType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FocusType::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseError::Focus(wanted.to_string()))
    }
}

/// One training prescription attached to a workout day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseAssignment {
    pub name: String,
    pub muscle_group: String,
    pub focus: FocusType,
}

impl ExerciseAssignment {
    pub fn new(name: impl Into<String>, muscle_group: impl Into<String>, focus: FocusType) -> Self {
        Self {
            name: name.into(),
            muscle_group: muscle_group.into(),
            focus,
        }
    }

    pub fn sets(&self) -> u32 {
        self.focus.volume().0
    }

    pub fn reps(&self) -> u32 {
        self.focus.volume().1
    }

    /// Display form, e.g. "Bench Press (Strength) - 5x6".
    /// Days de-duplicate exercises on this string.
    pub fn descriptor(&self) -> String {
        format!("{} ({}) - {}x{}", self.name, self.focus, self.sets(), self.reps())
    }

    /// Inverse of `descriptor`. `None` if the text is malformed or the
    /// sets/reps do not match the focus table.
    pub fn parse_descriptor(text: &str, muscle_group: impl Into<String>) -> Option<Self> {
        let (head, volume) = text.trim().rsplit_once(" - ")?;
        let (name, focus) = head.strip_suffix(')')?.rsplit_once(" (")?;
        let focus: FocusType = focus.parse().ok()?;
        let (sets, reps) = volume.split_once('x')?;
        if (sets.parse::<u32>().ok()?, reps.parse::<u32>().ok()?) != focus.volume() {
            return None;
        }
        Some(Self::new(name.trim(), muscle_group, focus))
    }
}

/// Catalog entry for one muscle group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuscleEntry {
    pub id: String,
    pub sub_muscles: Vec<String>,
    pub exercises: Vec<String>,
}

/// On-disk catalog layout: two maps keyed by muscle group, kept in file order
#[derive(Debug, Deserialize)]
struct CatalogFile {
    exercises: Map<String, Value>,
    #[serde(default)]
    muscle_groups: Map<String, Value>,
}

/// Read-only reference data: muscle groups, their sub-muscles and exercises
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuscleCatalog {
    entries: Vec<MuscleEntry>,
}

const BUILTIN: &[(&str, &[&str], &[&str])] = &[
    (
        "Chest",
        &["upper chest", "middle chest", "lower chest"],
        &["Bench Press", "Incline Dumbbell Press", "Cable Fly"],
    ),
    (
        "Back",
        &["lats", "rhomboids", "lower back"],
        &["Pull Up", "Barbell Row", "Lat Pulldown"],
    ),
    (
        "Shoulders",
        &["front delts", "side delts", "rear delts"],
        &["Overhead Press", "Lateral Raise", "Face Pull"],
    ),
    (
        "Biceps",
        &["long head", "short head"],
        &["Barbell Curl", "Incline Dumbbell Curl"],
    ),
    (
        "Triceps",
        &["long head", "lateral head", "medial head"],
        &["Skull Crusher", "Cable Pushdown"],
    ),
    (
        "Legs",
        &["quads", "hamstrings", "glutes", "calves"],
        &["Squat", "Romanian Deadlift", "Leg Press", "Calf Raise"],
    ),
    ("Core", &["rectus abdominis", "obliques"], &["Hanging Leg Raise", "Plank"]),
];

impl MuscleCatalog {
    pub fn new(entries: Vec<MuscleEntry>) -> Self {
        Self { entries }
    }

    /// Default catalog shipped with the binary
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(id, subs, exercises)| MuscleEntry {
                id: id.to_string(),
                sub_muscles: subs.iter().map(|s| s.to_string()).collect(),
                exercises: exercises.iter().map(|s| s.to_string()).collect(),
            })
            .collect();
        Self { entries }
    }

    /// Load catalog from a JSON file with `exercises` and `muscle_groups` maps
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        let catalog = Self::from_json(&text)
            .with_context(|| format!("parsing catalog {}", path.display()))?;
        debug!(path = %path.display(), groups = catalog.entries.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let mut file: CatalogFile = serde_json::from_str(text)?;
        let mut entries = Vec::with_capacity(file.exercises.len());
        for (id, exercises) in file.exercises {
            let exercises: Vec<String> = serde_json::from_value(exercises)
                .with_context(|| format!("exercises for '{}'", id))?;
            let sub_muscles: Vec<String> = match file.muscle_groups.remove(&id) {
                Some(subs) => serde_json::from_value(subs)
                    .with_context(|| format!("sub-muscles for '{}'", id))?,
                None => Vec::new(),
            };
            entries.push(MuscleEntry {
                id,
                sub_muscles,
                exercises,
            });
        }
        for id in file.muscle_groups.keys() {
            warn!(muscle = %id, "muscle group has no exercises, skipped");
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[MuscleEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&MuscleEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Case-insensitive lookup returning the canonical id
    pub fn resolve(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|e| e.id.eq_ignore_ascii_case(name))
            .map(|e| e.id.as_str())
    }

    /// Sentence recommending exercises for a muscle group and naming what they hit
    pub fn describe(&self, id: &str) -> Result<String, ValidationError> {
        let entry = self.get(id).ok_or_else(|| ValidationError::UnknownMuscleGroup {
            muscle_group: id.to_string(),
        })?;

        let mut text = match entry.exercises.as_slice() {
            [] => format!("No exercises are listed for {}.", entry.id),
            [only] => format!("For {}, a recommended exercise is: {}.", entry.id, only),
            many => format!("For {}, you can do: {}.", entry.id, join_sentence(many)),
        };
        if !entry.sub_muscles.is_empty() {
            let subject = if entry.exercises.len() == 1 { "This will" } else { "These will" };
            text.push_str(&format!(
                " {} specifically hit the {}.",
                subject,
                join_sentence(&entry.sub_muscles)
            ));
        }
        Ok(text)
    }
}

/// Join items as prose: "a", "a and b", "a, b, and c"
pub fn join_sentence<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [one] => one.as_ref().to_string(),
        [first, second] => format!("{} and {}", first.as_ref(), second.as_ref()),
        [rest @ .., last] => {
            let head: Vec<&str> = rest.iter().map(|s| s.as_ref()).collect();
            format!("{}, and {}", head.join(", "), last.as_ref())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_volume_table() {
        assert_eq!(FocusType::Strength.volume(), (5, 6));
        assert_eq!(FocusType::Hypertrophy.volume(), (4, 12));
        assert_eq!(FocusType::Endurance.volume(), (3, 20));
    }

    #[test]
    fn test_focus_parse() {
        assert_eq!("strength".parse::<FocusType>(), Ok(FocusType::Strength));
        assert_eq!("ENDURANCE".parse::<FocusType>(), Ok(FocusType::Endurance));
        assert!("cardio".parse::<FocusType>().is_err());
        assert_eq!(FocusType::default(), FocusType::Hypertrophy);
    }

    #[test]
    fn test_descriptor() {
        let ex = ExerciseAssignment::new("Bench Press", "Chest", FocusType::Strength);
        assert_eq!(ex.descriptor(), "Bench Press (Strength) - 5x6");
        let ex = ExerciseAssignment::new("Squat", "Legs", FocusType::Endurance);
        assert_eq!(ex.sets(), 3);
        assert_eq!(ex.reps(), 20);
        assert_eq!(ex.descriptor(), "Squat (Endurance) - 3x20");
    }

    #[test]
    fn test_parse_descriptor() {
        let ex = ExerciseAssignment::parse_descriptor("Bench Press (Strength) - 5x6", "Chest");
        assert_eq!(ex, Some(ExerciseAssignment::new("Bench Press", "Chest", FocusType::Strength)));

        let ex = ExerciseAssignment::new("Curl (21s)", "Biceps", FocusType::Endurance);
        assert_eq!(ExerciseAssignment::parse_descriptor(&ex.descriptor(), "Biceps"), Some(ex));

        assert!(ExerciseAssignment::parse_descriptor("Bench Press", "Chest").is_none());
        assert!(ExerciseAssignment::parse_descriptor("Squat (Cardio) - 5x6", "Legs").is_none());
        assert!(ExerciseAssignment::parse_descriptor("Squat (Strength) - 4x12", "Legs").is_none());
    }

    #[test]
    fn test_catalog_rejects_bad_exercise_list() {
        let json = r#"{ "exercises": { "Chest": "Bench Press" } }"#;
        assert!(MuscleCatalog::from_json(json).is_err());
    }

    #[test]
    fn test_join_sentence() {
        assert_eq!(join_sentence::<&str>(&[]), "");
        assert_eq!(join_sentence(&["lats"]), "lats");
        assert_eq!(join_sentence(&["lats", "traps"]), "lats and traps");
        assert_eq!(join_sentence(&["a", "b", "c"]), "a, b, and c");
    }

    #[test]
    fn test_builtin_lookup() {
        let catalog = MuscleCatalog::builtin();
        assert!(catalog.contains("Chest"));
        assert!(!catalog.contains("chest"));
        assert_eq!(catalog.resolve("chest"), Some("Chest"));
        assert_eq!(catalog.resolve("wings"), None);
    }

    #[test]
    fn test_describe() {
        let catalog = MuscleCatalog::builtin();
        let text = catalog.describe("Biceps").unwrap();
        assert_eq!(
            text,
            "For Biceps, you can do: Barbell Curl and Incline Dumbbell Curl. \
             These will specifically hit the long head and short head."
        );
        assert_eq!(
            catalog.describe("Wings"),
            Err(ValidationError::UnknownMuscleGroup { muscle_group: "Wings".into() })
        );
    }

    #[test]
    fn test_describe_single_exercise_without_sub_muscles() {
        let catalog = MuscleCatalog::new(vec![MuscleEntry {
            id: "Neck".into(),
            sub_muscles: vec![],
            exercises: vec!["Neck Curl".into()],
        }]);
        assert_eq!(
            catalog.describe("Neck").unwrap(),
            "For Neck, a recommended exercise is: Neck Curl."
        );
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "exercises": { "Chest": ["Bench Press", "Dips"], "Back": ["Row"] },
            "muscle_groups": { "Chest": ["upper chest", "lower chest"] }
        }"#;
        let catalog = MuscleCatalog::from_json(json).unwrap();
        assert_eq!(catalog.entries().len(), 2);
        let ids: Vec<&str> = catalog.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["Chest", "Back"]);
        let chest = catalog.get("Chest").unwrap();
        assert_eq!(chest.exercises, vec!["Bench Press", "Dips"]);
        assert_eq!(chest.sub_muscles, vec!["upper chest", "lower chest"]);
        assert!(catalog.get("Back").unwrap().sub_muscles.is_empty());
    }
}
