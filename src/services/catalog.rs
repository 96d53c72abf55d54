//! Catalog loading and the built-in 7 minute workout

use std::{fs, path::Path};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::{Result, TrainerError},
    model::{Exercise, ExercisePlan, WorkoutPlan},
};

/// Exercises and workouts used to seed the workout service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub workouts: Vec<WorkoutPlan>,
}

impl Catalog {
    /// Read a JSON catalog from disk
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading catalog from {}", path.display());

        let raw = fs::read_to_string(path).map_err(|e| {
            TrainerError::Configuration(format!("Failed to read catalog {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            TrainerError::Configuration(format!("Invalid catalog {}: {}", path.display(), e))
        })
    }

    /// The classic 12 exercise, 30 second high intensity circuit
    pub fn seven_minute_workout() -> Self {
        let exercises = vec![
            Exercise::new(
                "jumpingJacks",
                "Jumping Jacks",
                "A jumping jack is a physical jumping exercise performed by jumping to a position with the legs spread wide.",
                "JumpingJacks.png",
                "jumpingjacks.wav",
            )
            .with_procedure("Assume an erect position, with feet together and arms at your side. Jump to a position with legs spread and hands touching overhead.")
            .with_videos(["dmYwZH_BNd0", "BABOdJ-2Z6o", "c4DAnQ6DtF8"]),
            Exercise::new(
                "wallSit",
                "Wall Sit",
                "A wall sit is an exercise done to strengthen the quadriceps muscles.",
                "wallsit.png",
                "wallsit.wav",
            )
            .with_videos(["y-wV4Venusw", "MMV3v4ap4ro"]),
            Exercise::new(
                "pushUp",
                "Push up",
                "A push-up is a common exercise performed in a prone position by raising and lowering the body using the arms",
                "Pushup.png",
                "pushups.wav",
            )
            .with_videos(["Eh00_rniF8E", "ZWdBqFLNljc", "UwRLWMcOdwI"]),
            Exercise::new(
                "crunches",
                "Abdominal Crunches",
                "The basic crunch is an abdominal exercise that strengthens the rectus abdominis muscles.",
                "crunches.png",
                "crunches.wav",
            )
            .with_videos(["Xyd_fa5zoEU", "MKmrqcoCZ-M"]),
            Exercise::new(
                "stepUpOntoChair",
                "Step Up Onto Chair",
                "Step exercises are ideal for building muscle in your lower body.",
                "stepUpOntoChair.jpeg",
                "stepup.wav",
            )
            .with_videos(["aajhW7DD1EA"]),
            Exercise::new(
                "squat",
                "Squat",
                "The squat is a compound, full body exercise that trains primarily the muscles of the thighs, hips, buttocks and quads.",
                "squat.png",
                "squats.wav",
            )
            .with_videos(["QKKZ9AGYTi4", "UXJrBgI2RxA"]),
            Exercise::new(
                "tricepdips",
                "Tricep Dips On Chair",
                "A body weight exercise that targets the triceps.",
                "tricepdips.jpg",
                "dips.wav",
            )
            .with_videos(["tKjcgfu44sI", "jox1rb5krQI"]),
            Exercise::new(
                "plank",
                "Plank",
                "The plank is an isometric core strength exercise that involves maintaining a difficult position for extended periods of time.",
                "Plank.png",
                "plank.wav",
            )
            .with_videos(["pSHjTRCQxIw", "TvxNkmjdhMM"]),
            Exercise::new(
                "highKnees",
                "High Knees",
                "A form exercise that develops strength and endurance of the hip flexors and quads.",
                "highknees.png",
                "highknees.wav",
            )
            .with_videos(["OAJ_J3EZkdY", "8opcQdC-V-U"]),
            Exercise::new(
                "lunges",
                "Lunges",
                "Lunges are a good exercise for strengthening, sculpting and building several muscles and muscle groups.",
                "lunges.png",
                "lunge.wav",
            )
            .with_videos(["Z2n58m2i4jg"]),
            Exercise::new(
                "pushupNRotate",
                "Pushup and Rotate",
                "A variation of pushup that requires you to rotate.",
                "pushupNRotate.jpg",
                "pushupandrotate.wav",
            )
            .with_videos(["qHQ_E-f5278"]),
            Exercise::new(
                "sidePlank",
                "Side Plank",
                "A variation to Plank done using one hand only.",
                "sideplank.png",
                "sideplank.wav",
            )
            .with_videos(["wqzrb67Dwf8", "_rdfjFSFKMY"]),
        ];

        let plan = WorkoutPlan::new(
            "7MinWorkout",
            "7 Minute Workout",
            10,
            exercises.iter().cloned().map(|e| ExercisePlan::new(e, 30)).collect(),
            "A high intensity workout that consists of 12 exercises.",
        );

        Self { exercises, workouts: vec![plan] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_minute_workout_lasts_seven_minutes_and_fifty_seconds() {
        let catalog = Catalog::seven_minute_workout();
        let plan = &catalog.workouts[0];

        assert_eq!(plan.exercises.len(), 12);
        assert_eq!(plan.total_workout_duration(), 12 * 30 + 11 * 10);
    }

    #[test]
    fn load_reports_missing_file_as_configuration_error() {
        let err = Catalog::load(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, TrainerError::Configuration(_)));
    }

    #[test]
    fn load_reads_json_catalog() {
        let path = std::env::temp_dir().join(format!("trainer-catalog-{}.json", std::process::id()));
        let json = serde_json::to_string(&Catalog::seven_minute_workout()).unwrap();
        fs::write(&path, json).unwrap();

        let catalog = Catalog::load(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(catalog.workouts[0].name, "7MinWorkout");
        assert_eq!(catalog.exercises.len(), 12);
    }
}
