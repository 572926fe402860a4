use crate::activity::Activity;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One entry of a seed file: the activity name plus its record, flattened.
///
/// ```yaml
/// - name: Chess Club
///   description: Learn strategies and compete in chess tournaments
///   schedule: Fridays, 3:30 PM - 5:00 PM
///   max_participants: 12
///   participants: [michael@mergington.edu]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedActivity {
    pub name: String,
    #[serde(flatten)]
    pub activity: Activity,
}

impl SeedActivity {
    pub fn new(name: impl Into<String>, activity: Activity) -> Self {
        Self {
            name: name.into(),
            activity,
        }
    }
}

/// Read a YAML seed file. Validation of names and participants happens in
/// [`Directory::from_seed`](crate::Directory::from_seed).
pub fn load_seed(path: &Path) -> Result<Vec<SeedActivity>> {
    let data = std::fs::read_to_string(path)?;
    let entries: Vec<SeedActivity> = serde_yaml::from_str(&data)?;
    Ok(entries)
}

/// The built-in activity catalogue used when no seed file is given.
pub fn default_seed() -> Vec<SeedActivity> {
    fn entry(
        name: &str,
        description: &str,
        schedule: &str,
        max: u32,
        participants: &[&str],
    ) -> SeedActivity {
        SeedActivity::new(
            name,
            Activity::new(description, schedule, max).with_participants(participants.iter().copied()),
        )
    }

    vec![
        entry(
            "Chess Club",
            "Learn strategies and compete in chess tournaments",
            "Fridays, 3:30 PM - 5:00 PM",
            12,
            &["michael@mergington.edu", "daniel@mergington.edu"],
        ),
        entry(
            "Programming Class",
            "Learn programming fundamentals and build software projects",
            "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
            20,
            &["emma@mergington.edu", "sophia@mergington.edu"],
        ),
        entry(
            "Gym Class",
            "Physical education and sports activities",
            "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
            30,
            &["john@mergington.edu", "olivia@mergington.edu"],
        ),
        entry(
            "Soccer Team",
            "Train with the varsity squad and compete in the regional league",
            "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
            22,
            &["liam@mergington.edu", "noah@mergington.edu"],
        ),
        entry(
            "Basketball Club",
            "Practice drills and play friendly matches against other schools",
            "Wednesdays, 3:30 PM - 5:00 PM",
            15,
            &["ava@mergington.edu", "mia@mergington.edu"],
        ),
        entry(
            "Art Club",
            "Explore painting, drawing and sculpture in the studio",
            "Thursdays, 3:30 PM - 5:00 PM",
            15,
            &["amelia@mergington.edu", "harper@mergington.edu"],
        ),
        entry(
            "Drama Club",
            "Rehearse and stage plays and musical performances",
            "Mondays and Wednesdays, 4:00 PM - 5:30 PM",
            20,
            &["ella@mergington.edu", "scarlett@mergington.edu"],
        ),
        entry(
            "Science Club",
            "Run experiments and prepare projects for the science fair",
            "Fridays, 3:30 PM - 5:00 PM",
            18,
            &["james@mergington.edu", "benjamin@mergington.edu"],
        ),
        entry(
            "Debate Team",
            "Build public speaking and argumentation skills for tournaments",
            "Tuesdays, 3:30 PM - 5:00 PM",
            12,
            &["charlotte@mergington.edu", "henry@mergington.edu"],
        ),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
