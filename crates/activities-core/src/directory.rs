use crate::activity::Activity;
use crate::error::{ActivityError, Result};
use crate::seed::SeedActivity;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

// ---------------------------------------------------------------------------
// Confirmation / Listing
// ---------------------------------------------------------------------------

/// Success payload for a participant mutation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Confirmation {
    pub message: String,
}

/// Point-in-time copy of the directory, in seed order.
///
/// Serializes as a JSON/YAML map of activity name to record. Each activity is
/// copied under its own lock, so every record is internally consistent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing(Vec<(String, Activity)>);

impl Listing {
    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, a)| a)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Activity)> {
        self.0.iter().map(|(n, a)| (n.as_str(), a))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Listing {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, activity) in &self.0 {
            map.serialize_entry(name, activity)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

struct Slot {
    name: String,
    activity: Mutex<Activity>,
}

/// In-memory store of all activities.
///
/// Membership is fixed at construction. Each activity sits behind its own
/// mutex; the existence check, the membership check and the mutation of a
/// signup or unregister all happen under one lock acquisition.
pub struct Directory {
    slots: Vec<Slot>,
    index: HashMap<String, usize>,
}

impl Directory {
    /// Build a directory from seed entries, rejecting empty or duplicate
    /// activity names and duplicate participant emails.
    pub fn from_seed(entries: Vec<SeedActivity>) -> Result<Self> {
        let mut slots = Vec::with_capacity(entries.len());
        let mut index = HashMap::with_capacity(entries.len());

        for entry in entries {
            if entry.name.trim().is_empty() {
                return Err(ActivityError::InvalidSeed(
                    "activity name must not be empty".to_string(),
                ));
            }
            if index.contains_key(&entry.name) {
                return Err(ActivityError::InvalidSeed(format!(
                    "duplicate activity '{}'",
                    entry.name
                )));
            }
            if let Some(email) = entry.activity.first_duplicate() {
                return Err(ActivityError::InvalidSeed(format!(
                    "'{}' lists participant {} more than once",
                    entry.name, email
                )));
            }
            index.insert(entry.name.clone(), slots.len());
            slots.push(Slot {
                name: entry.name,
                activity: Mutex::new(entry.activity),
            });
        }

        Ok(Self { slots, index })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn list(&self) -> Listing {
        Listing(
            self.slots
                .iter()
                .map(|s| (s.name.clone(), lock(&s.activity).clone()))
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Result<Activity> {
        let slot = self.slot(name)?;
        let activity = lock(&slot.activity).clone();
        Ok(activity)
    }

    pub fn sign_up(&self, name: &str, email: &str) -> Result<Confirmation> {
        let slot = self.slot(name)?;
        let mut activity = lock(&slot.activity);
        if activity.is_participant(email) {
            return Err(ActivityError::AlreadyRegistered {
                activity: slot.name.clone(),
                email: email.to_string(),
            });
        }
        activity.participants.push(email.to_string());
        Ok(Confirmation {
            message: format!("Signed up {email} for {}", slot.name),
        })
    }

    pub fn unregister(&self, name: &str, email: &str) -> Result<Confirmation> {
        let slot = self.slot(name)?;
        let mut activity = lock(&slot.activity);
        let Some(pos) = activity.participants.iter().position(|p| p == email) else {
            return Err(ActivityError::NotRegistered {
                activity: slot.name.clone(),
                email: email.to_string(),
            });
        };
        activity.participants.remove(pos);
        Ok(Confirmation {
            message: format!("Unregistered {email} from {}", slot.name),
        })
    }

    fn slot(&self, name: &str) -> Result<&Slot> {
        self.index
            .get(name)
            .map(|&i| &self.slots[i])
            .ok_or_else(|| ActivityError::NotFound(name.to_string()))
    }
}

impl std::fmt::Debug for Directory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Directory")
            .field("activities", &self.slots.len())
            .finish()
    }
}

// A panic while holding the lock cannot leave the participant list half-written
// (push and remove are the only mutations), so a poisoned lock is still usable.
fn lock(m: &Mutex<Activity>) -> MutexGuard<'_, Activity> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn chess_only() -> Directory {
        Directory::from_seed(vec![SeedActivity::new(
            "Chess Club",
            Activity::new("Learn strategies", "Fridays, 3:30 PM - 5:00 PM", 12),
        )])
        .unwrap()
    }

    #[test]
    fn sign_up_appends_in_order() {
        let dir = chess_only();
        dir.sign_up("Chess Club", "a@x.edu").unwrap();
        dir.sign_up("Chess Club", "b@x.edu").unwrap();

        let chess = dir.get("Chess Club").unwrap();
        assert_eq!(chess.participants, vec!["a@x.edu", "b@x.edu"]);
    }

    #[test]
    fn sign_up_confirmation_names_email_and_activity() {
        let dir = chess_only();
        let c = dir.sign_up("Chess Club", "a@x.edu").unwrap();
        assert_eq!(c.message, "Signed up a@x.edu for Chess Club");
    }

    #[test]
    fn duplicate_sign_up_is_rejected_without_mutation() {
        let dir = chess_only();
        dir.sign_up("Chess Club", "a@x.edu").unwrap();

        let err = dir.sign_up("Chess Club", "a@x.edu").unwrap_err();
        assert!(matches!(err, ActivityError::AlreadyRegistered { .. }));
        assert!(err.to_string().contains("already signed up"));
        assert_eq!(dir.get("Chess Club").unwrap().participants.len(), 1);
    }

    #[test]
    fn unknown_activity_is_not_found() {
        let dir = chess_only();
        let err = dir.sign_up("Knitting", "a@x.edu").unwrap_err();
        assert!(matches!(err, ActivityError::NotFound(ref n) if n == "Knitting"));

        let err = dir.unregister("Knitting", "a@x.edu").unwrap_err();
        assert!(matches!(err, ActivityError::NotFound(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn activity_names_are_case_sensitive() {
        let dir = chess_only();
        assert!(matches!(
            dir.sign_up("chess club", "a@x.edu"),
            Err(ActivityError::NotFound(_))
        ));
    }

    #[test]
    fn unregister_removes_only_that_email() {
        let dir = chess_only();
        for e in ["a@x.edu", "b@x.edu", "c@x.edu"] {
            dir.sign_up("Chess Club", e).unwrap();
        }
        let c = dir.unregister("Chess Club", "b@x.edu").unwrap();
        assert_eq!(c.message, "Unregistered b@x.edu from Chess Club");
        assert_eq!(
            dir.get("Chess Club").unwrap().participants,
            vec!["a@x.edu", "c@x.edu"]
        );
    }

    #[test]
    fn unregister_of_non_participant_is_rejected() {
        let dir = chess_only();
        let err = dir.unregister("Chess Club", "ghost@x.edu").unwrap_err();
        assert!(matches!(err, ActivityError::NotRegistered { .. }));
        assert!(err.to_string().contains("not signed up"));
    }

    #[test]
    fn full_scenario_round_trip() {
        let dir = chess_only();
        assert!(dir.sign_up("Chess Club", "a@x.edu").is_ok());
        assert!(dir.sign_up("Chess Club", "a@x.edu").is_err());
        assert!(dir.unregister("Chess Club", "a@x.edu").is_ok());
        assert!(matches!(
            dir.unregister("Chess Club", "a@x.edu"),
            Err(ActivityError::NotRegistered { .. })
        ));
        assert!(dir.get("Chess Club").unwrap().participants.is_empty());
    }

    #[test]
    fn capacity_is_not_enforced() {
        let dir = Directory::from_seed(vec![SeedActivity::new(
            "Tiny",
            Activity::new("One seat", "Mondays", 1),
        )])
        .unwrap();
        dir.sign_up("Tiny", "a@x.edu").unwrap();
        dir.sign_up("Tiny", "b@x.edu").unwrap();
        assert_eq!(dir.get("Tiny").unwrap().spots_left(), -1);
    }

    #[test]
    fn from_seed_rejects_duplicate_names() {
        let err = Directory::from_seed(vec![
            SeedActivity::new("Chess Club", Activity::new("a", "b", 1)),
            SeedActivity::new("Chess Club", Activity::new("c", "d", 2)),
        ])
        .unwrap_err();
        assert!(matches!(err, ActivityError::InvalidSeed(_)));
    }

    #[test]
    fn from_seed_rejects_duplicate_participants() {
        let err = Directory::from_seed(vec![SeedActivity::new(
            "Chess Club",
            Activity::new("a", "b", 5).with_participants(["x@y.edu", "x@y.edu"]),
        )])
        .unwrap_err();
        assert!(matches!(err, ActivityError::InvalidSeed(_)));
    }

    #[test]
    fn from_seed_rejects_blank_name() {
        let err = Directory::from_seed(vec![SeedActivity::new(
            "  ",
            Activity::new("a", "b", 5),
        )])
        .unwrap_err();
        assert!(matches!(err, ActivityError::InvalidSeed(_)));
    }

    #[test]
    fn list_preserves_seed_order_in_json() {
        let dir = Directory::from_seed(vec![
            SeedActivity::new("Zoology", Activity::new("z", "Mon", 3)),
            SeedActivity::new("Art Club", Activity::new("a", "Tue", 3)),
        ])
        .unwrap();
        let json = serde_json::to_string(&dir.list()).unwrap();
        let z = json.find("Zoology").unwrap();
        let a = json.find("Art Club").unwrap();
        assert!(z < a, "seed order must be kept: {json}");
    }

    #[test]
    fn list_snapshot_is_detached_from_store() {
        let dir = chess_only();
        let before = dir.list();
        dir.sign_up("Chess Club", "a@x.edu").unwrap();
        assert!(before.get("Chess Club").unwrap().participants.is_empty());
        assert_eq!(dir.list().get("Chess Club").unwrap().participants.len(), 1);
    }

    #[test]
    fn concurrent_duplicate_sign_ups_admit_exactly_one() {
        let dir = Arc::new(chess_only());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let dir = Arc::clone(&dir);
                std::thread::spawn(move || dir.sign_up("Chess Club", "race@x.edu").is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(dir.get("Chess Club").unwrap().participants, vec!["race@x.edu"]);
    }

    #[test]
    fn concurrent_distinct_sign_ups_are_all_kept() {
        let dir = Arc::new(chess_only());
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let dir = Arc::clone(&dir);
                std::thread::spawn(move || {
                    dir.sign_up("Chess Club", &format!("s{i}@x.edu")).unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        let chess = dir.get("Chess Club").unwrap();
        assert_eq!(chess.participants.len(), 32);
        assert_eq!(chess.first_duplicate(), None);
    }
}
