use serde::{Deserialize, Serialize};

/// A single extracurricular offering. The activity's name is its key in the
/// [`Directory`](crate::Directory) and is not repeated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    /// Advisory capacity. Signups are not rejected once it is reached.
    pub max_participants: u32,
    /// Participant emails in signup order.
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    pub fn new(
        description: impl Into<String>,
        schedule: impl Into<String>,
        max_participants: u32,
    ) -> Self {
        Self {
            description: description.into(),
            schedule: schedule.into(),
            max_participants,
            participants: Vec::new(),
        }
    }

    pub fn with_participants<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participants = emails.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_participant(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    /// Remaining capacity. Negative when the activity is oversubscribed.
    pub fn spots_left(&self) -> i64 {
        i64::from(self.max_participants) - self.participants.len() as i64
    }

    /// Returns the first email that appears more than once, if any.
    pub(crate) fn first_duplicate(&self) -> Option<&str> {
        let mut seen = std::collections::HashSet::new();
        self.participants
            .iter()
            .find(|p| !seen.insert(p.as_str()))
            .map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
