// 🎓 Activity Registry - The school's extracurricular offerings
//
// Activity name is the identity (and the map key); the participant list is
// the only mutable state. The registry lives for the process lifetime:
// seeded once at startup, mutated in place by signup/unregister, discarded
// on exit. No persistence.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// ACTIVITY
// ============================================================================

/// One extracurricular offering.
///
/// `name` never changes after creation. `max_participants` is informational
/// only - nothing checks it against the participant count. `participants`
/// keeps append order, which is observable through the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier, equal to the registry key
    pub name: String,

    /// Free-text description shown to students
    pub description: String,

    /// Human-readable meeting time, e.g. "Fridays, 3:30 PM - 5:00 PM"
    pub schedule: String,

    /// Capacity bound, never mutated after seeding and never enforced
    pub max_participants: u32,

    /// Enrolled student emails, append order, no duplicates
    pub participants: Vec<String>,
}

impl Activity {
    /// Create a new activity with no participants
    pub fn new(name: String, description: String, schedule: String, max_participants: u32) -> Self {
        Activity {
            name,
            description,
            schedule,
            max_participants,
            participants: Vec::new(),
        }
    }

    /// Check whether an email is enrolled in this activity
    pub fn has_participant(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }
}

// ============================================================================
// ACTIVITY STORE
// ============================================================================

/// The registry of all activities, keyed by activity name.
///
/// This layer owns the map and the raw read/write primitives. Precondition
/// checks (does the activity exist, is the student already enrolled) belong
/// to the service layer; `add_participant` in particular will happily append
/// a duplicate if the caller did not check first.
#[derive(Debug, Clone)]
pub struct ActivityStore {
    activities: HashMap<String, Activity>,
}

impl ActivityStore {
    /// Create an empty registry
    pub fn new() -> Self {
        ActivityStore {
            activities: HashMap::new(),
        }
    }

    /// Create a registry populated with the school's fixed seed list
    pub fn with_default_activities() -> Self {
        let mut store = ActivityStore::new();

        let mut chess = Activity::new(
            "Chess Club".to_string(),
            "Learn strategies and compete in chess tournaments".to_string(),
            "Fridays, 3:30 PM - 5:00 PM".to_string(),
            12,
        );
        chess.participants.push("michael@mergington.edu".to_string());
        chess.participants.push("daniel@mergington.edu".to_string());
        store.register(chess);

        let mut programming = Activity::new(
            "Programming Class".to_string(),
            "Learn programming fundamentals and build software projects".to_string(),
            "Tuesdays and Thursdays, 3:30 PM - 4:30 PM".to_string(),
            20,
        );
        programming.participants.push("emma@mergington.edu".to_string());
        programming.participants.push("sophia@mergington.edu".to_string());
        store.register(programming);

        let mut gym = Activity::new(
            "Gym Class".to_string(),
            "Physical education and sports activities".to_string(),
            "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM".to_string(),
            30,
        );
        gym.participants.push("john@mergington.edu".to_string());
        gym.participants.push("olivia@mergington.edu".to_string());
        store.register(gym);

        store
    }

    /// Insert an activity, keyed by its name
    pub fn register(&mut self, activity: Activity) {
        self.activities.insert(activity.name.clone(), activity);
    }

    /// Read-only view of the full registry
    pub fn list(&self) -> &HashMap<String, Activity> {
        &self.activities
    }

    /// Look up a single activity by name
    pub fn get(&self, activity_name: &str) -> Option<&Activity> {
        self.activities.get(activity_name)
    }

    /// Check whether an activity exists
    pub fn exists(&self, activity_name: &str) -> bool {
        self.activities.contains_key(activity_name)
    }

    /// Check whether an email is enrolled in an activity.
    /// Returns false when the activity itself is unknown.
    pub fn is_registered(&self, activity_name: &str, email: &str) -> bool {
        self.activities
            .get(activity_name)
            .map(|a| a.has_participant(email))
            .unwrap_or(false)
    }

    /// Append an email to an activity's participant list.
    /// Caller is responsible for the exists / not-yet-registered checks.
    pub fn add_participant(&mut self, activity_name: &str, email: &str) {
        if let Some(activity) = self.activities.get_mut(activity_name) {
            activity.participants.push(email.to_string());
        }
    }

    /// Remove an email from an activity's participant list, if present
    pub fn remove_participant(&mut self, activity_name: &str, email: &str) {
        if let Some(activity) = self.activities.get_mut(activity_name) {
            activity.participants.retain(|p| p != email);
        }
    }

    /// Number of activities in the registry
    pub fn count(&self) -> usize {
        self.activities.len()
    }
}

impl Default for ActivityStore {
    fn default() -> Self {
        Self::with_default_activities()
    }
}

// ============================================================================
// TESTS
// ============================================================================
