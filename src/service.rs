// Activity Service - signup/unregister rules over the shared registry
//
// All HTTP handlers talk to this layer, never to the store directly. Each
// mutation takes the write lock once and does its precondition checks and
// the mutation under that single guard, so two racing signups for the same
// (activity, email) pair can never both succeed.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::registry::{Activity, ActivityStore};

// ============================================================================
// ERRORS
// ============================================================================

/// Everything that can go wrong with a signup or unregister request.
///
/// Display strings double as the `detail` field of error responses, so they
/// are part of the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActivityError {
    #[error("Activity not found")]
    NotFound,

    #[error("Student is already signed up")]
    AlreadyRegistered,

    #[error("Student is not registered for this activity")]
    NotRegistered,
}

// ============================================================================
// SERVICE
// ============================================================================

/// Shared handle on the registry. Cheap to clone; all clones see the same
/// underlying store.
#[derive(Clone)]
pub struct ActivityService {
    store: Arc<RwLock<ActivityStore>>,
}

impl ActivityService {
    /// Wrap a store (usually the seeded one) for shared use
    pub fn new(store: ActivityStore) -> Self {
        ActivityService {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Snapshot of every activity, keyed by name
    pub fn list_activities(&self) -> HashMap<String, Activity> {
        self.store.read().unwrap().list().clone()
    }

    /// Enroll a student in an activity.
    ///
    /// Fails if the activity does not exist or the student is already on its
    /// participant list. On success the email is appended and a confirmation
    /// message is returned.
    pub fn signup(&self, activity_name: &str, email: &str) -> Result<String, ActivityError> {
        let mut store = self.store.write().unwrap();

        if !store.exists(activity_name) {
            return Err(ActivityError::NotFound);
        }
        if store.is_registered(activity_name, email) {
            return Err(ActivityError::AlreadyRegistered);
        }

        store.add_participant(activity_name, email);
        Ok(format!("Signed up {} for {}", email, activity_name))
    }

    /// Remove a student from an activity.
    ///
    /// Fails if the activity does not exist or the student is not on its
    /// participant list.
    pub fn unregister(&self, activity_name: &str, email: &str) -> Result<String, ActivityError> {
        let mut store = self.store.write().unwrap();

        if !store.exists(activity_name) {
            return Err(ActivityError::NotFound);
        }
        if !store.is_registered(activity_name, email) {
            return Err(ActivityError::NotRegistered);
        }

        store.remove_participant(activity_name, email);
        Ok(format!("Unregistered {} from {}", email, activity_name))
    }
}

// ============================================================================
// TESTS
// ============================================================================
