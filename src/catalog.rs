//! In-memory facility catalog.

use std::collections::HashMap;

use crate::model::{Activity, ActivityId, Location};
use crate::traits::FacilityCatalog;

/// HashMap-backed catalog, loaded once and never mutated during planning.
#[derive(Debug, Clone)]
pub struct Catalog {
    entrance: Location,
    activities: HashMap<ActivityId, Activity>,
}

impl Catalog {
    pub fn new(entrance: Location) -> Self {
        Self {
            entrance,
            activities: HashMap::new(),
        }
    }

    /// Adds an activity, replacing any previous entry with the same id.
    pub fn with_activity(mut self, activity: Activity) -> Self {
        self.insert(activity);
        self
    }

    pub fn insert(&mut self, activity: Activity) {
        self.activities.insert(activity.id.clone(), activity);
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// All activity ids, sorted for stable iteration.
    pub fn ids(&self) -> Vec<ActivityId> {
        let mut ids: Vec<ActivityId> = self.activities.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl FromIterator<Activity> for Catalog {
    /// Builds a catalog whose entrance is the origin of an `entrance` area.
    fn from_iter<I: IntoIterator<Item = Activity>>(iter: I) -> Self {
        let mut catalog = Catalog::new(Location::new("entrance", Default::default()));
        for activity in iter {
            catalog.insert(activity);
        }
        catalog
    }
}

impl FacilityCatalog for Catalog {
    fn lookup(&self, id: &ActivityId) -> Option<&Activity> {
        self.activities.get(id)
    }

    fn entrance(&self) -> &Location {
        &self.entrance
    }
}
