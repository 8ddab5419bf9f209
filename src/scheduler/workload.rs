use crate::model::PeriodId;
use std::collections::{HashMap, HashSet};

/// Comptabilité d'un passage de planification : nombre de cours repris par
/// remplaçant et périodes prises pendant ce passage.
#[derive(Debug, Clone, Default)]
pub struct WorkloadTracker {
    order: Vec<String>,
    counts: HashMap<String, u32>,
    busy: HashMap<String, HashSet<PeriodId>>,
}

impl WorkloadTracker {
    /// Initialise chaque nom à 0.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tracker = Self::default();
        for name in names {
            tracker.touch(name.into());
        }
        tracker
    }

    fn touch(&mut self, name: String) -> &mut u32 {
        if !self.counts.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.counts.entry(name).or_insert(0)
    }

    pub fn get(&self, name: &str) -> u32 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, name: &str) {
        *self.touch(name.to_string()) += 1;
    }

    pub fn mark_busy(&mut self, name: &str, period: &PeriodId) {
        self.busy
            .entry(name.to_string())
            .or_default()
            .insert(period.clone());
    }

    pub fn is_busy(&self, name: &str, period: &PeriodId) -> bool {
        self.busy.get(name).is_some_and(|p| p.contains(period))
    }

    /// Instantané `(nom, charge)` dans l'ordre d'initialisation.
    pub fn loads(&self) -> Vec<(&str, u32)> {
        self.order
            .iter()
            .map(|name| (name.as_str(), self.get(name)))
            .collect()
    }
}
