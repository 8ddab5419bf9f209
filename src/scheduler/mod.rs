mod assignment;
mod conflicts;
mod eligibility;
mod types;
mod util;
mod workload;

pub use eligibility::compute_eligible;
pub use types::{Conflict, ConflictKind, PlanError, PlanOptions, EXCLUDED_PREFIX};
pub use workload::WorkloadTracker;

use crate::model::{AbsenceSet, Timetable};
use crate::plan::{AssignmentResult, PlanId, SubstitutionPlan};
use chrono::{Utc, Weekday};

/// Planner : porte les options, ne garde aucun état entre deux passages.
#[derive(Debug, Default, Clone, Copy)]
pub struct Planner {
    opts: PlanOptions,
}

impl Planner {
    pub fn new() -> Self {
        Self {
            opts: PlanOptions::default(),
        }
    }

    pub fn with_options(opts: PlanOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> PlanOptions {
        self.opts
    }

    /// Réaffecte les cours des absents ; les cours sans remplaçant sont
    /// simplement absents du résultat. `timetable` n'est jamais modifié.
    pub fn plan(&self, timetable: &Timetable, absences: &AbsenceSet) -> AssignmentResult {
        assignment::assign_least_loaded(timetable, absences, self.opts)
    }

    /// Comme [`Planner::plan`], enveloppé dans un plan daté avec la liste des
    /// cours non couverts.
    pub fn plan_day(
        &self,
        day: Weekday,
        timetable: &Timetable,
        absences: &AbsenceSet,
    ) -> SubstitutionPlan {
        let assignments = self.plan(timetable, absences);
        let uncovered = assignments.uncovered(timetable, absences);
        let absent = timetable
            .staff_names()
            .into_iter()
            .filter(|name| absences.contains(name))
            .map(str::to_string)
            .collect();
        SubstitutionPlan {
            id: PlanId::random(),
            day,
            generated_at: Utc::now(),
            absent,
            assignments,
            uncovered,
        }
    }

    pub fn detect_conflicts(&self, timetable: &Timetable, plan: &SubstitutionPlan) -> Vec<Conflict> {
        let absences = AbsenceSet::new(&plan.absent);
        conflicts::detect_conflicts(timetable, &absences, &plan.assignments, self.opts)
    }
}

/// Raccourci pour [`Planner::plan`] avec les options par défaut.
pub fn plan(timetable: &Timetable, absences: &AbsenceSet) -> AssignmentResult {
    Planner::new().plan(timetable, absences)
}
