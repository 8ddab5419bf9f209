#![forbid(unsafe_code)]
//! Substitution — réaffectation des cours des enseignants absents (sans BD).
//!
//! - Emploi du temps d'une journée chargé depuis CSV.
//! - Répartition gloutonne vers le remplaçant le moins chargé, départage stable.
//! - Les trois premières lignes (direction) ne sont jamais sollicitées.
//! - Plans sauvegardés en JSON, rendu texte en dehors du moteur.

#[cfg(feature = "serde")]
pub mod io;
pub mod model;
pub mod plan;
pub mod render;
pub mod scheduler;
#[cfg(feature = "serde")]
pub mod storage;

pub use model::{AbsenceSet, PeriodId, StaffRecord, Timetable, TimetableFormat};
pub use plan::{Assignment, AssignmentResult, PlanId, SubstitutionPlan, Uncovered};
pub use render::{PlanRenderer, TextPlan};
pub use scheduler::{
    compute_eligible, plan, Conflict, ConflictKind, PlanError, PlanOptions, Planner,
    WorkloadTracker,
};
#[cfg(feature = "serde")]
pub use storage::{JsonStorage, Storage};
