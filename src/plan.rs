use crate::model::{AbsenceSet, PeriodId, Timetable};
use chrono::{DateTime, Utc, Weekday};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Une réaffectation : le cours `subject` de `absent` sur `period` est confié à `substitute`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assignment {
    pub absent: String,
    pub period: PeriodId,
    pub subject: String,
    pub substitute: String,
}

/// Cours d'un absent resté sans remplaçant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Uncovered {
    pub absent: String,
    pub period: PeriodId,
    pub subject: String,
}

/// Résultat ordonné d'une planification (ordre d'insertion conservé).
///
/// Une clé `(absent, period)` n'apparaît qu'une fois, de même qu'un couple
/// `(substitute, period)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AssignmentResult {
    entries: Vec<Assignment>,
}

impl AssignmentResult {
    /// Ajoute une entrée ; refuse (retourne `false`) une clé ou un couple
    /// remplaçant/période déjà présent.
    pub(crate) fn push(&mut self, entry: Assignment) -> bool {
        let taken = self.entries.iter().any(|e| {
            (e.absent == entry.absent && e.period == entry.period)
                || (e.substitute == entry.substitute && e.period == entry.period)
        });
        if taken {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Assignment> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, absent: &str, period: &PeriodId) -> Option<&Assignment> {
        let absent = absent.trim();
        self.entries
            .iter()
            .find(|e| e.absent == absent && &e.period == period)
    }

    /// Cours non vides des absents qui n'ont reçu aucun remplaçant,
    /// dans l'ordre absent puis période.
    pub fn uncovered(&self, timetable: &Timetable, absences: &AbsenceSet) -> Vec<Uncovered> {
        timetable
            .staff()
            .iter()
            .filter(|s| absences.contains(&s.name))
            .flat_map(|s| {
                timetable.periods().iter().filter_map(move |p| {
                    let subject = s.subject(p);
                    (!subject.is_empty() && self.get(&s.name, p).is_none()).then(|| Uncovered {
                        absent: s.name.clone(),
                        period: p.clone(),
                        subject: subject.to_string(),
                    })
                })
            })
            .collect()
    }

    /// Charge par remplaçant, dans l'ordre de première apparition.
    pub fn workload(&self) -> Vec<(&str, u32)> {
        let mut out: Vec<(&str, u32)> = Vec::new();
        for e in &self.entries {
            match out.iter_mut().find(|(name, _)| *name == e.substitute) {
                Some((_, count)) => *count += 1,
                None => out.push((e.substitute.as_str(), 1)),
            }
        }
        out
    }
}

impl<'a> IntoIterator for &'a AssignmentResult {
    type Item = &'a Assignment;
    type IntoIter = std::slice::Iter<'a, Assignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Identifiant fort pour un plan généré
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanId(String);

impl PlanId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Plan de remplacement d'une journée, tel que rendu ou sauvegardé.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubstitutionPlan {
    pub id: PlanId,
    pub day: Weekday,
    pub generated_at: DateTime<Utc>,
    pub absent: Vec<String>,
    pub assignments: AssignmentResult,
    #[cfg_attr(feature = "serde", serde(default))]
    pub uncovered: Vec<Uncovered>,
}

impl SubstitutionPlan {
    pub fn is_complete(&self) -> bool {
        self.uncovered.is_empty()
    }
}
