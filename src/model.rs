use crate::scheduler::PlanError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Colonne d'identité attendue par défaut dans un emploi du temps.
pub const DEFAULT_IDENTITY_COLUMN: &str = "Teacher_Name";
/// Préfixe des colonnes de périodes par défaut.
pub const DEFAULT_PERIOD_PREFIX: &str = "Period";

// valeurs que les tableurs écrivent pour une cellule vide
const MISSING_MARKERS: [&str; 6] = ["NaN", "nan", "NA", "N/A", "#N/A", "null"];

/// Identifiant fort pour une période (libellé de colonne).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PeriodId(String);

impl PeriodId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeriodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ligne d'emploi du temps : un membre du personnel et ses cours de la journée.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StaffRecord {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    subjects: BTreeMap<PeriodId, String>,
}

impl StaffRecord {
    /// Le nom est normalisé (trim) : deux noms égaux après trim désignent la même personne.
    pub fn new<N: AsRef<str>>(name: N) -> Self {
        Self {
            name: name.as_ref().trim().to_owned(),
            subjects: BTreeMap::new(),
        }
    }

    /// Variante builder de [`StaffRecord::set_subject`].
    pub fn with_subject<S: AsRef<str>>(mut self, period: &PeriodId, subject: S) -> Self {
        self.set_subject(period, subject);
        self
    }

    /// Matière enseignée sur `period`, chaîne vide si libre.
    pub fn subject(&self, period: &PeriodId) -> &str {
        self.subjects.get(period).map(String::as_str).unwrap_or("")
    }

    pub fn is_free(&self, period: &PeriodId) -> bool {
        self.subject(period).is_empty()
    }

    pub fn set_subject<S: AsRef<str>>(&mut self, period: &PeriodId, subject: S) {
        let subject = subject.as_ref().trim();
        if subject.is_empty() {
            self.subjects.remove(period);
        } else {
            self.subjects.insert(period.clone(), subject.to_owned());
        }
    }

    /// Périodes occupées, dans l'ordre des identifiants.
    pub fn duties(&self) -> impl Iterator<Item = (&PeriodId, &str)> {
        self.subjects.iter().map(|(p, s)| (p, s.as_str()))
    }
}

/// Convention de nommage des colonnes d'un tableau source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableFormat {
    pub identity_column: String,
    pub period_prefix: String,
}

impl Default for TimetableFormat {
    fn default() -> Self {
        Self {
            identity_column: DEFAULT_IDENTITY_COLUMN.to_string(),
            period_prefix: DEFAULT_PERIOD_PREFIX.to_string(),
        }
    }
}

impl TimetableFormat {
    pub fn is_period(&self, header: &str) -> bool {
        header.trim().starts_with(self.period_prefix.as_str())
    }
}

/// Emploi du temps d'une journée : périodes ordonnées + personnel ordonné.
///
/// L'ordre des périodes est celui des colonnes source et n'est jamais retrié ;
/// l'ordre du personnel sert de base au départage des candidats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timetable {
    periods: Vec<PeriodId>,
    staff: Vec<StaffRecord>,
}

impl Timetable {
    pub fn new(periods: Vec<PeriodId>, staff: Vec<StaffRecord>) -> Self {
        Self { periods, staff }
    }

    /// Construit un emploi du temps depuis un tableau brut (en-têtes + lignes).
    ///
    /// Les cellules manquantes ou marquées comme absentes deviennent vides,
    /// toutes les valeurs sont trimées. Échoue si la colonne d'identité manque,
    /// si une ligne n'a pas de nom ou si un nom est répété.
    pub fn from_rows<H, HS, R, C, CS>(
        format: &TimetableFormat,
        headers: H,
        rows: R,
    ) -> Result<Self, PlanError>
    where
        H: IntoIterator<Item = HS>,
        HS: AsRef<str>,
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = CS>,
        CS: AsRef<str>,
    {
        let headers: Vec<String> = headers
            .into_iter()
            .map(|h| h.as_ref().to_string())
            .collect();
        let identity = headers
            .iter()
            .position(|h| h.trim() == format.identity_column)
            .ok_or_else(|| {
                PlanError::MalformedInput(format!(
                    "missing identity column '{}'",
                    format.identity_column
                ))
            })?;
        let columns: Vec<(usize, PeriodId)> = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| format.is_period(h))
            .map(|(idx, h)| (idx, PeriodId::new(h.trim())))
            .collect();

        let mut staff = Vec::new();
        for (line, row) in rows.into_iter().enumerate() {
            let cells: Vec<String> = row
                .into_iter()
                .map(|c| normalize_cell(c.as_ref()))
                .collect();
            let name = cells.get(identity).map(String::as_str).unwrap_or("");
            if name.is_empty() {
                return Err(PlanError::MalformedInput(format!(
                    "row {} has an empty '{}' cell",
                    line + 1,
                    format.identity_column
                )));
            }
            if staff.iter().any(|s: &StaffRecord| s.name == name) {
                return Err(PlanError::MalformedInput(format!(
                    "row {} repeats staff member '{name}'",
                    line + 1
                )));
            }
            let mut record = StaffRecord::new(name);
            for (idx, period) in &columns {
                if let Some(subject) = cells.get(*idx) {
                    record.set_subject(period, subject);
                }
            }
            staff.push(record);
        }

        Ok(Self {
            periods: columns.into_iter().map(|(_, p)| p).collect(),
            staff,
        })
    }

    pub fn periods(&self) -> &[PeriodId] {
        &self.periods
    }

    pub fn staff(&self) -> &[StaffRecord] {
        &self.staff
    }

    pub(crate) fn staff_mut(&mut self) -> &mut [StaffRecord] {
        &mut self.staff
    }

    /// Noms du personnel dans l'ordre source (liste proposée à la sélection).
    pub fn staff_names(&self) -> Vec<&str> {
        self.staff.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn find<'a>(&'a self, name: &str) -> Option<&'a StaffRecord> {
        let name = name.trim();
        self.staff.iter().find(|s| s.name == name)
    }

    pub fn subject<'a>(&'a self, name: &str, period: &PeriodId) -> Option<&'a str> {
        self.find(name).map(|s| s.subject(period))
    }
}

fn normalize_cell(raw: &str) -> String {
    let cell = raw.trim();
    if MISSING_MARKERS.contains(&cell) {
        String::new()
    } else {
        cell.to_string()
    }
}

/// Ensemble des absents pour une journée (noms trimés).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AbsenceSet(BTreeSet<String>);

impl AbsenceSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            names
                .into_iter()
                .map(|n| n.as_ref().trim().to_string())
                .filter(|n| !n.is_empty())
                .collect(),
        )
    }

    /// Comme [`AbsenceSet::new`], mais exige au moins un nom et que chaque nom
    /// existe dans l'emploi du temps du jour.
    pub fn validated<I, S>(timetable: &Timetable, names: I) -> Result<Self, PlanError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = Self::new(names);
        if set.is_empty() {
            return Err(PlanError::NoAbsentees);
        }
        if let Some(unknown) = set.iter().find(|n| timetable.find(n).is_none()) {
            return Err(PlanError::UnknownStaff(unknown.to_string()));
        }
        Ok(set)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name.trim())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}
