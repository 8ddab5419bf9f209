use super::util;
use crate::model::{AbsenceSet, StaffRecord};

/// Personnel pouvant recevoir des cours : ni absent, ni parmi les
/// `excluded_prefix` premières lignes. L'ordre source est conservé.
pub fn compute_eligible<'a>(
    staff: &'a [StaffRecord],
    absences: &AbsenceSet,
    excluded_prefix: usize,
) -> Vec<&'a StaffRecord> {
    eligible_indices(staff, absences, excluded_prefix)
        .into_iter()
        .map(|idx| &staff[idx])
        .collect()
}

pub(super) fn eligible_indices(
    staff: &[StaffRecord],
    absences: &AbsenceSet,
    excluded_prefix: usize,
) -> Vec<usize> {
    let excluded = util::excluded_names(staff, excluded_prefix);
    staff
        .iter()
        .enumerate()
        .skip(excluded_prefix)
        .filter(|(_, s)| !absences.contains(&s.name) && !excluded.contains(&s.name.as_str()))
        .map(|(idx, _)| idx)
        .collect()
}
