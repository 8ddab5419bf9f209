use super::{util, Conflict, ConflictKind, PlanOptions};
use crate::model::{AbsenceSet, Timetable};
use crate::plan::{Assignment, AssignmentResult};

/// Audit d'un résultat (souvent relu depuis le disque) face à l'emploi du
/// temps source.
pub(super) fn detect_conflicts(
    timetable: &Timetable,
    absences: &AbsenceSet,
    result: &AssignmentResult,
    opts: PlanOptions,
) -> Vec<Conflict> {
    let mut out = Vec::new();
    let staff = timetable.staff();
    let excluded = util::excluded_names(staff, opts.excluded_prefix);
    let entries: Vec<&Assignment> = result.iter().collect();

    for (idx, a) in entries.iter().enumerate() {
        let mut flag = |kind: ConflictKind| {
            out.push(Conflict {
                absent: a.absent.clone(),
                period: a.period.clone(),
                substitute: a.substitute.clone(),
                kind,
            })
        };

        for b in entries.iter().skip(idx + 1) {
            if a.period == b.period && (a.substitute == b.substitute || a.absent == b.absent) {
                flag(ConflictKind::DoubleBooking);
            }
        }

        if timetable.subject(&a.absent, &a.period).unwrap_or("").is_empty() {
            flag(ConflictKind::NoDuty);
        }
        if absences.contains(&a.substitute) {
            flag(ConflictKind::AbsentSubstitute);
        }
        if excluded.contains(&a.substitute.as_str()) {
            flag(ConflictKind::ExcludedSubstitute);
        }
        match util::find_staff_index(staff, &a.substitute) {
            None => flag(ConflictKind::UnknownSubstitute),
            Some(pos) if !staff[pos].is_free(&a.period) => flag(ConflictKind::AlreadyTeaching),
            Some(_) => {}
        }
    }

    out
}
