use super::{eligibility, workload::WorkloadTracker, PlanOptions};
use crate::model::{AbsenceSet, Timetable};
use crate::plan::{Assignment, AssignmentResult};

/// Répartition gloutonne des cours des absents.
///
/// Travaille sur une copie privée de l'emploi du temps : l'appelant garde un
/// état propre pour un nouveau passage.
pub(super) fn assign_least_loaded(
    timetable: &Timetable,
    absences: &AbsenceSet,
    opts: PlanOptions,
) -> AssignmentResult {
    let mut working = timetable.clone();
    let mut result = AssignmentResult::default();

    let absent: Vec<usize> = working
        .staff()
        .iter()
        .enumerate()
        .filter(|(_, s)| absences.contains(&s.name))
        .map(|(idx, _)| idx)
        .collect();
    let pool = eligibility::eligible_indices(working.staff(), absences, opts.excluded_prefix);
    let mut tracker = WorkloadTracker::new(pool.iter().map(|&idx| working.staff()[idx].name.clone()));

    #[cfg(feature = "logging")]
    tracing::debug!(absent = absent.len(), eligible = pool.len(), "planning run started");

    let periods = working.periods().to_vec();
    for &absent_idx in &absent {
        for period in &periods {
            let subject = working.staff()[absent_idx].subject(period).to_string();
            let absent_name = working.staff()[absent_idx].name.clone();
            // même nom = même personne : une seule entrée par (absent, période)
            if subject.is_empty() || result.get(&absent_name, period).is_some() {
                continue;
            }

            // tri stable : à charge égale, l'ordre source départage
            let mut candidates = pool.clone();
            candidates.sort_by_key(|&idx| tracker.get(&working.staff()[idx].name));

            let chosen = candidates.into_iter().find(|&idx| {
                let candidate = &working.staff()[idx];
                candidate.is_free(period) && !tracker.is_busy(&candidate.name, period)
            });

            let Some(idx) = chosen else {
                #[cfg(feature = "logging")]
                tracing::debug!(absent = %absent_name, %period, %subject, "no substitute available");
                continue;
            };

            let substitute = &mut working.staff_mut()[idx];
            substitute.set_subject(period, &subject);
            let name = substitute.name.clone();
            tracker.increment(&name);
            tracker.mark_busy(&name, period);

            #[cfg(feature = "logging")]
            tracing::debug!(absent = %absent_name, %period, %subject, substitute = %name, load = tracker.get(&name), "period reassigned");

            result.push(Assignment {
                absent: absent_name,
                period: period.clone(),
                subject,
                substitute: name,
            });
        }
    }

    result
}
