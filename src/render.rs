use crate::plan::{Assignment, SubstitutionPlan, Uncovered};
use std::fmt::Write;

/// Indicateur affiché quand rien n'a pu être réaffecté.
pub const NOTHING_REASSIGNED: &str = "No periods could be reassigned.";

/// Permet de customiser le rendu d'un plan (texte, mail, etc.).
pub trait PlanRenderer {
    fn render(&self, plan: &SubstitutionPlan) -> String;
}

/// Rendu texte ligne à ligne, destiné au terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextPlan;

impl PlanRenderer for TextPlan {
    fn render(&self, plan: &SubstitutionPlan) -> String {
        let mut out = format!("Reassignment Plan ({})\n", plan.day);
        if plan.assignments.is_empty() {
            out.push_str(NOTHING_REASSIGNED);
            out.push('\n');
        }
        for a in &plan.assignments {
            let _ = writeln!(out, "{}", assignment_line(a));
        }
        if !plan.uncovered.is_empty() {
            let _ = writeln!(out, "Uncovered ({}):", plan.uncovered.len());
            for u in &plan.uncovered {
                let _ = writeln!(out, "  {}", uncovered_line(u));
            }
        }
        out
    }
}

/// `{absent} - {period}: '{subject}' ➜ {substitute}`
pub fn assignment_line(a: &Assignment) -> String {
    format!(
        "{} - {}: '{}' ➜ {}",
        a.absent, a.period, a.subject, a.substitute
    )
}

pub fn uncovered_line(u: &Uncovered) -> String {
    format!("{} - {}: '{}'", u.absent, u.period, u.subject)
}
