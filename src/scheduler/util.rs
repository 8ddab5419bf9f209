use crate::model::StaffRecord;

/// Noms des `prefix` premières lignes (jamais remplaçants).
pub(super) fn excluded_names(staff: &[StaffRecord], prefix: usize) -> Vec<&str> {
    staff.iter().take(prefix).map(|s| s.name.as_str()).collect()
}

pub(super) fn find_staff_index(staff: &[StaffRecord], name: &str) -> Option<usize> {
    let name = name.trim();
    staff.iter().position(|s| s.name == name)
}
