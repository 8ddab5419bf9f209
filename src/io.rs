use crate::model::{Timetable, TimetableFormat};
use crate::plan::AssignmentResult;
use crate::scheduler::PlanError;
use anyhow::Context;
use chrono::Weekday;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Jours ouvrés pour lesquels un emploi du temps peut exister.
pub const SCHOOL_DAYS: [Weekday; 6] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Accepte `mon`, `Monday`, `MON`... ; refuse le dimanche.
pub fn parse_day(raw: &str) -> Result<Weekday, PlanError> {
    let day: Weekday = raw
        .trim()
        .parse()
        .map_err(|_| PlanError::UnknownDay(raw.to_string()))?;
    if !SCHOOL_DAYS.contains(&day) {
        return Err(PlanError::UnknownDay(raw.to_string()));
    }
    Ok(day)
}

/// Clé fichier d'un jour : `mon`, `tue`...
pub fn day_key(day: Weekday) -> String {
    day.to_string().to_ascii_lowercase()
}

/// `<dir>/<jour>.csv`
pub fn timetable_path<P: AsRef<Path>>(dir: P, day: Weekday) -> PathBuf {
    dir.as_ref().join(format!("{}.csv", day_key(day)))
}

/// Lit un emploi du temps CSV depuis n'importe quelle source.
pub fn read_timetable<R: Read>(reader: R, format: &TimetableFormat) -> anyhow::Result<Timetable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut rows = Vec::new();
    for rec in rdr.records() {
        rows.push(rec?);
    }
    let timetable = Timetable::from_rows(format, headers.iter(), rows.iter().map(|r| r.iter()))?;
    Ok(timetable)
}

/// Import d'un emploi du temps: header `Teacher_Name,Period1,Period2,...`
pub fn import_timetable_csv<P: AsRef<Path>>(
    path: P,
    format: &TimetableFormat,
) -> anyhow::Result<Timetable> {
    let path = path.as_ref();
    let file = fs::File::open(path).with_context(|| format!("reading {}", path.display()))?;
    read_timetable(file, format).with_context(|| format!("parsing {}", path.display()))
}

/// Charge l'emploi du temps du jour depuis `dir`.
pub fn load_day<P: AsRef<Path>>(
    dir: P,
    day: Weekday,
    format: &TimetableFormat,
) -> anyhow::Result<Timetable> {
    let path = timetable_path(dir, day);
    if !path.exists() {
        anyhow::bail!("timetable for {day} not found ({})", path.display());
    }
    import_timetable_csv(path, format)
}

/// Export CSV des réaffectations: header `absent,period,subject,substitute`
pub fn export_plan_csv<P: AsRef<Path>>(path: P, result: &AssignmentResult) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["absent", "period", "subject", "substitute"])?;
    for a in result {
        w.write_record([
            a.absent.as_str(),
            a.period.as_str(),
            a.subject.as_str(),
            a.substitute.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV de la charge par remplaçant: header `substitute,periods`
pub fn export_workload_csv<P: AsRef<Path>>(path: P, result: &AssignmentResult) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["substitute", "periods"])?;
    let mut buf = itoa::Buffer::new();
    for (name, count) in result.workload() {
        w.write_record([name, buf.format(count)])?;
    }
    w.flush()?;
    Ok(())
}
