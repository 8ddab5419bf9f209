#![forbid(unsafe_code)]
use anyhow::Result;
use chrono::{Datelike, Local, Weekday};
use clap::{Parser, Subcommand};
use substitution::{
    io,
    model::{AbsenceSet, TimetableFormat, DEFAULT_IDENTITY_COLUMN, DEFAULT_PERIOD_PREFIX},
    render::{PlanRenderer, TextPlan},
    scheduler::{ConflictKind, PlanError, Planner},
    storage::{JsonStorage, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de réaffectation des cours des enseignants absents
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Dossier contenant les emplois du temps `mon.csv` ... `sat.csv`
    #[arg(long, global = true, default_value = ".")]
    dir: String,

    /// Colonne d'identité du CSV
    #[arg(long, global = true, default_value = DEFAULT_IDENTITY_COLUMN)]
    identity_column: String,

    /// Préfixe des colonnes de périodes
    #[arg(long, global = true, default_value = DEFAULT_PERIOD_PREFIX)]
    period_prefix: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lister les jours disponibles
    Days,

    /// Lister le personnel d'un jour
    Staff {
        /// mon..sat (défaut : aujourd'hui)
        #[arg(long)]
        day: Option<String>,
    },

    /// Générer un plan de réaffectation
    Plan {
        #[arg(long)]
        day: Option<String>,
        /// liste "nom1,nom2,..."
        #[arg(long, default_value = "")]
        absent: String,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
        /// Export CSV de la charge par remplaçant
        #[arg(long)]
        out_workload: Option<String>,
    },

    /// Réafficher un plan sauvegardé
    Show {
        #[arg(long)]
        plan: String,
    },

    /// Vérifier un plan sauvegardé contre l'emploi du temps du jour
    Check {
        #[arg(long)]
        plan: String,
        /// mon..sat (défaut : jour enregistré dans le plan)
        #[arg(long)]
        day: Option<String>,
        /// Export CSV des conflits (optionnel)
        #[arg(long)]
        report: Option<String>,
    },
}

fn resolve_day(raw: Option<&str>) -> Result<Weekday, PlanError> {
    match raw {
        Some(d) => io::parse_day(d),
        None => {
            let today = Local::now().weekday();
            io::parse_day(&today.to_string())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let format = TimetableFormat {
        identity_column: cli.identity_column.clone(),
        period_prefix: cli.period_prefix.clone(),
    };
    let planner = Planner::new();

    let code = match cli.cmd {
        Commands::Days => {
            for day in io::SCHOOL_DAYS {
                println!("{} ({})", io::day_key(day), day);
            }
            0
        }
        Commands::Staff { day } => {
            let day = resolve_day(day.as_deref())?;
            let timetable = io::load_day(&cli.dir, day, &format)?;
            for name in timetable.staff_names() {
                println!("{name}");
            }
            0
        }
        Commands::Plan {
            day,
            absent,
            out_json,
            out_csv,
            out_workload,
        } => {
            let day = resolve_day(day.as_deref())?;
            let timetable = io::load_day(&cli.dir, day, &format)?;
            let names: Vec<&str> = absent.split(',').collect();
            match AbsenceSet::validated(&timetable, names) {
                Err(PlanError::NoAbsentees) => {
                    eprintln!("no absent staff selected: nothing to plan");
                    0
                }
                Err(e) => return Err(e.into()),
                Ok(absences) => {
                    let plan = planner.plan_day(day, &timetable, &absences);
                    print!("{}", TextPlan.render(&plan));
                    if let Some(path) = out_json {
                        JsonStorage::open(path).save(&plan)?;
                    }
                    if let Some(path) = out_csv {
                        io::export_plan_csv(path, &plan.assignments)?;
                    }
                    if let Some(path) = out_workload {
                        io::export_workload_csv(path, &plan.assignments)?;
                    }
                    // Code 2 = WARNING/INCOMPLETE
                    if plan.is_complete() {
                        0
                    } else {
                        2
                    }
                }
            }
        }
        Commands::Show { plan } => {
            let plan = JsonStorage::open(plan).load()?;
            print!("{}", TextPlan.render(&plan));
            0
        }
        Commands::Check { plan, day, report } => {
            let plan = JsonStorage::open(plan).load()?;
            let day = match day.as_deref() {
                Some(d) => io::parse_day(d)?,
                None => plan.day,
            };
            let timetable = io::load_day(&cli.dir, day, &format)?;
            let conflicts = planner.detect_conflicts(&timetable, &plan);
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                if let Some(path) = report {
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["absent", "period", "substitute", "kind"])?;
                    for c in &conflicts {
                        w.write_record([
                            c.absent.as_str(),
                            c.period.as_str(),
                            c.substitute.as_str(),
                            match c.kind {
                                ConflictKind::DoubleBooking => "double",
                                ConflictKind::AbsentSubstitute => "absent",
                                ConflictKind::ExcludedSubstitute => "excluded",
                                ConflictKind::UnknownSubstitute => "unknown",
                                ConflictKind::NoDuty => "no-duty",
                                ConflictKind::AlreadyTeaching => "busy",
                            },
                        ])?;
                    }
                    w.flush()?;
                }
                2
            }
        }
    };

    std::process::exit(code);
}
