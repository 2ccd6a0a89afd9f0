//! Hospital records terminal front end.
//!
//! Usage:
//!   hospital-records department add
//!   hospital-records doctor search
//!   hospital-records patient show-all --format csv
//!   hospital-records medical-test for-patient
//!   hospital-records prescription delete

mod terminal;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use hospital_records_core::export::TableExport;
use hospital_records_core::models::Tabular;
use hospital_records_core::{
    Database, DepartmentController, DoctorController, EntityKind, MedicalTestController, Outcome,
    PatientController, PrescriptionController, Records, RecordsResult, Settings, SystemClock,
    TableView, Ui,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::terminal::TerminalUi;

#[derive(Parser)]
#[command(name = "hospital-records")]
#[command(version)]
#[command(about = "Manage department, doctor, patient, medical test and prescription records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Database file, overriding the settings
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Output format for show-all
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Table)]
    format: Format,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Department records
    Department {
        #[command(subcommand)]
        action: DepartmentAction,
    },

    /// Doctor records
    Doctor {
        #[command(subcommand)]
        action: RecordAction,
    },

    /// Patient records
    Patient {
        #[command(subcommand)]
        action: RecordAction,
    },

    /// Medical test records
    MedicalTest {
        #[command(subcommand)]
        action: PatientRecordAction,
    },

    /// Prescription records
    Prescription {
        #[command(subcommand)]
        action: PatientRecordAction,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum RecordAction {
    /// Add a new record
    Add,
    /// Update an existing record
    Update,
    /// Delete a record after confirmation
    Delete,
    /// Show every record
    ShowAll,
    /// Search by ID
    Search,
}

#[derive(Subcommand, Clone, Copy)]
enum DepartmentAction {
    #[command(flatten)]
    Record(RecordAction),
    /// List the doctors working in a department
    Doctors,
}

#[derive(Subcommand, Clone, Copy)]
enum PatientRecordAction {
    #[command(flatten)]
    Record(RecordAction),
    /// List the records of one patient
    ForPatient,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut settings =
        Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(path) = cli.database {
        settings.database.path = path;
    }
    init_tracing(&settings.logging.filter);

    let db = Database::open(&settings.database.path).with_context(|| {
        format!(
            "Failed to open database at {}",
            settings.database.path.display()
        )
    })?;
    info!(path = %settings.database.path.display(), "database opened");

    let clock = SystemClock;
    let records = Records::new(&db, &clock).with_rules(settings.text_rules());
    let mut ui = TerminalUi::stdio();

    let succeeded = run(cli.command, cli.format, records, &mut ui)?;
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// `RUST_LOG` wins over the configured filter. Logs go to stderr so they
/// never mix with exported data.
fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(
    command: Commands,
    format: Format,
    records: Records<'_>,
    ui: &mut dyn Ui,
) -> anyhow::Result<bool> {
    let succeeded = match command {
        Commands::Department { action } => {
            let controller = DepartmentController::new(records);
            match action {
                DepartmentAction::Record(RecordAction::Add) => exit(controller.add(ui)),
                DepartmentAction::Record(RecordAction::Update) => exit(controller.update(ui)),
                DepartmentAction::Record(RecordAction::Delete) => exit(controller.delete(ui)),
                DepartmentAction::Record(RecordAction::ShowAll) => match format {
                    Format::Table => exit(controller.show_all(ui)),
                    _ => export(EntityKind::Department, records.departments().list(), format)?,
                },
                DepartmentAction::Record(RecordAction::Search) => exit(controller.search(ui)),
                DepartmentAction::Doctors => exit(controller.list_doctors(ui)),
            }
        }
        Commands::Doctor { action } => {
            let controller = DoctorController::new(records);
            match action {
                RecordAction::Add => exit(controller.add(ui)),
                RecordAction::Update => exit(controller.update(ui)),
                RecordAction::Delete => exit(controller.delete(ui)),
                RecordAction::ShowAll => match format {
                    Format::Table => exit(controller.show_all(ui)),
                    _ => export(EntityKind::Doctor, records.doctors().list(), format)?,
                },
                RecordAction::Search => exit(controller.search(ui)),
            }
        }
        Commands::Patient { action } => {
            let controller = PatientController::new(records);
            match action {
                RecordAction::Add => exit(controller.add(ui)),
                RecordAction::Update => exit(controller.update(ui)),
                RecordAction::Delete => exit(controller.delete(ui)),
                RecordAction::ShowAll => match format {
                    Format::Table => exit(controller.show_all(ui)),
                    _ => export(EntityKind::Patient, records.patients().list(), format)?,
                },
                RecordAction::Search => exit(controller.search(ui)),
            }
        }
        Commands::MedicalTest { action } => {
            let controller = MedicalTestController::new(records);
            match action {
                PatientRecordAction::Record(RecordAction::Add) => exit(controller.add(ui)),
                PatientRecordAction::Record(RecordAction::Update) => exit(controller.update(ui)),
                PatientRecordAction::Record(RecordAction::Delete) => exit(controller.delete(ui)),
                PatientRecordAction::Record(RecordAction::ShowAll) => match format {
                    Format::Table => exit(controller.show_all(ui)),
                    _ => export(
                        EntityKind::MedicalTest,
                        records.medical_tests().list(),
                        format,
                    )?,
                },
                PatientRecordAction::Record(RecordAction::Search) => exit(controller.search(ui)),
                PatientRecordAction::ForPatient => exit(controller.for_patient(ui)),
            }
        }
        Commands::Prescription { action } => {
            let controller = PrescriptionController::new(records);
            match action {
                PatientRecordAction::Record(RecordAction::Add) => exit(controller.add(ui)),
                PatientRecordAction::Record(RecordAction::Update) => exit(controller.update(ui)),
                PatientRecordAction::Record(RecordAction::Delete) => exit(controller.delete(ui)),
                PatientRecordAction::Record(RecordAction::ShowAll) => match format {
                    Format::Table => exit(controller.show_all(ui)),
                    _ => export(
                        EntityKind::Prescription,
                        records.prescriptions().list(),
                        format,
                    )?,
                },
                PatientRecordAction::Record(RecordAction::Search) => exit(controller.search(ui)),
                PatientRecordAction::ForPatient => exit(controller.for_patient(ui)),
            }
        }
    };
    Ok(succeeded)
}

/// Failed operations were already reported to the terminal.
fn exit<T>(outcome: Outcome<T>) -> bool {
    !outcome.is_failed()
}

fn export<T: Tabular>(
    kind: EntityKind,
    rows: RecordsResult<Vec<T>>,
    format: Format,
) -> anyhow::Result<bool> {
    let rows = rows.with_context(|| format!("Failed to list {kind} records"))?;
    let export = TableExport::from_view(kind.label(), &TableView::of(&rows));
    match format {
        Format::Json => println!("{}", export.to_json()?),
        Format::Csv | Format::Table => print!("{}", export.to_csv()),
    }
    Ok(true)
}
