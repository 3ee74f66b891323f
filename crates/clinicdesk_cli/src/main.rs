//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `clinicdesk_core` linkage.
//! - Drive one list session against the in-memory directory and print a page.
//!
//! Usage: `clinicdesk_cli [CONFIG_JSON] [QUERY]`. File logging is enabled
//! when `CLINICDESK_LOG_DIR` is set.

use clinicdesk_core::{
    init_logging_with, CrudDispatcher, ListConfig, LogSettings, MemoryPatientDirectory,
    PatientDraft, PatientListSession,
};
use log::info;
use std::path::Path;
use std::process::ExitCode;

const DEMO_PATIENTS: &[(&str, &str, &str, &str, &str)] = &[
    ("John", "Doe", "42", "MALE", "9876500001"),
    ("Mary", "Thomas", "35", "FEMALE", "9876500002"),
    ("Asha", "Rao", "29", "FEMALE", "9876500003"),
    ("Ravi", "Kumar", "57", "MALE", "9876500004"),
    ("Sam", "Lee", "23", "OTHER", "9876500005"),
    ("Johnny", "Walker", "64", "MALE", "9876500006"),
    ("Sita", "Devi", "48", "FEMALE", "9876500007"),
];

fn main() -> ExitCode {
    println!("clinicdesk_core ping={}", clinicdesk_core::ping());
    println!("clinicdesk_core version={}", clinicdesk_core::core_version());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    if let Some(settings) = LogSettings::from_env()? {
        init_logging_with(&settings)?;
    }

    let mut args = std::env::args().skip(1);
    let config = match args.next().filter(|path| !path.is_empty()) {
        Some(path) => ListConfig::from_file(Path::new(&path)).map_err(|err| err.to_string())?,
        None => ListConfig::default(),
    };
    let query = args.next().unwrap_or_default();

    let dispatcher = CrudDispatcher::new(MemoryPatientDirectory::new());
    let mut session = PatientListSession::new(&config);
    dispatcher
        .load(&mut session)
        .map_err(|err| err.to_string())?;

    for (index, (first, last, age, gender, phone)) in DEMO_PATIENTS.iter().enumerate() {
        let draft = PatientDraft {
            first_name: (*first).to_string(),
            last_name: (*last).to_string(),
            age: (*age).to_string(),
            gender: (*gender).to_string(),
            patient_id: format!("PT{:04}", index + 1),
            mobile_number: (*phone).to_string(),
            marital_status: "single".to_string(),
            blood_group: "O+".to_string(),
            ..PatientDraft::default()
        };
        let outcome = dispatcher
            .create(&mut session, &draft)
            .map_err(|err| err.to_string())?;
        if !outcome.is_applied() {
            return Err(format!("demo seed failed: {outcome:?}"));
        }
    }
    info!(
        "event=cli_seeded module=cli status=ok count={}",
        session.records().len()
    );

    session.set_query(query);
    let view = session.page_view();
    for row in &view.rows {
        let patient = row.patient;
        println!(
            "{:>3}  {:<8} {:<16} {:<12} {:<7} {}",
            row.serial, patient.patient_id, patient.name, patient.phone, patient.gender, patient.age
        );
    }
    if let Some(message) = view.empty_state_message() {
        println!("{message}");
    }
    println!("{}", view.status_label());
    Ok(())
}
