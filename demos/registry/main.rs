//! Scholar Ledger registry demo.
//!
//! Runs the ledger contracts against an in-memory world state:
//! - Seeding the reference students
//! - Issuing a certificate, a project and an event
//! - Single-field updates with old-value return
//! - Listing each collection, from one shared namespace or, with
//!   `--exclusive`, from one namespace per contract
//!
//! Run with: cargo run -p registry -- walkthrough --verbose

use clap::{Parser, Subcommand, ValueEnum};
use scholar_core::{
    CertificateContract, Config, CoreResult, EventContract, KeySpace, ProjectContract, Student,
    StudentContract,
};
use scholar_storage::InMemoryState;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Scholar Ledger registry demo.
#[derive(Parser)]
#[command(name = "registry")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    /// Output format
    #[arg(global = true, short, long, value_enum, default_value = "text")]
    format: Format,

    /// Give each contract its own namespace and store bare IDs
    #[arg(global = true, long)]
    exclusive: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the reference students and list them
    Students,

    /// Seed, then move a student to another university
    Transfer {
        /// Student ID
        id: String,
        /// New university
        university: String,
    },

    /// Run every contract once
    Walkthrough,
}

/// The contract a world state belongs to.
#[derive(Clone, Copy)]
enum Namespace {
    Students,
    Certificates,
    Projects,
    Events,
}

struct Registry {
    /// One shared state under prefixed keys, one per contract otherwise.
    states: Vec<InMemoryState>,
    students: StudentContract,
    certificates: CertificateContract,
    projects: ProjectContract,
    events: EventContract,
}

impl Registry {
    fn open(key_space: KeySpace) -> CoreResult<Self> {
        let config = Config::new().key_space(key_space);
        let namespaces = match key_space {
            KeySpace::Prefixed => 1,
            KeySpace::Exclusive => 4,
        };
        let mut registry = Self {
            states: (0..namespaces).map(|_| InMemoryState::new()).collect(),
            students: StudentContract::new(config),
            certificates: CertificateContract::new(config),
            projects: ProjectContract::new(config),
            events: EventContract::new(config),
        };
        let students = registry.students;
        students.init_ledger(registry.state(Namespace::Students))?;
        Ok(registry)
    }

    fn state(&mut self, namespace: Namespace) -> &mut InMemoryState {
        let slot = if self.states.len() == 1 {
            0
        } else {
            namespace as usize
        };
        &mut self.states[slot]
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let key_space = if cli.exclusive {
        KeySpace::Exclusive
    } else {
        KeySpace::Prefixed
    };
    let mut registry = Registry::open(key_space)?;
    let students = registry.students;

    match cli.command {
        Commands::Students => {
            let all = students.get_all_students(&*registry.state(Namespace::Students))?;
            print_students(cli.format, &all)?;
        }
        Commands::Transfer { id, university } => {
            let state = registry.state(Namespace::Students);
            let old = students.transfer_student(state, &id, &university)?;
            let student = students.read_student(&*state, &id)?;
            match cli.format {
                Format::Text => println!("{id}: {old} -> {}", student.university),
                Format::Json => print_json(&serde_json::json!({
                    "previous": old,
                    "student": student,
                }))?,
            }
        }
        Commands::Walkthrough => walkthrough(&mut registry, cli.format)?,
    }

    Ok(())
}

fn walkthrough(registry: &mut Registry, format: Format) -> Result<(), Box<dyn std::error::Error>> {
    let Registry {
        students,
        certificates,
        projects,
        events,
        ..
    } = *registry;

    certificates.create_certificate(
        registry.state(Namespace::Certificates),
        "cert1",
        "student1",
        "Licence Mathematiques",
        "Sidi Bel Abbes",
        "30/06/2018",
        "5d41402abc4b2a76b9719d911017c592",
        [12, 13, 11, 14, 15, 13],
        13,
        "Mention assez bien",
    )?;
    projects.create_project(
        registry.state(Namespace::Projects),
        "proj1",
        "student4",
        "Student registry on a permissioned ledger",
        "Dr. Benali",
        "Systemes d'information",
        "Memoire",
        "15/06/2022",
        "e3b0c44298fc1c149afbf4c8996fb924",
        "/projects/proj1",
        ["student2", "", "", "", "", ""],
        16,
        "",
    )?;
    events.create_event(
        registry.state(Namespace::Events),
        "event1",
        "student2",
        "Hackathon",
        "Oran",
        "03/03/2022",
        "USTO",
        "",
    )?;

    let state = registry.state(Namespace::Students);
    let university = students.transfer_student(state, "student1", "USTO")?;
    let major = students.change_major(state, "student2", "GL")?;
    let degree = students.change_degree(state, "student5", "Master")?;
    let year = students.change_current_year(state, "student3", 4)?;

    match students.create_student(
        state,
        "student1",
        "Duplicate",
        1,
        "Info",
        2022,
        "",
        "Licence",
        "USTO",
        "",
        "",
        "",
        "",
    ) {
        Err(err) => tracing::info!(error = %err, "duplicate create rejected"),
        Ok(()) => return Err("duplicate student was accepted".into()),
    }

    let all_students = students.get_all_students(&*registry.state(Namespace::Students))?;
    let all_certificates =
        certificates.get_all_certificates(&*registry.state(Namespace::Certificates))?;
    let all_projects = projects.get_all_projects(&*registry.state(Namespace::Projects))?;
    let all_events = events.get_all_events(&*registry.state(Namespace::Events))?;

    match format {
        Format::Text => {
            println!("student1 university: {university} -> USTO");
            println!("student2 major: {major:?} -> GL");
            println!("student5 degree: {degree} -> Master");
            println!("student3 current year: {year} -> 4");
            println!();
            print_students(Format::Text, &all_students)?;
            println!();
            println!("Certificates: {}", all_certificates.len());
            for c in &all_certificates {
                println!(
                    "  {} {} ({}) avg {}",
                    c.id, c.title, c.student_id, c.years_average
                );
            }
            println!("Projects: {}", all_projects.len());
            for p in &all_projects {
                let partners: Vec<&str> = p.partners().collect();
                println!(
                    "  {} {} grade {} with {}",
                    p.id,
                    p.title,
                    p.grade,
                    partners.join(", ")
                );
            }
            println!("Events: {}", all_events.len());
            for e in &all_events {
                println!("  {} {} at {} by {}", e.id, e.title, e.location, e.organizer);
            }
        }
        Format::Json => print_json(&serde_json::json!({
            "students": all_students,
            "certificates": all_certificates,
            "projects": all_projects,
            "events": all_events,
        }))?,
    }

    Ok(())
}

fn print_students(format: Format, students: &[Student]) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        Format::Text => {
            println!("Students: {}", students.len());
            for s in students {
                println!(
                    "  {} {} - {} {} year {} ({})",
                    s.id, s.full_name, s.degree, s.speciality, s.current_year, s.university
                );
            }
        }
        Format::Json => print_json(&students)?,
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
