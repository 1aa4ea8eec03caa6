#![allow(missing_docs)]

//! Ariane — HR assistant decision core.
//!
//! Terminal front-end over the dispatcher: an interactive chat REPL and a
//! one-shot `ask` subcommand, both running against a seeded demo roster.
//! Real deployments wire the dispatcher to their own directory, leave
//! store and notification channel instead.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use clap::{Parser, Subcommand};

use ariane::config::{config_dir, load_config, Config};
use ariane::dialogue::Dispatcher;
use ariane::store::fs::FsArtifacts;
use ariane::store::memory::{MemoryDirectory, MemoryLeaveStore, MemoryNotifier};
use ariane::types::{Employee, LeaveProcedure, TurnPayload};

#[derive(Parser)]
#[command(name = "ariane", about = "HR assistant decision core", version)]
struct Cli {
    /// Path to the configuration file (defaults to ~/.ariane/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive chat session against the demo roster.
    Chat {
        /// Badge id to authenticate as.
        #[arg(long, default_value = "EMP001")]
        user: String,
    },
    /// Send a single message and print the response.
    Ask {
        /// Badge id to authenticate as.
        #[arg(long, default_value = "EMP001")]
        user: String,
        /// The message to send.
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    ariane::logging::init_cli();

    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref())?;
    let dispatcher = build_dispatcher(&config);

    match cli.command {
        Command::Ask { user, message } => {
            let outcome = dispatcher
                .process_turn(&user, &message, None)
                .await
                .context("turn failed")?;
            println!("{}", outcome.response);
            print_payload(outcome.payload.as_ref());
        }
        Command::Chat { user } => {
            run_chat(&dispatcher, &user).await?;
        }
    }

    Ok(())
}

/// Load the config file when present, defaults otherwise.
fn resolve_config(explicit: Option<&std::path::Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    let default_path = config_dir()?.join("config.toml");
    if default_path.is_file() {
        load_config(&default_path)
    } else {
        Ok(Config::default())
    }
}

/// Wire the dispatcher over the demo roster and filesystem reports.
fn build_dispatcher(config: &Config) -> Dispatcher {
    Dispatcher::new(
        Arc::new(MemoryDirectory::new(demo_roster())),
        Arc::new(MemoryLeaveStore::with_procedures(demo_procedures())),
        Arc::new(MemoryNotifier::new()),
        Arc::new(FsArtifacts::new(config.storage.reports_dir.clone())),
        config.hr_desk.clone(),
    )
}

/// Interactive REPL: one line in, one response out. `/quit` leaves.
async fn run_chat(dispatcher: &Dispatcher, user: &str) -> Result<()> {
    println!("Ariane — assistant RH (connecté en tant que {user}). /quit pour sortir.");
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line == "/quit" {
            break;
        }

        match dispatcher.process_turn(user, line, None).await {
            Ok(outcome) => {
                println!("{}\n", outcome.response);
                print_payload(outcome.payload.as_ref());
            }
            Err(e) => eprintln!("erreur : {e}"),
        }
    }
    Ok(())
}

/// Print machine-readable extras as JSON, when present.
fn print_payload(payload: Option<&TurnPayload>) {
    if let Some(payload) = payload {
        if let Ok(json) = serde_json::to_string_pretty(payload) {
            println!("{json}");
        }
    }
}

/// Fixed demo roster: three departments, one HR account, one overloaded
/// employee.
fn demo_roster() -> Vec<Employee> {
    let created = Utc
        .with_ymd_and_hms(2024, 1, 8, 9, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);

    let base = |id: i64, matricule: &str, first: &str, last: &str, dept: &str| Employee {
        id,
        matricule: matricule.to_owned(),
        first_name: first.to_owned(),
        last_name: last.to_owned(),
        email: format!(
            "{}.{}@entreprise.com",
            first.to_lowercase(),
            last.to_lowercase()
        ),
        role: "employe".to_owned(),
        department: Some(dept.to_owned()),
        status: Some("actif".to_owned()),
        current_missions: None,
        missions_status: Some("en pause".to_owned()),
        manager: Some("Omar Senhaji".to_owned()),
        solde_conges: Some(18),
        solde_rtt: Some(6),
        statut_employe: Some("CDI".to_owned()),
        date_dernier_conge: None,
        date_maj_solde: None,
        created_at: created,
        updated_at: created,
    };

    let mut roster = vec![
        base(1, "EMP001", "Yassine", "Alaoui", "IT"),
        base(2, "EMP002", "Salma", "Berrada", "IT"),
        base(3, "EMP003", "Mehdi", "Tazi", "Ventes"),
        base(4, "RH001", "Khadija", "Benani", "RH"),
    ];

    // One busy employee to make the workload views interesting.
    roster[1].current_missions =
        Some("migration, audit, support, onboarding, recette".to_owned());
    roster[1].missions_status = Some("en cours".to_owned());
    roster[0].current_missions = Some("migration".to_owned());

    roster
}

/// Demo procedure catalog.
fn demo_procedures() -> Vec<LeaveProcedure> {
    vec![
        LeaveProcedure {
            titre: "Congés payés".to_owned(),
            description: "Demande à effectuer 1 mois à l'avance, validation par le manager."
                .to_owned(),
            delai: Some("1 mois".to_owned()),
        },
        LeaveProcedure {
            titre: "Congé maladie".to_owned(),
            description: "Certificat médical à transmettre aux RH.".to_owned(),
            delai: Some("48h".to_owned()),
        },
        LeaveProcedure {
            titre: "RTT".to_owned(),
            description: "Préavis de 2 semaines, validation par le manager.".to_owned(),
            delai: Some("2 semaines".to_owned()),
        },
    ]
}
