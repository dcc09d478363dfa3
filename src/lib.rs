//! Floorplan: waiter-to-table assignment for restaurants.
//!
//! Floorplan keeps track of which waiter serves which table, across any number of
//! restaurants, and refuses to give one waiter more than a fixed number of tables in the
//! same restaurant (4 unless configured otherwise). A refused request comes back with the
//! waiters who could take the table instead.
//!
//! # Architecture
//!
//! - **Engine** ([`assignment`]): the in-memory waiter ↔ table indexes, loaded once from the
//!   repository on first use and updated in place afterwards.
//! - **Repository** ([`repository`]): the persistence seam. [`repository::SqliteRepository`]
//!   stores restaurants, tables, and waiters in `.floorplan/data/floor.db`.
//! - **Broker** ([`core::broker`]): every database access is serialized and written to the
//!   `floor.events.jsonl` audit log.
//!
//! # Examples
//!
//! ```bash
//! floorplan init
//! floorplan setup --restaurants 2 --tables 20 --waiters 8
//! floorplan assign Waiter1 Restaurant1 Table3
//! floorplan assignments Restaurant1
//! floorplan tables Waiter1
//! floorplan tables --format json
//! ```

pub mod assignment;
pub mod core;
pub mod repository;

use crate::assignment::{AssignOutcome, AssignmentEngine, UnresolvedKey};
use crate::core::{broker, config, error, output, store::Store, time};
use crate::repository::{SeedPlan, SqliteRepository};

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

/// Suggestions shown inline before the text output truncates.
const SUGGESTION_PREVIEW: usize = 6;

#[derive(Parser, Debug)]
#[clap(
    name = "floorplan",
    version = env!("CARGO_PKG_VERSION"),
    about = "Assign waiters to restaurant tables"
)]
struct Cli {
    /// Project directory holding `.floorplan/` (defaults to current working directory).
    #[clap(short, long, global = true)]
    dir: Option<PathBuf>,
    /// Output format: 'text' or 'json'.
    #[clap(long, global = true, default_value = "text")]
    format: String,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the store and database schema
    Init,
    /// Seed restaurants, tables, and waiters
    Setup {
        #[clap(long, default_value_t = 2)]
        restaurants: usize,
        /// Tables per restaurant
        #[clap(long, default_value_t = 20)]
        tables: usize,
        #[clap(long, default_value_t = 8)]
        waiters: usize,
    },
    /// Assign a waiter to a table
    Assign {
        waiter: String,
        restaurant: String,
        table: String,
    },
    /// Show every table of a restaurant and who serves it
    Assignments { restaurant: String },
    /// Show the tables of one waiter, or of every waiter, grouped by restaurant
    Tables { waiter: Option<String> },
    /// Show the database audit log
    Audit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

fn parse_format(raw: &str) -> Result<Format, error::FloorError> {
    match raw {
        "text" => Ok(Format::Text),
        "json" => Ok(Format::Json),
        other => Err(error::FloorError::ValidationError(format!(
            "unknown format '{}' (expected 'text' or 'json')",
            other
        ))),
    }
}

fn print_json(cmd: &str, status: &str, data: serde_json::Value) -> Result<(), error::FloorError> {
    let envelope = time::command_envelope(cmd, status, data);
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

pub fn run() -> Result<(), error::FloorError> {
    let cli = Cli::parse();
    let format = parse_format(&cli.format)?;

    let project_dir = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let store = Store::for_project(&project_dir);
    let config_dir = store
        .project_dir()
        .map(PathBuf::from)
        .unwrap_or_else(|| project_dir.clone());
    let cfg = config::load_config(&config_dir)?;

    if let Command::Audit = cli.command {
        let events = broker::read_audit_log(&store.root)?;
        match format {
            Format::Json => print_json("audit", "ok", serde_json::to_value(&events)?)?,
            Format::Text if events.is_empty() => println!("No audit log found."),
            Format::Text => {
                for ev in events {
                    println!("{} {:<24} {:<8} {}", ev.ts, ev.op, ev.status, ev.actor.dimmed());
                }
            }
        }
        return Ok(());
    }

    let repo = SqliteRepository::open(&store, &cfg.actor)?;

    match cli.command {
        Command::Init => match format {
            Format::Json => print_json(
                "init",
                "ok",
                serde_json::json!({ "store": store.root, "capacity": cfg.capacity }),
            )?,
            Format::Text => println!(
                "{} Floorplan store ready at {}",
                "●".bright_green(),
                store.root.display()
            ),
        },
        Command::Setup {
            restaurants,
            tables,
            waiters,
        } => {
            let report = repo.seed(&SeedPlan {
                restaurants,
                tables_per_restaurant: tables,
                waiters,
            })?;
            match format {
                Format::Json => print_json("setup", "ok", serde_json::to_value(&report)?)?,
                Format::Text => println!(
                    "Seeded {} restaurants, {} tables, {} waiters",
                    report.restaurants, report.tables, report.waiters
                ),
            }
        }
        Command::Assign {
            waiter,
            restaurant,
            table,
        } => {
            let mut engine = AssignmentEngine::with_capacity(repo, cfg.capacity)?;
            let outcome = engine.assign_by_name(&waiter, &restaurant, &table)?;
            report_assignment(format, &waiter, &restaurant, &table, outcome, cfg.capacity)?;
        }
        Command::Assignments { restaurant } => {
            let mut engine = AssignmentEngine::with_capacity(repo, cfg.capacity)?;
            let rows = output::assignment_rows(&engine.assignments_for_name(&restaurant)?);
            match format {
                Format::Json => print_json(
                    "assignments",
                    "ok",
                    serde_json::json!({ "restaurant": restaurant, "tables": rows }),
                )?,
                Format::Text if rows.is_empty() => {
                    println!("No tables known for restaurant '{}'", restaurant)
                }
                Format::Text => {
                    println!("{}", restaurant.bold());
                    for row in rows {
                        match row.waiter {
                            Some(w) => println!("  {:<12} {}", row.table, w.bright_white()),
                            None => println!("  {:<12} {}", row.table, "unassigned".dimmed()),
                        }
                    }
                }
            }
        }
        Command::Tables { waiter } => {
            let mut engine = AssignmentEngine::with_capacity(repo, cfg.capacity)?;
            let rows = match &waiter {
                Some(name) => vec![output::WaiterRow {
                    waiter: name.clone(),
                    restaurants: output::restaurant_rows(&engine.tables_for_name(name)?),
                }],
                None => output::waiter_rows(&engine.all_tables()?),
            };
            match format {
                Format::Json => print_json("tables", "ok", serde_json::to_value(&rows)?)?,
                Format::Text => {
                    for row in rows {
                        println!("{}", row.waiter.bold());
                        if row.restaurants.is_empty() {
                            println!("  {}", "no tables".dimmed());
                        }
                        for r in row.restaurants {
                            println!("  {:<16} {}", r.restaurant, r.tables.join(", "));
                        }
                    }
                }
            }
        }
        Command::Audit => {}
    }

    Ok(())
}

fn report_assignment(
    format: Format,
    waiter: &str,
    restaurant: &str,
    table: &str,
    outcome: AssignOutcome,
    capacity: usize,
) -> Result<(), error::FloorError> {
    match (format, outcome) {
        (Format::Json, AssignOutcome::Assigned) => print_json(
            "assign",
            "assigned",
            serde_json::json!({ "waiter": waiter, "restaurant": restaurant, "table": table }),
        ),
        (Format::Json, AssignOutcome::Rejected { suggestions }) => print_json(
            "assign",
            "rejected",
            serde_json::json!({
                "waiter": waiter,
                "restaurant": restaurant,
                "table": table,
                "capacity": capacity,
                "suggestions": output::waiter_names(&suggestions),
            }),
        ),
        (Format::Json, AssignOutcome::Unresolved(key)) => print_json(
            "assign",
            "unresolved",
            serde_json::json!({ "unresolved": key }),
        ),
        (Format::Text, AssignOutcome::Assigned) => {
            println!(
                "{} {} now serves {} in {}",
                "✓".bright_green(),
                waiter,
                table,
                restaurant
            );
            Ok(())
        }
        (Format::Text, AssignOutcome::Rejected { suggestions }) => {
            println!(
                "{} {} already serves {} tables in {}",
                "✗".bright_red(),
                waiter,
                capacity,
                restaurant
            );
            let names = output::waiter_names(&suggestions);
            println!(
                "  Available instead: {}",
                output::preview_names(&names, SUGGESTION_PREVIEW)
            );
            Ok(())
        }
        (Format::Text, AssignOutcome::Unresolved(UnresolvedKey::Waiter { name })) => {
            println!("{} Unknown waiter '{}'", "?".bright_yellow(), name);
            Ok(())
        }
        (Format::Text, AssignOutcome::Unresolved(UnresolvedKey::Table { restaurant, number })) => {
            println!(
                "{} Unknown table '{}' in restaurant '{}'",
                "?".bright_yellow(),
                number,
                restaurant
            );
            Ok(())
        }
    }
}
