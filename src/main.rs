//! Binary entry point: a thin command-line presentation layer over the
//! coordinator. It collects input, parses dates, renders domain errors as
//! user-facing messages, and prints the notifications the coordinator
//! broadcasts. All record logic lives in the library.

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use roster_manager::{db, Coordinator, Notification, SearchCriteria, SqliteStore};

#[derive(Parser, Debug)]
#[command(author, version, about = "Manage a roster of players backed by SQLite")]
struct Cli {
    /// Path to the SQLite database. Defaults to a per-user file beneath the
    /// home directory.
    #[arg(long, value_name = "FILE", global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Shared optional-filter arguments for `search` and `delete`.
#[derive(Args, Debug, Clone)]
struct FilterArgs {
    #[arg(long, help = "Substring match on the full name")]
    name: Option<String>,
    #[arg(long, value_name = "YYYY-MM-DD", help = "Exact birth date match")]
    birth_date: Option<NaiveDate>,
    #[arg(long, help = "Substring match on the team")]
    team: Option<String>,
    #[arg(long, help = "Substring match on the home city")]
    city: Option<String>,
    #[arg(long, help = "Substring match on the squad")]
    squad: Option<String>,
    #[arg(long, help = "Substring match on the position")]
    position: Option<String>,
}

impl From<FilterArgs> for SearchCriteria {
    fn from(args: FilterArgs) -> Self {
        SearchCriteria {
            full_name: args.name,
            birth_date: args.birth_date,
            team: args.team,
            home_city: args.city,
            squad: args.squad,
            position: args.position,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add one player to the roster.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, value_name = "YYYY-MM-DD")]
        birth_date: NaiveDate,
        #[arg(long)]
        team: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        squad: String,
        #[arg(long)]
        position: String,
    },
    /// List every player in storage order.
    List,
    /// Search with optional AND-combined filters.
    Search(FilterArgs),
    /// Delete every player matching the filters (all of them if none given).
    Delete(FilterArgs),
    /// Show one page of players plus the total count.
    Page {
        #[arg(long, default_value_t = 0)]
        offset: u64,
        #[arg(long, default_value_t = 10)]
        limit: u64,
    },
    /// Print the total number of players.
    Count,
    /// Bulk-import players from an XML document.
    Import { path: PathBuf },
    /// Bulk-export the current roster to an XML document.
    Export { path: PathBuf },
    /// Remove every player from the roster.
    Clear,
}

fn main() -> Result<()> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")?.start()?;
    let cli = Cli::parse();

    let conn = match &cli.db {
        Some(path) => db::open(path)?,
        None => db::open_default()?,
    };
    let mut coordinator = Coordinator::new(SqliteStore::new(conn));
    coordinator.subscribe(Box::new(print_notification));

    run(&coordinator, cli.command)
}

fn run(coordinator: &Coordinator<SqliteStore>, command: Command) -> Result<()> {
    match command {
        Command::Add {
            name,
            birth_date,
            team,
            city,
            squad,
            position,
        } => {
            coordinator.add_player(&name, birth_date, &team, &city, &squad, &position)?;
        }
        Command::List => {
            for player in coordinator.list_all()? {
                println!("{player}");
            }
        }
        Command::Search(filters) => {
            let players = coordinator.search(&filters.into())?;
            for player in &players {
                println!("{player}");
            }
        }
        Command::Delete(filters) => {
            coordinator.delete_players(&filters.into())?;
        }
        Command::Page { offset, limit } => {
            let (page, total) = coordinator.paginate(offset, limit)?;
            for player in &page {
                println!("{player}");
            }
            println!("({} of {total} players)", page.len());
        }
        Command::Count => {
            println!("{}", coordinator.count()?);
        }
        Command::Import { path } => {
            let imported = coordinator.import_from_xml(&path)?;
            println!("Imported {imported} player(s) from {}", path.display());
        }
        Command::Export { path } => {
            coordinator.export_to_xml(&path, None)?;
            println!("Exported roster to {}", path.display());
        }
        Command::Clear => {
            let cleared = coordinator.clear_all()?;
            println!("Removed {cleared} player(s)");
        }
    }
    Ok(())
}

/// Listener wired into the coordinator so state changes are visible on the
/// terminal regardless of which subcommand triggered them.
fn print_notification(notification: &Notification) {
    match notification {
        Notification::Added(player) => println!("Added: {player}"),
        Notification::Results(players) => println!("Found {} player(s).", players.len()),
        Notification::Deleted(count) => println!("Deleted {count} player(s)."),
        Notification::Updated => {}
    }
}
