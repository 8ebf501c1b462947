use clap::{Parser, Subcommand};
use tracing::{info, warn};
use lms::core::domain::Configuration;
use lms::core::library::{LibraryError, LibraryResult};
use lms::gateway::GatewayPublisherVia;
use lms::loans::domain::CheckoutService;
use lms::manager::factory::create_library_manager;
use lms::manager::LibraryManager;
use lms::persistence::service::PersistenceService;
use lms::utils::date::format_date;
use lms::utils::logs::{parse_level, setup_tracing};

/// Maintenance tool for the library data directory.
#[derive(Debug, Parser)]
#[command(name = "lms", version, about, long_about = None)]
struct Args {
    /// Directory holding the library JSON documents.
    #[arg(short, long, env = "LMS_DATA_DIR", default_value = "data")]
    data_dir: String,

    /// Maximum log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print catalog, patron and lending totals.
    Stats,
    /// Expire reservations, announce overdue loans and save.
    Maintenance,
    /// List overdue loans.
    Overdue,
    /// Copy every data file to a suffixed backup.
    Backup {
        #[arg(short, long)]
        suffix: Option<String>,
    },
    /// Replace the data files with a named backup.
    Restore {
        suffix: String,
    },
    /// Restore the most recent backup.
    Recover,
}

fn load(service: &mut PersistenceService) -> LibraryManager {
    let mut manager = create_library_manager(&Configuration::default(), GatewayPublisherVia::Logs);
    if !service.load_library_data(&mut manager) {
        warn!(error = service.last_error().unwrap_or_default(), "library data loaded with errors");
    }
    manager
}

fn print_stats(manager: &LibraryManager) {
    println!("{}", manager.library_name());
    println!("  resources:      {} ({} available)", manager.total_resource_count(), manager.available_resource_count());
    println!("  users:          {} ({} active)", manager.total_user_count(), manager.active_user_count());
    println!("  active loans:   {}", manager.total_active_loans());
    println!("  overdue loans:  {}", manager.total_overdue_loans());
    for (resource, count) in manager.most_borrowed_resources(5) {
        println!("  borrowed {:>3}x  {}", count, resource.title());
    }
}

fn print_overdue(manager: &LibraryManager) {
    let now = manager.now();
    let rate = manager.configuration().daily_fine_rate;
    for loan in manager.overdue_loans() {
        println!("{}  {}  {}  due {}  {} day(s)  fine {:.2}", loan.user_id(), loan.resource_id(),
                 loan.resource_title(), format_date(&loan.due_date()), loan.days_overdue(now),
                 loan.calculate_fine(now, rate));
    }
}

fn main() -> LibraryResult<()> {
    let args = Args::parse();
    setup_tracing(parse_level(&args.log_level), args.json_logs);

    let mut service = PersistenceService::new(&args.data_dir)?;
    match args.command {
        Command::Stats => {
            print_stats(&load(&mut service));
        }
        Command::Maintenance => {
            let mut manager = load(&mut service);
            let report = manager.perform_daily_maintenance();
            if !service.save_library_data(&manager) {
                return Err(LibraryError::runtime(service.last_error().unwrap_or("save failed"), None));
            }
            println!("expired reservations: {}", report.expired_reservations);
            println!("overdue loans:        {}", report.overdue_loans);
            println!("status mismatches:    {}", report.availability_mismatches);
        }
        Command::Overdue => {
            print_overdue(&load(&mut service));
        }
        Command::Backup { suffix } => {
            let suffix = service.backup_data(suffix.as_deref())?;
            println!("{}", suffix);
        }
        Command::Restore { suffix } => {
            let restored = service.restore_from_backup(&suffix)?;
            info!(suffix = suffix.as_str(), files = restored, "restored backup");
        }
        Command::Recover => {
            if !service.attempt_data_recovery() {
                return Err(LibraryError::not_found(service.last_error().unwrap_or("no backup found")));
            }
            print_stats(&load(&mut service));
        }
    }
    Ok(())
}
