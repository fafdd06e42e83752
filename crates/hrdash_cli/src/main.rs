//! Command-line front end over `hrdash_core`.
//!
//! # Responsibility
//! - Load configuration, start logging and open the database.
//! - Expose dashboard, reminder and navigation queries for local use.

use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use hrdash_core::model::user::Role;
use hrdash_core::repo::employee_repo::{EmployeeListQuery, SqliteEmployeeRepository};
use hrdash_core::repo::reminder_repo::SqliteReminderRepository;
use hrdash_core::session::navigation::menu_for;
use hrdash_core::{
    init_logging, open_db, ArchiveOutcome, CompanyFilter, CoreConfig, DashboardService,
    EmployeeRepository, PollDecision, ReminderFeed, ReminderService,
};
use log::info;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "hrdash", version, about = "HR dashboard core tools")]
struct Cli {
    /// TOML configuration file; defaults apply when omitted.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a starter configuration file.
    InitConfig,
    /// Health probe for the core library.
    Ping,
    /// Per-department salary statistics.
    Stats {
        #[arg(long)]
        company: Option<i64>,
    },
    /// Reminder lifecycle.
    Reminders {
        #[command(subcommand)]
        command: RemindersCommand,
    },
    /// Sidebar entries visible to a role.
    Menu {
        #[arg(long)]
        role: String,
    },
}

#[derive(Debug, Subcommand)]
enum RemindersCommand {
    /// Create today's birthday reminders.
    Detect {
        #[arg(long)]
        company: Option<i64>,
    },
    /// Show the active set.
    List {
        #[arg(long)]
        company: Option<i64>,
    },
    /// Keep the active set fresh, printing it after every poll.
    Watch {
        #[arg(long)]
        company: Option<i64>,
        /// Stop after this many polls.
        #[arg(long)]
        polls: Option<u32>,
    },
    /// Move one reminder to the archived set.
    Archive { id: Uuid },
    /// Show the most recently archived reminders.
    Archived {
        #[arg(long)]
        limit: Option<u32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match cli.config.as_deref() {
        Some(path) => CoreConfig::load(path)?,
        None => CoreConfig::default(),
    };
    if let Some(dir) = config.logging.dir.as_deref() {
        init_logging(&config.logging.level, dir)
            .map_err(|err| anyhow!("failed to start logging: {err}"))?;
    }

    match cli.command {
        Command::InitConfig => print!("{}", CoreConfig::default_toml()?),
        Command::Ping => {
            println!("hrdash_core ping={}", hrdash_core::ping());
            println!("hrdash_core version={}", hrdash_core::core_version());
        }
        Command::Stats { company } => stats(&config, company)?,
        Command::Reminders { command } => reminders(&config, command)?,
        Command::Menu { role } => {
            let Some(role) = Role::parse(&role) else {
                bail!("unknown role `{role}`; expected ADMIN, rrhh or nominas");
            };
            for item in menu_for(role) {
                println!("{:<14} {}", item.label_key, item.route);
            }
        }
    }
    Ok(())
}

fn stats(config: &CoreConfig, company: Option<i64>) -> Result<()> {
    let conn = open_db(&config.database.path)
        .with_context(|| format!("cannot open {}", config.database.path.display()))?;
    let filter = company.map_or(CompanyFilter::All, CompanyFilter::Company);
    let view = DashboardService::new(SqliteEmployeeRepository::try_new(&conn)?).load(filter);

    if let Some(notice) = view.notice.as_deref() {
        eprintln!("{notice}");
    }
    println!(
        "headcount={} payroll_total={:.2} male={} female={}",
        view.summary.headcount,
        view.summary.payroll_total,
        view.summary.gender.male,
        view.summary.gender.female
    );
    for stat in &view.statistics {
        println!(
            "{:<24} average={:>12.2} stddev={:>12.2}",
            stat.name, stat.average, stat.standard_deviation
        );
    }
    Ok(())
}

fn print_feed(feed: &ReminderFeed, now_ms: i64) {
    if let Some(notice) = feed.notice() {
        eprintln!("{notice}");
    }
    println!("unread={}", feed.unread_count());
    for reminder in feed.active() {
        println!(
            "{} {:?} {} {}",
            reminder.id,
            reminder.tier(now_ms),
            reminder.category,
            reminder.description
        );
    }
}

fn reminders(config: &CoreConfig, command: RemindersCommand) -> Result<()> {
    let conn = open_db(&config.database.path)
        .with_context(|| format!("cannot open {}", config.database.path.display()))?;
    let service = ReminderService::new(SqliteReminderRepository::try_new(&conn)?);
    let now = Utc::now().with_timezone(&config.utc_offset()?);
    let now_ms = now.timestamp_millis();

    match command {
        RemindersCommand::Detect { company } => {
            let employees = SqliteEmployeeRepository::try_new(&conn)?;
            let subjects = employees.list_employees(&EmployeeListQuery {
                company_id: company,
                ..EmployeeListQuery::default()
            })?;
            let report = service.detect_and_create(&subjects, &now);
            info!(
                "event=cli_detect module=cli status=ok created={} skipped={} failed={}",
                report.created.len(),
                report.already_present,
                report.failed
            );
            println!(
                "created={} already_present={} failed={}",
                report.created.len(),
                report.already_present,
                report.failed
            );
        }
        RemindersCommand::List { company } => {
            let mut feed = ReminderFeed::from_config(config, company);
            feed.refresh(&service, now_ms);
            print_feed(&feed, now_ms);
        }
        RemindersCommand::Watch { company, polls } => {
            let mut feed = ReminderFeed::from_config(config, company);
            info!(
                "event=cli_watch module=cli status=start interval_ms={}",
                feed.poll_interval_ms()
            );
            let mut completed = 0;
            while polls.map_or(true, |limit| completed < limit) {
                let now_ms = Utc::now().timestamp_millis();
                if feed.tick(&service, now_ms) == PollDecision::Start {
                    print_feed(&feed, now_ms);
                    completed += 1;
                }
                thread::sleep(Duration::from_secs(1));
            }
        }
        RemindersCommand::Archive { id } => match service.archive(id, now_ms)? {
            ArchiveOutcome::Archived(reminder) => println!("archived {}", reminder.id),
            ArchiveOutcome::AlreadyArchived => println!("{id} was already archived"),
        },
        RemindersCommand::Archived { limit } => {
            for reminder in service.list_archived(limit)? {
                println!(
                    "{} {} {}",
                    reminder.id, reminder.category, reminder.description
                );
            }
        }
    }
    Ok(())
}
