//! Terminal front end for the daydash dashboard.
//!
//! # Responsibility
//! - Map subcommands onto `daydash_core` manager operations.
//! - Turn validation failures into the same notices the dashboard shows.
//!
//! # Invariants
//! - Every invocation opens the store, applies one operation, and exits.
//! - Records are addressed by id prefix as printed by the list commands.

mod render;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use daydash_core::db::open_db;
use daydash_core::model::budget::INVALID_ENTRY_NOTICE;
use daydash_core::service::prompt::PendingPrompt;
use daydash_core::{
    init_logging, Dashboard, DashboardConfig, DashboardError, EntryKind, LendingDirection,
    ManagerError, PromptOutcome, PromptResponse, SqliteKvStore, TimerEvent,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

type Board<'s, 'conn> = Dashboard<'s, SqliteKvStore<'conn>>;

#[derive(Parser)]
#[command(
    name = "daydash",
    about = "Personal dashboard: tasks, budget, health, trackers and a focus timer",
    version,
    long_about = None
)]
struct Cli {
    /// Configuration file (default: ./daydash.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// SQLite store, overriding `data.db_path`
    #[arg(long, global = true, value_name = "FILE")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the home tiles: open tasks, money spent, water
    Summary,
    /// Manage the to-do list
    #[command(subcommand)]
    Task(TaskCommands),
    /// Manage income and expense entries
    #[command(subcommand)]
    Budget(BudgetCommands),
    /// Record or show today's health numbers
    #[command(subcommand)]
    Health(HealthCommands),
    /// Manage the grocery list
    #[command(subcommand)]
    Grocery(GroceryCommands),
    /// Manage recurring subscriptions
    #[command(subcommand)]
    Sub(SubscriptionCommands),
    /// Manage the plant watering log
    #[command(subcommand)]
    Plant(PlantCommands),
    /// Track borrowed and lent items
    #[command(subcommand)]
    Lend(LendingCommands),
    /// Run the focus timer in the foreground
    #[command(subcommand)]
    Timer(TimerCommands),
    /// Show or change preferences
    #[command(subcommand)]
    Settings(SettingsCommands),
    /// Delete every stored record after confirmation
    ClearAll {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum TaskCommands {
    /// Add a task
    Add { text: String },
    /// List tasks (archived tasks are hidden unless --all)
    List {
        #[arg(long)]
        all: bool,
    },
    /// Toggle a task between open and done
    Done { id: String },
    /// Replace a task's text; prompts when TEXT is omitted
    Edit { id: String, text: Option<String> },
    /// Hide a task from the default list
    Archive { id: String },
}

#[derive(Subcommand)]
enum BudgetCommands {
    /// Record an entry
    Add {
        description: String,
        amount: String,
        /// income or expense
        #[arg(long, default_value = "expense")]
        kind: EntryKind,
    },
    /// List entries with totals
    List,
    /// Delete an entry
    Remove { id: String },
}

#[derive(Subcommand)]
enum HealthCommands {
    /// Overwrite today's numbers; unparsable values count as zero
    Save(HealthArgs),
    /// Show the stored numbers
    Show,
}

#[derive(Args)]
struct HealthArgs {
    #[arg(long, default_value = "")]
    steps: String,
    /// Glasses of water
    #[arg(long, default_value = "")]
    water: String,
    /// Hours of sleep
    #[arg(long, default_value = "")]
    sleep: String,
}

#[derive(Subcommand)]
enum GroceryCommands {
    Add { name: String },
    List,
    /// Toggle an item between needed and acquired
    Toggle { id: String },
    Remove { id: String },
}

#[derive(Subcommand)]
enum SubscriptionCommands {
    Add { name: String, amount: String },
    /// List subscriptions with the monthly total
    List,
    Remove { id: String },
}

#[derive(Subcommand)]
enum PlantCommands {
    /// Add a plant; DATE defaults to today
    Add {
        name: String,
        /// Last watered, YYYY-MM-DD
        date: Option<String>,
    },
    /// List plants; --due N shows only those dry for N days or more
    List {
        #[arg(long, value_name = "DAYS")]
        due: Option<i64>,
    },
    /// Mark a plant as watered today
    Water { id: String },
    Remove { id: String },
}

#[derive(Subcommand)]
enum LendingCommands {
    Add {
        name: String,
        person: String,
        /// borrowed or lent
        #[arg(long, default_value = "borrowed")]
        kind: LendingDirection,
    },
    List,
    Remove { id: String },
}

#[derive(Subcommand)]
enum TimerCommands {
    /// Start the timer and tick until interrupted or --max-ticks
    Run {
        /// Milliseconds between ticks
        #[arg(long, default_value_t = 1000)]
        tick_ms: u64,
        #[arg(long)]
        max_ticks: Option<u64>,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    Show,
    /// Turn dark mode on or off
    DarkMode {
        #[arg(value_parser = ["on", "off"])]
        value: String,
    },
}

/// User-facing rejection that is printed as-is.
#[derive(Debug)]
struct Notice(String);

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for Notice {}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match user_notice(&err) {
            Some(notice) => {
                eprintln!("{notice}");
                ExitCode::from(2)
            }
            None => {
                eprintln!("error: {err:#}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config =
        DashboardConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(db) = cli.db {
        config.data.db_path = db;
    }
    if let Some(dir) = &config.logging.dir {
        init_logging(&config.logging.level, &dir.to_string_lossy())
            .map_err(anyhow::Error::msg)
            .context("failed to initialize logging")?;
    }

    let conn = open_db(&config.data.db_path).with_context(|| {
        format!(
            "failed to open dashboard store {}",
            config.data.db_path.display()
        )
    })?;
    let store = SqliteKvStore::new(&conn);
    let mut dashboard = Dashboard::load_with_timer(&store, config.timer.build_timer());
    info!("event=cli_start module=cli status=ok");

    match cli.command {
        Commands::Summary => {
            print!("{}", render::summary(&dashboard.summary()));
        }
        Commands::Task(cmd) => run_task(&mut dashboard, cmd)?,
        Commands::Budget(cmd) => run_budget(&mut dashboard, cmd)?,
        Commands::Health(cmd) => run_health(&mut dashboard, cmd)?,
        Commands::Grocery(cmd) => run_grocery(&mut dashboard, cmd)?,
        Commands::Sub(cmd) => run_subscription(&mut dashboard, cmd)?,
        Commands::Plant(cmd) => run_plant(&mut dashboard, cmd)?,
        Commands::Lend(cmd) => run_lending(&mut dashboard, cmd)?,
        Commands::Timer(TimerCommands::Run { tick_ms, max_ticks }) => {
            run_timer(&mut dashboard, Duration::from_millis(tick_ms), max_ticks)?
        }
        Commands::Settings(SettingsCommands::Show) => {
            println!("dark mode: {}", on_off(dashboard.settings().dark_mode()));
        }
        Commands::Settings(SettingsCommands::DarkMode { value }) => {
            let enabled = value == "on";
            dashboard.settings_mut().set_dark_mode(enabled)?;
            println!("dark mode: {}", on_off(enabled));
        }
        Commands::ClearAll { yes } => run_clear_all(&mut dashboard, yes)?,
    }
    Ok(())
}

fn run_task(dashboard: &mut Board<'_, '_>, cmd: TaskCommands) -> Result<()> {
    match cmd {
        TaskCommands::Add { text } => {
            let id = dashboard.tasks_mut().add(text)?;
            println!("added task {}", render::short_id(id));
        }
        TaskCommands::List { all } => {
            let tasks = dashboard.tasks();
            let rows: Vec<_> = if all {
                tasks.collection().items().iter().collect()
            } else {
                tasks.visible().collect()
            };
            print!("{}", render::tasks(&rows));
        }
        TaskCommands::Done { id } => {
            let id = dashboard.tasks().collection().resolve_id(&id)?;
            let completed = dashboard.tasks_mut().toggle_completed(id)?;
            let state = if completed { "done" } else { "open" };
            println!("task {} is {state}", render::short_id(id));
        }
        TaskCommands::Edit { id, text } => {
            let id = dashboard.tasks().collection().resolve_id(&id)?;
            let response = match text {
                Some(text) => {
                    dashboard.request_task_edit(id)?;
                    PromptResponse::Text(text)
                }
                None => {
                    let prompt = dashboard.request_task_edit(id)?.clone();
                    ask(&prompt)?
                }
            };
            match dashboard.resolve_prompt(response)? {
                PromptOutcome::TaskEdited(id) => println!("edited task {}", render::short_id(id)),
                _ => println!("task unchanged"),
            }
        }
        TaskCommands::Archive { id } => {
            let id = dashboard.tasks().collection().resolve_id(&id)?;
            dashboard.tasks_mut().archive(id)?;
            println!("archived task {}", render::short_id(id));
        }
    }
    Ok(())
}

fn run_budget(dashboard: &mut Board<'_, '_>, cmd: BudgetCommands) -> Result<()> {
    match cmd {
        BudgetCommands::Add {
            description,
            amount,
            kind,
        } => {
            let id = dashboard
                .budget_mut()
                .add(description, amount, kind)
                .map_err(|err| match err.validation() {
                    Some(_) => anyhow::Error::new(Notice(INVALID_ENTRY_NOTICE.to_string())),
                    None => anyhow::Error::new(err),
                })?;
            println!("added {kind} {}", render::short_id(id));
        }
        BudgetCommands::List => {
            let budget = dashboard.budget();
            print!("{}", render::budget(budget.entries(), &budget.totals()));
        }
        BudgetCommands::Remove { id } => {
            let id = dashboard.budget().collection().resolve_id(&id)?;
            let entry = dashboard.budget_mut().remove(id)?;
            println!("removed {}", entry.description);
        }
    }
    Ok(())
}

fn run_health(dashboard: &mut Board<'_, '_>, cmd: HealthCommands) -> Result<()> {
    match cmd {
        HealthCommands::Save(args) => {
            let saved =
                dashboard
                    .health_mut()
                    .save_from_input(&args.steps, &args.water, &args.sleep)?;
            print!("{}", render::health(&saved));
        }
        HealthCommands::Show => print!("{}", render::health(&dashboard.health().current())),
    }
    Ok(())
}

fn run_grocery(dashboard: &mut Board<'_, '_>, cmd: GroceryCommands) -> Result<()> {
    match cmd {
        GroceryCommands::Add { name } => {
            let id = dashboard.grocery_mut().add(name)?;
            println!("added item {}", render::short_id(id));
        }
        GroceryCommands::List => print!("{}", render::grocery(dashboard.grocery().items())),
        GroceryCommands::Toggle { id } => {
            let id = dashboard.grocery().collection().resolve_id(&id)?;
            let acquired = dashboard.grocery_mut().toggle_acquired(id)?;
            let state = if acquired { "acquired" } else { "needed" };
            println!("item {} is {state}", render::short_id(id));
        }
        GroceryCommands::Remove { id } => {
            let id = dashboard.grocery().collection().resolve_id(&id)?;
            let item = dashboard.grocery_mut().remove(id)?;
            println!("removed {}", item.name);
        }
    }
    Ok(())
}

fn run_subscription(dashboard: &mut Board<'_, '_>, cmd: SubscriptionCommands) -> Result<()> {
    match cmd {
        SubscriptionCommands::Add { name, amount } => {
            let id = dashboard.subscriptions_mut().add(name, amount)?;
            println!("added subscription {}", render::short_id(id));
        }
        SubscriptionCommands::List => {
            let subscriptions = dashboard.subscriptions();
            print!(
                "{}",
                render::subscriptions(subscriptions.items(), subscriptions.monthly_total())
            );
        }
        SubscriptionCommands::Remove { id } => {
            let id = dashboard.subscriptions().collection().resolve_id(&id)?;
            let subscription = dashboard.subscriptions_mut().remove(id)?;
            println!("removed {}", subscription.name);
        }
    }
    Ok(())
}

fn run_plant(dashboard: &mut Board<'_, '_>, cmd: PlantCommands) -> Result<()> {
    let today = today();
    match cmd {
        PlantCommands::Add { name, date } => {
            let date = date.unwrap_or_else(|| today.format("%Y-%m-%d").to_string());
            let id = dashboard.plants_mut().add(name, date)?;
            println!("added plant {}", render::short_id(id));
        }
        PlantCommands::List { due } => {
            let plants = dashboard.plants();
            let rows: Vec<_> = match due {
                Some(days) => plants.due_for_water(today, days).collect(),
                None => plants.items().iter().collect(),
            };
            print!("{}", render::plants(&rows, today));
        }
        PlantCommands::Water { id } => {
            let id = dashboard.plants().collection().resolve_id(&id)?;
            dashboard.plants_mut().mark_watered(id, today)?;
            println!("watered plant {} on {today}", render::short_id(id));
        }
        PlantCommands::Remove { id } => {
            let id = dashboard.plants().collection().resolve_id(&id)?;
            let plant = dashboard.plants_mut().remove(id)?;
            println!("removed {}", plant.name);
        }
    }
    Ok(())
}

fn run_lending(dashboard: &mut Board<'_, '_>, cmd: LendingCommands) -> Result<()> {
    match cmd {
        LendingCommands::Add { name, person, kind } => {
            let id = dashboard.lending_mut().add(name, person, kind)?;
            println!("added {kind} item {}", render::short_id(id));
        }
        LendingCommands::List => print!("{}", render::lending(dashboard.lending().items())),
        LendingCommands::Remove { id } => {
            let id = dashboard.lending().collection().resolve_id(&id)?;
            let item = dashboard.lending_mut().remove(id)?;
            println!("removed {}", item.name);
        }
    }
    Ok(())
}

fn run_timer(
    dashboard: &mut Board<'_, '_>,
    interval: Duration,
    max_ticks: Option<u64>,
) -> Result<()> {
    let timer = dashboard.timer_mut();
    timer.start();
    println!("{}  {}", timer.label(), timer.display());

    let mut ticks = 0u64;
    while max_ticks.map_or(true, |max| ticks < max) {
        thread::sleep(interval);
        ticks += 1;
        let event = timer.tick();
        if event.is_some() {
            // Finish the in-place clock line before the log line.
            println!();
        }
        match event {
            Some(TimerEvent::WorkSessionCompleted { .. }) | Some(TimerEvent::BreakEnded) => {
                if let Some(line) = timer.session_log() {
                    println!("{line}");
                }
            }
            None => {}
        }
        print!("\r{}  {}", timer.label(), timer.display());
        io::stdout().flush()?;
    }
    println!();
    println!(
        "stopped after {ticks} ticks, sessions done: {}",
        timer.sessions_completed()
    );
    Ok(())
}

fn run_clear_all(dashboard: &mut Board<'_, '_>, yes: bool) -> Result<()> {
    let prompt = dashboard.request_clear_all().clone();
    let response = if yes {
        PromptResponse::Confirm
    } else {
        ask(&prompt)?
    };
    match dashboard.resolve_prompt(response)? {
        PromptOutcome::DataCleared => println!("all data cleared"),
        _ => println!("nothing was deleted"),
    }
    Ok(())
}

/// Shows `prompt` on stdout and reads one answer line from stdin.
///
/// EOF cancels. A confirmation accepts `y` or `yes`.
fn ask(prompt: &PendingPrompt) -> Result<PromptResponse> {
    let mut stdout = io::stdout();
    match prompt {
        PendingPrompt::EditTask { current_text, .. } => {
            write!(stdout, "{} [{current_text}] ", prompt.message())?
        }
        PendingPrompt::ConfirmClearAll => write!(stdout, "{} [y/N] ", prompt.message())?,
    }
    stdout.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(PromptResponse::Cancel);
    }
    Ok(answer_for(prompt, line.trim_end_matches(['\r', '\n'])))
}

fn answer_for(prompt: &PendingPrompt, line: &str) -> PromptResponse {
    match prompt {
        PendingPrompt::EditTask { .. } => PromptResponse::Text(line.to_string()),
        PendingPrompt::ConfirmClearAll => {
            if matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
                PromptResponse::Confirm
            } else {
                PromptResponse::Cancel
            }
        }
    }
}

fn user_notice(err: &anyhow::Error) -> Option<String> {
    if let Some(notice) = err.downcast_ref::<Notice>() {
        return Some(notice.to_string());
    }
    let manager = match err.downcast_ref::<DashboardError>() {
        Some(DashboardError::Manager(inner)) => Some(inner),
        _ => err.downcast_ref::<ManagerError>(),
    }?;
    manager.validation().map(|validation| validation.notice())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}
