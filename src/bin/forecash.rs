use std::{path::PathBuf, process::ExitCode};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use forecash_core::{
    config::ConfigManager,
    core::{AccountManager, Action, Clock, FixedClock, SystemClock},
    init,
    storage::JsonStorage,
    Account, Event, Forecast, ForecastError, Frequency, Transaction,
};

#[derive(Parser, Debug)]
#[command(name = "forecash")]
#[command(about = "Forecast an account balance from one-off and recurring events")]
struct Args {
    /// Account snapshot to open (default: ~/.config/forecash/account.json)
    #[arg(short, long, global = true)]
    account: Option<PathBuf>,

    /// Project occurrences strictly before this date (default: today plus the configured horizon)
    #[arg(short, long, global = true)]
    until: Option<NaiveDate>,

    /// Date to treat as today
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the projected timeline
    Forecast,
    /// Mark a row paid and apply its amount to the balance
    Complete { row: usize },
    /// Drop a row without touching the balance
    Delete { row: usize },
    /// Move a one-off row by a number of days
    Shift {
        row: usize,
        #[arg(allow_negative_numbers = true)]
        days: i64,
    },
    /// Pay a row today
    Today { row: usize },
    /// Override the current balance
    Balance {
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
    },
    /// Add a one-off or recurring event
    Add {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        description: String,
        #[arg(long, allow_negative_numbers = true)]
        amount: Decimal,
        #[arg(long, default_value = "once")]
        frequency: Frequency,
    },
    /// Edit the event behind a row
    Edit {
        row: usize,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        amount: Option<Decimal>,
        #[arg(long)]
        frequency: Option<Frequency>,
    },
    /// Create an empty account file
    Init {
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        balance: Decimal,
    },
}

fn main() -> ExitCode {
    init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), ForecastError> {
    let settings = ConfigManager::new().load()?;
    let path = settings.resolve_account_path(args.account.as_deref());
    let clock: Box<dyn Clock> = match args.today {
        Some(date) => Box::new(FixedClock(date)),
        None => Box::new(SystemClock),
    };

    let command = args.command.unwrap_or(Command::Forecast);
    if let Command::Init { balance } = command {
        if path.exists() {
            return Err(ForecastError::Config(format!(
                "`{}` already exists",
                path.display()
            )));
        }
        let account = Account::new(balance);
        let mut manager = AccountManager::with_account(account, path, Box::new(JsonStorage), clock);
        manager.save()?;
        println!("Created {}", manager.path().display());
        return Ok(());
    }

    let mut manager = AccountManager::open(path, Box::new(JsonStorage), clock)?;
    let until = args
        .until
        .unwrap_or_else(|| manager.horizon(settings.horizon_months));

    let action = match command {
        Command::Forecast | Command::Init { .. } => None,
        Command::Complete { row } => Some(Action::Complete(select(&manager, until, row)?)),
        Command::Delete { row } => Some(Action::Delete(select(&manager, until, row)?)),
        Command::Shift { row, days } => Some(Action::ShiftDate {
            transaction: select(&manager, until, row)?,
            days,
        }),
        Command::Today { row } => Some(Action::PullForward(select(&manager, until, row)?)),
        Command::Balance { amount } => Some(Action::SetBalance(amount)),
        Command::Add {
            date,
            description,
            amount,
            frequency,
        } => Some(Action::AddEvent(Event::new(
            date,
            description,
            amount,
            frequency,
        ))),
        Command::Edit {
            row,
            date,
            description,
            amount,
            frequency,
        } => {
            let txn = select(&manager, until, row)?;
            let mut event = manager
                .account()
                .event(txn.event_id)
                .cloned()
                .ok_or(ForecastError::EventNotFound(txn.event_id))?;
            if let Some(date) = date {
                event.anchor_date = date;
            }
            if let Some(description) = description {
                event.description = description;
            }
            if let Some(amount) = amount {
                event.amount = amount;
            }
            if let Some(frequency) = frequency {
                event.frequency = frequency;
            }
            Some(Action::UpdateEvent {
                id: txn.event_id,
                event,
            })
        }
    };

    if let Some(action) = action {
        if manager.apply(action)? {
            manager.save()?;
        } else {
            println!("No change");
        }
    }

    print_forecast(&manager.forecast(until));
    Ok(())
}

fn select(
    manager: &AccountManager,
    until: NaiveDate,
    row: usize,
) -> Result<Transaction, ForecastError> {
    let transactions = manager.predict(until);
    row.checked_sub(1)
        .and_then(|index| transactions.get(index).copied())
        .ok_or_else(|| {
            ForecastError::Selection(format!(
                "row {row} is out of range (1-{})",
                transactions.len()
            ))
        })
}

fn money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

fn print_forecast(forecast: &Forecast) {
    println!(
        "Balance {} | forecast until {}",
        money(forecast.opening_balance),
        forecast.until
    );
    println!(
        "{:>4}  {:<10}  {:<28}  {:>12}  {:>12}",
        "#", "Date", "Description", "Amount", "Balance"
    );
    for (index, line) in forecast.lines.iter().enumerate() {
        println!(
            "{:>4}  {:<10}  {:<28}  {:>12}  {:>12}",
            index + 1,
            line.transaction.occurrence_date.to_string(),
            line.description,
            money(line.amount),
            money(line.balance)
        );
    }
    let totals = &forecast.totals;
    println!(
        "Income {} | Expenses {} | Net {} | Closing {}",
        money(totals.income),
        money(totals.expenses),
        money(totals.net),
        money(totals.closing_balance)
    );
    if let Some((date, balance)) = forecast.low_point() {
        println!("Lowest {} on {date}", money(balance));
    }
}
