use chrono::{Local, NaiveDate};
use clap::Subcommand;
use serde::Serialize;
use tomato_core::error::Result;
use tomato_core::DailyCounter;

use super::Context;

#[derive(Subcommand)]
pub enum CountAction {
    /// Print the count for a day (creates the journal if missing)
    Show {
        /// Day as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },
    /// Overwrite the count for a day
    Set {
        value: u32,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Add one completed session
    Add {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Serialize)]
struct CountReport {
    date: NaiveDate,
    path: String,
    count: u32,
}

pub fn run(ctx: &Context, action: CountAction) -> Result<()> {
    let counter = DailyCounter::new(ctx.store(), ctx.config.layout());
    let today = || Local::now().date_naive();

    match action {
        CountAction::Show { date, json } => {
            let date = date.unwrap_or_else(today);
            let count = counter.get(date)?;
            if json {
                let report = CountReport {
                    date,
                    path: counter.layout().day_path(date),
                    count,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{count}");
            }
        }
        CountAction::Set { value, date } => {
            let date = date.unwrap_or_else(today);
            counter.set(date, value)?;
            println!(
                "{}: {value}",
                ctx.vault().join(counter.layout().day_path(date)).display()
            );
        }
        CountAction::Add { date } => {
            let date = date.unwrap_or_else(today);
            println!("{}", counter.increment(date)?);
        }
    }
    Ok(())
}
