//! services/app/src/bin/daykeep.rs

use app_lib::{config::Config, error::AppError, state::AppState};
use chrono::Local;
use daykeep_core::streak;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Talking to {}", config.api_base_url);

    // --- 2. Build the Shared AppState ---
    let state = AppState::from_config(config)?;

    // --- 3. Pull Down Today's Picture ---
    state.habits.fetch_all().await;
    state.tasks.fetch_all().await;
    state.expenses.fetch_all().await;

    for store_error in [
        state.habits.error(),
        state.tasks.error(),
        state.expenses.error(),
    ]
    .into_iter()
    .flatten()
    {
        eprintln!("warning: {store_error}");
    }

    let today = Local::now().date_naive();
    println!("daykeep status for {today}");

    println!("\nHabits:");
    for habit in state.habits.habits() {
        let mark = if streak::is_completed_on(&habit, today) {
            "x"
        } else {
            " "
        };
        println!(
            "  [{mark}] {} ({}) current streak {}, longest {}",
            habit.name,
            habit.frequency,
            streak::current_streak(&habit, today),
            streak::longest_streak(&habit),
        );
    }

    println!("\nOpen tasks:");
    for task in state.tasks.tasks().iter().filter(|t| !t.is_completed) {
        match task.deadline {
            Some(deadline) => println!("  - {} (due {deadline})", task.title),
            None => println!("  - {}", task.title),
        }
    }

    if let Some(summary) = state.expenses.summary() {
        let currency = state.expenses.preferred_currency();
        println!("\nSpending by category:");
        for item in &summary.items {
            println!(
                "  {:<14} {}{:.2}",
                item.category,
                currency.symbol(),
                item.total_amount
            );
        }
        println!("  {:<14} {}{:.2}", "total", currency.symbol(), summary.grand_total);
    }

    Ok(())
}
