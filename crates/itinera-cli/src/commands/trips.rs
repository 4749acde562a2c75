use super::{prompt, require_user};
use crate::render;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use itinera_application::AppContext;
use itinera_core::ItineraError;
use itinera_core::validation::TripPreferences;

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[arg(long)]
    pub destination: String,
    /// What you enjoy, e.g. "food, museums, hiking"
    #[arg(long)]
    pub interests: String,
    /// ISO code such as USD or EUR
    #[arg(long, default_value = "USD")]
    pub currency: String,
    /// Total budget for the trip
    #[arg(long)]
    pub budget: f64,
    /// Trip length in days
    #[arg(long)]
    pub days: i64,
    /// Show the itinerary without saving it to your history
    #[arg(long)]
    pub no_save: bool,
}

pub async fn plan(app: &AppContext, args: PlanArgs) -> Result<()> {
    let preferences = TripPreferences {
        destination: args.destination,
        interests: args.interests,
        currency: args.currency,
        budget_amount: args.budget,
        duration: args.days,
    };

    println!("{}", "Planning your trip...".bright_black());
    let planned = app.planner.plan_trip(&preferences, !args.no_save).await?;
    println!();
    render::print_itinerary(&planned.content);

    match planned.saved {
        Some(record) => println!("\n{} {}", "Saved as".green(), record.id.bold()),
        None if !args.no_save && app.accounts.current_user().is_none() => println!(
            "\n{}",
            "Not saved: sign in to keep itineraries in your history.".bright_black()
        ),
        None => {}
    }
    Ok(())
}

pub async fn refine(app: &AppContext, id: &str, feedback: &str, save: bool) -> Result<()> {
    require_user(app)?;
    let record = app
        .planner
        .find(id)
        .ok_or_else(|| ItineraError::itinerary_not_found(id))?;

    println!("{}", "Refining your itinerary...".bright_black());
    let refined = app.planner.refine(&record.content, feedback).await?;
    println!();
    render::print_itinerary(&refined);

    if save {
        match app.planner.save_refinement(&record, &refined)? {
            Some(saved) => println!("\n{} {}", "Saved as".green(), saved.id.bold()),
            None => println!("\n{}", "Nothing new to save.".yellow()),
        }
    } else {
        println!(
            "\n{}",
            "Not saved. Run again with --save to keep this version.".bright_black()
        );
    }
    Ok(())
}

pub async fn suggest(app: &AppContext, query: &str, existing: Option<&str>) -> Result<()> {
    let suggestions = app.planner.suggest_interests(query, existing).await?;
    if suggestions.is_empty() {
        println!("{}", "No suggestions.".bright_black());
    }
    for suggestion in suggestions {
        println!("{} {}", "+".green(), suggestion);
    }
    Ok(())
}

pub fn list(app: &AppContext) -> Result<()> {
    require_user(app)?;
    let history = app.planner.list_history();
    if history.is_empty() {
        println!("{}", "No saved itineraries yet. Try `itinera plan`.".bright_black());
    }
    for record in &history {
        println!("{}", render::format_summary(record));
    }
    Ok(())
}

pub fn show(app: &AppContext, id: &str, raw: bool) -> Result<()> {
    require_user(app)?;
    let record = app
        .planner
        .find(id)
        .ok_or_else(|| ItineraError::itinerary_not_found(id))?;

    if raw {
        println!("{}", record.content);
        return Ok(());
    }

    println!("{}\n", render::format_summary(&record));
    if let Some(interests) = &record.interests {
        println!("{} {}\n", "Interests:".bright_black(), interests);
    }
    render::print_itinerary(&record.content);
    Ok(())
}

pub fn delete(app: &AppContext, id: &str) -> Result<()> {
    require_user(app)?;
    app.planner.delete(id)?;
    println!("{} {}", "Deleted".green(), id);
    Ok(())
}

pub fn clear(app: &AppContext, yes: bool) -> Result<()> {
    require_user(app)?;
    if !yes {
        let answer = prompt("Delete all saved itineraries and chats? [y/N] ")?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            println!("{}", "Cancelled.".bright_black());
            return Ok(());
        }
    }
    app.planner.clear_history()?;
    println!("{}", "History cleared.".green());
    Ok(())
}
