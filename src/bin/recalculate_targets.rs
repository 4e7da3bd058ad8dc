//! Recompute daily targets from the stored profile
//! Usage: cargo run --bin recalculate_targets

use macromate::config::database_path;
use macromate::db::Database;
use macromate::tools::profile;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let db_path = database_path();
    println!("Database: {}", db_path.display());

    let database = Database::new(&db_path)?;
    database.with_conn(macromate::db::migrations::run_migrations)?;

    let result = profile::recalculate_targets(&database)?;

    println!("              old    new");
    println!("Calories:  {:>6} {:>6}", result.previous.calories, result.targets.calories);
    println!("Protein:   {:>6} {:>6}", result.previous.protein, result.targets.protein);
    println!("Carbs:     {:>6} {:>6}", result.previous.carbs, result.targets.carbs);
    println!("Fat:       {:>6} {:>6}", result.previous.fat, result.targets.fat);

    Ok(())
}
