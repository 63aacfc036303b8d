use anyhow::{bail, Context, Result};
use arena::{battle, Character, RandomSource, SeededSource, ThreadRngSource};
use catalog::connection::{connect, run_migrations};
use catalog::repository::MealRepository;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::settings::ArenaParams;
use core_types::{BattleOutcome, Difficulty, LeaderboardSort, Meal};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the Skillet meal arena application.
#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load environment variables from the .env file, if present.
    dotenvy::dotenv().ok();

    let config = configuration::load_config().context("Failed to load config.toml")?;

    // Initialize the database connection and run migrations
    let db_pool = connect(&config.database)
        .await
        .context("Failed to open the meal database")?;
    run_migrations(&db_pool)
        .await
        .context("Failed to run database migrations")?;
    let repository = MealRepository::new(db_pool);

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Add(args) => handle_add(args, &repository).await?,
        Commands::Delete(args) => handle_delete(args, &repository).await?,
        Commands::Get(args) => handle_get(args, &repository).await?,
        Commands::Leaderboard(args) => handle_leaderboard(args, &repository).await?,
        Commands::Record(args) => handle_record(args, &repository).await?,
        Commands::Battle(args) => handle_battle(args, &repository, &config.arena).await?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A meal catalog with a battle arena: meals fight, the catalog keeps score.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new meal to the catalog.
    Add(AddArgs),
    /// Soft-delete a meal by its ID.
    Delete(DeleteArgs),
    /// Fetch a single meal by ID or by name.
    Get(GetArgs),
    /// Show the battle leaderboard.
    Leaderboard(LeaderboardArgs),
    /// Record a battle result for a single meal.
    Record(RecordArgs),
    /// Pit two meals against each other and record the outcome.
    Battle(BattleArgs),
}

#[derive(Parser)]
struct AddArgs {
    /// The meal's name (unique within the catalog).
    #[arg(long)]
    name: String,

    /// The cuisine label (e.g., "Italian").
    #[arg(long)]
    cuisine: String,

    /// The price of the meal; must be a positive number.
    #[arg(long)]
    price: f64,

    /// The preparation difficulty: LOW, MED, or HIGH.
    #[arg(long)]
    difficulty: String,
}

#[derive(Parser)]
struct DeleteArgs {
    /// The ID of the meal to delete.
    #[arg(long)]
    id: i64,
}

#[derive(Parser)]
struct GetArgs {
    /// Look the meal up by ID.
    #[arg(long)]
    id: Option<i64>,

    /// Look the meal up by name.
    #[arg(long)]
    name: Option<String>,

    /// Print the meal as JSON instead of a summary line.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct LeaderboardArgs {
    /// The ranking key: "wins" or "win_pct".
    #[arg(long, default_value = "wins")]
    sort: String,

    /// Print the leaderboard as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct RecordArgs {
    /// The ID of the meal whose stats to update.
    #[arg(long)]
    id: i64,

    /// The battle result: "win" or "loss".
    #[arg(long)]
    result: String,
}

#[derive(Parser)]
struct BattleArgs {
    /// The name of the first meal.
    first: String,

    /// The name of the second meal.
    second: String,

    /// Seed for a reproducible battle; omitted means a random fight.
    #[arg(long)]
    seed: Option<u64>,
}

// ==============================================================================
// Command Handlers
// ==============================================================================

async fn handle_add(args: AddArgs, repository: &MealRepository) -> Result<()> {
    let difficulty: Difficulty = args.difficulty.parse()?;
    repository
        .create_meal(&args.name, &args.cuisine, args.price, difficulty)
        .await?;
    println!("Added '{}' to the catalog.", args.name);
    Ok(())
}

async fn handle_delete(args: DeleteArgs, repository: &MealRepository) -> Result<()> {
    repository.delete_meal(args.id).await?;
    println!("Meal {} is off the menu.", args.id);
    Ok(())
}

async fn handle_get(args: GetArgs, repository: &MealRepository) -> Result<()> {
    let meal = match (args.id, &args.name) {
        (Some(id), None) => repository.get_meal_by_id(id).await?,
        (None, Some(name)) => repository.get_meal_by_name(name).await?,
        _ => bail!("provide exactly one of --id or --name"),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&meal)?);
    } else {
        println!(
            "#{} {} ({}) | price {:.2} | difficulty {} | battles {} | wins {}",
            meal.id, meal.name, meal.cuisine, meal.price, meal.difficulty, meal.battles, meal.wins
        );
    }
    Ok(())
}

async fn handle_leaderboard(args: LeaderboardArgs, repository: &MealRepository) -> Result<()> {
    let sort: LeaderboardSort = args.sort.parse()?;
    let entries = repository.leaderboard(sort).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Rank", "Meal", "Cuisine", "Price", "Difficulty", "Battles", "Wins", "Win %",
    ]);
    for (rank, entry) in entries.iter().enumerate() {
        table.add_row(vec![
            (rank + 1).to_string(),
            entry.name.clone(),
            entry.cuisine.clone(),
            format!("{:.2}", entry.price),
            entry.difficulty.to_string(),
            entry.battles.to_string(),
            entry.wins.to_string(),
            format!("{:.1}", entry.win_pct),
        ]);
    }
    println!("{table}");
    Ok(())
}

async fn handle_record(args: RecordArgs, repository: &MealRepository) -> Result<()> {
    let outcome: BattleOutcome = args.result.parse()?;
    repository.update_meal_stats(args.id, outcome).await?;
    println!("Recorded a {} for meal {}.", outcome, args.id);
    Ok(())
}

// ==============================================================================
// Battle Orchestration
// ==============================================================================

/// Looks both meals up, fights them in the arena, and writes the result back
/// to the catalog.
async fn handle_battle(
    args: BattleArgs,
    repository: &MealRepository,
    params: &ArenaParams,
) -> Result<()> {
    if args.first == args.second {
        bail!("a meal cannot battle itself");
    }

    let meal_a = repository.get_meal_by_name(&args.first).await?;
    let meal_b = repository.get_meal_by_name(&args.second).await?;

    let mut fighter_a = combatant(&meal_a, params);
    let mut fighter_b = combatant(&meal_b, params);

    let mut source: Box<dyn RandomSource> = match args.seed {
        Some(seed) => Box::new(SeededSource::new(seed)),
        None => Box::new(ThreadRngSource::default()),
    };
    let winner = battle(&mut fighter_a, &mut fighter_b, source.as_mut());

    let (winner_meal, loser_meal) = if winner == meal_a.name {
        (&meal_a, &meal_b)
    } else {
        (&meal_b, &meal_a)
    };
    repository
        .update_meal_stats(winner_meal.id, BattleOutcome::Win)
        .await?;
    repository
        .update_meal_stats(loser_meal.id, BattleOutcome::Loss)
        .await?;

    println!("{} defeats {}!", winner_meal.name, loser_meal.name);
    Ok(())
}

/// Fits a catalog meal out as an arena combatant. Pricier meals are beefier;
/// harder meals hit harder.
fn combatant(meal: &Meal, params: &ArenaParams) -> Character {
    let health = params.base_health + meal.price as i64 * params.health_per_price;
    let attack = match meal.difficulty {
        Difficulty::Low => params.attack_low,
        Difficulty::Med => params.attack_med,
        Difficulty::High => params.attack_high,
    };
    let defense = (meal.price as i64 / params.defense_divisor).max(1);
    Character::new(meal.name.clone(), health, attack, defense)
}
