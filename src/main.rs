use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use gusto_engine::{CatalogColumns, CatalogStore, Recommender, SvdConfig, DEFAULT_TOP_N};
use gusto_ingest::read_table;
use gusto_schema::FeatureSchema;

/// A dish recommendation engine over category preferences
#[derive(Parser, Debug)]
#[command(name = "gusto")]
#[command(about = "Recommend dishes from category preferences", long_about = None)]
#[command(group(
    ArgGroup::new("query")
        .required(true)
        .args(["person", "prefs"]),
))]
struct Args {
    /// Dish catalog CSV
    #[arg(long, default_value = "./data/gastronomia.csv")]
    dishes: PathBuf,

    /// Restaurant directory CSV
    #[arg(long, default_value = "./data/restaurantes.csv")]
    restaurants: PathBuf,

    /// Person profiles CSV
    #[arg(long, default_value = "./data/personas.csv")]
    people: PathBuf,

    /// Schema JSON file; defaults to the dish table's category_* columns
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Recommend for a stored person id
    #[arg(long)]
    person: Option<String>,

    /// Ad hoc preference as CATEGORY=VALUE with VALUE in [0,1]; repeatable.
    /// Categories left unset default to 0.5
    #[arg(long = "pref", value_name = "CATEGORY=VALUE")]
    prefs: Vec<String>,

    /// Number of recommendations
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top_n: usize,

    /// Embedding dimensionality
    #[arg(long, default_value_t = 3)]
    components: usize,

    /// Seed for the reduction solver
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Print the ranked list as JSON
    #[arg(long)]
    json: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting gusto v{}", env!("CARGO_PKG_VERSION"));
    info!("Dish catalog: {:?}", args.dishes);

    let dishes = read_table(&args.dishes)?;
    let restaurants = read_table(&args.restaurants)?;
    let people = read_table(&args.people)?;

    let schema = match &args.schema {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            let mut schema: FeatureSchema = serde_json::from_str(&raw)?;
            schema.validate_and_normalize()?;
            schema
        }
        None => FeatureSchema::from_table(&dishes)?,
    };
    info!("Schema: {} categories", schema.len());

    let catalog = CatalogStore::load(
        &schema,
        &CatalogColumns::default(),
        &dishes,
        &restaurants,
        &people,
    )?;

    let config = SvdConfig {
        n_components: args.components,
        seed: args.seed,
        ..SvdConfig::default()
    };
    let engine = Recommender::new(catalog, &config)?;

    let results = match &args.person {
        Some(person) => engine.recommend_for_person(person, args.top_n)?,
        None => {
            let features =
                preference_vector(&schema, engine.catalog().feature_columns(), &args.prefs)?;
            engine.recommend(&features, args.top_n)?
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("{:<4} {:<36} {:<28} {:>10}", "#", "Dish", "Restaurant", "Similarity");
        for (i, pick) in results.iter().enumerate() {
            println!(
                "{:<4} {:<36} {:<28} {:>10.4}",
                i + 1,
                pick.dish_name,
                pick.restaurant_name.as_deref().unwrap_or("-"),
                pick.similarity
            );
        }
    }

    Ok(())
}

/// Build the canonical feature vector from `CATEGORY=VALUE` pairs.
///
/// Names resolve through the schema, so display labels work too. Unset
/// categories keep the neutral 0.5 default and values clamp into [0,1].
fn preference_vector(
    schema: &FeatureSchema,
    feature_columns: &[String],
    prefs: &[String],
) -> anyhow::Result<Vec<f32>> {
    let mut features = vec![0.5f32; feature_columns.len()];
    for pref in prefs {
        let (name, value) = pref.split_once('=').ok_or_else(|| {
            anyhow::anyhow!("Invalid preference '{pref}', expected CATEGORY=VALUE")
        })?;
        let canonical = schema.canonicalize(name)?;
        let index = feature_columns
            .iter()
            .position(|c| *c == canonical)
            .ok_or_else(|| anyhow::anyhow!("Category '{name}' is not in the dish catalog"))?;
        let value: f32 = value.trim().parse()?;
        features[index] = value.clamp(0.0, 1.0);
    }
    Ok(features)
}
