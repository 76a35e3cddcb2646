use anyhow::Result;
use clap::Parser;
use tracing::info;
use verdant_lib::model::config::{AppConfig, ScheduleMode};
use verdant_lib::model::world::World;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 1000)]
    ticks: u64,

    /// Override the configured seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the configured scheduling mode
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Log a population line every N ticks (0 disables)
    #[arg(long, default_value_t = 100)]
    stats_every: u64,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum ModeArg {
    Full,
    Static,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut config = AppConfig::load_path(&args.config)?;
    if let Some(seed) = args.seed {
        config.world.seed = seed;
    }
    if let Some(mode) = &args.mode {
        config.world.mode = match mode {
            ModeArg::Full => ScheduleMode::Full,
            ModeArg::Static => ScheduleMode::Static,
        };
    }

    let mut world = World::new(config)?;
    for _ in 0..args.ticks {
        world.tick();
        if args.stats_every > 0 && world.tick % args.stats_every == 0 {
            let stats = world.stats();
            info!(
                tick = stats.tick,
                rabbits = stats.rabbits,
                wolves = stats.wolves,
                grass = stats.grass + stats.arid_grass,
                trees = stats.oaks + stats.pines,
                "population"
            );
            if stats.animals() == 0 {
                info!("all animals gone, stopping early");
                break;
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&world.stats())?);
    Ok(())
}
