//! angpop: populate a test floor
//!
//! Builds an open floor, runs the population engine against the sample
//! bestiary and prints what ended up on it.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use ang_core::dungeon::{Floor, Grid, Pos, QuestLog, RoomShape};
use ang_core::monster::{PlaceFlags, Spawner};
use ang_core::rng::GameRng;
use ang_core::world::GenerationConfig;

/// Populate a test floor and report what the engine placed
#[derive(Parser, Debug)]
#[command(name = "angpop")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RNG seed (random when omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Dungeon level; 0 is the town
    #[arg(short = 'd', long = "depth", default_value_t = 10)]
    depth: i32,

    /// Number of alloc_monster calls
    #[arg(short = 'n', long = "count", default_value_t = 20)]
    count: u32,

    /// Game turn, drives the out-of-depth curves
    #[arg(short = 't', long = "turn", default_value_t = 0)]
    turn: u64,

    /// Minimum distance from the player
    #[arg(long = "distance", default_value_t = 10)]
    distance: i32,

    /// Floor height
    #[arg(long = "height", default_value_t = 22)]
    height: i32,

    /// Floor width
    #[arg(long = "width", default_value_t = 80)]
    width: i32,

    /// JSON generation config
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Nightmare difficulty
    #[arg(long = "nightmare")]
    nightmare: bool,

    /// Build a nest in the middle of the floor first
    #[arg(long = "nest")]
    nest: bool,

    /// Print the effective config and exit
    #[arg(long = "dump-config")]
    dump_config: bool,

    /// Debug logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let mut races = ang_data::catalog();
    let mut config = match &args.config {
        Some(path) => GenerationConfig::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GenerationConfig::default(),
    };
    fill_special_races(&mut config, &races);

    if args.dump_config {
        println!("{}", config.to_config_string());
        return Ok(());
    }

    anyhow::ensure!(
        args.height >= 7 && args.width >= 21,
        "floor must be at least 7x21, got {}x{}",
        args.height,
        args.width
    );

    let mut floor = Floor::new(Grid::open(args.height, args.width), args.depth);
    floor.dungeon = ang_data::angband();
    floor.turn = args.turn;
    floor.mode.nightmare = args.nightmare;
    floor.player.pos = Pos::new(args.height / 2, 2);
    floor.player.level = args.depth.clamp(1, 50);
    let quests = QuestLog::new();
    let mut rng = args.seed.map_or_else(GameRng::from_entropy, GameRng::new);

    info!(
        seed = rng.seed(),
        depth = args.depth,
        count = args.count,
        nightmare = args.nightmare,
        "populating floor"
    );

    let mut failures: BTreeMap<String, u32> = BTreeMap::new();
    {
        let mut spawner = Spawner::new(&mut floor, &mut races, &quests, &config, &mut rng);

        if args.nest {
            let center = Pos::new(args.height / 2, args.width / 2);
            match spawner.build_nest(RoomShape::nest(center)) {
                Ok(report) => println!(
                    "nest: {} theme, {} placed from {} roster slots",
                    report.theme,
                    report.placed.len(),
                    report.roster.len()
                ),
                Err(e) => println!("nest: {e}"),
            }
        }

        for i in 0..args.count {
            match spawner.alloc_monster(args.distance, PlaceFlags::ALLOW_SLEEP) {
                Ok(id) => debug!(call = i, id = id.0, "allocated"),
                Err(e) => *failures.entry(e.to_string()).or_default() += 1,
            }
        }
    }
    floor.generated = true;

    print_summary(&floor, &races, &failures);
    Ok(())
}

/// Special races left unset in the config come from the catalog
fn fill_special_races(config: &mut GenerationConfig, races: &ang_core::monster::RaceCatalog) {
    let known = ang_data::special_races(races);
    let special = &mut config.special;
    special.shadow = special.shadow.or(known.shadow);
    special.jural = special.jural.or(known.jural);
    special.wounded = special.wounded.or(known.wounded);
    special.horde_excluded = special.horde_excluded.or(known.horde_excluded);
}

fn print_summary(
    floor: &Floor,
    races: &ang_core::monster::RaceCatalog,
    failures: &BTreeMap<String, u32>,
) {
    let mut by_race: BTreeMap<&str, u32> = BTreeMap::new();
    let mut asleep = 0;
    let mut disguised = 0;
    for monster in floor.monsters.iter() {
        let name = races
            .get_race(monster.identity.counted_race())
            .map_or("?", |r| r.name);
        *by_race.entry(name).or_default() += 1;
        if monster.is_asleep() {
            asleep += 1;
        }
        if monster.identity.is_disguised() {
            disguised += 1;
        }
    }

    println!(
        "{} monsters on level {} ({} asleep, {} disguised, {} breeders)",
        floor.monsters.len(),
        floor.depth,
        asleep,
        disguised,
        floor.num_repro
    );
    for (name, count) in &by_race {
        println!("  {count:>4}  {name}");
    }
    if !failures.is_empty() {
        println!("failed calls:");
        for (reason, count) in failures {
            println!("  {count:>4}  {reason}");
        }
    }
    for notice in &floor.notices {
        println!("notice: {notice:?}");
    }
}
