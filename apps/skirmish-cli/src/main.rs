use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use glam::Vec3;
use serde::Serialize;
use skirmish_common::Team;
use skirmish_input::{InputState, Key};
use skirmish_kernel::{Battle, BattleConfig, BattleEvent, Role};
use skirmish_render::{DebugTextRenderer, Projection, Renderer, ViewParams};
use skirmish_terrain::Terrain;
use skirmish_tools::BattleInspector;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skirmish-cli", about = "Headless skirmish runner")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and role table
    Info,
    /// Generate a scenario and describe it
    Scenario {
        /// Terrain seed
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Dump terrain and roster as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a scripted skirmish and report what happened
    Skirmish {
        /// Terrain seed
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Total ticks to simulate
        #[arg(short, long, default_value = "60")]
        ticks: u64,
        /// Comma-separated keys, each optionally repeated: `w*20,a*3,e,space`
        #[arg(long, default_value = "")]
        script: String,
        /// Print the final frame as text
        #[arg(long)]
        frame: bool,
    },
}

/// One script token: a key held (or pressed) for `repeat` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step {
    key: Key,
    repeat: u64,
}

fn parse_script(script: &str) -> anyhow::Result<Vec<Step>> {
    script
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| -> anyhow::Result<Step> {
            let (name, repeat) = match token.split_once('*') {
                Some((name, count)) => {
                    let repeat = count
                        .trim()
                        .parse::<u64>()
                        .with_context(|| format!("bad repeat count in {token:?}"))?;
                    (name.trim(), repeat)
                }
                None => (token, 1),
            };
            if repeat == 0 {
                bail!("repeat count must be positive in {token:?}");
            }
            Ok(Step {
                key: name.parse()?,
                repeat,
            })
        })
        .collect()
}

/// Drive `battle` through `script`, then idle until `ticks` have run.
///
/// Held keys stay down for their repeat count; action keys fire once per
/// repeat, one tick apart. Returns the number of ticks run.
fn run_script(battle: &mut Battle, script: &[Step], ticks: u64) -> u64 {
    let mut input = InputState::new();
    let mut ran = 0;
    'script: for step in script {
        for _ in 0..step.repeat {
            if ran == ticks {
                break 'script;
            }
            if let Some(action) = input.key(step.key, true) {
                battle.handle_action(action);
            }
            battle.tick(&input);
            input.end_tick();
            ran += 1;
        }
        input.key(step.key, false);
    }
    input.release_all();
    while ran < ticks {
        battle.tick(&input);
        input.end_tick();
        ran += 1;
    }
    ran
}

#[derive(Serialize)]
struct ScenarioDump<'a> {
    seed: Option<u64>,
    terrain: &'a Terrain,
    units: Vec<UnitDump>,
}

#[derive(Serialize)]
struct UnitDump {
    role: Role,
    team: Team,
    position: Vec3,
    facing: Vec3,
    hp: f32,
}

fn scenario_dump(battle: &Battle) -> ScenarioDump<'_> {
    ScenarioDump {
        seed: battle.seed(),
        terrain: battle.terrain(),
        units: battle
            .roster()
            .iter()
            .map(|u| UnitDump {
                role: u.role(),
                team: u.team(),
                position: u.position(),
                facing: u.facing(),
                hp: u.current_hp(),
            })
            .collect(),
    }
}

fn seeded(seed: u64) -> anyhow::Result<Battle> {
    Battle::new(&BattleConfig {
        seed: Some(seed),
        ..BattleConfig::default()
    })
    .context("failed to set up battle")
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("skirmish-cli v{}", env!("CARGO_PKG_VERSION"));
            for role in Role::ALL {
                let s = role.stats();
                println!(
                    "{role:<8} hp={:<4} move={:<4} range={:<4} damage={:<3} actions={}",
                    s.max_hp, s.max_movement, s.range, s.damage, s.max_actions
                );
            }
        }
        Commands::Scenario { seed, json } => {
            let battle = seeded(seed)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&scenario_dump(&battle))?);
                return Ok(());
            }
            let land = battle.terrain().land_size();
            println!("{}", BattleInspector::summary(&battle));
            println!("land: {:.2} x {:.2} x {:.2}", land.x, land.y, land.z);
            for plateau in battle.terrain().plateaus() {
                let p = plateau.position;
                println!(
                    "plateau at ({:.2}, {:.2}) top={:.2}",
                    p.x,
                    p.z,
                    plateau.top()
                );
            }
            for unit in BattleInspector::list_units(&battle) {
                println!("{unit}");
            }
        }
        Commands::Skirmish {
            seed,
            ticks,
            script,
            frame,
        } => {
            let steps = parse_script(&script)?;
            let mut battle = seeded(seed)?;
            println!("before: {}", BattleInspector::summary(&battle));

            let ran = run_script(&mut battle, &steps, ticks);
            tracing::info!(ran, steps = steps.len(), "script finished");

            let summary = BattleInspector::summary(&battle);
            let mut moves = 0usize;
            for event in battle.drain_events() {
                match event {
                    BattleEvent::Moved { .. } => moves += 1,
                    other => println!("  {other}"),
                }
            }
            println!("  ({moves} movement ticks)");
            println!("after: {summary}");
            for unit in BattleInspector::list_units(&battle) {
                println!("{unit}");
            }

            if frame {
                let view = ViewParams::from_battle(&battle, Projection::Perspective);
                print!("{}", DebugTextRenderer::new().render(&battle, &view));
            }
        }
    }

    Ok(())
}
