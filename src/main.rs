//! Ecosim - Entry Point
//!
//! Builds an ecosystem from CLI flags and an optional TOML config, seeds the
//! default roster, then either runs a fixed number of ticks headless or
//! drops into an interactive command loop.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ecosim::core::config::SimulationConfig;
use ecosim::core::error::{EcoError, Result};
use ecosim::entity::species::Species;
use ecosim::rules::loader::load_rule_patch;
use ecosim::rules::ruleset::{Mode, RuleKey};
use ecosim::simulation::ecosystem::Ecosystem;
use ecosim::simulation::stats::{AgentSortKey, SortOrder};

/// Ecosim - herbivores, carnivores and omnivores on a shared plane
#[derive(Parser, Debug)]
#[command(name = "ecosim")]
#[command(about = "Run a discrete-time ecosystem simulation")]
struct Args {
    /// Rule preset: basic or advanced
    #[arg(long)]
    mode: Option<Mode>,

    /// Plane width (overrides the config file)
    #[arg(long)]
    width: Option<f64>,

    /// Plane height (overrides the config file)
    #[arg(long)]
    height: Option<f64>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// TOML config file with plane size, mode, seed and [rules] overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run this many ticks without the interactive loop
    #[arg(long)]
    ticks: Option<u64>,

    /// Print final statistics as JSON (headless runs only)
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ecosim=info")),
        )
        .init();

    let config = build_config(&args)?;
    let mut ecosystem = Ecosystem::from_config(&config)?;
    ecosystem.populate_default();
    tracing::info!(
        mode = %ecosystem.mode(),
        width = config.width,
        height = config.height,
        seed = ?config.seed,
        "ecosim starting"
    );

    match args.ticks {
        Some(ticks) => run_headless(&mut ecosystem, ticks, args.json),
        None => run_interactive(&mut ecosystem),
    }
}

/// Config file first, then CLI flags on top
fn build_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_toml_file(path)?,
        None => SimulationConfig::new(),
    };
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;
    Ok(config)
}

fn run_headless(ecosystem: &mut Ecosystem, ticks: u64, json: bool) -> Result<()> {
    for _ in 0..ticks {
        ecosystem.tick();
        if ecosystem.is_extinct() {
            tracing::info!(tick = ecosystem.time(), "population extinct, stopping");
            break;
        }
    }

    let stats = ecosystem.statistics();
    if json {
        println!("{}", stats.to_json()?);
    } else {
        println!("{}", stats.summary());
    }
    Ok(())
}

fn run_interactive(ecosystem: &mut Ecosystem) -> Result<()> {
    println!("\n=== ECOSIM ===");
    print_help();

    loop {
        println!("{}", ecosystem.statistics().summary());
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "q" {
            break;
        }

        if let Err(e) = handle_command(ecosystem, input) {
            println!("Error: {}", e);
        }
    }

    println!(
        "\nGoodbye! Final state: {} agents, {} ticks elapsed.",
        ecosystem.agents().len(),
        ecosystem.time()
    );
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  tick / t                 - Advance one tick");
    println!("  run <n>                  - Advance n ticks (stops on extinction)");
    println!("  add <species> <name>     - Add an animal (herbivore, carnivore, omnivore)");
    println!("  random                   - Add a random animal");
    println!("  food <n>                 - Force-spawn up to n food items");
    println!("  disaster                 - Trigger a disaster now");
    println!("  set <rule> <value>       - Change a rule (e.g. set foodSpawnRate 0.5)");
    println!("  load <file>              - Merge rule overrides from a TOML file");
    println!("  rules                    - Show current rules");
    println!("  stats / s                - Show statistics as JSON");
    println!("  list [key] [asc|desc]    - List animals sorted by name/species/energy/health/age");
    println!("  events                   - Show recent events");
    println!("  mode                     - Toggle basic/advanced and restart");
    println!("  help                     - Show this help");
    println!("  quit / q                 - Exit");
    println!();
}

fn handle_command(ecosystem: &mut Ecosystem, input: &str) -> Result<()> {
    let mut parts = input.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let rest: Vec<&str> = parts.collect();

    match (command, rest.as_slice()) {
        ("tick" | "t", []) => {
            let report = ecosystem.tick();
            println!(
                "Tick {}: {} births, {} deaths, {} kills",
                report.tick, report.births, report.deaths, report.kills
            );
        }
        ("run", [n]) => {
            let n: u64 = n
                .parse()
                .map_err(|_| EcoError::InvalidCommand(format!("not a tick count: {}", n)))?;
            let start = ecosystem.time();
            for _ in 0..n {
                ecosystem.tick();
                if ecosystem.is_extinct() {
                    println!("Population extinct.");
                    break;
                }
            }
            println!(
                "Completed {} ticks. Now at tick {}.",
                ecosystem.time() - start,
                ecosystem.time()
            );
        }
        ("add", [species, name]) => {
            let species: Species = species.parse()?;
            let id = ecosystem.add_agent(species, *name);
            println!("Added {} {} (ID: {})", species, name, id.0);
        }
        ("random", []) => {
            let id = ecosystem.add_random_agent();
            if let Some(agent) = ecosystem.agent(id) {
                println!("Added {} {} (ID: {})", agent.species, agent.name, id.0);
            }
        }
        ("food", [n]) => {
            let n: usize = n
                .parse()
                .map_err(|_| EcoError::InvalidCommand(format!("not a count: {}", n)))?;
            let spawned = ecosystem.add_food(n);
            println!("Spawned {} of {} food items.", spawned, n);
        }
        ("disaster", []) => {
            let disaster = ecosystem.force_disaster();
            println!("Disaster: {}", disaster);
        }
        ("set", [key, value]) => {
            let value = ecosystem.set_rule_from_input(key, value)?;
            println!("{} = {}", key, value);
        }
        ("load", [path]) => {
            let patch = load_rule_patch(Path::new(path))?;
            ecosystem.update_rules(&patch)?;
            println!("Merged {} rule(s) from {}.", patch.entries().len(), path);
        }
        ("rules", []) => {
            let rules = ecosystem.rules();
            for key in RuleKey::ALL {
                println!("  {:<22} {}", key.as_str(), rules.get(key));
            }
            println!("  {:<22} {}", "climate", rules.climate);
            println!("  {:<22} {}", "season", rules.season);
        }
        ("stats" | "s", []) => println!("{}", ecosystem.statistics().to_json()?),
        ("list", args) => {
            let key = match args.first() {
                Some(key) => key.parse()?,
                None => AgentSortKey::Name,
            };
            let order = match args.get(1) {
                Some(order) => order.parse()?,
                None => SortOrder::Ascending,
            };
            for agent in ecosystem.agent_list(key, order) {
                let s = agent.status();
                println!(
                    "  #{:<4} {:<16} {:<10} energy {:>3} health {:>3} age {:>3}",
                    s.id.0, s.name, s.species, s.energy, s.health, s.age
                );
            }
        }
        ("events", []) => {
            for event in ecosystem.events().iter() {
                println!("  [{}] {:?}", event.tick, event.kind);
            }
        }
        ("mode", []) => {
            let mode = ecosystem.mode().toggled();
            ecosystem.restart(mode);
            println!("Restarted in {} mode.", mode);
        }
        ("help" | "h", []) => print_help(),
        _ => {
            return Err(EcoError::InvalidCommand(format!(
                "unknown command '{}' (type help)",
                input
            )))
        }
    }
    Ok(())
}
