//! Flocking CLI - Run the simulation headless from JSON configuration.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use flocksim::{Simulation, SimulationConfig};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [ticks]", args[0]);
        eprintln!();
        eprintln!("Run the evolving boids simulation headless.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to simulation configuration file");
        eprintln!("  ticks        Number of ticks to run (default: 1000)");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let ticks: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1000);

    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let config: SimulationConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    println!("Evolving Boids Simulation");
    println!("=========================");
    println!("Canvas: {}x{}", config.width, config.height);
    println!("Boids: {}", config.num_boids);
    println!("Obstacles: {}", config.num_obstacles);
    println!("Evolution interval: {} ticks", config.evolution.interval);
    println!("Ticks: {}", ticks);
    println!();

    let mut sim = Simulation::new(config).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    });

    println!("Running simulation...");
    let start = Instant::now();

    for _ in 0..ticks {
        let outcome = sim.tick();
        if let (Some(metrics), Some(generation)) = (outcome.metrics, outcome.generation) {
            println!(
                "  tick {}: generation {}, best fitness {:.4}, avg cohesion {:.6}, alignment dev {:.4}",
                outcome.tick,
                generation.generation_count,
                generation.best_fitness,
                metrics.average_flock_cohesion * 0.001,
                metrics.alignment_angle_deviation,
            );
        }
    }

    let elapsed = start.elapsed();
    let snapshot = sim.snapshot();

    println!();
    println!("Final state:");
    println!("  Ticks: {}", snapshot.tick);
    if let Some(record) = snapshot.last_generation {
        println!("  Generation count: {}", record.generation_count);
        println!("  Best fitness: {:.4}", record.best_fitness);
    }
    match sim.navigation_time() {
        Some(nav_ticks) => println!("  Navigation time: {} ticks", nav_ticks),
        None => println!("  Navigation time: N/A"),
    }
    println!(
        "Time: {:.2}s ({:.1} ticks/s)",
        elapsed.as_secs_f32(),
        ticks as f32 / elapsed.as_secs_f32()
    );
}

fn print_example_config() {
    let config = SimulationConfig::default();
    println!("Example configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&config).unwrap());
}
