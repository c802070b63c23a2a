//! Ecosystem Simulation Benchmark
//!
//! Standalone headless run of the simulation engine.

use ecosystem::{SimulationWorld, WorldConfig};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Ecosystem simulation engine starting...");

    let config = WorldConfig::reference();
    let seed = 0xEC0;
    let mut sim = SimulationWorld::new(config, seed)?;

    let ticks = 5000u64;
    info!("Running {} tick benchmark...", ticks);
    let start = std::time::Instant::now();
    for tick in 0..ticks {
        let _ = sim.step();
        if tick % 1000 == 0 {
            let counts = sim.count_populations();
            info!(
                tick,
                prey = counts.prey,
                predators = counts.predators,
                avg_prey_speed = counts.avg_prey_speed,
                "population"
            );
        }
    }
    let elapsed = start.elapsed();

    let counts = sim.count_populations();
    info!(
        "Benchmark complete: {:?} total, {:?} per tick, {} prey / {} predators remaining",
        elapsed,
        elapsed / ticks as u32,
        counts.prey,
        counts.predators
    );

    Ok(())
}
