// demos/basic_simulation.rs
//
// Usage: cargo run --example basic_simulation -- [particle file] [steps] [output file]
// Without a particle file, 1000 seeded random bodies are simulated.

use std::env;
use std::fs::File;
use std::io::BufWriter;

use log::info;
use rs_barnes_hut::simulation::{seeded_bodies, RandomBodiesConfig, Simulation};
use rs_barnes_hut::utils::{init_logger, BarnesHutError, SimulationConfig, TreeConfig};

fn main() -> Result<(), BarnesHutError> {
    init_logger();

    let args: Vec<String> = env::args().skip(1).collect();
    let steps = match args.get(1) {
        Some(s) => s
            .parse::<usize>()
            .map_err(|e| BarnesHutError::InvalidConfig(format!("steps '{}': {}", s, e)))?,
        None => 100,
    };
    let output = args.get(2).map(String::as_str).unwrap_or("simulation_output.txt");

    let tree_config = TreeConfig::default();
    let config = SimulationConfig::default();
    let mut sim = match args.first() {
        Some(path) => Simulation::from_file(path, tree_config, config)?,
        None => {
            let bodies = seeded_bodies(1000, &RandomBodiesConfig::default(), 42)?;
            Simulation::new(bodies, tree_config, config)?
        }
    };

    let initial_mass = sim.total_mass();
    let mut writer = BufWriter::new(File::create(output)?);
    sim.run(steps, &mut writer)?;

    info!("Wrote {} frames to {}", steps, output);
    info!("Total mass: {} (initially {})", sim.total_mass(), initial_mass);
    info!("Final tree: {} nodes, depth {}", sim.tree().node_count(), sim.tree().depth());
    Ok(())
}
