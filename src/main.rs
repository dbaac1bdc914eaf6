use vsim::{Scenario, ScenarioConfig};
use vsim::run_2d;
use vsim::{bench_collisions, bench_step};

use clap::Parser;
use anyhow::Result;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, default_value = "disc.yaml")]
    file_name: String,

    /// Run the timing harness instead of the viewer
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(file_name);
    let file = File::open(&config_path)?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        bench_collisions();
        bench_step();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let scenario = Scenario::build_scenario(scenario_cfg)?;
    run_2d(scenario);

    Ok(())
}
