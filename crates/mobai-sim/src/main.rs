mod config;
mod scenario;

use config::ScenarioConfig;
use scenario::Scenario;
use tracing::info;

fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| "sim.toml".into());

    let config = match ScenarioConfig::load(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load {path}: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("mobai-sim v{} loading {}", env!("CARGO_PKG_VERSION"), path);

    let mut scenario = match Scenario::build(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to build scenario from {path}: {e}");
            std::process::exit(1);
        }
    };

    let summary = scenario.run();

    println!("{:>4}  {:<10} {:<7} position", "id", "kind", "state");
    for mob in &summary {
        println!(
            "{:>4}  {:<10} {:<7} ({:.2}, {:.2})",
            mob.id, mob.kind, mob.state.as_str(), mob.position.x, mob.position.y
        );
    }
    let player = scenario.world.player_position();
    println!("player at ({:.2}, {:.2})", player.x, player.y);
}
