use switchboard::{Scene, SceneConfig, StepOutcome};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Switchboard ===\n");

    // Optional RON scene file as first argument
    let config = match std::env::args().nth(1) {
        Some(path) => match SceneConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("ERROR: {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => SceneConfig::default_scene(),
    };

    let mut scene = match Scene::build(&config) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    // Steps run one at a time so a failure still leaves the earlier output
    let mut failed = false;
    for step in &config.script {
        match scene.run_script(std::slice::from_ref(step)) {
            Ok(outcomes) => outcomes.into_iter().for_each(print_outcome),
            Err(e) => {
                eprintln!("ERROR: {:?}: {}", step, e);
                failed = true;
                break;
            }
        }
    }

    println!("\nFinal state:");
    for (label, power) in scene.snapshot() {
        println!("  {:<12} {}", label, power);
    }
    println!("History: {:?}", scene.history());

    if failed {
        std::process::exit(1);
    }
}

fn print_outcome(outcome: StepOutcome) {
    match outcome {
        StepOutcome::Executed(description) => println!("Executed: {}", description),
        StepOutcome::Undone(description) => println!("Undone:   {}", description),
        StepOutcome::NothingToUndo => println!("No commands to undo!"),
    }
}
