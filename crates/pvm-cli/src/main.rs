//! `pvm`: run the bundled demo programs and print their reduction traces.
//!
//! Set `RUST_LOG=pvm=debug` to see run boundaries and every state through
//! the logger as well.

mod demos;

use clap::Parser;
use pvm_eval::{EvalError, Machine, MachineConfig, PrintObserver, TraceRecorder};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "pvm")]
#[command(about = "Small-step reduction machine demos", long_about = None)]
struct Cli {
    /// Emit each recorded trace as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Machine configuration file (JSON)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Demos to run (all when empty)
    #[arg(value_name = "DEMO")]
    demos: Vec<String>,
}

fn load_config(path: Option<&PathBuf>) -> Result<MachineConfig, String> {
    let Some(path) = path else {
        return Ok(MachineConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    MachineConfig::from_json(&text).map_err(|e| format!("invalid config {}: {e}", path.display()))
}

fn run_demo(demo: demos::Demo, config: &MachineConfig, json: bool) -> Result<(), EvalError> {
    let machine = match demo.environment {
        Some(env) => Machine::with_environment(demo.node, env),
        None => Machine::new(demo.node),
    };
    let mut machine = machine.with_config(config.clone());
    log::info!(
        "running demo {} (step limit {})",
        demo.name,
        machine.config().step_limit
    );

    if json {
        let mut recorder = TraceRecorder::new();
        let result = machine.run_with(&mut recorder);
        match recorder.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("cannot serialise trace of {}: {e}", demo.name),
        }
        result.map(|_| ())
    } else {
        println!("[!] {}:", demo.name);
        machine.run_with(&mut PrintObserver::stdout()).map(|_| ())
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("error: {msg}");
            return ExitCode::from(2);
        }
    };

    let selected: Vec<_> = demos::all()
        .into_iter()
        .filter(|d| cli.demos.is_empty() || cli.demos.iter().any(|n| n == d.name))
        .collect();
    if selected.is_empty() {
        eprintln!("error: no demo matches {:?}", cli.demos);
        return ExitCode::from(2);
    }

    let mut failed = false;
    for demo in selected {
        let name = demo.name;
        if let Err(err) = run_demo(demo, &config, cli.json) {
            eprintln!("error in {name}: {err}");
            failed = true;
        }
    }
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
