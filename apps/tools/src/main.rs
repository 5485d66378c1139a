use std::{fs, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing_subscriber::EnvFilter;
use viewstate::{
    split_and_validate_path, ControllerArgs, ControllerRegistry, ViewStateManager,
};

#[derive(Parser, Debug)]
#[command(about = "Inspect and exercise controller view states")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a dotted controller path and print its segments.
    CheckPath { path: String },
    /// List the registered controller types.
    Types,
    /// Replay a TOML script of view state operations.
    Replay { script: PathBuf },
}

#[derive(Debug, Deserialize)]
struct Script {
    #[serde(default, rename = "step")]
    steps: Vec<Step>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Op {
    ViewState,
    Get,
    Insert,
    Push,
    Pop,
}

#[derive(Debug, Deserialize)]
struct Step {
    op: Op,
    #[serde(default)]
    view_state: Option<i64>,
    #[serde(default)]
    no_create: bool,
    path: Option<String>,
    controller_type: Option<String>,
    #[serde(default)]
    args: Vec<Value>,
    #[serde(default)]
    kwargs: Map<String, Value>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let registry = ControllerRegistry::with_defaults();

    match cli.command {
        Command::CheckPath { path } => {
            let segments = split_and_validate_path(&path)?;
            println!("{}", segments.join(" / "));
        }
        Command::Types => {
            for type_path in registry.type_paths() {
                println!("{type_path}");
            }
        }
        Command::Replay { script } => {
            let raw = fs::read_to_string(&script)
                .with_context(|| format!("failed to read script '{}'", script.display()))?;
            let script: Script = toml::from_str(&raw).context("failed to parse replay script")?;
            for line in replay(&script, &registry) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

/// Runs every step against a fresh manager; a failing step is reported and
/// the replay moves on.
fn replay(script: &Script, registry: &ControllerRegistry) -> Vec<String> {
    let mut manager = ViewStateManager::new();
    script
        .steps
        .iter()
        .enumerate()
        .map(|(n, step)| match run_step(&mut manager, registry, step) {
            Ok(outcome) => format!("step {n}: {outcome}"),
            Err(error) => format!("step {n}: error: {error}"),
        })
        .collect()
}

fn run_step(
    manager: &mut ViewStateManager,
    registry: &ControllerRegistry,
    step: &Step,
) -> Result<String> {
    let no_create = step.no_create || !matches!(step.op, Op::ViewState);
    let view_state = manager.get_view_state(step.view_state, no_create)?;
    let index = view_state.index();

    match step.op {
        Op::ViewState => Ok(format!("view state {index}")),
        Op::Get => {
            let path = step_path(step)?;
            let summary = view_state.summarize(path)?;
            Ok(format!("{path} in view state {index}: {}", serde_json::to_string(&summary)?))
        }
        Op::Insert => {
            let (path, (type_path, args)) = (step_path(step)?, step_controller(step)?);
            view_state.insert_new_controller(registry, path, type_path, args)?;
            Ok(format!("inserted {type_path} at {path} in view state {index}"))
        }
        Op::Push => {
            let (path, (type_path, args)) = (step_path(step)?, step_controller(step)?);
            view_state.push_new_controller(registry, path, type_path, args)?;
            Ok(format!("pushed {type_path} at {path} in view state {index}"))
        }
        Op::Pop => {
            let path = step_path(step)?;
            let popped = view_state.pop_controller(path)?;
            Ok(format!("popped {} from {path} in view state {index}", popped.type_path()))
        }
    }
}

fn step_path(step: &Step) -> Result<&str> {
    step.path
        .as_deref()
        .ok_or_else(|| anyhow!("{:?} step needs a path", step.op))
}

fn step_controller(step: &Step) -> Result<(&str, ControllerArgs)> {
    let type_path = step
        .controller_type
        .as_deref()
        .ok_or_else(|| anyhow!("{:?} step needs a controller_type", step.op))?;
    let args = ControllerArgs {
        positional: step.args.clone(),
        keyword: step.kwargs.clone(),
    };
    Ok((type_path, args))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(script: &str) -> Vec<String> {
        let script: Script = toml::from_str(script).expect("script");
        replay(&script, &ControllerRegistry::with_defaults())
    }

    #[test]
    fn replays_push_and_pop_in_order() {
        let lines = run(r#"
[[step]]
op = "view_state"

[[step]]
op = "push"
view_state = 0
path = "page.main"
controller_type = "controller.base"
args = ["inbox"]

[[step]]
op = "pop"
view_state = 0
path = "page.main"
"#);

        assert_eq!(
            lines,
            vec![
                "step 0: view state 0",
                "step 1: pushed controller.base at page.main in view state 0",
                "step 2: popped controller.base from page.main in view state 0",
            ]
        );
    }

    #[test]
    fn failing_steps_are_reported_and_skipped() {
        let lines = run(r#"
[[step]]
op = "get"
view_state = 0
path = "page"

[[step]]
op = "view_state"
view_state = 4

[[step]]
op = "pop"
view_state = 0
path = "page"

[[step]]
op = "insert"
view_state = 0
path = "page.main"
"#);

        assert!(lines[0].starts_with("step 0: error: no view state"));
        assert_eq!(lines[1], "step 1: view state 0");
        assert!(lines[2].contains("root controller can never be popped"));
        assert!(lines[3].contains("needs a controller_type"));
    }

    #[test]
    fn get_reports_controller_summary() {
        let lines = run(r#"
[[step]]
op = "view_state"

[[step]]
op = "insert"
view_state = 0
path = "page.header"
controller_type = "controller.base"

[[step]]
op = "get"
view_state = 0
path = "page"
"#);

        assert!(lines[2].contains(r#""name":"header""#), "{}", lines[2]);
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["tools", "check-path", "page.one"]).expect("cli");
        assert!(matches!(cli.command, Command::CheckPath { ref path } if path == "page.one"));
    }
}
