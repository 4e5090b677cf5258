//! Postfix Calculator CLI
//!
//! Runs calculator programs from the command line, a file, or the boot
//! register, and hosts the REPL, the built-in self-test and the demos.

mod demo;
mod repl;
mod selftest;
mod terminal;

use clap::{Args, CommandFactory, Parser as ClapParser, Subcommand};
use clap_complete::{Shell, generate};
use postfix_runtime::{EngineConfig, Interpreter, Stack};
use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use terminal::Terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "postfix")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Postfix calculator - a stack language driven by a self-modifying tape", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Engine configuration (TOML); defaults to ./postfix.toml when present
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log more (-v info, -vv debug, -vvv trace); RUST_LOG applies otherwise
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Args, Default)]
struct RunArgs {
    /// Program file to load as the tape
    file: Option<PathBuf>,

    /// Program text to load as the tape
    #[arg(short = 'e', long = "eval", value_name = "PROGRAM", conflicts_with = "file")]
    program: Option<String>,

    /// Print the final stack
    #[arg(long)]
    stack: bool,

    /// Print the final stack as a JSON array
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program (defaults to the boot register, the interactive loop)
    Run(RunArgs),

    /// Line-editing REPL against one persistent engine
    Repl,

    /// Run the built-in self-test suite
    Test,

    /// Run the demonstration programs
    Demo,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        None => run_program(cli.config.as_deref(), &RunArgs::default()),
        Some(Commands::Run(args)) => run_program(cli.config.as_deref(), &args),
        Some(Commands::Repl) => repl::run(&load_config(cli.config.as_deref())),
        Some(Commands::Test) => run_selftest(),
        Some(Commands::Demo) => demo::run(),
        Some(Commands::Completions { shell }) => run_completions(shell),
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    // Logs go to stderr; stdout belongs to the program
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "postfix", &mut io::stdout());
}

fn load_config(path: Option<&Path>) -> EngineConfig {
    let config = EngineConfig::discover(path).unwrap_or_else(|e| fail(e));
    info!(
        boot = %config.boot_register,
        overrides = config.registers.len(),
        "configuration loaded"
    );
    config
}

/// Where the tape comes from, for logging
fn source_label(args: &RunArgs) -> String {
    match (&args.program, &args.file) {
        (Some(_), _) => "--eval".to_string(),
        (None, Some(path)) => path.display().to_string(),
        (None, None) => "boot register".to_string(),
    }
}

fn run_program(config_path: Option<&Path>, args: &RunArgs) {
    let config = load_config(config_path);
    let mut interp = Interpreter::from_config(&config, Terminal::new()).unwrap_or_else(|e| fail(e));

    if let Some(program) = &args.program {
        interp.load(program);
    } else if let Some(path) = &args.file {
        let program = fs::read_to_string(path)
            .unwrap_or_else(|e| fail(format!("failed to read {}: {}", path.display(), e)));
        interp.load(&program);
    }

    info!(source = %source_label(args), "running program");
    let result = interp.run();
    interp.console_mut().finish_line();
    info!(depth = interp.stack().depth(), ok = result.is_ok(), "run finished");

    if args.json {
        print_json(interp.stack());
    } else if args.stack {
        println!("{}", interp.stack());
    }

    if let Err(e) = result {
        fail(e);
    }
}

fn print_json(stack: &Stack) {
    match serde_json::to_string(stack.as_slice()) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(e),
    }
}

fn run_selftest() {
    let summary = selftest::run();
    println!(
        "\n{} passed, {} failed ({} total)",
        summary.passed, summary.failed, summary.total
    );
    if summary.failed > 0 {
        process::exit(1);
    }
}

fn fail(err: impl Display) -> ! {
    eprintln!("Error: {}", err);
    process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_label() {
        assert_eq!(source_label(&RunArgs::default()), "boot register");

        let args = RunArgs {
            file: Some(PathBuf::from("loop.pf")),
            ..RunArgs::default()
        };
        assert_eq!(source_label(&args), "loop.pf");

        let args = RunArgs {
            program: Some("1 2+".to_string()),
            ..RunArgs::default()
        };
        assert_eq!(source_label(&args), "--eval");
    }

    #[test]
    fn test_run_subcommand_parses() {
        let cli = Cli::try_parse_from(["postfix", "-v", "run", "-e", "1 2+", "--json"]).unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Some(Commands::Run(args)) => {
                assert_eq!(args.program.as_deref(), Some("1 2+"));
                assert!(args.json);
            }
            _ => panic!("expected run"),
        }
    }
}
