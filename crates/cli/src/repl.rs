//! Line-editing REPL
//!
//! Each line is loaded as a fresh tape against one persistent engine, so the
//! stack carries over from line to line. The boot register is not run.
//!
//! Commands:
//!   :quit, :q        Exit
//!   :stack           Show the stack
//!   :clear           Empty the stack
//!   :registers       List registers that hold a value
//!   :ops             List operators
//!   :help            Show help

use crate::terminal::Terminal;
use postfix_runtime::{EngineConfig, Interpreter, Op, Value};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::path::PathBuf;

const PROMPT: &str = "postfix> ";

/// Longest register text shown by `:registers`
const PREVIEW_CHARS: usize = 60;

pub fn run(config: &EngineConfig) {
    let mut interp = match Interpreter::from_config(config, Terminal::new()) {
        Ok(interp) => interp,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    interp.load("");

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Error: failed to start line editor: {}", e);
            std::process::exit(1);
        }
    };

    let history_file = history_file();
    if let Some(ref path) = history_file {
        let _ = rl.load_history(path);
    }

    println!(
        "Postfix calculator {}. Type :help for commands, :quit to exit.\n",
        env!("CARGO_PKG_VERSION")
    );

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                match line {
                    ":quit" | ":q" => {
                        println!("Goodbye!");
                        break;
                    }
                    ":stack" => println!("{}", interp.stack()),
                    ":clear" => {
                        interp.reset();
                        println!("Stack cleared.");
                    }
                    ":registers" => print_registers(&interp),
                    ":ops" => print_ops(),
                    ":help" | ":h" => print_help(),
                    _ if line.starts_with(':') => {
                        println!("Unknown command: {}. Type :help for commands.", line);
                    }
                    program => {
                        let result = interp.execute(program);
                        interp.console_mut().finish_line();
                        if let Err(e) = result {
                            eprintln!("Error: {}", e);
                        }
                        println!("{}", interp.stack());
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    if let Some(ref path) = history_file {
        let _ = rl.save_history(path);
    }
}

fn history_file() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(".postfix_history"))
}

fn print_registers(interp: &Interpreter<Terminal>) {
    for (key, value) in interp.registers().iter() {
        if value.is_empty_string() {
            continue;
        }
        println!("  {}  {}", key, preview(value));
    }
}

fn preview(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() > PREVIEW_CHARS {
        let head: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        text
    }
}

fn print_ops() {
    for op in Op::ALL {
        println!("  {}  {:<12} {}", op.symbol(), op.name(), op.effect());
    }
}

fn print_help() {
    println!(
        r#"
Postfix REPL Commands:
  :quit, :q     Exit the REPL
  :stack        Show the stack
  :clear        Empty the stack
  :registers    List registers that hold a value
  :ops          List operators with their stack effects
  :help, :h     Show this help

Anything else is run as a program against the current stack:
  1 2+          push 1 and 2, add
  (hi)"         write a string
  1(8)(9)c@     conditional: run (8) if the flag is truthy, else (9)
  '             read a line from input
"#
    );
}
