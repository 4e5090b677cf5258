//! Demonstration programs
//!
//! Each demo runs on the same engine after a reset, with any console input
//! scripted, and prints what the program wrote and the stack it left.

use postfix_runtime::{Interpreter, RuntimeResult, ScriptedConsole};

pub struct Demo {
    pub title: &'static str,
    pub program: &'static str,
    pub input: &'static [&'static str],
}

pub const DEMOS: &[Demo] = &[
    Demo {
        title: "Arithmetic: (15 - (2 * (3 + 4)))",
        program: "15 2 3 4+*-",
        input: &[],
    },
    Demo {
        title: "Mixed integer and float",
        program: "5.1 12.3+ 2/",
        input: &[],
    },
    Demo {
        title: "Apply a string as code",
        program: "4 3(2*)@+",
        input: &[],
    },
    Demo {
        title: "Conditional with the helper in register c",
        program: "3 2>((bigger))((smaller))c@",
        input: &[],
    },
    Demo {
        title: "Building a string from character codes",
        program: "()72*105*33*1!\"",
        input: &[],
    },
    Demo {
        title: "Countdown loop re-queued with apply-later",
        program: r#"(1!" 1- 1!0>(2!\)()c@)5 2!\"#,
        input: &[],
    },
    Demo {
        title: "Reading input",
        program: "(Squaring )\"'1!\"(: )\"1!*1!\"",
        input: &["12"],
    },
    Demo {
        title: "String analysis (register b)",
        program: "b@",
        input: &["Hello, World 42"],
    },
];

/// Run one demo on a reset `interp`, leaving its output in the console
pub fn run_demo(interp: &mut Interpreter<ScriptedConsole>, demo: &Demo) -> RuntimeResult<()> {
    interp.reset();
    interp.console_mut().take_output();
    for line in demo.input {
        interp.console_mut().push_input(*line);
    }
    interp.execute(demo.program)
}

pub fn run() {
    let mut interp = Interpreter::new(ScriptedConsole::new());

    for demo in DEMOS {
        println!("== {}", demo.title);
        println!("   program: {}", demo.program);
        for line in demo.input {
            println!("   input:   {}", line);
        }
        let result = run_demo(&mut interp, demo);
        let output = interp.console_mut().take_output();
        if !output.is_empty() {
            for line in output.lines() {
                println!("   output:  {}", line);
            }
        }
        match result {
            Ok(()) => println!("   stack:   {}", interp.stack()),
            Err(e) => println!("   error:   {}", e),
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postfix_runtime::Value;

    fn engine() -> Interpreter<ScriptedConsole> {
        Interpreter::new(ScriptedConsole::new())
    }

    #[test]
    fn test_every_demo_runs() {
        let mut interp = engine();
        for demo in DEMOS {
            assert!(run_demo(&mut interp, demo).is_ok(), "{}", demo.title);
            assert_eq!(interp.console().pending_input(), 0, "{}", demo.title);
        }
    }

    #[test]
    fn test_conditional_demo() {
        let mut interp = engine();
        run_demo(&mut interp, &DEMOS[3]).unwrap();
        assert_eq!(interp.stack().as_slice(), &[Value::from("bigger")]);
    }

    #[test]
    fn test_char_code_demo() {
        let mut interp = engine();
        run_demo(&mut interp, &DEMOS[4]).unwrap();
        assert_eq!(interp.console().output(), "Hi!");
    }

    #[test]
    fn test_string_analysis_demo() {
        let mut interp = engine();
        run_demo(&mut interp, &DEMOS[7]).unwrap();
        let counts: Vec<Value> = interp.stack().iter().skip(1).cloned().collect();
        assert_eq!(
            counts,
            vec![
                Value::Integer(10),
                Value::Integer(2),
                Value::Integer(2),
                Value::Integer(1)
            ]
        );
    }
}
