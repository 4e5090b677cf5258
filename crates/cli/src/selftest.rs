//! Built-in self-test
//!
//! Runs a fixed set of programs against one engine, resetting it between
//! cases, and checks the resulting stack, console output or fatal error.

use postfix_runtime::{Interpreter, Registers, RuntimeError, ScriptedConsole, Value};

/// What a case must produce
#[derive(Debug)]
pub enum Expect {
    /// Exact final stack
    Stack(Vec<Value>),
    /// Top of stack only
    Top(Value),
    /// Top of stack is a float within 1e-9
    Approx(f64),
    /// Console output
    Output(&'static str),
    /// The run ends in a stack underflow raised by this operator
    Underflow(char),
}

#[derive(Debug)]
pub struct Case {
    pub name: &'static str,
    pub program: &'static str,
    pub input: &'static [&'static str],
    pub expect: Expect,
}

impl Case {
    fn new(name: &'static str, program: &'static str, expect: Expect) -> Self {
        Self {
            name,
            program,
            input: &[],
            expect,
        }
    }

    fn with_input(mut self, input: &'static [&'static str]) -> Self {
        self.input = input;
        self
    }
}

/// Result of running a single case
#[derive(Debug)]
pub struct TestResult {
    pub name: &'static str,
    pub passed: bool,
    /// What went wrong, for failed cases
    pub detail: Option<String>,
}

#[derive(Debug, Default)]
pub struct TestSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<TestResult>,
}

fn ints(values: &[i64]) -> Expect {
    Expect::Stack(values.iter().map(|n| Value::Integer(*n)).collect())
}

fn string(text: &str) -> Expect {
    Expect::Top(Value::from(text))
}

pub fn cases() -> Vec<Case> {
    vec![
        Case::new("addition", "1 2+", ints(&[3])),
        Case::new("nested arithmetic", "15 2 3 4+*-", ints(&[1])),
        Case::new("float addition", "5.1 12.3+", Expect::Approx(17.4)),
        Case::new("true division", "7 2/", Expect::Approx(3.5)),
        Case::new("division gives float", "6 2/", Expect::Stack(vec![Value::Float(3.0)])),
        Case::new("floored modulo", "7~ 2%", ints(&[1])),
        Case::new("multi-digit integer", "123", ints(&[123])),
        Case::new("decimal", "12.34", Expect::Approx(12.34)),
        Case::new("copy", "5 3 7 2!", ints(&[5, 3, 7, 3])),
        Case::new("delete", "5 3 7 2$", ints(&[5, 7])),
        Case::new("depth", "5 3 7#", ints(&[5, 3, 7, 3])),
        Case::new("copy out of range", "5 9!", ints(&[5])),
        Case::new("apply now", "4 3(2*)@+", ints(&[10])),
        Case::new("nested parens", "(a(b)c)", string("a(b)c")),
        Case::new("conditional then", "1(8)(9~)c@", Expect::Top(Value::Integer(8))),
        Case::new("conditional else", "0(8)(9~)c@", Expect::Top(Value::Integer(-9))),
        Case::new("append char", "(hello)65*", string("helloA")),
        Case::new("prepend char", "65(hello)*", string("Ahello")),
        Case::new("char code", "(hello)1%", Expect::Top(Value::Integer(101))),
        Case::new("substring search", "(ab)(b)/", Expect::Top(Value::Integer(1))),
        Case::new("trim end", "(abc)2-", string("a")),
        Case::new("trim start", "2(abc)-", string("c")),
        Case::new("concatenation", "3(x)+", string("3x")),
        Case::new("float concatenation", "3.0(x)+", string("3.0x")),
        Case::new("float tolerance", "0.1 0.2+0.3=", Expect::Top(Value::Integer(1))),
        Case::new("number below string", "1(a)<", Expect::Top(Value::Integer(1))),
        Case::new("division by zero", "7 0/", Expect::Stack(vec![Value::empty()])),
        Case::new("float modulo", "7.5 2%", Expect::Stack(vec![Value::empty()])),
        Case::new("logic on strings", "(x)1&", Expect::Stack(vec![Value::empty()])),
        Case::new("underflow", "1+", Expect::Underflow('+')),
        Case::new("write", "2.5\" 3.0\"", Expect::Output("2.53")),
        Case::new("read", "'1+", ints(&[42])).with_input(&["41"]),
        Case::new(
            "apply later loop",
            r#"(1!"1- 1!0>(2!\)()c@)3 2!\"#,
            Expect::Output("321"),
        ),
    ]
}

pub fn run() -> TestSummary {
    let mut interp =
        Interpreter::with_registers(Registers::bootstrap(), 'z', ScriptedConsole::new());
    let mut summary = TestSummary::default();

    for case in cases() {
        let result = run_case(&mut interp, &case);
        if result.passed {
            println!("  ok      {}", result.name);
            summary.passed += 1;
        } else {
            println!(
                "  FAILED  {}: {}",
                result.name,
                result.detail.as_deref().unwrap_or("")
            );
            summary.failed += 1;
        }
        summary.total += 1;
        summary.results.push(result);
    }
    summary
}

fn run_case(interp: &mut Interpreter<ScriptedConsole>, case: &Case) -> TestResult {
    interp.reset();
    interp.console_mut().take_output();
    for line in case.input {
        interp.console_mut().push_input(*line);
    }

    let outcome = interp.execute(case.program);
    let output = interp.console_mut().take_output();
    let stack = interp.stack().as_slice();

    let detail = match (&case.expect, outcome) {
        (Expect::Underflow(op), Err(RuntimeError::StackUnderflow { op: got, .. })) if *op == got => {
            None
        }
        (Expect::Underflow(op), other) => Some(format!("expected underflow on '{}', got {:?}", op, other)),
        (_, Err(e)) => Some(format!("fatal error: {}", e)),
        (Expect::Stack(expected), Ok(())) if expected.as_slice() == stack => None,
        (Expect::Top(expected), Ok(())) if stack.last() == Some(expected) => None,
        (Expect::Approx(expected), Ok(())) => match stack.last() {
            Some(Value::Float(f)) if (f - expected).abs() < 1e-9 => None,
            other => Some(format!("expected ~{}, got {:?}", expected, other)),
        },
        (Expect::Output(expected), Ok(())) if output == *expected => None,
        (Expect::Output(expected), Ok(())) => {
            Some(format!("expected output {:?}, got {:?}", expected, output))
        }
        (expected, Ok(())) => Some(format!("expected {:?}, got {:?}", expected, stack)),
    };

    TestResult {
        name: case.name,
        passed: detail.is_none(),
        detail,
    }
}
