//! Process console that remembers whether the cursor sits mid-line
//!
//! Programs write without trailing newlines (`"` prints the bare value), so
//! the REPL and `run --stack` need to know whether to break the line before
//! printing their own output.

use postfix_runtime::{Console, StdConsole};
use std::io;

#[derive(Debug, Default)]
pub struct Terminal {
    inner: StdConsole,
    mid_line: bool,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            inner: StdConsole,
            mid_line: false,
        }
    }

    /// Print a newline if the last program output left the line open
    pub fn finish_line(&mut self) {
        if self.mid_line {
            println!();
            self.mid_line = false;
        }
    }
}

impl Console for Terminal {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        // The user's Enter closes the line
        self.mid_line = false;
        self.inner.read_line()
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        if let Some(last) = text.chars().last() {
            self.mid_line = last != '\n';
        }
        self.inner.write(text)
    }
}
