//! Colored terminal output for publish runs
//!
//! Progress goes to stdout, errors to stderr. Colors are only emitted when the
//! stream is a terminal, so captured output stays plain text.

use std::io::{IsTerminal, Write};
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

fn stdout_choice() -> ColorChoice {
    if std::io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

fn stderr_choice() -> ColorChoice {
    if std::io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Output manager for consistent colored terminal output
#[derive(Debug)]
pub struct OutputManager {
    bufwtr: BufferWriter,
    verbose: bool,
}

impl Default for OutputManager {
    fn default() -> Self {
        Self::new(false)
    }
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(verbose: bool) -> Self {
        Self {
            bufwtr: BufferWriter::stdout(stdout_choice()),
            verbose,
        }
    }

    fn emit(&self, marker: Option<(&str, ColorSpec)>, message: &str) {
        let mut buffer = self.bufwtr.buffer();
        if let Some((symbol, spec)) = marker {
            let _ = buffer.set_color(&spec);
            let _ = write!(&mut buffer, "{symbol}");
            let _ = buffer.reset();
            let _ = write!(&mut buffer, " ");
        }
        let _ = writeln!(&mut buffer, "{message}");
        let _ = self.bufwtr.print(&buffer);
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan));
        self.emit(Some(("ℹ", spec)), message);
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Green)).set_bold(true);
        self.emit(Some(("✓", spec)), message);
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Yellow)).set_bold(true);
        self.emit(Some(("⚠", spec)), message);
    }

    /// Print an error message to stderr
    pub fn error(&self, message: &str) {
        let bufwtr = BufferWriter::stderr(stderr_choice());
        let mut buffer = bufwtr.buffer();

        if buffer
            .set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))
            .is_err()
            || write!(&mut buffer, "✗").is_err()
            || buffer.reset().is_err()
            || writeln!(&mut buffer, " {}", message).is_err()
            || bufwtr.print(&buffer).is_err()
        {
            // Stderr failed - fallback to stdout as last resort
            println!("[STDERR ERROR] ✗ {}", message);
        }
    }

    /// Print a verbose/debug message (only in verbose mode)
    pub fn verbose(&self, message: &str) {
        if !self.verbose {
            return;
        }
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Blue));
        self.emit(Some(("→", spec)), message);
    }

    /// Print text indented by `width` spaces
    pub fn indent_by(&self, width: usize, message: &str) {
        self.emit(None, &format!("{:width$}{}", "", message, width = width));
    }

    /// Print indented text (for sub-items)
    pub fn indent(&self, message: &str) {
        self.indent_by(4, message);
    }

    /// Print a plain message
    pub fn println(&self, message: &str) {
        self.emit(None, message);
    }
}
