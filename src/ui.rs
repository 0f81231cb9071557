use anstyle::{AnsiColor, Style};
use is_terminal::IsTerminal;
use std::fmt::Display;
use std::io::{self, Write};
use std::time::{Duration, Instant};

const LABEL_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy)]
enum Tone {
    Pending,
    Success,
    Info,
    Warn,
    Error,
}

impl Tone {
    fn style(self) -> Style {
        let bold = Style::new().bold();
        match self {
            Tone::Pending => bold.fg_color(Some(AnsiColor::Cyan.into())),
            Tone::Success => bold.fg_color(Some(AnsiColor::Green.into())),
            Tone::Info => bold.fg_color(Some(AnsiColor::Blue.into())),
            Tone::Warn => bold.fg_color(Some(AnsiColor::Yellow.into())),
            Tone::Error => bold.fg_color(Some(AnsiColor::Red.into())),
        }
    }

    fn uses_stderr(self) -> bool {
        matches!(self, Tone::Warn | Tone::Error)
    }
}

fn emit(tone: Tone, label: &str, message: &str) {
    let no_color = std::env::var_os("NO_COLOR").is_some();
    let (mut handle, colored): (Box<dyn Write>, bool) = if tone.uses_stderr() {
        let colored = io::stderr().is_terminal() && !no_color;
        (Box::new(io::stderr().lock()), colored)
    } else {
        let colored = io::stdout().is_terminal() && !no_color;
        (Box::new(io::stdout().lock()), colored)
    };

    let padded = format!("{:>width$}", label, width = LABEL_WIDTH);
    let (prefix, suffix) = if colored {
        let style = tone.style();
        (style.render().to_string(), style.render_reset().to_string())
    } else {
        (String::new(), String::new())
    };

    for (idx, line) in message.split('\n').enumerate() {
        if idx == 0 {
            let _ = writeln!(handle, "{prefix}{padded}{suffix} {line}");
        } else {
            let _ = writeln!(handle, "{:>width$} {line}", "", width = LABEL_WIDTH);
        }
    }
    let _ = handle.flush();
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        let minutes = secs / 60;
        let seconds = secs % 60;
        if seconds == 0 {
            format!("{minutes}m")
        } else {
            format!("{minutes}m {seconds}s")
        }
    } else if duration.as_secs_f64() >= 1.0 {
        format!("{:.1}s", duration.as_secs_f64())
    } else {
        format!("{}ms", duration.as_millis())
    }
}

pub fn status(label: &str, message: impl Display) {
    emit(Tone::Pending, label, &message.to_string());
}

pub fn info(message: impl Display) {
    emit(Tone::Info, "Info", &message.to_string());
}

pub fn warn(message: impl Display) {
    emit(Tone::Warn, "Warning", &message.to_string());
}

pub fn error(message: impl Display) {
    emit(Tone::Error, "Error", &message.to_string());
}

pub fn success(label: &str, message: impl Display) {
    emit(Tone::Success, label, &message.to_string());
}

/// Long-running step reporter: announces the step, then closes it with the
/// elapsed time.
pub struct Progress {
    message: String,
    started: Instant,
    finished: bool,
}

impl Progress {
    pub fn new(label: impl AsRef<str>, message: impl Into<String>) -> Self {
        let message = message.into();
        emit(Tone::Pending, label.as_ref(), &message);

        Self {
            message,
            started: Instant::now(),
            finished: false,
        }
    }

    pub fn done(mut self, label: &str) {
        self.finished = true;
        emit(
            Tone::Success,
            label,
            &format!(
                "{} in {}",
                self.message,
                format_duration(self.started.elapsed())
            ),
        );
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        // Reached when the step errors out before `done`; the error itself is
        // reported by the caller.
        if !self.finished {
            self.finished = true;
            emit(
                Tone::Warn,
                "Stopped",
                &format!(
                    "{} after {}",
                    self.message,
                    format_duration(self.started.elapsed())
                ),
            );
        }
    }
}
