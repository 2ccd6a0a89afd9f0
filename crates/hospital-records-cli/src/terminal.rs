//! Line-oriented [`Ui`] over a reader and a writer.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use chrono::{Local, NaiveDate, NaiveTime};
use hospital_records_core::{TableView, Ui};
use tracing::warn;

const DATE_INPUTS: [&str; 2] = ["%Y/%m/%d", "%Y-%m-%d"];
const TIME_INPUTS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

/// Prompts on `output`, answers from `input`.
///
/// End of input answers every remaining widget with its blank default, so a
/// piped script never blocks.
pub struct TerminalUi<R, W> {
    input: R,
    output: W,
}

impl TerminalUi<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalUi<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn emit(&mut self, text: &str) {
        if let Err(err) = writeln!(self.output, "{text}") {
            warn!(error = %err, "failed to write to terminal");
        }
    }

    /// One answer line without its line ending; `None` at end of input.
    fn ask(&mut self, prompt: &str) -> Option<String> {
        let shown = write!(self.output, "{prompt}: ").and_then(|_| self.output.flush());
        if let Err(err) = shown {
            warn!(error = %err, "failed to write prompt");
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\n', '\r']).to_string()),
            Err(err) => {
                warn!(error = %err, "failed to read answer");
                None
            }
        }
    }

    /// Re-ask until `parse` accepts the answer. Blank or end of input yields
    /// `blank`.
    fn ask_until<T>(
        &mut self,
        prompt: &str,
        blank: T,
        mut parse: impl FnMut(&str) -> Result<T, String>,
    ) -> T {
        loop {
            let Some(answer) = self.ask(prompt) else {
                return blank;
            };
            let answer = answer.trim();
            if answer.is_empty() {
                return blank;
            }
            match parse(answer) {
                Ok(value) => return value,
                Err(message) => self.emit(&format!("  {message}")),
            }
        }
    }

    fn ask_yes_no(&mut self, prompt: &str) -> bool {
        self.ask_until(&format!("{prompt} [y/N]"), false, |answer| {
            match answer.to_ascii_lowercase().as_str() {
                "y" | "yes" => Ok(true),
                "n" | "no" => Ok(false),
                _ => Err("Please answer y or n.".to_string()),
            }
        })
    }
}

impl<R: BufRead, W: Write> Ui for TerminalUi<R, W> {
    fn text(&mut self, label: &str) -> String {
        self.ask(label).unwrap_or_default()
    }

    fn text_area(&mut self, label: &str) -> String {
        let mut lines = Vec::new();
        let mut prompt = format!("{label} (end with an empty line)");
        while let Some(line) = self.ask(&prompt) {
            if line.trim().is_empty() {
                break;
            }
            lines.push(line);
            prompt = "...".to_string();
        }
        lines.join("\n")
    }

    fn choice(&mut self, label: &str, options: &[&str]) -> usize {
        let listed = options
            .iter()
            .enumerate()
            .map(|(i, option)| format!("{}) {option}", i + 1))
            .collect::<Vec<_>>()
            .join("  ");
        self.ask_until(&format!("{label} [{listed}]"), 0, |answer| {
            if let Ok(n) = answer.parse::<usize>() {
                if (1..=options.len()).contains(&n) {
                    return Ok(n - 1);
                }
            }
            options
                .iter()
                .position(|option| option.eq_ignore_ascii_case(answer))
                .ok_or_else(|| format!("Choose 1 to {}.", options.len()))
        })
    }

    fn date(&mut self, label: &str) -> NaiveDate {
        let today = Local::now().date_naive();
        self.ask_until(&format!("{label} [blank for today]"), today, |answer| {
            DATE_INPUTS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(answer, format).ok())
                .ok_or_else(|| "Enter the date as YYYY/MM/DD.".to_string())
        })
    }

    fn time(&mut self, label: &str) -> NaiveTime {
        self.ask_until(&format!("{label} [blank for 00:00]"), NaiveTime::MIN, |answer| {
            TIME_INPUTS
                .iter()
                .find_map(|format| NaiveTime::parse_from_str(answer, format).ok())
                .ok_or_else(|| "Enter the time as hh:mm.".to_string())
        })
    }

    fn number(&mut self, label: &str, min: u32, max: u32) -> u32 {
        self.ask_until(&format!("{label} [{min}-{max}]"), min, |answer| {
            match answer.parse::<u32>() {
                Ok(n) if (min..=max).contains(&n) => Ok(n),
                _ => Err(format!("Enter a whole number from {min} to {max}.")),
            }
        })
    }

    fn checkbox(&mut self, label: &str) -> bool {
        self.ask_yes_no(label)
    }

    fn button(&mut self, label: &str) -> bool {
        self.ask_yes_no(&format!("{label}?"))
    }

    fn write(&mut self, text: &str) {
        self.emit(text);
    }

    fn success(&mut self, message: &str) {
        self.emit(&format!("[ok] {message}"));
    }

    fn info(&mut self, message: &str) {
        self.emit(&format!("[info] {message}"));
    }

    fn warning(&mut self, message: &str) {
        self.emit(&format!("[warning] {message}"));
    }

    fn error(&mut self, message: &str) {
        self.emit(&format!("[error] {message}"));
    }

    fn render(&mut self, view: &TableView) {
        if let Err(err) = write!(self.output, "{view}") {
            warn!(error = %err, "failed to write table");
        }
    }
}
