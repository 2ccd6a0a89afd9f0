//! Scripted [`Ui`] for tests and non-interactive runs.

use std::collections::{HashMap, VecDeque};

use chrono::{NaiveDate, NaiveTime};

use super::{TableView, Ui};

/// Severity of a rendered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Write,
    Success,
    Info,
    Warning,
    Error,
}

/// One scripted widget value.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Text(String),
    Choice(usize),
    Date(NaiveDate),
    Time(NaiveTime),
    Number(u32),
    Flag(bool),
}

/// A [`Ui`] that answers from per-label queues and records everything shown.
///
/// Widgets without a scripted answer get the widget's neutral default:
/// blank text, the first option, the minimum number, an unticked box and an
/// unpressed button.
#[derive(Debug, Clone)]
pub struct ScriptedUi {
    answers: HashMap<String, VecDeque<Answer>>,
    default_date: NaiveDate,
    prompts: Vec<String>,
    messages: Vec<(Level, String)>,
    tables: Vec<TableView>,
}

impl Default for ScriptedUi {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedUi {
    pub fn new() -> Self {
        Self {
            answers: HashMap::new(),
            default_date: NaiveDate::default(),
            prompts: Vec::new(),
            messages: Vec::new(),
            tables: Vec::new(),
        }
    }

    /// Queue an answer for the widget labelled `label`.
    pub fn answer(mut self, label: &str, answer: Answer) -> Self {
        self.answers
            .entry(label.to_string())
            .or_default()
            .push_back(answer);
        self
    }

    pub fn with_text(self, label: &str, value: &str) -> Self {
        self.answer(label, Answer::Text(value.to_string()))
    }

    pub fn with_choice(self, label: &str, index: usize) -> Self {
        self.answer(label, Answer::Choice(index))
    }

    pub fn with_date(self, label: &str, date: NaiveDate) -> Self {
        self.answer(label, Answer::Date(date))
    }

    pub fn with_time(self, label: &str, time: NaiveTime) -> Self {
        self.answer(label, Answer::Time(time))
    }

    pub fn with_number(self, label: &str, value: u32) -> Self {
        self.answer(label, Answer::Number(value))
    }

    /// Tick a checkbox or press a button.
    pub fn with_flag(self, label: &str, value: bool) -> Self {
        self.answer(label, Answer::Flag(value))
    }

    /// Date returned by unscripted date widgets.
    pub fn with_default_date(mut self, date: NaiveDate) -> Self {
        self.default_date = date;
        self
    }

    /// Labels of every widget asked, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn messages(&self) -> &[(Level, String)] {
        &self.messages
    }

    /// Messages of one level, in order.
    pub fn messages_at(&self, level: Level) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.as_str())
            .collect()
    }

    pub fn has_message(&self, level: Level, text: &str) -> bool {
        self.messages.iter().any(|(l, m)| *l == level && m == text)
    }

    /// Views drawn through [`Ui::render`].
    pub fn tables(&self) -> &[TableView] {
        &self.tables
    }

    fn next(&mut self, label: &str) -> Option<Answer> {
        self.prompts.push(label.to_string());
        self.answers.get_mut(label).and_then(VecDeque::pop_front)
    }

    fn push(&mut self, level: Level, message: &str) {
        self.messages.push((level, message.to_string()));
    }
}

impl Ui for ScriptedUi {
    fn text(&mut self, label: &str) -> String {
        match self.next(label) {
            Some(Answer::Text(value)) => value,
            _ => String::new(),
        }
    }

    fn text_area(&mut self, label: &str) -> String {
        self.text(label)
    }

    fn choice(&mut self, label: &str, options: &[&str]) -> usize {
        match self.next(label) {
            Some(Answer::Choice(index)) if index < options.len() => index,
            _ => 0,
        }
    }

    fn date(&mut self, label: &str) -> NaiveDate {
        match self.next(label) {
            Some(Answer::Date(date)) => date,
            _ => self.default_date,
        }
    }

    fn time(&mut self, label: &str) -> NaiveTime {
        match self.next(label) {
            Some(Answer::Time(time)) => time,
            _ => NaiveTime::MIN,
        }
    }

    /// Scripted numbers are passed through unclamped so range checks
    /// downstream can be exercised.
    fn number(&mut self, label: &str, min: u32, _max: u32) -> u32 {
        match self.next(label) {
            Some(Answer::Number(value)) => value,
            _ => min,
        }
    }

    fn checkbox(&mut self, label: &str) -> bool {
        matches!(self.next(label), Some(Answer::Flag(true)))
    }

    fn button(&mut self, label: &str) -> bool {
        self.checkbox(label)
    }

    fn write(&mut self, text: &str) {
        self.push(Level::Write, text);
    }

    fn success(&mut self, message: &str) {
        self.push(Level::Success, message);
    }

    fn info(&mut self, message: &str) {
        self.push(Level::Info, message);
    }

    fn warning(&mut self, message: &str) {
        self.push(Level::Warning, message);
    }

    fn error(&mut self, message: &str) {
        self.push(Level::Error, message);
    }

    fn render(&mut self, view: &TableView) {
        self.tables.push(view.clone());
    }
}
