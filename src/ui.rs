//! UI surface handles injected into the views.
//!
//! These are the places views read input from and render output to: text
//! inputs, a results panel, the person chooser and the person table. User
//! prompts go through the [`Notifier`] trait so the front end decides how
//! they are shown.

use std::fmt;

/// Shows a blocking message to the user.
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// Prints prompts to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Keeps every prompt in memory, for tests and scripted use.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    messages: Vec<String>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// A single-line text field.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TextInput {
    value: String,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Inline area that shows recognition output.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResultsPanel {
    lines: Vec<String>,
}

impl ResultsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// An entry in the [`PersonChooser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChooserOption {
    pub value: String,
    pub label: String,
}

/// Label of the "nothing selected" entry.
pub const CHOOSER_PLACEHOLDER: &str = "Select a person to delete";

/// Drop-down of persons. The placeholder is always the first option and
/// carries an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonChooser {
    options: Vec<ChooserOption>,
    selected: usize,
}

impl Default for PersonChooser {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonChooser {
    pub fn new() -> Self {
        Self {
            options: vec![ChooserOption {
                value: String::new(),
                label: CHOOSER_PLACEHOLDER.to_string(),
            }],
            selected: 0,
        }
    }

    /// Drop every option except the placeholder and select it.
    pub fn reset(&mut self) {
        self.options.truncate(1);
        self.selected = 0;
    }

    pub fn push(&mut self, value: impl Into<String>, label: impl Into<String>) {
        self.options.push(ChooserOption {
            value: value.into(),
            label: label.into(),
        });
    }

    pub fn options(&self) -> &[ChooserOption] {
        &self.options
    }

    /// Options other than the placeholder.
    pub fn persons(&self) -> &[ChooserOption] {
        &self.options[1..]
    }

    /// Select the option with `value`. Returns false (and leaves the
    /// selection alone) if there is no such option.
    pub fn select(&mut self, value: &str) -> bool {
        match self.options.iter().position(|o| o.value == value) {
            Some(idx) => {
                self.selected = idx;
                true
            }
            None => false,
        }
    }

    /// Value of the selected option, `None` while the placeholder is selected.
    pub fn selected_value(&self) -> Option<&str> {
        let value = self.options[self.selected].value.as_str();
        (!value.is_empty()).then_some(value)
    }
}

/// One row of the [`PersonTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// 1-based display index
    pub index: usize,
    pub name: String,
    pub image_count: u64,
}

/// Table of every person with their enrolled-image count.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PersonTable {
    rows: Vec<TableRow>,
}

impl PersonTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rows(&mut self, rows: Vec<TableRow>) {
        self.rows = rows;
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

impl fmt::Display for PersonTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_width = self
            .rows
            .iter()
            .map(|r| r.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Name".len());

        writeln!(f, "{:>4}  {:<name_width$}  {:>6}", "#", "Name", "Images")?;
        for row in &self.rows {
            writeln!(
                f,
                "{:>4}  {:<name_width$}  {:>6}",
                row.index, row.name, row.image_count
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order() {
        let mut notifier = RecordingNotifier::new();
        notifier.alert("first");
        notifier.alert("second");
        assert_eq!(notifier.messages(), &["first", "second"]);
        assert_eq!(notifier.last(), Some("second"));
        notifier.clear();
        assert!(notifier.last().is_none());
    }

    #[test]
    fn test_text_input() {
        let mut input = TextInput::new();
        input.set_value(" 12 ");
        assert_eq!(input.value(), " 12 ");
        input.clear();
        assert!(input.is_empty());
    }

    #[test]
    fn test_chooser_placeholder_always_first() {
        let mut chooser = PersonChooser::new();
        assert_eq!(chooser.options()[0].label, CHOOSER_PLACEHOLDER);
        assert_eq!(chooser.selected_value(), None);

        chooser.push("1", "Alice");
        chooser.push("2", "Bob");
        assert!(chooser.select("2"));
        assert_eq!(chooser.selected_value(), Some("2"));
        assert_eq!(chooser.persons().len(), 2);

        chooser.reset();
        assert_eq!(chooser.options().len(), 1);
        assert_eq!(chooser.options()[0].label, CHOOSER_PLACEHOLDER);
        assert_eq!(chooser.selected_value(), None);
    }

    #[test]
    fn test_chooser_select_unknown_keeps_selection() {
        let mut chooser = PersonChooser::new();
        chooser.push("1", "Alice");
        assert!(chooser.select("1"));
        assert!(!chooser.select("99"));
        assert_eq!(chooser.selected_value(), Some("1"));
    }

    #[test]
    fn test_person_table_display() {
        let mut table = PersonTable::new();
        table.set_rows(vec![
            TableRow {
                index: 1,
                name: "Alice".to_string(),
                image_count: 3,
            },
            TableRow {
                index: 2,
                name: "Bob".to_string(),
                image_count: 10,
            },
        ]);
        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Name"));
        assert!(lines[1].contains("Alice"));
        assert!(lines[1].trim_start().starts_with('1'));
        assert!(lines[2].trim_end().ends_with("10"));
    }
}
