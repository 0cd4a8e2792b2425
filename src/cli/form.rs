//! Converter form state
//!
//! Holds the input fields and output regions of the converter and reacts to
//! user events the way the widgets of a form would: selector keystrokes are
//! filtered and refresh the suggestion lists and the live-rate preview, and
//! [`ConverterForm::calculate`] runs validation and conversion.

use crate::core::conversion::{self, RatePreview};
use crate::core::rates::RateTable;
use crate::core::validation::{self, ValidationError};

/// Which currency selector an event targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    From,
    To,
}

pub struct ConverterForm<'a> {
    table: &'a RateTable,
    amount: String,
    from_code: String,
    to_code: String,
    from_suggestions: Vec<String>,
    to_suggestions: Vec<String>,
    rate_preview: Option<RatePreview>,
    result: Option<String>,
    error: Option<ValidationError>,
}

impl<'a> ConverterForm<'a> {
    pub fn new(table: &'a RateTable) -> Self {
        let all_codes = table.codes_with_prefix("");
        ConverterForm {
            table,
            amount: String::new(),
            from_code: String::new(),
            to_code: String::new(),
            from_suggestions: all_codes.clone(),
            to_suggestions: all_codes,
            rate_preview: None,
            result: None,
            error: None,
        }
    }

    pub fn set_amount(&mut self, text: &str) {
        self.amount = text.to_string();
    }

    /// Applies new selector text. Returns `false` when the text is rejected,
    /// in which case the form is left untouched.
    pub fn input(&mut self, selector: Selector, text: &str) -> bool {
        let Some(code) = validation::sanitize_code_input(text) else {
            return false;
        };
        match selector {
            Selector::From => self.from_code = code,
            Selector::To => self.to_code = code,
        }
        self.from_suggestions = self.table.codes_with_prefix(&self.from_code);
        self.to_suggestions = self.table.codes_with_prefix(&self.to_code);
        self.refresh_preview();
        true
    }

    pub fn input_from(&mut self, text: &str) -> bool {
        self.input(Selector::From, text)
    }

    pub fn input_to(&mut self, text: &str) -> bool {
        self.input(Selector::To, text)
    }

    /// Recomputes the live-rate preview from the selectors.
    ///
    /// A selector that is empty clears the preview. An incomplete or unknown
    /// code keeps whatever preview was last shown.
    pub fn refresh_preview(&mut self) {
        let is_alpha = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_alphabetic());
        if !(is_alpha(&self.from_code) && is_alpha(&self.to_code)) {
            self.rate_preview = None;
            return;
        }
        if let Some(preview) = conversion::rate_preview(self.table, &self.from_code, &self.to_code)
        {
            self.rate_preview = Some(preview);
        }
    }

    /// The "Calculate" action.
    pub fn calculate(&mut self) {
        match validation::validate(self.table, &self.amount, &self.from_code, &self.to_code) {
            Ok(request) => {
                let result = conversion::execute(&request);
                self.result = Some(result.to_string());
                self.error = None;
            }
            Err(e) => {
                self.result = None;
                self.error = Some(e);
            }
        }
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn from_code(&self) -> &str {
        &self.from_code
    }

    pub fn to_code(&self) -> &str {
        &self.to_code
    }

    pub fn suggestions(&self, selector: Selector) -> &[String] {
        match selector {
            Selector::From => &self.from_suggestions,
            Selector::To => &self.to_suggestions,
        }
    }

    /// Codes a selector would suggest for `text`, without changing any field.
    /// `None` when the selector would reject the text.
    pub fn suggestions_for(&self, text: &str) -> Option<Vec<String>> {
        validation::sanitize_code_input(text).map(|prefix| self.table.codes_with_prefix(&prefix))
    }

    pub fn from_suggestions(&self) -> &[String] {
        self.suggestions(Selector::From)
    }

    pub fn to_suggestions(&self) -> &[String] {
        self.suggestions(Selector::To)
    }

    pub fn rate_preview(&self) -> Option<&RatePreview> {
        self.rate_preview.as_ref()
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }
}
