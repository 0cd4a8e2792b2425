use super::form::ConverterForm;
use super::ui;
use crate::core::rates::RateTable;
use anyhow::{Result, bail};
use tracing::debug;

/// Renders the output regions of a form after a calculation.
pub fn render(form: &ConverterForm) -> String {
    let mut output = String::new();

    if let Some(preview) = form.rate_preview() {
        output.push_str(&format!(
            "{} {}\n",
            ui::style_text("Exchange rate:", ui::StyleType::Label),
            ui::style_text(&preview.to_string(), ui::StyleType::Preview)
        ));
    }

    match (form.result(), form.error()) {
        (Some(value), _) => output.push_str(&format!(
            "{} {} {}",
            ui::style_text("Converted amount:", ui::StyleType::Label),
            ui::style_text(value, ui::StyleType::Result),
            form.to_code()
        )),
        (None, Some(err)) => {
            output.push_str(&ui::style_text(&err.to_string(), ui::StyleType::Error))
        }
        (None, None) => {}
    }

    output
}

pub fn run(table: &RateTable, amount: &str, from: &str, to: &str, strict: bool) -> Result<()> {
    let mut form = ConverterForm::new(table);
    form.set_amount(amount);
    // Rejected selector text leaves the field empty, which fails validation below.
    form.input_from(from);
    form.input_to(to);
    form.calculate();
    debug!(amount, from, to, result = ?form.result(), "Converted");

    println!("{}", render(&form));

    if let (true, Some(err)) = (strict, form.error()) {
        bail!("{err}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::sample_table;

    fn calculated<'a>(table: &'a RateTable, amount: &str, from: &str, to: &str) -> ConverterForm<'a> {
        let mut form = ConverterForm::new(table);
        form.set_amount(amount);
        form.input_from(from);
        form.input_to(to);
        form.calculate();
        form
    }

    #[test]
    fn test_render_successful_conversion() {
        let table = sample_table();
        let output = console::strip_ansi_codes(&render(&calculated(&table, "100", "USD", "EUR")))
            .to_string();
        assert_eq!(
            output,
            "Exchange rate: 1 USD = 0.9000 EUR\nConverted amount: 90.00 EUR"
        );
    }

    #[test]
    fn test_render_validation_error() {
        let table = sample_table();
        let output = console::strip_ansi_codes(&render(&calculated(&table, "abc", "USD", "EUR")))
            .to_string();
        assert_eq!(
            output,
            "Exchange rate: 1 USD = 0.9000 EUR\nAmount must be digits, no commas (,)"
        );
    }

    #[test]
    fn test_render_rejected_selector() {
        let table = sample_table();
        let output = console::strip_ansi_codes(&render(&calculated(&table, "5", "US1", "EUR")))
            .to_string();
        assert_eq!(output, "Both currencies must be valid");
    }

    #[test]
    fn test_strict_mode_fails_on_validation_error() {
        let table = sample_table();
        let result = run(&table, "0", "USD", "EUR", true);
        assert_eq!(
            result.unwrap_err().to_string(),
            "Amount must be greater than 0"
        );
        assert!(run(&table, "0", "USD", "EUR", false).is_ok());
        assert!(run(&table, "1", "USD", "EUR", true).is_ok());
    }
}
