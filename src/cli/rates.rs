use super::ui;
use crate::core::rates::RateTable;
use crate::core::validation::sanitize_code_input;
use anyhow::{Result, bail};
use comfy_table::Cell;

/// Renders the rate table, restricted to codes starting with `filter`.
pub fn display_rates(table: &RateTable, filter: Option<&str>) -> Result<String> {
    let prefix = match filter {
        Some(f) => match sanitize_code_input(f.trim()) {
            Some(prefix) => prefix,
            None => bail!("Currency filter must be up to 3 letters: {f}"),
        },
        None => String::new(),
    };

    let rows: Vec<(&str, f64)> = table
        .iter()
        .filter(|(code, _)| code.starts_with(&prefix))
        .collect();
    if rows.is_empty() {
        return Ok(format!("No currencies match \"{prefix}\"."));
    }

    let mut rates_table = ui::new_styled_table();
    rates_table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Rate (1 {})", table.base_code())),
    ]);
    for (code, rate) in rows {
        rates_table.add_row(vec![Cell::new(code), ui::rate_cell(rate)]);
    }

    let mut output = format!(
        "{}\n\n",
        ui::style_text("Exchange Rates", ui::StyleType::Title)
    );
    output.push_str(&rates_table.to_string());
    if let Some(updated_at) = table.updated_at() {
        output.push_str(&format!(
            "\n\n{}",
            ui::style_text(
                &format!("Last updated: {}", updated_at.format("%Y-%m-%d %H:%M UTC")),
                ui::StyleType::Subtle
            )
        ));
    }
    Ok(output)
}

pub fn run(table: &RateTable, filter: Option<&str>) -> Result<()> {
    println!("{}", display_rates(table, filter)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::sample_table;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_display_all_rates() {
        let table = sample_table();
        let output = display_rates(&table, None).unwrap();
        for code in table.codes() {
            assert!(output.contains(code), "missing {code}");
        }
        assert!(output.contains("Rate (1 USD)"));
        assert!(output.contains("151.3700"));
        assert!(!output.contains("ZWL"));
        assert!(!output.contains("Last updated"));
    }

    #[test]
    fn test_display_filtered_rates() {
        let table = sample_table().with_updated_at(Utc.with_ymd_and_hms(2024, 6, 25, 0, 0, 1).single());
        let output = display_rates(&table, Some("us")).unwrap();
        assert!(output.contains("USD"));
        assert!(output.contains("USN"));
        assert!(!output.contains("EUR"));
        assert!(output.contains("Last updated: 2024-06-25 00:00 UTC"));
    }

    #[test]
    fn test_display_no_match() {
        let table = sample_table();
        assert_eq!(
            display_rates(&table, Some("Q")).unwrap(),
            "No currencies match \"Q\"."
        );
    }

    #[test]
    fn test_invalid_filter() {
        let table = sample_table();
        assert!(display_rates(&table, Some("US1")).is_err());
        assert!(display_rates(&table, Some("EURO")).is_err());
    }
}
