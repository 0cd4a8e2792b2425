//! Interactive converter session
//!
//! Walks the user through the form one field at a time: the amount, the
//! source currency, then the target currency. Selector input starting with
//! `?` lists the matching codes without committing the field. Once all
//! fields are filled, an empty line runs the calculation.

use super::convert;
use super::form::{ConverterForm, Selector};
use super::ui;
use crate::core::rates::RateTable;
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::debug;

const SUGGESTIONS_PER_ROW: usize = 12;

const INSTRUCTIONS: &str = "1. Input the amount first\n\
                            2. Select currencies (type ?US to list codes starting with US)\n\
                            3. Calculate!";

const CODE_INPUT_ERROR: &str = "Currency codes are up to 3 letters";

const READY_HELP: &str = "[Enter] calculate, (a)mount, (f)rom, (t)o, (q)uit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Amount,
    Currency(Selector),
    Ready,
}

impl Stage {
    fn prompt(&self) -> &'static str {
        match self {
            Stage::Amount => "Amount: ",
            Stage::Currency(Selector::From) => "From: ",
            Stage::Currency(Selector::To) => "To: ",
            Stage::Ready => "> ",
        }
    }
}

pub struct Session<'a, R, W> {
    form: ConverterForm<'a>,
    stage: Stage,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(table: &'a RateTable, input: R, output: W) -> Self {
        Session {
            form: ConverterForm::new(table),
            stage: Stage::Amount,
            input,
            output,
        }
    }

    /// Runs until the user quits or input is exhausted.
    pub fn run(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "{}\n\n{}\n",
            ui::style_text("Currency Converter", ui::StyleType::Title),
            INSTRUCTIONS
        )?;

        loop {
            write!(self.output, "{}", self.stage.prompt())?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }
            if !self.handle_line(line.trim())? {
                break;
            }
        }

        debug!("Interactive session finished");
        Ok(())
    }

    /// Handles one line of input. Returns `false` once the user quits.
    fn handle_line(&mut self, line: &str) -> Result<bool> {
        match self.stage {
            Stage::Amount => {
                self.form.set_amount(line);
                self.stage = self.next_unfilled();
            }
            Stage::Currency(selector) => self.handle_selector(selector, line)?,
            Stage::Ready => match line {
                "" | "c" => {
                    self.form.calculate();
                    writeln!(self.output, "{}", convert::render(&self.form))?;
                }
                "a" => self.stage = Stage::Amount,
                "f" => self.stage = Stage::Currency(Selector::From),
                "t" => self.stage = Stage::Currency(Selector::To),
                "q" => return Ok(false),
                _ => writeln!(self.output, "{}", ui::style_text(READY_HELP, ui::StyleType::Subtle))?,
            },
        }
        Ok(true)
    }

    fn handle_selector(&mut self, selector: Selector, line: &str) -> Result<()> {
        if let Some(prefix) = line.strip_prefix('?') {
            let listing = match self.form.suggestions_for(prefix) {
                None => ui::style_text(CODE_INPUT_ERROR, ui::StyleType::Error),
                Some(codes) if codes.is_empty() => {
                    ui::style_text("No matching currencies", ui::StyleType::Subtle)
                }
                Some(codes) => ui::format_code_list(&codes, SUGGESTIONS_PER_ROW),
            };
            writeln!(self.output, "{listing}")?;
            return Ok(());
        }

        if !self.form.input(selector, line) {
            writeln!(
                self.output,
                "{}",
                ui::style_text(CODE_INPUT_ERROR, ui::StyleType::Error)
            )?;
            return Ok(());
        }

        if let Some(preview) = self.form.rate_preview() {
            writeln!(
                self.output,
                "{}",
                ui::style_text(&preview.to_string(), ui::StyleType::Preview)
            )?;
        }

        self.stage = self.next_unfilled();
        if self.stage == Stage::Ready {
            writeln!(self.output, "{}", ui::style_text(READY_HELP, ui::StyleType::Subtle))?;
        }
        Ok(())
    }

    fn next_unfilled(&self) -> Stage {
        if self.form.from_code().is_empty() {
            Stage::Currency(Selector::From)
        } else if self.form.to_code().is_empty() {
            Stage::Currency(Selector::To)
        } else {
            Stage::Ready
        }
    }

    pub fn form(&self) -> &ConverterForm<'a> {
        &self.form
    }
}

pub fn run(table: &RateTable) -> Result<()> {
    let stdin = std::io::stdin();
    let mut session = Session::new(table, stdin.lock(), console::Term::stdout());
    session.run()
}
