//! The interactive two-screen entry session.
//!
//! Every input line is one user action. The action is applied to the
//! [`WorkflowState`], at most one store call is made, and the current screen
//! is drawn again. Errors are reported inline and never end the session.

use std::fmt::Display;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::hit_entry::fields::{Direction, MenOnBase, OutcomeCategory};
use crate::hit_entry::{FormRules, HitEvent, NumericField, Step, SubmitError, WorkflowState};
use crate::store::HitStore;
use crate::util::{join_words, parse_label};

mod command;
mod render;

use command::{SessionCommand, SessionLine};
pub use render::events_table;

enum Notice {
    Success(String),
    Warning(String),
    Error(String),
}

impl Notice {
    fn warning(e: impl Display) -> Self {
        Self::Warning(e.to_string())
    }

    fn error(e: impl Display) -> Self {
        Self::Error(e.to_string())
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success(m) => write!(f, "OK: {m}"),
            Self::Warning(m) => write!(f, "Warning: {m}"),
            Self::Error(m) => write!(f, "Error: {m}"),
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

pub struct Session<'a, S: HitStore + ?Sized> {
    store: &'a S,
    rules: FormRules,
    state: WorkflowState,
    batters: Vec<String>,
    recorded: Vec<HitEvent>,
}

impl<'a, S: HitStore + ?Sized> Session<'a, S> {
    pub fn new(store: &'a S, rules: FormRules, today: NaiveDate) -> Self {
        Self {
            store,
            rules,
            state: WorkflowState::new(today),
            batters: vec![],
            recorded: vec![],
        }
    }

    #[cfg(test)]
    pub const fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// Reads actions until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<()> {
        writeln!(out, "Hitting Chart")?;
        if let Err(notice) = self.reload_batters() {
            writeln!(out, "{notice}")?;
        }
        self.render(out)?;

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input
                .read_until(b'\n', &mut buf)
                .context("Failed to read session input")?
                == 0
            {
                break;
            }
            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line,
                Err(e) => {
                    warn!("Ignoring unreadable input line: {}", e);
                    writeln!(out, "{}", Notice::Error(format!("Input is not valid text: {e}")))?;
                    continue;
                }
            };
            let command = match SessionLine::parse_line(line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    write!(out, "{e}")?;
                    continue;
                }
            };
            debug!(?command, step = %self.state.step(), "Session action");
            if let Flow::Quit = self.apply(command, out)? {
                break;
            }
            self.render(out)?;
        }
        out.flush()?;
        Ok(())
    }

    fn apply<W: Write>(&mut self, command: SessionCommand, out: &mut W) -> Result<Flow> {
        if command == SessionCommand::Quit {
            return Ok(Flow::Quit);
        }
        match self.handle(command) {
            Ok(Some(notice)) | Err(notice) => writeln!(out, "{notice}")?,
            Ok(None) => {}
        }
        Ok(Flow::Continue)
    }

    fn handle(&mut self, command: SessionCommand) -> Result<Option<Notice>, Notice> {
        let rules = self.rules;
        let state = &mut self.state;
        match command {
            SessionCommand::Batter { name } => {
                let name = join_words(&name);
                state.select_batter(&name).map_err(Notice::warning)?;
                if !self.batters.is_empty() && !self.batters.contains(&name) {
                    return Ok(Some(Notice::Warning(format!(
                        "{name} is not a registered batter; hits will still be recorded under this name."
                    ))));
                }
            }
            SessionCommand::Date { date } => state.select_date(date).map_err(Notice::warning)?,
            SessionCommand::Batters => self.reload_batters()?,
            SessionCommand::Continue => {
                state.proceed().map_err(Notice::warning)?;
                self.reload_recorded()?;
            }
            SessionCommand::Inning { value } => set_count(state, NumericField::Inning, value)?,
            SessionCommand::Pa { value } => set_count(state, NumericField::PlateAppearance, value)?,
            SessionCommand::Outs { value } => set_count(state, NumericField::Outs, value)?,
            SessionCommand::Balls { value } => set_count(state, NumericField::Balls, value)?,
            SessionCommand::Strikes { value } => set_count(state, NumericField::Strikes, value)?,
            SessionCommand::Runners { value } => {
                let men_on_base =
                    parse_label::<MenOnBase>("men on base", &value).map_err(Notice::warning)?;
                state.set_men_on_base(men_on_base).map_err(Notice::warning)?;
            }
            SessionCommand::Outcome { value } => {
                let category =
                    parse_label::<OutcomeCategory>("outcome", &value).map_err(Notice::warning)?;
                state.choose_outcome(category, &rules).map_err(Notice::warning)?;
            }
            SessionCommand::Detail { value } => {
                state.set_detail(&join_words(&value)).map_err(Notice::warning)?;
            }
            SessionCommand::Direction { value } => {
                let direction = if join_words(&value).eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(parse_label::<Direction>("direction", &value).map_err(Notice::warning)?)
                };
                state.set_direction(direction).map_err(Notice::warning)?;
            }
            SessionCommand::Submit => {
                let saved = state.submit(self.store, &rules).map_err(|e| match e {
                    SubmitError::Storage(_) => Notice::error(e),
                    _ => Notice::warning(e),
                })?;
                self.recorded.push(saved.event);
                return Ok(Some(Notice::Success("Hit saved!".to_string())));
            }
            SessionCommand::Show => {
                if state.step() != Step::EnterHit {
                    return Err(Notice::Warning(
                        "Select a batter and continue to see recorded hits.".to_string(),
                    ));
                }
                self.reload_recorded()?;
            }
            SessionCommand::Back => {
                state.back();
                self.recorded.clear();
            }
            SessionCommand::Quit => {}
        }
        Ok(None)
    }

    fn reload_batters(&mut self) -> Result<(), Notice> {
        match self.store.list_batter_names() {
            Ok(names) => {
                self.batters = names;
                Ok(())
            }
            Err(e) => {
                warn!("Error loading batters: {}", e);
                self.batters.clear();
                Err(Notice::Error(format!("Error loading batters: {e}")))
            }
        }
    }

    fn reload_recorded(&mut self) -> Result<(), Notice> {
        self.recorded = self.state.recorded_events(self.store).map_err(|e| {
            warn!("Error loading hits: {}", e);
            Notice::Error(format!("Error loading hits: {e}"))
        })?;
        Ok(())
    }

    fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        match self.state.step() {
            Step::SelectBatterAndDate => render::select_screen(out, self.state.draft(), &self.batters),
            Step::EnterHit => {
                render::hit_screen(out, self.state.draft(), &self.rules, &self.recorded)
            }
        }
    }
}

fn set_count(state: &mut WorkflowState, field: NumericField, value: i64) -> Result<(), Notice> {
    state.set_count(field, value).map_err(Notice::warning)
}
