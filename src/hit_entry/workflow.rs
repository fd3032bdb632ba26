use chrono::NaiveDate;
use strum_macros::Display;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::hit_entry::draft::{FormRules, HitDraft, HitEvent, NumericField, ValidationError};
use crate::hit_entry::fields::{Direction, MenOnBase, OutcomeCategory};
use crate::store::{HitStore, RowId, StorageError, StorageResult};

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, Display)]
pub enum Step {
    #[strum(to_string = "select batter & date")]
    SelectBatterAndDate,
    #[strum(to_string = "enter hit")]
    EnterHit,
}

#[derive(Error, Debug, Eq, PartialEq, Clone)]
pub enum WorkflowError {
    #[error("Please select a batter.")]
    MissingBatter,

    #[error("Not available on the {actual} screen, go to {expected} first.")]
    WrongStep { expected: Step, actual: Step },

    #[error("The {0} outcome is not enabled for this form.")]
    CategoryDisabled(OutcomeCategory),

    #[error("Please select an outcome first.")]
    NoOutcomeChosen,

    #[error("\"{text}\" is not a {category} detail. Choose one of: {options}")]
    UnknownDetail {
        category: OutcomeCategory,
        text: String,
        options: String,
    },
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Error saving hit: {0}")]
    Storage(#[from] StorageError),
}

/// The row written by a successful submission.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct SavedHit {
    pub row_id: RowId,
    pub event: HitEvent,
}

/// Where one user is in the two-screen entry sequence, plus the form they
/// are filling in. Owned by a single session; never shared.
#[derive(Debug, Clone)]
pub struct WorkflowState {
    step: Step,
    draft: HitDraft,
}

impl WorkflowState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            step: Step::SelectBatterAndDate,
            draft: HitDraft::new("", today),
        }
    }

    pub const fn step(&self) -> Step {
        self.step
    }

    pub const fn draft(&self) -> &HitDraft {
        &self.draft
    }

    pub fn batter(&self) -> &str {
        &self.draft.batter
    }

    pub const fn game_date(&self) -> NaiveDate {
        self.draft.game_date
    }

    fn expect_step(&self, expected: Step) -> Result<(), WorkflowError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WorkflowError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    pub fn select_batter(&mut self, name: &str) -> Result<(), WorkflowError> {
        self.expect_step(Step::SelectBatterAndDate)?;
        self.draft.batter = name.trim().to_string();
        Ok(())
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), WorkflowError> {
        self.expect_step(Step::SelectBatterAndDate)?;
        self.draft.game_date = date;
        Ok(())
    }

    /// "Continue": moves to hit entry for the selected batter and date.
    pub fn proceed(&mut self) -> Result<(), WorkflowError> {
        self.expect_step(Step::SelectBatterAndDate)?;
        if self.draft.batter.trim().is_empty() {
            return Err(WorkflowError::MissingBatter);
        }
        self.draft.clear_outcome();
        self.step = Step::EnterHit;
        debug!(
            batter = %self.draft.batter,
            date = %self.draft.game_date,
            "Entering hits"
        );
        Ok(())
    }

    /// "Back": always returns to batter and date selection.
    pub fn back(&mut self) {
        if self.step != Step::SelectBatterAndDate {
            debug!(batter = %self.draft.batter, "Back to batter selection");
        }
        self.step = Step::SelectBatterAndDate;
    }

    pub fn set_count(&mut self, field: NumericField, value: i64) -> Result<(), WorkflowError> {
        self.expect_step(Step::EnterHit)?;
        let slot = match field {
            NumericField::Inning => &mut self.draft.inning,
            NumericField::PlateAppearance => &mut self.draft.plate_appearance,
            NumericField::Outs => &mut self.draft.outs,
            NumericField::Balls => &mut self.draft.balls,
            NumericField::Strikes => &mut self.draft.strikes,
        };
        *slot = value;
        Ok(())
    }

    pub fn set_men_on_base(&mut self, men_on_base: MenOnBase) -> Result<(), WorkflowError> {
        self.expect_step(Step::EnterHit)?;
        self.draft.men_on_base = men_on_base;
        Ok(())
    }

    /// Picks the outcome category. A detail chosen under another category is dropped.
    pub fn choose_outcome(
        &mut self,
        category: OutcomeCategory,
        rules: &FormRules,
    ) -> Result<(), WorkflowError> {
        self.expect_step(Step::EnterHit)?;
        if !rules.allows(category) {
            return Err(WorkflowError::CategoryDisabled(category));
        }
        if self
            .draft
            .outcome_detail
            .as_ref()
            .is_some_and(|d| d.category() != category)
        {
            self.draft.outcome_detail = None;
        }
        self.draft.outcome_category = Some(category);
        Ok(())
    }

    pub fn set_detail(&mut self, text: &str) -> Result<(), WorkflowError> {
        self.expect_step(Step::EnterHit)?;
        let category = self
            .draft
            .outcome_category
            .ok_or(WorkflowError::NoOutcomeChosen)?;
        let detail = category
            .parse_detail(text)
            .map_err(|_| WorkflowError::UnknownDetail {
                category,
                text: text.trim().to_string(),
                options: category.detail_options().join(", "),
            })?;
        self.draft.outcome_detail = Some(detail);
        Ok(())
    }

    pub fn set_direction(&mut self, direction: Option<Direction>) -> Result<(), WorkflowError> {
        self.expect_step(Step::EnterHit)?;
        self.draft.direction = direction;
        Ok(())
    }

    /// Validates the draft and appends it. On success the outcome and direction
    /// are cleared for the next entry; on any failure the draft is left as is.
    pub fn submit<S: HitStore + ?Sized>(
        &mut self,
        store: &S,
        rules: &FormRules,
    ) -> Result<SavedHit, SubmitError> {
        self.expect_step(Step::EnterHit)?;
        let event = self.draft.validate(rules)?;
        let row_id = store.append_hit_event(&event).map_err(|e| {
            warn!(batter = %event.batter, "Hit not saved: {}", e);
            e
        })?;
        info!(%row_id, batter = %event.batter, date = %event.game_date, "Hit saved");
        self.draft.clear_outcome();
        Ok(SavedHit { row_id, event })
    }

    /// Events already stored for the selected batter and date, oldest first.
    pub fn recorded_events<S: HitStore + ?Sized>(&self, store: &S) -> StorageResult<Vec<HitEvent>> {
        store.list_hit_events(self.batter().trim(), self.game_date())
    }
}
