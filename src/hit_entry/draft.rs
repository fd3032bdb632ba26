use std::num::NonZeroU32;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::hit_entry::fields::{
    Balls, Direction, Inning, MenOnBase, OutcomeCategory, OutcomeDetail, Outs,
    PlateAppearanceNumber, Strikes,
};

/// Submission rules that differ between deployments of the form.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Default)]
pub struct FormRules {
    /// Refuse submission until a direction has been chosen.
    pub require_direction: bool,
    /// Offer the Ball and Other outcome categories.
    pub extended_outcomes: bool,
}

impl FormRules {
    pub const fn allows(&self, category: OutcomeCategory) -> bool {
        self.extended_outcomes || !category.is_extended()
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum NumericField {
    Inning,
    #[strum(serialize = "pa_number")]
    PlateAppearance,
    Outs,
    Balls,
    Strikes,
}

#[derive(Error, Debug, Eq, PartialEq, Clone)]
pub enum ValidationError {
    #[error("Please select an outcome.")]
    MissingOutcome,

    #[error("The {0} outcome is not enabled for this form.")]
    CategoryDisabled(OutcomeCategory),

    #[error("Please select an outcome detail for {0}.")]
    MissingDetail(OutcomeCategory),

    #[error("Please select a direction.")]
    MissingDirection,

    #[error("{field} must be between {min} and {max}, got {value}.")]
    OutOfRange {
        field: NumericField,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Please select a batter.")]
    MissingBatter,
}

/// One recorded plate appearance event, ready to persist.
#[derive(Debug, Eq, PartialEq, Clone, Serialize)]
pub struct HitEvent {
    pub batter: String,
    #[serde(rename = "date")]
    pub game_date: NaiveDate,
    pub inning: Inning,
    #[serde(rename = "pa_number")]
    pub plate_appearance: PlateAppearanceNumber,
    pub outs: Outs,
    pub balls: Balls,
    pub strikes: Strikes,
    pub men_on_base: MenOnBase,
    pub outcome_category: OutcomeCategory,
    pub outcome_detail: Option<OutcomeDetail>,
    pub direction: Option<Direction>,
}

/// The hit form as the user is filling it in. Counts stay unbounded here so
/// that bad entries are reported at submission instead of being clamped.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct HitDraft {
    pub batter: String,
    pub game_date: NaiveDate,
    pub inning: i64,
    pub plate_appearance: i64,
    pub outs: i64,
    pub balls: i64,
    pub strikes: i64,
    pub men_on_base: MenOnBase,
    pub outcome_category: Option<OutcomeCategory>,
    pub outcome_detail: Option<OutcomeDetail>,
    pub direction: Option<Direction>,
}

const INNING_RANGE: (i64, i64) = (1, 20);
const PLATE_APPEARANCE_RANGE: (i64, i64) = (1, u32::MAX as i64);
const OUTS_RANGE: (i64, i64) = (0, 2);
const BALLS_RANGE: (i64, i64) = (0, 3);
const STRIKES_RANGE: (i64, i64) = (0, 2);

fn bounded<T>(
    field: NumericField,
    value: i64,
    (min, max): (i64, i64),
    make: impl FnOnce(u32) -> Option<T>,
) -> Result<T, ValidationError> {
    let out_of_range = ValidationError::OutOfRange {
        field,
        value,
        min,
        max,
    };
    if !(min..=max).contains(&value) {
        return Err(out_of_range);
    }
    u32::try_from(value)
        .ok()
        .and_then(make)
        .ok_or(out_of_range)
}

fn small<T>(make: fn(u8) -> Option<T>) -> impl FnOnce(u32) -> Option<T> {
    move |v| u8::try_from(v).ok().and_then(make)
}

impl HitDraft {
    pub fn new(batter: impl Into<String>, game_date: NaiveDate) -> Self {
        Self {
            batter: batter.into(),
            game_date,
            inning: INNING_RANGE.0,
            plate_appearance: PLATE_APPEARANCE_RANGE.0,
            outs: OUTS_RANGE.0,
            balls: BALLS_RANGE.0,
            strikes: STRIKES_RANGE.0,
            men_on_base: MenOnBase::default(),
            outcome_category: None,
            outcome_detail: None,
            direction: None,
        }
    }

    /// Forgets the outcome and direction, keeping the situation fields.
    pub fn clear_outcome(&mut self) {
        self.outcome_category = None;
        self.outcome_detail = None;
        self.direction = None;
    }

    /// Checks every required field and range. Nothing is written by this call.
    pub fn validate(&self, rules: &FormRules) -> Result<HitEvent, ValidationError> {
        let category = self.outcome_category.ok_or(ValidationError::MissingOutcome)?;
        if !rules.allows(category) {
            return Err(ValidationError::CategoryDisabled(category));
        }

        let detail = self
            .outcome_detail
            .clone()
            .filter(|d| d.category() == category);
        if detail.is_none() && category.requires_detail() {
            return Err(ValidationError::MissingDetail(category));
        }

        if rules.require_direction && self.direction.is_none() {
            return Err(ValidationError::MissingDirection);
        }

        let inning = bounded(
            NumericField::Inning,
            self.inning,
            INNING_RANGE,
            small(Inning::new),
        )?;
        let plate_appearance = bounded(
            NumericField::PlateAppearance,
            self.plate_appearance,
            PLATE_APPEARANCE_RANGE,
            NonZeroU32::new,
        )?;
        let outs = bounded(NumericField::Outs, self.outs, OUTS_RANGE, small(Outs::new))?;
        let balls = bounded(NumericField::Balls, self.balls, BALLS_RANGE, small(Balls::new))?;
        let strikes = bounded(
            NumericField::Strikes,
            self.strikes,
            STRIKES_RANGE,
            small(Strikes::new),
        )?;

        let batter = self.batter.trim();
        if batter.is_empty() {
            return Err(ValidationError::MissingBatter);
        }

        Ok(HitEvent {
            batter: batter.to_string(),
            game_date: self.game_date,
            inning,
            plate_appearance,
            outs,
            balls,
            strikes,
            men_on_base: self.men_on_base,
            outcome_category: category,
            outcome_detail: detail,
            direction: self.direction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hit_entry::fields::{OnBaseDetail, OutDetail};

    fn game_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn smith_single() -> HitDraft {
        HitDraft {
            batter: "Smith".to_string(),
            game_date: game_date(),
            inning: 3,
            plate_appearance: 2,
            outs: 1,
            balls: 2,
            strikes: 1,
            men_on_base: MenOnBase::First,
            outcome_category: Some(OutcomeCategory::OnBase),
            outcome_detail: Some(OutcomeDetail::OnBase(OnBaseDetail::Single)),
            direction: Some(Direction::LeftCenter),
        }
    }

    fn smith_single_with(field: NumericField, value: i64) -> HitDraft {
        let mut draft = smith_single();
        match field {
            NumericField::Inning => draft.inning = value,
            NumericField::PlateAppearance => draft.plate_appearance = value,
            NumericField::Outs => draft.outs = value,
            NumericField::Balls => draft.balls = value,
            NumericField::Strikes => draft.strikes = value,
        }
        draft
    }

    #[test]
    fn test_valid_draft_becomes_event() {
        let event = smith_single().validate(&FormRules::default()).unwrap();
        assert_eq!(event.batter, "Smith");
        assert_eq!(event.inning.get(), 3);
        assert_eq!(event.plate_appearance.get(), 2);
        assert_eq!(event.outs.get(), 1);
        assert_eq!(event.balls.get(), 2);
        assert_eq!(event.strikes.get(), 1);
        assert_eq!(event.men_on_base, MenOnBase::First);
        assert_eq!(event.outcome_category, OutcomeCategory::OnBase);
        assert_eq!(event.direction, Some(Direction::LeftCenter));
    }

    #[test]
    fn test_missing_outcome_wins_over_everything_else() {
        let mut draft = smith_single();
        draft.outcome_category = None;
        draft.outcome_detail = None;
        draft.batter = String::new();
        draft.outs = 9;
        let rules = FormRules {
            require_direction: true,
            extended_outcomes: false,
        };
        draft.direction = None;
        assert_eq!(draft.validate(&rules), Err(ValidationError::MissingOutcome));
    }

    #[test]
    fn test_missing_detail_for_out_and_on_base() {
        let mut draft = smith_single();
        draft.outcome_detail = None;
        assert_eq!(
            draft.validate(&FormRules::default()),
            Err(ValidationError::MissingDetail(OutcomeCategory::OnBase))
        );

        draft.outcome_category = Some(OutcomeCategory::Out);
        assert_eq!(
            draft.validate(&FormRules::default()),
            Err(ValidationError::MissingDetail(OutcomeCategory::Out))
        );
    }

    #[test]
    fn test_detail_from_another_category_counts_as_missing() {
        let mut draft = smith_single();
        draft.outcome_category = Some(OutcomeCategory::Out);
        assert_eq!(
            draft.validate(&FormRules::default()),
            Err(ValidationError::MissingDetail(OutcomeCategory::Out))
        );
        draft.outcome_detail = Some(OutcomeDetail::Out(OutDetail::Flyout));
        assert!(draft.validate(&FormRules::default()).is_ok());
    }

    #[test]
    fn test_direction_only_required_when_configured() {
        let mut draft = smith_single();
        draft.direction = None;
        let event = draft.validate(&FormRules::default()).unwrap();
        assert_eq!(event.direction, None);

        let strict = FormRules {
            require_direction: true,
            ..FormRules::default()
        };
        assert_eq!(draft.validate(&strict), Err(ValidationError::MissingDirection));
    }

    #[test]
    fn test_extended_categories_need_toggle() {
        let mut draft = smith_single();
        draft.outcome_category = Some(OutcomeCategory::Other);
        draft.outcome_detail = None;
        assert_eq!(
            draft.validate(&FormRules::default()),
            Err(ValidationError::CategoryDisabled(OutcomeCategory::Other))
        );

        let extended = FormRules {
            extended_outcomes: true,
            ..FormRules::default()
        };
        let event = draft.validate(&extended).unwrap();
        assert_eq!(event.outcome_detail, None);

        draft.outcome_category = Some(OutcomeCategory::Ball);
        assert_eq!(
            draft.validate(&extended),
            Err(ValidationError::MissingDetail(OutcomeCategory::Ball))
        );
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let cases = [
            (NumericField::Inning, 1, 20),
            (NumericField::PlateAppearance, 1, 500),
            (NumericField::Outs, 0, 2),
            (NumericField::Balls, 0, 3),
            (NumericField::Strikes, 0, 2),
        ];
        for (field, low, high) in cases {
            for value in [low, high] {
                let draft = smith_single_with(field, value);
                assert!(
                    draft.validate(&FormRules::default()).is_ok(),
                    "{field} = {value} rejected"
                );
            }
        }
    }

    #[test]
    fn test_values_outside_bounds_are_rejected() {
        let cases = [
            (NumericField::Inning, vec![0, 21, -1]),
            (
                NumericField::PlateAppearance,
                vec![0, -4, i64::from(u32::MAX) + 1],
            ),
            (NumericField::Outs, vec![-1, 3]),
            (NumericField::Balls, vec![-1, 4]),
            (NumericField::Strikes, vec![-1, 3]),
        ];
        for (field, values) in cases {
            for value in values {
                let result = smith_single_with(field, value).validate(&FormRules::default());
                assert!(
                    matches!(result, Err(ValidationError::OutOfRange { field: f, .. }) if f == field),
                    "{field} = {value} accepted"
                );
            }
        }
    }

    #[test]
    fn test_out_of_range_reports_bounds() {
        let mut draft = smith_single();
        draft.balls = 4;
        assert_eq!(
            draft.validate(&FormRules::default()),
            Err(ValidationError::OutOfRange {
                field: NumericField::Balls,
                value: 4,
                min: 0,
                max: 3
            })
        );
        assert_eq!(
            draft.validate(&FormRules::default()).unwrap_err().to_string(),
            "balls must be between 0 and 3, got 4."
        );
    }

    #[test]
    fn test_blank_batter_is_rejected_and_names_are_trimmed() {
        let mut draft = smith_single();
        draft.batter = "   ".to_string();
        assert_eq!(
            draft.validate(&FormRules::default()),
            Err(ValidationError::MissingBatter)
        );
        draft.batter = "  Smith ".to_string();
        assert_eq!(draft.validate(&FormRules::default()).unwrap().batter, "Smith");
    }

    #[test]
    fn test_new_draft_uses_lowest_legal_values() {
        let draft = HitDraft::new("Jones", game_date());
        assert_eq!(
            (draft.inning, draft.plate_appearance, draft.outs, draft.balls, draft.strikes),
            (1, 1, 0, 0, 0)
        );
        assert_eq!(draft.men_on_base, MenOnBase::Empty);
        assert_eq!(
            draft.validate(&FormRules::default()),
            Err(ValidationError::MissingOutcome)
        );
    }
}
