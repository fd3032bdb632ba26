use std::io::Write;

use anyhow::Result;
use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::hit_entry::fields::OutcomeCategory;
use crate::hit_entry::{FormRules, HitDraft, HitEvent};

const SELECT_COMMANDS: &str =
    "batter <name>, date <YYYY-MM-DD|today>, continue, batters, help, quit";
const HIT_COMMANDS: &str = "inning, pa, outs, balls, strikes, runners, outcome, detail, direction, submit, show, back, help, quit";

pub fn select_screen<W: Write>(out: &mut W, draft: &HitDraft, batters: &[String]) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "== Select batter & date ==")?;
    if batters.is_empty() {
        writeln!(out, "Known batters: (none registered)")?;
    } else {
        writeln!(out, "Known batters: {}", batters.iter().join(", "))?;
    }
    let batter = if draft.batter.is_empty() {
        "(not selected)"
    } else {
        draft.batter.as_str()
    };
    writeln!(out, "Batter: {batter}")?;
    writeln!(out, "Game date: {}", draft.game_date)?;
    writeln!(out, "Commands: {SELECT_COMMANDS}")?;
    Ok(())
}

pub fn hit_screen<W: Write>(
    out: &mut W,
    draft: &HitDraft,
    rules: &FormRules,
    recorded: &[HitEvent],
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "== Enter hit: {} on {} ==", draft.batter, draft.game_date)?;
    writeln!(
        out,
        "Inning {} | PA {} | Outs {} | Count {}-{} | Men on base: {}",
        draft.inning, draft.plate_appearance, draft.outs, draft.balls, draft.strikes, draft.men_on_base
    )?;

    match draft.outcome_category {
        None => {
            let offered = OutcomeCategory::iter()
                .filter(|c| rules.allows(*c))
                .join(", ");
            writeln!(out, "Outcome: (not selected) [{offered}]")?;
        }
        Some(category) => {
            let detail = draft
                .outcome_detail
                .as_ref()
                .filter(|d| d.category() == category)
                .map_or_else(|| "(not selected)".to_string(), ToString::to_string);
            writeln!(out, "Outcome: {category}")?;
            let options = category.detail_options();
            if options.is_empty() {
                writeln!(out, "  {}: {detail}", category.detail_prompt())?;
            } else {
                writeln!(
                    out,
                    "  {} {detail} [{}]",
                    category.detail_prompt(),
                    options.join(", ")
                )?;
            }
        }
    }

    match draft.direction {
        Some(direction) => writeln!(out, "Direction Selected: {direction}")?,
        None if rules.require_direction => writeln!(out, "Direction: (required, not selected)")?,
        None => writeln!(out, "Direction: (not selected)")?,
    }

    writeln!(out, "Recorded for {} on {}:", draft.batter, draft.game_date)?;
    events_table(out, recorded)?;
    writeln!(out, "Commands: {HIT_COMMANDS}")?;
    Ok(())
}

/// Recorded events, oldest first, one row each.
pub fn events_table<W: Write>(out: &mut W, events: &[HitEvent]) -> Result<()> {
    if events.is_empty() {
        writeln!(out, "  (no hits recorded)")?;
        return Ok(());
    }
    writeln!(
        out,
        "  {:>3}  {:>3}  {:>3}  {:>4}  {:<5}  {:<12}  {:<34}  {}",
        "#", "Inn", "PA", "Outs", "Count", "On base", "Outcome", "Direction"
    )?;
    for (i, event) in events.iter().enumerate() {
        let outcome = match &event.outcome_detail {
            Some(detail) => format!("{} / {detail}", event.outcome_category),
            None => event.outcome_category.to_string(),
        };
        let direction = event
            .direction
            .map_or_else(|| "-".to_string(), |d| d.to_string());
        writeln!(
            out,
            "  {:>3}  {:>3}  {:>3}  {:>4}  {:<5}  {:<12}  {:<34}  {}",
            i + 1,
            event.inning.get(),
            event.plate_appearance,
            event.outs.get(),
            format!("{}-{}", event.balls.get(), event.strikes.get()),
            event.men_on_base.to_string(),
            outcome,
            direction
        )?;
    }
    Ok(())
}
