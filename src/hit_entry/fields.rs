use std::num::NonZeroU32;
use std::str::FromStr;

use bounded_integer::BoundedU8;
use serde::{Serialize, Serializer};
use strum::ParseError;
use strum_macros::{Display, EnumIter, EnumString};

pub type Inning = BoundedU8<1, 20>;
pub type Outs = BoundedU8<0, 2>;
pub type Balls = BoundedU8<0, 3>;
pub type Strikes = BoundedU8<0, 2>;
pub type PlateAppearanceNumber = NonZeroU32;

// Labels are what gets stored and shown, so they serialize as their display text.
macro_rules! serialize_as_label {
    ($($t:ty),+ $(,)?) => {$(
        impl Serialize for $t {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }
    )+};
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, Default, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum MenOnBase {
    #[default]
    #[strum(to_string = "None", serialize = "empty")]
    Empty,
    #[strum(to_string = "1B", serialize = "first")]
    First,
    #[strum(to_string = "2B", serialize = "second")]
    Second,
    #[strum(to_string = "3B", serialize = "third")]
    Third,
    #[strum(to_string = "1B & 2B", serialize = "1B&2B", serialize = "1B 2B")]
    FirstAndSecond,
    #[strum(to_string = "1B & 3B", serialize = "1B&3B", serialize = "1B 3B")]
    FirstAndThird,
    #[strum(to_string = "2B & 3B", serialize = "2B&3B", serialize = "2B 3B")]
    SecondAndThird,
    #[strum(to_string = "Bases Loaded", serialize = "loaded")]
    BasesLoaded,
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum OutcomeCategory {
    Out,
    #[strum(to_string = "On Base", serialize = "OnBase", serialize = "On-Base")]
    OnBase,
    Ball,
    Other,
}

impl OutcomeCategory {
    /// Ball and Other only appear in the broader form variant.
    pub const fn is_extended(self) -> bool {
        matches!(self, Self::Ball | Self::Other)
    }

    pub const fn requires_detail(self) -> bool {
        !matches!(self, Self::Other)
    }

    pub const fn detail_prompt(self) -> &'static str {
        match self {
            Self::Out => "How did the batter get out?",
            Self::OnBase => "How did the batter reach base?",
            Self::Ball => "Select ball outcome",
            Self::Other => "Describe outcome",
        }
    }

    pub fn detail_options(self) -> Vec<String> {
        use strum::IntoEnumIterator;
        match self {
            Self::Out => OutDetail::iter().map(|d| d.to_string()).collect(),
            Self::OnBase => OnBaseDetail::iter().map(|d| d.to_string()).collect(),
            Self::Ball => BallDetail::iter().map(|d| d.to_string()).collect(),
            Self::Other => vec![],
        }
    }

    /// Parses `text` in this category's vocabulary. Other takes any non-blank text.
    pub fn parse_detail(self, text: &str) -> Result<OutcomeDetail, ParseError> {
        let text = text.trim();
        match self {
            Self::Out => OutDetail::from_str(text).map(OutcomeDetail::Out),
            Self::OnBase => OnBaseDetail::from_str(text).map(OutcomeDetail::OnBase),
            Self::Ball => BallDetail::from_str(text).map(OutcomeDetail::Ball),
            Self::Other if text.is_empty() => Err(ParseError::VariantNotFound),
            Self::Other => Ok(OutcomeDetail::Other(text.to_string())),
        }
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum OutDetail {
    #[strum(to_string = "Strikeout", serialize = "K")]
    Strikeout,
    Groundout,
    Flyout,
    Lineout,
    Popup,
    #[strum(
        to_string = "Fielder's Choice",
        serialize = "Fielder's Choice (Out)",
        serialize = "Fielders Choice",
        serialize = "FC"
    )]
    FieldersChoice,
    #[strum(to_string = "Double Play", serialize = "DP")]
    DoublePlay,
    #[strum(to_string = "Other", serialize = "Other Out")]
    Other,
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum OnBaseDetail {
    Single,
    Double,
    Triple,
    #[strum(to_string = "Home Run", serialize = "HR")]
    HomeRun,
    #[strum(to_string = "Walk", serialize = "BB")]
    Walk,
    #[strum(to_string = "Hit By Pitch", serialize = "HBP")]
    HitByPitch,
    Error,
    #[strum(
        to_string = "Fielder's Choice (Safe)",
        serialize = "Fielders Choice (Safe)",
        serialize = "Fielder's Choice",
        serialize = "FC"
    )]
    FieldersChoiceSafe,
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum BallDetail {
    #[strum(to_string = "Ball", serialize = "Ball (Ball Count)")]
    Ball,
    #[strum(to_string = "Hit By Pitch", serialize = "HBP")]
    HitByPitch,
}

#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub enum OutcomeDetail {
    Out(OutDetail),
    OnBase(OnBaseDetail),
    Ball(BallDetail),
    Other(String),
}

impl std::fmt::Display for OutcomeDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Out(d) => write!(f, "{d}"),
            Self::OnBase(d) => write!(f, "{d}"),
            Self::Ball(d) => write!(f, "{d}"),
            Self::Other(text) => f.write_str(text),
        }
    }
}

impl OutcomeDetail {
    pub const fn category(&self) -> OutcomeCategory {
        match self {
            Self::Out(_) => OutcomeCategory::Out,
            Self::OnBase(_) => OutcomeCategory::OnBase,
            Self::Ball(_) => OutcomeCategory::Ball,
            Self::Other(_) => OutcomeCategory::Other,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    #[strum(to_string = "Left", serialize = "LF")]
    Left,
    #[strum(to_string = "Left-Center", serialize = "Left Center", serialize = "LC")]
    LeftCenter,
    #[strum(to_string = "Center", serialize = "CF")]
    Center,
    #[strum(to_string = "Right-Center", serialize = "Right Center", serialize = "RC")]
    RightCenter,
    #[strum(to_string = "Right", serialize = "RF")]
    Right,
    Infield,
    Foul,
}

serialize_as_label!(MenOnBase, OutcomeCategory, OutcomeDetail, Direction);
