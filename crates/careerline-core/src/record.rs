// Season records: the raw per-player, per-year rows fed to the normalizer.
//
// A record carries a small fixed header (name, year, team) and an open set of
// statistic and award fields. Field values are an explicit tagged union so
// callers never compare loosely typed values the way the source data does
// (`"Career"` in a numeric year column, awards as booleans or `"n/a"`).

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Text marking an aggregate career row in the year column.
pub const CAREER_MARKER: &str = "Career";

/// Text marking an award that does not apply to the player for that season.
pub const NOT_APPLICABLE_MARKER: &str = "n/a";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("invalid year `{0}`: expected a positive season or \"Career\"")]
    InvalidYear(String),
}

// ---------------------------------------------------------------------------
// SeasonYear
// ---------------------------------------------------------------------------

/// The year column of a record: either a real season or the career
/// aggregate marker, which the normalizer always drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeasonYear {
    Season(u16),
    Career,
}

impl SeasonYear {
    /// The season number, or `None` for the career marker.
    pub fn season(self) -> Option<u16> {
        match self {
            SeasonYear::Season(year) => Some(year),
            SeasonYear::Career => None,
        }
    }

    pub fn is_career(self) -> bool {
        matches!(self, SeasonYear::Career)
    }
}

impl fmt::Display for SeasonYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeasonYear::Season(year) => write!(f, "{year}"),
            SeasonYear::Career => f.write_str(CAREER_MARKER),
        }
    }
}

impl FromStr for SeasonYear {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(CAREER_MARKER) {
            return Ok(SeasonYear::Career);
        }
        match trimmed.parse::<u16>() {
            Ok(year) if year > 0 => Ok(SeasonYear::Season(year)),
            _ => Err(RecordError::InvalidYear(s.to_string())),
        }
    }
}

impl Serialize for SeasonYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SeasonYear::Season(year) => serializer.serialize_u16(*year),
            SeasonYear::Career => serializer.serialize_str(CAREER_MARKER),
        }
    }
}

impl<'de> Deserialize<'de> for SeasonYear {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct YearVisitor;

        impl<'de> Visitor<'de> for YearVisitor {
            type Value = SeasonYear;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a positive season year or \"Career\"")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<SeasonYear, E> {
                match u16::try_from(v) {
                    Ok(year) if year > 0 => Ok(SeasonYear::Season(year)),
                    _ => Err(E::invalid_value(Unexpected::Unsigned(v), &self)),
                }
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<SeasonYear, E> {
                match u64::try_from(v) {
                    Ok(unsigned) => self.visit_u64(unsigned),
                    Err(_) => Err(E::invalid_value(Unexpected::Signed(v), &self)),
                }
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<SeasonYear, E> {
                if v.fract() == 0.0 && v > 0.0 && v <= f64::from(u16::MAX) {
                    Ok(SeasonYear::Season(v as u16))
                } else {
                    Err(E::invalid_value(Unexpected::Float(v), &self))
                }
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<SeasonYear, E> {
                v.parse()
                    .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(YearVisitor)
    }
}

// ---------------------------------------------------------------------------
// Field values
// ---------------------------------------------------------------------------

/// Whether a player won an award (or led the league in a stat) for a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AwardStatus {
    Won,
    NotWon,
    NotApplicable,
}

impl AwardStatus {
    pub fn is_won(self) -> bool {
        self == AwardStatus::Won
    }
}

/// A single statistic or flag value on a record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Flag(bool),
    NotApplicable,
    Text(String),
}

impl FieldValue {
    /// Interpret a raw text cell (CSV input). Empty cells are absent.
    pub fn parse_cell(cell: &str) -> Option<FieldValue> {
        let cell = cell.trim();
        if cell.is_empty() {
            return None;
        }
        if cell.eq_ignore_ascii_case(NOT_APPLICABLE_MARKER) {
            return Some(FieldValue::NotApplicable);
        }
        if cell.eq_ignore_ascii_case("true") {
            return Some(FieldValue::Flag(true));
        }
        if cell.eq_ignore_ascii_case("false") {
            return Some(FieldValue::Flag(false));
        }
        match cell.parse::<f64>() {
            Ok(n) if n.is_finite() => Some(FieldValue::Number(n)),
            _ => Some(FieldValue::Text(cell.to_string())),
        }
    }

    /// Interpret a JSON string value. Unlike CSV cells, numbers arriving as
    /// strings stay text.
    fn from_json_str(s: &str) -> FieldValue {
        if s.eq_ignore_ascii_case(NOT_APPLICABLE_MARKER) {
            FieldValue::NotApplicable
        } else {
            FieldValue::Text(s.to_string())
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn award_status(&self) -> AwardStatus {
        match self {
            FieldValue::Flag(true) => AwardStatus::Won,
            FieldValue::Flag(false) => AwardStatus::NotWon,
            FieldValue::Number(n) if *n != 0.0 => AwardStatus::Won,
            FieldValue::Number(_) => AwardStatus::NotWon,
            FieldValue::NotApplicable => AwardStatus::NotApplicable,
            FieldValue::Text(text) => {
                let text = text.trim();
                if ["true", "yes", "y", "x"]
                    .iter()
                    .any(|t| text.eq_ignore_ascii_case(t))
                {
                    AwardStatus::Won
                } else {
                    AwardStatus::NotWon
                }
            }
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Number(n) => serializer.serialize_f64(*n),
            FieldValue::Flag(b) => serializer.serialize_bool(*b),
            FieldValue::NotApplicable => serializer.serialize_str(NOT_APPLICABLE_MARKER),
            FieldValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

struct FieldVisitor;

impl<'de> Visitor<'de> for FieldVisitor {
    type Value = FieldValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, boolean, or string")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<FieldValue, E> {
        Ok(FieldValue::Flag(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<FieldValue, E> {
        Ok(FieldValue::Number(v as f64))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<FieldValue, E> {
        Ok(FieldValue::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<FieldValue, E> {
        Ok(FieldValue::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<FieldValue, E> {
        Ok(FieldValue::from_json_str(v))
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FieldVisitor)
    }
}

// ---------------------------------------------------------------------------
// RawRecord
// ---------------------------------------------------------------------------

/// One row per player per season, as supplied by the data-loading stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRecordRepr")]
pub struct RawRecord {
    pub name: String,
    pub year: SeasonYear,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    /// Logo file stem resolved from the team era table during normalization.
    #[serde(
        default,
        rename = "teamLogo",
        skip_serializing_if = "Option::is_none"
    )]
    pub team_logo: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

/// Deserialization shape: JSON `null` fields are dropped rather than kept.
#[derive(Deserialize)]
struct RawRecordRepr {
    name: String,
    year: SeasonYear,
    #[serde(default)]
    team: Option<String>,
    #[serde(default, rename = "teamLogo")]
    team_logo: Option<String>,
    #[serde(flatten)]
    fields: BTreeMap<String, LenientField>,
}

/// A JSON field slot that tolerates values `FieldValue` cannot hold. Nulls,
/// arrays, and objects become `None` so only that field is lost.
struct LenientField(Option<FieldValue>);

impl<'de> Deserialize<'de> for LenientField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LenientVisitor;

        impl<'de> Visitor<'de> for LenientVisitor {
            type Value = Option<FieldValue>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("any JSON value")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                FieldVisitor.visit_bool(v).map(Some)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                FieldVisitor.visit_u64(v).map(Some)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                FieldVisitor.visit_i64(v).map(Some)
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                FieldVisitor.visit_f64(v).map(Some)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                FieldVisitor.visit_str(v).map(Some)
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(None)
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(None)
            }

            fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
                d.deserialize_any(self)
            }

            fn visit_seq<A: de::SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
                de::IgnoredAny.visit_seq(seq)?;
                Ok(None)
            }

            fn visit_map<A: de::MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
                de::IgnoredAny.visit_map(map)?;
                Ok(None)
            }
        }

        deserializer.deserialize_any(LenientVisitor).map(LenientField)
    }
}

impl From<RawRecordRepr> for RawRecord {
    fn from(repr: RawRecordRepr) -> Self {
        RawRecord {
            name: repr.name,
            year: repr.year,
            team: repr.team.filter(|t| !t.trim().is_empty()),
            team_logo: repr.team_logo,
            fields: repr
                .fields
                .into_iter()
                .filter_map(|(key, LenientField(value))| value.map(|v| (key, v)))
                .collect(),
        }
    }
}

impl RawRecord {
    pub fn new(name: impl Into<String>, year: SeasonYear) -> Self {
        RawRecord {
            name: name.into(),
            year,
            team: None,
            team_logo: None,
            fields: BTreeMap::new(),
        }
    }

    /// Shorthand for a regular season row.
    pub fn season(name: impl Into<String>, year: u16) -> Self {
        Self::new(name, SeasonYear::Season(year))
    }

    /// Shorthand for a career aggregate row.
    pub fn career(name: impl Into<String>) -> Self {
        Self::new(name, SeasonYear::Career)
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn with_stat(self, key: impl Into<String>, value: f64) -> Self {
        self.with_field(key, FieldValue::Number(value))
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Numeric statistic; missing or non-numeric fields are `None`.
    pub fn stat(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(FieldValue::as_number)
    }

    /// Award or champion flag; an absent field counts as not won.
    pub fn award(&self, key: &str) -> AwardStatus {
        self.fields
            .get(key)
            .map_or(AwardStatus::NotWon, FieldValue::award_status)
    }
}
