// Career normalization.
//
// Groups flat per-season records into per-player careers, drops career
// aggregate rows, resolves team logos, and converts hitter run values into
// win units. The pipeline is permissive by default: anomalies are logged and
// the data passes through. Strict mode turns those anomalies into errors.

use crate::record::{FieldValue, RawRecord, SeasonYear};
use crate::teams;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Runs per win used to convert hitter run values into WAR units.
pub const RUNS_PER_WIN: f64 = 10.0;

/// Hitter value stats recorded in runs.
pub const RUN_VALUE_STATS: [&str; 3] = ["Batting", "Running", "Fielding"];

/// Variants stored per value stat: raw, league-adjusted (LL, LA).
const RUN_VALUE_SUFFIXES: [&str; 3] = ["", " LL", " LA"];

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Hitters,
    Pitchers,
}

impl Category {
    /// Categories in the order the processed dataset lists them.
    pub const ALL: [Category; 2] = [Category::Hitters, Category::Pitchers];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Hitters => "hitters",
            Category::Pitchers => "pitchers",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All season rows of one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCareer {
    pub name: String,
    pub records: Vec<RawRecord>,
}

impl PlayerCareer {
    pub fn new(name: impl Into<String>) -> Self {
        PlayerCareer {
            name: name.into(),
            records: Vec::new(),
        }
    }

    /// Identifier used for the player's page section and nav entry.
    pub fn id(&self) -> String {
        player_id(&self.name)
    }

    /// Season years in record order.
    pub fn seasons(&self) -> impl Iterator<Item = u16> + '_ {
        self.records.iter().filter_map(|r| r.year.season())
    }
}

/// DOM-safe identifier for a player name: ASCII alphanumerics are kept and
/// everything else becomes `_`.
pub fn player_id(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Reject anomalous input instead of logging and passing it through.
    #[serde(default)]
    pub strict: bool,
}

impl NormalizeOptions {
    pub fn strict() -> Self {
        NormalizeOptions { strict: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("{category} row {row}: empty player name")]
    EmptyName { category: Category, row: usize },

    #[error("{category}: career row for '{name}' has no season rows")]
    OrphanCareerRow { category: Category, name: String },

    #[error("{category}: season {year} for '{name}' follows season {previous}")]
    OutOfOrderSeason {
        category: Category,
        name: String,
        year: u16,
        previous: u16,
    },
}

/// Hitter and pitcher careers, each in first-seen order.
///
/// Only `process` builds this type, which guarantees the run-value
/// conversion has been applied exactly once to every hitter record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedDataset {
    hitters: Vec<PlayerCareer>,
    pitchers: Vec<PlayerCareer>,
}

impl ProcessedDataset {
    pub fn hitters(&self) -> &[PlayerCareer] {
        &self.hitters
    }

    pub fn pitchers(&self) -> &[PlayerCareer] {
        &self.pitchers
    }

    pub fn category(&self, category: Category) -> &[PlayerCareer] {
        match category {
            Category::Hitters => &self.hitters,
            Category::Pitchers => &self.pitchers,
        }
    }

    /// Every career with its category, in dataset order.
    pub fn careers(&self) -> impl Iterator<Item = (Category, &PlayerCareer)> + '_ {
        Category::ALL
            .into_iter()
            .flat_map(move |c| self.category(c).iter().map(move |p| (c, p)))
    }

    pub fn find(&self, category: Category, name: &str) -> Option<&PlayerCareer> {
        self.category(category).iter().find(|p| p.name == name)
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Group one category's season rows into careers.
///
/// Careers appear in the order their first season row appears. Career
/// aggregate rows never create a career and never enter `records`.
pub fn normalize<I>(
    rows: I,
    category: Category,
    options: &NormalizeOptions,
) -> Result<Vec<PlayerCareer>, NormalizeError>
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut careers: Vec<PlayerCareer> = Vec::new();
    // Names whose career row arrived before any of their season rows.
    let mut unmatched_career_rows: Vec<String> = Vec::new();

    for (row, mut record) in rows.into_iter().enumerate() {
        if record.name.trim().is_empty() {
            if options.strict {
                return Err(NormalizeError::EmptyName { category, row });
            }
            warn!("{} row {}: empty player name", category, row);
        }

        // Linear scan: player counts are tens, not thousands.
        let existing = careers.iter().position(|c| c.name == record.name);

        let year = match record.year {
            SeasonYear::Season(year) => year,
            SeasonYear::Career => {
                if existing.is_none() && !unmatched_career_rows.contains(&record.name) {
                    unmatched_career_rows.push(record.name.clone());
                }
                debug!("{}: dropping career row for '{}'", category, record.name);
                continue;
            }
        };

        let index = match existing {
            Some(index) => index,
            None => {
                careers.push(PlayerCareer::new(record.name.clone()));
                careers.len() - 1
            }
        };

        if options.strict {
            if let Some(previous) = careers[index].seasons().last() {
                if year < previous {
                    return Err(NormalizeError::OutOfOrderSeason {
                        category,
                        name: record.name,
                        year,
                        previous,
                    });
                }
            }
        }

        if let Some(team) = record.team.as_deref().filter(|t| !t.is_empty()) {
            record.team_logo = teams::logo_for(team, year).map(str::to_owned);
            if record.team_logo.is_none() {
                debug!("no team logo for {} in {} ('{}')", team, year, record.name);
            }
        }

        careers[index].records.push(record);
    }

    for name in unmatched_career_rows {
        if careers.iter().any(|c| c.name == name) {
            continue;
        }
        if options.strict {
            return Err(NormalizeError::OrphanCareerRow { category, name });
        }
        warn!("{}: career row for '{}' has no season rows; player dropped", category, name);
    }

    Ok(careers)
}

/// Normalize both categories and convert hitter run values to wins.
pub fn process<P, H>(
    pitchers: P,
    hitters: H,
    options: &NormalizeOptions,
) -> Result<ProcessedDataset, NormalizeError>
where
    P: IntoIterator<Item = RawRecord>,
    H: IntoIterator<Item = RawRecord>,
{
    let pitchers = normalize(pitchers, Category::Pitchers, options)?;
    let mut hitters = normalize(hitters, Category::Hitters, options)?;
    convert_run_values(&mut hitters);

    info!(
        "Normalized {} hitters and {} pitchers",
        hitters.len(),
        pitchers.len()
    );

    Ok(ProcessedDataset { hitters, pitchers })
}

/// Field names holding run values, e.g. `Value Batting LL`.
pub fn run_value_fields() -> Vec<String> {
    RUN_VALUE_STATS
        .iter()
        .flat_map(|stat| {
            RUN_VALUE_SUFFIXES
                .iter()
                .map(move |suffix| format!("Value {stat}{suffix}"))
        })
        .collect()
}

fn convert_run_values(hitters: &mut [PlayerCareer]) {
    let fields = run_value_fields();
    for record in hitters.iter_mut().flat_map(|h| h.records.iter_mut()) {
        for field in &fields {
            if let Some(FieldValue::Number(runs)) = record.fields.get_mut(field) {
                *runs /= RUNS_PER_WIN;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
