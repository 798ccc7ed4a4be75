use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::filter::filter_phones;
use crate::catalog::{Catalog, PhoneRecord};
use crate::config::NO_MATCH_MESSAGE;
use crate::query::parse_query;

/// Assigns a ranking score to a phone. Higher ranks first.
pub trait Scorer {
    fn score(&self, record: &PhoneRecord) -> f64;
}

impl<F> Scorer for F
where
    F: Fn(&PhoneRecord) -> f64,
{
    fn score(&self, record: &PhoneRecord) -> f64 {
        self(record)
    }
}

/// The columns returned to callers for each recommended phone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhoneSummary {
    pub brand_name: String,
    pub model: String,
    pub price: Option<f64>,
    pub ram_capacity: Option<f64>,
    pub battery_capacity: Option<f64>,
    pub primary_camera_rear: Option<f64>,
    pub avg_rating: Option<f64>,
}

impl From<&PhoneRecord> for PhoneSummary {
    fn from(record: &PhoneRecord) -> Self {
        Self {
            brand_name: record.brand_name.clone(),
            model: record.model.clone(),
            price: record.price,
            ram_capacity: record.ram_capacity,
            battery_capacity: record.battery_capacity,
            primary_camera_rear: record.primary_camera_rear,
            avg_rating: record.avg_rating,
        }
    }
}

/// Outcome of a recommendation query.
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    /// No phone survived the filters.
    NoMatch,
    /// Phones ordered by descending score, at most `top_n` of them.
    Matches(Vec<PhoneSummary>),
}

impl Recommendation {
    pub fn phones(&self) -> &[PhoneSummary] {
        match self {
            Self::NoMatch => &[],
            Self::Matches(phones) => phones,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matches(_))
    }

    /// Human-readable status line.
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoMatch => NO_MATCH_MESSAGE,
            Self::Matches(_) => "success",
        }
    }
}

/// Run the full pipeline: parse `query`, filter the catalog, score the
/// survivors, and keep the best `top_n`.
///
/// The scorer is not called when nothing survives the filters. Equal scores
/// keep dataset order.
pub fn recommend<S>(catalog: &Catalog, scorer: &S, query: &str, top_n: usize) -> Recommendation
where
    S: Scorer + ?Sized,
{
    let query = query.trim().to_lowercase();
    let constraints = parse_query(&query);
    let survivors = filter_phones(catalog, &constraints, &query);

    if survivors.is_empty() {
        debug!(query = %query, "No phones matched");
        return Recommendation::NoMatch;
    }

    let mut scored: Vec<(f64, &PhoneRecord)> =
        survivors.into_iter().map(|r| (scorer.score(r), r)).collect();
    // Stable sort: ties keep dataset order.
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.truncate(top_n);

    debug!(
        query = %query,
        top_n,
        returned = scored.len(),
        best_score = scored.first().map(|(s, _)| *s),
        "Ranked recommendations"
    );
    Recommendation::Matches(scored.into_iter().map(|(_, r)| r.into()).collect())
}

const TABLE_HEADERS: [&str; 7] = [
    "brand_name",
    "model",
    "price",
    "ram_capacity",
    "battery_capacity",
    "primary_camera_rear",
    "avg_rating",
];

/// Format a number the way the dataset writes it: no trailing `.0` for whole
/// values, `NaN` for an empty cell.
fn format_number(value: Option<f64>) -> String {
    match value {
        None => "NaN".to_string(),
        Some(v) if v.fract().abs() < f64::EPSILON && v.abs() < 1e15 => format!("{v:.0}"),
        Some(v) => v.to_string(),
    }
}

impl PhoneSummary {
    fn cells(&self) -> [String; 7] {
        [
            self.brand_name.clone(),
            self.model.clone(),
            format_number(self.price),
            format_number(self.ram_capacity),
            format_number(self.battery_capacity),
            format_number(self.primary_camera_rear),
            format_number(self.avg_rating),
        ]
    }
}

/// Renders the no-match message, or a table with right-aligned columns.
impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phones = match self {
            Self::NoMatch => return writeln!(f, "{NO_MATCH_MESSAGE}"),
            Self::Matches(phones) => phones,
        };

        let rows: Vec<[String; 7]> = phones.iter().map(PhoneSummary::cells).collect();
        let mut widths = TABLE_HEADERS.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header = TABLE_HEADERS.map(str::to_string);
        for row in std::iter::once(&header).chain(&rows) {
            let line = row
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{cell:>width$}"))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
