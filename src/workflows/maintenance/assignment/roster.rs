//! Candidate roster import from CSV exports.
//!
//! Property teams keep their caretaker/artisan rosters in spreadsheets; this
//! module turns such an export into domain candidates for the CLI demo and the
//! stateless ranking endpoint.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{Candidate, CandidateId, CandidateType, PerformanceSnapshot};

#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("unable to open roster file: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to parse roster csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unknown candidate type '{value}'")]
    UnknownCandidateType { row: usize, value: String },
}

pub fn candidates_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Candidate>, RosterImportError> {
    let file = File::open(path)?;
    candidates_from_reader(file)
}

pub fn candidates_from_reader<R: Read>(reader: R) -> Result<Vec<Candidate>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut candidates = Vec::new();

    for (index, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
        let row = record?;
        candidates.push(row.into_candidate(index + 1)?);
    }

    Ok(candidates)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Candidate ID")]
    candidate_id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Type")]
    candidate_type: String,
    #[serde(rename = "Open Assignments", default)]
    open_assignments: Option<u32>,
    #[serde(rename = "Available", default, deserialize_with = "empty_string_as_none")]
    available: Option<String>,
    #[serde(rename = "Expertise", default, deserialize_with = "empty_string_as_none")]
    expertise: Option<String>,
    #[serde(rename = "Locations", default, deserialize_with = "empty_string_as_none")]
    locations: Option<String>,
    #[serde(rename = "Rating", default)]
    rating: Option<f32>,
    #[serde(rename = "Completion Pct", default)]
    completion_pct: Option<u8>,
    #[serde(rename = "On-Time Pct", default)]
    on_time_pct: Option<u8>,
    #[serde(rename = "Completed Total", default)]
    completed_total: Option<u32>,
}

impl RosterRow {
    fn into_candidate(self, row: usize) -> Result<Candidate, RosterImportError> {
        let candidate_type = match self.candidate_type.to_ascii_lowercase().as_str() {
            "caretaker" => CandidateType::Caretaker,
            "artisan" => CandidateType::Artisan,
            "landlord_self" | "self" => CandidateType::LandlordSelf,
            other => {
                return Err(RosterImportError::UnknownCandidateType {
                    row,
                    value: other.to_string(),
                })
            }
        };

        let performance = if self.rating.is_some()
            || self.completion_pct.is_some()
            || self.on_time_pct.is_some()
            || self.completed_total.is_some()
        {
            Some(PerformanceSnapshot {
                average_rating: self.rating,
                completion_rate_pct: self.completion_pct,
                on_time_rate_pct: self.on_time_pct,
                total_completed: self.completed_total.unwrap_or(0),
            })
        } else {
            None
        };

        Ok(Candidate {
            id: CandidateId(self.candidate_id),
            name: self.name,
            candidate_type,
            current_assignment_count: self.open_assignments.unwrap_or(0),
            is_available: self
                .available
                .as_deref()
                .map(parse_flag)
                .unwrap_or(true),
            category_expertise: parse_tags(self.expertise.as_deref()),
            location_tags: parse_tags(self.locations.as_deref()),
            performance,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "yes" | "y" | "true" | "1"
    )
}

fn parse_tags(raw: Option<&str>) -> BTreeSet<String> {
    raw.map(|value| {
        value
            .split(';')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(|tag| tag.to_ascii_lowercase())
            .collect()
    })
    .unwrap_or_default()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
