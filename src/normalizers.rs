use crate::model::CandidateInput;
use lazy_static::lazy_static;
use regex::Regex;

/// Color used for candidates whose `partyColor` is missing or malformed.
pub const NEUTRAL_COLOR: &str = "#808080";

lazy_static! {
    static ref HEX_COLOR_RX: Regex = Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap();
}

/// Clean up candidate records before they are handed to the simulator,
/// returning the cleaned records and a warning for every repair made.
pub fn normalize_candidates(candidates: Vec<CandidateInput>) -> (Vec<CandidateInput>, Vec<String>) {
    let mut warnings = Vec::new();

    let normalized: Vec<CandidateInput> = candidates
        .into_iter()
        .map(|mut candidate| {
            candidate.id = candidate.id.trim().to_string();
            candidate.name = normalize_name(&candidate.name);

            if candidate.short_name.trim().is_empty() {
                candidate.short_name = derive_short_name(&candidate.name);
            } else {
                candidate.short_name = normalize_name(&candidate.short_name);
            }

            let color = candidate.party_color.trim();
            if HEX_COLOR_RX.is_match(color) {
                candidate.party_color = color.to_uppercase();
            } else {
                if !color.is_empty() {
                    warnings.push(format!(
                        "{}: invalid party color '{}', using {}",
                        candidate.id, color, NEUTRAL_COLOR
                    ));
                }
                candidate.party_color = NEUTRAL_COLOR.to_string();
            }

            if !candidate.has_polling_data() {
                warnings.push(format!(
                    "{}: no polling data, simulating from the zero-poll floor",
                    candidate.id
                ));
            }

            candidate
        })
        .collect();

    (normalized, warnings)
}

/// Trim and collapse runs of whitespace.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Last word of the display name, e.g. "Ciro Gomes" -> "Gomes".
pub fn derive_short_name(name: &str) -> String {
    name.split_whitespace()
        .last()
        .map(|s| s.to_string())
        .unwrap_or_default()
}
