use serde::{Deserialize, Serialize};

/// A candidate as supplied by the caller, with its blended poll average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateInput {
    pub id: String,
    pub name: String,
    #[serde(rename = "shortName", default)]
    pub short_name: String,
    #[serde(rename = "partyColor", default)]
    pub party_color: String,
    /// Polling percentage in [0, 100]. Zero means no polling data.
    #[serde(rename = "pollAverage")]
    pub poll_average: f64,
}

impl CandidateInput {
    pub fn new(id: &str, name: &str, poll_average: f64) -> CandidateInput {
        CandidateInput {
            id: id.to_string(),
            name: name.to_string(),
            short_name: name.to_string(),
            party_color: String::new(),
            poll_average,
        }
    }

    pub fn with_short_name(mut self, short_name: &str) -> CandidateInput {
        self.short_name = short_name.to_string();
        self
    }

    pub fn with_party_color(mut self, party_color: &str) -> CandidateInput {
        self.party_color = party_color.to_string();
        self
    }

    pub fn has_polling_data(&self) -> bool {
        self.poll_average > 0.0
    }
}
