use serde::Serialize;
use tri_match::MatchOptions;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconcileOptions {
    pub matching: MatchOptions,
    /// Vaccines to compute rates for; the configured list when `None`.
    pub vaccines: Option<Vec<String>>,
}

impl ReconcileOptions {
    pub fn with_matching(mut self, matching: MatchOptions) -> Self {
        self.matching = matching;
        self
    }

    pub fn with_vaccines(mut self, vaccines: Vec<String>) -> Self {
        self.vaccines = Some(vaccines);
        self
    }
}
