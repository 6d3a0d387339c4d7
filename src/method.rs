//! Query-time metric selection from a caller-supplied method string

use crate::distance::DistanceMetric;

/// The method a search was asked to rank by.
///
/// Strings that name no known metric are kept verbatim and ranked as
/// Euclidean distance; the original string is what gets echoed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchMethod {
    Cosine,
    DotProduct,
    Euclidean,
    Unrecognized(String),
}

impl SearchMethod {
    /// Parse a method label. `None` selects Euclidean. Matching is exact
    /// and case-sensitive.
    pub fn parse(method: Option<&str>) -> Self {
        match method {
            None | Some("euclidean") => SearchMethod::Euclidean,
            Some("cosine") => SearchMethod::Cosine,
            Some("dotproduct") => SearchMethod::DotProduct,
            Some(other) => SearchMethod::Unrecognized(other.to_string()),
        }
    }

    /// The metric that actually scores and orders results
    pub fn metric(&self) -> DistanceMetric {
        match self {
            SearchMethod::Cosine => DistanceMetric::Cosine,
            SearchMethod::DotProduct => DistanceMetric::DotProduct,
            SearchMethod::Euclidean | SearchMethod::Unrecognized(_) => DistanceMetric::Euclidean,
        }
    }

    /// Label echoed in the response
    pub fn label(&self) -> &str {
        match self {
            SearchMethod::Unrecognized(original) => original.as_str(),
            known => known.metric().as_str(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, SearchMethod::Unrecognized(_))
    }
}
