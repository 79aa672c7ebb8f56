use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DoiQuery {
    pub doi: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DoiUniqueQuery {
    pub doi: String,
    /// Manuscript whose own DOI should not count as a collision.
    pub exclude_manuscript: Option<i32>,
    /// Correction whose own DOI should not count as a collision.
    pub exclude_correction: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DoiValidationDto {
    pub doi: String,
    pub valid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DoiUniqueDto {
    pub doi: String,
    pub unique: bool,
}

/// Components of a journal DOI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParsedDoiDto {
    Manuscript {
        year: i32,
        volume: i32,
        issue: i32,
        sequence: i32,
    },
    Correction {
        year: i32,
        sequence: i32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DoiParseDto {
    pub doi: String,
    pub parsed: Option<ParsedDoiDto>,
}
