use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionKind {
    Erratum,
    Corrigendum,
    Retraction,
}

impl CorrectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Erratum => "erratum",
            Self::Corrigendum => "corrigendum",
            Self::Retraction => "retraction",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "erratum" => Some(Self::Erratum),
            "corrigendum" => Some(Self::Corrigendum),
            "retraction" => Some(Self::Retraction),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionStatus {
    Draft,
    Published,
}

impl CorrectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "published" => Some(Self::Published),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCorrectionDto {
    pub kind: CorrectionKind,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CorrectionDto {
    pub id: i32,
    pub manuscript_id: i32,
    pub kind: CorrectionKind,
    pub description: String,
    pub doi: Option<String>,
    pub status: CorrectionStatus,
    pub published_date: Option<DateTime<Utc>>,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
}
