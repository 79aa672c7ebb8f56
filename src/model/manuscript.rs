use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ManuscriptStatus {
    Submitted,
    UnderReview,
    RevisionRequested,
    Accepted,
    Rejected,
    Withdrawn,
    CopyEditing,
    Production,
    Published,
}

impl ManuscriptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::UnderReview => "under_review",
            Self::RevisionRequested => "revision_requested",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
            Self::CopyEditing => "copy_editing",
            Self::Production => "production",
            Self::Published => "published",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "submitted" => Some(Self::Submitted),
            "under_review" => Some(Self::UnderReview),
            "revision_requested" => Some(Self::RevisionRequested),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            "withdrawn" => Some(Self::Withdrawn),
            "copy_editing" => Some(Self::CopyEditing),
            "production" => Some(Self::Production),
            "published" => Some(Self::Published),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CopyEditingStage {
    NotStarted,
    Editing,
    AuthorReview,
    AuthorApproved,
}

impl CopyEditingStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Editing => "editing",
            Self::AuthorReview => "author_review",
            Self::AuthorApproved => "author_approved",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "not_started" => Some(Self::NotStarted),
            "editing" => Some(Self::Editing),
            "author_review" => Some(Self::AuthorReview),
            "author_approved" => Some(Self::AuthorApproved),
            _ => None,
        }
    }
}

/// Counters that may be bumped by public readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Views,
    Downloads,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuthorDto {
    pub name: String,
    pub email: Option<String>,
    pub affiliation: String,
    pub country: String,
    #[serde(default)]
    pub corresponding: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateManuscriptDto {
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub article_type: String,
    pub authors: Vec<AuthorDto>,
    pub file_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ManuscriptDto {
    pub id: i32,
    pub submitter_id: i32,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub article_type: String,
    pub authors: Vec<AuthorDto>,
    pub country: String,
    pub institution: String,
    pub file_url: Option<String>,
    pub status: ManuscriptStatus,
    pub copy_editing_stage: CopyEditingStage,
    pub volume: Option<i32>,
    pub issue: Option<i32>,
    pub doi: Option<String>,
    pub published_date: Option<DateTime<Utc>>,
    pub views: i64,
    pub downloads: i64,
    pub citations: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedManuscriptsDto {
    pub manuscripts: Vec<ManuscriptDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ManuscriptListQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    pub status: Option<ManuscriptStatus>,
}

fn default_entries() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusDto {
    pub status: ManuscriptStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateCopyEditingDto {
    pub stage: CopyEditingStage,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignIssueDto {
    pub volume: i32,
    pub issue: i32,
}
