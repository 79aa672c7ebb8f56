use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::manuscript::ManuscriptDto;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    Draft,
    Published,
}

impl IssueStatus {
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
pub struct CreateVolumeDto {
    pub number: i32,
    pub year: i32,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateIssueDto {
    pub number: i32,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IssueDto {
    pub id: i32,
    pub volume_id: i32,
    pub number: i32,
    pub title: Option<String>,
    pub status: IssueStatus,
    pub published_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VolumeDto {
    pub id: i32,
    pub number: i32,
    pub year: i32,
    pub title: Option<String>,
    pub issues: Vec<IssueDto>,
}

/// Result of publishing an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PublishedIssueDto {
    pub issue: IssueDto,
    pub manuscripts: Vec<ManuscriptDto>,
}
