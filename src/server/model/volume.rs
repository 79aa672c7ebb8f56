//! Volume and issue domain models.

use chrono::{DateTime, Utc};

use crate::{
    model::volume::{CreateIssueDto, CreateVolumeDto, IssueDto, IssueStatus, VolumeDto},
    server::error::{internal::InternalError, AppError},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub id: i32,
    pub volume_id: i32,
    pub number: i32,
    pub title: Option<String>,
    pub status: IssueStatus,
    pub published_date: Option<DateTime<Utc>>,
}

impl Issue {
    pub fn from_entity(entity: entity::issue::Model) -> Result<Self, AppError> {
        let status = IssueStatus::parse(&entity.status).ok_or_else(|| {
            InternalError::UnknownEnumValue {
                field: "issue.status",
                value: entity.status.clone(),
            }
        })?;

        Ok(Self {
            id: entity.id,
            volume_id: entity.volume_id,
            number: entity.number,
            title: entity.title,
            status,
            published_date: entity.published_date,
        })
    }

    pub fn into_dto(self) -> IssueDto {
        IssueDto {
            id: self.id,
            volume_id: self.volume_id,
            number: self.number,
            title: self.title,
            status: self.status,
            published_date: self.published_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    pub id: i32,
    pub number: i32,
    pub year: i32,
    pub title: Option<String>,
}

impl Volume {
    pub fn from_entity(entity: entity::volume::Model) -> Self {
        Self {
            id: entity.id,
            number: entity.number,
            year: entity.year,
            title: entity.title,
        }
    }

    pub fn into_dto(self, issues: Vec<Issue>) -> VolumeDto {
        VolumeDto {
            id: self.id,
            number: self.number,
            year: self.year,
            title: self.title,
            issues: issues.into_iter().map(Issue::into_dto).collect(),
        }
    }
}

/// Volume and issue numbers must fit the two-digit DOI fields.
const NUMBER_RANGE: std::ops::RangeInclusive<i32> = 1..=99;

#[derive(Debug, Clone)]
pub struct CreateVolumeParams {
    pub number: i32,
    pub year: i32,
    pub title: Option<String>,
}

impl CreateVolumeParams {
    pub fn from_dto(dto: CreateVolumeDto) -> Result<Self, AppError> {
        if !NUMBER_RANGE.contains(&dto.number) {
            return Err(AppError::BadRequest(
                "Volume number must be between 1 and 99".to_string(),
            ));
        }
        if !(1000..=9999).contains(&dto.year) {
            return Err(AppError::BadRequest(
                "Volume year must have four digits".to_string(),
            ));
        }

        Ok(Self {
            number: dto.number,
            year: dto.year,
            title: dto.title,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreateIssueParams {
    pub volume_id: i32,
    pub number: i32,
    pub title: Option<String>,
}

impl CreateIssueParams {
    pub fn from_dto(volume_id: i32, dto: CreateIssueDto) -> Result<Self, AppError> {
        if !NUMBER_RANGE.contains(&dto.number) {
            return Err(AppError::BadRequest(
                "Issue number must be between 1 and 99".to_string(),
            ));
        }

        Ok(Self {
            volume_id,
            number: dto.number,
            title: dto.title,
        })
    }
}
