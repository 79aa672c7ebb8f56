//! Correction domain models.

use chrono::{DateTime, Utc};

use crate::{
    model::correction::{CorrectionDto, CorrectionKind, CorrectionStatus, CreateCorrectionDto},
    server::error::{internal::InternalError, AppError},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Correction {
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

impl Correction {
    pub fn from_entity(entity: entity::correction::Model) -> Result<Self, AppError> {
        let kind = CorrectionKind::parse(&entity.kind).ok_or_else(|| {
            InternalError::UnknownEnumValue {
                field: "correction.kind",
                value: entity.kind.clone(),
            }
        })?;
        let status = CorrectionStatus::parse(&entity.status).ok_or_else(|| {
            InternalError::UnknownEnumValue {
                field: "correction.status",
                value: entity.status.clone(),
            }
        })?;

        Ok(Self {
            id: entity.id,
            manuscript_id: entity.manuscript_id,
            kind,
            description: entity.description,
            doi: entity.doi,
            status,
            published_date: entity.published_date,
            created_by: entity.created_by,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> CorrectionDto {
        CorrectionDto {
            id: self.id,
            manuscript_id: self.manuscript_id,
            kind: self.kind,
            description: self.description,
            doi: self.doi,
            status: self.status,
            published_date: self.published_date,
            created_by: self.created_by,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateCorrectionParams {
    pub manuscript_id: i32,
    pub kind: CorrectionKind,
    pub description: String,
    pub created_by: i32,
}

impl CreateCorrectionParams {
    pub fn from_dto(
        manuscript_id: i32,
        created_by: i32,
        dto: CreateCorrectionDto,
    ) -> Result<Self, AppError> {
        let description = dto.description.trim().to_string();
        if description.is_empty() {
            return Err(AppError::BadRequest(
                "Correction description is required".to_string(),
            ));
        }

        Ok(Self {
            manuscript_id,
            kind: dto.kind,
            description,
            created_by,
        })
    }
}
