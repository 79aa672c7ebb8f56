//! Manuscript domain models, parameters and workflow rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    model::manuscript::{
        AuthorDto, CopyEditingStage, CreateManuscriptDto, ManuscriptDto, ManuscriptStatus,
        PaginatedManuscriptsDto,
    },
    server::error::{internal::InternalError, AppError},
};

/// Author entry stored in the manuscript's `authors` JSON column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub email: Option<String>,
    pub affiliation: String,
    pub country: String,
    #[serde(default)]
    pub corresponding: bool,
}

impl Author {
    fn from_dto(dto: AuthorDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            email: dto.email,
            affiliation: dto.affiliation.trim().to_string(),
            country: dto.country.trim().to_string(),
            corresponding: dto.corresponding,
        }
    }

    fn into_dto(self) -> AuthorDto {
        AuthorDto {
            name: self.name,
            email: self.email,
            affiliation: self.affiliation,
            country: self.country,
            corresponding: self.corresponding,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Manuscript {
    pub id: i32,
    pub submitter_id: i32,
    pub title: String,
    pub abstract_text: String,
    pub article_type: String,
    pub authors: Vec<Author>,
    /// Country of the corresponding author, used for fee quotes.
    pub country: String,
    /// Institution of the corresponding author, used for fee quotes.
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

impl Manuscript {
    /// Converts an entity model to a manuscript domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Manuscript)` - The converted domain model
    /// - `Err(AppError::InternalErr)` - Unknown status or stage value, or malformed
    ///   authors document
    pub fn from_entity(entity: entity::manuscript::Model) -> Result<Self, AppError> {
        let status = ManuscriptStatus::parse(&entity.status).ok_or_else(|| {
            InternalError::UnknownEnumValue {
                field: "manuscript.status",
                value: entity.status.clone(),
            }
        })?;
        let copy_editing_stage = CopyEditingStage::parse(&entity.copy_editing_stage)
            .ok_or_else(|| InternalError::UnknownEnumValue {
                field: "manuscript.copy_editing_stage",
                value: entity.copy_editing_stage.clone(),
            })?;
        let authors = serde_json::from_value(entity.authors).map_err(|source| {
            InternalError::MalformedDocument {
                document: "manuscript.authors",
                source,
            }
        })?;

        Ok(Self {
            id: entity.id,
            submitter_id: entity.submitter_id,
            title: entity.title,
            abstract_text: entity.abstract_text,
            article_type: entity.article_type,
            authors,
            country: entity.country,
            institution: entity.institution,
            file_url: entity.file_url,
            status,
            copy_editing_stage,
            volume: entity.volume,
            issue: entity.issue,
            doi: entity.doi,
            published_date: entity.published_date,
            views: entity.views,
            downloads: entity.downloads,
            citations: entity.citations,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> ManuscriptDto {
        ManuscriptDto {
            id: self.id,
            submitter_id: self.submitter_id,
            title: self.title,
            abstract_text: self.abstract_text,
            article_type: self.article_type,
            authors: self.authors.into_iter().map(Author::into_dto).collect(),
            country: self.country,
            institution: self.institution,
            file_url: self.file_url,
            status: self.status,
            copy_editing_stage: self.copy_editing_stage,
            volume: self.volume,
            issue: self.issue,
            doi: self.doi,
            published_date: self.published_date,
            views: self.views,
            downloads: self.downloads,
            citations: self.citations,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Parameters for submitting a new manuscript.
#[derive(Debug, Clone)]
pub struct CreateManuscriptParams {
    pub submitter_id: i32,
    pub title: String,
    pub abstract_text: String,
    pub article_type: String,
    pub authors: Vec<Author>,
    pub country: String,
    pub institution: String,
    pub file_url: Option<String>,
}

impl CreateManuscriptParams {
    /// Validates the submission and derives the fee-relevant country and institution
    /// from the corresponding author, or the first author when none is marked.
    ///
    /// # Returns
    /// - `Ok(CreateManuscriptParams)` - Valid submission
    /// - `Err(AppError::BadRequest)` - Missing title, article type or authors
    pub fn from_dto(submitter_id: i32, dto: CreateManuscriptDto) -> Result<Self, AppError> {
        let title = dto.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::BadRequest("Title is required".to_string()));
        }

        let article_type = dto.article_type.trim().to_string();
        if article_type.is_empty() {
            return Err(AppError::BadRequest("Article type is required".to_string()));
        }

        let authors: Vec<Author> = dto.authors.into_iter().map(Author::from_dto).collect();
        let Some(corresponding) = authors
            .iter()
            .find(|a| a.corresponding)
            .or_else(|| authors.first())
        else {
            return Err(AppError::BadRequest(
                "At least one author is required".to_string(),
            ));
        };
        let country = corresponding.country.clone();
        let institution = corresponding.affiliation.clone();

        Ok(Self {
            submitter_id,
            title,
            abstract_text: dto.abstract_text,
            article_type,
            authors,
            country,
            institution,
            file_url: dto.file_url,
        })
    }
}

/// Filter for manuscript listings.
#[derive(Debug, Clone)]
pub struct ManuscriptFilter {
    /// Restrict to one submitter; `None` lists every manuscript.
    pub submitter_id: Option<i32>,
    pub status: Option<ManuscriptStatus>,
    pub page: u64,
    pub per_page: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedManuscripts {
    pub manuscripts: Vec<Manuscript>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedManuscripts {
    pub fn into_dto(self) -> PaginatedManuscriptsDto {
        PaginatedManuscriptsDto {
            manuscripts: self.manuscripts.into_iter().map(|m| m.into_dto()).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Whether the editorial workflow permits moving from `from` to `to`.
pub fn status_transition_allowed(from: ManuscriptStatus, to: ManuscriptStatus) -> bool {
    use ManuscriptStatus::*;

    matches!(
        (from, to),
        (Submitted, UnderReview | Rejected | Withdrawn)
            | (UnderReview, RevisionRequested | Accepted | Rejected)
            | (RevisionRequested, UnderReview | Withdrawn | Rejected)
            | (Accepted, CopyEditing)
            | (CopyEditing, Production)
            | (Production, Published)
    )
}

/// Who is allowed to make a copy-editing stage move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageActor {
    /// Copy editors and editors.
    Editorial,
    /// The manuscript's submitter.
    Submitter,
}

/// Returns who may move the copy-editing stage from `from` to `to`, or `None`
/// when the move is not part of the workflow.
pub fn stage_transition_actor(from: CopyEditingStage, to: CopyEditingStage) -> Option<StageActor> {
    use CopyEditingStage::*;

    match (from, to) {
        (NotStarted, Editing) | (Editing, AuthorReview) => Some(StageActor::Editorial),
        (AuthorReview, AuthorApproved) | (AuthorReview, Editing) => Some(StageActor::Submitter),
        _ => None,
    }
}
