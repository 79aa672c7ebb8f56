//! Errata, corrigenda and retractions for published manuscripts.

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    model::{correction::CorrectionStatus, manuscript::ManuscriptStatus},
    server::{
        data::correction::CorrectionRepository,
        error::AppError,
        model::{
            correction::{Correction, CreateCorrectionParams},
            notification::NotificationKind,
        },
        service::{
            doi::{format::DoiFormat, DoiService},
            manuscript::ManuscriptService,
            notification::NotificationService,
        },
    },
};

pub struct CorrectionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CorrectionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a draft correction for a published manuscript.
    ///
    /// # Returns
    /// - `Ok(Correction)` - The draft correction
    /// - `Err(AppError::NotFound)` - Manuscript does not exist
    /// - `Err(AppError::BadRequest)` - Manuscript is not published
    pub async fn create(&self, params: CreateCorrectionParams) -> Result<Correction, AppError> {
        let manuscript = ManuscriptService::new(self.db)
            .get(params.manuscript_id)
            .await?;

        if manuscript.status != ManuscriptStatus::Published {
            return Err(AppError::BadRequest(
                "Corrections can only be issued for published manuscripts".to_string(),
            ));
        }

        let correction = CorrectionRepository::new(self.db).create(&params).await?;

        Correction::from_entity(correction)
    }

    pub async fn get_for_manuscript(
        &self,
        manuscript_id: i32,
    ) -> Result<Vec<Correction>, AppError> {
        ManuscriptService::new(self.db).get(manuscript_id).await?;

        CorrectionRepository::new(self.db)
            .get_by_manuscript(manuscript_id)
            .await?
            .into_iter()
            .map(Correction::from_entity)
            .collect()
    }

    /// Assigns a correction DOI for the current year and publishes the correction.
    ///
    /// # Returns
    /// - `Ok(Correction)` - Published correction
    /// - `Err(AppError::NotFound)` - Correction does not exist
    /// - `Err(AppError::Conflict)` - Correction is already published
    pub async fn publish(&self, id: i32, format: &DoiFormat) -> Result<Correction, AppError> {
        let repo = CorrectionRepository::new(self.db);

        let Some(correction) = repo.find_by_id(id).await? else {
            return Err(AppError::NotFound("Correction not found".to_string()));
        };
        let correction = Correction::from_entity(correction)?;
        if correction.status == CorrectionStatus::Published {
            return Err(AppError::Conflict(
                "Correction is already published".to_string(),
            ));
        }

        DoiService::new(self.db, format)
            .assign_correction_doi(id, Utc::now())
            .await?;

        let Some(published) = repo.find_by_id(id).await? else {
            return Err(AppError::NotFound("Correction not found".to_string()));
        };
        let published = Correction::from_entity(published)?;

        let manuscript = ManuscriptService::new(self.db)
            .get(published.manuscript_id)
            .await?;
        NotificationService::new(self.db)
            .notify(
                manuscript.submitter_id,
                NotificationKind::CorrectionPublished,
                format!(
                    "A {} was published for \"{}\"",
                    published.kind.as_str(),
                    manuscript.title
                ),
                Some(manuscript.id),
            )
            .await?;

        Ok(published)
    }
}
