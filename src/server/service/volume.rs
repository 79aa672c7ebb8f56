//! Volumes, issues and issue publication.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        manuscript::{CopyEditingStage, ManuscriptStatus},
        volume::IssueStatus,
    },
    server::{
        data::{manuscript::ManuscriptRepository, volume::VolumeRepository},
        error::AppError,
        model::{
            manuscript::Manuscript,
            notification::NotificationKind,
            volume::{CreateIssueParams, CreateVolumeParams, Issue, Volume},
        },
        service::{
            doi::{format::DoiFormat, DoiService},
            notification::NotificationService,
        },
    },
};

pub struct VolumeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VolumeService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a volume.
    ///
    /// # Returns
    /// - `Ok(Volume)` - The created volume
    /// - `Err(AppError::Conflict)` - A volume with that number exists
    pub async fn create_volume(&self, params: CreateVolumeParams) -> Result<Volume, AppError> {
        let repo = VolumeRepository::new(self.db);

        if repo.find_volume_by_number(params.number).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Volume {} already exists",
                params.number
            )));
        }

        let volume = repo.create_volume(&params).await?;

        Ok(Volume::from_entity(volume))
    }

    /// Creates a draft issue within a volume.
    ///
    /// # Returns
    /// - `Ok(Issue)` - The created issue
    /// - `Err(AppError::NotFound)` - Volume does not exist
    /// - `Err(AppError::Conflict)` - The volume already has an issue with that number
    pub async fn create_issue(&self, params: CreateIssueParams) -> Result<Issue, AppError> {
        let repo = VolumeRepository::new(self.db);

        if repo.find_volume(params.volume_id).await?.is_none() {
            return Err(AppError::NotFound("Volume not found".to_string()));
        }
        if repo
            .find_issue_in_volume(params.volume_id, params.number)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Issue {} already exists in this volume",
                params.number
            )));
        }

        Issue::from_entity(repo.create_issue(&params).await?)
    }

    /// Lists every volume with its issues.
    pub async fn get_all(&self) -> Result<Vec<(Volume, Vec<Issue>)>, AppError> {
        let repo = VolumeRepository::new(self.db);

        repo.get_all_with_issues()
            .await?
            .into_iter()
            .map(|(volume, issues)| {
                let issues = issues
                    .into_iter()
                    .map(Issue::from_entity)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((Volume::from_entity(volume), issues))
            })
            .collect()
    }

    /// Publishes an issue.
    ///
    /// Every manuscript in the issue must be in copy-editing or production with an
    /// approved copy-edit. Manuscripts left published by an interrupted earlier
    /// attempt are accepted as long as they carry a DOI. The issue is claimed before
    /// any manuscript changes, so concurrent requests cannot both publish it; a
    /// failure afterwards returns the issue to draft.
    ///
    /// # Returns
    /// - `Ok((Issue, Vec<Manuscript>))` - Published issue and its manuscripts
    /// - `Err(AppError::NotFound)` - Issue or its volume does not exist
    /// - `Err(AppError::Conflict)` - Issue is already published
    /// - `Err(AppError::BadRequest)` - Issue is empty or has manuscripts that are not
    ///   ready
    pub async fn publish_issue(
        &self,
        issue_id: i32,
        format: &DoiFormat,
    ) -> Result<(Issue, Vec<Manuscript>), AppError> {
        let repo = VolumeRepository::new(self.db);

        let Some(issue) = repo.find_issue(issue_id).await? else {
            return Err(AppError::NotFound("Issue not found".to_string()));
        };
        let issue = Issue::from_entity(issue)?;
        if issue.status == IssueStatus::Published {
            return Err(AppError::Conflict("Issue is already published".to_string()));
        }

        let Some(volume) = repo.find_volume(issue.volume_id).await? else {
            return Err(AppError::NotFound("Volume not found".to_string()));
        };
        let volume = Volume::from_entity(volume);

        let manuscripts = ManuscriptRepository::new(self.db)
            .find_by_issue(volume.number, issue.number)
            .await?
            .into_iter()
            .map(Manuscript::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        if manuscripts.is_empty() {
            return Err(AppError::BadRequest(
                "Cannot publish an issue without manuscripts".to_string(),
            ));
        }

        let not_ready: Vec<String> = manuscripts
            .iter()
            .filter(|m| !ready_for_publication(m))
            .map(|m| m.id.to_string())
            .collect();
        if !not_ready.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Manuscripts without an approved copy-edit: {}",
                not_ready.join(", ")
            )));
        }

        let published_date = Utc::now();
        if !repo
            .claim_issue_for_publication(issue.id, published_date)
            .await?
        {
            return Err(AppError::Conflict("Issue is already published".to_string()));
        }

        let published = match self
            .publish_manuscripts(&volume, &issue, manuscripts, published_date, format)
            .await
        {
            Ok(published) => published,
            Err(err) => {
                tracing::error!(
                    "Publishing volume {} issue {} failed, returning it to draft: {}",
                    volume.number,
                    issue.number,
                    err
                );
                repo.release_issue(issue.id).await?;
                return Err(err);
            }
        };

        let Some(issue) = repo.find_issue(issue.id).await? else {
            return Err(AppError::NotFound("Issue not found".to_string()));
        };
        let issue = Issue::from_entity(issue)?;

        tracing::info!(
            "Published volume {} issue {} with {} manuscripts",
            volume.number,
            issue.number,
            published.len()
        );

        Ok((issue, published))
    }

    /// Assigns missing DOIs, marks the issue's manuscripts published and notifies
    /// their submitters.
    async fn publish_manuscripts(
        &self,
        volume: &Volume,
        issue: &Issue,
        manuscripts: Vec<Manuscript>,
        published_date: DateTime<Utc>,
        format: &DoiFormat,
    ) -> Result<Vec<Manuscript>, AppError> {
        let manuscript_repo = ManuscriptRepository::new(self.db);
        let doi_service = DoiService::new(self.db, format);
        let notifications = NotificationService::new(self.db);
        let mut published = Vec::with_capacity(manuscripts.len());

        for manuscript in manuscripts {
            if manuscript.status == ManuscriptStatus::Published {
                published.push(manuscript);
                continue;
            }

            if manuscript.doi.is_none() {
                doi_service
                    .assign_manuscript_doi(manuscript.id, volume.year, volume.number, issue.number)
                    .await?;
            }

            let updated = Manuscript::from_entity(
                manuscript_repo
                    .mark_published(manuscript.id, published_date)
                    .await?,
            )?;

            notifications
                .notify(
                    updated.submitter_id,
                    NotificationKind::IssuePublished,
                    format!(
                        "\"{}\" was published in volume {} issue {}",
                        updated.title, volume.number, issue.number
                    ),
                    Some(updated.id),
                )
                .await?;

            published.push(updated);
        }

        Ok(published)
    }
}

/// Whether a manuscript may go out with its issue.
fn ready_for_publication(manuscript: &Manuscript) -> bool {
    match manuscript.status {
        ManuscriptStatus::Published => manuscript.doi.is_some(),
        ManuscriptStatus::CopyEditing | ManuscriptStatus::Production => {
            manuscript.copy_editing_stage == CopyEditingStage::AuthorApproved
        }
        _ => false,
    }
}
