//! Manuscript submission and editorial workflow.
//!
//! Status moves follow `status_transition_allowed`; copy-editing stage moves follow
//! `stage_transition_actor`, which also decides whether editorial staff or the
//! submitter may make the move. Submitters are notified of every change that
//! concerns them.

use sea_orm::DatabaseConnection;

use crate::{
    model::{
        manuscript::{CopyEditingStage, ManuscriptStatus, MetricKind},
        user::Role,
        volume::IssueStatus,
    },
    server::{
        data::{
            manuscript::ManuscriptRepository, review::ReviewRepository,
            volume::VolumeRepository,
        },
        error::{auth::AuthError, AppError},
        model::{
            manuscript::{
                stage_transition_actor, status_transition_allowed, CreateManuscriptParams,
                Manuscript, ManuscriptFilter, PaginatedManuscripts, StageActor,
            },
            notification::NotificationKind,
            user::User,
        },
        service::{
            doi::{format::DoiFormat, DoiService},
            notification::NotificationService,
        },
    },
};

/// Roles that see and manage every manuscript.
const EDITORIAL_ROLES: &[Role] = &[Role::Editor, Role::Admin];
/// Roles that drive copy-editing.
const COPY_EDITING_ROLES: &[Role] = &[Role::CopyEditor, Role::Editor, Role::Admin];

pub struct ManuscriptService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ManuscriptService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a new submission.
    pub async fn submit(&self, params: CreateManuscriptParams) -> Result<Manuscript, AppError> {
        let repo = ManuscriptRepository::new(self.db);

        let manuscript = repo.create(&params).await?;

        tracing::info!(
            "Manuscript {} submitted by user {}",
            manuscript.id,
            manuscript.submitter_id
        );

        Manuscript::from_entity(manuscript)
    }

    /// Gets a manuscript by ID.
    ///
    /// # Returns
    /// - `Ok(Manuscript)` - Manuscript found
    /// - `Err(AppError::NotFound)` - No manuscript with that ID
    pub async fn get(&self, id: i32) -> Result<Manuscript, AppError> {
        let repo = ManuscriptRepository::new(self.db);

        match repo.find_by_id(id).await? {
            Some(manuscript) => Manuscript::from_entity(manuscript),
            None => Err(AppError::NotFound("Manuscript not found".to_string())),
        }
    }

    /// Gets a manuscript the user is allowed to see.
    ///
    /// The submitter, copy-editing and editorial staff, and any reviewer assigned
    /// to the manuscript have access.
    ///
    /// # Returns
    /// - `Ok(Manuscript)` - Manuscript visible to the user
    /// - `Err(AppError::NotFound)` - No manuscript with that ID
    /// - `Err(AppError::AuthErr)` - User has no access
    pub async fn get_for_user(&self, id: i32, user: &User) -> Result<Manuscript, AppError> {
        let manuscript = self.get(id).await?;

        if manuscript.submitter_id == user.id || user.roles.contains_any(COPY_EDITING_ROLES) {
            return Ok(manuscript);
        }

        let assigned = ReviewRepository::new(self.db)
            .is_assigned(manuscript.id, user.id)
            .await?;
        if !assigned {
            return Err(AuthError::AccessDenied(
                user.id,
                format!("User is not allowed to view manuscript {}", id),
            )
            .into());
        }

        Ok(manuscript)
    }

    /// Lists manuscripts.
    ///
    /// Editors and admins list every manuscript; everyone else only their own
    /// submissions.
    pub async fn list_for_user(
        &self,
        user: &User,
        status: Option<ManuscriptStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedManuscripts, AppError> {
        let submitter_id = if user.roles.contains_any(EDITORIAL_ROLES) {
            None
        } else {
            Some(user.id)
        };

        self.get_paginated(ManuscriptFilter {
            submitter_id,
            status,
            page,
            per_page,
        })
        .await
    }

    pub async fn get_paginated(
        &self,
        filter: ManuscriptFilter,
    ) -> Result<PaginatedManuscripts, AppError> {
        let repo = ManuscriptRepository::new(self.db);

        let (manuscripts, total) = repo.get_paginated(&filter).await?;
        let manuscripts = manuscripts
            .into_iter()
            .map(Manuscript::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedManuscripts {
            manuscripts,
            total,
            page: filter.page,
            per_page: filter.per_page,
            total_pages: total.div_ceil(filter.per_page.max(1)),
        })
    }

    /// Moves a manuscript along the editorial workflow and notifies the submitter.
    ///
    /// Publication goes through `VolumeService::publish_issue`, which assigns the
    /// DOI; this route never sets `published`.
    ///
    /// # Returns
    /// - `Ok(Manuscript)` - Updated manuscript
    /// - `Err(AppError::NotFound)` - No manuscript with that ID
    /// - `Err(AppError::BadRequest)` - The workflow does not allow the move, or the
    ///   target is `published`
    pub async fn update_status(
        &self,
        id: i32,
        status: ManuscriptStatus,
    ) -> Result<Manuscript, AppError> {
        let manuscript = self.get(id).await?;

        if status == ManuscriptStatus::Published {
            return Err(AppError::BadRequest(
                "Manuscripts are published with their issue".to_string(),
            ));
        }
        if !status_transition_allowed(manuscript.status, status) {
            return Err(AppError::BadRequest(format!(
                "Cannot move manuscript from {} to {}",
                manuscript.status.as_str(),
                status.as_str()
            )));
        }

        let repo = ManuscriptRepository::new(self.db);
        let updated = Manuscript::from_entity(repo.update_status(id, status).await?)?;

        tracing::info!(
            "Manuscript {} moved from {} to {}",
            id,
            manuscript.status.as_str(),
            status.as_str()
        );

        NotificationService::new(self.db)
            .notify(
                updated.submitter_id,
                NotificationKind::StatusChanged,
                format!(
                    "The status of \"{}\" changed to {}",
                    updated.title,
                    status.as_str()
                ),
                Some(updated.id),
            )
            .await?;

        Ok(updated)
    }

    /// Moves the copy-editing stage on behalf of `user`.
    ///
    /// Copy editors and editors drive the editing moves; only the submitter may
    /// approve the copy-edit or send it back from author review.
    ///
    /// # Returns
    /// - `Ok(Manuscript)` - Updated manuscript
    /// - `Err(AppError::BadRequest)` - Manuscript is not in copy-editing or production,
    ///   or the move is not part of the workflow
    /// - `Err(AppError::AuthErr)` - User may not make this move
    pub async fn update_copy_editing_stage(
        &self,
        id: i32,
        stage: CopyEditingStage,
        user: &User,
    ) -> Result<Manuscript, AppError> {
        let manuscript = self.get(id).await?;

        if !matches!(
            manuscript.status,
            ManuscriptStatus::CopyEditing | ManuscriptStatus::Production
        ) {
            return Err(AppError::BadRequest(
                "Manuscript is not in copy-editing".to_string(),
            ));
        }

        let allowed = match stage_transition_actor(manuscript.copy_editing_stage, stage) {
            Some(StageActor::Editorial) => user.roles.contains_any(COPY_EDITING_ROLES),
            Some(StageActor::Submitter) => user.id == manuscript.submitter_id,
            None => {
                return Err(AppError::BadRequest(format!(
                    "Cannot move copy-editing from {} to {}",
                    manuscript.copy_editing_stage.as_str(),
                    stage.as_str()
                )))
            }
        };
        if !allowed {
            return Err(AuthError::AccessDenied(
                user.id,
                format!(
                    "User may not move copy-editing of manuscript {} to {}",
                    id,
                    stage.as_str()
                ),
            )
            .into());
        }

        let repo = ManuscriptRepository::new(self.db);
        let updated = Manuscript::from_entity(repo.update_copy_editing_stage(id, stage).await?)?;

        if stage == CopyEditingStage::AuthorReview {
            NotificationService::new(self.db)
                .notify(
                    updated.submitter_id,
                    NotificationKind::AuthorReviewRequested,
                    format!("The copy-edit of \"{}\" is ready for your review", updated.title),
                    Some(updated.id),
                )
                .await?;
        }

        Ok(updated)
    }

    /// Places a manuscript in a draft issue.
    ///
    /// # Returns
    /// - `Ok(Manuscript)` - Updated manuscript
    /// - `Err(AppError::NotFound)` - Manuscript or issue does not exist
    /// - `Err(AppError::BadRequest)` - Manuscript has not been accepted
    /// - `Err(AppError::Conflict)` - Issue is already published, or the manuscript
    ///   already has a DOI under another issue
    pub async fn assign_issue(
        &self,
        id: i32,
        volume: i32,
        issue: i32,
    ) -> Result<Manuscript, AppError> {
        let manuscript = self.get(id).await?;

        if !matches!(
            manuscript.status,
            ManuscriptStatus::Accepted
                | ManuscriptStatus::CopyEditing
                | ManuscriptStatus::Production
        ) {
            return Err(AppError::BadRequest(
                "Only accepted manuscripts can be assigned to an issue".to_string(),
            ));
        }
        if manuscript.doi.is_some()
            && (manuscript.volume != Some(volume) || manuscript.issue != Some(issue))
        {
            return Err(AppError::Conflict(
                "Manuscript already has a DOI for another issue".to_string(),
            ));
        }

        let Some((_, target)) = VolumeRepository::new(self.db)
            .find_issue_by_numbers(volume, issue)
            .await?
        else {
            return Err(AppError::NotFound(format!(
                "Issue {} of volume {} not found",
                issue, volume
            )));
        };
        if target.status == IssueStatus::Published.as_str() {
            return Err(AppError::Conflict("Issue is already published".to_string()));
        }

        let repo = ManuscriptRepository::new(self.db);
        let updated = repo.assign_issue(id, volume, issue).await?;

        Manuscript::from_entity(updated)
    }

    /// Reserves and stores a DOI for a manuscript assigned to an issue.
    ///
    /// The DOI's year is the year of the manuscript's volume.
    ///
    /// # Returns
    /// - `Ok(Manuscript)` - Manuscript with its DOI
    /// - `Err(AppError::BadRequest)` - Manuscript is not assigned to an issue
    /// - `Err(AppError::Conflict)` - Manuscript already has a DOI
    pub async fn assign_doi(&self, id: i32, format: &DoiFormat) -> Result<Manuscript, AppError> {
        let manuscript = self.get(id).await?;

        if manuscript.doi.is_some() {
            return Err(AppError::Conflict("Manuscript already has a DOI".to_string()));
        }
        let (Some(volume), Some(issue)) = (manuscript.volume, manuscript.issue) else {
            return Err(AppError::BadRequest(
                "Manuscript must be assigned to an issue before it gets a DOI".to_string(),
            ));
        };

        let Some(volume_entity) = VolumeRepository::new(self.db)
            .find_volume_by_number(volume)
            .await?
        else {
            return Err(AppError::NotFound(format!("Volume {} not found", volume)));
        };

        DoiService::new(self.db, format)
            .assign_manuscript_doi(id, volume_entity.year, volume, issue)
            .await?;

        self.get(id).await
    }

    /// Increments a view or download counter.
    pub async fn record_metric(&self, id: i32, metric: MetricKind) -> Result<(), AppError> {
        let repo = ManuscriptRepository::new(self.db);

        if !repo.increment_metric(id, metric).await? {
            return Err(AppError::NotFound("Manuscript not found".to_string()));
        }

        Ok(())
    }
}
