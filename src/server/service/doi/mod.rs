//! DOI generation, validation and assignment.
//!
//! Sequence numbers come from the atomic `doi_sequence` counter, so concurrent
//! requests for the same issue never mint the same DOI. Assignment additionally
//! retries on unique-index violations, covering DOIs that were entered by hand.

pub mod format;

use chrono::{DateTime, Datelike, Utc};
use sea_orm::{DatabaseConnection, DbErr, SqlErr};

use crate::server::{
    data::{
        correction::CorrectionRepository, doi_sequence::DoiSequenceRepository,
        manuscript::ManuscriptRepository,
    },
    error::AppError,
    model::doi::{DoiOwner, ParsedDoi},
};

use self::format::{DoiFormat, MAX_SEQUENCE};

/// Attempts made before giving up on a reservation or assignment.
const MAX_ATTEMPTS: usize = 5;

pub struct DoiService<'a> {
    db: &'a DatabaseConnection,
    format: &'a DoiFormat,
}

impl<'a> DoiService<'a> {
    pub fn new(db: &'a DatabaseConnection, format: &'a DoiFormat) -> Self {
        Self { db, format }
    }

    pub fn validate(&self, doi: &str) -> bool {
        self.format.validate(doi)
    }

    pub fn parse(&self, doi: &str) -> Option<ParsedDoi> {
        self.format.parse(doi)
    }

    /// Checks that no manuscript or correction other than `exclude` holds the DOI.
    ///
    /// Journal DOIs are compared in their canonical lowercase-prefix form so that
    /// differently-cased spellings of the same DOI are treated as equal.
    ///
    /// # Arguments
    /// - `doi` - DOI to check
    /// - `exclude` - Record whose own DOI should not count as a conflict
    ///
    /// # Returns
    /// - `Ok(true)` - DOI is free
    /// - `Ok(false)` - DOI is held by another record
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn is_doi_unique(
        &self,
        doi: &str,
        exclude: Option<DoiOwner>,
    ) -> Result<bool, AppError> {
        let doi = self.canonical(doi);

        let (exclude_manuscript, exclude_correction) = match exclude {
            Some(DoiOwner::Manuscript(id)) => (Some(id), None),
            Some(DoiOwner::Correction(id)) => (None, Some(id)),
            None => (None, None),
        };

        if ManuscriptRepository::new(self.db)
            .doi_exists(&doi, exclude_manuscript)
            .await?
        {
            return Ok(false);
        }

        let taken = CorrectionRepository::new(self.db)
            .doi_exists(&doi, exclude_correction)
            .await?;

        Ok(!taken)
    }

    /// Reserves the next free manuscript DOI for a volume and issue.
    ///
    /// # Arguments
    /// - `year` - Publication year, `1000..=9999`
    /// - `volume` - Volume number, `1..=99`
    /// - `issue` - Issue number, `1..=99`
    ///
    /// # Returns
    /// - `Ok(String)` - A DOI not held by any record
    /// - `Err(AppError::BadRequest)` - Out-of-range input or the issue's 999
    ///   sequence numbers are used up
    /// - `Err(AppError::Conflict)` - Every reserved DOI was already taken
    pub async fn generate_manuscript_doi(
        &self,
        year: i32,
        volume: i32,
        issue: i32,
    ) -> Result<String, AppError> {
        check_year(year)?;
        check_two_digit("Volume", volume)?;
        check_two_digit("Issue", issue)?;

        let stem = self.format.manuscript_stem(year, volume, issue);
        let existing = ManuscriptRepository::new(self.db)
            .count_with_doi_prefix(&stem)
            .await?;
        let scope = format!("manuscript:{:04}-{:02}-{:02}", year, volume, issue);

        self.reserve_unique(&scope, &stem, existing).await
    }

    /// Reserves the next free correction DOI for a year.
    pub async fn generate_correction_doi(&self, year: i32) -> Result<String, AppError> {
        check_year(year)?;

        let stem = self.format.correction_stem(year);
        let existing = CorrectionRepository::new(self.db)
            .count_with_doi_prefix(&stem)
            .await?;
        let scope = format!("correction:{:04}", year);

        self.reserve_unique(&scope, &stem, existing).await
    }

    /// Generates a DOI and stores it on the manuscript.
    ///
    /// # Returns
    /// - `Ok(String)` - The assigned DOI
    /// - `Err(AppError::Conflict)` - The manuscript already has a DOI, or the update
    ///   kept colliding with existing DOIs
    pub async fn assign_manuscript_doi(
        &self,
        manuscript_id: i32,
        year: i32,
        volume: i32,
        issue: i32,
    ) -> Result<String, AppError> {
        let repo = ManuscriptRepository::new(self.db);

        for _ in 0..MAX_ATTEMPTS {
            let doi = self.generate_manuscript_doi(year, volume, issue).await?;

            match repo.set_doi(manuscript_id, &doi).await {
                Ok(true) => {
                    tracing::info!("Assigned DOI {} to manuscript {}", doi, manuscript_id);
                    return Ok(doi);
                }
                Ok(false) => {
                    return Err(AppError::Conflict(format!(
                        "Manuscript {} already has a DOI",
                        manuscript_id
                    )))
                }
                Err(err) if is_unique_violation(&err) => {
                    tracing::warn!("DOI {} was taken during assignment, retrying", doi);
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(AppError::Conflict(format!(
            "Could not assign a unique DOI to manuscript {}",
            manuscript_id
        )))
    }

    /// Generates a correction DOI and publishes the draft correction under it.
    ///
    /// # Returns
    /// - `Ok(String)` - The assigned DOI
    /// - `Err(AppError::Conflict)` - The correction is no longer a draft, or the
    ///   update kept colliding with existing DOIs
    pub async fn assign_correction_doi(
        &self,
        correction_id: i32,
        published_date: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let repo = CorrectionRepository::new(self.db);
        let year = published_date.year();

        for _ in 0..MAX_ATTEMPTS {
            let doi = self.generate_correction_doi(year).await?;

            match repo.publish(correction_id, &doi, published_date).await {
                Ok(true) => {
                    tracing::info!("Assigned DOI {} to correction {}", doi, correction_id);
                    return Ok(doi);
                }
                Ok(false) => {
                    return Err(AppError::Conflict(format!(
                        "Correction {} is already published",
                        correction_id
                    )))
                }
                Err(err) if is_unique_violation(&err) => {
                    tracing::warn!("DOI {} was taken during assignment, retrying", doi);
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(AppError::Conflict(format!(
            "Could not assign a unique DOI to correction {}",
            correction_id
        )))
    }

    /// Reserves sequence numbers until one yields a DOI nobody holds.
    async fn reserve_unique(
        &self,
        scope: &str,
        stem: &str,
        existing: u64,
    ) -> Result<String, AppError> {
        let seed = i32::try_from(existing)
            .unwrap_or(MAX_SEQUENCE)
            .saturating_add(1);
        let sequences = DoiSequenceRepository::new(self.db);

        for _ in 0..MAX_ATTEMPTS {
            let sequence = sequences.reserve(scope, seed).await?;
            if sequence > MAX_SEQUENCE {
                return Err(AppError::BadRequest(format!(
                    "No DOI sequence numbers left for {}",
                    stem
                )));
            }

            let doi = DoiFormat::with_sequence(stem, sequence);
            if self.is_doi_unique(&doi, None).await? {
                return Ok(doi);
            }

            tracing::warn!("Reserved DOI {} is already in use, reserving again", doi);
        }

        Err(AppError::Conflict(format!(
            "Could not reserve a unique DOI for {}",
            stem
        )))
    }

    /// Rebuilds journal DOIs in generated form; other input is only trimmed.
    fn canonical(&self, doi: &str) -> String {
        match self.format.parse(doi) {
            Some(ParsedDoi::Manuscript {
                year,
                volume,
                issue,
                sequence,
            }) => DoiFormat::with_sequence(
                &self.format.manuscript_stem(year, volume, issue),
                sequence,
            ),
            Some(ParsedDoi::Correction { year, sequence }) => {
                DoiFormat::with_sequence(&self.format.correction_stem(year), sequence)
            }
            None => doi.trim().to_string(),
        }
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn check_year(year: i32) -> Result<(), AppError> {
    if !(1000..=9999).contains(&year) {
        return Err(AppError::BadRequest(format!(
            "Year {} must have four digits",
            year
        )));
    }
    Ok(())
}

fn check_two_digit(field: &str, value: i32) -> Result<(), AppError> {
    if !(1..=99).contains(&value) {
        return Err(AppError::BadRequest(format!(
            "{} {} must be between 1 and 99",
            field, value
        )));
    }
    Ok(())
}
