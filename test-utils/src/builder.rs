use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, UserRole};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(UserRole)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables should be added in dependency order (tables with foreign
    /// keys after their referenced tables).
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity implementing `EntityTrait` to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the user and role tables.
    pub fn with_user_tables(self) -> Self {
        self.with_table(User).with_table(UserRole)
    }

    /// Adds all tables required for manuscript operations.
    ///
    /// This convenience method adds, in dependency order:
    /// - User, UserRole
    /// - Manuscript
    /// - Notification
    pub fn with_manuscript_tables(self) -> Self {
        self.with_user_tables()
            .with_table(Manuscript)
            .with_table(Notification)
    }

    /// Adds all tables required for DOI reservation and publication.
    ///
    /// Extends `with_manuscript_tables()` with corrections, volumes, issues and
    /// the DOI sequence table.
    pub fn with_publication_tables(self) -> Self {
        self.with_manuscript_tables()
            .with_table(Correction)
            .with_table(Volume)
            .with_table(Issue)
            .with_table(DoiSequence)
    }

    /// Adds every table in the schema.
    pub fn with_all_tables(self) -> Self {
        self.with_publication_tables()
            .with_table(Review)
            .with_table(Payment)
            .with_table(FeeConfig)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized test context with database and tables ready
    /// - `Err(TestError::Database)` - Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
