//! Factory methods for creating test data.
//!
//! Factories insert entities with sensible defaults, reducing boilerplate in tests.
//! Each entity has its own module with a `Factory` struct for customization and a
//! `create_*` convenience function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let author = factory::user::create_user(&db).await?;
//! let manuscript = factory::manuscript::create_manuscript(&db, author.id).await?;
//!
//! let editor = factory::user::UserFactory::new(&db)
//!     .roles(&["author", "editor"])
//!     .active_role("editor")
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Users and their role rows
//! - `manuscript` - Manuscripts
//! - `volume` - Volumes and issues
//! - `correction` - Corrections
//! - `payment` - Payments
//! - `fee_config` - Fee configuration document
//! - `helpers` - ID generation and multi-entity helpers

pub mod correction;
pub mod fee_config;
pub mod helpers;
pub mod manuscript;
pub mod payment;
pub mod user;
pub mod volume;

pub use correction::create_correction;
pub use manuscript::create_manuscript;
pub use user::create_user;
pub use volume::{create_issue, create_volume};
