//! SeaORM entity definitions for the journal database.

pub mod prelude;

pub mod correction;
pub mod doi_sequence;
pub mod fee_config;
pub mod issue;
pub mod manuscript;
pub mod notification;
pub mod payment;
pub mod review;
pub mod user;
pub mod user_role;
pub mod volume;
