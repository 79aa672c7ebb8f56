//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models and return them to the
//! service layer, which converts them into domain models. All database queries, inserts,
//! updates, and deletes are performed through these repositories.

pub mod correction;
pub mod doi_sequence;
pub mod fee_config;
pub mod manuscript;
pub mod notification;
pub mod payment;
pub mod review;
pub mod user;
pub mod volume;

#[cfg(test)]
mod test;
