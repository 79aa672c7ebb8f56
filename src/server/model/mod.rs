//! Domain models and operation parameter types.
//!
//! Domain models are converted from SeaORM entities at the repository boundary with
//! `from_entity()` and into API DTOs with `into_dto()`. Parameter types carry the
//! validated inputs of a single operation.

pub mod correction;
pub mod doi;
pub mod fee;
pub mod manuscript;
pub mod notification;
pub mod payment;
pub mod review;
pub mod user;
pub mod volume;
