//! Request and response DTOs shared by every API endpoint.
//!
//! These types are the JSON contract of the HTTP API. Server-side domain models in
//! `server::model` convert into them with `into_dto()` and parameter types are built
//! from them with `from_dto()`.

pub mod api;
pub mod correction;
pub mod doi;
pub mod fee;
pub mod manuscript;
pub mod notification;
pub mod payment;
pub mod review;
pub mod user;
pub mod volume;
