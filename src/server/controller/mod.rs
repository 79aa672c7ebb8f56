//! HTTP request handlers.
//!
//! Controllers authenticate the caller through `AuthGuard`, convert DTOs into
//! operation parameters, call a service and convert the result back into a DTO.

pub mod admin;
pub mod auth;
pub mod correction;
pub mod doi;
pub mod fee;
pub mod manuscript;
pub mod payment;
pub mod review;
pub mod user;
pub mod volume;
