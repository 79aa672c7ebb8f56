//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Implementing workflow rules and validation
//! - **Orchestration**: Coordinating repository calls, notifications and the payment gateway
//! - **Domain Models**: Working with domain models rather than DTOs or entity models

pub mod admin;
pub mod auth;
pub mod correction;
pub mod doi;
pub mod fee;
pub mod manuscript;
pub mod notification;
pub mod payment;
pub mod review;
pub mod user;
pub mod volume;

#[cfg(test)]
mod test;
