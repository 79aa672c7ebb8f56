//! Administrative services.
//!
//! Provides the temporary verification code used to bootstrap the first admin.

pub mod code;
