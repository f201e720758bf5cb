//! Shared configuration and collaborator interfaces

pub mod config;
pub mod traits;
