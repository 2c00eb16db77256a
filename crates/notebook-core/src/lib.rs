//! Business logic and repository trait definitions for Open Notebook.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements. It depends only on `notebook-types` -- never on
//! `notebook-infra` or any database/IO crate.

pub mod chat;
pub mod repository;
pub mod service;
