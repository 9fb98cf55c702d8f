//! Insured Records API Library
//!
//! CRUD management of insured person records for an insurance product:
//! an axum REST API over Postgres, plus a typed client and the view-state
//! logic consumed by the front end.
//!
//! # Modules
//!
//! - `api_client`: typed HTTP client mirroring the REST surface.
//! - `config`: configuration management.
//! - `db`: database connection and pool management.
//! - `errors`: error handling types and the single HTTP translator.
//! - `handlers`: HTTP request handlers.
//! - `models`: entity, request DTOs and response envelopes.
//! - `repository`: data access for the `insureds` table.
//! - `service`: business orchestration (uniqueness, age, paging).
//! - `validation`: pure field-level and business-rule validators.
//! - `view_state`: list/form view state and transition functions.

pub mod api_client;
pub mod config;
pub mod db;
pub mod errors;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod validation;
pub mod view_state;
