//! MoldTrack server library.
//!
//! Core functionality for the mold lifecycle server: database operations,
//! authentication, the approval workflow engine, and the HTTP API.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
