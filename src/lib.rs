//! GitHub users server library.
//!
//! Synchronizes public GitHub profiles and repository lists into PostgreSQL
//! and serves them back through a small read-only HTTP API.

pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
