//! SeaORM entity definitions for PostgreSQL database.

pub mod user_repo;
