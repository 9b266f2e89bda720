//! Test support for the Cadence workspace: throwaway Postgres databases and seeders for the rows
//! that other Cadence services write.

pub mod seed;

mod database;
mod error;

pub use database::{DSN_ENV, TestDatabase, env_dsn};
pub use error::{Error, Result};
