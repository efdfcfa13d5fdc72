//! league-portal HTTP server.
//!
//! This crate provides the axum surface of the league portal: player,
//! season and staff handlers, the Postgres repositories behind them, the
//! session extractor and configuration loading.

pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;
