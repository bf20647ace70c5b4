//! Pilot compensation engine.
//!
//! This crate computes a pilot's annual and monthly compensation under a
//! multi-year collective agreement: pay-table resolution across published
//! and projected contract years, date segmentation around the rate-switch and
//! step-progression dates, day-by-day accrual of statutory contributions,
//! bracket-based income tax, union dues, and a quick overtime valuation.
//!
//! The engine is a set of pure functions over an immutable
//! [`config::ContractConfig`] loaded once at startup. The [`api`] module
//! exposes it over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod pay_table;
