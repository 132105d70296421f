//! TrendScore Core: domain types, trend indicators, and bar providers.
//!
//! This crate holds everything a scan needs below the scoring layer:
//! - Domain types (bars and validated, time-ordered series)
//! - Ten trend indicators behind the `TrendIndicator` trait
//! - Indicator settings with validation and the default library
//! - Bar providers (Yahoo Finance, synthetic, in-memory) and universes

pub mod data;
pub mod domain;
pub mod indicators;
