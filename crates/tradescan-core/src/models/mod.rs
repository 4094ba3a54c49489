//! Data models: trade records, journal entries and configuration.

pub mod config;
pub mod journal;
pub mod trade;
