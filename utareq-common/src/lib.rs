//! # utareq Common Library
//!
//! Shared code for the utareq song-request service:
//! - Database initialization, schema, and row models
//! - Song catalogue parsing (delimited text blob)
//! - Text normalization for search and validation
//! - NG-word filtering
//! - Ranking period helpers
//! - Configuration loading and root folder resolution

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod ngword;
pub mod normalize;
pub mod ranking;

pub use catalog::{parse_songs, songs_to_string, Song, SongStatus};
pub use error::{Error, Result};
pub use ranking::RankingPeriod;
