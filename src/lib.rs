//! # nameinfo
//!
//! Gender, age and nationality estimates for a first name, with a local
//! SQLite cache of previous lookups.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌────────────────┐   ┌──────────────┐
//! │ normalize  │──▶│ ViewController │──▶│ LookupClient │──▶ genderize / agify / nationalize
//! └────────────┘   └───────┬────────┘   └──────────────┘
//!                          │ upsert / subscribe
//!                          ▼
//!                   ┌─────────────┐
//!                   │  NameStore  │  SQLite (names table)
//!                   └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! nameinfo init
//! nameinfo lookup jacob
//! nameinfo recent
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Records and derived display attributes |
//! | [`normalize`] | Name normalization (cache key) |
//! | [`lookup`] | HTTP client for the inference services |
//! | [`store`] | Observable name cache (SQLite, in-memory) |
//! | [`controller`] | View state and lookup orchestration |
//! | [`render`] | Terminal output |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |

pub mod commands;
pub mod config;
pub mod controller;
pub mod country;
pub mod db;
pub mod error;
pub mod locale;
pub mod lookup;
pub mod migrate;
pub mod models;
pub mod normalize;
pub mod render;
pub mod store;
