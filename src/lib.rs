//! walink - WhatsApp campaign referral links
//!
//! Agents share campaign links carrying `?ref=<code>`. The first request with
//! a known code stores the agent in a cookie; the campaign page then redirects
//! to a WhatsApp chat with that agent (or the campaign's default number) and
//! the campaign message pre-filled. Form submissions are tagged with the
//! attributed agent and campaign.
//!
//! # Features
//! - **server**: HTTP server mode (default)
//! - **cli**: Command-line interface
//!
//! # Architecture
//! - `storage`: SeaORM storage backend and the store traits
//! - `services`: attribution, redirect, form bridge and admin services
//! - `api`: HTTP services and middleware
//! - `cli`: management commands
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging setup

pub mod api;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
