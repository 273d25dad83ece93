//! Süt Sihirbazı - a natural-language assistant for a dairy-farm database.
//!
//! Turns Turkish questions into PostgreSQL queries, executes them, and
//! explains the results in plain language. Questions outside the database
//! get a general chat answer instead. Voice input goes through a
//! Whisper-compatible transcription service first.

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod llm;
pub mod logging;
pub mod safety;
pub mod speech;
pub mod workflow;
