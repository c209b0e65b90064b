//! jobtrail library
//!
//! Storage, authorization, and domain layer for a personal job-application
//! tracker: job applications, behavioral-interview STAR stories, and notes
//! organized into per-user nested folders. The UI shell consumes this
//! library; nothing here renders anything.

pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod identity;
pub mod services;
pub mod tree;
