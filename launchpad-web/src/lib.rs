//! # Launchpad Web Front End
//!
//! Marketing landing page plus the session check the client-side app calls
//! to find out whether the visitor is signed in.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: Security headers
//! - `pages`: Landing page composition
//! - `routes`: Route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod pages;
pub mod routes;
