// src/wiki/mod.rs
pub mod client;
pub mod config;
pub mod models;

pub use client::WikiClient;
pub use config::ScrapeConfig;
