pub mod app;
pub mod classifier;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod report;
pub mod scoring;
pub mod tasks;
pub mod trends;
