pub mod app;
pub mod config;
pub mod credential;
pub mod meshstack;
pub mod report;
pub mod run_context;
pub mod runner;
pub mod shared;
pub mod steps;
