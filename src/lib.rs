pub mod cli;
pub mod commands;
pub mod config;
pub mod detector;
pub mod error;
pub mod export;
pub mod gate;
pub mod interactive;
pub mod report;
pub mod scanner;
pub mod session;
