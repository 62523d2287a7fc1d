#![forbid(unsafe_code)]

pub mod app;
pub mod browse;
pub mod catalog;
pub mod cli;
pub mod detail;
pub mod filter;
pub mod formats;
pub mod list;
pub mod logging;
pub mod pagination;
pub mod shell;
pub mod show;
