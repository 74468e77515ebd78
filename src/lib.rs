//! Sanitation - A local-first daily brand & sanitation checklist

pub mod catalog;
pub mod commands;
pub mod config;
pub mod controller;
pub mod db;
pub mod export;
pub mod help;
pub mod logging;
pub mod models;
pub mod reset;
pub mod tui;
