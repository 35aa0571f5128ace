pub mod config;
pub mod controller;
pub mod effects;
pub mod logging;
pub mod ui;
