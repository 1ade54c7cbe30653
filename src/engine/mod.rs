pub mod card_options;
pub mod commands;
pub mod config;
pub mod i18n;
pub mod media;
pub mod menu;
pub mod models;
pub mod options;
pub mod rules;
pub mod stats;
pub mod status;
