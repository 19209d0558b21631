pub mod bookmarks;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod event_log;
pub mod menu;
pub mod models;
pub mod player;
pub mod storage;
