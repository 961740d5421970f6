pub mod api;
pub mod auth;
pub mod banner;
pub mod config;
pub mod consts;
pub mod db;
pub mod events;
pub mod model;
pub mod notifier;
pub mod server;
