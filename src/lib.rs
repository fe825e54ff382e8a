//! Rental search for Munich: listing store, search, view navigation,
//! listing wizard, mock messaging and the backend proxy.

pub mod app;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod messaging;
pub mod models;
pub mod search;
pub mod server;
pub mod sources;
pub mod view;
pub mod wizard;
