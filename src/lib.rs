pub mod config;
pub mod error;
pub mod geo;
pub mod models;
pub mod repository;
pub mod services;
pub mod web;
