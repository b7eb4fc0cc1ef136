pub mod config;
pub mod domain;
pub mod forms;
pub mod repository;
pub mod routes;
pub mod services;
