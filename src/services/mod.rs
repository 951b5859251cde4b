// src/services/mod.rs
pub mod api_client;
pub mod painel_service;
pub mod render_service;
