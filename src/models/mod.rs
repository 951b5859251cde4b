// src/models/mod.rs
pub mod dados;
pub mod entidade;
pub mod formularios;
