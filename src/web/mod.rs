// src/web/mod.rs
pub mod cadastro_handlers;
pub mod edicao_handlers;
pub mod painel_handlers;
pub mod remocao_handlers;
pub mod routes;
pub mod sessao;
