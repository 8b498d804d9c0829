// src/anthology/mod.rs
pub mod models;
pub mod reader;
