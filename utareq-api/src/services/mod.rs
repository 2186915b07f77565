//! External service clients

pub mod kana_client;
