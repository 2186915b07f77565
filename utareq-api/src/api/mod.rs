//! HTTP API handlers for utareq-api

pub mod admin;
pub mod error;
pub mod health;
pub mod kana;
pub mod likes;
pub mod posts;
pub mod presence;
pub mod requests;
pub mod search;
pub mod setlist;
pub mod songs;
pub mod ui;
pub mod ui_config;

pub use error::ApiError;
pub use health::health_routes;
pub use kana::generate_kana;
pub use likes::{get_like_ranking, log_like};
pub use posts::{delete_post, get_posts, save_post};
pub use presence::{get_presence, log_presence};
pub use requests::{get_new_requests, get_request_ranking, log_request};
pub use search::search_songs;
pub use setlist::{create_setlist_suggestion, list_setlist_suggestions};
pub use songs::{get_songs, get_songs_raw, save_songs};
pub use ui::{serve_app_js, serve_index};
pub use ui_config::{get_ui_config, save_ui_config};
