//! Catalogue search
//!
//! Normalized substring matching over title/artist (and their kana
//! readings), ranked exact > title substring > artist substring. Linear
//! scan; the catalogue is at most a few hundred songs.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use utareq_common::catalog::{parse_songs, Song};
use utareq_common::normalize::normalize_for_search;

use crate::api::songs::load_catalog;
use crate::api::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub songs: Vec<Song>,
}

/// Rank catalogue songs against a normalized query term
pub fn rank_songs(songs: Vec<Song>, normalized_term: &str) -> Vec<Song> {
    let mut exact_matches = Vec::new();
    let mut title_matches = Vec::new();
    let mut artist_matches = Vec::new();

    for song in songs {
        let title_keys = [
            normalize_for_search(&song.title),
            song.title_kana.as_deref().map(normalize_for_search).unwrap_or_default(),
        ];
        let artist_keys = [
            normalize_for_search(&song.artist),
            song.artist_kana.as_deref().map(normalize_for_search).unwrap_or_default(),
        ];

        let title_hit = title_keys
            .iter()
            .any(|k| !k.is_empty() && k.contains(normalized_term));
        let artist_hit = artist_keys
            .iter()
            .any(|k| !k.is_empty() && k.contains(normalized_term));

        if !title_hit && !artist_hit {
            continue;
        }

        let exact = title_keys.iter().any(|k| k == normalized_term)
            || artist_keys.iter().any(|k| k == normalized_term);

        if exact {
            exact_matches.push(song);
        } else if title_hit {
            title_matches.push(song);
        } else {
            artist_matches.push(song);
        }
    }

    exact_matches.extend(title_matches);
    exact_matches.extend(artist_matches);
    exact_matches
}

/// GET /api/search?q=term
pub async fn search_songs(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let term = query.q.trim();
    if term.is_empty() {
        return Err(ApiError::BadRequest("Search term is required.".to_string()));
    }

    let normalized = normalize_for_search(term);
    let songs = parse_songs(&load_catalog(&state).await?);
    let matches = rank_songs(songs, &normalized);

    Ok(Json(SearchResponse {
        query: term.to_string(),
        count: matches.len(),
        songs: matches,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Song> {
        parse_songs(
            "Lemon,米津玄師,J-Pop\n\
             炎 (ホムラ),LiSA,Anime\n\
             紅蓮華 (グレンゲ),LiSA,Anime\n\
             レモン,架空歌手,J-Pop\n\
             レモンティー,架空バンド,J-Rock",
        )
    }

    #[test]
    fn exact_title_match_ranks_first() {
        let results = rank_songs(catalog(), &normalize_for_search("レモン"));
        assert_eq!(results[0].title, "レモン");
        // substring match on レモンティー follows the exact match
        assert_eq!(results[1].title, "レモンティー");
    }

    #[test]
    fn ascii_query_is_case_insensitive() {
        let results = rank_songs(catalog(), &normalize_for_search("lemon"));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Lemon");
    }

    #[test]
    fn artist_matches_rank_after_title_matches() {
        let results = rank_songs(catalog(), &normalize_for_search("LiSA"));
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|s| s.artist == "LiSA"));
    }

    #[test]
    fn kana_reading_matches_title() {
        let results = rank_songs(catalog(), &normalize_for_search("ほむら"));
        assert_eq!(results[0].title, "炎");
    }

    #[test]
    fn halfwidth_query_matches_fullwidth_title() {
        let results = rank_songs(catalog(), &normalize_for_search("ﾚﾓﾝﾃｨｰ"));
        assert_eq!(results[0].title, "レモンティー");
    }

    #[test]
    fn no_match_returns_empty() {
        let results = rank_songs(catalog(), &normalize_for_search("存在しない曲"));
        assert!(results.is_empty());
    }
}
