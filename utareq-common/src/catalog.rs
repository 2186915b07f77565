//! Song catalogue parsing
//!
//! The catalogue is stored as a flat delimited text blob, one song per line:
//!
//! ```text
//! Title (TitleKana),Artist (ArtistKana),Genre,new,練習中
//! ```
//!
//! Kana readings are optional parenthetical suffixes (ASCII or full-width
//! parentheses). Fields 3-5 are optional: genre, the `new` flag, and the
//! practicing status marker.

use serde::{Deserialize, Serialize};

/// Playability status of a catalogue entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SongStatus {
    Playable,
    Practicing,
}

/// A single catalogue entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub title: String,
    pub artist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_kana: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_kana: Option<String>,
    pub genre: String,
    pub is_new: bool,
    pub status: SongStatus,
}

/// Default catalogue seeded on first run when no song list has been saved
pub const DEFAULT_CATALOG: &str = "夜に駆ける,YOASOBI,J-Pop,new\nPretender,Official髭男dism (オフィシャルヒゲダンディズム),J-Pop\nLemon,米津玄師,J-Pop\n紅蓮華,LiSA,Anime\nドライフラワー,優里,J-Pop\n白日,King Gnu (キングヌー),J-Rock\nマリーゴールド,あいみょん,J-Pop\n猫,DISH//,J-Rock\nうっせぇわ,Ado,J-Pop\n廻廻奇譚,Eve,Anime\n炎,LiSA,Anime\nCry Baby,Official髭男dism (オフィシャルヒゲダンディズム),Anime\nアイドル,YOASOBI,Anime,new\nKICK BACK,米津玄師,Anime\n新時代,Ado,Anime\n旅路,藤井風,J-Pop\n何なんw,藤井風,J-Pop\ngrace,藤井風,J-Pop\nきらり,藤井風,J-Pop\nSubtitle,Official髭男dism (オフィシャルヒゲダンディズム),J-Pop\n怪獣の花唄,Vaundy,J-Rock\nミックスナッツ,Official髭男dism (オフィシャルヒゲダンディズム),Anime\n水平線,back number,J-Pop\nシンデレラボーイ,Saucy Dog,J-Rock\nなんでもないや,RADWIMPS,Anime\nひまわりの約束,秦基博,J-Pop\nHANABI,Mr.Children,J-Pop\n天体観測,BUMP OF CHICKEN,J-Rock\n残酷な天使のテーゼ,高橋洋子,Anime\n千本桜,黒うさP,Vocaloid,,練習中";

/// Split a field into its main text and an optional trailing parenthetical
/// kana reading. Both ASCII `(...)` and full-width `（...）` are accepted.
fn extract_kana(text: &str) -> (String, Option<String>) {
    let trimmed = text.trim();

    // Find the last opening paren with a matching closing paren at the end
    let open = trimmed.rfind(['(', '（']);
    if let Some(open_idx) = open {
        let rest = &trimmed[open_idx..];
        let mut chars = rest.chars();
        chars.next(); // consume the opening paren
        let inner = chars.as_str();
        if let Some(close_idx) = inner.find([')', '）']) {
            let close_len = inner[close_idx..].chars().next().map_or(1, char::len_utf8);
            let after_close = &inner[close_idx + close_len..];
            if after_close.trim().is_empty() && open_idx > 0 {
                let main = trimmed[..open_idx].trim();
                let kana = inner[..close_idx].trim();
                if !main.is_empty() && !kana.is_empty() {
                    return (main.to_string(), Some(kana.to_string()));
                }
            }
        }
    }

    (trimmed.to_string(), None)
}

/// Parse a catalogue blob into songs.
///
/// Blank lines and lines with fewer than two non-empty fields are skipped.
pub fn parse_songs(input: &str) -> Vec<Song> {
    input
        .replace("\r\n", "\n")
        .split('\n')
        .filter_map(|line| {
            if line.trim().is_empty() {
                return None;
            }
            let parts: Vec<&str> = line.split(',').collect();
            if parts.len() < 2 || parts[0].trim().is_empty() || parts[1].trim().is_empty() {
                return None;
            }

            let (title, title_kana) = extract_kana(parts[0]);
            let (artist, artist_kana) = extract_kana(parts[1]);

            let status = if parts.get(4).map(|s| s.trim()) == Some("練習中") {
                SongStatus::Practicing
            } else {
                SongStatus::Playable
            };

            Some(Song {
                title,
                artist,
                title_kana,
                artist_kana,
                genre: parts.get(2).map(|s| s.trim()).unwrap_or("").to_string(),
                is_new: parts
                    .get(3)
                    .map(|s| s.trim().eq_ignore_ascii_case("new"))
                    .unwrap_or(false),
                status,
            })
        })
        .collect()
}

/// Serialize songs back to the delimited blob format.
///
/// Trailing empty fields are trimmed so `Title,Artist,Genre` round-trips
/// without spurious commas.
pub fn songs_to_string(songs: &[Song]) -> String {
    songs
        .iter()
        .map(|song| {
            let title = match &song.title_kana {
                Some(kana) => format!("{} ({})", song.title, kana),
                None => song.title.clone(),
            };
            let artist = match &song.artist_kana {
                Some(kana) => format!("{} ({})", song.artist, kana),
                None => song.artist.clone(),
            };

            let mut parts = vec![
                title,
                artist,
                song.genre.clone(),
                if song.is_new { "new".to_string() } else { String::new() },
                if song.status == SongStatus::Practicing {
                    "練習中".to_string()
                } else {
                    String::new()
                },
            ];

            while parts.len() > 2 && parts.last().map(|s| s.is_empty()).unwrap_or(false) {
                parts.pop();
            }

            parts.join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_line() {
        let songs = parse_songs("Lemon,米津玄師");
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].title, "Lemon");
        assert_eq!(songs[0].artist, "米津玄師");
        assert_eq!(songs[0].genre, "");
        assert!(!songs[0].is_new);
        assert_eq!(songs[0].status, SongStatus::Playable);
    }

    #[test]
    fn parses_kana_suffixes() {
        let songs = parse_songs("白日 (ハクジツ),King Gnu (キングヌー),J-Rock");
        assert_eq!(songs[0].title, "白日");
        assert_eq!(songs[0].title_kana.as_deref(), Some("ハクジツ"));
        assert_eq!(songs[0].artist, "King Gnu");
        assert_eq!(songs[0].artist_kana.as_deref(), Some("キングヌー"));
        assert_eq!(songs[0].genre, "J-Rock");
    }

    #[test]
    fn parses_fullwidth_parens() {
        let songs = parse_songs("残酷な天使のテーゼ（ザンコクナテンシノテーゼ）,高橋洋子,Anime");
        assert_eq!(songs[0].title, "残酷な天使のテーゼ");
        assert_eq!(songs[0].title_kana.as_deref(), Some("ザンコクナテンシノテーゼ"));
    }

    #[test]
    fn parses_flags() {
        let songs = parse_songs("アイドル,YOASOBI,Anime,NEW\n千本桜,黒うさP,Vocaloid,,練習中");
        assert!(songs[0].is_new);
        assert_eq!(songs[0].status, SongStatus::Playable);
        assert!(!songs[1].is_new);
        assert_eq!(songs[1].status, SongStatus::Practicing);
    }

    #[test]
    fn skips_blank_and_malformed_lines() {
        let songs = parse_songs("\n\nOnlyTitle\n,NoTitle\nLemon,米津玄師\n");
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].title, "Lemon");
    }

    #[test]
    fn tolerates_crlf() {
        let songs = parse_songs("Lemon,米津玄師\r\n炎,LiSA,Anime\r\n");
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[1].title, "炎");
    }

    #[test]
    fn round_trips_full_line() {
        let line = "Title (Kana),Artist (Kana),Genre,new,練習中";
        let songs = parse_songs(line);
        assert_eq!(songs_to_string(&songs), line);
    }

    #[test]
    fn round_trips_trimming_trailing_fields() {
        let line = "Lemon,米津玄師,J-Pop";
        assert_eq!(songs_to_string(&parse_songs(line)), line);

        let minimal = "Lemon,米津玄師";
        assert_eq!(songs_to_string(&parse_songs(minimal)), minimal);
    }

    #[test]
    fn round_trips_default_catalog() {
        let songs = parse_songs(DEFAULT_CATALOG);
        assert_eq!(songs.len(), 30);
        assert_eq!(songs_to_string(&songs), DEFAULT_CATALOG);
    }

    #[test]
    fn artist_without_kana_keeps_slashes() {
        let songs = parse_songs("猫,DISH//,J-Rock");
        assert_eq!(songs[0].artist, "DISH//");
        assert_eq!(songs[0].artist_kana, None);
    }
}
