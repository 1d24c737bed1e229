//! Artist model.
//!
//! An artist is identified by name and carries a popularity score that
//! may change after booking. Performances hold artists through `Arc`,
//! so popularity uses interior mutability.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// Optional media references shown alongside a performance.
///
/// Inert payload: the engine stores and republishes these but never
/// interprets them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistMedia {
    /// Poster image URL.
    pub image_url: Option<String>,
    /// URL of the artist's signature track.
    pub masterpiece_url: Option<String>,
}

impl ArtistMedia {
    /// Creates empty media references.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the poster image URL.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Sets the signature track URL.
    pub fn with_masterpiece(mut self, url: impl Into<String>) -> Self {
        self.masterpiece_url = Some(url.into());
        self
    }
}

/// A performing artist.
#[derive(Debug)]
pub struct Artist {
    name: String,
    genre: String,
    popularity: AtomicI64,
    media: ArtistMedia,
}

impl Artist {
    /// Creates a new artist without media references.
    pub fn new(name: impl Into<String>, genre: impl Into<String>, popularity: i64) -> Self {
        Self {
            name: name.into(),
            genre: genre.into(),
            popularity: AtomicI64::new(popularity),
            media: ArtistMedia::default(),
        }
    }

    /// Attaches media references.
    pub fn with_media(mut self, media: ArtistMedia) -> Self {
        self.media = media;
        self
    }

    /// Identity key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Musical genre.
    pub fn genre(&self) -> &str {
        &self.genre
    }

    /// Current popularity (higher = more popular).
    pub fn popularity(&self) -> i64 {
        self.popularity.load(Ordering::Relaxed)
    }

    /// Updates popularity. Structures that recorded the old value keep it.
    pub fn set_popularity(&self, popularity: i64) {
        self.popularity.store(popularity, Ordering::Relaxed);
    }

    /// Image and signature-track links.
    pub fn media(&self) -> &ArtistMedia {
        &self.media
    }
}

impl fmt::Display for Artist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, popularity: {})",
            self.name,
            self.genre,
            self.popularity()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artist_builder() {
        let artist = Artist::new("Beyond", "Rock", 98).with_media(
            ArtistMedia::new()
                .with_image("https://img.example/beyond.jpg")
                .with_masterpiece("https://audio.example/beyond.mp3"),
        );

        assert_eq!(artist.name(), "Beyond");
        assert_eq!(artist.genre(), "Rock");
        assert_eq!(artist.popularity(), 98);
        assert_eq!(
            artist.media().image_url.as_deref(),
            Some("https://img.example/beyond.jpg")
        );
        assert_eq!(artist.to_string(), "Beyond (Rock, popularity: 98)");
    }

    #[test]
    fn test_popularity_mutation_through_shared_reference() {
        let artist = std::sync::Arc::new(Artist::new("Beyond", "Rock", 98));
        let shared = artist.clone();
        shared.set_popularity(50);
        assert_eq!(artist.popularity(), 50);
    }
}
