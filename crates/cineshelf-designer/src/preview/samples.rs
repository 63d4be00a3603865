//! The fixed sample movies shown in the preview.

use serde::{Serialize, Serializer};

use crate::util::format_number;

/// One movie card in the preview.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleMovie {
    pub title: &'static str,
    pub year: u16,
    #[serde(serialize_with = "rating_text")]
    pub rating: f64,
    pub format: &'static str,
    pub runtime: &'static str,
    pub director: &'static str,
    pub genre: &'static str,
    pub poster: &'static str,
}

fn rating_text<S: Serializer>(rating: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_number(*rating))
}

pub const SAMPLE_MOVIES: [SampleMovie; 3] = [
    SampleMovie {
        title: "Ghostbusters",
        year: 1984,
        rating: 8.0,
        format: "Blu-ray",
        runtime: "105 min",
        director: "Ivan Reitman",
        genre: "Comedy",
        poster: "https://image.tmdb.org/t/p/w500/3FS5OiozObQ4xKj7WI.jpg",
    },
    SampleMovie {
        title: "The Matrix",
        year: 1999,
        rating: 8.7,
        format: "4K",
        runtime: "136 min",
        director: "Wachowski",
        genre: "Sci-Fi",
        poster: "https://image.tmdb.org/t/p/w500/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
    },
    SampleMovie {
        title: "Jurassic Park",
        year: 1993,
        rating: 8.2,
        format: "DVD",
        runtime: "127 min",
        director: "Spielberg",
        genre: "Adventure",
        poster: "https://image.tmdb.org/t/p/w500/oU7Oq2kFAAlGqbU4VoAE36g4hoI.jpg",
    },
];
