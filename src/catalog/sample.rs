//! Built-in catalog served when the remote API cannot be reached

use crate::catalog::types::{
    CastMember, Company, CrewMember, Genre, MovieDetail, MovieSummary, Video,
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

/// Sample movie listing used for every list operation
pub fn sample_movies() -> Vec<MovieSummary> {
    vec![
        MovieSummary::new(1, "The Shawshank Redemption")
            .with_rating(9.3)
            .with_release_date(date(1994, 9, 23))
            .with_overview(
                "Two imprisoned men bond over several years, finding redemption through acts of decency.",
            )
            .with_genres(vec![18, 80]),
        MovieSummary::new(2, "The Godfather")
            .with_rating(9.2)
            .with_release_date(date(1972, 3, 14))
            .with_overview(
                "The aging patriarch of an organized crime dynasty transfers control to his son.",
            )
            .with_genres(vec![18, 80]),
        MovieSummary::new(3, "Inception")
            .with_rating(8.8)
            .with_release_date(date(2010, 7, 16))
            .with_overview(
                "A thief who steals corporate secrets through dream-sharing technology is given the task of planting an idea.",
            )
            .with_genres(vec![28, 878]),
    ]
}

/// Sample detail record; callers overwrite the id with the requested one
pub fn sample_detail(id: i64) -> MovieDetail {
    let mut summary = sample_movies().swap_remove(0);
    summary.id = id;

    MovieDetail {
        summary,
        runtime_minutes: 142,
        genres: vec![Genre::new(18, "Drama"), Genre::new(80, "Crime")],
        tagline: Some("Fear can hold you prisoner. Hope can set you free.".to_string()),
        budget: 25_000_000,
        revenue: 28_341_469,
        homepage: None,
        production_companies: vec![Company {
            id: 1,
            name: "Castle Rock Entertainment".to_string(),
            logo_path: None,
        }],
        cast: vec![
            CastMember {
                id: 1,
                name: "Tim Robbins".to_string(),
                character: "Andy Dufresne".to_string(),
                profile_path: None,
            },
            CastMember {
                id: 2,
                name: "Morgan Freeman".to_string(),
                character: "Ellis Boyd 'Red' Redding".to_string(),
                profile_path: None,
            },
        ],
        crew: vec![CrewMember {
            id: 1,
            name: "Frank Darabont".to_string(),
            job: "Director".to_string(),
            department: "Directing".to_string(),
            profile_path: None,
        }],
        videos: vec![Video {
            id: "1".to_string(),
            key: "PLl99DlL6b4".to_string(),
            name: "Trailer".to_string(),
            site: "YouTube".to_string(),
            kind: "Trailer".to_string(),
        }],
    }
}

/// Sample genre list (TMDB movie genres)
pub fn sample_genres() -> Vec<Genre> {
    [
        (28, "Action"),
        (12, "Adventure"),
        (16, "Animation"),
        (35, "Comedy"),
        (80, "Crime"),
        (18, "Drama"),
        (10751, "Family"),
        (14, "Fantasy"),
        (36, "History"),
        (27, "Horror"),
        (10402, "Music"),
        (9648, "Mystery"),
        (10749, "Romance"),
        (878, "Science Fiction"),
        (53, "Thriller"),
        (10752, "War"),
        (37, "Western"),
    ]
    .into_iter()
    .map(|(id, name)| Genre::new(id, name))
    .collect()
}
