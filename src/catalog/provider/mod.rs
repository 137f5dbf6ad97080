mod api_types;
mod http;
mod tmdb;

pub use http::HttpClient;
pub use tmdb::{TmdbClient, TmdbCredentials};

/// TMDB image sizes, grouped by image kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSize {
    PosterSmall,
    PosterMedium,
    PosterLarge,
    BackdropSmall,
    BackdropMedium,
    BackdropLarge,
    ProfileSmall,
    ProfileMedium,
    ProfileLarge,
    Original,
}

impl ImageSize {
    /// Path segment understood by the image CDN
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PosterSmall => "w185",
            Self::PosterMedium => "w342",
            Self::PosterLarge => "w500",
            Self::BackdropSmall => "w300",
            Self::BackdropMedium => "w780",
            Self::BackdropLarge => "w1280",
            Self::ProfileSmall => "w45",
            Self::ProfileMedium => "w185",
            Self::ProfileLarge => "h632",
            Self::Original => "original",
        }
    }

    /// Full image URL for a relative image path
    pub fn url(self, image_base_url: &str, path: Option<&str>) -> Option<String> {
        let base = image_base_url.trim_end_matches('/');
        path.filter(|p| !p.is_empty())
            .map(|p| format!("{base}/{}/{}", self.as_str(), p.trim_start_matches('/')))
    }
}
