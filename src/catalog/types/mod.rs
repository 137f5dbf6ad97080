mod detail;
mod movie;

pub use detail::{CastMember, Company, CrewMember, MovieDetail, Video};
pub use movie::{Category, Genre, MovieSummary, TimeWindow};
