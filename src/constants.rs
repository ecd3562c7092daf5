pub mod tmdb {

    pub const API_BASE_URL: &str = "https://api.themoviedb.org/3";

    pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

    pub const POPULARITY_SORT: &str = "popularity.desc";

    pub const DEFAULT_LANGUAGE: &str = "en-US";
}

pub mod youtube {

    pub const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

    pub const SITE: &str = "YouTube";

    pub const TRAILER_TYPE: &str = "Trailer";
}

pub mod appwrite {

    pub const DEFAULT_ENDPOINT: &str = "https://cloud.appwrite.io/v1";

    /// Placeholder id that asks Appwrite to generate the document id.
    pub const UNIQUE_ID: &str = "unique()";

    /// Documents requested per page when reading a whole collection.
    pub const PAGE_SIZE: u64 = 100;
}

pub mod favorites {

    /// Name of the persisted entry holding the favorites array.
    pub const STORAGE_KEY: &str = "favorites";
}

pub mod intervals {
    use std::time::Duration;

    pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(600);
}

pub mod limits {

    pub const TRENDING_LIMIT: usize = 10;

    pub const MAX_CARDS_PER_PAGE: usize = 20;
}

pub const NOT_AVAILABLE: &str = "N/A";
