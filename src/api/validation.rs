use super::ApiError;
use crate::models::MovieId;

const MAX_QUERY_LEN: usize = 200;

pub fn validate_movie_id(raw: &str) -> Result<MovieId, ApiError> {
    MovieId::parse(raw).ok_or_else(|| ApiError::validation("Movie ID cannot be empty"))
}

/// `None` for a blank query, which selects the popular listing.
pub fn validate_search_query(query: Option<&str>) -> Result<Option<&str>, ApiError> {
    let Some(trimmed) = query.map(str::trim).filter(|q| !q.is_empty()) else {
        return Ok(None);
    };

    if trimmed.chars().count() > MAX_QUERY_LEN {
        return Err(ApiError::validation(format!(
            "Search query must be {MAX_QUERY_LEN} characters or less"
        )));
    }

    Ok(Some(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_movie_id() {
        assert_eq!(validate_movie_id("42").unwrap().as_str(), "42");
        assert!(validate_movie_id("  ").is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query(None).unwrap(), None);
        assert_eq!(validate_search_query(Some("   ")).unwrap(), None);
        assert_eq!(
            validate_search_query(Some(" dune ")).unwrap(),
            Some("dune")
        );
        assert!(validate_search_query(Some(&"x".repeat(201))).is_err());
    }
}
