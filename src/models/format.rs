//! Display helpers shared by the terminal cards and the JSON API.

use crate::constants::NOT_AVAILABLE;

pub const UNKNOWN_TITLE: &str = "Unknown Title";

pub const NO_OVERVIEW: &str = "No overview available.";

/// Joins an image base such as `https://image.tmdb.org/t/p/w500` with a
/// catalog poster path, tolerating paths with or without a leading slash.
#[must_use]
pub fn poster_url(image_base_url: &str, poster_path: Option<&str>) -> Option<String> {
    let path = poster_path.map(str::trim).filter(|p| !p.is_empty())?;
    let base = image_base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    Some(format!("{base}/{path}"))
}

#[must_use]
pub fn display_title(title: &str) -> &str {
    if title.trim().is_empty() {
        UNKNOWN_TITLE
    } else {
        title
    }
}

/// Card rating: one decimal, `N/A` when unknown.
#[must_use]
pub fn format_rating(vote_average: Option<f64>) -> String {
    vote_average.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{v:.1}"))
}

/// Detail-page rating: `x / 10`, `N/A` when unknown or zero.
#[must_use]
pub fn format_rating_out_of_ten(vote_average: Option<f64>) -> String {
    match vote_average {
        Some(v) if v > 0.0 => format!("{v} / 10"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

#[must_use]
pub fn release_year(release_date: Option<&str>) -> String {
    release_date
        .and_then(|d| d.split('-').next())
        .filter(|y| !y.is_empty())
        .map_or_else(|| NOT_AVAILABLE.to_string(), str::to_string)
}

#[must_use]
pub fn format_language(language: Option<&str>) -> String {
    language
        .filter(|l| !l.is_empty())
        .map_or_else(|| NOT_AVAILABLE.to_string(), str::to_uppercase)
}

/// `148` → `2h 28m`.
#[must_use]
pub fn format_runtime(minutes: Option<u32>) -> String {
    match minutes {
        Some(m) if m > 0 => format!("{}h {}m", m / 60, m % 60),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// `160000000` → `$160,000,000`.
#[must_use]
pub fn format_money(amount: Option<u64>) -> String {
    match amount {
        Some(a) if a > 0 => format!("${}", group_thousands(a)),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

#[must_use]
pub fn join_names<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let joined = names.into_iter().collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://image.tmdb.org/t/p/w500";

    #[test]
    fn test_poster_url_handles_slashes() {
        assert_eq!(
            poster_url(BASE, Some("/abc.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
        assert_eq!(
            poster_url("https://image.tmdb.org/t/p/w500/", Some("abc.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
        assert_eq!(poster_url(BASE, Some("  ")), None);
        assert_eq!(poster_url(BASE, None), None);
    }

    #[test]
    fn test_format_runtime() {
        assert_eq!(format_runtime(Some(148)), "2h 28m");
        assert_eq!(format_runtime(Some(45)), "0h 45m");
        assert_eq!(format_runtime(Some(0)), "N/A");
        assert_eq!(format_runtime(None), "N/A");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Some(160_000_000)), "$160,000,000");
        assert_eq!(format_money(Some(999)), "$999");
        assert_eq!(format_money(Some(1_000)), "$1,000");
        assert_eq!(format_money(Some(0)), "N/A");
    }

    #[test]
    fn test_card_fields() {
        assert_eq!(format_rating(Some(8.369)), "8.4");
        assert_eq!(format_rating(None), "N/A");
        assert_eq!(format_rating_out_of_ten(Some(0.0)), "N/A");
        assert_eq!(release_year(Some("2010-07-15")), "2010");
        assert_eq!(release_year(Some("")), "N/A");
        assert_eq!(format_language(Some("en")), "EN");
        assert_eq!(display_title(""), "Unknown Title");
    }

    #[test]
    fn test_join_names() {
        assert_eq!(join_names(["Action", "Drama"]), "Action, Drama");
        assert_eq!(join_names(Vec::<&str>::new()), "N/A");
    }
}
