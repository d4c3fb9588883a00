//! Discovery filter criteria.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, bail, ensure};
use chrono::NaiveDate;
use serde::Serialize;

/// Genre sentinel meaning "do not filter by genre".
const ALL_GENRES: &str = "all";

/// Gross-bound sentinel meaning "no filter".
const NO_GROSS_FILTER: &str = "all";

/// Genre filter requested by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenreFilter {
    /// No genre filter (input "all", case-insensitive).
    All,
    /// Filter by the genre with this name (matched case-insensitively).
    Named(String),
}

impl GenreFilter {
    /// Parses a genre name; `"all"` in any case (or an empty name) yields `All`.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_GENRES) {
            Self::All
        } else {
            Self::Named(String::from(trimmed))
        }
    }

    /// Label used in output filenames.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_GENRES,
            Self::Named(name) => name,
        }
    }
}

/// A calendar month, ordered by (year, month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: u32,
    month: u32,
}

impl YearMonth {
    /// Creates a year-month.
    ///
    /// # Errors
    ///
    /// Returns an error if `year` is outside 1..=9999 or `month` outside 1..=12.
    pub fn new(year: u32, month: u32) -> Result<Self> {
        ensure!(
            (1..=9999).contains(&year),
            "year must be between 1 and 9999, got {year}"
        );
        ensure!(
            (1..=12).contains(&month),
            "month must be between 1 and 12, got {month}"
        );
        Ok(Self { year, month })
    }

    /// Year component.
    #[must_use]
    pub const fn year(self) -> u32 {
        self.year
    }

    /// Month component (1-12).
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// First day of the month as `YYYY-MM-01`.
    #[must_use]
    pub fn first_day(self) -> String {
        format!("{:04}-{:02}-01", self.year, self.month)
    }

    /// Last day of the month as `YYYY-MM-DD`, leap years included.
    #[must_use]
    pub fn last_day(self) -> String {
        self.last_date().map_or_else(
            || format!("{:04}-{:02}-31", self.year, self.month),
            |date| date.format("%Y-%m-%d").to_string(),
        )
    }

    fn last_date(self) -> Option<NaiveDate> {
        let year = i32::try_from(self.year).ok()?;
        let (next_year, next_month) = if self.month == 12 {
            (year.checked_add(1)?, 1)
        } else {
            (year, self.month.checked_add(1)?)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month)
    }
}

/// Release type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReleaseType {
    /// Limited and wide theatrical releases.
    Theatrical,
    /// Premiere, digital, physical and TV releases.
    NonTheatrical,
    /// No release type filter.
    Both,
}

impl ReleaseType {
    /// Name as accepted on input and written to the export.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Theatrical => "theatrical",
            Self::NonTheatrical => "non-theatrical",
            Self::Both => "both",
        }
    }

    /// TMDB `with_release_type` value, or `None` for no filter.
    ///
    /// TMDB codes: 1 premiere, 2 limited theatrical, 3 theatrical,
    /// 4 digital, 5 physical, 6 TV.
    #[must_use]
    pub const fn api_filter(self) -> Option<&'static str> {
        match self {
            Self::Theatrical => Some("3|2"),
            Self::NonTheatrical => Some("1|4|5|6"),
            Self::Both => None,
        }
    }
}

impl FromStr for ReleaseType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "theatrical" => Ok(Self::Theatrical),
            "non-theatrical" => Ok(Self::NonTheatrical),
            "both" => Ok(Self::Both),
            other => bail!(
                "unknown release type '{other}' (expected theatrical, non-theatrical or both)"
            ),
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Box office revenue bounds; `None` disables a bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrossRange {
    /// Inclusive minimum revenue (USD).
    pub min: Option<u64>,
    /// Inclusive maximum revenue (USD).
    pub max: Option<u64>,
}

impl GrossRange {
    /// Parses one bound. `"all"` and `0` both mean "no filter".
    ///
    /// # Errors
    ///
    /// Returns an error if the input is neither a sentinel nor a non-negative integer.
    pub fn parse_bound(input: &str) -> Result<Option<u64>> {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case(NO_GROSS_FILTER) {
            return Ok(None);
        }
        let value: u64 = trimmed
            .parse()
            .with_context(|| format!("invalid revenue bound '{trimmed}'"))?;
        Ok((value != 0).then_some(value))
    }

    /// Returns whether `revenue` lies within the active bounds.
    #[must_use]
    pub fn contains(self, revenue: u64) -> bool {
        self.min.is_none_or(|min| revenue >= min) && self.max.is_none_or(|max| revenue <= max)
    }

    /// Label of one bound used in output filenames.
    #[must_use]
    pub fn bound_label(bound: Option<u64>) -> String {
        bound.map_or_else(|| String::from(NO_GROSS_FILTER), |v| v.to_string())
    }
}

/// Validated, immutable discovery criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    genre: GenreFilter,
    start: YearMonth,
    end: YearMonth,
    gross: GrossRange,
    countries: Vec<String>,
    release_type: ReleaseType,
}

impl FilterCriteria {
    /// Creates validated criteria.
    ///
    /// # Errors
    ///
    /// - `start` is after `end`.
    /// - both gross bounds are active and `min > max`.
    /// - `countries` contains no non-empty name.
    pub fn new(
        genre: GenreFilter,
        start: YearMonth,
        end: YearMonth,
        gross: GrossRange,
        countries: Vec<String>,
        release_type: ReleaseType,
    ) -> Result<Self> {
        ensure!(
            start <= end,
            "start date {start} must not be after end date {end}"
        );
        if let (Some(min), Some(max)) = (gross.min, gross.max) {
            ensure!(
                min <= max,
                "minimum revenue {min} must not exceed maximum revenue {max}"
            );
        }
        let countries: Vec<String> = countries
            .into_iter()
            .map(|c| String::from(c.trim()))
            .filter(|c| !c.is_empty())
            .collect();
        ensure!(!countries.is_empty(), "at least one country is required");

        Ok(Self {
            genre,
            start,
            end,
            gross,
            countries,
            release_type,
        })
    }

    /// Requested genre.
    #[must_use]
    pub const fn genre(&self) -> &GenreFilter {
        &self.genre
    }

    /// First month of the release window.
    #[must_use]
    pub const fn start(&self) -> YearMonth {
        self.start
    }

    /// Last month of the release window.
    #[must_use]
    pub const fn end(&self) -> YearMonth {
        self.end
    }

    /// Revenue bounds.
    #[must_use]
    pub const fn gross(&self) -> GrossRange {
        self.gross
    }

    /// Requested country names as entered.
    #[must_use]
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Requested release type.
    #[must_use]
    pub const fn release_type(&self) -> ReleaseType {
        self.release_type
    }

    /// Returns whether a release in `year`/`month` falls inside the window.
    ///
    /// Compared chronologically, so a window of 2020-11..2021-02 accepts
    /// 2020-12 and 2021-01 but not 2020-03.
    #[must_use]
    pub fn covers(&self, year: u32, month: u32) -> bool {
        let released = (year, month);
        released >= (self.start.year, self.start.month)
            && released <= (self.end.year, self.end.month)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn criteria(start: (u32, u32), end: (u32, u32)) -> FilterCriteria {
        FilterCriteria::new(
            GenreFilter::All,
            YearMonth::new(start.0, start.1).unwrap(),
            YearMonth::new(end.0, end.1).unwrap(),
            GrossRange::default(),
            vec![String::from("US")],
            ReleaseType::Both,
        )
        .unwrap()
    }

    #[test]
    fn test_genre_filter_all_is_case_insensitive() {
        // Arrange & Act & Assert
        assert_eq!(GenreFilter::parse("ALL"), GenreFilter::All);
        assert_eq!(GenreFilter::parse(" all "), GenreFilter::All);
        assert_eq!(
            GenreFilter::parse("Action"),
            GenreFilter::Named(String::from("Action"))
        );
    }

    #[test]
    fn test_year_month_rejects_invalid_month() {
        // Arrange & Act
        let result = YearMonth::new(2020, 13);

        // Assert
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("month must be between 1 and 12")
        );
    }

    #[test]
    fn test_year_month_ordering_is_lexicographic() {
        // Arrange
        let late_2020 = YearMonth::new(2020, 11).unwrap();
        let early_2021 = YearMonth::new(2021, 2).unwrap();

        // Act & Assert
        assert!(late_2020 < early_2021);
    }

    #[test]
    fn test_year_month_day_bounds() {
        // Arrange
        let february_leap = YearMonth::new(2024, 2).unwrap();
        let february = YearMonth::new(2023, 2).unwrap();
        let december = YearMonth::new(2020, 12).unwrap();
        let april = YearMonth::new(2020, 4).unwrap();

        // Act & Assert
        assert_eq!(february_leap.first_day(), "2024-02-01");
        assert_eq!(february_leap.last_day(), "2024-02-29");
        assert_eq!(february.last_day(), "2023-02-28");
        assert_eq!(december.last_day(), "2020-12-31");
        assert_eq!(april.last_day(), "2020-04-30");
    }

    #[test]
    fn test_release_type_parse_and_filter() {
        // Arrange & Act
        let theatrical: ReleaseType = "Theatrical".parse().unwrap();
        let non_theatrical: ReleaseType = "non-theatrical".parse().unwrap();
        let both: ReleaseType = "BOTH".parse().unwrap();

        // Assert
        assert_eq!(theatrical.api_filter(), Some("3|2"));
        assert_eq!(non_theatrical.api_filter(), Some("1|4|5|6"));
        assert_eq!(both.api_filter(), None);
        assert!("cinema".parse::<ReleaseType>().is_err());
    }

    #[test]
    fn test_gross_bound_sentinels() {
        // Arrange & Act & Assert
        assert_eq!(GrossRange::parse_bound("all").unwrap(), None);
        assert_eq!(GrossRange::parse_bound("0").unwrap(), None);
        assert_eq!(GrossRange::parse_bound(" 1000 ").unwrap(), Some(1000));
        assert!(GrossRange::parse_bound("-5").is_err());
    }

    #[test]
    fn test_gross_range_contains() {
        // Arrange
        let both = GrossRange {
            min: Some(100),
            max: Some(200),
        };
        let open_max = GrossRange {
            min: Some(100),
            max: None,
        };

        // Act & Assert
        assert!(both.contains(100));
        assert!(both.contains(200));
        assert!(!both.contains(99));
        assert!(!both.contains(201));
        assert!(open_max.contains(u64::MAX));
        assert!(GrossRange::default().contains(0));
    }

    #[test]
    fn test_criteria_rejects_inverted_window() {
        // Arrange & Act
        let result = FilterCriteria::new(
            GenreFilter::All,
            YearMonth::new(2021, 1).unwrap(),
            YearMonth::new(2020, 12).unwrap(),
            GrossRange::default(),
            vec![String::from("US")],
            ReleaseType::Both,
        );

        // Assert
        assert!(result.unwrap_err().to_string().contains("must not be after"));
    }

    #[test]
    fn test_criteria_rejects_inverted_gross() {
        // Arrange & Act
        let result = FilterCriteria::new(
            GenreFilter::All,
            YearMonth::new(2020, 1).unwrap(),
            YearMonth::new(2020, 12).unwrap(),
            GrossRange {
                min: Some(500),
                max: Some(100),
            },
            vec![String::from("US")],
            ReleaseType::Both,
        );

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_criteria_requires_a_country() {
        // Arrange & Act
        let result = FilterCriteria::new(
            GenreFilter::All,
            YearMonth::new(2020, 1).unwrap(),
            YearMonth::new(2020, 12).unwrap(),
            GrossRange::default(),
            vec![String::from("  ")],
            ReleaseType::Both,
        );

        // Assert
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("at least one country")
        );
    }

    #[test]
    fn test_covers_across_year_boundary() {
        // Arrange
        let window = criteria((2020, 11), (2021, 2));

        // Act & Assert
        assert!(window.covers(2020, 11));
        assert!(window.covers(2020, 12));
        assert!(window.covers(2021, 1));
        assert!(window.covers(2021, 2));
        assert!(!window.covers(2020, 1));
        assert!(!window.covers(2020, 10));
        assert!(!window.covers(2021, 3));
    }

    #[test]
    fn test_covers_rejects_missing_date() {
        // Arrange
        let window = criteria((2020, 1), (2020, 12));

        // Act & Assert
        assert!(!window.covers(0, 0));
    }
}
