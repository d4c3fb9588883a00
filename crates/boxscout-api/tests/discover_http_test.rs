//! End-to-end discovery against a mocked TMDB server.

#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]
#![allow(missing_docs)]

use std::time::Duration;

use boxscout_api::discover::{
    FilterCriteria, GenreFilter, GenreResolution, GrossRange, PagePolicy, ReleaseType, SkipReason,
    StopReason, YearMonth, discover_movies,
};
use boxscout_api::tmdb::{Credential, TmdbClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DISCOVER_PAGE_1: &str = include_str!("../../../fixtures/tmdb/discover_movie_2019.json");
const ENDGAME_DETAILS: &str = include_str!("../../../fixtures/tmdb/movie_details_299534.json");
const LION_KING_DETAILS: &str = r#"{
  "id": 420818,
  "title": "The Lion King",
  "genres": [
    {"id": 10751, "name": "Family"},
    {"id": 18, "name": "Drama"},
    {"id": 12, "name": "Adventure"}
  ],
  "production_countries": [
    {"iso_3166_1": "US", "name": "United States of America"}
  ],
  "revenue": 1663075401
}"#;

fn client_for(mock_server: &MockServer) -> TmdbClient {
    TmdbClient::builder()
        .base_url(format!("{}/3/", mock_server.uri()).parse().unwrap())
        .credential(Credential::ApiKey(String::from("test-key")))
        .user_agent("boxscout-test/0.0.0")
        .min_interval(Duration::ZERO)
        .build()
        .unwrap()
}

fn criteria_2019_us() -> FilterCriteria {
    FilterCriteria::new(
        GenreFilter::All,
        YearMonth::new(2019, 1).unwrap(),
        YearMonth::new(2019, 12).unwrap(),
        GrossRange::default(),
        vec![String::from("US")],
        ReleaseType::Both,
    )
    .unwrap()
}

#[tokio::test]
async fn test_discovery_survives_failing_second_page() {
    // Arrange
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/discover/movie"))
        .and(query_param("page", "1"))
        .and(query_param("sort_by", "revenue.desc"))
        .and(query_param("primary_release_date.gte", "2019-01-01"))
        .and(query_param("primary_release_date.lte", "2019-12-31"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(DISCOVER_PAGE_1, "application/json"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/3/discover/movie"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream failure"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/3/movie/299534"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(ENDGAME_DETAILS, "application/json"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/3/movie/420818"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(LION_KING_DETAILS, "application/json"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/3/movie/330457"))
        .respond_with(ResponseTemplate::new(404).set_body_raw(
            r#"{"status_code": 34, "status_message": "The resource you requested could not be found."}"#,
            "application/json",
        ))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let policy = PagePolicy {
        page_delay: Duration::ZERO,
        ..PagePolicy::default()
    };

    // Act
    let outcome = discover_movies(&client, &criteria_2019_us(), &policy).await;

    // Assert
    assert_eq!(outcome.genre, GenreResolution::AllGenres);
    assert_eq!(outcome.stop, StopReason::PageFailed { page: 2 });
    assert_eq!(outcome.pages_fetched, 1);

    let titles: Vec<&str> = outcome.movies.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Avengers: Endgame", "The Lion King"]);

    let endgame = &outcome.movies[0];
    assert_eq!(endgame.release_year, 2019);
    assert_eq!(endgame.release_month, 4);
    assert_eq!(endgame.revenue_usd, 0);
    assert_eq!(endgame.genres, "Adventure, Science Fiction, Action");
    assert_eq!(endgame.production_countries, "United States of America");
    assert_eq!(endgame.imdb_rating, Some(8.237));
    assert_eq!(endgame.release_type, ReleaseType::Both);

    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].title, "Frozen II");
    assert_eq!(outcome.skipped[0].reason, SkipReason::CountryMismatch);
}

#[tokio::test]
async fn test_genre_and_release_type_reach_the_query() {
    // Arrange
    let mock_server = MockServer::start().await;
    let genres = include_str!("../../../fixtures/tmdb/genre_movie_list.json");

    Mock::given(method("GET"))
        .and(path("/3/genre/movie/list"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(genres, "application/json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/3/discover/movie"))
        .and(query_param("with_genres", "878"))
        .and(query_param("with_release_type", "3|2"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"page": 1, "results": [], "total_pages": 1, "total_results": 0}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let criteria = FilterCriteria::new(
        GenreFilter::parse("science fiction"),
        YearMonth::new(2019, 1).unwrap(),
        YearMonth::new(2019, 12).unwrap(),
        GrossRange::default(),
        vec![String::from("US")],
        ReleaseType::Theatrical,
    )
    .unwrap();

    // Act
    let outcome = discover_movies(&client, &criteria, &PagePolicy::default()).await;

    // Assert
    assert_eq!(outcome.genre, GenreResolution::Resolved(878));
    assert!(outcome.movies.is_empty());
    assert_eq!(outcome.stop, StopReason::Exhausted { total_pages: 1 });
}
