use httpmock::prelude::*;
use tempfile::TempDir;

use steam_stats::charts::{ChartsScraper, ExportOptions, GameEntry, ScrapeOutcome};
use steam_stats::StatsError;

fn page_html(rows: &[(&str, &str, &str)]) -> String {
    let mut html = String::from(
        r#"<html><body><table class="common-table">
<thead><tr><th>Rank</th><th>Name</th><th>Current</th><th>30-Day</th><th>Peak</th><th>Hours</th></tr></thead>
<tbody>"#,
    );
    for (rank, (name, current, peak)) in rows.iter().enumerate() {
        html.push_str(&format!(
            r#"<tr><td class="rank-cell">{}.</td><td class="game-name left"><a href="/app/0">{}</a></td><td class="num">{}</td><td class="num-p gainorloss">+0.0%</td><td class="num">{}</td><td class="num period-col">1,000,000</td></tr>"#,
            rank + 1,
            name,
            current,
            peak,
        ));
    }
    html.push_str("</tbody></table></body></html>");
    html
}

fn scraper_for(server: &MockServer) -> ChartsScraper {
    ChartsScraper::builder()
        .base_url(server.url("/top"))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_two_pages_aggregate_in_page_order() {
    let server = MockServer::start();
    let first = server.mock(|when, then| {
        when.method(GET).path("/top");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(page_html(&[
                ("Counter-Strike 2", "1,032,407", "1,818,773"),
                ("Dota 2", "414,223", "721,940"),
            ]));
    });
    let second = server.mock(|when, then| {
        when.method(GET).path("/top/p.2");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(page_html(&[("Rust", "101,245", "245,243")]));
    });

    let games = scraper_for(&server).top_games(2).await.unwrap();

    first.assert();
    second.assert();
    assert_eq!(games.len(), 3);
    assert_eq!(games[0].name, "Counter-Strike 2");
    assert_eq!(games[1].name, "Dota 2");
    assert_eq!(games[2].name, "Rust");
    // Numbers come through verbatim, separators and all.
    assert_eq!(games[0].current_players, "1,032,407");
    assert_eq!(games[0].peak_players, "1,818,773");
}

#[tokio::test]
async fn test_single_page_never_touches_page_two() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/top");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(page_html(&[("Dota 2", "414,223", "721,940")]));
    });
    let second = server.mock(|when, then| {
        when.method(GET).path("/top/p.2");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(page_html(&[("Rust", "101,245", "245,243")]));
    });

    let games = scraper_for(&server).top_games(1).await.unwrap();

    assert_eq!(games.len(), 1);
    second.assert_hits(0);
}

#[tokio::test]
async fn test_zero_pages_fetches_nothing() {
    let server = MockServer::start();
    let first = server.mock(|when, then| {
        when.method(GET).path("/top");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(page_html(&[("Dota 2", "414,223", "721,940")]));
    });

    let games = scraper_for(&server).top_games(0).await.unwrap();

    assert!(games.is_empty());
    first.assert_hits(0);
}

#[tokio::test]
async fn test_scrape_without_export_returns_rows() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/top");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(page_html(&[("Dota 2", "414,223", "721,940")]));
    });

    let outcome = scraper_for(&server)
        .scrape_top_games(1, &ExportOptions::default())
        .await
        .unwrap();

    match outcome {
        ScrapeOutcome::Rows(games) => {
            assert_eq!(games.len(), 1);
            assert_eq!(games[0].name, "Dota 2");
        }
        ScrapeOutcome::Exported { .. } => panic!("no export was requested"),
    }
}

#[tokio::test]
async fn test_export_writes_csv_and_withholds_rows() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/top");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(page_html(&[
                ("Counter-Strike 2", "1,032,407", "1,818,773"),
                ("Dota 2", "414,223", "721,940"),
            ]));
    });

    let dir = TempDir::new().unwrap();
    let options = ExportOptions {
        export: true,
        path: Some(dir.path().join("top_games")),
    };

    let outcome = scraper_for(&server)
        .scrape_top_games(1, &options)
        .await
        .unwrap();

    let path = match outcome {
        ScrapeOutcome::Exported { path, rows } => {
            assert_eq!(rows, 2);
            path
        }
        ScrapeOutcome::Rows(_) => panic!("export should consume the rows"),
    };

    assert_eq!(path, dir.path().join("top_games.csv"));
    let content = std::fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("name,current_players,peak_players"));
    assert_eq!(lines.next(), Some("Counter-Strike 2,\"1,032,407\",\"1,818,773\""));
}

#[tokio::test]
async fn test_export_without_destination_fails_before_any_fetch() {
    let server = MockServer::start();
    let first = server.mock(|when, then| {
        when.method(GET).path("/top");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(page_html(&[("Dota 2", "414,223", "721,940")]));
    });

    let options = ExportOptions {
        export: true,
        path: None,
    };
    let err = scraper_for(&server)
        .scrape_top_games(1, &options)
        .await
        .unwrap_err();

    assert!(matches!(err, StatsError::InvalidArgumentError { .. }));
    first.assert_hits(0);
}

#[tokio::test]
async fn test_missing_table_fails_with_page_context() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/top");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(page_html(&[("Dota 2", "414,223", "721,940")]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/top/p.2");
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<html><body><p>Be right back</p></body></html>");
    });

    let err = scraper_for(&server).top_games(2).await.unwrap_err();

    match err {
        StatsError::ParseError { page, url, .. } => {
            assert_eq!(page, 2);
            assert!(url.ends_with("/top/p.2"));
        }
        other => panic!("expected ParseError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_page_fetch_failure_aborts_the_scrape() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/top");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(page_html(&[("Dota 2", "414,223", "721,940")]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/top/p.2");
        then.status(503);
    });

    let err = scraper_for(&server).top_games(2).await.unwrap_err();

    assert!(matches!(err, StatsError::NetworkError(_)));
}

#[tokio::test]
async fn test_exported_csv_round_trips_through_reader() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/top");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(page_html(&[
                ("Warhammer 40,000: Space Marine 2", "29,816", "225,690"),
                ("Dota 2", "414,223", "721,940"),
            ]));
    });

    let dir = TempDir::new().unwrap();
    let options = ExportOptions {
        export: true,
        path: Some(dir.path().join("report.csv")),
    };
    let outcome = scraper_for(&server)
        .scrape_top_games(1, &options)
        .await
        .unwrap();
    let path = match outcome {
        ScrapeOutcome::Exported { path, .. } => path,
        ScrapeOutcome::Rows(_) => panic!("export should consume the rows"),
    };

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let entries: Vec<GameEntry> = reader
        .deserialize()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert_eq!(
        entries,
        vec![
            GameEntry {
                name: "Warhammer 40,000: Space Marine 2".to_string(),
                current_players: "29,816".to_string(),
                peak_players: "225,690".to_string(),
            },
            GameEntry {
                name: "Dota 2".to_string(),
                current_players: "414,223".to_string(),
                peak_players: "721,940".to_string(),
            },
        ]
    );
}
