//! End-to-end scenarios: a mounted host over an in-memory navigation port
//! and the fixture CMS backend.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use discovery_cms::{CmsBackend, CmsClient, CmsConfig, FixtureBackend, FixtureReply, endpoints};
use discovery_router::{MemoryNavigation, NavigationPort, Route, RouteResolver};
use discovery_views::components::CATEGORY_PAGE_LIMIT;
use discovery_views::{PageHost, Renderer};
use serde_json::{Value, json};

const ARTICLE_ID: &str = "sx6gn6ckwbiljfpq226eqzbz";

struct Harness {
    port: MemoryNavigation,
    fixtures: FixtureBackend,
    host: PageHost,
}

fn harness(fragment: &str, download_dir: PathBuf) -> Harness {
    let port = MemoryNavigation::new(fragment);
    let fixtures = FixtureBackend::new();
    let client = Arc::new(CmsClient::new(
        CmsBackend::Fixture(fixtures.clone()),
        CmsConfig::default(),
    ));
    let host = PageHost::new(
        RouteResolver::new(Rc::new(port.clone())),
        client,
        Renderer::builtin().unwrap(),
        download_dir,
    );
    host.mount();
    Harness {
        port,
        fixtures,
        host,
    }
}

fn at(fragment: &str) -> Harness {
    harness(fragment, PathBuf::from("downloads"))
}

fn news(document_id: &str, title: &str, words: usize) -> Value {
    json!({
        "id": 1,
        "documentId": document_id,
        "title": title,
        "description": "ore ".repeat(words),
    })
}

fn feed_path(slug: &str, limit: usize) -> String {
    endpoints::news_by_category(slug, limit)
}

#[tokio::test]
async fn home_page_renders_hero_trending_and_grid() {
    let h = at("#/");
    h.fixtures
        .json(
            &feed_path("hero-news", 1),
            &json!({"data": [news("h1", "Gold hits record high", 300)]}),
        )
        .json(
            &feed_path("trending-news", 5),
            &json!({"data": [
                news("t1", "First trend", 10),
                news("t2", "Second trend", 10),
                news("t3", "Third trend", 10),
            ]}),
        )
        .json(
            &feed_path("latest-news", 6),
            &json!({"data": [
                news("g1", "Long read", 450),
                news("g2", "Short read", 10),
            ]}),
        );

    h.host.load().await;
    let html = h.host.render().unwrap();

    assert_eq!(html.matches("class=\"hero-title\"").count(), 1);
    assert!(html.contains("Gold hits record high"));

    let first = html.find("First trend").unwrap();
    let second = html.find("Second trend").unwrap();
    let third = html.find("Third trend").unwrap();
    assert!(first < second && second < third);
    assert_eq!(html.matches("class=\"trending-item\"").count(), 3);

    assert_eq!(html.matches("class=\"news-grid-article\"").count(), 2);
    assert!(html.contains("3 min read"));
    assert!(html.contains("1 min read"));
    assert!(html.contains("data-route=\"#/\""));
}

#[tokio::test]
async fn navigating_to_an_article_fetches_that_exact_document() {
    let h = at("#/");
    h.fixtures.json(
        &endpoints::article_detail(ARTICLE_ID),
        &json!({"data": news(ARTICLE_ID, "Copper mine expansion", 800)}),
    );

    h.host.navigate_to_article(ARTICLE_ID);
    h.host.load().await;

    assert_eq!(
        h.port.current_fragment(),
        "#/article/sx6gn6ckwbiljfpq226eqzbz"
    );
    assert_eq!(h.host.route(), Route::Article(ARTICLE_ID.to_owned()));
    let detail_path = format!("news-sections/{ARTICLE_ID}?populate=*");
    assert_eq!(h.fixtures.request_count(&detail_path), 1);

    let html = h.host.render().unwrap();
    assert!(html.contains("<h1 class=\"article-title\">Copper mine expansion</h1>"));
    assert!(html.contains("4 min read"));
    assert!(html.contains("<title>Copper mine expansion | Mining Discovery</title>"));
}

#[tokio::test]
async fn unknown_article_shows_not_found_and_close_goes_home() {
    let h = at("#/article/does-not-exist");

    h.host.load().await;
    let html = h.host.render().unwrap();

    assert!(html.contains("region-not-found"));
    assert!(html.contains("<a class=\"back\" href=\"#/\">"));
    assert!(!html.contains("region-error"));

    h.host.close_article();
    assert_eq!(h.port.current_fragment(), "#/");
    assert_eq!(h.host.page().map(|p| p.kind()), Some("home"));
}

#[tokio::test(start_paused = true)]
async fn slower_response_for_previous_category_is_discarded() {
    let h = at("#/news/gold");
    let listing = |id: &str, name: &str, slug: &str| {
        json!({"data": [{
            "id": 1,
            "documentId": id,
            "title": format!("{name} headline"),
            "news_categories": [{"id": 2, "category": name, "slug": slug}],
        }]})
    };
    h.fixtures
        .push(
            &feed_path("gold", CATEGORY_PAGE_LIMIT),
            FixtureReply::json(&listing("a", "Gold", "gold")).delayed(Duration::from_millis(500)),
        )
        .push(
            &feed_path("copper", CATEGORY_PAGE_LIMIT),
            FixtureReply::json(&listing("b", "Copper", "copper"))
                .delayed(Duration::from_millis(100)),
        );

    let navigate = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        h.port.set_fragment("#/news/copper");
    };
    futures::join!(h.host.load(), navigate);

    let html = h.host.render().unwrap();
    assert!(html.contains("Copper headline"));
    assert!(!html.contains("Gold headline"));
    assert_eq!(h.host.route(), Route::Category("copper".to_owned()));
}

#[tokio::test(start_paused = true)]
async fn leaving_a_page_mid_flight_ignores_its_response() {
    let h = at(&format!("#/article/{ARTICLE_ID}"));
    h.fixtures.push(
        &endpoints::article_detail(ARTICLE_ID),
        FixtureReply::json(&json!({"data": news(ARTICLE_ID, "Late arrival", 10)}))
            .delayed(Duration::from_millis(300)),
    );

    let navigate = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        h.host.close_article();
    };
    futures::join!(h.host.load(), navigate);

    let html = h.host.render().unwrap();
    assert_eq!(h.host.route(), Route::Home);
    assert!(!html.contains("Late arrival"));
}

#[tokio::test]
async fn empty_and_failed_regions_are_distinguishable() {
    let h = at("#/");
    h.fixtures
        .json(&feed_path("latest-news", 6), &json!({"data": []}))
        .push(&feed_path("editors-pick", 4), FixtureReply::status(500));

    h.host.load().await;
    let html = h.host.render().unwrap();

    assert!(html.contains(
        "<p class=\"region-empty\" data-region=\"news-grid\">No articles published yet.</p>"
    ));
    assert!(html.contains("<div class=\"region-error\" data-region=\"editors-picks\""));
    assert!(!html.contains("data-region=\"news-grid\" role=\"alert\""));
}

#[tokio::test]
async fn shell_menu_is_fetched_once_per_mount() {
    let h = at("#/");
    h.fixtures.json(
        &endpoints::categories(8),
        &json!({"data": [{"id": 1, "name": "Gold", "slug": "gold"}]}),
    );

    h.host.load().await;
    h.port.set_fragment("#/magazines");
    h.host.load().await;

    assert_eq!(h.fixtures.request_count(&endpoints::categories(8)), 1);
    let html = h.host.render().unwrap();
    assert!(html.contains("href=\"#/news/gold\""));
}

#[tokio::test]
async fn pdf_download_lands_in_download_dir() {
    let dir = std::env::temp_dir().join(format!("discovery-views-dl-{}", std::process::id()));
    let h = harness("#/magazines", dir.clone());
    let url = "https://cdn.example.com/uploads/march_issue.pdf";
    h.fixtures
        .push(url, FixtureReply::bytes(b"%PDF-1.7 test".to_vec()));

    h.host.download_pdf(url, None).await.unwrap();

    let saved = std::fs::read(dir.join("march_issue.pdf")).unwrap();
    assert_eq!(saved, b"%PDF-1.7 test");
    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test(start_paused = true)]
async fn navigating_away_from_a_slow_page_starts_the_next_load_at_once() {
    let h = at("#/");
    h.fixtures
        .push(
            &feed_path("hero-news", 1),
            FixtureReply::json(&json!({"data": [news("h1", "Slow hero", 10)]}))
                .delayed(Duration::from_secs(9)),
        )
        .json(
            &endpoints::article_detail(ARTICLE_ID),
            &json!({"data": news(ARTICLE_ID, "Nickel supply deal", 10)}),
        );
    let started = tokio::time::Instant::now();

    let navigate = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        h.host.navigate_to_article(ARTICLE_ID);
        tokio::time::sleep(Duration::from_millis(500)).await;
        h.fixtures
            .request_count(&endpoints::article_detail(ARTICLE_ID))
    };
    let ((), detail_requests) = futures::join!(h.host.load(), navigate);

    assert_eq!(detail_requests, 1);
    assert!(started.elapsed() < Duration::from_secs(9));
    let html = h.host.render().unwrap();
    assert!(html.contains("Nickel supply deal"));
    assert!(!html.contains("Slow hero"));
}

#[tokio::test]
async fn try_again_reloads_a_failed_page() {
    let h = at("#/news/gold");
    let path = feed_path("gold", CATEGORY_PAGE_LIMIT);
    h.fixtures
        .push(&path, FixtureReply::status(500))
        .push(
            &path,
            FixtureReply::json(&json!({"data": [news("g1", "Gold rebounds", 10)]})),
        );

    h.host.load().await;
    let html = h.host.render().unwrap();
    assert!(html.contains("region-error"));
    assert!(html.contains("Try again"));

    h.host.reload().await;
    let html = h.host.render().unwrap();
    assert!(html.contains("Gold rebounds"));
    assert!(!html.contains("region-error"));
    assert_eq!(h.fixtures.request_count(&path), 2);
}

#[tokio::test]
async fn remounting_fetches_the_menu_again() {
    let h = at("#/magazines");
    h.fixtures
        .push(
            &endpoints::categories(8),
            FixtureReply::json(&json!({"data": [{"id": 1, "name": "Gold", "slug": "gold"}]})),
        )
        .push(
            &endpoints::categories(8),
            FixtureReply::json(&json!({"data": [{"id": 2, "name": "Nickel", "slug": "nickel"}]})),
        );

    h.host.load().await;
    assert!(h.host.render().unwrap().contains("href=\"#/news/gold\""));

    h.host.unmount();
    h.host.mount();
    h.host.load().await;

    assert_eq!(h.fixtures.request_count(&endpoints::categories(8)), 2);
    let html = h.host.render().unwrap();
    assert!(html.contains("href=\"#/news/nickel\""));
    assert!(!html.contains("href=\"#/news/gold\""));
}

#[tokio::test]
async fn newsletter_month_selection_refetches_issues() {
    let h = at("#/newsletter-page");
    h.fixtures
        .json(
            &endpoints::newsletter_categories(),
            &json!({"data": [{"id": 1, "name": "March 2025", "slug": "march-2025"}]}),
        )
        .json(
            &endpoints::newsletters(None),
            &json!({"data": [{"id": 1, "title": "Weekly brief"}]}),
        )
        .json(
            &endpoints::newsletters(Some("march-2025")),
            &json!({"data": [{"id": 2, "title": "March issue"}]}),
        );

    h.host.load().await;
    assert!(h.host.render().unwrap().contains("Weekly brief"));

    h.host
        .select_newsletter_month(Some("march-2025".to_owned()))
        .await;
    let html = h.host.render().unwrap();
    assert!(html.contains("March issue"));
    assert!(!html.contains("Weekly brief"));

    h.port.set_fragment("#/magazines");
    h.host.select_newsletter_month(None).await;
    assert_eq!(h.fixtures.request_count(&endpoints::newsletters(None)), 1);
    assert_eq!(
        h.fixtures
            .request_count(&endpoints::newsletters(Some("march-2025"))),
        1
    );
}
