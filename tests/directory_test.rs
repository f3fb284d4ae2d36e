//! Directory loading and search.

mod common;

use expotrack::directory::Directory;
use expotrack::models::Exhibitor;

use common::{EXHIBITORS_JSON, FakeSource};

fn fixture_exhibitors() -> Vec<Exhibitor> {
    serde_json::from_str(EXHIBITORS_JSON).expect("Failed to parse exhibitors fixture")
}

fn names(directory: &Directory) -> Vec<&str> {
    directory.accounts().iter().map(|e| e.name.as_str()).collect()
}

#[tokio::test]
async fn test_load_sorts_remote_list_ordinally() {
    let source = FakeSource::offline().with_exhibitors(fixture_exhibitors());

    let directory = Directory::load(&source, false).await;

    assert!(!directory.is_fallback());
    assert_eq!(
        names(&directory),
        ["Costa Rica", "Discover Dominica Authority", "Quench USA", "nevetal"]
    );
    let dominica = directory.find("Discover Dominica Authority").unwrap();
    assert_eq!(dominica.total_orders, None);
}

#[tokio::test]
async fn test_load_failure_uses_fallback_list() {
    let directory = Directory::load(&FakeSource::offline(), true).await;

    assert!(directory.is_fallback());
    assert_eq!(directory.len(), 6);
    let nevetal = directory.find("nevetal").expect("nevetal in fallback list");
    assert_eq!(nevetal.booth, "3005");
}

#[tokio::test]
async fn test_empty_remote_list_uses_fallback() {
    let source = FakeSource::offline().with_exhibitors(Vec::new());

    let directory = Directory::load(&source, false).await;

    assert!(directory.is_fallback());
    assert_eq!(directory.len(), 6);
}

#[tokio::test]
async fn test_blank_name_uses_fallback() {
    let source = FakeSource::offline().with_exhibitors(vec![
        Exhibitor::new("Costa Rica", "C-089"),
        Exhibitor::new("", "Z-999"),
    ]);

    let directory = Directory::load(&source, false).await;

    assert!(directory.is_fallback());
    assert!(directory.find("Costa Rica").is_some());
    assert_eq!(directory.len(), 6);
}

#[tokio::test]
async fn test_search_over_loaded_directory() {
    let source = FakeSource::offline().with_exhibitors(fixture_exhibitors());
    let directory = Directory::load(&source, false).await;

    let hits: Vec<&str> = directory
        .search("costa")
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(hits, ["Costa Rica"]);

    let by_booth: Vec<&str> = directory
        .search("f-2")
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(by_booth, ["Quench USA"]);

    assert_eq!(directory.search("").len(), directory.len());
}
