//! Integration tests for the page store
//!
//! These tests run against on-disk databases in temporary directories and
//! exercise the store through the public PageStore contract.

use webstash::store::{open_store, PageStore, StoredPage};

fn make_page(domain: &str, url: &str, content: &str) -> StoredPage {
    StoredPage::new(
        url.to_string(),
        domain.to_string(),
        content.to_string(),
        "success".to_string(),
    )
}

#[test]
fn test_scenario_two_pages_one_domain() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir.path().join("kb.db")).unwrap();

    store
        .upsert_page(&make_page(
            "a.com",
            "https://a.com/1",
            "<title>Cats</title><p>cats are great</p>",
        ))
        .unwrap();
    store
        .upsert_page(&make_page(
            "a.com",
            "https://a.com/2",
            "<title>Dogs</title><p>dogs rule</p>",
        ))
        .unwrap();

    let domains = store.saved_domains().unwrap();
    assert_eq!(domains.len(), 1);
    assert_eq!(domains[0].domain, "a.com");
    assert_eq!(domains[0].page_count, 2);
    assert_eq!(
        domains[0].total_size,
        "<title>Cats</title><p>cats are great</p>".len() as u64
            + "<title>Dogs</title><p>dogs rule</p>".len() as u64
    );
}

#[test]
fn test_scenario_clear_domain_empties_everything() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir.path().join("kb.db")).unwrap();

    store
        .upsert_page(&make_page(
            "a.com",
            "https://a.com/1",
            "<title>Cats</title><p>cats are great</p>",
        ))
        .unwrap();
    store
        .upsert_page(&make_page(
            "a.com",
            "https://a.com/2",
            "<title>Dogs</title><p>dogs rule</p>",
        ))
        .unwrap();

    store.clear_domain("a.com").unwrap();

    assert!(store.saved_domains().unwrap().is_empty());
    assert!(store.pages_for_domain("a.com").unwrap().is_empty());
}

#[test]
fn test_upsert_idempotence_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir.path().join("kb.db")).unwrap();
    let page = make_page("a.com", "https://a.com/1", "same content");

    store.upsert_page(&page).unwrap();
    store.upsert_page(&page).unwrap();
    store.upsert_page(&page).unwrap();

    let domains = store.saved_domains().unwrap();
    assert_eq!(domains[0].page_count, 1);
    assert_eq!(domains[0].total_size, "same content".len() as u64);
}

#[test]
fn test_aggregates_track_mixed_mutations() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir.path().join("kb.db")).unwrap();

    store.upsert_page(&make_page("a.com", "https://a.com/1", "aaaa")).unwrap();
    store.upsert_page(&make_page("a.com", "https://a.com/2", "bb")).unwrap();
    store.upsert_page(&make_page("b.com", "https://b.com/1", "c")).unwrap();
    // Replace a.com/1 with a shorter body
    store.upsert_page(&make_page("a.com", "https://a.com/1", "a")).unwrap();
    store.clear_domain("b.com").unwrap();

    let domains = store.saved_domains().unwrap();
    assert_eq!(domains.len(), 1);
    assert_eq!(domains[0].domain, "a.com");
    assert_eq!(domains[0].page_count, 2);
    assert_eq!(domains[0].total_size, 3);

    // Aggregate totals stay equal to a live count over the pages
    let total: u64 = domains.iter().map(|d| d.page_count).sum();
    assert_eq!(total, store.count_pages().unwrap());
}

#[test]
fn test_clear_all_resets_to_initial_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir.path().join("kb.db")).unwrap();

    for i in 0..10 {
        store
            .upsert_page(&make_page("a.com", &format!("https://a.com/{}", i), "x"))
            .unwrap();
    }
    store.clear_all().unwrap();

    assert_eq!(store.count_pages().unwrap(), 0);
    assert_eq!(store.count_domains().unwrap(), 0);
    assert!(store.saved_domains().unwrap().is_empty());
}

#[test]
fn test_pages_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("kb.db");

    {
        let mut store = open_store(&db_path).unwrap();
        store
            .upsert_page(&make_page("a.com", "https://a.com/1", "persisted"))
            .unwrap();
    }

    let store = open_store(&db_path).unwrap();
    let pages = store.pages_for_domain("a.com").unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].content, "persisted");

    let domains = store.saved_domains().unwrap();
    assert_eq!(domains[0].page_count, 1);
}

#[test]
fn test_unavailable_database_reports_unavailable() {
    let result = open_store(std::path::Path::new("/nonexistent/dir/kb.db"));
    assert!(matches!(
        result,
        Err(webstash::store::StoreError::Unavailable(_))
    ));
}
