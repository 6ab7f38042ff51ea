//! Tests for the catalog repository.

use super::*;
use crate::repository::Delivery;
use std::fs;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(5);

const CATALOG: &str = r#"{"id":1,"name":"Comirnaty","manufacturer":"BioNTech","description":"mRNA vaccine"}
{"id":2,"name":"Spikevax","manufacturer":"Moderna","description":"mRNA vaccine"}
{"id":3,"name":"Vaxzevria","manufacturer":"AstraZeneca","description":"Viral vector vaccine"}
{"id":4,"name":"Fluad","manufacturer":"Seqirus","description":"Influenza vaccine"}
{"id":5,"name":"Shingrix","manufacturer":"GSK"}
"#;

fn write_catalog(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("vaxview_catalog_{}.jsonl", name));
    fs::write(&path, contents).expect("Failed to write test catalog");
    path
}

/// Block until the stream delivers something other than a loading marker.
fn next_terminal<T: std::fmt::Debug>(stream: &ResourceStream<T>) -> Option<Resource<T>> {
    loop {
        match stream.next_timeout(WAIT) {
            Delivery::Item(Some(Resource::Loading(_))) => continue,
            Delivery::Item(item) => return item,
            other => panic!("Expected a terminal emission, got {:?}", other),
        }
    }
}

fn names(records: &[Vaccination]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn search_emits_loading_then_first_page() {
    let path = write_catalog("first_page", CATALOG);
    let repo = CatalogRepository::new(&path, 2);

    let stream = repo.search("vaccine");
    assert_eq!(
        stream.next_timeout(WAIT),
        Delivery::Item(Some(Resource::Loading(None))),
        "First emission should be the loading marker"
    );
    match next_terminal(&stream) {
        Some(Resource::Success(records)) => {
            assert_eq!(names(&records), vec!["Comirnaty", "Spikevax"]);
        }
        other => panic!("Expected first page, got {:?}", other),
    }

    fs::remove_file(path).ok();
}

#[test]
fn next_page_extends_live_search_and_reports_more() {
    let path = write_catalog("paging", CATALOG);
    let repo = CatalogRepository::new(&path, 2);

    let search = repo.search("vaccine");
    next_terminal(&search);

    // 4 matches, page size 2: one further page, then exhausted.
    let next = repo.next_page("vaccine");
    assert_eq!(next_terminal(&next), Some(Resource::Success(false)));

    match next_terminal(&search) {
        Some(Resource::Success(records)) => {
            assert_eq!(
                names(&records),
                vec!["Comirnaty", "Spikevax", "Vaxzevria", "Fluad"]
            );
        }
        other => panic!("Expected extended result list, got {:?}", other),
    }

    let exhausted = repo.next_page("vaccine");
    assert_eq!(next_terminal(&exhausted), Some(Resource::Success(false)));

    fs::remove_file(path).ok();
}

#[test]
fn next_page_reports_more_when_pages_remain() {
    let path = write_catalog("more_remaining", CATALOG);
    let repo = CatalogRepository::new(&path, 1);

    next_terminal(&repo.search("vaccine"));
    assert_eq!(
        next_terminal(&repo.next_page("vaccine")),
        Some(Resource::Success(true))
    );

    fs::remove_file(path).ok();
}

#[test]
fn next_page_without_search_emits_absent() {
    let path = write_catalog("absent", CATALOG);
    let repo = CatalogRepository::new(&path, 2);

    let next = repo.next_page("never searched");
    assert_eq!(next_terminal(&next), None);

    fs::remove_file(path).ok();
}

#[test]
fn missing_catalog_surfaces_as_error_resource() {
    let repo = CatalogRepository::new("/nonexistent/vaxview/catalog.jsonl", 2);

    match next_terminal(&repo.search("vaccine")) {
        Some(Resource::Error { message, data }) => {
            assert!(message.contains("Catalog not found"), "got: {}", message);
            assert_eq!(data, None);
        }
        other => panic!("Expected error resource, got {:?}", other),
    }
}

#[test]
fn malformed_catalog_surfaces_parse_error_on_next_page() {
    let path = write_catalog("malformed", CATALOG);
    let repo = CatalogRepository::new(&path, 2);
    next_terminal(&repo.search("vaccine"));

    fs::write(&path, "{not json}\n").expect("Failed to corrupt catalog");
    match next_terminal(&repo.next_page("vaccine")) {
        Some(Resource::Error { message, .. }) => {
            assert!(message.contains("line 1"), "got: {}", message);
        }
        other => panic!("Expected error resource, got {:?}", other),
    }

    fs::remove_file(path).ok();
}

#[test]
fn released_search_streams_are_pruned() {
    let path = write_catalog("pruned", CATALOG);
    let repo = CatalogRepository::new(&path, 1);

    let search = repo.search("vaccine");
    next_terminal(&search);
    drop(search);

    next_terminal(&repo.next_page("vaccine"));
    assert!(
        repo.shared.state.lock().listeners.get("vaccine").is_none(),
        "Dropped search stream should be removed from listeners"
    );

    fs::remove_file(path).ok();
}

#[test]
fn repeated_search_serves_every_loaded_page() {
    let path = write_catalog("refresh", CATALOG);
    let repo = CatalogRepository::new(&path, 2);

    let first = repo.search("vaccine");
    next_terminal(&first);
    assert_eq!(
        next_terminal(&repo.next_page("vaccine")),
        Some(Resource::Success(false))
    );
    drop(first);

    // Same query again: all four loaded matches, not just the first page.
    match next_terminal(&repo.search("vaccine")) {
        Some(Resource::Success(records)) => assert_eq!(records.len(), 4),
        other => panic!("Expected loaded pages, got {:?}", other),
    }
    assert_eq!(
        next_terminal(&repo.next_page("vaccine")),
        Some(Resource::Success(false)),
        "Cursor still at the end"
    );

    fs::remove_file(path).ok();
}

#[test]
fn search_drops_cursors_nobody_listens_to() {
    let path = write_catalog("cursor_prune", CATALOG);
    let repo = CatalogRepository::new(&path, 1);

    let abandoned = repo.search("vaccine");
    next_terminal(&abandoned);
    next_terminal(&repo.next_page("vaccine"));
    let live = repo.search("moderna");
    next_terminal(&live);
    drop(abandoned);

    let other = repo.search("gsk");
    next_terminal(&other);
    {
        let state = repo.shared.state.lock();
        assert!(!state.cursors.contains_key("vaccine"));
        assert!(state.cursors.contains_key("moderna"), "Live query keeps its cursor");
        assert!(state.cursors.contains_key("gsk"));
    }

    match next_terminal(&repo.search("vaccine")) {
        Some(Resource::Success(records)) => assert_eq!(names(&records), vec!["Comirnaty"]),
        other => panic!("Expected a fresh first page, got {:?}", other),
    }

    fs::remove_file(path).ok();
}

#[test]
fn validate_counts_records() {
    let path = write_catalog("validate", CATALOG);
    let repo = CatalogRepository::new(&path, 2);
    assert_eq!(repo.validate(), Ok(5));
    fs::remove_file(path).ok();
}

#[test]
fn zero_page_size_is_clamped() {
    let repo = CatalogRepository::new("unused.jsonl", 0);
    assert_eq!(repo.page_size(), 1);
}
