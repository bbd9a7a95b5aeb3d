#[allow(dead_code)]
mod common;

use atlas_match::prelude::*;
use common::{catalog, searcher};

#[test]
fn least_recently_used_query_is_evicted() {
    let searcher = searcher();
    assert_eq!(searcher.cache().capacity(), 64);

    let queries: Vec<String> = (0..65).map(|i| format!("q{i:02}")).collect();
    let first = searcher.search(&queries[0]);
    for query in &queries[1..] {
        searcher.search(query);
    }

    assert_eq!(searcher.cache().len(), 64);
    assert!(!searcher.cache().contains("q00"));
    assert!(searcher.cache().contains("q01"));
    assert!(searcher.cache().contains("q64"));

    // recomputed, not lost
    assert_eq!(searcher.search("q00"), first);
    assert!(searcher.cache().contains("q00"));
    assert!(!searcher.cache().contains("q01"));
}

#[test]
fn cache_hit_refreshes_recency() {
    let options = SearchOptionsBuilder::default().cache_capacity(2).build().unwrap();
    let searcher = Searcher::new(catalog(), options);

    searcher.search("cs");
    searcher.search("xai");
    searcher.search("cs");
    searcher.search("vale");

    assert_eq!(searcher.cache().queries(), ["cs", "vale"]);
}

#[test]
fn equivalent_raw_queries_share_an_entry() {
    let searcher = searcher();
    let plain = searcher.search("casos");
    let noisy = searcher.search("  CaSoS\t");
    assert_eq!(plain, noisy);
    assert_eq!(searcher.cache().queries(), ["casos"]);
}

#[test]
fn zero_capacity_disables_caching() {
    let options = SearchOptionsBuilder::default().cache_capacity(0).build().unwrap();
    let searcher = Searcher::new(catalog(), options);

    let first = searcher.search("cs");
    assert!(searcher.cache().is_empty());
    assert_eq!(searcher.search("cs"), first);
}

#[test]
fn clear_cache_forgets_everything() {
    let searcher = searcher();
    searcher.search("cs");
    searcher.search("xai");
    assert_eq!(searcher.cache().len(), 2);

    searcher.clear_cache();
    assert!(searcher.cache().is_empty());
}
