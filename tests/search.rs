#[allow(dead_code)]
mod common;

use std::thread;

use atlas_match::prelude::*;
use common::{MAPS, catalog, catalog_of, names, searcher};

#[test]
fn exact_name_ranks_first() {
    let results = searcher().search("cosmos-vale");
    assert_eq!(results[0].name(), "cosmos-vale");
    assert_eq!(results[0].detail.method, MatchMethod::Subsequence);
    assert_eq!(results[0].positions(), (0..11).collect::<Vec<_>>());
}

#[test]
fn exact_name_beats_equal_score() {
    let searcher = Searcher::new(catalog_of(&[("ab-cd", "T1"), ("ab", "T9")]), SearchOptions::default());
    let results = searcher.search("AB");
    assert_eq!(names(&results), ["ab", "ab-cd"]);
    assert_eq!(results[0].score(), 46.0);
    assert_eq!(results[1].score(), 46.0);
    assert_eq!(results[1].positions(), [0, 1]);
}

#[test]
fn equal_scores_break_on_tier_then_name() {
    let results = searcher().search("cs");
    assert_eq!(names(&results), ["casos-aiagsum-ex", "casos-aiagsum", "cosmos-vale"]);
    assert!(results.iter().all(|r| r.score() == 30.0));
}

#[test]
fn results_do_not_depend_on_catalog_order() {
    let mut reversed = MAPS;
    reversed.reverse();
    let forward = searcher();
    let backward = Searcher::new(catalog_of(&reversed), SearchOptions::default());

    for query in ["cs", "xai", "casos", "sum", "vale-x", "qiv"] {
        assert_eq!(forward.search(query), backward.search(query), "query {query:?}");
    }
}

#[test]
fn repeated_searches_are_identical() {
    let searcher = searcher();
    let first = serde_json::to_string(&searcher.search("casos")).unwrap();
    let cached = serde_json::to_string(&searcher.search("casos")).unwrap();
    searcher.clear_cache();
    let recomputed = serde_json::to_string(&searcher.search("casos")).unwrap();

    assert_eq!(first, cached);
    assert_eq!(first, recomputed);
}

#[test]
fn noisy_query_longer_than_name_falls_back() {
    let results = searcher().search("casos-aiagsum1");
    assert_eq!(results[0].name(), "casos-aiagsum");
    assert_eq!(results[0].detail.method, MatchMethod::Fallback(FallbackKind::Prefix));
    assert_eq!(results[0].score(), -24.0);

    assert_eq!(results[1].name(), "casos-aiagsum-ex");
    assert_eq!(results[1].detail.method, MatchMethod::Fallback(FallbackKind::Fragment));
    assert_eq!(results[1].positions(), (0..13).collect::<Vec<_>>());
    assert!(results.iter().all(|r| r.detail.method.is_fallback()));
}

#[test]
fn fallback_scores_stay_below_subsequence_scores() {
    let searcher = searcher();
    for query in ["xai", "casos-aiagsum1", "zzvaleqq", "um-ex", "cosmos"] {
        let results = searcher.search(query);
        let lowest_subsequence = results
            .iter()
            .filter(|r| !r.detail.method.is_fallback())
            .map(|r| r.score())
            .fold(f64::INFINITY, f64::min);
        for result in results.iter().filter(|r| r.detail.method.is_fallback()) {
            assert!(result.score() < lowest_subsequence, "{query:?}: {}", result.name());
        }
    }
}

#[test]
fn positions_point_at_query_characters() {
    let searcher = searcher();
    for query in ["cs", "csm", "qiv", "suu", "aa", "vale", "is"] {
        for result in searcher.search(query) {
            if result.detail.method.is_fallback() {
                continue;
            }
            let name: Vec<char> = result.name().chars().collect();
            let positions = result.positions();
            assert_eq!(positions.len(), query.chars().count());
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
            for (ch, &idx) in query.chars().zip(positions) {
                assert_eq!(name[idx], ch, "{query:?} on {}", result.name());
            }
        }
    }
}

#[test]
fn min_query_length_is_configurable() {
    let options = SearchOptionsBuilder::default().min_query_length(1).build().unwrap();
    let searcher = Searcher::new(catalog(), options);
    let results = searcher.search("x");
    assert_eq!(names(&results), ["xavier-isle", "casos-aiagsum-ex"]);
    assert_eq!(results[0].score(), 22.0);
    // lone character at index 15: base - 15 skipped
    assert_eq!(results[1].score(), -20.0);

    assert!(common::searcher().search("x").is_empty());
}

#[test]
fn confusable_folding_is_opt_in() {
    assert!(
        searcher()
            .search("cas0s")
            .iter()
            .all(|r| r.detail.method.is_fallback())
    );

    let options = SearchOptionsBuilder::default().fold_confusables(true).build().unwrap();
    let folding = Searcher::new(catalog(), options);
    let results = folding.search("cas0s");
    assert_eq!(results[0].detail.method, MatchMethod::Subsequence);
    assert_eq!(results[0].positions(), [0, 1, 2, 3, 4]);
}

#[test]
fn concurrent_searches_match_sequential_ones() {
    let queries = ["cs", "xai", "casos", "vale", "qiv", "um", "soues", "isle"];
    let expected: Vec<Vec<SearchResult>> = {
        let sequential = searcher();
        queries.iter().map(|q| sequential.search(q)).collect()
    };

    let shared = Arc::new(searcher());
    let handles: Vec<_> = (0..8)
        .map(|offset| {
            let shared = shared.clone();
            thread::spawn(move || {
                (0..queries.len())
                    .map(|i| {
                        let idx = (i + offset) % queries.len();
                        (idx, shared.search(queries[idx]))
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for (idx, results) in handle.join().unwrap() {
            assert_eq!(results, expected[idx], "query {:?}", queries[idx]);
        }
    }
    assert_eq!(shared.cache().len(), queries.len());
}

#[test]
fn json_catalog_end_to_end() {
    let json = r#"[
        {"name": "Casos-Aiagsum", "tier": "T6", "type": "island"},
        {"name": "cosmos-vale", "tier": "T6"}
    ]"#;
    let searcher = Searcher::new(Catalog::from_json_str(json).unwrap(), SearchOptions::default());
    let results = searcher.search("casos");

    assert_eq!(results[0].name(), "casos-aiagsum");
    assert_eq!(results[0].entry.category, "island");

    let value = serde_json::to_value(&results[0]).unwrap();
    assert_eq!(value["entry"]["name"], "casos-aiagsum");
    assert_eq!(value["method"], "subsequence");
    assert_eq!(value["positions"], serde_json::json!([0, 1, 2, 3, 4]));

    let value = serde_json::to_value(&searcher.search("casos-aiagsum1")[0]).unwrap();
    assert_eq!(value["method"], serde_json::json!({"fallback": "prefix"}));
}

#[test]
fn negative_weights_are_rejected() {
    // with base_match < 0 the fallback ceiling is no longer a lower bound:
    // "ad" (fallback prefix) would outrank "abcdq" (subsequence) for "adq"
    let scoring = ScoreConfig {
        base_match: -5.0,
        adjacency_bonus: 0.0,
        word_start_bonus: 0.0,
        start_of_string_bonus: 0.0,
        gap_penalty: 2.0,
    };
    assert!(SearchOptionsBuilder::default().scoring(scoring).build().is_err());

    let searcher = Searcher::new(Catalog::from_names(["abcdq", "ad"]).unwrap(), SearchOptions::default());
    let results = searcher.search("adq");
    assert_eq!(names(&results), ["abcdq", "ad"]);
    assert_eq!(results[0].detail.method, MatchMethod::Subsequence);
    assert_eq!(results[1].detail.method, MatchMethod::Fallback(FallbackKind::Prefix));
    assert!(results[1].score() < results[0].score());
}
