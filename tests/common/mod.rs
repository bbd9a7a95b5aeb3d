use atlas_match::prelude::*;

/// (name, tier) pairs shared by the integration tests.
///
/// The longest names have 16 characters, so the fallback ceiling is
/// `10 - 2 * 15 = -20`.
pub const MAPS: [(&str, &str); 6] = [
    ("casos-aiagsum", "T6"),
    ("cosmos-vale", "T6"),
    ("casos-aiagsum-ex", "T4"),
    ("xavier-isle", "T5"),
    ("qiient-in-viesis", "T7"),
    ("soues-uzurtum", "T5"),
];

pub fn catalog_of(maps: &[(&str, &str)]) -> Catalog {
    Catalog::new(
        maps.iter()
            .map(|&(name, tier)| CatalogEntry::new(name, tier))
            .collect(),
    )
    .unwrap()
}

pub fn catalog() -> Catalog {
    catalog_of(&MAPS)
}

pub fn searcher() -> Searcher {
    Searcher::new(catalog(), SearchOptions::default())
}

pub fn names(results: &[SearchResult]) -> Vec<&str> {
    results.iter().map(|r| r.name()).collect()
}

/// One line per result: score, tier, highlighted name, method.
pub fn render(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| format!("{:.1}  {}  {}  {}", r.score(), r.tier(), r.highlighted(), r.detail.method))
        .collect::<Vec<_>>()
        .join("\n")
}
