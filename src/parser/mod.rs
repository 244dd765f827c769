pub mod columns;
pub mod rows;
pub mod text;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::asset::Asset;
use crate::branch::Branch;
use columns::{infer_columns, ColumnMap};
use rows::{extract_row, SkipReason};

static TABLE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.wikitable").unwrap());
static TH_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").unwrap());
static TR_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());

/// Result of running one table through the extractor.
#[derive(Debug)]
pub enum TableOutcome {
    /// No identifying column; the table is not an equipment list.
    Irrelevant { headers: Vec<String> },
    Matched {
        columns: ColumnMap,
        rows: Vec<Result<Asset, SkipReason>>,
    },
}

/// Counters for one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub tables_seen: usize,
    pub tables_matched: usize,
    pub records: usize,
    pub skipped: BTreeMap<&'static str, usize>,
}

impl ExtractStats {
    pub fn rows_skipped(&self) -> usize {
        self.skipped.values().sum()
    }

    pub fn merge(&mut self, other: &ExtractStats) {
        self.tables_seen += other.tables_seen;
        self.tables_matched += other.tables_matched;
        self.records += other.records;
        for (tag, n) in &other.skipped {
            *self.skipped.entry(*tag).or_default() += n;
        }
    }
}

pub struct PageExtraction {
    pub assets: Vec<Asset>,
    pub stats: ExtractStats,
}

/// Extract every asset record from one list page.
pub fn extract_page(branch: Branch, html: &str, prefix_ids: bool) -> PageExtraction {
    let document = Html::parse_document(html);
    let mut assets = Vec::new();
    let mut stats = ExtractStats::default();

    for (i, table) in document.select(&TABLE_SEL).enumerate() {
        stats.tables_seen += 1;
        match extract_table(table, branch, prefix_ids) {
            TableOutcome::Irrelevant { headers } => {
                debug!(branch = %branch, table = i, ?headers, "skipping table without identifying column");
            }
            TableOutcome::Matched { columns, rows } => {
                stats.tables_matched += 1;
                debug!(branch = %branch, table = i, %columns, rows = rows.len(), "matched table");
                for row in rows {
                    match row {
                        Ok(asset) => assets.push(asset),
                        Err(reason) => {
                            debug!(branch = %branch, table = i, %reason, "row skipped");
                            *stats.skipped.entry(reason.tag()).or_default() += 1;
                        }
                    }
                }
            }
        }
    }

    stats.records = assets.len();
    PageExtraction { assets, stats }
}

/// Infer the column map of one table and, if it is relevant, extract its rows.
/// The first `tr` is treated as the header row and never read as data.
pub fn extract_table(table: ElementRef<'_>, branch: Branch, prefix_ids: bool) -> TableOutcome {
    let profile = branch.profile();
    let headers = table_headers(table);
    let columns = infer_columns(&headers, profile.rules);

    let Some(identity) = columns.first_of(profile.identity) else {
        return TableOutcome::Irrelevant { headers };
    };

    let rows = table
        .select(&TR_SEL)
        .skip(1)
        .map(|row| {
            extract_row(row, &columns, identity, profile)
                .map(|fields| Asset::assemble(fields, profile, prefix_ids))
        })
        .collect();

    TableOutcome::Matched { columns, rows }
}

/// Header texts of a table: every `th` it contains, body rows included.
pub fn table_headers(table: ElementRef<'_>) -> Vec<String> {
    table.select(&TH_SEL).map(text::header_text).collect()
}

/// Column maps of every `wikitable` on a page, for inspection.
pub fn inspect_tables(branch: Branch, html: &str) -> Vec<(Vec<String>, ColumnMap, bool)> {
    let document = Html::parse_document(html);
    let profile = branch.profile();
    document
        .select(&TABLE_SEL)
        .map(|table| {
            let headers = table_headers(table);
            let columns = infer_columns(&headers, profile.rules);
            let accepted = columns.first_of(profile.identity).is_some();
            (headers, columns, accepted)
        })
        .collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
    }

    fn page(tables: &str) -> String {
        format!("<html><body><h1>List</h1>{}</body></html>", tables)
    }

    #[test]
    fn t90_example() {
        let html = page(
            "<table class=\"wikitable\">\
             <tr><th>Model</th><th>Origin</th><th>Quantity</th></tr>\
             <tr><td>T-90</td><td>Russia</td><td>1200</td></tr></table>",
        );
        let out = extract_page(Branch::Army, &html, false);
        assert_eq!(out.assets.len(), 1);
        let a = &out.assets[0];
        assert_eq!(a.name, "T-90");
        assert_eq!(a.origin, "Russia");
        assert_eq!(a.kind, "Equipment");
        assert_eq!(a.number_in_service, "1200");
        assert_eq!(a.id, "t-90");
    }

    #[test]
    fn irrelevant_table_contributes_nothing() {
        let html = page(
            "<table class=\"wikitable\">\
             <tr><th>Year</th><th>Event</th></tr>\
             <tr><td>T-90</td><td>Russia</td></tr>\
             <tr><td>Arjun</td><td>India</td></tr></table>",
        );
        let out = extract_page(Branch::Army, &html, false);
        assert!(out.assets.is_empty());
        assert_eq!(out.stats.tables_seen, 1);
        assert_eq!(out.stats.tables_matched, 0);
        assert_eq!(out.stats.rows_skipped(), 0);
    }

    #[test]
    fn non_wikitable_ignored() {
        let html = page(
            "<table class=\"navbox\"><tr><th>Model</th></tr><tr><td>T-90</td></tr></table>",
        );
        let out = extract_page(Branch::Army, &html, false);
        assert_eq!(out.stats.tables_seen, 0);
        assert!(out.assets.is_empty());
    }

    #[test]
    fn skips_are_counted() {
        let html = page(
            "<table class=\"wikitable\">\
             <tr><th>Model</th><th>Origin</th></tr>\
             <tr><td>Arjun</td><td>India</td></tr>\
             <tr><td>Orphan</td></tr>\
             <tr><td>[1]</td><td>India</td></tr></table>",
        );
        let out = extract_page(Branch::Army, &html, false);
        assert_eq!(out.assets.len(), 1);
        assert_eq!(out.stats.skipped.get("short-row"), Some(&1));
        assert_eq!(out.stats.skipped.get("empty-name"), Some(&1));
        assert_eq!(out.stats.records, 1);
    }

    #[test]
    fn body_th_cells_count_as_headers() {
        // Row-header cells shift indices; "Model" resolves to the last th.
        let html = page(
            "<table class=\"wikitable\">\
             <tr><th>Model</th><th>Origin</th></tr>\
             <tr><th>Model X</th><td>India</td></tr></table>",
        );
        let doc = Html::parse_document(&html);
        let table = doc.select(&TABLE_SEL).next().unwrap();
        assert_eq!(table_headers(table), vec!["Model", "Origin", "Model X"]);
        match extract_table(table, Branch::Army, false) {
            TableOutcome::Matched { columns, rows } => {
                assert_eq!(columns.get(columns::Role::Name), Some(2));
                assert_eq!(rows[0], Err(SkipReason::ShortRow { cells: 2, needed: 3 }));
            }
            other => panic!("expected match, got {:?}", other),
        }
    }

    #[test]
    fn deterministic() {
        let html = fixture("army");
        let a = extract_page(Branch::Army, &html, false);
        let b = extract_page(Branch::Army, &html, false);
        assert_eq!(a.assets, b.assets);
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn army_fixture() {
        let out = extract_page(Branch::Army, &fixture("army"), false);
        assert_eq!(out.stats.tables_seen, 3);
        assert_eq!(out.stats.tables_matched, 2);
        let names: Vec<&str> = out.assets.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["T-90 Bhishma", "Arjun MBT", "T-72 Ajeya", "INSAS", "Pinaka"]);
        let t90 = &out.assets[0];
        assert_eq!(t90.origin, "Russia");
        assert_eq!(t90.kind, "Main battle tank");
        assert_eq!(t90.number_in_service, "1,657");
        assert_eq!(
            t90.image_url,
            "https://upload.wikimedia.org/wikipedia/commons/thumb/t90.jpg"
        );
        assert_eq!(out.assets[3].kind, "Equipment");
        assert_eq!(out.stats.skipped.get("short-row"), Some(&1));
    }

    #[test]
    fn navy_fixture() {
        let out = extract_page(Branch::Navy, &fixture("navy"), false);
        assert_eq!(out.stats.tables_matched, 2);
        let names: Vec<&str> = out.assets.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["INS Vikrant", "INS Vikramaditya", "Kolkata class", "Visakhapatnam class"]);
        assert!(out.assets.iter().all(|a| a.number_in_service == "Active"));
        assert_eq!(out.assets[0].kind, "Aircraft carrier");
        assert_eq!(out.assets[2].kind, "Ship");
        assert_eq!(out.assets[2].specs.label, "Class");
    }

    #[test]
    fn air_force_fixture() {
        let out = extract_page(Branch::AirForce, &fixture("air_force"), true);
        let ids: Vec<&str> = out.assets.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["af-sukhoi-su-30mki", "af-hal-tejas", "af-dassault-rafale"]);
        let tejas = &out.assets[1];
        assert_eq!(tejas.kind, "Multirole");
        assert_eq!(tejas.number_in_service, "38");
        assert_eq!(
            tejas.description,
            "HAL Tejas is a multirole used by the Indian Air Force. Origin: India."
        );
        assert_eq!(out.stats.skipped.get("missing-cell"), Some(&1));
    }

    #[test]
    fn inspect_lists_every_wikitable() {
        let tables = inspect_tables(Branch::Army, &fixture("army"));
        assert_eq!(tables.len(), 3);
        assert_eq!(tables.iter().filter(|(_, _, ok)| *ok).count(), 2);
    }
}
