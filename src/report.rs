use crate::asset::Asset;
use crate::branch::Branch;
use crate::parser::{ExtractStats, PageExtraction};

/// Progress line printed before each branch is fetched.
pub fn scraping_line(branch: Branch) -> String {
    format!("Scraping {}...", branch)
}

/// Line printed when a branch page could not be fetched.
pub fn fetch_error_line(url: &str, error: &dyn std::fmt::Display) -> String {
    format!("Error fetching {}: {}", url, error)
}

/// Outcome of one branch in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchStatus {
    Extracted(ExtractStats),
    FetchFailed(String),
}

/// Accumulates records across branches in scrape order.
#[derive(Debug, Default)]
pub struct RunReport {
    assets: Vec<Asset>,
    branches: Vec<(Branch, BranchStatus)>,
}

impl RunReport {
    pub fn record_page(&mut self, branch: Branch, page: PageExtraction) {
        self.assets.extend(page.assets);
        self.branches.push((branch, BranchStatus::Extracted(page.stats)));
    }

    pub fn record_failure(&mut self, branch: Branch, error: impl ToString) {
        self.branches
            .push((branch, BranchStatus::FetchFailed(error.to_string())));
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn branches(&self) -> &[(Branch, BranchStatus)] {
        &self.branches
    }

    pub fn failures(&self) -> usize {
        self.branches
            .iter()
            .filter(|(_, s)| matches!(s, BranchStatus::FetchFailed(_)))
            .count()
    }

    pub fn totals(&self) -> ExtractStats {
        let mut total = ExtractStats::default();
        for (_, status) in &self.branches {
            if let BranchStatus::Extracted(stats) = status {
                total.merge(stats);
            }
        }
        total
    }

    pub fn print(&self) {
        println!(
            "{:<10} | {:>6} | {:>7} | {:>7} | {:>7}",
            "Branch", "Tables", "Matched", "Records", "Skipped"
        );
        println!("{}", "-".repeat(50));
        for (branch, status) in self.branches() {
            match status {
                BranchStatus::Extracted(s) => println!(
                    "{:<10} | {:>6} | {:>7} | {:>7} | {:>7}",
                    branch.label(),
                    s.tables_seen,
                    s.tables_matched,
                    s.records,
                    s.rows_skipped()
                ),
                BranchStatus::FetchFailed(e) => {
                    println!("{:<10} | fetch failed: {}", branch.label(), e)
                }
            }
        }

        let totals = self.totals();
        if !totals.skipped.is_empty() {
            let parts: Vec<String> = totals
                .skipped
                .iter()
                .map(|(tag, n)| format!("{} {}", n, tag))
                .collect();
            println!("\nSkipped rows: {}", parts.join(", "));
        }

        let failures = self.failures();
        if failures > 0 {
            println!("{} fetch failures", failures);
        }
    }
}
