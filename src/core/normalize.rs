//! Company-name matching keys and cell predicates shared by the catalog
//! builder and the match report.

use crate::domain::model::Cell;
use regex::Regex;
use std::sync::LazyLock;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("punctuation pattern is valid"));
static LEGAL_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:llc|inc|co|corp|ltd|pllc)\b").expect("suffix pattern is valid")
});
static ARTICLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bthe\b").expect("article pattern is valid"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));
static SLUG_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w]+").expect("slug pattern is valid"));

const TRUTHY_VALUES: &[&str] = &["✓", "yes", "true", "1", "y"];

/// Canonical join key for a company name.
///
/// `"Smith & Sons LLC"` and `"Smith and Sons"` both become `"smith and sons"`;
/// `"The Plumbing Co."` becomes `"plumbing"`.
pub fn normalize_company_name(name: &str) -> String {
    let name = name.to_lowercase().replace('&', " and ");
    let name = NON_WORD.replace_all(&name, "");
    let name = LEGAL_SUFFIX.replace_all(&name, "");
    let name = ARTICLE.replace_all(&name, "");
    WHITESPACE.replace_all(&name, " ").trim().to_string()
}

/// Key for a raw cell. Anything that is not text is unmatchable and yields `""`.
pub fn normalize_cell(cell: &Cell) -> String {
    cell.as_text().map(normalize_company_name).unwrap_or_default()
}

/// Identifier slug for a display name: `"Acme Plumbing, LLC"` → `"acme-plumbing-llc"`.
pub fn slugify(name: &str) -> String {
    SLUG_SEPARATOR
        .replace_all(&name.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

/// Whether a services-sheet cell marks the service as offered.
pub fn is_truthy(cell: &Cell) -> bool {
    cell.display_value()
        .map(|value| TRUTHY_VALUES.contains(&value.trim().to_lowercase().as_str()))
        .unwrap_or(false)
}
