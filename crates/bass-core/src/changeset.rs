//! Changeset filtering: does any changed path match a node's
//! `if-changeset-matches` regex?

use regex::Regex;

/// Ordered sequence of changed file paths. Empty means "no filter".
pub type Changeset = Vec<String>;

/// Returns whether `node` should run given `changeset` and an optional
/// `if-changeset-matches` pattern. An empty changeset, or the absence of a
/// filter, always means "run" (default `true`). Otherwise a non-empty
/// changeset is scanned with case-sensitive substring/regex search
/// (`re.search` semantics) and any match is sufficient.
pub fn any_item_matches(items: &[String], match_criteria: Option<&str>) -> Result<bool, regex::Error> {
    if items.is_empty() {
        return Ok(true);
    }

    let Some(pattern) = match_criteria else {
        return Ok(true);
    };

    let exp = Regex::new(pattern)?;
    Ok(items.iter().any(|item| exp.is_match(item)))
}

/// Like `any_item_matches`, but assumes `match_criteria` was already
/// regex-validated (e.g. by `validate::validate_pipeline`), so a compile
/// failure here indicates a broken invariant rather than bad input.
pub fn matches_changeset(items: &[String], match_criteria: Option<&str>) -> bool {
    any_item_matches(items, match_criteria)
        .expect("if-changeset-matches regex was validated before execution")
}
