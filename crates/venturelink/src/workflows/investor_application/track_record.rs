use super::domain::{DraftRecord, PortfolioEntry};
use super::validation::ValidationErrors;

pub const INCOMPLETE_ENTRY_NOTICE: &str = "Fill in the company name, category, and year";

/// Append the scratch entry to the portfolio and reset the buffer.
///
/// All three fields must be filled; otherwise neither the record nor the buffer changes.
pub fn add_entry(
    record: &mut DraftRecord,
    pending: &mut PortfolioEntry,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if pending.name.trim().is_empty() {
        errors.insert("portfolio.name", INCOMPLETE_ENTRY_NOTICE);
    }
    if pending.category.trim().is_empty() {
        errors.insert("portfolio.category", INCOMPLETE_ENTRY_NOTICE);
    }
    if pending.year.trim().is_empty() {
        errors.insert("portfolio.year", INCOMPLETE_ENTRY_NOTICE);
    }
    errors.into_result()?;

    let entry = std::mem::take(pending);
    record.portfolio.push(PortfolioEntry {
        name: entry.name.trim().to_string(),
        category: entry.category.trim().to_string(),
        year: entry.year.trim().to_string(),
    });
    Ok(())
}

/// Remove by position; out-of-range indexes leave the record untouched.
pub fn remove_entry(record: &mut DraftRecord, index: usize) -> Option<PortfolioEntry> {
    if index < record.portfolio.len() {
        Some(record.portfolio.remove(index))
    } else {
        None
    }
}
