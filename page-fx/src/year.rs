//! Footer copyright year.

use crate::host::Page;
use crate::error::Result;

/// Four-digit year text.
pub fn year_text(year: i32) -> String {
    format!("{year:04}")
}

/// Write the host's current year into the element with id `year_id`.
/// Returns whether the element was present.
pub fn apply_footer_year<P: Page>(page: &P, year_id: &str) -> Result<bool> {
    let Some(slot) = page.element_by_id(year_id) else {
        return Ok(false);
    };
    page.set_text(&slot, &year_text(page.current_year()))?;
    Ok(true)
}
