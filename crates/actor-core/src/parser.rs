//! Parser — turns one raw tab-separated line into a [`Record`].
//!
//! Field 0 is ignored; field 1 is the display name. Extra fields are ignored.

use crate::{error::ParseError, Record};

/// Field separator for source lines.
pub const FIELD_SEPARATOR: char = '\t';

/// Index of the display-name field.
const NAME_FIELD: usize = 1;

/// Parse `raw` (line number `line`, 1-based) into a record.
///
/// Returns `Ok(None)` for lines that are empty after trimming whitespace, and
/// [`ParseError::MalformedLine`] when the name field is missing.
pub fn parse_line(line: usize, raw: &str) -> Result<Option<Record>, ParseError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }

    match raw.split(FIELD_SEPARATOR).nth(NAME_FIELD) {
        Some(name) => Ok(Some(Record::new(name, line))),
        None => Err(ParseError::MalformedLine {
            line,
            fields: raw.split(FIELD_SEPARATOR).count(),
        }),
    }
}
