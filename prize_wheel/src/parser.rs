// Turning tabular content into participant pools.

use log::{debug, info};

use crate::builder::PoolBuilder;
use crate::config::*;

const DELIMITER: char = ';';

const ID_FIELD: &str = "ID";
const NAME_FIELD: &str = "Name";
const FULL_NAME_FIELD: &str = "Full name";

/// Parses semicolon-delimited text with a header line.
///
/// Fields are split on every `;`. There is no quoting: quotes are part of the values.
///
/// The header must contain the exact fields `ID` and `Name`. An optional `Full name`
/// field is used when the name of a row is empty. Rows that are too short, that have no
/// id or no name, or that repeat an id, are dropped.
///
/// ```
/// let pool = prize_wheel::parse_delimited_text("ID;Name\n001;John\n002;Jane\n").unwrap();
/// assert_eq!(pool[1].name, "Jane");
/// ```
pub fn parse_delimited_text(text: &str) -> ParseResult {
    let lines: Vec<&str> = text
        .split(|c: char| c == '\n' || c == '\r')
        .filter(|l| !l.is_empty())
        .collect();
    if lines.len() < 2 {
        return Err(ParseError::TooFewRows);
    }

    let header: Vec<&str> = lines[0].split(DELIMITER).collect();
    debug!("parse_delimited_text: header: {:?}", header);
    let position = |field: &str| header.iter().position(|h| *h == field);
    let (idx_id, idx_name) = match (position(ID_FIELD), position(NAME_FIELD)) {
        (Some(idx_id), Some(idx_name)) => (idx_id, idx_name),
        _ => {
            return Err(ParseError::MissingRequiredColumns {
                matching: HeaderMatching::Exact,
                found_columns: header.iter().map(|h| h.to_string()).collect(),
            });
        }
    };
    let idx_full_name = position(FULL_NAME_FIELD);

    let mut builder = PoolBuilder::new();
    for (lineno, line) in lines.iter().enumerate().skip(1) {
        let cols: Vec<&str> = line.split(DELIMITER).collect();
        if cols.len() < header.len() || cols[idx_id].is_empty() {
            debug!("parse_delimited_text: line {}: dropped {:?}", lineno, line);
            continue;
        }
        let mut name = cols[idx_name].trim();
        if name.is_empty() {
            if let Some(idx) = idx_full_name {
                name = cols[idx].trim();
            }
        }
        if !builder.add(cols[idx_id], name) {
            debug!("parse_delimited_text: line {}: invalid row {:?}", lineno, line);
        }
    }

    finish(builder, HeaderMatching::Exact)
}

/// Parses rows coming from a spreadsheet. The first row is the header.
///
/// Column names are matched loosely: case does not matter, surrounding spaces are
/// ignored, and the ID column is any column whose name contains `id`.
pub fn parse_tabular_rows(rows: &[Vec<Cell>]) -> ParseResult {
    if rows.len() < 2 {
        return Err(ParseError::TooFewRows);
    }

    let raw_header: Vec<String> = rows[0].iter().map(|c| c.to_text()).collect();
    let header: Vec<String> = raw_header
        .iter()
        .map(|h| h.to_lowercase().trim().to_string())
        .collect();
    debug!("parse_tabular_rows: header: {:?}", header);

    let idx_id = header.iter().position(|col| col == "id" || col.contains("id"));
    let idx_name = header.iter().position(|col| col == "name");
    let idx_full_name = header
        .iter()
        .position(|col| col.contains("full name") || col == "fullname");
    debug!(
        "parse_tabular_rows: idx_id: {:?} idx_name: {:?} idx_full_name: {:?}",
        idx_id, idx_name, idx_full_name
    );

    let idx_id = match idx_id {
        Some(idx) if idx_name.is_some() || idx_full_name.is_some() => idx,
        _ => {
            return Err(ParseError::MissingRequiredColumns {
                matching: HeaderMatching::Fuzzy,
                found_columns: raw_header,
            });
        }
    };

    let mut builder = PoolBuilder::new();
    for (lineno, row) in rows.iter().enumerate().skip(1) {
        let id = match row.get(idx_id) {
            Some(cell) if !cell.is_blank() => cell.to_text(),
            _ => {
                debug!("parse_tabular_rows: row {}: no id in {:?}", lineno, row);
                continue;
            }
        };
        let name = [idx_name, idx_full_name]
            .iter()
            .flatten()
            .filter_map(|idx| row.get(*idx))
            .map(|cell| cell.to_text().trim().to_string())
            .find(|name| !name.is_empty())
            .unwrap_or_default();
        if !builder.add(&id, &name) {
            debug!("parse_tabular_rows: row {}: invalid row {:?}", lineno, row);
        }
    }

    finish(builder, HeaderMatching::Fuzzy)
}

fn finish(builder: PoolBuilder, matching: HeaderMatching) -> ParseResult {
    if builder.len() < 2 {
        return Err(ParseError::TooFewParticipants { matching });
    }
    info!("Parsed {} participants", builder.len());
    Ok(builder.build())
}
