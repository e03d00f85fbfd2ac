use std::path::Path;

use calamine::{DataType, Range};
use log::warn;
use prize_wheel::Cell;

/// The file name of a path, without its directories.
pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
        .to_string()
}

pub fn cell_from_calamine(cell: &DataType) -> Cell {
    match cell {
        DataType::String(s) => Cell::Text(s.clone()),
        DataType::Float(f) => Cell::Number(*f),
        DataType::Int(i) => Cell::Number(*i as f64),
        DataType::Bool(b) => Cell::Bool(*b),
        // Dates are kept as their serial number.
        DataType::DateTime(f) => Cell::Number(*f),
        DataType::Error(e) => {
            warn!("cell_from_calamine: error cell {:?} read as empty", e);
            Cell::Empty
        }
        DataType::Empty => Cell::Empty,
    }
}

/// All the rows of a worksheet, starting from its first used row.
pub fn rows_from_range(range: &Range<DataType>) -> Vec<Vec<Cell>> {
    range
        .rows()
        .map(|row| row.iter().map(cell_from_calamine).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name("/tmp/raffle/people.csv"), "people.csv");
        assert_eq!(simplify_file_name("people.xlsx"), "people.xlsx");
    }

    #[test]
    fn cells() {
        assert_eq!(
            cell_from_calamine(&DataType::String("Ann".to_string())),
            Cell::Text("Ann".to_string())
        );
        assert_eq!(cell_from_calamine(&DataType::Int(3)), Cell::Number(3.0));
        assert_eq!(cell_from_calamine(&DataType::Float(3.0)).to_text(), "3");
        assert_eq!(cell_from_calamine(&DataType::Bool(true)).to_text(), "true");
        assert_eq!(cell_from_calamine(&DataType::Empty), Cell::Empty);
    }

    #[test]
    fn rows() {
        let mut range: Range<DataType> = Range::new((0, 0), (2, 1));
        range.set_value((0, 0), DataType::String("ID".to_string()));
        range.set_value((0, 1), DataType::String("Name".to_string()));
        range.set_value((1, 0), DataType::Float(1.0));
        range.set_value((1, 1), DataType::String("Ann".to_string()));
        range.set_value((2, 0), DataType::Int(2));

        let rows = rows_from_range(&range);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec![Cell::Number(1.0), Cell::from("Ann")]);
        assert_eq!(rows[2], vec![Cell::Number(2.0), Cell::Empty]);
    }
}
