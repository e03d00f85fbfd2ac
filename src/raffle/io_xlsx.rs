// Reading participants from Excel workbooks.

use calamine::{open_workbook, DataType, Range, Reader, Xlsx};
use snafu::prelude::*;

use crate::raffle::io_common::rows_from_range;
use crate::raffle::*;

pub fn read_xlsx_participants(
    path: &str,
    worksheet_name: Option<&str>,
) -> RaffleResult<Vec<Participant>> {
    let wrange = get_range(path, worksheet_name)?;
    participants_from_range(&wrange)
}

fn participants_from_range(wrange: &Range<DataType>) -> RaffleResult<Vec<Participant>> {
    let rows = rows_from_range(wrange);
    debug!("read_xlsx_participants: {} rows", rows.len());
    parse_tabular_rows(&rows).context(ParsingParticipantsSnafu {})
}

fn get_range(path: &str, worksheet_name: Option<&str>) -> RaffleResult<Range<DataType>> {
    debug!(
        "read_xlsx_participants: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    match worksheet_name {
        // A worksheet name was provided, use it.
        Some(worksheet) => workbook
            .worksheet_range(worksheet)
            .context(MissingWorksheetSnafu { path, worksheet })?
            .context(OpeningExcelSnafu { path }),
        // Otherwise the first one.
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> DataType {
        DataType::String(s.to_string())
    }

    #[test]
    fn forms_export() {
        let mut wrange: Range<DataType> = Range::new((0, 0), (3, 2));
        wrange.set_value((0, 0), text(" Participant ID "));
        wrange.set_value((0, 1), text("Email"));
        wrange.set_value((0, 2), text("NAME"));
        wrange.set_value((1, 0), DataType::Float(1.0));
        wrange.set_value((1, 1), text("ann@example.com"));
        wrange.set_value((1, 2), text("Ann"));
        wrange.set_value((2, 0), DataType::Int(2));
        wrange.set_value((2, 2), text("Bob"));
        wrange.set_value((3, 0), text("3"));

        let participants = participants_from_range(&wrange).unwrap();
        assert_eq!(
            participants,
            vec![
                Participant {
                    id: "1".to_string(),
                    name: "Ann".to_string()
                },
                Participant {
                    id: "2".to_string(),
                    name: "Bob".to_string()
                },
            ]
        );
    }

    #[test]
    fn missing_columns() {
        let mut wrange: Range<DataType> = Range::new((0, 0), (2, 1));
        wrange.set_value((0, 0), text("Email"));
        wrange.set_value((0, 1), text("Name"));
        wrange.set_value((1, 0), text("a@example.com"));
        wrange.set_value((1, 1), text("Ann"));
        wrange.set_value((2, 0), text("b@example.com"));
        wrange.set_value((2, 1), text("Bob"));

        let err = participants_from_range(&wrange).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Header must include at least \"ID\" and \"Name\" columns. Found columns: Email, Name"
        );
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_xlsx_participants("/nonexistent/octoraffle/people.xlsx", None),
            Err(RaffleError::OpeningExcel { .. })
        ));
    }
}
