// Primitives for reading semicolon separated participant files.

use snafu::prelude::*;

use crate::raffle::*;

const BYTE_ORDER_MARK: char = '\u{feff}';

pub fn read_csv_participants(path: &str) -> RaffleResult<Vec<Participant>> {
    let bytes = fs::read(path).context(ReadingTextSnafu { path })?;
    let text = String::from_utf8(bytes).context(DecodingTextSnafu { path })?;
    // Spreadsheet programs like to start their exports with a BOM.
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(&text);
    debug!("read_csv_participants: {} bytes of text", text.len());
    parse_delimited_text(text).context(ParsingParticipantsSnafu {})
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
        let p = std::env::temp_dir().join(format!("octoraffle-{}-{}", std::process::id(), name));
        fs::write(&p, contents).unwrap();
        p
    }

    #[test]
    fn read_with_bom() {
        let p = temp_file(
            "bom.csv",
            "\u{feff}ID;Name;Full name\r\n001;John;John Smith\r\n002;;Jane Doe\r\n".as_bytes(),
        );
        let participants = read_csv_participants(p.to_str().unwrap()).unwrap();
        fs::remove_file(&p).unwrap();
        assert_eq!(
            participants,
            vec![
                Participant {
                    id: "001".to_string(),
                    name: "John".to_string()
                },
                Participant {
                    id: "002".to_string(),
                    name: "Jane Doe".to_string()
                },
            ]
        );
    }

    #[test]
    fn too_few() {
        let p = temp_file("few.csv", b"ID;Name\n1;Ann\n");
        let res = read_csv_participants(p.to_str().unwrap());
        fs::remove_file(&p).unwrap();
        let err = res.unwrap_err();
        assert_eq!(
            err.to_string(),
            "File must contain at least 2 valid participants."
        );
    }

    #[test]
    fn invalid_utf8() {
        let p = temp_file("latin1.csv", b"ID;Name\n1;Jos\xe9\n2;Ann\n");
        let res = read_csv_participants(p.to_str().unwrap());
        fs::remove_file(&p).unwrap();
        assert!(matches!(res, Err(RaffleError::DecodingText { .. })));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_csv_participants("/nonexistent/octoraffle/people.csv"),
            Err(RaffleError::ReadingText { .. })
        ));
    }
}
