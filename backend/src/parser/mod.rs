//! CSV to [`RawGrid`] parser with encoding auto-detection.
//!
//! Produces rows of text tokens. No matrix-specific checks happen here:
//! ragged rows and non-numeric tokens are passed through untouched for the
//! validator to judge.

use crate::error::{CsvError, CsvResult};
use crate::models::RawGrid;

/// Default field delimiter.
pub const DEFAULT_DELIMITER: char = ',';

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed rows
    pub rows: RawGrid,
    /// Detected encoding
    pub encoding: String,
    /// Delimiter used
    pub delimiter: char,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding.
///
/// UTF-8 input has its byte order mark stripped; unknown encodings fall back
/// to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let decoder = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => encoding_rs::UTF_8,
        // WHATWG maps the latin1 labels to windows-1252
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252
        }
        _ => return Ok(String::from_utf8_lossy(bytes).into_owned()),
    };

    let (text, _, had_errors) = decoder.decode(bytes);
    if had_errors && decoder == encoding_rs::UTF_8 {
        return Err(CsvError::Encoding(format!(
            "input is not valid {}",
            decoder.name()
        )));
    }
    Ok(text.into_owned())
}

/// Parse CSV text into rows with an explicit delimiter.
///
/// The reader runs headerless and flexible: every line becomes a row and rows
/// may differ in width. Cells are not trimmed.
///
/// # Example
/// ```
/// use matrix_service::parser::parse_str;
///
/// let rows = parse_str("1,2\n3,4\n", ',').unwrap();
/// assert_eq!(rows, vec![vec!["1", "2"], vec!["3", "4"]]);
/// ```
pub fn parse_str(content: &str, delimiter: char) -> CsvResult<RawGrid> {
    let delimiter = delimiter_byte(delimiter)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Parse CSV bytes, detecting the encoding first.
pub fn parse_bytes(bytes: &[u8], delimiter: char) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let rows = parse_str(&content, delimiter)?;

    Ok(ParseResult {
        rows,
        encoding,
        delimiter,
    })
}

fn delimiter_byte(delimiter: char) -> CsvResult<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(CsvError::Delimiter(delimiter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_csv() {
        let rows = parse_str("1,2,3\n4,5,6\n7,8,9", ',').unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["1", "2", "3"]);
        assert_eq!(rows[2], vec!["7", "8", "9"]);
    }

    #[test]
    fn test_ragged_rows_kept() {
        let rows = parse_str("1,2,3\n4,5", ',').unwrap();

        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[1].len(), 2);
    }

    #[test]
    fn test_cells_not_trimmed() {
        let rows = parse_str("1, 2", ',').unwrap();
        assert_eq!(rows[0], vec!["1", " 2"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let rows = parse_str("1,2\r\n3,4\r\n", ',').unwrap();
        assert_eq!(rows, vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn test_empty_input() {
        let rows = parse_str("", ',').unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_custom_delimiter() {
        let rows = parse_str("1;2\n3;4", ';').unwrap();
        assert_eq!(rows, vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let err = parse_str("1§2", '§').unwrap_err();
        assert!(matches!(err, CsvError::Delimiter('§')));
    }

    #[test]
    fn test_parse_bytes_ascii() {
        let result = parse_bytes(b"1,2\n3,4\n", ',').unwrap();

        assert_eq!(result.encoding, "utf-8");
        assert_eq!(result.delimiter, ',');
        assert_eq!(result.rows.len(), 2);
    }

    #[test]
    fn test_utf8_bom_stripped() {
        let decoded = decode_content(b"\xEF\xBB\xBF1,2", "utf-8").unwrap();
        assert_eq!(decoded, "1,2");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_latin1_currency_sign() {
        // 0xA4 is '¤' in Latin-1, '€' in ISO-8859-15
        let decoded = decode_content(&[0x31, 0xA4], "iso-8859-1").unwrap();
        assert_eq!(decoded, "1¤");
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let err = decode_content(&[0x31, 0xFF, 0x32], "utf-8").unwrap_err();
        assert!(matches!(err, CsvError::Encoding(_)));
    }
}
