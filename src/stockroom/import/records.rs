//! Record parser: raw delimited text → header-keyed field mappings.
//!
//! The dialect is deliberately plain: fields are separated by commas and trimmed,
//! with no quoting or escaping. A cell that itself contains a comma is read as two
//! cells and shifts every later column of that row. Rows shorter than the header
//! are padded with empty values; cells beyond the header width are dropped.

use crate::error::{Result, StockError};

const UTF8_BOM: char = '\u{feff}';

/// One data row: header keys paired positionally with trimmed cell values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line number in the source text (the header is the first non-blank line).
    pub line: usize,
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new(line: usize, fields: Vec<(String, String)>) -> Self {
        Self { line, fields }
    }

    /// Value for `key`, or `""` when the column is absent.
    /// With repeated header names the right-most column wins.
    pub fn get(&self, key: &str) -> &str {
        self.fields
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

/// Parsed header plus the body it applies to.
///
/// [`RecordParser::records`] can be called any number of times; each call walks the
/// body again from the top.
#[derive(Debug, Clone)]
pub struct RecordParser<'a> {
    header: Vec<String>,
    body: &'a str,
    body_first_line: usize,
}

impl<'a> RecordParser<'a> {
    /// Locate the header. Fails with `EmptyInput` if the text has no non-blank line.
    pub fn new(text: &'a str) -> Result<Self> {
        let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

        let mut rest = text;
        let mut line_no = 0;
        loop {
            let Some((line, tail)) = next_line(rest) else {
                return Err(StockError::EmptyInput);
            };
            line_no += 1;
            rest = tail;
            if !line.trim().is_empty() {
                return Ok(Self {
                    header: split_cells(line),
                    body: rest,
                    body_first_line: line_no + 1,
                });
            }
        }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// A fresh iterator over the data rows.
    pub fn records(&self) -> Records<'_, 'a> {
        Records {
            parser: self,
            rest: self.body,
            line: self.body_first_line,
        }
    }
}

pub struct Records<'p, 'a> {
    parser: &'p RecordParser<'a>,
    rest: &'a str,
    line: usize,
}

impl Iterator for Records<'_, '_> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        loop {
            let (line, tail) = next_line(self.rest)?;
            self.rest = tail;
            let line_no = self.line;
            self.line += 1;

            if line.trim().is_empty() {
                continue;
            }

            let mut cells = split_cells(line).into_iter();
            let fields = self
                .parser
                .header
                .iter()
                .map(|key| (key.clone(), cells.next().unwrap_or_default()))
                .collect();
            return Some(Record::new(line_no, fields));
        }
    }
}

fn split_cells(line: &str) -> Vec<String> {
    line.split(',').map(|c| c.trim().to_string()).collect()
}

/// Split off the next line, accepting `\r\n`, `\n` and lone `\r` terminators.
fn next_line(text: &str) -> Option<(&str, &str)> {
    if text.is_empty() {
        return None;
    }
    match text.find(['\r', '\n']) {
        Some(pos) => {
            let line = &text[..pos];
            let skip = if text[pos..].starts_with("\r\n") { 2 } else { 1 };
            Some((line, &text[pos + skip..]))
        }
        None => Some((text, "")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Vec<Record> {
        RecordParser::new(text).unwrap().records().collect()
    }

    #[test]
    fn zips_rows_against_header() {
        let records = collect("id, name ,price\n1,Widget, 9.99\n2,Gadget,19.99\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("id"), "1");
        assert_eq!(records[0].get("name"), "Widget");
        assert_eq!(records[0].get("price"), "9.99");
        assert_eq!(records[1].get("name"), "Gadget");
    }

    #[test]
    fn fields_keep_header_order() {
        let records = collect("b,a\n1,2");
        let keys: Vec<_> = records[0].fields().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn short_rows_are_padded_and_long_rows_truncated() {
        let records = collect("id,name,category\n1\n2,Gadget,Tools,extra");
        assert_eq!(records[0].get("name"), "");
        assert_eq!(records[0].get("category"), "");
        assert_eq!(records[1].get("category"), "Tools");
        assert_eq!(records[1].fields().len(), 3);
    }

    #[test]
    fn embedded_comma_misaligns_columns() {
        let records = collect("name,price\nNuts, bolts,1.00");
        assert_eq!(records[0].get("name"), "Nuts");
        assert_eq!(records[0].get("price"), "bolts");
    }

    #[test]
    fn accepts_every_newline_convention() {
        let records = collect("id,name\r\n1,a\r2,b\n3,c");
        let names: Vec<_> = records.iter().map(|r| r.get("name").to_string()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn blank_lines_are_skipped_but_counted() {
        let records = collect("\n\nid,name\n\n   \n1,a\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].line, 6);
    }

    #[test]
    fn missing_column_reads_as_empty() {
        let records = collect("id\n1");
        assert_eq!(records[0].get("barcode"), "");
    }

    #[test]
    fn strips_byte_order_mark() {
        let parser = RecordParser::new("\u{feff}id,name\n1,a").unwrap();
        assert_eq!(parser.header(), &["id".to_string(), "name".to_string()]);
    }

    #[test]
    fn header_only_has_no_records() {
        assert_eq!(collect("id,name\n\n").len(), 0);
    }

    #[test]
    fn empty_or_blank_input_is_rejected() {
        assert!(matches!(RecordParser::new(""), Err(StockError::EmptyInput)));
        assert!(matches!(
            RecordParser::new(" \r\n\t\n"),
            Err(StockError::EmptyInput)
        ));
    }

    #[test]
    fn records_can_be_walked_twice() {
        let parser = RecordParser::new("id\n1\n2").unwrap();
        assert_eq!(parser.records().count(), 2);
        assert_eq!(parser.records().count(), 2);
    }
}
