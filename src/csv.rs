//! Minimal CSV reading and writing for the task file.
//!
//! Fields are quoted only when they contain a comma, a double quote or a line
//! break; embedded quotes are doubled. The reader accepts quoted fields that
//! span several lines and both `\n` and `\r\n` record terminators.

use std::mem;

use crate::error::CsvError;

/// One parsed row together with the line it started on (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Escape a single field for output.
pub fn escape_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Render one record, newline terminated.
pub fn write_record<S: AsRef<str>>(fields: &[S]) -> String {
    let mut out = fields
        .iter()
        .map(|f| escape_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    out.push('\n');
    out
}

/// Parse every record in `content`. Blank lines are skipped.
pub fn parse_records(content: &str) -> Result<Vec<Record>, CsvError> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    // Set once a quoted field has closed; only a separator may follow.
    let mut after_quote = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut quote_line = 1;
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => {
                    in_quotes = false;
                    after_quote = true;
                }
                '\n' => {
                    line += 1;
                    field.push(ch);
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            ',' => {
                fields.push(mem::take(&mut field));
                after_quote = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                let blank = fields.is_empty() && field.is_empty() && !after_quote;
                if !blank {
                    fields.push(mem::take(&mut field));
                    records.push(Record {
                        line: record_line,
                        fields: mem::take(&mut fields),
                    });
                }
                after_quote = false;
                line += 1;
                record_line = line;
            }
            _ if after_quote => {
                return Err(CsvError::TrailingCharacter { line, found: ch });
            }
            '"' if field.is_empty() => {
                in_quotes = true;
                quote_line = line;
            }
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err(CsvError::UnterminatedQuote { line: quote_line });
    }
    if !fields.is_empty() || !field.is_empty() || after_quote {
        fields.push(field);
        records.push(Record {
            line: record_line,
            fields,
        });
    }

    Ok(records)
}
