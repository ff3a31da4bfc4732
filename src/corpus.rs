//! Labeled corpus lines.
//!
//! The tweet corpus stores one document per line as `<label>\t<text>`.
//! This module only splits lines; where they come from is up to the caller.

use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::maxent::category::Category;

/// Label/text separator
pub const LABEL_DELIMITER: char = '\t';

/// Raw training or evaluation document with its gold category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledDocument {
    pub label: Category,
    pub text: String,
}

impl LabeledDocument {
    pub fn new<C, S>(label: C, text: S) -> Self
    where
        C: Into<Category>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// Split one `<label>\t<text>` line at the first tab.
/// The text may itself contain further tabs.
pub fn parse_line(line: &str) -> Result<LabeledDocument> {
    parse_numbered(line, 1)
}

fn parse_numbered(line: &str, line_no: usize) -> Result<LabeledDocument> {
    let Some((label, text)) = line.split_once(LABEL_DELIMITER) else {
        return Err(Error::MalformedLine {
            line: line_no,
            reason: "missing tab between label and text".to_string(),
        });
    };
    let label = label.trim();
    if label.is_empty() {
        return Err(Error::MalformedLine {
            line: line_no,
            reason: "empty label".to_string(),
        });
    }
    Ok(LabeledDocument::new(label, text.trim_end_matches(['\r', '\n'])))
}

/// Read every labeled line from `reader`.
/// Blank lines are skipped; line numbers in errors are 1-based.
pub fn read_labeled<R: BufRead>(reader: R) -> Result<Vec<LabeledDocument>> {
    let mut docs = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        docs.push(parse_numbered(&line, i + 1)?);
    }
    Ok(docs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn splits_on_first_tab() {
        let doc = parse_line("1\tgreat\tday").unwrap();
        assert_eq!(doc.label, Category::from("1"));
        assert_eq!(doc.text, "great\tday");
    }

    #[test]
    fn missing_tab_is_malformed() {
        let err = parse_line("1 great day").unwrap_err();
        assert!(matches!(err, Error::MalformedLine { line: 1, .. }));
        let err = parse_line("\tno label").unwrap_err();
        assert!(matches!(err, Error::MalformedLine { .. }));
    }

    #[test]
    fn reads_corpus_and_skips_blanks() {
        let text = "1\tI love it\n\n0\tI hate it\r\n   \n";
        let docs = read_labeled(Cursor::new(text)).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1], LabeledDocument::new("0", "I hate it"));
    }

    #[test]
    fn reports_line_number() {
        let text = "1\tok\n0 broken\n";
        match read_labeled(Cursor::new(text)) {
            Err(Error::MalformedLine { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected {:?}", other),
        }
    }
}
