use std::convert::Infallible;
use std::path;
use std::str;

use tracing::{debug, warn};

use crate::errors::Result;
use crate::lexer;
use crate::types::{BibEntry, Bibliography};

/// Characters stripped around a field name.
const NAME_TRIM: &[char] = &[' ', ',', '\t', '\n', '\r', '{', '}'];

/// Characters stripped around field data before its enclosing group is removed.
const DATA_TRIM: &[char] = &[' ', ',', '\t', '\n', '\r'];

/// Parser parsing a `.bib` file allowing iteration over `BibEntry` instances
pub struct Parser {
    pub(crate) lexer: lexer::Lexer,
}

impl Parser {
    /// Use a file at some filepath as source for the parsing process.
    pub fn from_file<P: AsRef<path::Path>>(path: P) -> Result<Parser> {
        let lexer = lexer::Lexer::from_file(path)?;
        Ok(Parser { lexer })
    }

    /// Use a string as source for the parsing process.
    pub fn from_string(data: &str) -> Parser {
        Parser {
            lexer: lexer::Lexer::from_string(data),
        }
    }

    pub fn iter(&self) -> BibEntries<'_> {
        BibEntries {
            records: self.lexer.iter(),
        }
    }

    /// Collect every entry in source order.
    pub fn bibliography(&self) -> Bibliography {
        let bibliography: Bibliography = self.iter().collect();
        debug!(
            entries = bibliography.len(),
            usable = bibliography.usable().count(),
            "parsed bibliography"
        );
        bibliography
    }
}

impl str::FromStr for Parser {
    type Err = Infallible;

    /// Use a string as source for the parsing process.
    fn from_str(data: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Parser::from_string(data))
    }
}

/// Iterator yielding one BibEntry instance per record.
///
/// Parsing never fails: chunks without `=` are ignored and
/// whatever could be read from a record is kept.
pub struct BibEntries<'i> {
    pub(crate) records: lexer::Records<'i>,
}

impl<'i> BibEntries<'i> {
    fn entry(record: lexer::RawRecord) -> BibEntry {
        let mut entry = BibEntry::new();
        for chunk in record.chunks() {
            let Some((name, data)) = split_field(chunk) else {
                continue;
            };
            if let Some(previous) = entry.fields.insert(name, data) {
                warn!(id = %record.id, previous = %previous, "duplicate field, keeping the later value");
            }
        }
        entry.kind = record.kind;
        entry.id = record.id;
        entry
    }
}

impl<'i> Iterator for BibEntries<'i> {
    type Item = BibEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next().map(Self::entry)
    }
}

/// Splits a chunk on its first `=` into lower-cased name and stripped data.
fn split_field(chunk: &str) -> Option<(String, String)> {
    let (name, data) = chunk.split_once('=')?;
    let name = name.trim_matches(NAME_TRIM).to_lowercase();
    if name.is_empty() {
        return None;
    }
    Some((name, strip_data(data)))
}

/// Removes surrounding whitespace and commas, then one enclosing `{…}`
/// group or one pair of double quotes. Inner groups stay untouched, so
/// `{A {Robust} Method}` becomes `A {Robust} Method`.
fn strip_data(data: &str) -> String {
    let data = data.trim_matches(DATA_TRIM);
    let inner = if is_single_group(data) {
        &data[1..data.len() - 1]
    } else if data.len() >= 2 && data.starts_with('"') && data.ends_with('"') {
        &data[1..data.len() - 1]
    } else {
        data
    };
    inner.trim().to_string()
}

/// Whether `data` is exactly one balanced `{…}` group,
/// i.e. the first brace is closed by the last character.
fn is_single_group(data: &str) -> bool {
    if !data.starts_with('{') || !data.ends_with('}') {
        return false;
    }
    let mut level = 0usize;
    for (pos, chr) in data.char_indices() {
        match chr {
            '{' => level += 1,
            '}' => {
                level = level.saturating_sub(1);
                if level == 0 {
                    return pos == data.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}
