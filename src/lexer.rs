use std::fs;
use std::path;
use std::str;

use tracing::debug;

use crate::errors::{Error, Result};

/// Characters trimmed from the start and end of every source line.
const LINE_TRIM: &[char] = &[' ', '\t', '\n', '\r'];

/// Lines starting with this marker are dropped before records are split.
const COMMENT_MARKER: &str = "%%";

/// Characters trimmed around a field chunk.
const CHUNK_TRIM: &[char] = &[' ', ',', '\t', '\n', '\r'];

/// One record of the bib file before its fields are interpreted.
/// Given a source like
///
/// ```tex
/// @Book{works:4,
///   author     = {Shakespeare, William},
///   title      = {Sonnets},
/// }
/// ```
///
/// the record has kind “book”, id “works:4” and the body
/// `author = {Shakespeare, William}, title = {Sonnets},`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RawRecord {
    pub(crate) kind: String,
    pub(crate) id: String,
    pub(crate) body: String,
}

impl RawRecord {
    /// Splits one `@`-separated fragment into type, id and field-list body.
    /// The body ends before the last `}` of the fragment; a fragment
    /// without any `}` has an empty body.
    fn from_fragment(fragment: &str) -> RawRecord {
        let (kind, rest) = fragment.split_once('{').unwrap_or((fragment, ""));
        let (id, rest) = rest.split_once(',').unwrap_or((rest, ""));
        let body = match rest.rfind('}') {
            Some(pos) => &rest[..pos],
            None => "",
        };
        RawRecord {
            kind: kind.trim().to_lowercase(),
            id: id.trim_matches(|c: char| c.is_whitespace() || c == '}').to_string(),
            body: body.to_string(),
        }
    }

    /// Iterate over the `key = value` chunks of the body.
    pub(crate) fn chunks(&self) -> FieldChunks<'_> {
        FieldChunks { rest: &self.body }
    }
}

/// Splits a field-list body into `key = value` chunks.
///
/// A chunk ends when a brace group closes back to depth zero, so
/// `title = {A {Robust} Method, Revisited}` stays one chunk. A comma at
/// depth zero outside of double quotes also ends a chunk, which lets bare
/// values like `year = 2019` sit next to braced ones.
pub(crate) struct FieldChunks<'s> {
    rest: &'s str,
}

impl<'s> Iterator for FieldChunks<'s> {
    type Item = &'s str;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.rest.is_empty() {
            let mut level = 0usize;
            let mut opened = false;
            let mut quoted = false;
            let mut boundary = None;

            for (pos, chr) in self.rest.char_indices() {
                match chr {
                    '{' => {
                        level += 1;
                        opened = true;
                    }
                    '}' => {
                        level = level.saturating_sub(1);
                        if level == 0 && opened && !quoted {
                            boundary = Some((pos + 1, pos + 1));
                            break;
                        }
                    }
                    '"' if level == 0 => quoted = !quoted,
                    ',' if level == 0 && !quoted => {
                        boundary = Some((pos, pos + 1));
                        break;
                    }
                    _ => {}
                }
            }

            let (end, next) = boundary.unwrap_or((self.rest.len(), self.rest.len()));
            let chunk = self.rest[..end].trim_matches(CHUNK_TRIM);
            self.rest = &self.rest[next..];
            if !chunk.is_empty() {
                return Some(chunk);
            }
        }
        None
    }
}

/// Yields one `RawRecord` per `@`-separated fragment of the prepared source.
pub(crate) struct Records<'s> {
    fragments: str::Split<'s, char>,
}

impl<'s> Iterator for Records<'s> {
    type Item = RawRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.fragments
            .by_ref()
            .find(|fragment| !fragment.trim().is_empty())
            .map(RawRecord::from_fragment)
    }
}

pub(crate) struct Lexer {
    blob: String,
}

impl Lexer {
    /// Use a file stored at a `path` as source for the lexing process.
    pub(crate) fn from_file<P: AsRef<path::Path>>(path: P) -> Result<Lexer> {
        let path = path.as_ref();
        let src = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Lexer::from_string(&src))
    }

    /// Use a string as source for the lexing process.
    pub(crate) fn from_string(src: &str) -> Lexer {
        Lexer {
            blob: prepare(src),
        }
    }

    /// Iterate over the records. Text before the first `@` is not a record.
    pub(crate) fn iter(&self) -> Records<'_> {
        let mut fragments = self.blob.split('@');
        fragments.next();
        debug!(records = self.blob.matches('@').count(), "split bib source");
        Records { fragments }
    }
}

/// Trims every line, drops `%%` comment lines and joins the rest with single spaces.
/// Comments are a line-level concept: a `%%` in the middle of a line is kept.
fn prepare(src: &str) -> String {
    src.lines()
        .map(|line| line.trim_matches(LINE_TRIM))
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_MARKER))
        .collect::<Vec<_>>()
        .join(" ")
}

impl str::FromStr for Lexer {
    type Err = std::convert::Infallible;

    /// Use a string as source for the lexing process.
    fn from_str(data: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Lexer::from_string(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks(body: &str) -> Vec<&str> {
        FieldChunks { rest: body }.collect()
    }

    #[test]
    fn test_tolkien() {
        let l = Lexer::from_string("@book{tolkien1937, author = {J. R. R. Tolkien}}");
        let records: Vec<RawRecord> = l.iter().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, "book");
        assert_eq!(records[0].id, "tolkien1937");
        assert_eq!(records[0].body, " author = {J. R. R. Tolkien}");
        assert_eq!(
            records[0].chunks().collect::<Vec<_>>(),
            vec!["author = {J. R. R. Tolkien}"]
        );
    }

    #[test]
    fn test_comment_lines_and_joining() {
        let src = "%% exported by hand\n@Article{a1,\n  title = {Long\n   title},\n}\n  %% trailing note\n@misc{b2, note = {x}}";
        let l = Lexer::from_string(src);
        assert_eq!(
            l.blob,
            "@Article{a1, title = {Long title}, } @misc{b2, note = {x}}"
        );
        let records: Vec<RawRecord> = l.iter().collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, "article");
        assert_eq!(records[1].id, "b2");
    }

    #[test]
    fn test_comment_marker_mid_line_is_kept() {
        let l = Lexer::from_string("@misc{c, note = {100%% sure}}");
        let records: Vec<RawRecord> = l.iter().collect();
        assert_eq!(records[0].body, " note = {100%% sure}");
    }

    #[test]
    fn test_text_before_first_record_is_ignored() {
        let l = Lexer::from_string("free text\n@misc{a, title = {T}}");
        let records: Vec<RawRecord> = l.iter().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, "misc");
    }

    #[test]
    fn test_record_without_fields() {
        let record = RawRecord::from_fragment("misc{lonely}");
        assert_eq!(record.id, "lonely");
        assert_eq!(record.body, "");
        assert_eq!(record.chunks().count(), 0);
    }

    #[test]
    fn test_nested_braces_and_commas() {
        assert_eq!(
            chunks("title = {A {Robust} Method, Revisited}, author = {Doe, Jane}"),
            vec!["title = {A {Robust} Method, Revisited}", "author = {Doe, Jane}"]
        );
    }

    #[test]
    fn test_bare_and_quoted_values() {
        assert_eq!(
            chunks("year = 2019, title = \"One, {Two}\", pages = {1--2},"),
            vec!["year = 2019", "title = \"One, {Two}\"", "pages = {1--2}"]
        );
    }

    #[test]
    fn test_trailing_text_is_a_chunk() {
        assert_eq!(
            chunks("author = {A}, month = jul"),
            vec!["author = {A}", "month = jul"]
        );
    }

    #[test]
    fn test_stray_closing_brace() {
        assert_eq!(chunks("note = x}y"), vec!["note = x}y"]);
    }
}
