//! One Markdown document with YAML front matter per entry, for static site generators.

use crate::listing::{HTML_INDENT, HTML_NEWLINE};
use crate::normalize::{month_name, normalize_entry, page_label};
use crate::types::BibEntry;

/// Front matter keys, in output order.
const KEYS: [&str; 31] = [
    "abstract",
    "address",
    "annote",
    "author",
    "bibtex",
    "booktitle",
    "chapter",
    "crossref",
    "doi",
    "edition",
    "editor",
    "entrytype",
    "eprint",
    "howpublished",
    "id",
    "institution",
    "journal",
    "key",
    "month",
    "note",
    "number",
    "organization",
    "pages",
    "publisher",
    "school",
    "series",
    "title",
    "type",
    "url",
    "volume",
    "year",
];

/// Record types that carry no publication.
const NOT_DOCUMENTS: [&str; 3] = ["comment", "preamble", "string"];

/// Whether `entry` gets a document of its own.
pub fn is_document(entry: &BibEntry) -> bool {
    !entry.id.is_empty() && !NOT_DOCUMENTS.contains(&entry.kind.as_str())
}

/// File name for the document of `entry`. Path separators in the id are replaced.
pub fn file_name(entry: &BibEntry) -> String {
    format!("{}.md", entry.id.replace(['/', '\\'], "_"))
}

/// YAML single-quoted scalar.
fn quote(data: &str) -> String {
    format!("'{}'", data.replace('\'', "''"))
}

/// The front matter document of one raw entry. Fields are cleaned up
/// first; the `bibtex` key shows the record as written in the source.
pub fn front_matter(raw: &BibEntry) -> String {
    let mut entry = raw.clone();
    normalize_entry(&mut entry);

    let mut md = String::from("---\n");
    for key in KEYS {
        let data = match key {
            "bibtex" => Some(raw.write_bibtex(HTML_NEWLINE, HTML_INDENT)),
            "entrytype" => Some(entry.kind.clone()),
            "id" => Some(entry.id.clone()),
            "pages" => entry
                .get("pages")
                .map(|pages| format!("{} {}", page_label(pages), pages)),
            "month" => entry.get("month").map(month_name),
            _ => entry.get(key).map(str::to_string),
        };
        if let Some(data) = data {
            md.push_str(&format!("{key}: {}\n", quote(&data)));
        }
    }
    md.push_str("---\n");
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Parser;
    use pretty_assertions::assert_eq;

    fn first(src: &str) -> BibEntry {
        Parser::from_string(src).iter().next().unwrap()
    }

    #[test]
    fn test_front_matter() {
        let entry = first(
            "@article{doe2020, author = {Doe, J.}, title = {It's {Robust}}, year = 2020, \
             pages = {3--4}, month = 7, file = {doe.pdf}, keywords = {x}}",
        );
        assert_eq!(
            front_matter(&entry),
            "---\n\
             author: 'J. Doe'\n\
             bibtex: '@article{doe2020,<br />\n&nbsp;&nbsp;author = {Doe, J.},<br />\n\
             &nbsp;&nbsp;keywords = {x},<br />\n&nbsp;&nbsp;month = {7},<br />\n\
             &nbsp;&nbsp;pages = {3--4},<br />\n&nbsp;&nbsp;title = {It''s {Robust}},<br />\n\
             &nbsp;&nbsp;year = {2020}<br />\n}'\n\
             entrytype: 'article'\n\
             id: 'doe2020'\n\
             month: 'July'\n\
             pages: 'pp. 3-4'\n\
             title: 'It''s Robust'\n\
             year: '2020'\n\
             ---\n"
        );
    }

    #[test]
    fn test_single_page() {
        let entry = first("@misc{m, author = {A}, pages = 7}");
        assert!(front_matter(&entry).contains("pages: 'p. 7'\n"));
    }

    #[test]
    fn test_documents_and_file_names() {
        assert!(is_document(&first("@book{DBLP:books/lib/Knuth97, title = {T}}")));
        assert!(!is_document(&first("@comment{note, text = {x}}")));
        assert!(!is_document(&first("@string{, x = {y}}")));
        assert_eq!(
            file_name(&first("@book{DBLP:books/lib/Knuth97, title = {T}}")),
            "DBLP:books_lib_Knuth97.md"
        );
    }
}
