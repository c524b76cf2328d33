//! The publication list: usable entries grouped by year, newest year first.

use tracing::{debug, warn};

use crate::errors::{Error, Result};
use crate::normalize::normalize_entry;
use crate::render::Citation;
use crate::types::{BibEntry, Bibliography};

/// Line break and indentation of the verbatim record inside HTML.
pub const HTML_NEWLINE: &str = "<br />\n";
pub const HTML_INDENT: &str = "&nbsp;&nbsp;";

/// One renderable entry.
#[derive(Debug, Clone)]
pub struct Publication {
    /// the entry after field cleanup
    pub entry: BibEntry,
    /// the record as written in the source, before cleanup
    pub bibtex: String,
    pub citation: Citation,
}

impl Publication {
    /// Normalizes a copy of `raw`. `None` if the result cannot be cited.
    pub fn new(raw: &BibEntry) -> Option<Publication> {
        let mut entry = raw.clone();
        normalize_entry(&mut entry);
        let citation = Citation::new(&entry)?;
        Some(Publication {
            bibtex: raw.write_bibtex(HTML_NEWLINE, HTML_INDENT),
            entry,
            citation,
        })
    }

    pub fn year(&self) -> i32 {
        self.citation.year
    }

    pub fn to_html(&self) -> String {
        self.citation.to_html(&self.entry, &self.bibtex)
    }
}

/// All renderable entries in source order.
#[derive(Debug, Clone, Default)]
pub struct Publications {
    items: Vec<Publication>,
}

impl Publications {
    /// Keeps the usable entries of `bibliography` which also have an integer year.
    pub fn from_bibliography(bibliography: &Bibliography) -> Publications {
        let items: Vec<Publication> = bibliography
            .usable()
            .filter_map(|raw| {
                let publication = Publication::new(raw);
                if publication.is_none() {
                    warn!(id = %raw.id, year = ?raw.get("year"), "skipping entry without an integer year or empty after cleanup");
                }
                publication
            })
            .collect();
        debug!(publications = items.len(), "collected publications");
        Publications { items }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Publication> {
        self.items.iter()
    }

    /// Number of rendered entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `(oldest, newest)` year over all publications.
    pub fn year_span(&self) -> Result<(i32, i32)> {
        let older = self.items.iter().map(Publication::year).min();
        let newer = self.items.iter().map(Publication::year).max();
        match (older, newer) {
            (Some(older), Some(newer)) => Ok((older, newer)),
            _ => Err(Error::NoYears),
        }
    }

    /// Every year of the span, newest first, with its publications in source
    /// order. Years without publications inside the span get an empty group.
    pub fn groups(&self) -> Result<Vec<(i32, Vec<&Publication>)>> {
        let (older, newer) = self.year_span()?;
        Ok((older..=newer)
            .rev()
            .map(|year| {
                let group = self.items.iter().filter(|p| p.year() == year).collect();
                (year, group)
            })
            .collect())
    }

    /// All entries under one `<h3>` heading per year. Empty years get no heading.
    pub fn grouped_html(&self) -> Result<String> {
        let mut html = String::from("\n\n<ul>");
        for (year, group) in self.groups()? {
            if group.is_empty() {
                continue;
            }
            html.push_str(&format!(
                "\n\n<h3 id=\"publications-year-{year}\">{year}</h3>\n\n<ul>\n"
            ));
            for publication in group {
                html.push_str(&publication.to_html());
                html.push('\n');
            }
            html.push_str("</ul>\n");
        }
        html.push_str("</ul>\n");
        Ok(html)
    }

    /// All entries in one list, in the same order as `grouped_html`.
    pub fn flat_html(&self) -> Result<String> {
        let mut html = String::from("\n\n<ul>");
        for (_, group) in self.groups()? {
            for publication in group {
                html.push_str(&publication.to_html());
                html.push('\n');
            }
        }
        html.push_str("</ul>\n");
        Ok(html)
    }
}
