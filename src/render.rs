//! Turns one normalized entry into citation text.
//!
//! Which parts show up depends only on which fields are present. The
//! optional parts are an ordered table of rules, each rule looking at a
//! single field, so the order of the output is the order of the table.

use crate::normalize::{month_name, page_label};
use crate::types::BibEntry;

/// Prefix turning a DOI into a link.
pub const DOI_RESOLVER: &str = "https://doi.org/";

enum Format {
    /// `prefix`, the field data, `suffix`
    Affix(&'static str, &'static str),
    /// “, p. 5” or “, pp. 5-9”
    Pages,
    /// “, July”
    Month,
}

struct Rule {
    field: &'static str,
    format: Format,
}

impl Rule {
    const fn affix(field: &'static str, prefix: &'static str, suffix: &'static str) -> Rule {
        Rule {
            field,
            format: Format::Affix(prefix, suffix),
        }
    }

    fn apply(&self, entry: &BibEntry) -> Option<String> {
        let data = entry.get(self.field)?;
        Some(match self.format {
            Format::Affix(prefix, suffix) => format!("{prefix}{data}{suffix}"),
            Format::Pages => format!(", {} {}", page_label(data), data),
            Format::Month => format!(", {}", month_name(data)),
        })
    }
}

const DETAILS: [Rule; 17] = [
    Rule::affix("journal", "In: ", ""),
    Rule::affix("eprint", "In: ", ""),
    Rule::affix("booktitle", "In: ", ""),
    Rule::affix("volume", ". Volume ", ""),
    Rule::affix("chapter", ". Chapter ", " ch"),
    Rule {
        field: "pages",
        format: Format::Pages,
    },
    Rule {
        field: "month",
        format: Format::Month,
    },
    Rule::affix("edition", ". Edition ", ""),
    Rule::affix("number", ". Number ", ""),
    Rule::affix("editor", ". Editor ", ""),
    Rule::affix("institution", ". ", ""),
    Rule::affix("address", ". ", ""),
    Rule::affix("organization", ". ", ""),
    Rule::affix("publisher", ". ", ""),
    Rule::affix("school", ". ", ""),
    Rule::affix("series", ". Series ", ""),
    Rule::affix("note", " (", ")"),
];

/// Label for the entry type, e.g. “Ph.D. Thesis”. Empty for most types.
///
/// The thesis labels and the misc labels are decided independently of each other.
pub fn entry_label(entry: &BibEntry) -> String {
    let mut label = String::new();
    match entry.kind.as_str() {
        "thesis" => label.push_str("Thesis"),
        "phdthesis" => label.push_str("Ph.D. Thesis"),
        "mastersthesis" => label.push_str("Master's Thesis"),
        _ => {}
    }
    if entry.kind == "misc" {
        let bachelor = entry
            .get("note")
            .map_or(false, |note| note.to_lowercase() == "bachelor's thesis");
        label.push_str(if bachelor { "Bachelor's Thesis" } else { "Misc" });
    }
    label
}

/// All optional parts of the citation in table order.
pub fn details(entry: &BibEntry) -> String {
    DETAILS.iter().filter_map(|rule| rule.apply(entry)).collect()
}

/// `[pdf]`, `[url]` and `[doi]` links, each followed by a space.
pub fn links(entry: &BibEntry) -> String {
    let mut result = String::new();
    if let Some(file) = entry.get("file") {
        result.push_str(&format!("<a href=\"{file}\">[pdf]</a> "));
    }
    if let Some(url) = entry.get("url").or_else(|| entry.get("link")) {
        result.push_str(&format!("<a href=\"{url}\">[url]</a> "));
    }
    if let Some(doi) = entry.get("doi") {
        result.push_str(&format!("<a href=\"{DOI_RESOLVER}{doi}\">[doi]</a> "));
    }
    result
}

fn collapsible(title: &str, content: &str) -> String {
    format!(
        "<button class=\"collapsible\">[↓ {title}]</button><div class=\"content\"><p>{content}</p></div>"
    )
}

/// The citation of one entry, split into the parts the output formats arrange differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub author: String,
    pub title: String,
    pub year: i32,
    /// entry-type label, possibly empty
    pub label: String,
    /// optional parts, possibly empty
    pub details: String,
}

impl Citation {
    /// `None` if author or title is missing or empty, or if there is no integer year.
    pub fn new(entry: &BibEntry) -> Option<Citation> {
        let author = entry.get("author").filter(|author| !author.is_empty())?;
        let title = entry.get("title").filter(|title| !title.is_empty())?;
        let year = entry.year()?;
        Some(Citation {
            author: author.to_string(),
            title: title.to_string(),
            year,
            label: entry_label(entry),
            details: details(entry),
        })
    }

    /// “Author, Title (Year).”
    pub fn headline(&self) -> String {
        format!("{}, {} ({}).", self.author, self.title, self.year)
    }

    /// The complete citation as plain text.
    ///
    /// ```rust
    /// use bibtex2html::{render::Citation, Parser};
    /// let p = Parser::from_string("@article{k, author = {Doe}, title = {T}, year = 2020, journal = {J}, pages = 5}");
    /// let entry = p.iter().next().unwrap();
    /// let citation = Citation::new(&entry).unwrap();
    /// assert_eq!(citation.to_text(), "Doe, T (2020). In: J, p. 5.");
    /// ```
    pub fn to_text(&self) -> String {
        let body = format!("{}{}", self.label, self.details);
        if body.is_empty() {
            self.headline()
        } else {
            format!("{} {}.", self.headline(), body)
        }
    }

    /// One `<li>` element. `entry` supplies links and abstract, `bibtex` is the
    /// verbatim record shown in the collapsible block.
    pub fn to_html(&self, entry: &BibEntry, bibtex: &str) -> String {
        let mut html = format!(
            "<li><b>{}</b>,<br /> {} ({}).<br />{}{}.<br />",
            self.title, self.author, self.year, self.label, self.details
        );
        html.push_str(&links(entry));
        html.push_str("<br />");
        if let Some(abstract_text) = entry.get("abstract") {
            html.push_str(&collapsible("Abstract", abstract_text));
        }
        html.push_str(&collapsible("BibTeX", bibtex));
        html.push_str("</li><br />\n");
        html
    }
}
