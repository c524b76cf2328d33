use std::collections::BTreeMap;

/// Names which never show up in a reconstructed record, even if a
/// record happens to carry a field with that name.
const NOT_IN_BIBTEX: [&str; 3] = ["id", "entrytype", "file"];

/// One entry in a `.bib` file
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BibEntry {
    /// entry type, lower-cased, e.g. “article”
    pub kind: String,
    /// entry name, e.g. “DBLP:books/lib/Knuth97”
    pub id: String,
    /// map of fields keyed by lower-cased name, e.g. “author” mapped to “Donald Ervin Knuth”
    pub fields: BTreeMap<String, String>,
}

impl BibEntry {
    /// Generate a new, empty instance of BibEntry. Can also be called through the `Default` implementation.
    pub fn new() -> BibEntry {
        BibEntry {
            kind: String::new(),
            id: String::new(),
            fields: BTreeMap::new(),
        }
    }

    pub fn get(&self, field_name: &str) -> Option<&str> {
        self.fields.get(field_name).map(String::as_str)
    }

    pub fn has(&self, field_name: &str) -> bool {
        self.fields.contains_key(field_name)
    }

    /// The `year` field as an integer. `None` if it is missing or not a number.
    pub fn year(&self) -> Option<i32> {
        self.get("year")?.trim().parse().ok()
    }

    /// Whether the entry can appear in a publication list at all:
    /// both `author` and `title` exist and are non-empty.
    pub fn is_usable(&self) -> bool {
        let filled = |name: &str| self.get(name).map_or(false, |data| !data.is_empty());
        filled("author") && filled("title")
    }

    /// Reconstruct the record as text. Fields are sorted by name, `file` is left out.
    /// `newline` separates the lines and `indent` starts every field line, so the
    /// same record can be shown as plain text or inside HTML.
    pub fn write_bibtex(&self, newline: &str, indent: &str) -> String {
        let mut result = format!("@{}{{{},", self.kind, self.id);
        let lines: Vec<String> = self
            .fields
            .iter()
            .filter(|(name, _)| !NOT_IN_BIBTEX.contains(&name.as_str()))
            .map(|(name, data)| format!("{indent}{name} = {{{data}}}"))
            .collect();
        if !lines.is_empty() {
            result.push_str(newline);
            result.push_str(&lines.join(&format!(",{newline}")));
        }
        result.push_str(newline);
        result.push('}');
        result
    }

    /// Reconstruct the record as plain `.bib` text.
    ///
    /// ```rust
    /// use bibtex2html::BibEntry;
    /// let mut entry = BibEntry::new();
    /// entry.kind.push_str("book");
    /// entry.id.push_str("tolkien1937");
    /// entry.fields.insert("author".to_string(), "J. R. R. Tolkien".to_string());
    /// assert_eq!(entry.to_bibtex(), "@book{tolkien1937,\n  author = {J. R. R. Tolkien}\n}");
    /// ```
    pub fn to_bibtex(&self) -> String {
        self.write_bibtex("\n", "  ")
    }
}

impl Default for BibEntry {
    fn default() -> Self {
        Self::new()
    }
}

/// All entries of a `.bib` file in source order.
#[derive(Debug, Clone, Default)]
pub struct Bibliography {
    entries: Vec<BibEntry>,
}

impl Bibliography {
    pub fn new(entries: Vec<BibEntry>) -> Bibliography {
        Bibliography { entries }
    }

    /// Every parsed record, including the ones which cannot be rendered.
    pub fn entries(&self) -> &[BibEntry] {
        &self.entries
    }

    /// Records with a non-empty author and title, in source order.
    pub fn usable(&self) -> impl Iterator<Item = &BibEntry> {
        self.entries.iter().filter(|entry| entry.is_usable())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<BibEntry> for Bibliography {
    fn from_iter<I: IntoIterator<Item = BibEntry>>(iter: I) -> Self {
        Bibliography::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(fields: &[(&str, &str)]) -> BibEntry {
        BibEntry {
            kind: "article".to_string(),
            id: "key".to_string(),
            fields: fields
                .iter()
                .map(|(name, data)| (name.to_string(), data.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_usable() {
        assert!(entry(&[("author", "A"), ("title", "T")]).is_usable());
        assert!(!entry(&[("author", "A")]).is_usable());
        assert!(!entry(&[("title", "T")]).is_usable());
        assert!(!entry(&[("author", ""), ("title", "T")]).is_usable());
        assert!(entry(&[("author", "")]).has("author"));
        assert!(!entry(&[("author", "")]).has("title"));
    }

    #[test]
    fn test_year() {
        assert_eq!(entry(&[("year", "2021")]).year(), Some(2021));
        assert_eq!(entry(&[("year", " 1999 ")]).year(), Some(1999));
        assert_eq!(entry(&[("year", "in press")]).year(), None);
        assert_eq!(entry(&[]).year(), None);
    }

    #[test]
    fn test_bibtex_sorted_without_file() {
        let e = entry(&[
            ("year", "2020"),
            ("file", "paper.pdf"),
            ("author", "Doe, Jane"),
            ("title", "A {Robust} Method"),
        ]);
        assert_eq!(
            e.to_bibtex(),
            "@article{key,\n  author = {Doe, Jane},\n  title = {A {Robust} Method},\n  year = {2020}\n}"
        );
        assert_eq!(
            e.write_bibtex("<br />\n", "&nbsp;&nbsp;"),
            "@article{key,<br />\n&nbsp;&nbsp;author = {Doe, Jane},<br />\n&nbsp;&nbsp;title = {A {Robust} Method},<br />\n&nbsp;&nbsp;year = {2020}<br />\n}"
        );
    }

    #[test]
    fn test_bibtex_without_fields() {
        assert_eq!(entry(&[("file", "x.pdf")]).to_bibtex(), "@article{key,\n}");
    }

    #[test]
    fn test_bibliography_usable_keeps_order() {
        let bib: Bibliography = vec![
            entry(&[("author", "A"), ("title", "first")]),
            entry(&[("title", "no author")]),
            entry(&[("author", "B"), ("title", "second")]),
        ]
        .into_iter()
        .collect();
        assert_eq!(bib.len(), 3);
        let titles: Vec<_> = bib.usable().filter_map(|e| e.get("title")).collect();
        assert_eq!(titles, vec!["first", "second"]);
    }
}
