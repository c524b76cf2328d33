//! Fills the placeholder markers of an HTML template.

use chrono::NaiveDate;

pub const NUMBER_OF_REFERENCES: &str = "<!--NUMBER_OF_REFERENCES-->";
pub const NEWER: &str = "<!--NEWER-->";
pub const OLDER: &str = "<!--OLDER-->";
pub const DATE: &str = "<!--DATE-->";
pub const LIST_OF_REFERENCES: &str = "<!--LIST_OF_REFERENCES-->";
pub const LIST_OF_REFERENCES_NO_YEAR: &str = "<!--LIST_OF_REFERENCES_NO_YEAR-->";

/// Values computed from the bibliography which end up in the template.
#[derive(Debug, Clone)]
pub struct Placeholders {
    pub count: usize,
    pub older: i32,
    pub newer: i32,
    pub date: NaiveDate,
    /// list with one heading per year
    pub grouped: String,
    /// list without headings
    pub flat: String,
}

impl Placeholders {
    /// Marker and replacement pairs.
    pub fn bindings(&self) -> Vec<(&'static str, String)> {
        vec![
            (NUMBER_OF_REFERENCES, self.count.to_string()),
            (NEWER, self.newer.to_string()),
            (OLDER, self.older.to_string()),
            (DATE, format_date(self.date)),
            (LIST_OF_REFERENCES, self.grouped.clone()),
            (LIST_OF_REFERENCES_NO_YEAR, self.flat.clone()),
        ]
    }

    pub fn apply(&self, template: &str) -> String {
        bind(template, &self.bindings())
    }
}

/// “DD Mon YYYY”, e.g. “07 Mar 2024”.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// Replace every occurrence of every marker in a single left-to-right pass.
/// Inserted text is not scanned again and unknown markers stay as they are.
///
/// ```rust
/// use bibtex2html::template::bind;
/// let filled = bind("<!--A--> and <!--B-->, <!--C-->", &[("<!--A-->", "<!--B-->".to_string()), ("<!--B-->", "b".to_string())]);
/// assert_eq!(filled, "<!--B--> and b, <!--C-->");
/// ```
pub fn bind<S: AsRef<str>>(template: &str, bindings: &[(&str, S)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    loop {
        let next = bindings
            .iter()
            .filter(|(marker, _)| !marker.is_empty())
            .filter_map(|(marker, replacement)| {
                rest.find(marker).map(|pos| (pos, *marker, replacement.as_ref()))
            })
            .min_by_key(|(pos, marker, _)| (*pos, std::cmp::Reverse(marker.len())));
        match next {
            Some((pos, marker, replacement)) => {
                result.push_str(&rest[..pos]);
                result.push_str(replacement);
                rest = &rest[pos + marker.len()..];
            }
            None => {
                result.push_str(rest);
                return result;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn placeholders() -> Placeholders {
        Placeholders {
            count: 12,
            older: 2015,
            newer: 2024,
            date: NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
            grouped: "<ul>grouped</ul>".to_string(),
            flat: "<ul>flat</ul>".to_string(),
        }
    }

    #[test]
    fn test_all_markers() {
        let template = "<p><!--NUMBER_OF_REFERENCES--> papers from <!--OLDER--> to <!--NEWER-->, \
                        updated <!--DATE--></p><!--LIST_OF_REFERENCES--><hr><!--LIST_OF_REFERENCES_NO_YEAR-->";
        assert_eq!(
            placeholders().apply(template),
            "<p>12 papers from 2015 to 2024, updated 07 Mar 2024</p><ul>grouped</ul><hr><ul>flat</ul>"
        );
    }

    #[test]
    fn test_every_occurrence_is_replaced() {
        assert_eq!(
            placeholders().apply("<!--NEWER-->/<!--NEWER-->"),
            "2024/2024"
        );
    }

    #[test]
    fn test_unknown_markers_stay() {
        assert_eq!(
            placeholders().apply("<!--AUTHOR--> <!--DATE"),
            "<!--AUTHOR--> <!--DATE"
        );
    }

    #[test]
    fn test_inserted_text_is_not_rescanned() {
        let mut p = placeholders();
        p.grouped = "mentions <!--DATE-->".to_string();
        assert_eq!(p.apply("<!--LIST_OF_REFERENCES-->"), "mentions <!--DATE-->");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2019, 12, 24).unwrap();
        assert_eq!(format_date(date), "24 Dec 2019");
    }
}
