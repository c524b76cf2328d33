//! Field cleanup applied before an entry is rendered.
//!
//! Teχ accent escapes become HTML entities, author lists are brought
//! into “First Last” order with an explicit final “and”, and BibTeχ page
//! ranges lose their double dash. All functions are total: malformed input
//! yields best-effort output, never an error.

use crate::types::BibEntry;

/// Accent escapes and the HTML entities replacing them, applied in this order.
const ACCENTS: [(&str, &str); 28] = [
    ("\\\"a", "&auml;"),
    ("\\\"A", "&Auml;"),
    ("\\\"e", "&euml;"),
    ("\\\"E", "&Euml;"),
    ("\\\"i", "&iuml;"),
    ("\\\"I", "&Iuml;"),
    ("\\\"o", "&ouml;"),
    ("\\\"O", "&Ouml;"),
    ("\\\"u", "&uuml;"),
    ("\\\"U", "&Uuml;"),
    ("\\'a", "&aacute;"),
    ("\\'A", "&Aacute;"),
    ("\\'e", "&eacute;"),
    ("\\'i", "&iacute;"),
    ("\\'I", "&Iacute;"),
    ("\\'E", "&Eacute;"),
    ("\\'o", "&oacute;"),
    ("\\'O", "&Oacute;"),
    ("\\'u", "&uacute;"),
    ("\\'U", "&Uacute;"),
    ("\\~n", "&ntilde;"),
    ("\\~N", "&Ntilde;"),
    ("\\~a", "&atilde;"),
    ("\\~A", "&Atilde;"),
    ("\\~o", "&otilde;"),
    ("\\~O", "&Otilde;"),
    ("\\'\\", ""),
    ("\\&", "&amp;"),
];

/// Accent commands whose braced argument form (`\"{a}`) is unwrapped first.
const ACCENT_COMMANDS: [char; 3] = ['"', '\'', '~'];

/// Fields holding lists of names.
pub const AUTHOR_FIELDS: [&str; 2] = ["author", "editor"];

/// Fields receiving the accent and brace cleanup.
pub const STRING_FIELDS: [&str; 24] = [
    "title",
    "year",
    "journal",
    "eprint",
    "volume",
    "pages",
    "abstract",
    "note",
    "address",
    "annote",
    "booktitle",
    "chapter",
    "crossref",
    "edition",
    "howpublished",
    "institution",
    "key",
    "month",
    "number",
    "organization",
    "publisher",
    "school",
    "series",
    "type",
];

/// Fields holding page ranges.
pub const PAGE_FIELDS: [&str; 1] = ["pages"];

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Rewrites `\"{a}` into `\"a` so both spellings hit the accent table.
fn unbrace_accents(src: &str) -> String {
    let chars: Vec<char> = src.chars().collect();
    let mut result = String::with_capacity(src.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '\\'
            && chars.get(i + 1).map_or(false, |c| ACCENT_COMMANDS.contains(c))
            && chars.get(i + 2) == Some(&'{')
            && chars.get(i + 4) == Some(&'}')
        {
            result.push('\\');
            result.push(chars[i + 1]);
            result.push(chars[i + 3]);
            // `\"{a}` is five chars long
            i += 5;
        } else {
            result.push(chars[i]);
            i += 1;
        }
    }
    result
}

fn replace_accents(src: &str) -> String {
    let mut result = unbrace_accents(src);
    for (pattern, replacement) in ACCENTS.iter() {
        result = result.replace(pattern, replacement);
    }
    result
}

/// Replace accent escapes by HTML entities and drop Teχ group braces.
///
/// ```rust
/// use bibtex2html::normalize::cleanup_string;
/// assert_eq!(cleanup_string("{M\\\"u}ller's {GPU} Kernels"), "M&uuml;ller's GPU Kernels");
/// ```
pub fn cleanup_string(src: &str) -> String {
    replace_accents(src).replace(['{', '}'], "")
}

/// Format a BibTeχ name list, e.g. “Smith, J. and Doe, Jane” becomes
/// “J. Smith, and Jane Doe”.
///
/// Names given as “Last, First” are reversed, single letters become
/// initials with a trailing period, and the names are joined with
/// “, ” except for the last pair which is joined with “, and ”.
pub fn cleanup_authors(src: &str) -> String {
    let cleaned = cleanup_string(src).replace('.', " ").replace(" And ", " and ");

    let mut segments: Vec<Vec<&str>> = vec![Vec::new()];
    for word in cleaned.split_whitespace() {
        if word == "and" {
            segments.push(Vec::new());
        } else if let Some(current) = segments.last_mut() {
            current.push(word);
        }
    }

    let names: Vec<String> = segments
        .iter()
        .map(|words| format_name(&words.join(" ")))
        .filter(|name| !name.is_empty())
        .collect();
    join_names(&names)
}

/// “Last, First Middle” or “First Middle Last” to “First Middle Last”,
/// with one-letter parts turned into initials.
fn format_name(author: &str) -> String {
    let mut parts: Vec<&str> = author.split(',').collect();
    parts.reverse();
    parts
        .iter()
        .flat_map(|part| part.split_whitespace())
        .map(|name| {
            if name.chars().count() == 1 {
                format!("{name}.")
            } else {
                name.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_names(names: &[String]) -> String {
    let mut result = String::new();
    for (i, name) in names.iter().enumerate() {
        result.push_str(name);
        if i + 2 < names.len() {
            result.push_str(", ");
        } else if i + 1 < names.len() {
            result.push_str(", and ");
        }
    }
    result
}

/// BibTeχ page ranges use `--`; display uses a single hyphen.
pub fn cleanup_page(src: &str) -> String {
    src.replace("--", "-")
}

/// Page values made of digits only are a single page (“p.”), everything else is a range (“pp.”).
pub fn is_single_page(pages: &str) -> bool {
    !pages.is_empty() && pages.chars().all(|c| c.is_ascii_digit())
}

/// Label prefix for a page value.
pub fn page_label(pages: &str) -> &'static str {
    if is_single_page(pages) {
        "p."
    } else {
        "pp."
    }
}

/// Month number 1–12 to its English name. Anything else is passed
/// through with the first letter upper-cased and the rest lower-cased.
pub fn month_name(month: &str) -> String {
    let month = month.trim();
    match month.parse::<usize>() {
        Ok(number) if (1..=12).contains(&number) => MONTHS[number - 1].to_string(),
        _ => capitalize(month),
    }
}

fn capitalize(src: &str) -> String {
    let mut chars = src.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Apply the cleanup functions to the fields they are meant for.
/// Links (`url`, `link`, `doi`, `file`) are left alone.
pub fn normalize_entry(entry: &mut BibEntry) {
    for name in AUTHOR_FIELDS {
        if let Some(data) = entry.fields.get_mut(name) {
            *data = cleanup_authors(data);
        }
    }
    for name in STRING_FIELDS {
        if let Some(data) = entry.fields.get_mut(name) {
            *data = cleanup_string(data);
        }
    }
    for name in PAGE_FIELDS {
        if let Some(data) = entry.fields.get_mut(name) {
            *data = cleanup_page(data);
        }
    }
}
