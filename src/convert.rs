//! Whole-file conversions. Output is assembled in memory and written at the end,
//! so a failing run leaves no partial file behind.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::errors::{Error, Result};
use crate::listing::Publications;
use crate::markdown;
use crate::parser::Parser;
use crate::template::Placeholders;
use crate::types::Bibliography;

/// Render `publications` into `template`.
pub fn html_page(publications: &Publications, template: &str, date: NaiveDate) -> Result<String> {
    let (older, newer) = publications.year_span()?;
    let placeholders = Placeholders {
        count: publications.len(),
        older,
        newer,
        date,
        grouped: publications.grouped_html()?,
        flat: publications.flat_html()?,
    };
    Ok(placeholders.apply(template))
}

/// Markdown documents of `bibliography` as (file name, content) pairs in source order.
pub fn markdown_documents(bibliography: &Bibliography) -> Vec<(String, String)> {
    bibliography
        .entries()
        .iter()
        .filter(|entry| markdown::is_document(entry))
        .map(|entry| (markdown::file_name(entry), markdown::front_matter(entry)))
        .collect()
}

/// Reads `bibfile` and `template`, writes the filled template to `output`.
/// Returns the number of rendered entries.
pub fn convert_html(
    bibfile: &Path,
    template: &Path,
    output: &Path,
    date: NaiveDate,
) -> Result<usize> {
    let template = read(template)?;
    let bibliography = Parser::from_file(bibfile)?.bibliography();
    let publications = Publications::from_bibliography(&bibliography);
    let page = html_page(&publications, &template, date)?;
    write(output, &page)?;
    let count = publications.len();
    info!(output = %output.display(), entries = count, "wrote publication list");
    Ok(count)
}

/// Reads `bibfile` and writes one `<id>.md` per entry into the existing directory `outdir`.
/// Returns the number of written documents.
pub fn convert_markdown(bibfile: &Path, outdir: &Path) -> Result<usize> {
    if !outdir.is_dir() {
        return Err(Error::NotADirectory(outdir.to_path_buf()));
    }
    let bibliography = Parser::from_file(bibfile)?.bibliography();
    let documents = markdown_documents(&bibliography);
    for (name, content) in &documents {
        let path = outdir.join(name);
        write(&path, content)?;
        debug!(path = %path.display(), "wrote document");
    }
    info!(outdir = %outdir.display(), documents = documents.len(), "wrote markdown documents");
    Ok(documents.len())
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}
