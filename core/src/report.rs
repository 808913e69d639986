use std::io::{self, Write};

use crate::{DocId, Document};

/// One report line: `{permalink} {day}/{month}/{year} "{title}"`, using the title as published.
pub fn format_hit(doc: &Document, permalink: &str) -> String {
    format!("{} {}/{}/{} \"{}\"", permalink, doc.day, doc.month, doc.year, doc.raw_title)
}

/// Write the report for one term: a header line, then one line per matching document.
pub fn write_report<W, F>(out: &mut W, term: &str, hits: &[&Document], permalink: F) -> io::Result<()>
where
    W: Write,
    F: Fn(DocId) -> String,
{
    writeln!(out, "Search for \"{}\" returns :", term)?;
    for doc in hits {
        writeln!(out, "{}", format_hit(doc, &permalink(doc.id)))?;
    }
    Ok(())
}
