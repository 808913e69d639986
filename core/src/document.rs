use serde::Serialize;
use time::{Date, Month};

use crate::DocId;

/// One comic as retrieved from the archive, plus the text derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub id: DocId,
    /// Address the document was fetched from.
    pub locator: String,
    pub year: String,
    pub month: String,
    pub day: String,
    /// Title and transcript as published, kept for provenance and reports.
    pub raw_title: String,
    pub raw_transcript: String,
    /// Normalized variants; equal to the raw text until `normalize` runs.
    pub title: String,
    pub transcript: String,
    pub title_tokens: Vec<String>,
    pub transcript_tokens: Vec<String>,
}

impl Document {
    pub fn new(id: DocId, locator: impl Into<String>, title: impl Into<String>, transcript: impl Into<String>) -> Self {
        let raw_title = title.into();
        let raw_transcript = transcript.into();
        Self {
            id,
            locator: locator.into(),
            title: raw_title.clone(),
            transcript: raw_transcript.clone(),
            raw_title,
            raw_transcript,
            ..Self::default()
        }
    }

    pub fn with_date(mut self, year: impl Into<String>, month: impl Into<String>, day: impl Into<String>) -> Self {
        self.year = year.into();
        self.month = month.into();
        self.day = day.into();
        self
    }

    /// The publication date, when the date parts form a real calendar date.
    pub fn published(&self) -> Option<Date> {
        let year: i32 = self.year.trim().parse().ok()?;
        let month: u8 = self.month.trim().parse().ok()?;
        let day: u8 = self.day.trim().parse().ok()?;
        let month = Month::try_from(month).ok()?;
        Date::from_calendar_date(year, month, day).ok()
    }

    /// All tokens the index is built from: title first, then transcript.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.title_tokens.iter().chain(self.transcript_tokens.iter()).map(String::as_str)
    }
}

/// Documents gathered by one indexing run, ordered by ascending id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    docs: Vec<Document>,
}

impl Collection {
    pub fn new() -> Self { Self::default() }

    /// Build a collection, ordering by id and keeping the first copy of any repeated id.
    pub fn from_documents(mut docs: Vec<Document>) -> Self {
        docs.sort_by_key(|d| d.id);
        docs.dedup_by_key(|d| d.id);
        Self { docs }
    }

    pub fn get(&self, id: DocId) -> Option<&Document> {
        self.docs.binary_search_by_key(&id, |d| d.id).ok().map(|i| &self.docs[i])
    }

    pub fn len(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> { self.docs.iter() }

    /// In-place access for the normalize and tokenize passes.
    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Document> { self.docs.iter_mut() }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter { self.docs.iter() }
}
