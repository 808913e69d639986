use std::collections::{BTreeSet, HashMap};

use crate::{Collection, DocId};

/// Token -> identifiers of the documents whose title or transcript contains it.
///
/// Built once from a tokenized [`Collection`] and never mutated afterwards, so a shared
/// reference can serve lookups from any number of threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    postings: HashMap<String, BTreeSet<DocId>>,
}

impl InvertedIndex {
    /// Single pass over every title and transcript token of every document.
    pub fn build(collection: &Collection) -> Self {
        let mut postings: HashMap<String, BTreeSet<DocId>> = HashMap::new();
        for doc in collection {
            for token in doc.tokens() {
                if token.is_empty() { continue; }
                match postings.get_mut(token) {
                    Some(ids) => { ids.insert(doc.id); }
                    None => { postings.insert(token.to_owned(), BTreeSet::from([doc.id])); }
                }
            }
        }
        tracing::debug!(docs = collection.len(), terms = postings.len(), "built inverted index");
        Self { postings }
    }

    /// Exact, case-sensitive lookup. `None` means the term was never indexed; a returned
    /// set always holds at least one identifier.
    pub fn lookup(&self, term: &str) -> Option<&BTreeSet<DocId>> {
        self.postings.get(term)
    }

    pub fn contains(&self, term: &str) -> bool { self.postings.contains_key(term) }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }

    pub fn terms(&self) -> impl Iterator<Item = &str> { self.postings.keys().map(String::as_str) }
}
