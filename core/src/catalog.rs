use serde::{Deserialize, Serialize};

use crate::normalize::{normalize, normalize_text};
use crate::tokenizer::{split_tokens, tokenize};
use crate::{Collection, DocId, Document, InvertedIndex};

/// How a lookup term is matched against indexed tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermPolicy {
    /// Match the term exactly as given; `Dog` does not find `dog`.
    #[default]
    Verbatim,
    /// Normalize the term like document text first. A term that reduces to anything
    /// other than a single token matches nothing.
    Normalized,
}

/// A normalized, tokenized collection together with the index built from it.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    collection: Collection,
    index: InvertedIndex,
}

impl Catalog {
    pub fn build(mut collection: Collection) -> Self {
        for doc in collection.iter_mut() {
            normalize(doc);
            tokenize(doc);
        }
        let index = InvertedIndex::build(&collection);
        tracing::info!(docs = collection.len(), terms = index.len(), "catalog ready");
        Self { collection, index }
    }

    pub fn collection(&self) -> &Collection { &self.collection }

    pub fn index(&self) -> &InvertedIndex { &self.index }

    /// Identifiers indexed under `term`, ascending.
    pub fn lookup(&self, term: &str, policy: TermPolicy) -> Option<Vec<DocId>> {
        let ids = match policy {
            TermPolicy::Verbatim => self.index.lookup(term)?,
            TermPolicy::Normalized => {
                let mut tokens = split_tokens(&normalize_text(term));
                if tokens.len() != 1 { return None; }
                self.index.lookup(&tokens.remove(0))?
            }
        };
        Some(ids.iter().copied().collect())
    }

    /// Documents matching `term`, ascending by id.
    pub fn search(&self, term: &str, policy: TermPolicy) -> Option<Vec<&Document>> {
        let ids = self.lookup(term, policy)?;
        Some(ids.into_iter().filter_map(|id| self.collection.get(id)).collect())
    }
}
