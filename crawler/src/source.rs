use comicdex_core::DocId;
use url::{ParseError, Url};

pub const DEFAULT_BASE_URL: &str = "https://xkcd.com";

/// Addressing scheme of the comic archive: `{base}/{id}/info.0.json` for the payload,
/// `{base}/{id}/` for the human-facing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComicSource {
    base: Url,
}

impl ComicSource {
    pub fn new(base: &str) -> Result<Self, ParseError> {
        let mut base = Url::parse(base)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url { &self.base }

    pub fn locator(&self, id: DocId) -> Url {
        self.join(&format!("{id}/info.0.json"))
    }

    pub fn permalink(&self, id: DocId) -> Url {
        self.join(&format!("{id}/"))
    }

    fn join(&self, rel: &str) -> Url {
        // `rel` is always a relative path of digits and ASCII, which cannot fail to join.
        self.base.join(rel).unwrap_or_else(|_| self.base.clone())
    }
}
