//! Cross-reference rewriting for `[[Name]]`, `#[[Name]]` and `#Name` syntax.

use crate::config::normalize_base_url;
use crate::filename::to_file_name;
use crate::select::Catalogue;
use regex::{Captures, Regex, RegexBuilder};
use thiserror::Error;

/// Compiled alternations grow with the catalogue; allow large sites.
const REGEX_SIZE_LIMIT: usize = 64 * (1 << 20);

#[derive(Error, Debug)]
pub enum LinkError {
    #[error("Failed to compile link pattern for {count} page names: {source}")]
    Pattern {
        count: usize,
        #[source]
        source: regex::Error,
    },
}

/// Rewrites references to catalogue pages into markdown links.
///
/// Built once per run from the finished catalogue and then shared read-only
/// across pages. References to names outside the catalogue are left as
/// written.
#[derive(Debug, Clone)]
pub struct LinkRewriter {
    bracket: Option<Regex>,
    hashtag: Option<Regex>,
    index: String,
    base_url: String,
}

impl LinkRewriter {
    pub fn new(catalogue: &Catalogue, index: &str, base_url: &str) -> Result<Self, LinkError> {
        let mut names: Vec<&str> = catalogue.iter().filter(|n| !n.is_empty()).collect();
        // Longer names first so "Tag10" wins over "Tag1"
        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let hashtag_names: Vec<&str> = names
            .iter()
            .copied()
            .filter(|n| !n.chars().any(char::is_whitespace))
            .collect();

        Ok(Self {
            bracket: build_alternation(r"#?\[\[(", &names, r")\]\]")?,
            hashtag: build_alternation("#(", &hashtag_names, ")")?,
            index: index.to_string(),
            base_url: normalize_base_url(base_url),
        })
    }

    /// Href of a catalogue page
    pub fn href(&self, name: &str) -> String {
        format!("{}{}", self.base_url, to_file_name(name, &self.index))
    }

    /// Rewrite both reference forms in `body`
    pub fn rewrite(&self, body: &str) -> String {
        let bracketed = match &self.bracket {
            Some(re) => re
                .replace_all(body, |caps: &Captures| self.link(&caps[1]))
                .into_owned(),
            None => body.to_string(),
        };

        match &self.hashtag {
            Some(re) => self.rewrite_hashtags(re, &bracketed),
            None => bracketed,
        }
    }

    fn rewrite_hashtags(&self, re: &Regex, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;

        for caps in re.captures_iter(text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            // `#Tag1x` is a reference to some other page, not to `Tag1`
            if text[whole.end()..].chars().next().is_some_and(is_tag_char) {
                continue;
            }
            out.push_str(&text[last..whole.start()]);
            out.push_str(&self.link(name.as_str()));
            last = whole.end();
        }

        out.push_str(&text[last..]);
        out
    }

    fn link(&self, name: &str) -> String {
        format!("[{}]({})", name, self.href(name))
    }
}

/// Rewrite `body` against `catalogue` with hrefs rooted at `/`.
///
/// # Examples
///
/// ```
/// use outsite_core::{rewrite_links, Catalogue};
///
/// let catalogue = Catalogue::from_names(["Website Index", "My Page", "Tag1"]);
/// let out = rewrite_links(
///     "See [[My Page]] and #Tag1 and [[Unknown]]",
///     &catalogue,
///     "Website Index",
/// )
/// .unwrap();
/// assert_eq!(out, "See [My Page](/My_Page.html) and [Tag1](/Tag1.html) and [[Unknown]]");
/// ```
pub fn rewrite_links(body: &str, catalogue: &Catalogue, index: &str) -> Result<String, LinkError> {
    Ok(LinkRewriter::new(catalogue, index, "/")?.rewrite(body))
}

fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '/')
}

fn build_alternation(
    prefix: &str,
    names: &[&str],
    suffix: &str,
) -> Result<Option<Regex>, LinkError> {
    if names.is_empty() {
        return Ok(None);
    }

    let alternatives = names
        .iter()
        .map(|n| regex::escape(n))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!("{prefix}{alternatives}{suffix}");

    RegexBuilder::new(&pattern)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map(Some)
        .map_err(|source| LinkError::Pattern {
            count: names.len(),
            source,
        })
}
