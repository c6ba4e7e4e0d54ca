//! Page names and output file names.
//!
//! Both link hrefs and written files go through [`to_file_name`], so the two
//! can never disagree.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// File name reserved for the index page
pub const INDEX_FILE_NAME: &str = "index.html";

/// Characters left alone by `encodeURIComponent`; everything else is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Map a page name to the HTML file it is written to
///
/// # Examples
///
/// ```
/// use outsite_core::to_file_name;
///
/// assert_eq!(to_file_name("Website Index", "Website Index"), "index.html");
/// assert_eq!(to_file_name("My Page", "Website Index"), "My_Page.html");
/// assert_eq!(to_file_name("Q&A", "Website Index"), "Q%26A.html");
/// ```
pub fn to_file_name(name: &str, index: &str) -> String {
    if name == index {
        return INDEX_FILE_NAME.to_string();
    }
    let underscored = name.replace(' ', "_");
    format!("{}.html", utf8_percent_encode(&underscored, COMPONENT))
}

/// Display name of a document: its key without the storage suffix
pub fn page_name(key: &str) -> &str {
    let file_start = key.rfind('/').map_or(0, |i| i + 1);
    match key[file_start..].rfind('.') {
        Some(dot) if dot > 0 => &key[..file_start + dot],
        _ => key,
    }
}
