//! Askama template definitions.

use askama::Template;

/// Full HTML document around one rendered page
#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate {
    // Page metadata
    pub title: String,
    pub content: String,

    // Site metadata
    pub site_title: String,
    pub home: String,
    pub is_index: bool,
}

/// Wrap a rendered body in a minimal HTML document with a `<title>` and a
/// container element
pub fn wrap(title: &str, body_html: &str) -> Result<String, askama::Error> {
    PageTemplate {
        title: title.to_string(),
        content: body_html.to_string(),
        site_title: String::new(),
        home: "/".to_string(),
        is_index: false,
    }
    .render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_contains_title_and_body() {
        let html = wrap("My Page", "<p>hello</p>").unwrap();
        assert!(html.contains("<title>My Page</title>"));
        assert!(html.contains(r#"<div class="rm-container">"#));
        assert!(html.contains("<p>hello</p>"));
        assert!(html.contains(r#"<nav class="rm-nav">"#));
    }

    #[test]
    fn test_title_is_escaped() {
        let html = wrap("Q&A <draft>", "").unwrap();
        assert!(html.contains("Q&#38;A &#60;draft&#62;") || html.contains("Q&amp;A &lt;draft&gt;"));
    }

    #[test]
    fn test_index_page_with_site_title() {
        let html = PageTemplate {
            title: "Home".into(),
            content: "<ul></ul>".into(),
            site_title: "Garden".into(),
            home: "/docs/".into(),
            is_index: true,
        }
        .render()
        .unwrap();

        assert!(html.contains("<title>Home | Garden</title>"));
        assert!(!html.contains("rm-nav"));
    }
}
