use scraper::{Html, Selector};

/// Anchors at the top of every autoindex page: four column-sort links plus
/// the parent-directory link.
const HEADER_ANCHORS: usize = 5;

/// Extracts entry names from an autoindex HTML page.
///
/// Takes the anchors inside the document's first `<pre>` block, skips the
/// header anchors and returns the remaining anchor texts in document order,
/// with `suffix` stripped from each when present. Directory levels pass
/// `"/"`; the file level passes `""` to keep names untouched.
pub fn parse_listing(html: &str, suffix: &str) -> Vec<String> {
    let pre = Selector::parse("pre").expect("static selector");
    let anchor = Selector::parse("a").expect("static selector");

    let document = Html::parse_document(html);
    let Some(block) = document.select(&pre).next() else {
        return Vec::new();
    };

    block
        .select(&anchor)
        .skip(HEADER_ANCHORS)
        .map(|a| {
            let text: String = a.text().collect();
            match text.strip_suffix(suffix) {
                Some(stripped) => stripped.to_string(),
                None => text,
            }
        })
        .collect()
}
