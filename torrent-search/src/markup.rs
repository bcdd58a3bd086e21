//! Small structural-query layer over parsed HTML.
//!
//! Extractors describe *what* to pull out (selectors, labels, patterns);
//! these helpers do the traversal. Everything works on [`ElementRef`] so
//! the same calls apply to a whole document (`Html::root_element`) or to
//! a single result row.

use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::error::SearchError;

/// Compile a CSS selector, mapping failures to [`SearchError::Parse`].
pub fn selector(css: &str) -> Result<Selector, SearchError> {
    Selector::parse(css).map_err(|e| SearchError::Parse(format!("invalid selector {css:?}: {e:?}")))
}

/// Collapse runs of whitespace (including NBSP) to single spaces and trim.
pub fn squash(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// All descendant text of `el`, squashed.
pub fn text_of(el: ElementRef<'_>) -> String {
    squash(&el.text().collect::<String>())
}

/// Only the text nodes directly under `el`, squashed.
///
/// 1337x nests the seeder count inside the size cell; this keeps just the size.
pub fn own_text(el: ElementRef<'_>) -> String {
    let direct: String = el
        .children()
        .filter_map(|node| node.value().as_text().map(|t| t.to_string()))
        .collect();
    squash(&direct)
}

/// First descendant of `scope` matching `sel`.
pub fn first<'a>(scope: ElementRef<'a>, sel: &Selector) -> Option<ElementRef<'a>> {
    scope.select(sel).next()
}

/// Last descendant of `scope` matching `sel`.
pub fn last<'a>(scope: ElementRef<'a>, sel: &Selector) -> Option<ElementRef<'a>> {
    scope.select(sel).last()
}

/// Text of the first match, or an empty string.
pub fn first_text(scope: ElementRef<'_>, sel: &Selector) -> String {
    first(scope, sel).map(text_of).unwrap_or_default()
}

/// Text of the last match, or an empty string.
pub fn last_text(scope: ElementRef<'_>, sel: &Selector) -> String {
    last(scope, sel).map(text_of).unwrap_or_default()
}

/// Attribute `name` of the first match, if present and non-blank.
pub fn first_attr(scope: ElementRef<'_>, sel: &Selector, name: &str) -> Option<String> {
    first(scope, sel)
        .and_then(|el| el.value().attr(name))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// The element following the innermost cell whose text contains `label`.
///
/// Detail pages lay metadata out as `<td>Size:</td><td>1.4 GB</td>` rows,
/// often inside outer layout cells that also contain the label text. A
/// cell only counts if no nested cell also matches.
pub fn labelled_cell<'a>(scope: ElementRef<'a>, cells: &Selector, label: &str) -> Option<ElementRef<'a>> {
    let contains = |el: ElementRef<'_>| text_of(el).contains(label);
    let label_cell = scope.select(cells).find(|cell| {
        contains(*cell)
            && !cell
                .select(cells)
                .any(|inner| inner.id() != cell.id() && contains(inner))
    })?;
    label_cell.next_siblings().find_map(ElementRef::wrap)
}

/// First capture group of `pattern` in `text`, squashed.
pub fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| squash(m.as_str()))
        .filter(|s| !s.is_empty())
}
