//! Binding rendered fragments into the page.
//!
//! The page is a Webflow export whose dynamic lists are identified by fixed
//! class names and Finsweet `fs-cmsfilter-*` attributes:
//!
//! | Marker                                    | Purpose                       |
//! |-------------------------------------------|-------------------------------|
//! | `.cms-list`                               | post cards                    |
//! | `.grades-collection-list`                 | grade radios                  |
//! | `.topics-collection-list`                 | topic radios                  |
//! | `.w-dyn-empty` (sibling of a list)        | "No items found" placeholder  |
//! | `[fs-cmsfilter-element="items-count"]`    | total number of posts         |
//! | `[fs-cmsfilter-element="results-count"]`  | number of visible posts       |
//! | `[fs-cmsfilter-element="empty"]`          | "no results" message          |
//! | `[fs-cmsfilter-field="*"]`                | search input                  |
//! | `[fs-cmsfilter-element="clear"]`          | reset control                 |

use crate::dom::{DocumentTree, DomError, Selector};
use crate::filter::{FilterAttributeNames, FilterScriptSpec, SCROLL_DELAY_MS, attr};
use crate::render::RenderedFragment;
use crate::resolve::Role;

pub mod marker {
    pub const POSTS_LIST: &str = ".cms-list";
    pub const GRADES_LIST: &str = ".grades-collection-list";
    pub const TOPICS_LIST: &str = ".topics-collection-list";
    pub const EMPTY_STATE: &str = ".w-dyn-empty";
    pub const ITEMS_COUNT: &str = r#"[fs-cmsfilter-element="items-count"]"#;
    pub const RESULTS_COUNT: &str = r#"[fs-cmsfilter-element="results-count"]"#;
    pub const EMPTY_RESULTS: &str = r#"[fs-cmsfilter-element="empty"]"#;
    pub const SEARCH_INPUT: &str = r#"[fs-cmsfilter-field="*"]"#;
    pub const CLEAR_BUTTON: &str = r#"[fs-cmsfilter-element="clear"]"#;
    /// Id of the appended filter script element.
    pub const FILTER_SCRIPT_ID: &str = "cmsweave-filter";
}

/// Container selector for a role.
pub const fn container_selector(role: Role) -> &'static str {
    match role {
        Role::Posts => marker::POSTS_LIST,
        Role::Grades => marker::GRADES_LIST,
        Role::Topics => marker::TOPICS_LIST,
    }
}

/// Replace the content of every container of `role` with `fragments`.
///
/// Returns the number of containers bound. An empty fragment list leaves the
/// document untouched, including its empty-state placeholder.
pub fn bind<D: DocumentTree>(
    doc: &mut D,
    role: Role,
    fragments: &[RenderedFragment],
) -> Result<usize, DomError> {
    if fragments.is_empty() {
        return Ok(0);
    }

    let containers = doc.select(&Selector::parse(container_selector(role))?);
    let empty_state = Selector::parse(marker::EMPTY_STATE)?;

    for &container in &containers {
        doc.clear_children(container);
        for fragment in fragments {
            doc.append_fragment(container, &fragment.html);
        }
        for placeholder in doc.siblings_matching(container, &empty_state) {
            doc.remove_node(placeholder);
        }
    }

    Ok(containers.len())
}

/// Write the post total into both count nodes.
pub fn update_counts<D: DocumentTree>(doc: &mut D, posts: usize) -> Result<(), DomError> {
    let total = posts.to_string();
    for selector in [marker::ITEMS_COUNT, marker::RESULTS_COUNT] {
        for node in doc.select(&Selector::parse(selector)?) {
            doc.set_text(node, &total);
        }
    }
    Ok(())
}

/// Selectors and attribute names for the page's filter script.
pub fn filter_script_spec() -> FilterScriptSpec {
    let radios = |list: &str| format!(r#"{list} input[type="radio"]"#);
    FilterScriptSpec {
        container: marker::POSTS_LIST.into(),
        item: format!("[{}]", attr::GRADE),
        grade_inputs: radios(marker::GRADES_LIST),
        topic_inputs: radios(marker::TOPICS_LIST),
        search_input: marker::SEARCH_INPUT.into(),
        clear_button: marker::CLEAR_BUTTON.into(),
        results_count: marker::RESULTS_COUNT.into(),
        empty_results: marker::EMPTY_RESULTS.into(),
        attributes: FilterAttributeNames::default(),
        scroll_delay: SCROLL_DELAY_MS,
    }
}

/// Append the filter script to `<body>`, replacing one from an earlier build.
///
/// Returns `false` when the document has no body.
pub fn append_filter_script<D: DocumentTree>(doc: &mut D, script: &str) -> Result<bool, DomError> {
    let previous = Selector::parse(&format!("script#{}", marker::FILTER_SCRIPT_ID))?;
    for node in doc.select(&previous) {
        doc.remove_node(node);
    }

    let Some(body) = doc.body() else {
        return Ok(false);
    };
    let element = format!(
        r#"<script id="{}">{}</script>"#,
        marker::FILTER_SCRIPT_ID,
        script
    );
    doc.append_fragment(body, &element);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::HtmlDocument;
    use crate::filter::emit_filter_script;
    use crate::cms::Item;
    use crate::project::{ProjectedPost, ProjectedTaxonomyEntry, project_post};
    use serde_json::json;
    use crate::render::{render_grade, render_post};

    const PAGE: &str = r#"<!DOCTYPE html><html><head></head><body>
<div class="w-dyn-list"><div role="list" class="cms-list w-dyn-items"><div>design-time card</div></div><div class="w-dyn-empty"><div>No items found.</div></div></div>
<div class="w-dyn-list"><div role="list" class="grades-collection-list w-dyn-items"></div><div class="w-dyn-empty"><div>No grades.</div></div></div>
<div class="w-dyn-list"><div role="list" class="topics-collection-list w-dyn-items"></div><div class="w-dyn-empty"><div>No topics.</div></div></div>
<div>Showing <span fs-cmsfilter-element="results-count">10</span> of <span fs-cmsfilter-element="items-count">10</span></div>
<div fs-cmsfilter-element="empty">Nothing matched.</div>
</body></html>"#;

    fn post(title: &str, grade: &str) -> RenderedFragment {
        render_post(&ProjectedPost {
            slug: Some(title.to_lowercase()),
            image_url: "https://cdn.example/x.png".into(),
            title: title.into(),
            topics_label: "Math".into(),
            grade_label: grade.into(),
            description_text: String::new(),
        })
    }

    fn cards(doc: &HtmlDocument) -> usize {
        doc.select_str(".cms-list [data-grade]").unwrap().len()
    }

    fn text(doc: &HtmlDocument, selector: &str) -> String {
        let node = doc.select_str(selector).unwrap()[0];
        doc.text_content(node)
    }

    #[test]
    fn test_bind_posts_replaces_children_in_order() {
        let mut doc = HtmlDocument::parse(PAGE);
        let bound = bind(&mut doc, Role::Posts, &[post("Alpha", "5"), post("Beta", "6")]).unwrap();

        assert_eq!(bound, 1);
        assert_eq!(cards(&doc), 2);
        let html = doc.to_html();
        assert!(!html.contains("design-time card"));
        assert!(html.find("/posts/alpha").unwrap() < html.find("/posts/beta").unwrap());
    }

    #[test]
    fn test_bind_removes_only_own_empty_state() {
        let mut doc = HtmlDocument::parse(PAGE);
        bind(&mut doc, Role::Posts, &[post("Alpha", "5")]).unwrap();

        let html = doc.to_html();
        assert!(!html.contains("No items found."));
        assert!(html.contains("No grades."));
        assert!(html.contains("No topics."));
    }

    #[test]
    fn test_bind_empty_list_leaves_document_untouched() {
        let mut doc = HtmlDocument::parse(PAGE);
        let bound = bind(&mut doc, Role::Posts, &[]).unwrap();

        assert_eq!(bound, 0);
        assert_eq!(doc.to_html(), PAGE);
    }

    #[test]
    fn test_bind_is_idempotent() {
        let fragments = [post("Alpha", "5"), post("Beta", "6")];

        let mut once = HtmlDocument::parse(PAGE);
        bind(&mut once, Role::Posts, &fragments).unwrap();
        let first = once.to_html();

        let mut twice = HtmlDocument::parse(&first);
        bind(&mut twice, Role::Posts, &fragments).unwrap();

        assert_eq!(twice.to_html(), first);
    }

    #[test]
    fn test_bind_title_with_ampersand() {
        let item: Item = serde_json::from_value(json!({
            "id": "p1",
            "fieldData": { "name": "Art & Design", "slug": "art-design", "grade": "5" }
        }))
        .unwrap();
        let mut doc = HtmlDocument::parse(PAGE);

        bind(&mut doc, Role::Posts, &[render_post(&project_post(&item))]).unwrap();

        assert_eq!(cards(&doc), 1);
        assert_eq!(text(&doc, ".cms-list h3"), "Art & Design");
        let card = doc.select_str(".cms-list [data-grade]").unwrap()[0];
        assert_eq!(doc.attr(card, "data-title"), Some("art & design"));

        let reparsed = HtmlDocument::parse(&doc.to_html());
        assert_eq!(cards(&reparsed), 1);
        assert_eq!(text(&reparsed, ".cms-list h3"), "Art & Design");
    }

    #[test]
    fn test_bind_grades() {
        let mut doc = HtmlDocument::parse(PAGE);
        let grades: Vec<_> = ["K", "1", "2"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                render_grade(&ProjectedTaxonomyEntry {
                    id: format!("g{i}"),
                    name: (*name).into(),
                })
            })
            .collect();

        bind(&mut doc, Role::Grades, &grades).unwrap();

        let radios = doc
            .select_str(r#".grades-collection-list input[type="radio"]"#)
            .unwrap();
        assert_eq!(radios.len(), 3);
        assert_eq!(doc.attr(radios[0], "value"), Some("K"));
        assert!(!doc.to_html().contains("No grades."));
    }

    #[test]
    fn test_bind_without_container() {
        let mut doc = HtmlDocument::parse("<html><body></body></html>");
        assert_eq!(bind(&mut doc, Role::Posts, &[post("Alpha", "5")]).unwrap(), 0);
    }

    #[test]
    fn test_update_counts_sets_both_nodes() {
        let mut doc = HtmlDocument::parse(PAGE);
        update_counts(&mut doc, 2).unwrap();

        assert_eq!(text(&doc, marker::ITEMS_COUNT), "2");
        assert_eq!(text(&doc, marker::RESULTS_COUNT), "2");

        update_counts(&mut doc, 0).unwrap();
        assert_eq!(text(&doc, marker::ITEMS_COUNT), "0");
    }

    #[test]
    fn test_append_filter_script_once() {
        let script = emit_filter_script(&filter_script_spec()).unwrap();
        let mut doc = HtmlDocument::parse(PAGE);

        assert!(append_filter_script(&mut doc, &script).unwrap());
        assert!(append_filter_script(&mut doc, &script).unwrap());

        let scripts = doc.select_str("script#cmsweave-filter").unwrap();
        assert_eq!(scripts.len(), 1);
        assert_eq!(doc.text_content(scripts[0]), script);

        // Survives a reparse intact
        let reparsed = HtmlDocument::parse(&doc.to_html());
        let scripts = reparsed.select_str("body script").unwrap();
        assert_eq!(reparsed.text_content(scripts[0]), script);
    }

    #[test]
    fn test_append_filter_script_to_bodyless_markup() {
        // A body is synthesized for bare markup
        let mut doc = HtmlDocument::parse("<div></div>");
        assert!(append_filter_script(&mut doc, "void 0;").unwrap());
        assert_eq!(doc.select_str("body > script").unwrap().len(), 1);
    }

    #[test]
    fn test_filter_script_spec_matches_card_markup() {
        let spec = filter_script_spec();
        let mut doc = HtmlDocument::parse(PAGE);
        bind(&mut doc, Role::Posts, &[post("Alpha", "5")]).unwrap();

        let selector = format!("{} {}", spec.container, spec.item);
        assert_eq!(doc.select_str(&selector).unwrap().len(), 1);
        assert_eq!(spec.grade_inputs, r#".grades-collection-list input[type="radio"]"#);
    }
}
