//! Markup for one projected item.
//!
//! The post card and radio markup mirror the Webflow components the page was
//! designed with, so existing styles keep applying. Field values are
//! interpolated without escaping.

use crate::filter::FilterAttrs;
use crate::project::{ProjectedPost, ProjectedTaxonomyEntry};

/// Markup for one item plus the attributes the filter script reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFragment {
    pub html: String,
    /// Present on post cards only.
    pub filter: Option<FilterAttrs>,
}

/// Render a post card.
///
/// Visible text and `data-*` attributes are taken from the same projection.
pub fn render_post(post: &ProjectedPost) -> RenderedFragment {
    let filter = FilterAttrs::from_post(post);
    let href = post.href();
    let html = format!(
        r#"
<div role="listitem" class="collection-item-5 w-dyn-item w-col w-col-6" {data}>
  <div class="topic-card">
    <a href="{href}" class="link-block-9 w-inline-block">
      <img loading="lazy" src="{image}" alt="{title}" class="image-5">
      <div fs-cmsfilter-field="Topics" class="text-block-10">{topics}</div>
      <div class="div-block-24">
        <div fs-cmsfilter-field="Grades" class="grade-label">Grade</div>
        <div fs-cmsfilter-field="Grade" class="grade-text">{grade}</div>
      </div>
      <h3 fs-cmsfilter-field="" class="heading-8">{title}</h3>
    </a>
    <p fs-cmsfilter-field="" class="paragraph">{description}</p>
    <a href="{href}" class="main-post-btn w-button">Read More</a>
  </div>
</div>
"#,
        data = filter.to_data_attributes(),
        image = post.image_url,
        title = post.title,
        topics = post.topics_label,
        grade = post.grade_label,
        description = post.description_text,
    );

    RenderedFragment {
        html,
        filter: Some(filter),
    }
}

/// Render a grade filter option.
pub fn render_grade(entry: &ProjectedTaxonomyEntry) -> RenderedFragment {
    render_radio(
        entry,
        RadioStyle {
            prefix: "grade",
            group: "radio-2",
            data_name: "Radio 2",
            label_class: "radio-button-field-3",
            input_class: "radio-button-2",
            field: "Grade",
            span_class: "radio-grades",
        },
    )
}

/// Render a topic filter option.
pub fn render_topic(entry: &ProjectedTaxonomyEntry) -> RenderedFragment {
    render_radio(
        entry,
        RadioStyle {
            prefix: "topic",
            group: "radio",
            data_name: "Radio",
            label_class: "radio-button-field-2",
            input_class: "radio-button",
            field: "Topics",
            span_class: "radio-list",
        },
    )
}

/// Class names and ids that differ between the two radio lists.
struct RadioStyle {
    prefix: &'static str,
    group: &'static str,
    data_name: &'static str,
    label_class: &'static str,
    input_class: &'static str,
    field: &'static str,
    span_class: &'static str,
}

fn render_radio(entry: &ProjectedTaxonomyEntry, style: RadioStyle) -> RenderedFragment {
    let id = format!("{}-{}", style.prefix, entry.id);
    let html = format!(
        r#"
<div role="listitem" class="w-dyn-item">
  <label class="{label_class} w-radio">
    <input type="radio" name="{group}" id="{id}" data-name="{data_name}" class="w-form-formradioinput {input_class} w-radio-input" value="{name}">
    <span fs-cmsfilter-field="{field}" class="{span_class} w-form-label" for="{id}">{name}</span>
  </label>
</div>
"#,
        label_class = style.label_class,
        group = style.group,
        data_name = style.data_name,
        input_class = style.input_class,
        field = style.field,
        span_class = style.span_class,
        name = entry.name,
    );

    RenderedFragment { html, filter: None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::PLACEHOLDER_IMAGE;

    fn post() -> ProjectedPost {
        ProjectedPost {
            slug: Some("fractions".into()),
            image_url: "https://cdn.example/f.png".into(),
            title: "Fractions Fun".into(),
            topics_label: "Math".into(),
            grade_label: "5".into(),
            description_text: "Halves and QUARTERS".into(),
        }
    }

    #[test]
    fn test_post_card_content() {
        let fragment = render_post(&post());

        assert!(fragment.html.contains(r#"href="/posts/fractions""#));
        assert!(fragment.html.contains(r#"src="https://cdn.example/f.png""#));
        assert!(fragment.html.contains(r#"alt="Fractions Fun""#));
        assert!(fragment.html.contains(r#"class="grade-text">5</div>"#));
        assert!(fragment.html.contains(r#"class="text-block-10">Math</div>"#));
        assert!(fragment.html.contains(">Halves and QUARTERS</p>"));
        assert!(fragment.html.contains("Read More"));
    }

    #[test]
    fn test_post_card_data_attributes_match_projection() {
        let fragment = render_post(&post());
        let filter = fragment.filter.as_ref().unwrap();

        assert_eq!(filter.grade, "5");
        assert_eq!(filter.topic, "Math");
        assert_eq!(filter.title, "fractions fun");
        assert_eq!(filter.description, "halves and quarters");
        assert!(fragment.html.contains(r#"data-grade="5""#));
        assert!(fragment.html.contains(r#"data-topic="Math""#));
        assert!(fragment.html.contains(r#"data-title="fractions fun""#));
        assert!(fragment.html.contains(r#"data-description="halves and quarters""#));
    }

    #[test]
    fn test_post_without_slug_or_image() {
        let mut post = post();
        post.slug = None;
        post.image_url = PLACEHOLDER_IMAGE.into();

        let fragment = render_post(&post);
        assert!(fragment.html.contains(r##"href="/posts/#""##));
        assert!(fragment.html.contains(PLACEHOLDER_IMAGE));
    }

    #[test]
    fn test_grade_radio() {
        let fragment = render_grade(&ProjectedTaxonomyEntry {
            id: "g1".into(),
            name: "5".into(),
        });

        assert_eq!(fragment.filter, None);
        assert!(fragment.html.contains(r#"name="radio-2""#));
        assert!(fragment.html.contains(r#"id="grade-g1""#));
        assert!(fragment.html.contains(r#"value="5""#));
        assert!(fragment.html.contains(r#"for="grade-g1">5</span>"#));
    }

    #[test]
    fn test_topic_radio() {
        let fragment = render_topic(&ProjectedTaxonomyEntry {
            id: "t1".into(),
            name: "Math".into(),
        });

        assert!(fragment.html.contains(r#"name="radio""#));
        assert!(fragment.html.contains(r#"id="topic-t1""#));
        assert!(fragment.html.contains(r#"fs-cmsfilter-field="Topics""#));
        assert!(fragment.html.contains(r#"value="Math""#));
    }

    #[test]
    fn test_values_are_interpolated_verbatim() {
        let mut post = post();
        post.title = "<em>Hot</em>".into();

        let fragment = render_post(&post);
        assert!(fragment.html.contains("<h3 fs-cmsfilter-field=\"\" class=\"heading-8\"><em>Hot</em></h3>"));
    }
}
