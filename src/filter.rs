//! Client-side filtering: the Rust model and the emitted script.
//!
//! The page filters post cards with three predicates combined by AND:
//!
//! ```text
//! visible = (grade  = "" or grade  == card.grade)
//!       and (topic  = "" or topic  == card.topic)
//!       and (search = "" or lower(search) ⊂ card.title + " " + card.description)
//! ```
//!
//! The script produced by [`emit_filter_script`] implements them in the
//! browser, reading the `data-*` attributes written by
//! [`FilterAttrs::to_data_attributes`]. `FilterState` and `is_visible` are the
//! same functions in Rust, compiled for tests only; the tests pin the script
//! against them.

use crate::project::ProjectedPost;
use serde::Serialize;

/// Delay before scrolling to the results, letting layout settle.
pub const SCROLL_DELAY_MS: u32 = 100;

/// Data attribute names carried by each post card.
pub mod attr {
    pub const GRADE: &str = "data-grade";
    pub const TOPIC: &str = "data-topic";
    pub const TITLE: &str = "data-title";
    pub const DESCRIPTION: &str = "data-description";
}

/// Filter-relevant values of one post card.
///
/// `title` and `description` are already lowercase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterAttrs {
    pub grade: String,
    pub topic: String,
    pub title: String,
    pub description: String,
}

impl FilterAttrs {
    pub fn from_post(post: &ProjectedPost) -> Self {
        Self {
            grade: post.grade_label.clone(),
            topic: post.topics_label.clone(),
            title: post.title_key(),
            description: post.description_key(),
        }
    }

    /// The attributes as they appear on the card element.
    pub fn to_data_attributes(&self) -> String {
        format!(
            r#"{}="{}" {}="{}" {}="{}" {}="{}""#,
            attr::GRADE,
            self.grade,
            attr::TOPIC,
            self.topic,
            attr::TITLE,
            self.title,
            attr::DESCRIPTION,
            self.description,
        )
    }

    #[cfg(test)]
    fn search_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

// ============================================================================
// Filter model
// ============================================================================

/// Current selections on the page. Starts empty on every page load.
#[cfg(test)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub selected_grade: String,
    pub selected_topic: String,
    pub search_query: String,
}

/// User input that changes the filter state.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    /// A grade radio was checked.
    GradeSelected(String),
    /// A topic radio was checked.
    TopicSelected(String),
    /// The search field changed (every keystroke).
    SearchInput(String),
    /// The clear control was activated.
    Clear,
}

#[cfg(test)]
impl FilterState {
    /// Next state after an event.
    pub fn apply(self, event: FilterEvent) -> Self {
        match event {
            FilterEvent::GradeSelected(selected_grade) => Self {
                selected_grade,
                ..self
            },
            FilterEvent::TopicSelected(selected_topic) => Self {
                selected_topic,
                ..self
            },
            FilterEvent::SearchInput(search_query) => Self {
                search_query,
                ..self
            },
            FilterEvent::Clear => Self::default(),
        }
    }
}

/// Whether a card passes every predicate of `state`.
#[cfg(test)]
pub fn is_visible(state: &FilterState, card: &FilterAttrs) -> bool {
    let grade_ok = state.selected_grade.is_empty() || state.selected_grade == card.grade;
    let topic_ok = state.selected_topic.is_empty() || state.selected_topic == card.topic;
    let search_ok = state.search_query.is_empty()
        || card
            .search_text()
            .contains(&state.search_query.to_lowercase());
    grade_ok && topic_ok && search_ok
}

/// Outcome of filtering every card.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// One flag per card, in card order.
    pub visible: Vec<bool>,
    /// Value written to `results-count`.
    pub visible_count: usize,
    /// Whether the "no results" node is shown.
    pub show_empty: bool,
}

#[cfg(test)]
pub fn evaluate(state: &FilterState, cards: &[FilterAttrs]) -> Evaluation {
    let visible: Vec<bool> = cards.iter().map(|card| is_visible(state, card)).collect();
    let visible_count = visible.iter().filter(|&&v| v).count();
    Evaluation {
        visible,
        visible_count,
        show_empty: visible_count == 0,
    }
}

// ============================================================================
// Script emission
// ============================================================================

/// Attribute names the script reads from each card.
#[derive(Debug, Clone, Serialize)]
pub struct FilterAttributeNames {
    pub grade: String,
    pub topic: String,
    pub title: String,
    pub description: String,
}

impl Default for FilterAttributeNames {
    fn default() -> Self {
        Self {
            grade: attr::GRADE.into(),
            topic: attr::TOPIC.into(),
            title: attr::TITLE.into(),
            description: attr::DESCRIPTION.into(),
        }
    }
}

/// Everything the script needs to find on the page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterScriptSpec {
    /// Results container (also the scroll target).
    pub container: String,
    /// Cards inside the container.
    pub item: String,
    pub grade_inputs: String,
    pub topic_inputs: String,
    pub search_input: String,
    pub clear_button: String,
    pub results_count: String,
    pub empty_results: String,
    pub attributes: FilterAttributeNames,
    pub scroll_delay: u32,
}

/// Body of the emitted script; `__FILTER_CONFIG__` is replaced by JSON.
const FILTER_SCRIPT: &str = r#"
(function () {
  "use strict";
  var config = __FILTER_CONFIG__;

  function emptyState() {
    return { selectedGrade: "", selectedTopic: "", searchQuery: "" };
  }

  function withField(state, key, value) {
    var next = { selectedGrade: state.selectedGrade, selectedTopic: state.selectedTopic, searchQuery: state.searchQuery };
    next[key] = value;
    return next;
  }

  function isVisible(state, card) {
    var a = config.attributes;
    var grade = card.getAttribute(a.grade) || "";
    var topic = card.getAttribute(a.topic) || "";
    var text = (card.getAttribute(a.title) || "") + " " + (card.getAttribute(a.description) || "");
    var gradeOk = state.selectedGrade === "" || state.selectedGrade === grade;
    var topicOk = state.selectedTopic === "" || state.selectedTopic === topic;
    var searchOk = state.searchQuery === "" || text.indexOf(state.searchQuery.toLowerCase()) !== -1;
    return gradeOk && topicOk && searchOk;
  }

  function init() {
    var container = document.querySelector(config.container);
    if (!container) return;
    var state = emptyState();

    function render() {
      var cards = container.querySelectorAll(config.item);
      var visible = 0;
      for (var i = 0; i < cards.length; i++) {
        var show = isVisible(state, cards[i]);
        cards[i].style.display = show ? "" : "none";
        if (show) visible++;
      }
      var counts = document.querySelectorAll(config.resultsCount);
      for (var j = 0; j < counts.length; j++) counts[j].textContent = String(visible);
      var empties = document.querySelectorAll(config.emptyResults);
      for (var k = 0; k < empties.length; k++) empties[k].style.display = visible === 0 ? "block" : "none";
      setTimeout(function () {
        var top = container.getBoundingClientRect().top + window.pageYOffset;
        window.scrollTo({ top: top, behavior: "smooth" });
      }, config.scrollDelay);
    }

    function update(next) {
      state = next;
      render();
    }

    function bindRadios(selector, key) {
      var inputs = document.querySelectorAll(selector);
      for (var i = 0; i < inputs.length; i++) {
        inputs[i].addEventListener("change", function (event) {
          if (event.target.checked) update(withField(state, key, event.target.value));
        });
      }
    }

    bindRadios(config.gradeInputs, "selectedGrade");
    bindRadios(config.topicInputs, "selectedTopic");

    var search = document.querySelector(config.searchInput);
    if (search) {
      search.addEventListener("input", function () {
        update(withField(state, "searchQuery", search.value));
      });
    }

    var clears = document.querySelectorAll(config.clearButton);
    for (var c = 0; c < clears.length; c++) {
      clears[c].addEventListener("click", function (event) {
        event.preventDefault();
        var radios = document.querySelectorAll(config.gradeInputs + "," + config.topicInputs);
        for (var r = 0; r < radios.length; r++) radios[r].checked = false;
        if (search) search.value = "";
        update(emptyState());
      });
    }
  }

  if (document.readyState === "loading") {
    document.addEventListener("DOMContentLoaded", init);
  } else {
    init();
  }
})();
"#;

/// Produce the filter script for a page.
///
/// Selectors are embedded as a JSON object, with `</` escaped so the text can
/// sit inside a `<script>` element.
pub fn emit_filter_script(spec: &FilterScriptSpec) -> Result<String, serde_json::Error> {
    let config = serde_json::to_string(spec)?.replace("</", "<\\/");
    Ok(FILTER_SCRIPT.replace("__FILTER_CONFIG__", &config))
}
