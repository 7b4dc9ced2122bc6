//! Build orchestration.
//!
//! One build is a straight pipeline; the first error aborts it and nothing is
//! written to the output directory.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── read + parse input document
//!     │
//!     ├── CmsClient::collections() ──► resolve() ──► Resolution
//!     │
//!     ├── fetch_role_items()         (sequential, or rayon::join when parallel)
//!     │
//!     ├── for each role:
//!     │       project_* ──► render_* ──► bind()
//!     │
//!     ├── update_counts() + append_filter_script()
//!     │
//!     └── publish() ──► dist/index.html + asset directories
//! ```

use crate::{
    bind::{append_filter_script, bind, container_selector, filter_script_spec, update_counts},
    cms::{CmsClient, Collection, FetchError, Item},
    config::SiteConfig,
    dom::HtmlDocument,
    filter::emit_filter_script,
    log,
    project::{project_post, project_taxonomy_entry},
    publish::{Published, publish},
    render::{RenderedFragment, render_grade, render_post, render_topic},
    resolve::{Resolution, Role, resolve},
};
use anyhow::{Context, Result};
use std::fs;

/// Items fetched for each resolved role. Unresolved roles stay empty.
#[derive(Debug, Default)]
struct RoleItems {
    posts: Vec<Item>,
    grades: Vec<Item>,
    topics: Vec<Item>,
}

impl RoleItems {
    fn get(&self, role: Role) -> &[Item] {
        match role {
            Role::Posts => &self.posts,
            Role::Grades => &self.grades,
            Role::Topics => &self.topics,
        }
    }
}

/// Fetch, bind and publish the site. Returns what was written.
pub fn build_site(config: &SiteConfig, client: &CmsClient) -> Result<Published> {
    let input = &config.build.input;
    let source = fs::read_to_string(input)
        .with_context(|| format!("failed to read input document `{}`", input.display()))?;
    let mut doc = HtmlDocument::parse(&source);
    if doc.recovered_errors() > 0 {
        log!("warn"; "{}: recovered from {} markup errors", input.display(), doc.recovered_errors());
    }

    // ========================================================================
    // Resolve roles
    // ========================================================================
    let collections = fetch_collections(client)?;
    let resolution = resolve(&collections);
    log_resolution(&resolution);

    // ========================================================================
    // Fetch items
    // ========================================================================
    let items = fetch_role_items(client, &resolution, config.api.parallel)?;
    for role in Role::ALL {
        if let Some(collection) = resolution.get(role) {
            log!("fetch"; "{}: {} items from {}", role, items.get(role).len(), collection.display_name);
        }
    }

    // ========================================================================
    // Render + bind
    // ========================================================================
    for role in Role::ALL {
        let fragments = render_role(role, items.get(role));
        let bound = bind(&mut doc, role, &fragments)?;
        if bound == 0 && !fragments.is_empty() {
            log!("warn"; "no `{}` container for {} {}", container_selector(role), fragments.len(), role);
        } else if bound > 0 {
            log!("bind"; "{}: {} fragments into {} container(s)", role, fragments.len(), bound);
        }
        log_unfilterable(&fragments);
    }

    // Nothing is selected on page load, so every post starts visible
    let post_count = items.posts.len();
    if post_count == 0 {
        log!("warn"; "no posts to show");
    }
    update_counts(&mut doc, post_count)?;

    let script = emit_filter_script(&filter_script_spec())
        .context("failed to serialize filter settings")?;
    if !append_filter_script(&mut doc, &script)? {
        log!("warn"; "document has no <body>, filter script not added");
    }

    // ========================================================================
    // Publish
    // ========================================================================
    let published = publish(&doc.to_html(), config)?;
    log!("build"; "{} posts, {} asset files -> {}", post_count, published.assets, published.document.display());
    log!("build"; "done");

    Ok(published)
}

/// List the site's collections with the role each one resolves to.
pub fn inspect_site(client: &CmsClient) -> Result<()> {
    let collections = fetch_collections(client)?;
    let resolution = resolve(&collections);

    for collection in &collections {
        let role = resolution.role_of(collection).map_or("-", Role::as_str);
        log!("inspect"; "{} ({}) -> {}", collection.display_name, collection.id, role);
    }
    for role in Role::ALL {
        if resolution.get(role).is_none() {
            log!("warn"; "no collection for {}", role);
        }
    }
    Ok(())
}

fn fetch_collections(client: &CmsClient) -> Result<Vec<Collection>> {
    let collections = client.collections()?;
    let names: Vec<_> = collections.iter().map(|c| c.display_name.as_str()).collect();
    log!("fetch"; "{} collections: {}", collections.len(), names.join(", "));
    Ok(collections)
}

fn log_resolution(resolution: &Resolution<'_>) {
    for role in Role::ALL {
        match resolution.get(role) {
            Some(collection) => log!("resolve"; "{} -> {}", role, collection.display_name),
            None => log!("resolve"; "{} -> none (0 items)", role),
        }
    }
}

/// Fetch the items of every resolved role.
///
/// Results are assigned by role, so the parallel path produces the same
/// output as the sequential one.
fn fetch_role_items(
    client: &CmsClient,
    resolution: &Resolution<'_>,
    parallel: bool,
) -> Result<RoleItems, FetchError> {
    let fetch = |role| match resolution.get(role) {
        Some(collection) => client.items(&collection.id),
        None => Ok(Vec::new()),
    };

    if parallel {
        let (posts, (grades, topics)) = rayon::join(
            || fetch(Role::Posts),
            || rayon::join(|| fetch(Role::Grades), || fetch(Role::Topics)),
        );
        Ok(RoleItems {
            posts: posts?,
            grades: grades?,
            topics: topics?,
        })
    } else {
        Ok(RoleItems {
            posts: fetch(Role::Posts)?,
            grades: fetch(Role::Grades)?,
            topics: fetch(Role::Topics)?,
        })
    }
}

/// Warn about cards that disappear as soon as a grade or topic is selected.
fn log_unfilterable(fragments: &[RenderedFragment]) {
    let unfilterable = fragments
        .iter()
        .filter_map(|fragment| fragment.filter.as_ref())
        .filter(|attrs| attrs.grade.is_empty() || attrs.topic.is_empty())
        .count();
    if unfilterable > 0 {
        log!("warn"; "{} posts have no grade or topic", unfilterable);
    }
}

fn render_role(role: Role, items: &[Item]) -> Vec<RenderedFragment> {
    match role {
        Role::Posts => items.iter().map(|item| render_post(&project_post(item))).collect(),
        Role::Grades => items
            .iter()
            .map(|item| render_grade(&project_taxonomy_entry(item)))
            .collect(),
        Role::Topics => items
            .iter()
            .map(|item| render_topic(&project_taxonomy_entry(item)))
            .collect(),
    }
}
