//! Role resolution: which CMS collection plays which part on the page.
//!
//! Collections carry no stable semantic marker, so roles are assigned from
//! display names alone:
//!
//! | Role   | Display name contains (case-insensitive) | Extra condition          |
//! |--------|------------------------------------------|--------------------------|
//! | Posts  | `blog` or `post`                         |                          |
//! | Grades | `grade`                                  |                          |
//! | Topics | `topic`                                  | not the Posts collection |
//!
//! The first match in API order wins. A role without a match is simply
//! absent; the build skips that section.

use crate::cms::Collection;
use std::fmt;

/// Semantic slot a collection can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Posts,
    Grades,
    Topics,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Posts, Role::Grades, Role::Topics];

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Posts => "posts",
            Role::Grades => "grades",
            Role::Topics => "topics",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword rule for one role.
#[derive(Debug, Clone, Copy)]
pub struct RoleRule {
    pub role: Role,
    /// Lowercase substrings; any one of them matches.
    pub keywords: &'static [&'static str],
    /// Skip the collection already chosen for Posts.
    pub exclude_posts: bool,
}

impl RoleRule {
    fn matches(&self, collection: &Collection, posts: Option<&Collection>) -> bool {
        let name = collection.display_name.to_lowercase();
        if !self.keywords.iter().any(|keyword| name.contains(keyword)) {
            return false;
        }
        !(self.exclude_posts && posts.is_some_and(|p| p.id == collection.id))
    }
}

/// Rules in evaluation order. Posts comes first because Topics depends on it.
pub const RULES: [RoleRule; 3] = [
    RoleRule {
        role: Role::Posts,
        keywords: &["blog", "post"],
        exclude_posts: false,
    },
    RoleRule {
        role: Role::Grades,
        keywords: &["grade"],
        exclude_posts: false,
    },
    RoleRule {
        role: Role::Topics,
        keywords: &["topic"],
        exclude_posts: true,
    },
];

/// Collections chosen for each role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub posts: Option<&'a Collection>,
    pub grades: Option<&'a Collection>,
    pub topics: Option<&'a Collection>,
}

impl<'a> Resolution<'a> {
    pub fn get(&self, role: Role) -> Option<&'a Collection> {
        match role {
            Role::Posts => self.posts,
            Role::Grades => self.grades,
            Role::Topics => self.topics,
        }
    }

    fn set(&mut self, role: Role, collection: Option<&'a Collection>) {
        match role {
            Role::Posts => self.posts = collection,
            Role::Grades => self.grades = collection,
            Role::Topics => self.topics = collection,
        }
    }

    /// Role assigned to a collection, if any.
    pub fn role_of(&self, collection: &Collection) -> Option<Role> {
        Role::ALL
            .into_iter()
            .find(|&role| self.get(role).is_some_and(|c| c.id == collection.id))
    }
}

/// Assign collections to roles using the default rule table.
pub fn resolve(collections: &[Collection]) -> Resolution<'_> {
    resolve_with(collections, &RULES)
}

/// Assign collections to roles using an explicit rule table.
///
/// Pure: the result depends only on the list and the rules.
pub fn resolve_with<'a>(collections: &'a [Collection], rules: &[RoleRule]) -> Resolution<'a> {
    let mut resolution = Resolution::default();
    for rule in rules {
        let found = collections
            .iter()
            .find(|collection| rule.matches(collection, resolution.posts));
        resolution.set(rule.role, found);
    }
    resolution
}
