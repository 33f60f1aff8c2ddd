//! Identifier conventions.
//!
//! Role discovery is a two-part discriminator: a suffix rule picks the role,
//! then two independent gates ([`is_exported`] and [`stem_matches`]) decide
//! whether the interface belongs to the contract file. Each predicate is a
//! separate function so the edge cases can be tested one at a time.

use std::path::Path;

use crate::domain::contract::Role;

/// Classify an interface name by its role suffix.
///
/// `"ExampleUsecase"` → `Some(Usecase)`; names with neither suffix → `None`.
pub fn classify_role(name: &str) -> Option<Role> {
    Role::ALL
        .into_iter()
        .find(|role| name.ends_with(role.suffix()))
}

/// Go's export rule: the first character is an upper-case letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// The interface name with the role suffix removed, if it carries it.
pub fn strip_role_suffix(name: &str, role: Role) -> Option<&str> {
    name.strip_suffix(role.suffix())
}

/// Case-insensitive comparison of the stripped name against the expected stem.
pub fn stem_matches(name: &str, role: Role, expected_stem: &str) -> bool {
    strip_role_suffix(name, role)
        .is_some_and(|stem| stem.to_lowercase() == expected_stem.to_lowercase())
}

/// Stem of a contract file: its base name without extension.
pub fn stem_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

// ── Case helpers ──────────────────────────────────────────────────────────────

pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `user_profile` / `user-profile` / `userProfile` → `UserProfile`.
pub fn pascal_case(s: &str) -> String {
    s.split(['_', '-', ' '])
        .filter(|part| !part.is_empty())
        .map(upper_first)
        .collect()
}

/// `FetchByID` → `fetch-by-id`, `GetHTTPStatus` → `get-http-status`.
pub fn kebab_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !out.ends_with('-') {
                out.push('-');
            }
        }
        out.extend(c.to_lowercase());
    }

    out
}
