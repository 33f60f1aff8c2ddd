//! Built-in seed contract for new projects.
//!
//! `strata new` writes this file to `domain/<stem>.go` and scaffolds from it,
//! so a fresh project compiles and has both role interfaces to build on.

use strata_core::domain::naming::pascal_case;

/// Go toolchain version written into a generated `go.mod`.
pub const GO_VERSION: &str = "1.22";

/// Seed contract for `entity` in Go package `package`, returned as
/// `(stem, source)`.
///
/// `entity` may be given in any case convention (`blog_post`, `blog-post`,
/// `BlogPost`); the type name is its PascalCase form and the stem is that
/// name lower-cased, so the interfaces always pass the stem gate.
pub fn seed_contract(entity: &str, package: &str) -> (String, String) {
    let name = pascal_case(entity);
    let stem = name.to_lowercase();
    let source = SEED_TEMPLATE
        .replace("{package}", package)
        .replace("{Entity}", &name);
    (stem, source)
}

/// Minimal `go.mod` for `module`.
pub fn go_mod(module: &str) -> String {
    format!("module {module}\n\ngo {GO_VERSION}\n")
}

const SEED_TEMPLATE: &str = r#"package {package}

import (
	"context"
	"time"
)

// {Entity} is the entity managed by this service.
type {Entity} struct {
	ID        int64     `json:"id"`
	Title     string    `json:"title"`
	Content   string    `json:"content"`
	UpdatedAt time.Time `json:"updated_at"`
	CreatedAt time.Time `json:"created_at"`
}

// {Entity}Usecase represents the {Entity} business logic.
type {Entity}Usecase interface {
	Fetch(ctx context.Context, cursor string, num int64) ([]{Entity}, string, error)
	GetByID(ctx context.Context, id int64) ({Entity}, error)
	Update(ctx context.Context, e *{Entity}) error
	Store(ctx context.Context, e *{Entity}) error
	Delete(ctx context.Context, id int64) error
}

// {Entity}Repository represents the {Entity} storage contract.
type {Entity}Repository interface {
	Fetch(ctx context.Context, cursor string, num int64) (res []{Entity}, nextCursor string, err error)
	GetByID(ctx context.Context, id int64) ({Entity}, error)
	Update(ctx context.Context, e *{Entity}) error
	Store(ctx context.Context, e *{Entity}) error
	Delete(ctx context.Context, id int64) error
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_names_follow_entity() {
        let (stem, source) = seed_contract("blog_post", "domain");
        assert_eq!(stem, "blogpost");
        assert!(source.starts_with("package domain\n"));
        assert!(source.contains("type BlogPost struct {"));
        assert!(source.contains("type BlogPostUsecase interface {"));
        assert!(source.contains("type BlogPostRepository interface {"));
        assert!(!source.contains("{Entity}"));
    }

    #[test]
    fn go_mod_content() {
        assert_eq!(go_mod("github.com/acme/shop"), "module github.com/acme/shop\n\ngo 1.22\n");
    }
}
