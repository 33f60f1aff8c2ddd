//! End-to-end tests: real Go parser, real synthesis, in-memory and on-disk
//! filesystems.

use std::path::Path;

use indoc::indoc;
use pretty_assertions::assert_eq;
use strata_adapters::{
    GoContractParser, LocalFilesystem, MemoryFilesystem, find_contracts, go_mod, seed_contract,
};
use strata_core::{
    application::{
        ContractSource, Filesystem, ScaffoldRequest, ScaffoldService, SynthesisService,
    },
    domain::{
        ExtractOptions, Role, SynthesisOptions, UnsupportedTypePolicy, Variant,
        variants::{BackendKind, TransportKind},
    },
    error::{StrataError, StrataResult},
};

const EXAMPLE: &str = indoc! {r#"
    package domain

    import "context"

    type Example struct{}

    type ExampleUsecase interface {
    	Fetch(ctx context.Context) ([]*Example, error)
    }

    type ExampleRepository interface {
    	Fetch(ctx context.Context) ([]*Example, error)
    }
"#};

fn extract(source: &str, stem: &str) -> StrataResult<strata_core::domain::Extraction> {
    let parser = GoContractParser::new();
    let fs = MemoryFilesystem::new();
    strata_core::application::ExtractionService::new(&parser, &fs).extract_source(
        source,
        Path::new("domain/example.go"),
        stem,
        &ExtractOptions::default(),
    )
}

#[test]
fn both_roles_are_extracted() {
    let model = extract(EXAMPLE, "example").unwrap().model;

    for role in Role::ALL {
        let iface = model.interface(role);
        assert_eq!(iface.methods.len(), 1);
        let fetch = &iface.methods[0];
        assert_eq!(fetch.name, "Fetch");
        assert_eq!(fetch.parameters.len(), 1);
        assert_eq!(fetch.parameters[0].name(), Some("ctx"));
        assert_eq!(fetch.parameters[0].type_expr, "context.Context");
        let results: Vec<_> = fetch.results.iter().map(|r| r.type_expr.as_str()).collect();
        assert_eq!(results, vec!["[]*domain.Example", "error"]);
    }
}

#[test]
fn persistence_stub_returns_zero_values_in_order() {
    let model = extract(EXAMPLE, "example").unwrap().model;
    let fs = MemoryFilesystem::new();
    let artifact = SynthesisService::new(&fs)
        .render(
            &model,
            Role::Repository,
            Variant::Persistence(BackendKind::Mysql),
            &SynthesisOptions::new("github.com/acme/shop"),
        )
        .unwrap();

    assert_eq!(
        artifact.path.as_str(),
        "repository/mysql/example_repository.go"
    );
    assert!(artifact.content.contains(indoc! {"
        func (m *mysqlExampleRepository) Fetch(ctx context.Context) ([]*domain.Example, error) {
        \treturn nil, nil
        }
    "}));
}

#[test]
fn unexported_repository_without_usecase_is_a_precondition_failure() {
    let source = indoc! {"
        package domain

        type exampleRepository interface {
        	Fetch() error
        }
    "};

    let err = StrataError::from(extract(source, "example").unwrap_err());
    assert!(err.is_precondition());
    assert!(err.to_string().contains("`Usecase`"));
}

#[test]
fn unsupported_types_follow_the_policy() {
    let source = indoc! {"
        package domain

        type ExampleUsecase interface {
        	Watch(ch chan int) error
        }

        type ExampleRepository interface {}
    "};

    let err = extract(source, "example").unwrap_err();
    assert!(err.to_string().contains("chan int"));

    let parser = GoContractParser::new();
    let fs = MemoryFilesystem::new();
    let model = strata_core::application::ExtractionService::new(&parser, &fs)
        .extract_source(
            source,
            Path::new("example.go"),
            "example",
            &ExtractOptions::default().with_policy(UnsupportedTypePolicy::Opaque),
        )
        .unwrap()
        .model;
    assert_eq!(model.usecase.methods[0].parameters[0].type_expr, "chan int");
}

fn extract_opaque(source: &str) -> StrataResult<strata_core::domain::Extraction> {
    let parser = GoContractParser::new();
    let fs = MemoryFilesystem::new();
    strata_core::application::ExtractionService::new(&parser, &fs).extract_source(
        source,
        Path::new("domain/example.go"),
        "example",
        &ExtractOptions::default().with_policy(UnsupportedTypePolicy::Opaque),
    )
}

#[test]
fn opaque_map_and_array_types_are_qualified_in_stubs() {
    let source = indoc! {"
        package domain

        type Example struct{}

        type ExampleUsecase interface {
        	Index(byID map[int64]*Example) [2]Example
        }

        type ExampleRepository interface {
        	Index(byID map[int64]*Example) [2]Example
        }
    "};

    let model = extract_opaque(source).unwrap().model;
    let fs = MemoryFilesystem::new();
    let artifact = SynthesisService::new(&fs)
        .render(
            &model,
            Role::Repository,
            Variant::Persistence(BackendKind::Mysql),
            &SynthesisOptions::new("github.com/acme/shop"),
        )
        .unwrap();

    assert!(artifact.content.contains(indoc! {"
        func (m *mysqlExampleRepository) Index(byID map[int64]*domain.Example) [2]domain.Example {
        \treturn [2]domain.Example{}
        }
    "}));
}

#[test]
fn opaque_struct_declaring_exported_fields_is_rejected() {
    let source = indoc! {"
        package domain

        type ExampleUsecase interface {
        	Stats() struct{ Count int64 }
        }

        type ExampleRepository interface {}
    "};

    let err = extract_opaque(source).unwrap_err();
    assert!(err.to_string().contains("struct{ Count int64 }"));
}

#[test]
fn synthesis_is_deterministic() {
    let model = extract(EXAMPLE, "example").unwrap().model;
    let fs = MemoryFilesystem::new();
    let synth = SynthesisService::new(&fs);
    let options = SynthesisOptions::new("shop");

    for variant in [
        Variant::Persistence(BackendKind::Postgres),
        Variant::Transport(TransportKind::Echo),
        Variant::Service,
    ] {
        let first = synth.render(&model, variant.default_role(), variant, &options).unwrap();
        let second = synth.render(&model, variant.default_role(), variant, &options).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn seed_project_in_memory() {
    let fs = MemoryFilesystem::new();
    let service = ScaffoldService::new(Box::new(GoContractParser::new()), Box::new(fs.clone()));
    let (stem, source) = seed_contract("article", "domain");

    let report = service
        .scaffold(
            ScaffoldRequest::new("/work/blog", ContractSource::Seed { stem, source })
                .module("github.com/acme/blog")
                .seed_file("go.mod", go_mod("github.com/acme/blog"))
                .variants([
                    Variant::Persistence(BackendKind::Mysql),
                    Variant::Transport(TransportKind::Http),
                    Variant::Service,
                ]),
        )
        .unwrap();

    assert_eq!(report.model.entity(), "Article");
    assert_eq!(report.files.len(), 5);

    let repo = fs
        .read_file(Path::new("/work/blog/repository/mysql/article_repository.go"))
        .unwrap();
    assert!(repo.contains("\treturn nil, \"\", nil\n"));
    assert!(repo.contains("\treturn domain.Article{}, nil\n"));

    let handler = fs
        .read_file(Path::new("/work/blog/delivery/http/article_handler.go"))
        .unwrap();
    assert!(handler.starts_with("package http\n"));
    assert!(handler.contains("/article/get-by-id"));
}

#[test]
fn failed_scaffold_leaves_no_trace() {
    let fs = MemoryFilesystem::new();
    fs.fail_writes_ending_with("article_usecase.go");
    let service = ScaffoldService::new(Box::new(GoContractParser::new()), Box::new(fs.clone()));
    let (stem, source) = seed_contract("article", "domain");

    let result = service.scaffold(
        ScaffoldRequest::new("/work/blog", ContractSource::Seed { stem, source })
            .module("blog")
            .variants([Variant::Persistence(BackendKind::Postgres), Variant::Service]),
    );

    assert!(result.is_err());
    assert!(fs.list_files().is_empty());
    assert!(!fs.exists(Path::new("/work/blog")));
}

#[test]
fn failed_forced_run_restores_overwritten_files() {
    let fs = MemoryFilesystem::new();
    let hand_written = "// HAND WRITTEN IMPLEMENTATION\n";
    fs.create_dir_all(Path::new("/shop/domain")).unwrap();
    fs.create_dir_all(Path::new("/shop/repository/mysql")).unwrap();
    fs.write_file(Path::new("/shop/go.mod"), &go_mod("example.com/shop")).unwrap();
    fs.write_file(Path::new("/shop/domain/example.go"), EXAMPLE).unwrap();
    fs.write_file(
        Path::new("/shop/repository/mysql/example_repository.go"),
        hand_written,
    )
    .unwrap();
    fs.fail_writes_ending_with("example_handler.go");

    let service = ScaffoldService::new(Box::new(GoContractParser::new()), Box::new(fs.clone()));
    let result = service.scaffold(
        ScaffoldRequest::new(
            "/shop",
            ContractSource::Existing {
                path: "/shop/domain/example.go".into(),
                stem: None,
            },
        )
        .variants([
            Variant::Persistence(BackendKind::Mysql),
            Variant::Transport(TransportKind::Http),
        ])
        .overwrite(true),
    );

    assert!(result.is_err());
    assert_eq!(
        fs.read_file(Path::new("/shop/repository/mysql/example_repository.go"))
            .as_deref(),
        Some(hand_written)
    );
    assert!(!fs.exists(Path::new("/shop/delivery")));
    assert!(fs.exists(Path::new("/shop/domain/example.go")));
}

#[test]
fn generate_on_disk_from_existing_contract() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::create_dir(root.join("domain")).unwrap();
    std::fs::write(root.join("go.mod"), go_mod("example.com/shop")).unwrap();
    std::fs::write(root.join("domain/example.go"), EXAMPLE).unwrap();

    let contracts = find_contracts(&root.join("domain"), "go").unwrap();
    assert_eq!(contracts.len(), 1);

    let service = ScaffoldService::new(Box::new(GoContractParser::new()), Box::new(LocalFilesystem));
    let report = service
        .scaffold(
            ScaffoldRequest::new(
                root,
                ContractSource::Existing {
                    path: contracts[0].clone(),
                    stem: None,
                },
            )
            .variants([Variant::Transport(TransportKind::Gin)]),
        )
        .unwrap();

    assert_eq!(report.module, "example.com/shop");
    let handler = std::fs::read_to_string(root.join("delivery/gin/example_handler.go")).unwrap();
    assert!(handler.contains("\t\"example.com/shop/domain\"\n"));
    assert!(handler.contains("\t\"github.com/gin-gonic/gin\"\n"));
}
