//! Integration tests for strata-core services, driven through in-test port
//! implementations.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use strata_core::{
    application::{ApplicationError, ContractSource, ScaffoldRequest, ScaffoldService},
    domain::{
        FieldDecl, ImportSpec, MethodDecl, SourceFile, TypeDecl, TypeExpr, Variant,
        variants::{BackendKind, TransportKind},
    },
    error::{ErrorCategory, StrataError, StrataResult},
    prelude::*,
};

// ── Fakes ────────────────────────────────────────────────────────────────────

/// Returns the same declaration tree for any input.
struct FixedParser(SourceFile);

impl ContractParser for FixedParser {
    fn parse(&self, _source: &str, _path: &Path) -> StrataResult<SourceFile> {
        Ok(self.0.clone())
    }

    fn extension(&self) -> &'static str {
        "go"
    }
}

#[derive(Default)]
struct State {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, String>,
    fail_on: Option<String>,
}

#[derive(Clone, Default)]
struct FakeFs(Arc<Mutex<State>>);

impl FakeFs {
    fn fail_writes_to(&self, suffix: &str) {
        self.0.lock().unwrap().fail_on = Some(suffix.to_string());
    }

    fn file(&self, path: &str) -> Option<String> {
        self.0.lock().unwrap().files.get(Path::new(path)).cloned()
    }

    fn file_count(&self) -> usize {
        self.0.lock().unwrap().files.len()
    }
}

impl Filesystem for FakeFs {
    fn create_dir_all(&self, path: &Path) -> StrataResult<()> {
        let mut state = self.0.lock().unwrap();
        for ancestor in path.ancestors() {
            state.dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> StrataResult<()> {
        let mut state = self.0.lock().unwrap();
        if let Some(suffix) = &state.fail_on {
            if path.to_string_lossy().ends_with(suffix.as_str()) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "disk full".into(),
                }
                .into());
            }
        }
        state.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> StrataResult<String> {
        self.0
            .lock()
            .unwrap()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| {
                StrataError::from(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "not found".into(),
                })
            })
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.0.lock().unwrap();
        state.dirs.contains(path) || state.files.contains_key(path)
    }

    fn remove_dir_all(&self, path: &Path) -> StrataResult<()> {
        let mut state = self.0.lock().unwrap();
        state.dirs.retain(|d| !d.starts_with(path));
        state.files.retain(|f, _| !f.starts_with(path));
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> StrataResult<()> {
        self.0.lock().unwrap().files.remove(path);
        Ok(())
    }
}

fn contract() -> SourceFile {
    let fetch = MethodDecl {
        name: "Fetch".into(),
        parameters: vec![FieldDecl::named("ctx", TypeExpr::qualified("context", "Context"))],
        results: vec![
            FieldDecl::unnamed(TypeExpr::slice(TypeExpr::pointer(TypeExpr::ident("Example")))),
            FieldDecl::unnamed(TypeExpr::ident("error")),
        ],
    };
    SourceFile {
        package: "domain".into(),
        imports: vec![ImportSpec::new("context")],
        declarations: vec![
            TypeDecl::other("Example"),
            TypeDecl::interface("ExampleUsecase", vec![fetch.clone()]),
            TypeDecl::interface("ExampleRepository", vec![fetch]),
        ],
    }
}

fn service(fs: &FakeFs) -> ScaffoldService {
    ScaffoldService::new(Box::new(FixedParser(contract())), Box::new(fs.clone()))
}

fn seed_request(root: &str) -> ScaffoldRequest {
    ScaffoldRequest::new(
        root,
        ContractSource::Seed {
            stem: "example".into(),
            source: "package domain\n".into(),
        },
    )
    .module("github.com/acme/shop")
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn seed_scaffold_writes_every_variant() {
    let fs = FakeFs::default();
    let report = service(&fs)
        .scaffold(seed_request("/out/shop").variants([
            Variant::Persistence(BackendKind::Mysql),
            Variant::Transport(TransportKind::Gin),
            Variant::Service,
        ]))
        .unwrap();

    assert_eq!(report.files.len(), 4);
    assert!(fs.file("/out/shop/domain/example.go").is_some());
    let repo = fs
        .file("/out/shop/repository/mysql/example_repository.go")
        .unwrap();
    assert!(repo.contains("\treturn nil, nil\n"));
    assert!(fs.file("/out/shop/delivery/gin/example_handler.go").is_some());
    assert!(fs.file("/out/shop/usecase/example_usecase.go").is_some());
}

#[test]
fn duplicate_variants_are_synthesized_once() {
    let fs = FakeFs::default();
    let report = service(&fs)
        .scaffold(seed_request("/out/shop").variants([
            Variant::Persistence(BackendKind::Postgres),
            Variant::Persistence(BackendKind::Postgres),
        ]))
        .unwrap();
    assert_eq!(report.files.len(), 2);
}

#[test]
fn existing_root_is_rejected_for_new_projects() {
    let fs = FakeFs::default();
    fs.create_dir_all(Path::new("/out/shop")).unwrap();

    let err = service(&fs)
        .scaffold(seed_request("/out/shop").variants([Variant::Service]))
        .unwrap_err();
    assert!(matches!(
        err,
        StrataError::Application(ApplicationError::ProjectExists { .. })
    ));
}

#[test]
fn failed_write_removes_created_root() {
    let fs = FakeFs::default();
    fs.fail_writes_to("example_handler.go");

    let err = service(&fs)
        .scaffold(seed_request("/out/shop").variants([
            Variant::Persistence(BackendKind::Mysql),
            Variant::Transport(TransportKind::Echo),
        ]))
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Internal);
    assert!(!fs.exists(Path::new("/out/shop")));
    assert_eq!(fs.file_count(), 0);
}

#[test]
fn failed_write_in_existing_project_only_removes_new_files() {
    let fs = FakeFs::default();
    fs.create_dir_all(Path::new("/srv/shop/domain")).unwrap();
    fs.write_file(Path::new("/srv/shop/go.mod"), "module github.com/acme/shop\n")
        .unwrap();
    fs.write_file(Path::new("/srv/shop/domain/example.go"), "package domain\n")
        .unwrap();
    fs.fail_writes_to("example_usecase.go");

    let request = ScaffoldRequest::new(
        "/srv/shop",
        ContractSource::Existing {
            path: "/srv/shop/domain/example.go".into(),
            stem: None,
        },
    )
    .variants([Variant::Persistence(BackendKind::Mongodb), Variant::Service]);

    assert!(service(&fs).scaffold(request).is_err());
    assert!(fs.exists(Path::new("/srv/shop/go.mod")));
    assert!(fs.exists(Path::new("/srv/shop/domain/example.go")));
    assert!(!fs.exists(Path::new("/srv/shop/repository/mongodb/example_repository.go")));
    assert!(!fs.exists(Path::new("/srv/shop/repository")));
}

#[test]
fn module_is_read_from_go_mod() {
    let fs = FakeFs::default();
    fs.write_file(Path::new("/srv/shop/go.mod"), "module example.com/shop\n\ngo 1.22\n")
        .unwrap();
    fs.write_file(Path::new("/srv/shop/domain/example.go"), "package domain\n")
        .unwrap();

    let request = ScaffoldRequest::new(
        "/srv/shop",
        ContractSource::Existing {
            path: "/srv/shop/domain/example.go".into(),
            stem: None,
        },
    )
    .variants([Variant::Service]);

    let report = service(&fs).scaffold(request).unwrap();
    assert_eq!(report.module, "example.com/shop");
    let usecase = fs.file("/srv/shop/usecase/example_usecase.go").unwrap();
    assert!(usecase.contains("\t\"example.com/shop/domain\"\n"));
}

#[test]
fn missing_module_is_a_configuration_error() {
    let fs = FakeFs::default();
    let request = ScaffoldRequest::new(
        "/out/shop",
        ContractSource::Seed {
            stem: "example".into(),
            source: String::new(),
        },
    )
    .variants([Variant::Service]);

    let err = service(&fs).scaffold(request).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Configuration);
}

#[test]
fn missing_contract_is_a_precondition_failure() {
    let fs = FakeFs::default();
    let request = ScaffoldRequest::new(
        "/srv/shop",
        ContractSource::Existing {
            path: "/srv/shop/domain/example.go".into(),
            stem: None,
        },
    )
    .module("shop")
    .variants([Variant::Service]);

    let err = service(&fs).scaffold(request).unwrap_err();
    assert!(err.is_precondition());
}

#[test]
fn stem_mismatch_aborts_before_writing() {
    let fs = FakeFs::default();
    let request = ScaffoldRequest::new(
        "/out/shop",
        ContractSource::Seed {
            stem: "article".into(),
            source: String::new(),
        },
    )
    .module("shop")
    .variants([Variant::Service]);

    let err = service(&fs).scaffold(request).unwrap_err();
    assert!(err.is_precondition());
    assert!(err.to_string().contains("stem `article`"));
    assert_eq!(fs.file_count(), 0);
}

#[test]
fn dry_run_writes_nothing() {
    let fs = FakeFs::default();
    let report = service(&fs)
        .scaffold(
            seed_request("/out/shop")
                .variants([Variant::Transport(TransportKind::Fiber)])
                .dry_run(true),
        )
        .unwrap();

    assert!(report.dry_run);
    assert_eq!(report.files.len(), 2);
    assert_eq!(fs.file_count(), 0);
}

#[test]
fn existing_outputs_need_overwrite() {
    let fs = FakeFs::default();
    fs.write_file(Path::new("/srv/shop/domain/example.go"), "package domain\n")
        .unwrap();
    fs.write_file(Path::new("/srv/shop/usecase/example_usecase.go"), "old")
        .unwrap();

    let request = || {
        ScaffoldRequest::new(
            "/srv/shop",
            ContractSource::Existing {
                path: "/srv/shop/domain/example.go".into(),
                stem: None,
            },
        )
        .module("shop")
        .variants([Variant::Service])
    };

    let err = service(&fs).scaffold(request()).unwrap_err();
    assert!(matches!(
        err,
        StrataError::Application(ApplicationError::FileExists { .. })
    ));

    service(&fs).scaffold(request().overwrite(true)).unwrap();
    assert_ne!(fs.file("/srv/shop/usecase/example_usecase.go").unwrap(), "old");
}

#[test]
fn synthesis_does_not_create_directories() {
    let fs = FakeFs::default();
    let extraction = service(&fs)
        .extractor()
        .extract_source("", Path::new("example.go"), "example", &ExtractOptions::default())
        .unwrap();
    let synth = SynthesisService::new(&fs);
    let artifact = synth
        .synthesize(
            &extraction.model,
            Role::Repository,
            Variant::Persistence(BackendKind::Mysql),
            &SynthesisOptions::new("shop"),
            Path::new("/nowhere"),
        )
        .unwrap();

    // The fake accepts writes anywhere; the service must not have created dirs.
    assert!(!fs.exists(Path::new("/nowhere/repository")));
    assert_eq!(
        fs.file("/nowhere/repository/mysql/example_repository.go").unwrap(),
        artifact.content
    );
}
