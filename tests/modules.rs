use std::path::{Path, PathBuf};

use lux::{evaluate, interpreter::loader::Loader};
use walkdir::WalkDir;

fn scripts_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/scripts")
}

#[test]
fn standalone_scripts_pass() {
    let mut count = 0;

    for entry in WalkDir::new(scripts_dir().join("standalone")).into_iter()
                                                               .filter_map(Result::ok)
                                                               .filter(|e| {
                                                                   e.path().extension()
                                                                    .is_some_and(|ext| {
                                                                        ext == "lux"
                                                                    })
                                                               })
    {
        count += 1;
        let path = entry.path();
        let source = std::fs::read_to_string(path).unwrap();
        let result = evaluate(&source, &path.display().to_string());
        if let Some(error) = result.error {
            panic!("Script {path:?} failed:\n{error}");
        }
    }

    assert!(count > 0, "No .lux scripts found in tests/scripts/standalone");
}

#[test]
fn imports_merge_functions_and_constants() {
    let loader = Loader::new();
    let result = loader.run_file(&scripts_dir().join("modules/main.lux"));

    assert!(result.error.is_none(), "unexpected error: {:?}", result.error);
    assert_eq!(result.output, vec!["42", "hi"]);
}

#[test]
fn non_constant_data_is_not_exported() {
    let loader = Loader::new();
    let result = loader.run_file(&scripts_dir().join("modules/wants_hidden.lux"));

    let error = result.error.expect("expected an error");
    assert!(error.contains("Undefined variable 'hidden'"), "got: {error}");
}

#[test]
fn modules_execute_exactly_once() {
    let loader = Loader::new();
    let result = loader.run_file(&scripts_dir().join("modules/twice.lux"));

    assert!(result.error.is_none(), "unexpected error: {:?}", result.error);
    assert_eq!(result.output, vec!["noisy loaded", "1", "1"]);
}

#[test]
fn the_cache_is_per_loader() {
    let loader = Loader::new();
    let first = loader.run_file(&scripts_dir().join("modules/twice.lux"));
    assert!(first.error.is_none());

    // A fresh loader has a fresh cache, so the module runs again.
    let loader = Loader::new();
    let second = loader.run_file(&scripts_dir().join("modules/twice.lux"));
    assert!(second.error.is_none());
    assert_eq!(second.output, vec!["noisy loaded", "1", "1"]);
}

#[test]
fn circular_imports_are_detected() {
    let loader = Loader::new();
    let result = loader.run_file(&scripts_dir().join("modules/cycle_a.lux"));

    let error = result.error.expect("expected an error");
    assert!(error.contains("Circular import detected"), "got: {error}");
}

#[test]
fn missing_modules_are_reported() {
    let loader = Loader::new();
    let result = loader.run_file(&scripts_dir().join("modules/wants_missing.lux"));

    let error = result.error.expect("expected an error");
    assert!(error.contains("Cannot read module"), "got: {error}");
}

#[test]
fn merging_never_overwrites_existing_globals() {
    let loader = Loader::new();
    let result = loader.run_file(&scripts_dir().join("modules/first_wins.lux"));

    assert!(result.error.is_none(), "unexpected error: {:?}", result.error);
    assert_eq!(result.output, vec!["one"]);
}

#[test]
fn module_errors_surface_at_the_import_site() {
    let loader = Loader::new();
    let result = loader.run_file(&scripts_dir().join("modules/wants_faulty.lux"));

    let error = result.error.expect("expected an error");
    assert!(error.contains("Module 'faulty' failed"), "got: {error}");
    assert!(error.contains("Division by zero"), "got: {error}");
}

#[test]
fn missing_entry_file_is_reported() {
    let loader = Loader::new();
    let result = loader.run_file(&scripts_dir().join("modules/does_not_exist.lux"));

    let error = result.error.expect("expected an error");
    assert!(error.contains("Cannot read"), "got: {error}");
}

#[test]
fn run_source_resolves_imports_against_the_label() {
    let loader = Loader::new();
    let label = scripts_dir().join("modules/inline.lux");
    let result = loader.run_source("import \"util\"\nprintln(to_string(double(4)))",
                                   &label.display().to_string());

    assert!(result.error.is_none(), "unexpected error: {:?}", result.error);
    assert_eq!(result.output, vec!["8"]);
}
