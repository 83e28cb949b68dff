//! Integration tests for the typpy analyzer over fixture programs

use std::path::{Path, PathBuf};

use typpy::TypeChecker;
use typpy::frontend::diagnostics::ErrorKind;
use typpy::frontend::discover::find_files;

const PROGRAMS: &str = "tests/fixtures/programs";

fn program(name: &str) -> PathBuf {
    Path::new(PROGRAMS).join(name)
}

/// Check one fixture and describe each diagnostic as `line:column message`.
fn diagnostics(name: &str) -> Vec<String> {
    TypeChecker::new()
        .check_file(&program(name))
        .into_iter()
        .map(|e| format!("{}:{} {}", e.line, e.column + 1, e.message))
        .collect()
}

#[test]
fn test_clean_program_has_no_diagnostics() {
    assert_eq!(diagnostics("clean.py"), Vec::<String>::new());
}

#[test]
fn test_call_diagnostics() {
    assert_eq!(
        diagnostics("bad_calls.py"),
        vec![
            "5:1 add() missing 1 required argument: 'b'",
            "6:11 add() takes 2 positional arguments but 3 were given",
            "7:8 add() got an unexpected keyword argument 'c'",
            "7:1 add() missing 1 required argument: 'b'",
            "8:1 add() got multiple values for argument 'a'",
            "8:1 add() missing 1 required argument: 'b'",
            "9:8 Expected 'int' in argument 'b' of 'add', found 'None'.",
            "10:1 Function 'missing' is not defined.",
        ]
    );
}

#[test]
fn test_assignment_diagnostics() {
    assert_eq!(
        diagnostics("bad_assignments.py"),
        vec![
            "2:1 Expected 'int' in assignment to 'count', found 'str'.",
            "4:1 Cannot unpack tuple with 3 elements into 2 targets.",
            "6:1 Expected 'int' in assignment to 'limit', found 'str'.",
            "8:19 Name 'nowhere' is not defined.",
        ]
    );
}

#[test]
fn test_unsupported_statement_does_not_stop_the_scope() {
    let errors = TypeChecker::new().check_file(&program("unsupported.py"));
    let kinds: Vec<ErrorKind> = errors.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![ErrorKind::UnsupportedConstruct, ErrorKind::TypeMismatch]);
    assert_eq!(errors[0].message, "Unsupported construct: for loop");
    assert_eq!(errors[0].line, 5);
    assert_eq!(errors[1].line, 8);
}

#[test]
fn test_syntax_error_is_reported_for_its_file_only() {
    let files = vec![program("syntax_error.py"), program("bad_calls.py"), program("clean.py")];
    let errors = TypeChecker::new().check_files(&files).unwrap_err();

    let syntax: Vec<_> = errors.iter().filter(|e| e.kind == ErrorKind::Syntax).collect();
    assert!(!syntax.is_empty());
    assert!(syntax.iter().all(|e| e.file == program("syntax_error.py")));
    assert_eq!(errors.iter().filter(|e| e.file == program("bad_calls.py")).count(), 8);
    assert!(errors.iter().all(|e| e.file != program("clean.py")));
}

#[test]
fn test_nested_function_sees_module_callables() {
    assert_eq!(
        diagnostics("pkg/util.py"),
        vec!["6:11 Expected 'str' in argument 'name' of 'greet', found 'int'."]
    );
}

#[test]
fn test_check_files_output_is_sorted_by_path() {
    let forward = vec![program("bad_calls.py"), program("bad_assignments.py")];
    let backward = vec![program("bad_assignments.py"), program("bad_calls.py")];
    let a = TypeChecker::new().check_files(&forward).unwrap_err();
    let b = TypeChecker::new().check_files(&backward).unwrap_err();
    assert_eq!(a, b);
    assert_eq!(a[0].file, program("bad_assignments.py"));
}

#[test]
fn test_directory_discovery_finds_every_program() {
    let files = find_files(&[PROGRAMS]);
    let names: Vec<String> = files
        .iter()
        .map(|f| f.strip_prefix(PROGRAMS).unwrap().display().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "bad_assignments.py",
            "bad_calls.py",
            "clean.py",
            "pkg/__init__.py",
            "pkg/util.py",
            "syntax_error.py",
            "unsupported.py",
        ]
    );
}

#[test]
fn test_missing_file_is_a_diagnostic() {
    let errors = TypeChecker::new().check_file(&program("does_not_exist.py"));
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.starts_with("Cannot read file"));
}
