//! Command implementations for the CLI.

use std::fs;
use std::path::{Path, PathBuf};

use crate::frontend::diagnostics::{CompileError, LineIndex};
use crate::frontend::discover::find_files;
use crate::frontend::report::{TypingError, print_errors};
use crate::frontend::typechecker::TypeChecker;
use crate::frontend::{lexer, parser};

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (100 MB)
///
/// Files larger than this are rejected to prevent out-of-memory conditions
/// during analysis.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Read source file contents.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(file_path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(file_path).map_err(|e| {
        CliError::failure(format!("Cannot access file '{}': {}", file_path.display(), e))
    })?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path).map_err(|e| {
        CliError::failure(format!("Error reading file '{}': {}", file_path.display(), e))
    })
}

/// Render syntax errors against their source into a single CLI error.
fn syntax_failure(file_path: &Path, source: &str, errs: Vec<CompileError>) -> CliError {
    let index = LineIndex::new(source);
    let mut msg = String::new();
    for err in errs {
        let located = TypingError::from_compile_error(file_path, &index, err);
        msg.push_str(&located.render(source, true));
    }
    CliError::failure(msg.trim_end())
}

/// Lex and display tokens.
pub fn lex_file(file_path: &Path) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lexer::lex(&source).map_err(|errs| syntax_failure(file_path, &source, errs))?;

    for tok in &tokens {
        println!("{:?}", tok);
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse and display AST.
pub fn parse_file(file_path: &Path) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lexer::lex(&source).map_err(|errs| syntax_failure(file_path, &source, errs))?;
    let ast = parser::parse(&tokens).map_err(|errs| syntax_failure(file_path, &source, errs))?;

    println!("{:#?}", ast);
    Ok(ExitCode::SUCCESS)
}

/// Type check every Python file under `paths`.
///
/// Diagnostics go to stderr; the exit code is 1 when any were reported.
pub fn check_paths(paths: &[PathBuf], with_context: bool) -> CliResult<ExitCode> {
    let files = find_files(paths);
    if files.is_empty() {
        return Err(CliError::failure("No Python files found"));
    }

    match TypeChecker::new().check_files(&files) {
        Ok(()) => {
            println!(
                "✓ No type errors found in {} file{}",
                files.len(),
                if files.len() == 1 { "" } else { "s" }
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(errors) => {
            print_errors(&errors, with_context);
            Ok(ExitCode::FAILURE)
        }
    }
}
