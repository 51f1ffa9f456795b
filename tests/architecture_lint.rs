//! Architecture enforcement tests.
//!
//! These tests keep responsibilities where they belong:
//!
//! 1. **Link isolation** - Only the render layer decides when a link opens
//!    a new browsing context
//! 2. **Terminal output** - Only `cli` and `ui` print; library code logs
//!    through `tracing`
//! 3. **HTTP clients** - Only the store and relay clients speak HTTP;
//!    commands go through them
//! 4. **Page reads** - Pages read through `ContentStore`, never through a
//!    concrete client

use std::fs;
use std::path::{Path, PathBuf};

/// Directories allowed to print to the terminal.
const OUTPUT_LAYERS: &[&str] = &["src/cli", "src/ui", "src/main.rs"];

/// Files allowed to construct HTTP clients.
const HTTP_CLIENTS: &[&str] = &["src/store/sanity.rs", "src/notify/emailjs.rs"];

/// Every `.rs` file under `dir`, recursively.
fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).expect("Failed to read directory") {
        let path = entry.expect("Failed to read entry").path();
        if path.is_dir() {
            files.extend(rust_files(&path));
        } else if path.extension().map(|e| e == "rs").unwrap_or(false) {
            files.push(path);
        }
    }
    files.sort();
    files
}

/// Non-test code of a file, without comment lines.
fn production_code(path: &Path) -> String {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|_| panic!("Failed to read {}", path.display()));
    let code = content
        .split("#[cfg(test)]")
        .next()
        .unwrap_or_default()
        .to_string();
    code.lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn display(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn assert_clean(violations: Vec<String>) {
    assert!(
        violations.is_empty(),
        "Architecture violations found:\n  {}",
        violations.join("\n  ")
    );
}

// =============================================================================
// Link isolation
// =============================================================================

/// The `rel` value for new-context links appears only in the render layer.
#[test]
fn link_isolation_lives_in_render() {
    let mut violations = Vec::new();
    for path in rust_files(Path::new("src")) {
        let name = display(&path);
        if name.starts_with("src/render/") {
            continue;
        }
        if production_code(&path).contains("noopener noreferrer") {
            violations.push(format!("{}: sets link isolation outside render", name));
        }
    }
    assert_clean(violations);
}

// =============================================================================
// Terminal output
// =============================================================================

#[test]
fn library_code_does_not_print() {
    let mut violations = Vec::new();
    for path in rust_files(Path::new("src")) {
        let name = display(&path);
        if OUTPUT_LAYERS.iter().any(|layer| name.starts_with(layer)) {
            continue;
        }
        let code = production_code(&path);
        if code.contains("println!") || code.contains("eprintln!") {
            violations.push(format!("{}: prints directly - use tracing", name));
        }
    }
    assert_clean(violations);
}

// =============================================================================
// HTTP clients
// =============================================================================

#[test]
fn only_clients_speak_http() {
    let mut violations = Vec::new();
    for path in rust_files(Path::new("src")) {
        let name = display(&path);
        if HTTP_CLIENTS.contains(&name.as_str()) {
            continue;
        }
        if production_code(&path).contains("reqwest") {
            violations.push(format!("{}: uses reqwest directly", name));
        }
    }
    assert_clean(violations);
}

// =============================================================================
// Page reads
// =============================================================================

#[test]
fn pages_read_through_the_store_trait() {
    let mut violations = Vec::new();
    for path in rust_files(Path::new("src/pages")) {
        let name = display(&path);
        let code = production_code(&path);
        for concrete in ["SanityClient", "MemoryStore"] {
            if code.contains(concrete) {
                violations.push(format!("{}: depends on {}", name, concrete));
            }
        }
    }
    assert_clean(violations);
}
