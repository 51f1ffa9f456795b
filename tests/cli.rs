//! Integration tests for the groundwork binary.
//!
//! Every command runs with an isolated home directory so user config never
//! leaks in. Nothing here touches the network: pages render from fixtures
//! and the contact form runs with `--dry-run`.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const SITE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/site.ndjson");
const INVALID: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/invalid.json");

/// A groundwork command rooted in `home`.
fn groundwork(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("groundwork").unwrap();
    cmd.env_remove("GROUNDWORK_CONFIG")
        .env_remove("RUST_LOG")
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .arg("--cwd")
        .arg(home.path());
    cmd
}

#[test]
fn help_describes_the_tool() {
    let home = TempDir::new().unwrap();
    groundwork(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Content schema, rich-text renderer and page views"));
}

// =============================================================================
// render / query
// =============================================================================

#[test]
fn render_services_from_fixture_in_display_order() {
    let home = TempDir::new().unwrap();
    groundwork(&home)
        .args(["render", "services", "--fixture", SITE])
        .assert()
        .success()
        .stdout(predicate::str::is_match("(?s)Painting.*Bathroom Renovation.*Flooring").unwrap())
        .stdout(predicate::str::contains(r#"alt="Walk-in shower""#));
}

#[test]
fn render_about_keeps_phone_link_in_context() {
    let home = TempDir::new().unwrap();
    groundwork(&home)
        .args(["render", "/about", "--fixture", SITE])
        .assert()
        .success()
        .stdout(predicate::str::contains("Built on Trust"))
        .stdout(predicate::str::contains(
            r#"<a href="tel:+15550100" class="text-link">Call us</a>"#,
        ))
        .stdout(predicate::str::contains("Finished early and spotless."));
}

#[test]
fn render_json_tree() {
    let home = TempDir::new().unwrap();
    let output = groundwork(&home)
        .args(["render", "projects", "--fixture", SITE, "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let tree: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tree["kind"], "element");
    assert!(String::from_utf8_lossy(&output.stdout).contains("Loft Conversion"));
}

#[test]
fn render_unknown_route_fails() {
    let home = TempDir::new().unwrap();
    groundwork(&home)
        .args(["render", "blog", "--fixture", SITE])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown route 'blog'"));
}

#[test]
fn render_rejects_invalid_fixture() {
    let home = TempDir::new().unwrap();
    groundwork(&home)
        .args(["render", "projects", "--fixture", INVALID])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid content"));
}

#[test]
fn query_prints_groq() {
    let home = TempDir::new().unwrap();
    groundwork(&home)
        .args(["query", "projects"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            r#"*[_type == "project"] | order(completionDate desc)"#,
        ))
        .stdout(predicate::str::contains("[0..5]"));
}

#[test]
fn query_home_lists_both_reads() {
    let home = TempDir::new().unwrap();
    groundwork(&home)
        .args(["query", "/"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"*[_type == "service"]"#))
        .stdout(predicate::str::contains(r#"*[_type == "testimonial"]"#));
}

// =============================================================================
// schema / validate
// =============================================================================

#[test]
fn schema_lists_constraints() {
    let home = TempDir::new().unwrap();
    groundwork(&home)
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("project (Project)"))
        .stdout(predicate::str::contains(
            "images: array [required, min 1, of image]",
        ));
}

#[test]
fn schema_json_has_every_document_type() {
    let home = TempDir::new().unwrap();
    let output = groundwork(&home).args(["schema", "--json"]).output().unwrap();
    assert!(output.status.success());

    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = schema["documents"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|d| d["name"].as_str())
        .collect();
    assert_eq!(
        names,
        vec!["post", "author", "category", "aboutus", "testimonial", "service", "project"]
    );
}

#[test]
fn validate_accepts_site_fixture() {
    let home = TempDir::new().unwrap();
    groundwork(&home)
        .args(["validate", SITE])
        .assert()
        .success()
        .stdout(predicate::str::contains("6 document(s) valid"));
}

#[test]
fn validate_reports_each_failure() {
    let home = TempDir::new().unwrap();
    groundwork(&home)
        .args(["validate", INVALID])
        .assert()
        .failure()
        .stderr(predicate::str::contains("project project-empty"))
        .stderr(predicate::str::contains("images"))
        .stderr(predicate::str::contains("1 of 2 document(s) failed validation"));
}

#[test]
fn validate_suggests_unique_slug() {
    let home = TempDir::new().unwrap();
    let export = home.child("export.ndjson");
    export
        .write_str(concat!(
            r#"{"_id":"s-1","_type":"service","title":"Decks"}"#,
            "\n",
            r#"{"_id":"p-1","_type":"project","title":"Deck Build","slug":{"current":"deck-build"},"shortDescription":"Cedar deck","service":{"_type":"reference","_ref":"s-1"},"images":[{"_type":"image","asset":{"_ref":"image-a-10x10-png"},"alt":"Deck"}]}"#,
            "\n",
            r#"{"_id":"p-2","_type":"project","title":"Deck Build","shortDescription":"Second deck","service":{"_type":"reference","_ref":"s-1"},"images":[{"_type":"image","asset":{"_ref":"image-b-10x10-png"},"alt":"Deck"}]}"#,
            "\n",
        ))
        .unwrap();

    groundwork(&home)
        .arg("validate")
        .arg(export.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("project p-2"))
        .stdout(predicate::str::contains("suggested slug: deck-build-2"));
}

// =============================================================================
// contact
// =============================================================================

#[test]
fn contact_reports_missing_fields() {
    let home = TempDir::new().unwrap();
    groundwork(&home)
        .args(["contact", "--phone", "555-0100", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("First name is required"))
        .stderr(predicate::str::contains("Phone number is required").not());
}

#[test]
fn contact_dry_run_shows_params() {
    let home = TempDir::new().unwrap();
    groundwork(&home)
        .args([
            "contact",
            "--first-name",
            "Ada",
            "--last-name",
            "Byron",
            "--address",
            "12 Elm St",
            "--phone",
            "555-0100",
            "--service-type",
            "painting",
            "--preferred-time",
            "2025-03-04T09:30",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("service_type   = painting"))
        .stdout(predicate::str::contains("Form is complete"));
}

#[test]
fn contact_without_relay_config_fails() {
    let home = TempDir::new().unwrap();
    groundwork(&home)
        .args([
            "contact",
            "--first-name",
            "Ada",
            "--last-name",
            "Byron",
            "--address",
            "12 Elm St",
            "--phone",
            "555-0100",
            "--service-type",
            "painting",
            "--preferred-time",
            "2025-03-04T09:30",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("relay.service_id"));
}

// =============================================================================
// config / completion
// =============================================================================

#[test]
fn config_set_writes_project_file() {
    let home = TempDir::new().unwrap();
    groundwork(&home)
        .args(["config", "set", "store.dataset", "staging"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set store.dataset = staging"));

    home.child("groundwork.toml")
        .assert(predicate::str::contains(r#"dataset = "staging""#));

    groundwork(&home)
        .args(["config", "get", "store.dataset"])
        .assert()
        .success()
        .stdout("staging\n");
}

#[test]
fn config_get_defaults() {
    let home = TempDir::new().unwrap();
    groundwork(&home)
        .args(["config", "get", "store.project_id"])
        .assert()
        .success()
        .stdout("snti8zdm\n");
}

#[test]
fn config_list_masks_token() {
    let home = TempDir::new().unwrap();
    home.child("groundwork.toml")
        .write_str("[store]\ntoken = \"sk-secret\"\n")
        .unwrap();

    groundwork(&home)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("store.token"))
        .stdout(predicate::str::contains("sk-secret").not());
}

#[test]
fn config_rejects_unknown_key() {
    let home = TempDir::new().unwrap();
    groundwork(&home)
        .args(["config", "get", "trunk"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn completion_generates_script() {
    let home = TempDir::new().unwrap();
    groundwork(&home)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("groundwork"));
}
