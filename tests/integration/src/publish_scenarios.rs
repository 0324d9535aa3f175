//! Publishing scenarios
//!
//! A release build reads artifact coordinates from the root and library
//! scopes, lets developer-local files fill in defaults and takes secrets
//! from the CI environment. These tests walk that flow end to end through
//! the public API.

use pretty_assertions::assert_eq;
use props_core::{
    ConfigResolver, Error, FailureKind, RepositoryCredentials, ResolverOptions, Scope,
    SigningInfo, SourceOrder, SourceOutcome, StaticEnvironment,
};
use props_test_utils::TestTree;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Root project with a `library` module, the usual two-scope layout.
fn project() -> TestTree {
    let tree = TestTree::new();
    tree.write(
        "",
        "gradle.properties",
        "GROUP=io.example\nVERSION=1.0.0-SNAPSHOT\nPOM_URL=https://example.io\n",
    );
    tree.write(
        "library",
        "gradle.properties",
        "ARTIFACT_ID=example-core\nVERSION=1.0.0\n",
    );
    tree.write(
        "library",
        "local.properties",
        "SIGNING_KEY_ID=LOCALKEY\nSIGNING_PASSWORD=local-pass\n",
    );
    tree
}

fn scopes(tree: &TestTree) -> Vec<Scope> {
    vec![
        Scope::named("root", tree.scope_dir("")),
        Scope::new(tree.scope_dir("library")),
    ]
}

// =============================================================================
// Coordinates and layering
// =============================================================================

#[test]
fn test_coordinates_merge_across_scopes() {
    let tree = project();
    let mut resolver = ConfigResolver::new().with_environment(StaticEnvironment::new());
    resolver.resolve(&scopes(&tree), false);

    assert_eq!(resolver.get("GROUP").unwrap(), "io.example");
    assert_eq!(resolver.get("ARTIFACT_ID").unwrap(), "example-core");
    assert_eq!(resolver.get("VERSION").unwrap(), "1.0.0");
    assert_eq!(resolver.get_or("DESCRIPTION", "n/a"), "n/a");
}

#[test]
fn test_report_names_scopes_in_order() {
    let tree = project();
    let mut resolver = ConfigResolver::new().with_environment(StaticEnvironment::new());
    let report = resolver.resolve_with_report(&scopes(&tree), false);

    let loaded: Vec<(String, String)> = report
        .loaded()
        .map(|o| {
            (
                o.scope().to_string(),
                o.path().file_name().unwrap_or_default().to_string(),
            )
        })
        .collect();
    assert_eq!(
        loaded,
        vec![
            ("root".to_string(), "gradle.properties".to_string()),
            ("library".to_string(), "gradle.properties".to_string()),
            ("library".to_string(), "local.properties".to_string()),
        ]
    );
}

#[test]
fn test_loaded_paths_are_absolute() {
    let tree = project();
    let mut resolver = ConfigResolver::new().with_environment(StaticEnvironment::new());
    resolver.resolve(&scopes(&tree), false);

    for source in resolver.loaded_sources() {
        assert!(
            source.path.to_native().is_absolute(),
            "{} should be absolute",
            source.path
        );
        assert!(source.checksum.starts_with("sha256:"));
    }
}

// =============================================================================
// Credentials
// =============================================================================

#[test]
fn test_ci_environment_overrides_local_signing() {
    let tree = project();
    let env = StaticEnvironment::new()
        .with("SIGNING_KEY_ID", "CIKEY")
        .with("SIGNING_PASSWORD", "ci-pass")
        .with("SIGNING_PGP_B64", "LS0tLS1CRUdJTiBQR1A=")
        .with("OSSRH_PROFILE_ID", "7")
        .with("OSSRH_USERNAME", "ci")
        .with("OSSRH_PASSWORD", "ci-secret");

    let mut resolver = ConfigResolver::new().with_environment(env);
    resolver.resolve(&scopes(&tree), false);

    let signing = SigningInfo::from_resolver(&resolver);
    assert_eq!(signing.key_id, "CIKEY");
    assert_eq!(signing.password, "ci-pass");
    assert!(signing.is_complete());

    let repository = RepositoryCredentials::from_resolver(&resolver).unwrap();
    assert_eq!(repository.profile_id, "7");
    assert_eq!(repository.username, "ci");
}

#[test]
fn test_local_build_has_partial_signing_and_no_repository() {
    let tree = project();
    let mut resolver = ConfigResolver::new().with_environment(StaticEnvironment::new());
    resolver.resolve(&scopes(&tree), false);

    let signing = SigningInfo::from_resolver(&resolver);
    assert_eq!(signing.key_id, "LOCALKEY");
    assert_eq!(signing.pgp_key_b64, "");
    assert!(!signing.is_complete());

    let err = RepositoryCredentials::from_resolver(&resolver).unwrap_err();
    assert!(matches!(err, Error::MissingCredential { ref key } if key == "OSSRH_PROFILE_ID"));
}

// =============================================================================
// Failure and recovery
// =============================================================================

#[test]
fn test_broken_local_file_is_fixed_and_reloaded() {
    let tree = project();
    tree.write("library", "local.properties", "SIGNING_KEY_ID=\\uBAD\n");

    let mut resolver = ConfigResolver::new().with_environment(StaticEnvironment::new());
    let report = resolver.resolve_with_report(&scopes(&tree), false).clone();

    assert_eq!(report.loaded().count(), 2);
    match report.failed().next() {
        Some(SourceOutcome::Failed { failure, scope, .. }) => {
            assert_eq!(failure.kind, FailureKind::Syntax);
            assert_eq!(scope, "library");
        }
        other => panic!("expected a failed source, got {other:?}"),
    }
    assert_eq!(resolver.get("VERSION").unwrap(), "1.0.0");
    assert!(resolver.try_get("SIGNING_KEY_ID").is_none());

    tree.write("library", "local.properties", "SIGNING_KEY_ID=FIXED\n");
    let report = resolver.resolve_with_report(&scopes(&tree), true);
    assert!(!report.has_failures());
    assert_eq!(resolver.get("SIGNING_KEY_ID").unwrap(), "FIXED");
}

#[test]
fn test_optional_scope_may_be_missing() {
    let tree = project();
    let mut all = scopes(&tree);
    all.push(Scope::named("docs", tree.root().join("docs")));

    let mut resolver = ConfigResolver::new().with_environment(StaticEnvironment::new());
    let report = resolver.resolve_with_report(&all, false);

    assert_eq!(report.unreadable_scopes.len(), 1);
    assert_eq!(report.unreadable_scopes[0].scope, "docs");
    assert_eq!(resolver.get("ARTIFACT_ID").unwrap(), "example-core");
}

// =============================================================================
// Options
// =============================================================================

#[test]
fn test_options_file_drives_resolution() {
    let tree = project();
    let options_path = tree.write(
        "",
        "props.json",
        r#"{ "extensions": ["properties"], "order": "listing", "overlay_environment": false }"#,
    );
    tree.write("library", "ci.env", "VERSION=9.9.9\n");

    let options = ResolverOptions::load(&options_path).unwrap();
    assert_eq!(options.order, SourceOrder::Listing);

    let mut resolver = ConfigResolver::new()
        .with_options(options)
        .with_environment(StaticEnvironment::new().with("VERSION", "env"));
    resolver.resolve(&scopes(&tree), false);

    assert_eq!(resolver.get("VERSION").unwrap(), "1.0.0");
}

#[test]
fn test_report_serializes_for_tooling() {
    let tree = project();
    let mut resolver = ConfigResolver::new().with_environment(StaticEnvironment::new().with("CI", "1"));
    let report = resolver.resolve_with_report(&scopes(&tree), false);

    let json = serde_json::to_value(report).unwrap();
    assert_eq!(json["rebuilt"], true);
    assert_eq!(json["environment_keys"], 1);
    assert_eq!(json["outcomes"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["outcomes"][0]["scope"], "root");
}
