//! A single resolver shared by concurrent build steps

use std::thread;

use pretty_assertions::assert_eq;
use props_core::{ConfigResolver, Scope, SharedResolver, StaticEnvironment};
use props_test_utils::TestScope;

#[test]
fn test_parallel_steps_share_one_load() {
    let scope = TestScope::new()
        .with_file("gradle.properties", "VERSION=1.0.0\n")
        .with_file(".env", "OSSRH_USERNAME=dev\n");
    let scopes = vec![Scope::new(scope.path())];

    let shared = SharedResolver::new(
        ConfigResolver::new().with_environment(StaticEnvironment::new().with("CI", "true")),
    );

    let handles: Vec<_> = ["VERSION", "OSSRH_USERNAME", "CI"]
        .into_iter()
        .map(|key| {
            let shared = shared.clone();
            let scopes = scopes.clone();
            thread::spawn(move || {
                shared.resolve(&scopes, false);
                shared.get(key).unwrap()
            })
        })
        .collect();

    let values: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(values, vec!["1.0.0", "dev", "true"]);

    let loaded = shared.with(|resolver| resolver.loaded_sources().len());
    assert_eq!(loaded, 2);
}

#[test]
fn test_reload_is_visible_to_every_handle() {
    let scope = TestScope::new().with_file("app.properties", "MODE=debug\n");
    let scopes = [Scope::new(scope.path())];

    let writer = SharedResolver::new(ConfigResolver::new().with_environment(StaticEnvironment::new()));
    let reader = writer.clone();

    writer.resolve(&scopes, false);
    assert_eq!(reader.get("MODE").unwrap(), "debug");

    scope.write("app.properties", "MODE=release\n");
    writer.resolve(&scopes, true);
    assert_eq!(reader.get("MODE").unwrap(), "release");
    assert_eq!(reader.snapshot().len(), 1);
}
