use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

#[test]
fn top_level_help_lists_registry() {
    let mut cmd = cargo_bin_cmd!("enzoui-dev");
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("EnzOUi registry developer tooling").and(contains("registry")));
}

#[test]
fn registry_help_lists_subcommands() {
    let mut cmd = cargo_bin_cmd!("enzoui-dev");
    cmd.args(["registry", "--help"]);
    cmd.assert().success().stdout(
        contains("build")
            .and(contains("doctor"))
            .and(contains("list")),
    );
}

#[test]
fn build_help_documents_prune() {
    let mut cmd = cargo_bin_cmd!("enzoui-dev");
    cmd.args(["registry", "build", "--help"]);
    cmd.assert()
        .success()
        .stdout(contains("--prune").and(contains("--out")));
}
