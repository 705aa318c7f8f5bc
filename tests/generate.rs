//! End-to-end tests for `dstub generate`, `init` and `completions`.

mod util;

use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use serde_json::Value;
use std::process::Command;

fn dstub() -> Command
{
    let mut cmd = Command::cargo_bin("dstub").expect("dstub binary");
    cmd.env_remove("DOCSTUB_LOG");
    cmd
}

#[test]
fn prints_plain_comment_for_next_definition()
{
    let dir = util::fixture_dir(&["module.lua"]);

    dstub()
        .current_dir(dir.path())
        .args(["generate", "module.lua", "--line", "7"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("--[[\n  description\n"))
        .stdout(predicate::str::contains("  @param path  desc\n"))
        .stdout(predicate::str::contains("  @param opts  desc\n]]"));
}

#[test]
fn raw_output_keeps_doubling_field_markers()
{
    let dir = util::fixture_dir(&["module.lua"]);

    dstub()
        .current_dir(dir.path())
        .args(["generate", "module.lua", "--line", "7", "--raw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("${1:description}"))
        .stdout(predicate::str::contains("@param path  ${2:desc}"))
        .stdout(predicate::str::contains("@param mode  ${4:desc}"))
        .stdout(predicate::str::contains("@param opts  ${8:desc}"));
}

#[test]
fn json_report_for_multiline_definition()
{
    let dir = util::fixture_dir(&["multiline.js"]);

    let assert = dstub()
        .current_dir(dir.path())
        .args(["generate", "multiline.js", "--line", "1", "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let v: Value = serde_json::from_str(&stdout).expect("valid json");

    assert_eq!(v["name"], "open");
    assert_eq!(v["args"], "path,    mode,     opts ");
    assert_eq!(v["lines_read"], 3);
    assert_eq!(v["balanced"], true);
    // Only the lua style exists; other languages fall back to it.
    assert_eq!(v["language"], "lua");
    assert_eq!(
        v["fields"]
            .as_array()
            .map(Vec::len),
        Some(4)
    );
    assert!(
        v["text"]
            .as_str()
            .unwrap()
            .contains("@param mode  desc")
    );
}

#[test]
fn no_definition_is_a_quiet_success()
{
    let dir = util::fixture_dir(&["module.lua"]);

    dstub()
        .current_dir(dir.path())
        .args(["--no-color", "generate", "module.lua", "--line", "11"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("note: nothing generated: no function signature found"));

    dstub()
        .current_dir(dir.path())
        .args(["--quiet", "generate", "module.lua", "--line", "14"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn out_of_range_line_fails()
{
    let dir = util::fixture_dir(&["module.lua"]);

    dstub()
        .current_dir(dir.path())
        .args(["generate", "module.lua", "--line", "400"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn write_inserts_into_file()
{
    let dir = util::source_dir("lib.lua", "\nfunction M.join(sep, ...)\nend\n");

    dstub()
        .current_dir(dir.path())
        .args(["generate", "lib.lua", "--line", "1", "--write"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Documented `M.join`"));

    dir.child("lib.lua")
        .assert(
            "--[[\n  description\n  @param sep  desc\n  @param ...  desc\n]]\nfunction M.join(sep, ...)\nend\n",
        );
}

#[test]
fn write_without_definition_still_erases_trailing_text()
{
    let dir = util::source_dir("a.lua", "-- stale text\nlocal x = 1\n");

    dstub()
        .current_dir(dir.path())
        .args(["--no-color", "generate", "a.lua", "--line", "1", "--column", "4", "--write"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("note: nothing generated"));

    dir.child("a.lua")
        .assert("-- \nlocal x = 1\n");
}

#[test]
fn write_without_definition_at_line_end_keeps_file()
{
    let body = "-- stale text\nlocal x = 1\n";
    let dir = util::source_dir("a.lua", body);

    dstub()
        .current_dir(dir.path())
        .args(["--quiet", "generate", "a.lua", "--line", "1", "--write"])
        .assert()
        .success();

    dir.child("a.lua")
        .assert(body);
}

#[test]
fn write_with_dry_run_leaves_file_alone()
{
    let body = "\nlocal function f(a)\nend\n";
    let dir = util::source_dir("lib.lua", body);

    dstub()
        .current_dir(dir.path())
        .args(["--dry-run", "generate", "lib.lua", "-l", "1", "--write"])
        .assert()
        .success()
        .stdout(predicate::str::contains("@param a  desc\n]]\nlocal function f(a)"));

    dir.child("lib.lua")
        .assert(body);
}

#[test]
fn config_file_switches_numbering()
{
    let dir = util::fixture_dir(&["module.lua"]);
    dir.child("docstub.toml")
        .write_str("[template]\nnumbering = \"sequential\"\nparam_tag = \"@arg\"\n")
        .unwrap();

    dstub()
        .current_dir(dir.path())
        .args(["generate", "module.lua", "--line", "7", "--raw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("@arg opts  ${4:desc}"));
}

#[test]
fn env_overrides_config()
{
    let dir = util::fixture_dir(&["module.lua"]);

    dstub()
        .current_dir(dir.path())
        .env("DOCSTUB_TEMPLATE__PARAM_PLACEHOLDER", "TODO")
        .args(["generate", "module.lua", "--line", "2", "--raw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("@param sep  ${2:TODO}"));
}

#[test]
fn init_writes_default_config_once()
{
    let dir = assert_fs::TempDir::new().unwrap();

    dstub()
        .args(["init"])
        .arg(dir.path())
        .assert()
        .success();

    dir.child("docstub.toml")
        .assert(predicate::str::contains("max_lines = 25"));

    dstub()
        .args(["init"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn completions_to_stdout()
{
    dstub()
        .args(["completions", "bash", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dstub"));
}
