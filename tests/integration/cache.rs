//! Integration tests for `muruby cache`

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

use crate::common::{FileAssert, TestProject};

#[test]
fn test_cache_path_honors_environment() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_muruby(&["cache", "path"])?;
    output.assert_success();
    assert_eq!(output.stdout.trim(), project.cache_path().display().to_string());
    Ok(())
}

#[test]
fn test_cache_list_reports_entries() -> Result<()> {
    let project = TestProject::new()?;

    project.run_muruby(&["cache", "list"])?.assert_success().assert_stdout_contains("Cache is empty");

    fs::create_dir_all(project.cache_path().join("mruby").join("src"))?;
    fs::write(project.cache_path().join("mruby/src/vm.c"), "int main;")?;
    fs::write(project.cache_path().join("SDL2-2.0.1.tar.gz"), vec![0u8; 2048])?;

    let output = project.run_muruby(&["cache", "list"])?;
    output.assert_success();
    output.assert_stdout_contains("SDL2-2.0.1.tar.gz");
    output.assert_stdout_contains("archive");
    output.assert_stdout_contains("mruby");
    output.assert_stdout_contains("mirror");
    output.assert_stdout_contains("2.0 KB");
    Ok(())
}

#[test]
fn test_cache_clean_removes_everything() -> Result<()> {
    let project = TestProject::new()?;
    fs::create_dir_all(project.cache_path().join("SDL"))?;
    fs::write(project.cache_path().join("SDL/README"), "sdl")?;

    Command::from_std(project.command(&["cache", "clean"]))
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"));
    FileAssert::not_exists(project.cache_path());

    // cleaning an absent cache is fine
    project.run_muruby(&["cache", "clean"])?.assert_success();
    Ok(())
}

#[test]
fn test_config_file_cache_dir_is_used_without_env() -> Result<()> {
    let project = TestProject::new()?;
    let configured = project.sources_path().join("configured-cache");
    project.write_config(&format!("cache_dir = \"{}\"\n", configured.display()))?;

    let mut cmd = project.command(&["cache", "path"]);
    cmd.env_remove("MURUBY_CACHE_DIR");
    Command::from_std(cmd)
        .assert()
        .success()
        .stdout(predicate::str::contains(configured.display().to_string()));
    Ok(())
}

#[test]
fn test_invalid_config_is_reported() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config("[sources\n")?;

    project.run_muruby(&["cache", "path"])?.assert_failure().assert_stderr_contains("config");
    Ok(())
}
