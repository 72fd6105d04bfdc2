//! End-to-end tests for `muruby create`

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

use crate::common::{FileAssert, TestGit, TestProject, tool_available};

const SDL2_GEM_LINE: &str =
    "conf.gem :github => 'pichurriaj/mruby-sdl2', :branch => 'master' do |g|";

/// Point mruby at a local fixture and make `rake` a no-op.
fn desktop_project() -> Result<TestProject> {
    let project = TestProject::new()?;
    let mruby = project.create_mruby_repo()?;
    project.write_config(&format!(
        "[sources]\nmruby = \"{}\"\n\n[tools]\nrake = \"true\"\n",
        mruby.display()
    ))?;
    project.preinstall_sdl2("demo")?;
    Ok(project)
}

#[test]
fn test_create_desktop_project() -> Result<()> {
    if !tool_available("git") {
        eprintln!("git not available, skipping");
        return Ok(());
    }
    let project = desktop_project()?;

    let output = project.run_muruby(&["create", "demo", "--build-android", "false"])?;
    output.assert_success();
    output.assert_stdout_contains("Skipping SDL2...");
    output.assert_stdout_contains("Created demo");
    // progress goes to stdout; the default log level adds nothing to stderr
    assert!(!output.stderr.contains("INFO"), "unexpected log lines: {}", output.stderr);

    let root = project.work_path().join("demo");
    FileAssert::exists(root.join("app/game/runtime.rb"));
    FileAssert::exists(root.join("app/Rakefile"));
    FileAssert::exists(root.join("app/.gitignore"));
    FileAssert::exists(root.join("app/resources/README.md"));
    FileAssert::exists(root.join("app/deploy/README.md"));
    FileAssert::not_exists(root.join("core/build_android"));

    // mruby is cloned through the cache and checked out at the pinned tag
    FileAssert::exists(project.cache_path().join("mruby"));
    let upstream = TestGit::new(project.sources_path().join("mruby")).head()?;
    assert_eq!(TestGit::new(root.join("core/mruby")).head()?, upstream);

    let build_config = fs::read_to_string(root.join("core/mruby/build_config.rb"))?;
    assert_eq!(build_config.matches(SDL2_GEM_LINE).count(), 2);
    let host_tags = build_config.matches("#AUTOMATIC MRBGEMS --NO EDIT--\n").count();
    let debug_tags = build_config.matches("#AUTOMATIC MRBGEMS DEBUG --NO EDIT--\n").count();
    assert_eq!(host_tags, 22);
    assert_eq!(debug_tags, 22);
    assert!(!build_config.contains("MRuby::CrossBuild"));

    let build_host = root.join("core/build_host");
    assert!(build_config.contains(&format!(
        "\tg.cc.include_paths << '{}'\n",
        build_host.join("include").display()
    )));
    assert!(build_config.contains(&format!(
        "\tg.linker.library_paths << '{}'\n",
        build_host.join("lib").display()
    )));

    // the generated block opens right below the release anchor
    let release = build_config
        .split("MRuby::Build.new do |conf|\n")
        .nth(1)
        .expect("release anchor kept");
    assert!(release.starts_with(&format!("#AUTOMATIC MRBGEMS --NO EDIT--\n{SDL2_GEM_LINE}\n")));
    Ok(())
}

#[test]
fn test_create_android_project() -> Result<()> {
    if !["git", "curl", "tar"].iter().all(|tool| tool_available(tool)) {
        eprintln!("git, curl or tar not available, skipping");
        return Ok(());
    }
    let project = TestProject::new()?;
    let mruby = project.create_mruby_repo()?;
    let sdl2 = project.create_archive(
        "SDL2-2.0.1",
        &[("Android.mk", "LOCAL_MODULE := SDL2\n"), ("include/SDL.h", "/* sdl */\n")],
    )?;
    let image = project.create_archive(
        "SDL2_image-2.0.0",
        &[("Android.mk", "SUPPORT_WEBP := true\nSUPPORT_PNG := true\n")],
    )?;
    project.write_config(&format!(
        "[sources]\nsdl2 = \"{sdl2}\"\nsdl2_image = \"{image}\"\nmruby = \"{}\"\n\n[tools]\nrake = \"true\"\n",
        mruby.display()
    ))?;
    project.preinstall_sdl2("demo")?;
    project.preinstall_library("demo", "SDL2_image")?;
    let ndk = project.sources_path().join("android-ndk");
    fs::create_dir_all(&ndk)?;

    let mut cmd =
        project.command(&["create", "demo", "--enable-sdl-image", "--package", "org.example.demo"]);
    cmd.env("ANDROID_NDK_HOME", &ndk);
    Command::from_std(cmd).assert().success();

    let root = project.work_path().join("demo");
    let build_config = fs::read_to_string(root.join("core/mruby/build_config.rb"))?;
    assert!(build_config.contains(
        "# Define cross build settings\n#AUTOMATIC CROSSBUILD ANDROID\nMRuby::CrossBuild.new('androideabi') do |conf|\n"
    ));
    // SDL2 bindings, print-android and the common set
    assert_eq!(build_config.matches("#AUTOMATIC ANDROID MRBGEMS\n").count(), 16);
    assert!(build_config.contains(&format!(
        "\tg.cc.include_paths << '{}/sources/android/support/include/'\n",
        ndk.display()
    )));
    assert!(build_config
        .contains("conf.gem :github => 'pichurriaj/mruby-print-android', :branch => 'master'\n"));
    // the host blocks are still generated
    assert_eq!(build_config.matches(SDL2_GEM_LINE).count(), 3);

    let android = root.join("core/build_android");
    FileAssert::exists(android.join("jni/src/main.c"));
    FileAssert::contains(android.join("jni/SDL/Android.mk"), "LOCAL_MODULE := SDL2");
    FileAssert::exists(android.join("jni/SDL/include/SDL.h"));
    let image_mk = fs::read_to_string(android.join("jni/SDL_image/Android.mk"))?;
    assert_eq!(image_mk, "SUPPORT_WEBP := false\nSUPPORT_PNG := true\n");

    let manifest = fs::read_to_string(android.join("AndroidManifest.xml"))?;
    assert!(manifest.contains("package=\"org.example.demo\""));
    assert!(!manifest.contains("com.pichurriajuegos.muruby"));
    FileAssert::contains(
        android.join("res/values/strings.xml"),
        "<string name=\"app_name\">demo</string>",
    );

    // ports come through the shared cache
    FileAssert::exists(project.cache_path().join("SDL2-2.0.1.tar.gz"));
    FileAssert::exists(project.cache_path().join("SDL2_image-2.0.0.tar.gz"));
    Ok(())
}

#[test]
fn test_create_twice_reuses_fetched_sources() -> Result<()> {
    if !tool_available("git") {
        eprintln!("git not available, skipping");
        return Ok(());
    }
    let project = desktop_project()?;
    project.run_muruby(&["create", "demo", "--build-android", "false"])?.assert_success();

    let runtime = project.work_path().join("demo/app/game/runtime.rb");
    fs::write(&runtime, "# my game\n")?;

    let output = project.run_muruby(&["create", "demo", "--build-android", "false"])?;
    output.assert_success();
    output.assert_stdout_contains("mruby already present");
    // user edits survive a re-run
    FileAssert::contains(&runtime, "# my game");
    Ok(())
}

#[test]
fn test_quiet_create_prints_nothing() -> Result<()> {
    if !tool_available("git") {
        eprintln!("git not available, skipping");
        return Ok(());
    }
    let project = desktop_project()?;

    let output = project.run_muruby(&["--quiet", "create", "demo", "--build-android", "false"])?;
    output.assert_success();
    assert!(!output.stdout.contains("==>"), "unexpected progress: {}", output.stdout);
    Ok(())
}

#[test]
fn test_android_requires_ndk_home() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_muruby(&["create", "demo"])?;
    output.assert_failure();
    output.assert_stderr_contains("Need environment variable ANDROID_NDK_HOME");
    // nothing is created before the precondition holds
    FileAssert::not_exists(project.work_path().join("demo"));
    Ok(())
}

#[test]
fn test_invalid_fetcher_fails_before_any_work() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config("[sources]\nsdl_fetcher = \"svn\"\n")?;

    let output = project.run_muruby(&["create", "demo", "--build-android", "false"])?;
    output.assert_failure();
    output.assert_stderr_contains("Invalid fetcher 'svn'");
    FileAssert::not_exists(project.work_path().join("demo/app"));
    Ok(())
}

#[test]
fn test_missing_tool_is_reported_up_front() -> Result<()> {
    if !tool_available("git") {
        eprintln!("git not available, skipping");
        return Ok(());
    }
    let project = desktop_project()?;
    let mruby = project.sources_path().join("mruby");
    project.write_config(&format!(
        "[sources]\nmruby = \"{}\"\n\n[tools]\nrake = \"muruby-test-no-such-rake\"\n",
        mruby.display()
    ))?;

    let output = project.run_muruby(&["create", "demo", "--build-android", "false"])?;
    output.assert_failure();
    output.assert_stderr_contains("muruby-test-no-such-rake is not installed");
    FileAssert::not_exists(project.work_path().join("demo/app"));
    FileAssert::not_exists(project.work_path().join("demo/core/mruby"));
    Ok(())
}

#[test]
fn test_project_name_must_be_a_plain_directory() -> Result<()> {
    let project = TestProject::new()?;

    project
        .command(&["create", "nested/demo", "--build-android", "false"])
        .output()
        .map(|output| assert!(!output.status.success()))?;

    Command::from_std(project.command(&["create", "..", "--build-android", "false"]))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid project name '..'"));
    Ok(())
}

#[test]
fn test_create_requires_a_name() {
    Command::cargo_bin("muruby")
        .unwrap()
        .arg("create")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<NAME>"));
}
