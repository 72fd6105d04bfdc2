//! Common test utilities and fixtures for muruby integration tests
//!
//! Every [`TestProject`] gets its own temporary working directory, cache and
//! config file, so tests never touch `~/.muruby` and can run in parallel.

// Not every helper is used by every test file
#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Git command builder for fixture repositories
pub struct TestGit {
    repo_path: PathBuf,
}

impl TestGit {
    /// Create a new TestGit instance for the given repository path
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .with_context(|| format!("Failed to run git {}", args.join(" ")))?;
        if !output.status.success() {
            bail!("git {} failed: {}", args.join(" "), String::from_utf8_lossy(&output.stderr));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Initialize a repository on `master` with a test identity
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.repo_path)?;
        self.run(&["init"])?;
        self.run(&["symbolic-ref", "HEAD", "refs/heads/master"])?;
        self.run(&["config", "user.email", "test@muruby.example"])?;
        self.run(&["config", "user.name", "Test User"])?;
        self.run(&["config", "commit.gpgsign", "false"])?;
        Ok(())
    }

    /// Stage everything and commit
    pub fn commit_all(&self, message: &str) -> Result<()> {
        self.run(&["add", "."])?;
        self.run(&["commit", "-m", message])?;
        Ok(())
    }

    /// Create a lightweight tag
    pub fn tag(&self, tag_name: &str) -> Result<()> {
        self.run(&["tag", tag_name])?;
        Ok(())
    }

    /// Current commit hash
    pub fn head(&self) -> Result<String> {
        self.run(&["rev-parse", "HEAD"])
    }
}

/// mruby's `build_config.rb` reduced to the lines muruby anchors on
pub const MRUBY_BUILD_CONFIG: &str = "\
MRuby::Build.new do |conf|
  toolchain :gcc
  conf.gembox 'default'
end

MRuby::Build.new('host-debug') do |conf|
  toolchain :gcc
  enable_debug
end

# Define cross build settings
";

/// Isolated environment for running the muruby binary
pub struct TestProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    work_dir: PathBuf,
    cache_dir: PathBuf,
    config_path: PathBuf,
    sources_dir: PathBuf,
}

impl TestProject {
    /// Create a new isolated environment with an empty config
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let work_dir = temp_dir.path().join("work");
        let cache_dir = temp_dir.path().join("cache");
        let config_path = temp_dir.path().join("config.toml");
        let sources_dir = temp_dir.path().join("sources");

        fs::create_dir_all(&work_dir)?;
        fs::create_dir_all(&sources_dir)?;
        fs::write(&config_path, "")?;

        Ok(Self {
            _temp_dir: temp_dir,
            work_dir,
            cache_dir,
            config_path,
            sources_dir,
        })
    }

    /// Directory `muruby` runs in
    pub fn work_path(&self) -> &Path {
        &self.work_dir
    }

    /// Cache directory exported as `MURUBY_CACHE_DIR`
    pub fn cache_path(&self) -> &Path {
        &self.cache_dir
    }

    /// Directory holding fixture upstream repositories
    pub fn sources_path(&self) -> &Path {
        &self.sources_dir
    }

    /// Replace the user config file
    pub fn write_config(&self, content: &str) -> Result<()> {
        fs::write(&self.config_path, content)?;
        Ok(())
    }

    /// A git repository standing in for upstream mruby, tagged `1.1.0`
    pub fn create_mruby_repo(&self) -> Result<PathBuf> {
        let path = self.sources_dir.join("mruby");
        let git = TestGit::new(&path);
        git.init()?;
        fs::write(path.join("build_config.rb"), MRUBY_BUILD_CONFIG)?;
        fs::write(path.join("Rakefile"), "task :default\n")?;
        git.commit_all("Initial mruby")?;
        git.tag("1.1.0")?;
        Ok(path)
    }

    /// Pretend SDL2 is already unpacked and installed for project `name`
    pub fn preinstall_sdl2(&self, name: &str) -> Result<()> {
        self.preinstall_library(name, "SDL2")
    }

    /// Pretend `library` (e.g. `SDL2_image`) is unpacked and installed
    pub fn preinstall_library(&self, name: &str, library: &str) -> Result<()> {
        let core = self.work_dir.join(name).join("core");
        fs::create_dir_all(core.join(library).join("include"))?;
        let lib = core.join("build_host").join("lib");
        fs::create_dir_all(&lib)?;
        fs::write(lib.join(format!("lib{library}.so")), "")?;
        Ok(())
    }

    /// Pack `files` under `<top_dir>/` into `<top_dir>.tar.gz` and return its
    /// `file://` URL
    pub fn create_archive(&self, top_dir: &str, files: &[(&str, &str)]) -> Result<String> {
        let staging = self.sources_dir.join("archives");
        for (relative, content) in files {
            let path = staging.join(top_dir).join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content)?;
        }

        let archive = self.sources_dir.join(format!("{top_dir}.tar.gz"));
        let status = Command::new("tar")
            .arg("-czf")
            .arg(&archive)
            .arg("-C")
            .arg(&staging)
            .arg(top_dir)
            .status()
            .context("Failed to run tar")?;
        if !status.success() {
            bail!("tar -czf failed for {}", archive.display());
        }
        Ok(format!("file://{}", archive.display()))
    }

    /// Run muruby with the isolated cache and config
    pub fn run_muruby(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = self.command(args).output().context("Failed to run muruby")?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }

    /// The configured command without running it
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_muruby"));
        cmd.args(args)
            .current_dir(&self.work_dir)
            .env("MURUBY_CACHE_DIR", &self.cache_dir)
            .env("MURUBY_CONFIG", &self.config_path)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("ANDROID_NDK_HOME");
        cmd
    }
}

/// Whether `program` can be run from `PATH`
pub fn tool_available(program: &str) -> bool {
    Command::new(program).arg("--version").output().is_ok()
}

/// Command output helper
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Assert the command succeeded
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success,
            "Command failed with code {:?}\nStdout: {}\nStderr: {}",
            self.code, self.stdout, self.stderr
        );
        self
    }

    /// Assert the command failed
    pub fn assert_failure(&self) -> &Self {
        assert!(!self.success, "Command unexpectedly succeeded\nStdout: {}", self.stdout);
        self
    }

    /// Assert stdout contains the given text
    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Expected stdout to contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    /// Assert stderr contains the given text
    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Expected stderr to contain '{}'\nActual stderr: {}",
            text,
            self.stderr
        );
        self
    }
}

/// File assertion helpers
pub struct FileAssert;

impl FileAssert {
    /// Assert a path exists
    pub fn exists(path: impl AsRef<Path>) {
        let path = path.as_ref();
        assert!(path.exists(), "Expected path to exist: {}", path.display());
    }

    /// Assert a path does not exist
    pub fn not_exists(path: impl AsRef<Path>) {
        let path = path.as_ref();
        assert!(!path.exists(), "Expected path to not exist: {}", path.display());
    }

    /// Assert a file contains specific content
    pub fn contains(path: impl AsRef<Path>, expected: &str) {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read file {}: {}", path.display(), e));
        assert!(
            content.contains(expected),
            "Expected file {} to contain '{}'\nActual content: {}",
            path.display(),
            expected,
            content
        );
    }
}
