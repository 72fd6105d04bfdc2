//! Project templates
//!
//! The skeleton is a fixed tree copied literally into new projects: the game
//! folder layout with its READMEs, the desktop run script and the Android
//! project. It is compiled into the binary; the `skeleton_dir` setting of the
//! user config points at a directory with the same layout to use instead.
//!
//! ```text
//! skel/
//! ├── doc/README_{game,resources,deploy}.md
//! ├── game/runtime.rb
//! ├── Rakefile
//! ├── Gemfile
//! ├── gitignore.tmpl
//! └── android-project/
//! ```

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::fs::{copy_dir, ensure_dir};

/// Directory under the skeleton root holding the Android project.
pub const ANDROID_PROJECT_DIR: &str = "android-project";

/// Directories created under `app/`.
pub const APP_DIRS: [&str; 3] = ["game", "resources", "deploy"];

/// App files as `(path in app/, path in skeleton, embedded content)`.
const APP_FILES: [(&str, &str, &str); 7] = [
    ("game/README.md", "doc/README_game.md", include_str!("../../skel/doc/README_game.md")),
    ("game/runtime.rb", "game/runtime.rb", include_str!("../../skel/game/runtime.rb")),
    ("Rakefile", "Rakefile", include_str!("../../skel/Rakefile")),
    ("Gemfile", "Gemfile", include_str!("../../skel/Gemfile")),
    (".gitignore", "gitignore.tmpl", include_str!("../../skel/gitignore.tmpl")),
    (
        "resources/README.md",
        "doc/README_resources.md",
        include_str!("../../skel/doc/README_resources.md"),
    ),
    ("deploy/README.md", "doc/README_deploy.md", include_str!("../../skel/doc/README_deploy.md")),
];

/// Android project files as `(relative path, embedded content)`.
const ANDROID_FILES: [(&str, &str); 7] = [
    ("AndroidManifest.xml", include_str!("../../skel/android-project/AndroidManifest.xml")),
    ("project.properties", include_str!("../../skel/android-project/project.properties")),
    ("res/values/strings.xml", include_str!("../../skel/android-project/res/values/strings.xml")),
    ("jni/Android.mk", include_str!("../../skel/android-project/jni/Android.mk")),
    ("jni/Application.mk", include_str!("../../skel/android-project/jni/Application.mk")),
    ("jni/src/Android.mk", include_str!("../../skel/android-project/jni/src/Android.mk")),
    ("jni/src/main.c", include_str!("../../skel/android-project/jni/src/main.c")),
];

/// Where templates are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Templates compiled into the binary
    Embedded,
    /// A directory laid out like `skel/`
    Directory(PathBuf),
}

impl TemplateSource {
    /// Create `app/` with its folders and template files.
    ///
    /// Files already present are kept, so re-running over an existing project
    /// never clobbers the user's game sources.
    pub fn materialize_app(&self, app_dir: &Path) -> Result<()> {
        for dir in APP_DIRS {
            ensure_dir(&app_dir.join(dir))?;
        }

        for (target, source, embedded) in APP_FILES {
            let target = app_dir.join(target);
            if target.exists() {
                tracing::debug!("Keeping existing {}", target.display());
                continue;
            }
            match self {
                Self::Embedded => write_file(&target, embedded)?,
                Self::Directory(root) => {
                    let source = root.join(source);
                    fs::copy(&source, &target).with_context(|| {
                        format!("Failed to copy {} to {}", source.display(), target.display())
                    })?;
                }
            }
        }
        Ok(())
    }

    /// Copy the Android project template into `android_dir`.
    ///
    /// Template files are overwritten; anything else in the directory (the
    /// fetched SDL ports in particular) is left alone.
    pub fn materialize_android(&self, android_dir: &Path) -> Result<()> {
        match self {
            Self::Embedded => {
                for (relative, content) in ANDROID_FILES {
                    write_file(&android_dir.join(relative), content)?;
                }
                Ok(())
            }
            Self::Directory(root) => copy_dir(&root.join(ANDROID_PROJECT_DIR), android_dir),
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
