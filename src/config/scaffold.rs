//! Per-run scaffold settings.

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::{GlobalConfig, SourceTable, ToolTable};
use crate::constants::{ANDROID_NDK_HOME_VAR, MRUBY_STABLE_REF, MRUBY_UNSTABLE_REF};
use crate::core::MurubyError;
use crate::native::NativeLibrary;
use crate::skeleton::TemplateSource;

/// Options of `muruby create`, as given on the command line.
#[derive(Debug, Clone)]
pub struct CreateOptions {
    /// Enabled SDL2 extensions
    pub extensions: Vec<NativeLibrary>,
    /// Track mruby `master` instead of the pinned release
    pub mruby_unstable: bool,
    /// GitHub coordinate of the SDL2 bindings gem
    pub sdl2_gem: String,
    /// Generate the Android project
    pub build_android: bool,
    /// Android package identifier
    pub package: String,
    /// Suppress progress lines
    pub quiet: bool,
}

/// Android settings, present only when the Android project is generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndroidTarget {
    /// Root of the Android NDK
    pub ndk_home: PathBuf,
    /// Package identifier written into the manifest
    pub package: String,
}

impl AndroidTarget {
    /// Read the NDK location from `ANDROID_NDK_HOME`.
    ///
    /// # Errors
    ///
    /// [`MurubyError::MissingEnvironment`] when the variable is unset or empty.
    pub fn from_env(package: impl Into<String>) -> Result<Self> {
        match std::env::var_os(ANDROID_NDK_HOME_VAR) {
            Some(value) if !value.is_empty() => Ok(Self {
                ndk_home: PathBuf::from(value),
                package: package.into(),
            }),
            _ => Err(MurubyError::MissingEnvironment {
                variable: ANDROID_NDK_HOME_VAR.to_string(),
                purpose: "building the Android project".to_string(),
            }
            .into()),
        }
    }
}

/// Everything a `create` run needs.
#[derive(Debug, Clone)]
pub struct ScaffoldConfig {
    /// Project name, also the directory name
    pub app_name: String,
    /// Absolute project directory
    pub project_root: PathBuf,
    /// Enabled SDL2 extensions, in build order
    pub extensions: Vec<NativeLibrary>,
    /// mruby reference to check out
    pub runtime_ref: String,
    /// GitHub coordinate of the SDL2 bindings gem
    pub sdl2_gem: String,
    /// Android settings when enabled
    pub android: Option<AndroidTarget>,
    /// Source coordinates
    pub sources: SourceTable,
    /// Tool programs
    pub tools: ToolTable,
    /// Local cache location
    pub cache_dir: PathBuf,
    /// Where the project templates come from
    pub skeleton: TemplateSource,
    /// Suppress progress lines
    pub quiet: bool,
}

impl ScaffoldConfig {
    /// Resolve the settings for a project `name` created inside `working_dir`.
    ///
    /// Environment preconditions are checked here, before anything touches
    /// the disk.
    pub fn resolve(
        name: &str,
        working_dir: &Path,
        options: CreateOptions,
        global: &GlobalConfig,
    ) -> Result<Self> {
        validate_name(name)?;

        let android = if options.build_android {
            Some(AndroidTarget::from_env(options.package)?)
        } else {
            None
        };

        let skeleton = match global.resolve_skeleton_dir()? {
            Some(dir) => TemplateSource::Directory(dir),
            None => TemplateSource::Embedded,
        };

        let mut extensions = options.extensions;
        extensions.retain(|lib| lib.is_extension());
        // build order is fixed regardless of flag order
        extensions.sort_by_key(|lib| NativeLibrary::EXTENSIONS.iter().position(|e| e == lib));
        extensions.dedup();

        Ok(Self {
            app_name: name.to_string(),
            project_root: working_dir.join(name),
            extensions,
            runtime_ref: if options.mruby_unstable {
                MRUBY_UNSTABLE_REF
            } else {
                MRUBY_STABLE_REF
            }
            .to_string(),
            sdl2_gem: options.sdl2_gem,
            android,
            sources: global.sources.clone(),
            tools: global.tools.clone(),
            cache_dir: global.resolve_cache_dir()?,
            skeleton,
            quiet: options.quiet,
        })
    }

    /// `<project>/app`
    #[must_use]
    pub fn app_path(&self) -> PathBuf {
        self.project_root.join("app")
    }

    /// `<project>/core`
    #[must_use]
    pub fn core_path(&self) -> PathBuf {
        self.project_root.join("core")
    }

    /// Install prefix of the host builds, `<project>/core/build_host`.
    #[must_use]
    pub fn build_host_path(&self) -> PathBuf {
        self.core_path().join("build_host")
    }

    /// Android project, `<project>/core/build_android`.
    #[must_use]
    pub fn build_android_path(&self) -> PathBuf {
        self.core_path().join("build_android")
    }

    /// mruby checkout, `<project>/core/mruby`.
    #[must_use]
    pub fn mruby_path(&self) -> PathBuf {
        self.core_path().join("mruby")
    }

    /// Host source tree of a native library, e.g. `<project>/core/SDL2_ttf`.
    #[must_use]
    pub fn library_path(&self, library: NativeLibrary) -> PathBuf {
        self.core_path().join(library.name())
    }

    /// Android port of a native library, e.g. `build_android/jni/SDL_ttf`.
    #[must_use]
    pub fn android_library_path(&self, library: NativeLibrary) -> PathBuf {
        self.build_android_path().join("jni").join(library.android_dir_name())
    }

    /// SDL2 followed by the enabled extensions.
    pub fn libraries(&self) -> impl Iterator<Item = NativeLibrary> + '_ {
        std::iter::once(NativeLibrary::Sdl2).chain(self.extensions.iter().copied())
    }
}

fn validate_name(name: &str) -> Result<()> {
    let single_component = Path::new(name).components().count() == 1
        && !name.contains(['/', '\\'])
        && name != "."
        && name != "..";
    if name.is_empty() || !single_component {
        return Err(MurubyError::Other {
            message: format!("Invalid project name '{name}': expected a plain directory name"),
        }
        .into());
    }
    Ok(())
}
