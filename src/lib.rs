//! muruby - mruby + SDL2 game project scaffolder
//!
//! `muruby create <NAME>` produces a self-contained directory with everything
//! needed to write a game in Ruby and ship it for GNU/Linux and Android:
//!
//! ```text
//! <NAME>/
//! ├── app/                  game sources, Rakefile, docs
//! └── core/
//!     ├── SDL2, SDL2_*      unpacked native sources
//!     ├── build_host/       install prefix of the host builds
//!     ├── mruby/            mruby checkout with a generated gem list
//!     └── build_android/    NDK project with the SDL2 ports under jni/
//! ```
//!
//! # Architecture Overview
//!
//! A scaffold run is a fixed pipeline driven by [`scaffold::Scaffold`]:
//!
//! 1. Preflight: every external program that will actually be needed is
//!    located on `PATH` before anything is touched.
//! 2. App skeleton materialized from embedded templates ([`skeleton`]).
//! 3. Native libraries fetched ([`fetch`]) and compiled for the host
//!    ([`native`]); present outputs are skipped so re-runs are cheap.
//! 4. mruby fetched, checked out at the pinned release and its
//!    `build_config.rb` extended with generated gem declarations
//!    ([`build_config`]).
//! 5. Optionally the Android project: cross build block, NDK ports of the
//!    SDL2 libraries and personalization of the manifest.
//! 6. mruby built with `rake`.
//!
//! # Core Modules
//!
//! - [`cli`] - Command-line interface (`create`, `cache`)
//! - [`config`] - User config file and the resolved per-run settings
//! - [`core`] - Error types and user-facing error formatting
//! - [`scaffold`] - The creation pipeline
//!
//! ## Sources and Builds
//! - [`fetch`] - Archive, git and Mercurial fetchers sharing one cache
//! - [`cache`] - Cache directory inspection and cleanup
//! - [`native`] - SDL2 library table and the host build driver
//! - [`build_config`] - Gem declarations and anchor-based insertion
//!
//! ## Supporting Modules
//! - [`skeleton`] - Embedded project templates
//! - [`process`] - External command execution
//! - [`utils`] - Filesystem helpers, progress output, platform lookups
//! - [`constants`] - Default sources, anchors and pinned references
//!
//! # Configuration
//!
//! `~/.muruby/config.toml` (or `--config` / `MURUBY_CONFIG`) may override
//! source locations, fetchers and tool names:
//!
//! ```toml
//! [sources]
//! sdl_fetcher = "hg"
//! sdl2 = "http://hg.libsdl.org/SDL"
//!
//! [tools]
//! make = "gmake"
//! ```

pub mod build_config;
pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod fetch;
pub mod native;
pub mod process;
pub mod scaffold;
pub mod skeleton;
pub mod utils;

#[cfg(test)]
pub mod test_utils;
