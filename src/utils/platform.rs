//! Platform helpers
//!
//! muruby drives POSIX build tools (autotools, make, tar), so it only has to
//! know where the invoking user's home directory is.

use anyhow::Result;
use std::path::PathBuf;

/// Returns the home directory of the invoking user.
///
/// # Errors
///
/// Fails when the home directory cannot be determined (typically `HOME`
/// unset).
///
/// # Examples
///
/// ```rust,no_run
/// use muruby::utils::platform::get_home_dir;
///
/// # fn example() -> anyhow::Result<()> {
/// let home = get_home_dir()?;
/// println!("Cache lives under {}", home.join(".muruby").display());
/// # Ok(())
/// # }
/// ```
pub fn get_home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine home directory.\n\nCheck that the HOME environment variable is set"
        )
    })
}
