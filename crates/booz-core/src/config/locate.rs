//! Template root discovery

use crate::product::ProductConfig;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Find the template tree for a product.
///
/// Order: the product's env var (always wins when set), a `templates/`
/// directory next to the running executable, then the bundled path.
pub fn locate_template_root<C: ProductConfig>(config: &C) -> PathBuf {
    let env_value = std::env::var_os(config.template_dir_env());
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    resolve_template_root(env_value, exe_dir, Path::new(config.bundled_template_dir()))
}

/// Candidate resolution, separated from the process environment for testing
pub fn resolve_template_root(
    env_value: Option<OsString>,
    exe_dir: Option<PathBuf>,
    bundled: &Path,
) -> PathBuf {
    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        let root = PathBuf::from(value);
        log::debug!("template root from environment: {}", root.display());
        return root;
    }

    if let Some(candidate) = exe_dir.map(|dir| dir.join("templates")) {
        if candidate.is_dir() {
            log::debug!("template root next to executable: {}", candidate.display());
            return candidate;
        }
    }

    log::debug!("template root bundled: {}", bundled.display());
    bundled.to_path_buf()
}
