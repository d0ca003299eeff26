//! Resolves the shared data directory exported assets land in.
//!
//! The directory is host-provided: a platform data dir by default, or the
//! `WIRECONE_DATA_DIR` override so tests and sandboxes can redirect it. It is
//! created on discovery so the export step never races a missing parent.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories_next::ProjectDirs;

pub const ENV_DATA_DIR: &str = "WIRECONE_DATA_DIR";

const QUALIFIER: &str = "org";
const ORGANISATION: &str = "wirecone";
const APPLICATION: &str = "wirecone";

#[derive(Debug, Clone)]
pub struct SharedPaths {
    data_dir: PathBuf,
}

impl SharedPaths {
    pub fn discover() -> Result<Self> {
        let data_dir = match env_override(ENV_DATA_DIR) {
            Some(dir) => dir,
            None => {
                let project_dirs = ProjectDirs::from(QUALIFIER, ORGANISATION, APPLICATION)
                    .ok_or_else(|| anyhow!("failed to determine user directories"))?;
                project_dirs.data_dir().to_path_buf()
            }
        };

        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).with_context(|| {
                format!(
                    "failed to create shared data directory at {}",
                    data_dir.display()
                )
            })?;
        }

        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Destination for an exported asset with the given base name and
    /// extension, e.g. `primitive` + `obj` → `<data-dir>/primitive.obj`.
    pub fn export_file(&self, base_name: &str, extension: &str) -> PathBuf {
        self.data_dir.join(format!("{base_name}.{extension}"))
    }
}

fn env_override(name: &str) -> Option<PathBuf> {
    match env::var_os(name) {
        Some(value) if !value.as_os_str().is_empty() => Some(PathBuf::from(value)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::sync::{Mutex, OnceLock};
    use tempfile::TempDir;

    fn env_lock() -> &'static Mutex<()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    struct EnvGuard {
        key: &'static str,
        previous: Option<OsString>,
    }

    impl EnvGuard {
        fn set(key: &'static str, value: &Path) -> Self {
            let previous = env::var_os(key);
            env::set_var(key, value);
            Self { key, previous }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = self.previous.take() {
                env::set_var(self.key, value);
            } else {
                env::remove_var(self.key);
            }
        }
    }

    #[test]
    fn env_override_takes_precedence() {
        let _guard = env_lock().lock().unwrap();
        let root = TempDir::new().unwrap();
        let data_dir = root.path().join("data");
        let _env = EnvGuard::set(ENV_DATA_DIR, &data_dir);

        let paths = SharedPaths::discover().unwrap();

        assert_eq!(paths.data_dir(), data_dir.as_path());
        assert!(data_dir.is_dir());
    }

    #[test]
    fn export_file_joins_base_name_and_extension() {
        let _guard = env_lock().lock().unwrap();
        let root = TempDir::new().unwrap();
        let _env = EnvGuard::set(ENV_DATA_DIR, root.path());

        let paths = SharedPaths::discover().unwrap();

        assert_eq!(
            paths.export_file("primitive", "obj"),
            root.path().join("primitive.obj")
        );
    }
}
