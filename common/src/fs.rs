use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub trait FsExt: AsRef<Path> {
    /// Resolves the path against the current working directory. Absolute paths are returned as-is.
    fn relative_to_cwd(&self) -> Result<PathBuf> {
        let cwd = std::env::current_dir().context("Failed to read the current working directory")?;

        Ok(cwd.join(self))
    }

    /// Like [`FsExt::relative_to_cwd`] but fails when the result is not an existing file.
    fn existing_file(&self) -> Result<PathBuf> {
        let path = self.relative_to_cwd()?;
        anyhow::ensure!(path.is_file(), "{:?} is not a file", path);

        Ok(path)
    }
}

impl<T: AsRef<Path> + ?Sized> FsExt for T {}
