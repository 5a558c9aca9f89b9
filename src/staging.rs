//! 暂存目录模块：
//! - 以作用域守卫持有暂存目录，任何提前返回都会将其递归删除
//! - 创建成功后通过重命名交付，守卫随之解除

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};

/// 暂存目录守卫：Drop 时递归删除（路径不存在视为已清理）
#[derive(Debug)]
pub(crate) struct StagingDir {
    path: PathBuf,
    armed: bool,
}

impl StagingDir {
    /// 接管暂存路径；若存在上次运行的残留则先删除
    pub(crate) fn acquire(path: PathBuf) -> Result<Self> {
        remove_recursive(&path)
            .with_context(|| format!("清理残留暂存目录失败: {}", path.display()))?;
        Ok(Self { path, armed: true })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// 将暂存目录重命名为最终项目目录；目标已存在或重命名被拒时报错
    pub(crate) fn into_project(mut self, target: &Path) -> Result<()> {
        if target.exists() {
            bail!("目标目录已存在: {}", target.display());
        }
        fs::rename(&self.path, target).with_context(|| {
            format!("重命名失败: {} -> {}", self.path.display(), target.display())
        })?;
        self.armed = false;
        Ok(())
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        if self.armed {
            let _ = remove_recursive(&self.path);
        }
    }
}

/// 递归删除，目标不存在时不视为错误
fn remove_recursive(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_removes_leftover_directory() {
        let root = tempfile::tempdir().unwrap();
        let staging = root.path().join(".temp");
        fs::create_dir_all(staging.join("old")).unwrap();
        fs::write(staging.join("old/file.txt"), "stale").unwrap();

        let guard = StagingDir::acquire(staging.clone()).unwrap();
        assert!(!staging.exists());
        drop(guard);
    }

    #[test]
    fn drop_removes_directory_recursively() {
        let root = tempfile::tempdir().unwrap();
        let staging = root.path().join(".temp");
        {
            let guard = StagingDir::acquire(staging.clone()).unwrap();
            fs::create_dir_all(guard.path().join("src")).unwrap();
            fs::write(guard.path().join("src/a.txt"), "a").unwrap();
        }
        assert!(!staging.exists());
    }

    #[test]
    fn into_project_renames_and_disarms() {
        let root = tempfile::tempdir().unwrap();
        let staging = root.path().join(".temp");
        let target = root.path().join("demo-app");

        let guard = StagingDir::acquire(staging.clone()).unwrap();
        fs::create_dir_all(guard.path()).unwrap();
        fs::write(guard.path().join("package.json"), "{}").unwrap();
        guard.into_project(&target).unwrap();

        assert!(target.join("package.json").exists());
        assert!(!staging.exists());
    }

    #[test]
    fn into_project_fails_on_existing_target_and_cleans_up() {
        let root = tempfile::tempdir().unwrap();
        let staging = root.path().join(".temp");
        let target = root.path().join("demo-app");
        fs::create_dir_all(&target).unwrap();

        let guard = StagingDir::acquire(staging.clone()).unwrap();
        fs::create_dir_all(guard.path()).unwrap();
        fs::write(guard.path().join("package.json"), "{}").unwrap();
        let err = guard.into_project(&target);

        assert!(err.is_err());
        assert!(!staging.exists());
        assert!(target.exists());
    }

    #[test]
    fn remove_recursive_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("not-there");
        assert!(remove_recursive(&missing).is_ok());
        assert!(remove_recursive(&missing).is_ok());
    }
}
