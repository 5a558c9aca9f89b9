//! 模板获取模块：
//! - 下载 GitHub/直链压缩包并解包到暂存目录，全程展示加载指示
//! - 本地目录来源走递归复制

use std::{
    fs,
    io::Read,
    path::{Component, Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use console::style;
use indicatif::ProgressBar;

use crate::registry::TemplateSource;

/// 按模板来源取回内容并落到目标目录
pub(crate) fn fetch_template(source: &TemplateSource, dest: &Path) -> Result<()> {
    let spinner = spinner("正在克隆仓库...");
    let result = materialize(source, dest);
    match &result {
        Ok(()) => spinner.finish_with_message(style("克隆成功").green().to_string()),
        Err(_) => spinner.finish_with_message(style("克隆失败").red().to_string()),
    }
    result
}

fn materialize(source: &TemplateSource, dest: &Path) -> Result<()> {
    match source {
        TemplateSource::GitHub {
            owner,
            repo,
            branch,
        } => {
            let url = format!(
                "https://codeload.github.com/{}/{}/tar.gz/{}",
                owner, repo, branch
            );
            let bytes = http_get_bytes(&url)
                .with_context(|| format!("下载模板失败: {}/{}#{}", owner, repo, branch))?;
            unpack_tarball(&bytes, dest)
                .with_context(|| format!("解包模板失败: {}/{}#{}", owner, repo, branch))
        }
        TemplateSource::Archive(url) => {
            let bytes = http_get_bytes(url).with_context(|| format!("下载模板失败: {}", url))?;
            unpack_tarball(&bytes, dest).with_context(|| format!("解包模板失败: {}", url))
        }
        TemplateSource::LocalDir(dir) => copy_dir_all(dir, dest)
            .with_context(|| format!("复制本地模板失败: {}", dir.display())),
    }
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn http_get_bytes(url: &str) -> Result<Vec<u8>> {
    let resp = ensure_success(ureq::get(url).set("User-Agent", "swallow/0.1").call(), url)?;
    let mut buf: Vec<u8> = Vec::new();
    resp.into_reader()
        .read_to_end(&mut buf)
        .with_context(|| format!("读取响应失败: {}", url))?;
    Ok(buf)
}

fn ensure_success(resp: Result<ureq::Response, ureq::Error>, url: &str) -> Result<ureq::Response> {
    match resp {
        Ok(r) => Ok(r),
        Err(e) => bail!("HTTP 请求失败 {}: {}", url, e),
    }
}

/// 解包 `.tar.gz` 到目标目录，剥离压缩包内的唯一顶层目录
fn unpack_tarball(bytes: &[u8], dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)
        .with_context(|| format!("创建目标目录失败: {}", dest.display()))?;
    let decoder = flate2::read::GzDecoder::new(bytes);
    let mut archive = tar::Archive::new(decoder);
    for entry in archive.entries().context("读取压缩包失败")? {
        let mut entry = entry.context("读取压缩包条目失败")?;
        let path = entry.path().context("压缩包条目路径无效")?.into_owned();
        let rel: PathBuf = path.components().skip(1).collect();
        if rel.as_os_str().is_empty() {
            continue;
        }
        // 拒绝逃逸目标目录的条目
        if rel
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir))
        {
            continue;
        }
        let out = dest.join(&rel);
        if entry.header().entry_type().is_dir() {
            fs::create_dir_all(&out)
                .with_context(|| format!("创建目录失败: {}", out.display()))?;
        } else {
            if let Some(parent) = out.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("创建目录失败: {}", parent.display()))?;
            }
            entry
                .unpack(&out)
                .with_context(|| format!("写出文件失败: {}", out.display()))?;
        }
    }
    Ok(())
}

/// 递归复制目录
fn copy_dir_all(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        bail!("{} 不是目录", from.display());
    }
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let fpath = entry.path();
        let tpath = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_all(&fpath, &tpath)?;
        } else {
            fs::copy(&fpath, &tpath)
                .with_context(|| format!("复制失败: {} -> {}", fpath.display(), tpath.display()))?;
        }
    }
    Ok(())
}
