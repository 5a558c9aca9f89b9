//! 创建流程调度模块：
//! - 串联问答、模板获取、文本改写与落盘交付
//! - 暂存目录由作用域守卫管理，失败路径同样会被清理

use std::{
    env,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{bail, Context, Result};
use console::style;

use crate::{
    cli::Cli,
    fetch::fetch_template,
    prompt::{self, Answers},
    registry::Registry,
    rewrite,
    staging::StagingDir,
};

/// 创建流程的显式配置（便于测试替换暂存与输出位置）
pub(crate) struct CreateOptions {
    pub(crate) registry: Registry,
    pub(crate) staging_dir: PathBuf,
    pub(crate) target_root: PathBuf,
}

impl CreateOptions {
    /// 以当前目录为根的默认配置，暂存目录固定为 `.temp`
    pub(crate) fn from_cwd() -> Result<Self> {
        let cwd = env::current_dir().context("获取当前目录失败")?;
        Ok(Self {
            registry: Registry::builtin(),
            staging_dir: cwd.join(".temp"),
            target_root: cwd,
        })
    }
}

/// 运行交互式创建流程
pub(crate) fn run(_cli: Cli) -> Result<()> {
    let opts = CreateOptions::from_cwd()?;
    let answers = prompt::collect(&opts.registry)?;
    let project_dir = create(&answers, &opts)?;
    if prompt::confirm_open_editor()? {
        open_in_vscode(&project_dir)?;
    }
    Ok(())
}

/// 按回答执行创建：下载模板、改写文本、重命名交付
pub(crate) fn create(answers: &Answers, opts: &CreateOptions) -> Result<PathBuf> {
    let source = opts.registry.resolve(answers.version)?;
    let staging = StagingDir::acquire(opts.staging_dir.clone())?;
    fetch_template(&source, staging.path())?;
    let warnings = rewrite::apply(staging.path(), &answers.pro_name, &answers.zh_name)?;

    let project_dir = opts.target_root.join(&answers.pro_name);
    staging.into_project(&project_dir)?;

    for w in &warnings {
        eprintln!("⚠️ {}", w);
    }
    println!("{}", style("🎉项目创建成功！").green());
    Ok(project_dir)
}

/// 用 VSCode 打开新建的项目目录
fn open_in_vscode(dir: &Path) -> Result<()> {
    let status = Command::new("code")
        .arg(dir)
        .status()
        .with_context(|| format!("启动 VSCode 失败: {}", dir.display()))?;
    if !status.success() {
        bail!("VSCode 退出状态异常: {}", status);
    }
    Ok(())
}
