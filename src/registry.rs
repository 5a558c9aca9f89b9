//! 模板注册表模块：
//! - 版本枚举到模板定位串的开放映射（新增模板只需加一条记录）
//! - 定位串解析为具体模板来源（GitHub 压缩包 / 直链压缩包 / 本地目录）

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// 模板版本（封闭集合，当前仅 Vue 3.0 一项可见）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TemplateVersion {
    Vue3,
}

/// 注册表条目：展示名与模板定位串
#[derive(Debug, Clone)]
pub(crate) struct Template {
    pub(crate) version: TemplateVersion,
    pub(crate) display: String,
    pub(crate) locator: String,
}

/// 模板来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TemplateSource {
    /// GitHub 仓库压缩包（codeload，`owner/repo#branch`）
    GitHub {
        owner: String,
        repo: String,
        branch: String,
    },
    /// 直链 `.tar.gz` 压缩包
    Archive(String),
    /// 本地目录（离线与测试场景）
    LocalDir(PathBuf),
}

#[derive(Debug, Clone)]
pub(crate) struct Registry {
    entries: Vec<Template>,
}

impl Registry {
    /// 内置注册表
    pub(crate) fn builtin() -> Self {
        Self {
            entries: vec![Template {
                version: TemplateVersion::Vue3,
                display: "Vue 3.0".to_string(),
                locator: "deepInsigh/pc-preset-vue#main".to_string(),
            }],
        }
    }

    #[cfg(test)]
    pub(crate) fn with_entries(entries: Vec<Template>) -> Self {
        Self { entries }
    }

    /// 供选择列表展示的名称集合
    pub(crate) fn display_names(&self) -> Vec<&str> {
        self.entries.iter().map(|t| t.display.as_str()).collect()
    }

    /// 按选择序号取版本
    pub(crate) fn version_at(&self, idx: usize) -> Result<TemplateVersion> {
        self.entries
            .get(idx)
            .map(|t| t.version)
            .ok_or_else(|| anyhow!("无效的模板选择: {}", idx))
    }

    /// 将版本解析为具体模板来源；定位串缺失或为空视为配置错误
    pub(crate) fn resolve(&self, version: TemplateVersion) -> Result<TemplateSource> {
        let entry = self
            .entries
            .iter()
            .find(|t| t.version == version)
            .ok_or_else(|| anyhow!("未注册的模板版本: {:?}", version))?;
        parse_locator(&entry.locator)
            .with_context(|| format!("模板定位串无效: {:?}", entry.locator))
    }
}

static REPO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([\w.-]+)/([\w.-]+)(?:#([\w./-]+))?$").unwrap());

/// 解析模板定位串：
/// - `owner/repo#branch`（branch 缺省为 main）→ GitHub 压缩包
/// - `http(s)://...` → 直链压缩包
/// - 其余 → 本地目录
pub(crate) fn parse_locator(locator: &str) -> Result<TemplateSource> {
    let t = locator.trim();
    if t.is_empty() {
        bail!("模板定位串为空");
    }
    if t.starts_with("http://") || t.starts_with("https://") {
        let parsed = Url::parse(t).with_context(|| format!("模板地址无效: {}", t))?;
        return Ok(TemplateSource::Archive(parsed.to_string()));
    }
    if let Some(caps) = REPO_RE.captures(t) {
        let branch = caps.get(3).map(|m| m.as_str()).unwrap_or("main");
        return Ok(TemplateSource::GitHub {
            owner: caps[1].to_string(),
            repo: caps[2].to_string(),
            branch: branch.to_string(),
        });
    }
    Ok(TemplateSource::LocalDir(PathBuf::from(t)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_github_locator_with_branch() {
        let src = parse_locator("deepInsigh/pc-preset-vue#main").unwrap();
        assert_eq!(
            src,
            TemplateSource::GitHub {
                owner: "deepInsigh".to_string(),
                repo: "pc-preset-vue".to_string(),
                branch: "main".to_string(),
            }
        );
    }

    #[test]
    fn github_branch_defaults_to_main() {
        let src = parse_locator("foo/bar").unwrap();
        assert_eq!(
            src,
            TemplateSource::GitHub {
                owner: "foo".to_string(),
                repo: "bar".to_string(),
                branch: "main".to_string(),
            }
        );
    }

    #[test]
    fn parses_archive_url() {
        let src = parse_locator("https://example.com/tpl.tar.gz").unwrap();
        assert_eq!(
            src,
            TemplateSource::Archive("https://example.com/tpl.tar.gz".to_string())
        );
    }

    #[test]
    fn falls_back_to_local_dir() {
        let src = parse_locator("/srv/templates/vue3").unwrap();
        assert_eq!(
            src,
            TemplateSource::LocalDir(PathBuf::from("/srv/templates/vue3"))
        );
    }

    #[test]
    fn empty_locator_is_an_error() {
        assert!(parse_locator("").is_err());
        assert!(parse_locator("   ").is_err());
    }

    #[test]
    fn resolve_rejects_blank_locator_entry() {
        let registry = Registry::with_entries(vec![Template {
            version: TemplateVersion::Vue3,
            display: "Vue 3.0".to_string(),
            locator: "  ".to_string(),
        }]);
        assert!(registry.resolve(TemplateVersion::Vue3).is_err());
    }

    #[test]
    fn builtin_registry_resolves() {
        let registry = Registry::builtin();
        assert_eq!(registry.display_names(), vec!["Vue 3.0"]);
        let src = registry.resolve(TemplateVersion::Vue3).unwrap();
        assert!(matches!(src, TemplateSource::GitHub { .. }));
    }
}
