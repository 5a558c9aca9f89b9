//! 模板改写模块：
//! - 对暂存目录中的三个固定文件做定向文本替换
//! - 清单解析失败时整体降级为警告，不中断创建流程

use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use console::style;
use indicatif::ProgressBar;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

/// 需要改写的三个固定相对路径
const MANIFEST_FILE: &str = "package.json";
const STORE_FILE: &str = "src/stores/modules/common.ts";
const HTML_FILE: &str = "index.html";

static KEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"key:\s*'[^']*'").unwrap());
static TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<title>[^<]*</title>").unwrap());

/// 将项目名与中文描述写入模板。
/// 文件读不到时返回错误；清单解析失败等可容忍问题以警告列表返回，
/// 由调用方在收尾时统一展示。
pub(crate) fn apply(staging: &Path, pro_name: &str, zh_name: &str) -> Result<Vec<String>> {
    let spinner = spinner("正在修改项目名称...");
    let result = rewrite_all(staging, pro_name, zh_name);
    match &result {
        Ok(warnings) if warnings.is_empty() => {
            spinner.finish_with_message(style("项目名称修改成功").green().to_string())
        }
        _ => spinner.finish_with_message(style("项目名称修改失败").red().to_string()),
    }
    result
}

fn rewrite_all(staging: &Path, pro_name: &str, zh_name: &str) -> Result<Vec<String>> {
    let manifest_path = staging.join(MANIFEST_FILE);
    let store_path = staging.join(STORE_FILE);
    let html_path = staging.join(HTML_FILE);

    // 三个文件先全部读入，任何一个读不到都不落任何写
    let manifest_text = fs::read_to_string(&manifest_path)
        .with_context(|| format!("读取模板文件失败: {}", manifest_path.display()))?;
    let store_text = fs::read_to_string(&store_path)
        .with_context(|| format!("读取模板文件失败: {}", store_path.display()))?;
    let html_text = fs::read_to_string(&html_path)
        .with_context(|| format!("读取模板文件失败: {}", html_path.display()))?;

    let mut warnings: Vec<String> = Vec::new();

    let mut manifest: serde_json::Value = match serde_json::from_str(&manifest_text) {
        Ok(v) => v,
        Err(e) => {
            warnings.push(format!("清单解析失败，未改写任何文件: {}", e));
            return Ok(warnings);
        }
    };
    match manifest.as_object_mut() {
        Some(obj) => {
            obj.insert(
                "name".to_string(),
                serde_json::Value::String(pro_name.to_string()),
            );
        }
        None => {
            warnings.push("清单不是 JSON 对象，未改写任何文件".to_string());
            return Ok(warnings);
        }
    }
    let new_manifest = serde_json::to_string_pretty(&manifest).context("序列化清单失败")?;

    // `key: '<literal>'` 与 `<title>...</title>` 找不到时原样写回
    let new_store = KEY_RE
        .replace(&store_text, NoExpand(&format!("key: '{}'", pro_name)))
        .into_owned();
    let new_html = TITLE_RE
        .replace(&html_text, NoExpand(&format!("<title>{}</title>", zh_name)))
        .into_owned();

    for (path, contents) in [
        (&manifest_path, &new_manifest),
        (&store_path, &new_store),
        (&html_path, &new_html),
    ] {
        if let Err(e) = fs::write(path, contents) {
            warnings.push(format!("写入失败: {}: {}", path.display(), e));
        }
    }
    Ok(warnings)
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
