//! 交互问答模块：
//! - 收集项目名称、中文描述与模板版本
//! - 名称不合法时以本地化提示重新询问，校验失败不会向上冒泡

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::registry::{Registry, TemplateVersion};

/// 一次创建流程收集到的全部回答
#[derive(Debug, Clone)]
pub(crate) struct Answers {
    pub(crate) pro_name: String,
    pub(crate) zh_name: String,
    pub(crate) version: TemplateVersion,
}

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// 项目名称仅允许字母、数字、横线与下划线
pub(crate) fn is_valid_project_name(input: &str) -> bool {
    NAME_RE.is_match(input)
}

/// 依次询问项目名称、中文描述与模板版本
pub(crate) fn collect(registry: &Registry) -> Result<Answers> {
    let theme = ColorfulTheme::default();

    let pro_name: String = Input::with_theme(&theme)
        .with_prompt("Project name")
        .default("my-vue-project".to_string())
        .validate_with(|input: &String| -> Result<(), &str> {
            if is_valid_project_name(input) {
                Ok(())
            } else {
                Err("项目名称只能包含字母、数字、横线和下划线")
            }
        })
        .interact_text()?;

    let zh_name: String = Input::with_theme(&theme)
        .with_prompt("项目中文描述")
        .default("vue3项目".to_string())
        .interact_text()?;

    let idx = Select::with_theme(&theme)
        .with_prompt("Vue版本")
        .items(&registry.display_names())
        .default(0)
        .interact()?;
    let version = registry.version_at(idx)?;

    Ok(Answers {
        pro_name,
        zh_name,
        version,
    })
}

/// 创建完成后的确认：是否用 VSCode 打开新项目
pub(crate) fn confirm_open_editor() -> Result<bool> {
    let open = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("通过VSCode编译器打开")
        .default(true)
        .interact()?;
    Ok(open)
}
