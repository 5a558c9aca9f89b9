//! CLI 定义模块：仅负责命令行参数结构体与解析
//! 本工具完全交互式运行，不接收功能性参数。

use clap::Parser;

/// 顶层 CLI 入口
#[derive(Parser, Debug)]
#[command(name = "swallow", about = "交互式 Vue3 前端项目脚手架", version)]
pub(crate) struct Cli {}
