mod cli;
mod commands;
mod fetch;
mod prompt;
mod registry;
mod rewrite;
mod staging;

use clap::Parser;
use console::style;

fn main() {
    let cli = cli::Cli::parse();
    if let Err(e) = commands::run(cli) {
        // 失败仅打印本地化消息，退出码保持默认
        eprintln!("{} {:#}", style("项目创建失败:").red(), e);
    }
}
