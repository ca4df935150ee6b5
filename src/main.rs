use anyhow::Result;
use resume_checker::app::{App, Command};
use resume_checker::config::Config;
use resume_checker::utils::logging;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = match std::env::var("RESUME_CHECKER_CONFIG") {
        Ok(path) => Config::from_toml_file(std::path::Path::new(&path))?,
        Err(_) => Config::from_env(),
    };

    // 初始化日志
    logging::init(config.verbose_logging);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = Command::parse(&args) else {
        warn!("用法: resume_checker <示例字母 | https://...pdf | 本地 PDF 路径>");
        warn!("      resume_checker analyze <owner> <repo> <token>");
        return Ok(());
    };

    // 初始化并运行应用
    App::initialize(config).await?.run(command).await?;

    Ok(())
}
