use crate::clients::{AnalysisClient, GradeClient};
use crate::config::Config;
use crate::infrastructure::navigator::query_url;
use crate::infrastructure::{AnalyticsSink, HistoryNavigator, HttpClient, TracingAnalytics, INTAKE_ROUTE};
use crate::models::submission::PDF_MIME;
use crate::models::{RepoOwner, SelectedFile, SelectedRepo};
use crate::orchestrator::GradingOrchestrator;
use crate::services::{IntakeForm, IntakeOutcome, IntakeService, PasteEvent, ProjectAnalysisQuery};
use crate::state::{FormStateStore, MutationRegistry};
use crate::utils::logging;
use crate::workflow::{MountOutcome, ReviewController};
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// 命令行指令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 评分一份简历：示例字母、https URL 或本地 PDF 路径
    Grade(String),
    /// 分析一个仓库
    Analyze {
        owner: String,
        repo: String,
        token: String,
    },
}

impl Command {
    /// 从命令行参数解析（不含程序名）
    pub fn parse(args: &[String]) -> Option<Self> {
        match args {
            [cmd, owner, repo, token] if cmd == "analyze" => Some(Command::Analyze {
                owner: owner.clone(),
                repo: repo.clone(),
                token: token.clone(),
            }),
            [source] => Some(Command::Grade(source.clone())),
            _ => None,
        }
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    http: HttpClient,
    store: FormStateStore,
    registry: Arc<MutationRegistry>,
    navigator: Arc<HistoryNavigator>,
    analytics: Arc<dyn AnalyticsSink>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate()?;
        logging::init_log_file(&config.output_log_file)?;
        logging::log_startup(&config.api_base_url, config.grade_timeout_secs);

        let http = HttpClient::new(&config)?;

        Ok(Self {
            config,
            http,
            store: FormStateStore::new(),
            registry: MutationRegistry::new(),
            navigator: Arc::new(HistoryNavigator::starting_at(INTAKE_ROUTE)),
            analytics: Arc::new(TracingAnalytics),
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Grade(source) => self.grade(&source).await,
            Command::Analyze { owner, repo, token } => self.analyze(owner, repo, &token).await,
        }
    }

    /// 提交页 → 评分页完整流程
    async fn grade(&self, source: &str) -> Result<()> {
        let mut intake = IntakeService::new(self.store.clone(), self.registry.clone(), self.navigator.clone());

        let outcome = if source.len() == 1 {
            intake.submit_example(source)?
        } else if source.starts_with("http") {
            let mut event = PasteEvent::with_text(source);
            intake.on_paste(&mut event)?
        } else {
            let file = load_file(Path::new(source)).await?;
            intake.on_file_input(IntakeForm {
                resume: Some(file),
                name: String::new(),
            })?
        };

        let IntakeOutcome::Navigated(route) = outcome else {
            warn!("⚠️ 输入未被接受: {}", source);
            return Ok(());
        };

        let orchestrator = GradingOrchestrator::new(
            Arc::new(GradeClient::new(self.http.clone(), &self.config)),
            self.registry.clone(),
            self.analytics.clone(),
            self.navigator.clone(),
        );
        let mut review = ReviewController::new(orchestrator, self.store.clone(), self.navigator.clone());

        if review.mount(query_url(&route).as_deref()) == MountOutcome::Redirected {
            return Ok(());
        }
        info!("⏳ {}", crate::workflow::review_view::PROGRESS_MESSAGE);

        match review.wait().await {
            Some(Ok(_)) => info!("\n{}", review.view()),
            Some(Err(e)) => {
                warn!("❌ 评分失败: {}", e);
                if let Some(banner) = intake.banner() {
                    warn!("提交页提示: {}", banner);
                }
            }
            None => {}
        }
        info!("🧭 导航记录: {:?}", self.navigator.history());
        Ok(())
    }

    /// 项目分析流程
    async fn analyze(&self, owner: String, repo: String, token: &str) -> Result<()> {
        let query = ProjectAnalysisQuery::new(Arc::new(AnalysisClient::new(self.http.clone())), &self.config);
        let selected = SelectedRepo {
            owner: RepoOwner {
                avatar_url: format!("https://github.com/{}.png", owner),
                html_url: format!("https://github.com/{}", owner),
                login: owner,
            },
            name: repo,
        };

        match query.trigger(Some(&selected), token).await? {
            Some(result) => {
                let analysis = &result.analysis;
                info!("📊 {}/{} 评分: {}", selected.owner.login, selected.name, analysis.grade);
                info!("{}", logging::truncate_text(&analysis.summary, 200));
                info!(
                    "red {} / yellow {} / green {}",
                    analysis.red_flags.len(),
                    analysis.yellow_flags.len(),
                    analysis.green_flags.len()
                );
            }
            None => warn!("⚠️ 没有选中仓库"),
        }
        Ok(())
    }
}

/// 读取本地文件，按扩展名判断类型
async fn load_file(path: &Path) -> Result<SelectedFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("无法读取文件: {}", path.display()))?;
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    let mime = if is_pdf { PDF_MIME } else { "application/octet-stream" };
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "resume.pdf".to_string());
    Ok(SelectedFile::new(file_name, mime, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(Command::parse(&args(&["s"])), Some(Command::Grade("s".to_string())));
        assert_eq!(
            Command::parse(&args(&["analyze", "octo", "demo", "t"])),
            Some(Command::Analyze {
                owner: "octo".to_string(),
                repo: "demo".to_string(),
                token: "t".to_string(),
            })
        );
        assert_eq!(Command::parse(&args(&[])), None);
        assert_eq!(Command::parse(&args(&["a", "b"])), None);
    }

    #[tokio::test]
    async fn test_load_file_detects_pdf() {
        let path = std::env::temp_dir().join(format!("resume_checker_{}.PDF", std::process::id()));
        tokio::fs::write(&path, b"%PDF-1.4").await.unwrap();
        let file = load_file(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.ok();

        assert!(file.is_pdf());
        assert_eq!(file.bytes.as_ref(), b"%PDF-1.4");
    }
}
