//! 简历提交服务 - 提交页
//!
//! 负责接收拖拽、文件选择、粘贴和示例四种输入，校验后写入共享表单状态并跳转到评分页

use crate::error::ValidationError;
use crate::infrastructure::navigator::review_route_with_url;
use crate::infrastructure::{Navigator, REVIEW_ROUTE};
use crate::models::examples::find_example;
use crate::models::{FilePayload, SelectedFile, SubmissionState};
use crate::state::{FormStateStore, MutationRegistry, RESUME_CHECK_KEY};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 一次输入的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeOutcome {
    /// 已写入状态并跳转到该路由
    Navigated(String),
    /// 输入不符合要求，什么也没做
    Ignored,
    /// 蜜罐字段有值，静默丢弃
    Dropped,
}

/// 粘贴事件
#[derive(Debug, Clone, Default)]
pub struct PasteEvent {
    text: Option<String>,
    default_prevented: bool,
}

impl PasteEvent {
    pub fn new(text: Option<String>) -> Self {
        Self {
            text,
            default_prevented: false,
        }
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(Some(text.into()))
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// 提交页上的表单
#[derive(Debug, Clone, Default)]
pub struct IntakeForm {
    pub resume: Option<SelectedFile>,
    /// 隐藏的蜜罐字段，正常用户不会填写
    pub name: String,
}

/// 粘贴的 URL 必须以 https 开头、以 .pdf 结尾
pub fn is_valid_pasted_url(text: &str) -> bool {
    text.starts_with("https") && text.ends_with(".pdf")
}

/// 简历提交服务
pub struct IntakeService {
    store: FormStateStore,
    registry: Arc<MutationRegistry>,
    navigator: Arc<dyn Navigator>,
    honeypot: String,
    error: Option<ValidationError>,
}

impl IntakeService {
    pub fn new(store: FormStateStore, registry: Arc<MutationRegistry>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            store,
            registry,
            navigator,
            honeypot: String::new(),
            error: None,
        }
    }

    /// 更新蜜罐字段的值
    pub fn set_honeypot(&mut self, value: impl Into<String>) {
        self.honeypot = value.into();
    }

    fn honeypot_triggered(&self) -> bool {
        if self.honeypot.is_empty() {
            return false;
        }
        debug!("蜜罐字段有值，丢弃提交");
        true
    }

    /// 拖拽文件
    ///
    /// 只接受单个 PDF，多个文件或非 PDF 文件都会被拒绝
    pub fn on_drop(&mut self, files: Vec<SelectedFile>) -> IntakeOutcome {
        if self.honeypot_triggered() {
            return IntakeOutcome::Dropped;
        }
        if files.len() > 1 {
            warn!("一次只能上传一个文件，收到 {} 个", files.len());
            return IntakeOutcome::Ignored;
        }
        let Some(file) = files.into_iter().next() else {
            return IntakeOutcome::Ignored;
        };
        self.submit_file(file)
    }

    /// 通过文件选择框提交
    pub fn on_file_input(&mut self, form: IntakeForm) -> Result<IntakeOutcome, ValidationError> {
        if !form.name.is_empty() {
            self.honeypot = form.name;
        }
        if self.honeypot_triggered() {
            return Ok(IntakeOutcome::Dropped);
        }
        let Some(file) = form.resume else {
            return Err(self.fail(ValidationError::NoFileSelected));
        };
        Ok(self.submit_file(file))
    }

    /// 粘贴 URL
    ///
    /// 事件的默认行为总是被阻止
    pub fn on_paste(&mut self, event: &mut PasteEvent) -> Result<IntakeOutcome, ValidationError> {
        event.prevent_default();
        let Some(text) = event.text() else {
            return Ok(IntakeOutcome::Ignored);
        };
        if self.honeypot_triggered() {
            return Ok(IntakeOutcome::Dropped);
        }

        if !is_valid_pasted_url(text) {
            return Err(self.fail(ValidationError::MalformedUrl {
                input: text.to_string(),
            }));
        }

        let url = text.to_string();
        info!("📋 粘贴简历 URL: {}", url);
        self.store.write(SubmissionState::with_url(url));
        Ok(self.navigate(REVIEW_ROUTE.to_string()))
    }

    /// 点击示例按钮
    pub fn submit_example(&mut self, letter: &str) -> Result<IntakeOutcome, ValidationError> {
        if self.honeypot_triggered() {
            return Ok(IntakeOutcome::Dropped);
        }
        let Some(example) = find_example(letter) else {
            return Err(self.fail(ValidationError::UnknownExample {
                letter: letter.to_string(),
            }));
        };

        let url = example.path();
        info!("📄 使用示例简历: {} [{}] ({})", example.name, example.grade_label(), url);
        self.store.write(SubmissionState::with_url(url.clone()));
        Ok(self.navigate(review_route_with_url(&url)))
    }

    /// 横幅中显示的错误
    ///
    /// 本页的校验错误优先，其次是最近一次评分请求的错误
    pub fn banner(&self) -> Option<String> {
        self.error
            .as_ref()
            .map(|e| e.to_string())
            .or_else(|| self.registry.latest_error(RESUME_CHECK_KEY).map(|e| e.message))
    }

    fn submit_file(&mut self, file: SelectedFile) -> IntakeOutcome {
        let name = file.file_name.clone();
        let Some(payload) = FilePayload::from_pdf(file) else {
            warn!("忽略非 PDF 文件: {}", name);
            return IntakeOutcome::Ignored;
        };
        info!("📎 上传简历: {}", name);
        self.store.write(SubmissionState::with_form_data(payload));
        self.navigate(REVIEW_ROUTE.to_string())
    }

    fn navigate(&mut self, route: String) -> IntakeOutcome {
        self.error = None;
        self.navigator.push(&route);
        IntakeOutcome::Navigated(route)
    }

    fn fail(&mut self, error: ValidationError) -> ValidationError {
        warn!("输入校验失败: {}", error);
        self.error = Some(error.clone());
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MALFORMED_URL_MESSAGE;
    use crate::infrastructure::HistoryNavigator;
    use crate::models::submission::PDF_MIME;
    use crate::models::{MutationError, MutationOutcome};

    fn service() -> (IntakeService, FormStateStore, Arc<HistoryNavigator>, Arc<MutationRegistry>) {
        let store = FormStateStore::new();
        let navigator = Arc::new(HistoryNavigator::new());
        let registry = MutationRegistry::new();
        let service = IntakeService::new(store.clone(), registry.clone(), navigator.clone());
        (service, store, navigator, registry)
    }

    fn pdf() -> SelectedFile {
        SelectedFile::new("cv.pdf", PDF_MIME, b"%PDF".to_vec())
    }

    #[test]
    fn test_drop_pdf_navigates() {
        let (mut intake, store, navigator, _) = service();
        assert_eq!(intake.on_drop(vec![pdf()]), IntakeOutcome::Navigated(REVIEW_ROUTE.to_string()));
        assert!(store.read().form_data.is_some());
        assert_eq!(navigator.history(), vec![REVIEW_ROUTE.to_string()]);
    }

    #[test]
    fn test_non_pdf_never_reaches_store() {
        let (mut intake, store, navigator, _) = service();
        for mime in ["image/png", "text/plain", "application/octet-stream", ""] {
            let file = SelectedFile::new("cv", mime, vec![0u8]);
            assert_eq!(intake.on_drop(vec![file.clone()]), IntakeOutcome::Ignored);
            let form = IntakeForm {
                resume: Some(file),
                name: String::new(),
            };
            assert_eq!(intake.on_file_input(form), Ok(IntakeOutcome::Ignored));
        }
        assert!(store.read().is_empty());
        assert!(navigator.history().is_empty());
    }

    #[test]
    fn test_drop_rejects_multiple_and_empty() {
        let (mut intake, store, _, _) = service();
        assert_eq!(intake.on_drop(vec![pdf(), pdf()]), IntakeOutcome::Ignored);
        assert_eq!(intake.on_drop(vec![]), IntakeOutcome::Ignored);
        assert!(store.read().is_empty());
    }

    #[test]
    fn test_file_input_without_file_is_validation_error() {
        let (mut intake, _, navigator, _) = service();
        let err = intake.on_file_input(IntakeForm::default()).unwrap_err();
        assert_eq!(err, ValidationError::NoFileSelected);
        assert!(intake.banner().is_some());
        assert!(navigator.history().is_empty());
    }

    #[test]
    fn test_paste_validation() {
        let (mut intake, store, navigator, _) = service();
        for text in ["http://x.com/cv.pdf", "https://x.com/cv.docx", "cv.pdf", "", "https://x.com/cv.PDF"] {
            let mut event = PasteEvent::with_text(text);
            let err = intake.on_paste(&mut event).unwrap_err();
            assert!(event.default_prevented());
            assert_eq!(err.to_string(), MALFORMED_URL_MESSAGE);
        }
        assert_eq!(intake.banner().as_deref(), Some(MALFORMED_URL_MESSAGE));
        assert!(store.read().is_empty());
        assert!(navigator.history().is_empty());

        let mut event = PasteEvent::with_text("https://x.com/cv.pdf");
        assert_eq!(
            intake.on_paste(&mut event),
            Ok(IntakeOutcome::Navigated(REVIEW_ROUTE.to_string()))
        );
        assert_eq!(store.read().url.as_deref(), Some("https://x.com/cv.pdf"));
        assert!(intake.banner().is_none());
    }

    #[test]
    fn test_paste_without_clipboard_data_is_noop() {
        let (mut intake, store, _, _) = service();
        let mut event = PasteEvent::new(None);
        assert_eq!(intake.on_paste(&mut event), Ok(IntakeOutcome::Ignored));
        assert!(event.default_prevented());
        assert!(store.read().is_empty());
    }

    #[test]
    fn test_honeypot_drops_silently() {
        let (mut intake, store, navigator, _) = service();
        let form = IntakeForm {
            resume: Some(pdf()),
            name: "bot".to_string(),
        };
        assert_eq!(intake.on_file_input(form), Ok(IntakeOutcome::Dropped));

        intake.set_honeypot("bot");
        assert_eq!(intake.on_drop(vec![pdf()]), IntakeOutcome::Dropped);
        let mut event = PasteEvent::with_text("https://x.com/cv.pdf");
        assert_eq!(intake.on_paste(&mut event), Ok(IntakeOutcome::Dropped));
        assert_eq!(intake.submit_example("s"), Ok(IntakeOutcome::Dropped));

        assert!(store.read().is_empty());
        assert!(navigator.history().is_empty());
        assert!(intake.banner().is_none());
    }

    #[test]
    fn test_example_button() {
        let (mut intake, store, navigator, _) = service();
        assert_eq!(
            intake.submit_example("s"),
            Ok(IntakeOutcome::Navigated(
                "/resume-checker/review?url=public%2Fs_resume.pdf".to_string()
            ))
        );
        assert_eq!(store.read().url.as_deref(), Some("public/s_resume.pdf"));
        assert_eq!(
            navigator.current().as_deref(),
            Some("/resume-checker/review?url=public%2Fs_resume.pdf")
        );
        assert!(intake.submit_example("z").is_err());
    }

    #[test]
    fn test_banner_clears_when_newer_attempt_is_abandoned() {
        let (intake, _, _, registry) = service();
        let first = registry.start(RESUME_CHECK_KEY);
        registry.commit(
            &first,
            MutationOutcome::Error(MutationError {
                message: "bad file".to_string(),
            }),
        );
        assert_eq!(intake.banner().as_deref(), Some("bad file"));

        let second = registry.start(RESUME_CHECK_KEY);
        assert!(intake.banner().is_none());
        registry.cancel(&second);
        assert!(intake.banner().is_none());
    }

    #[test]
    fn test_banner_shows_error_from_registry() {
        let (intake, _, _, registry) = service();
        let handle = registry.start(RESUME_CHECK_KEY);
        registry.commit(
            &handle,
            MutationOutcome::Error(MutationError {
                message: "bad file".to_string(),
            }),
        );
        assert_eq!(intake.banner().as_deref(), Some("bad file"));
    }
}
