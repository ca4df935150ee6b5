//! 提交数据模型
//!
//! 表示用户在提交页选择的简历来源（上传文件或 URL）

use bytes::Bytes;
use std::fmt::Display;

/// 唯一允许的上传文件类型
pub const PDF_MIME: &str = "application/pdf";

/// 表单中简历文件的字段名
pub const RESUME_FIELD: &str = "resume";

/// 表单中蜜罐字段的字段名
pub const HONEYPOT_FIELD: &str = "name";

/// 用户选择的单个文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Bytes,
}

impl SelectedFile {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.mime == PDF_MIME
    }
}

/// 上传用的表单载荷
///
/// 只包含一个 PDF 文件和蜜罐字段，构造后不可修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    resume: SelectedFile,
    honeypot: String,
}

impl FilePayload {
    /// 构造载荷，非 PDF 文件返回 None
    pub fn from_pdf(resume: SelectedFile) -> Option<Self> {
        if !resume.is_pdf() {
            return None;
        }
        Some(Self {
            resume,
            honeypot: String::new(),
        })
    }

    pub fn resume(&self) -> &SelectedFile {
        &self.resume
    }

    pub fn honeypot(&self) -> &str {
        &self.honeypot
    }

    /// 转换为 multipart 表单
    pub fn to_multipart(&self) -> reqwest::Result<reqwest::multipart::Form> {
        let part = reqwest::multipart::Part::bytes(self.resume.bytes.to_vec())
            .file_name(self.resume.file_name.clone())
            .mime_str(&self.resume.mime)?;
        Ok(reqwest::multipart::Form::new()
            .part(RESUME_FIELD, part)
            .text(HONEYPOT_FIELD, self.honeypot.clone()))
    }
}

/// 提交页和评分页之间共享的表单状态
///
/// `url` 和 `form_data` 至多只有一个有值
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionState {
    pub url: Option<String>,
    pub form_data: Option<FilePayload>,
}

impl SubmissionState {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            form_data: None,
        }
    }

    pub fn with_form_data(form_data: FilePayload) -> Self {
        Self {
            url: None,
            form_data: Some(form_data),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.form_data.is_none()
    }
}

/// 评分请求的输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradeInput {
    Url(String),
    FormData(FilePayload),
}

impl GradeInput {
    /// 按 URL 提交时返回 URL
    pub fn url(&self) -> Option<&str> {
        match self {
            GradeInput::Url(url) => Some(url),
            GradeInput::FormData(_) => None,
        }
    }
}

impl Display for GradeInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradeInput::Url(url) => write!(f, "[URL {}]", url),
            GradeInput::FormData(payload) => write!(
                f,
                "[文件 {} ({} 字节)]",
                payload.resume.file_name,
                payload.resume.bytes.len()
            ),
        }
    }
}
