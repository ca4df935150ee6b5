//! 评分来源解析
//!
//! 优先级：查询参数 `url` → 已保存的 URL → 已保存的文件 → 无（跳回提交页）

use crate::models::{GradeInput, SubmissionState};

/// 解析本次评分使用的来源
///
/// 空字符串视为没有值
pub fn resolve_source(query_url: Option<&str>, stored: &SubmissionState) -> Option<GradeInput> {
    if let Some(url) = query_url.filter(|url| !url.is_empty()) {
        return Some(GradeInput::Url(url.to_string()));
    }
    if let Some(url) = stored.url.as_deref().filter(|url| !url.is_empty()) {
        return Some(GradeInput::Url(url.to_string()));
    }
    stored
        .form_data
        .as_ref()
        .map(|payload| GradeInput::FormData(payload.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submission::PDF_MIME;
    use crate::models::{FilePayload, SelectedFile};

    fn payload() -> FilePayload {
        FilePayload::from_pdf(SelectedFile::new("cv.pdf", PDF_MIME, vec![1u8])).unwrap()
    }

    #[test]
    fn test_query_param_wins() {
        let stored = SubmissionState::with_url("https://stored/cv.pdf");
        assert_eq!(
            resolve_source(Some("public/s_resume.pdf"), &stored),
            Some(GradeInput::Url("public/s_resume.pdf".to_string()))
        );
    }

    #[test]
    fn test_stored_url_before_file() {
        let stored = SubmissionState {
            url: Some("https://stored/cv.pdf".to_string()),
            form_data: Some(payload()),
        };
        assert_eq!(
            resolve_source(None, &stored),
            Some(GradeInput::Url("https://stored/cv.pdf".to_string()))
        );
    }

    #[test]
    fn test_stored_file() {
        let stored = SubmissionState::with_form_data(payload());
        assert_eq!(resolve_source(None, &stored), Some(GradeInput::FormData(payload())));
    }

    #[test]
    fn test_nothing_resolves_to_none() {
        assert_eq!(resolve_source(None, &SubmissionState::default()), None);
        assert_eq!(resolve_source(Some(""), &SubmissionState::with_url("")), None);
    }
}
