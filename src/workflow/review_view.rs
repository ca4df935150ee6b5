//! 评分页展示模型
//!
//! 根据请求状态计算页面上每个区块是否显示，不涉及样式

use crate::models::examples::is_example_path;
use crate::models::{Grade, GradeInput, MutationRecord, MutationStatus};
use std::fmt::Display;

/// 请求进行中的提示文字
pub const PROGRESS_MESSAGE: &str = "El proceso puede tardar un hasta 2 minutos...";

/// 示例简历的说明文字
pub const ATTRIBUTION_NOTE: &str =
    "Este resume fue elaborado en Interview Ready con la siguiente guía";

/// 标记颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagColor {
    Red,
    Yellow,
}

impl FlagColor {
    fn label_prefix(self) -> &'static str {
        match self {
            FlagColor::Red => "Red flag",
            FlagColor::Yellow => "Yellow flag",
        }
    }
}

/// 一组标记
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagBlock {
    pub color: FlagColor,
    pub label: String,
    pub flags: Vec<String>,
}

impl FlagBlock {
    /// 列表为空时不显示该区块
    pub fn build(color: FlagColor, flags: &[String]) -> Option<Self> {
        if flags.is_empty() {
            return None;
        }
        let suffix = if flags.len() > 1 { "s" } else { "" };
        Some(Self {
            color,
            label: format!("{}{}", color.label_prefix(), suffix),
            flags: flags.to_vec(),
        })
    }
}

/// 评分页展示模型
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewView {
    pub status: MutationStatus,
    /// 为 None 时显示空的分数占位
    pub score: Option<Grade>,
    pub show_skeleton: bool,
    pub progress_message: Option<&'static str>,
    pub attribution_note: Option<&'static str>,
    pub red_flags: Option<FlagBlock>,
    pub yellow_flags: Option<FlagBlock>,
    /// "Probá otra vez" 链接和反馈入口
    pub show_actions: bool,
    pub feedback_enabled: bool,
    pub feedback_open: bool,
}

impl ReviewView {
    /// 根据请求记录计算展示模型
    pub fn build(source: Option<&GradeInput>, record: Option<&MutationRecord>, feedback_open: bool) -> Self {
        let status = record.map(|r| r.status).unwrap_or(MutationStatus::Idle);
        let pending = status.is_pending();
        let data = record.and_then(|r| r.data.as_ref());
        let is_example = source
            .and_then(GradeInput::url)
            .map(is_example_path)
            .unwrap_or(false);
        let feedback_enabled = status == MutationStatus::Success && data.is_some();

        Self {
            status,
            score: data.map(|d| d.grade.clone()),
            show_skeleton: pending,
            progress_message: pending.then_some(PROGRESS_MESSAGE),
            attribution_note: (!pending && is_example).then_some(ATTRIBUTION_NOTE),
            red_flags: data.and_then(|d| FlagBlock::build(FlagColor::Red, &d.red_flags)),
            yellow_flags: data.and_then(|d| FlagBlock::build(FlagColor::Yellow, &d.yellow_flags)),
            show_actions: !pending,
            feedback_enabled,
            feedback_open: feedback_open && feedback_enabled,
        }
    }
}

impl Display for ReviewView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "El Puntaje de tu CV")?;
        match &self.score {
            Some(grade) => writeln!(f, "  Grade: {}", grade)?,
            None => writeln!(f, "  Grade: -")?,
        }
        if let Some(message) = self.progress_message {
            writeln!(f, "  ● {}", message)?;
        }
        if let Some(note) = self.attribution_note {
            writeln!(f, "  {}", note)?;
        }
        for block in [&self.red_flags, &self.yellow_flags].into_iter().flatten() {
            writeln!(f, "  {}:", block.label)?;
            for flag in &block.flags {
                writeln!(f, "    - {}", flag)?;
            }
        }
        Ok(())
    }
}
