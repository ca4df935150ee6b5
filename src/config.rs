use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 评分服务的基础 URL（`/api/grade`、`/api/analyze/project` 拼在后面）
    pub api_base_url: String,
    /// 评分请求超时（秒），页面文案提示最长两分钟
    pub grade_timeout_secs: u64,
    /// 项目分析缓存的新鲜期（秒）
    pub analysis_stale_secs: u64,
    /// 项目分析失败后的最大重试次数
    pub analysis_max_retries: u32,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            grade_timeout_secs: 150,
            analysis_stale_secs: 5 * 60,
            analysis_max_retries: 2,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(default.api_base_url),
            grade_timeout_secs: std::env::var("GRADE_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.grade_timeout_secs),
            analysis_stale_secs: std::env::var("ANALYSIS_STALE_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.analysis_stale_secs),
            analysis_max_retries: std::env::var("ANALYSIS_MAX_RETRIES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.analysis_max_retries),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }

    /// 从 TOML 文件加载配置，缺失的字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: display.clone(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: display,
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 检查配置值
    pub fn validate(&self) -> AppResult<()> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url".to_string(),
                reason: format!("必须以 http:// 或 https:// 开头: {}", self.api_base_url),
            }
            .into());
        }
        if self.grade_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "grade_timeout_secs".to_string(),
                reason: "不能为 0".to_string(),
            }
            .into());
        }
        Ok(())
    }

    pub fn grade_timeout(&self) -> Duration {
        Duration::from_secs(self.grade_timeout_secs)
    }

    pub fn analysis_stale_time(&self) -> Duration {
        Duration::from_secs(self.analysis_stale_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.analysis_stale_time(), Duration::from_secs(300));
        assert_eq!(config.analysis_max_retries, 2);
        assert_eq!(config.grade_timeout(), Duration::from_secs(150));
    }

    #[test]
    fn test_from_toml_file_partial() {
        let path = std::env::temp_dir().join(format!("resume_checker_cfg_{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "api_base_url = \"https://grader.test\"").unwrap();
        writeln!(file, "grade_timeout_secs = 30").unwrap();
        drop(file);

        let config = Config::from_toml_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.api_base_url, "https://grader.test");
        assert_eq!(config.grade_timeout_secs, 30);
        assert_eq!(config.analysis_stale_secs, 300);
    }

    #[test]
    fn test_validate_rejects_bad_scheme() {
        let config = Config {
            api_base_url: "ftp://nope".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
