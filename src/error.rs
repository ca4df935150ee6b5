use thiserror::Error;

/// 非 2xx 且服务器没有给出 `error` 字段时的通用提示
pub const GENERIC_GRADE_ERROR: &str = "Hubo un error inesperado";

/// 项目分析失败且服务器没有给出 `message` 字段时的通用提示
pub const GENERIC_ANALYSIS_ERROR: &str = "Error analyzing project";

/// 粘贴的 URL 格式不正确时展示给用户的提示
pub const MALFORMED_URL_MESSAGE: &str =
    "El URL tiene que empezar con 'https' y terminar con 'pdf'";

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 客户端校验错误（不会发出网络请求）
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 请求已被取消（组件卸载或新请求开始）
    #[error("请求已取消: {key}")]
    Cancelled { key: String },
}

/// 客户端校验错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 粘贴的 URL 不是 https 开头 / .pdf 结尾
    #[error("El URL tiene que empezar con 'https' y terminar con 'pdf'")]
    MalformedUrl { input: String },
    /// 没有选择文件
    #[error("没有选择文件")]
    NoFileSelected,
    /// 未知的示例字母
    #[error("未知的示例: {letter}")]
    UnknownExample { letter: String },
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败（连接失败、超时等）
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务器返回非 2xx，message 已经从响应体中提取
    #[error("{message}")]
    BadResponse {
        endpoint: String,
        status: u16,
        message: String,
    },
    /// 响应体缺少必需字段或不是合法 JSON
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 配置值不合法
    #[error("配置项 {field} 不合法: {reason}")]
    InvalidValue { field: String, reason: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建服务器错误响应
    pub fn bad_response(endpoint: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        AppError::Api(ApiError::BadResponse {
            endpoint: endpoint.into(),
            status,
            message: message.into(),
        })
    }

    /// 创建 JSON 解析错误
    pub fn json_parse_failed(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 展示给用户的错误信息
    ///
    /// 服务器错误直接显示服务器给出的文字，传输层错误统一显示通用提示
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(e) => e.to_string(),
            AppError::Api(ApiError::BadResponse { message, .. }) => message.clone(),
            AppError::Api(_) | AppError::Config(_) | AppError::Cancelled { .. } => {
                GENERIC_GRADE_ERROR.to_string()
            }
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_url_message() {
        let err = ValidationError::MalformedUrl {
            input: "http://x.pdf".to_string(),
        };
        assert_eq!(err.to_string(), MALFORMED_URL_MESSAGE);
    }

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = AppError::bad_response("/api/grade", 400, "bad file");
        assert_eq!(err.user_message(), "bad file");
        assert_eq!(err.to_string(), "API错误: bad file");
    }

    #[test]
    fn test_user_message_falls_back_for_cancelled() {
        let err = AppError::Cancelled {
            key: "resume-check".to_string(),
        };
        assert_eq!(err.user_message(), GENERIC_GRADE_ERROR);
    }
}
