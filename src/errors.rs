use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QryftError {
    Persistence(String),
    Conflict(String),
    DuplicateSlug(String),
    Validation(String),
    NotFound(String),
    Serialization(String),
    QrRender(String),
    Config(String),
}

impl QryftError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            QryftError::Persistence(_) => "E001",
            QryftError::Conflict(_) => "E002",
            QryftError::DuplicateSlug(_) => "E003",
            QryftError::Validation(_) => "E004",
            QryftError::NotFound(_) => "E005",
            QryftError::Serialization(_) => "E006",
            QryftError::QrRender(_) => "E007",
            QryftError::Config(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            QryftError::Persistence(_) => "Persistence Error",
            QryftError::Conflict(_) => "Conflict",
            QryftError::DuplicateSlug(_) => "Duplicate Slug",
            QryftError::Validation(_) => "Validation Error",
            QryftError::NotFound(_) => "Resource Not Found",
            QryftError::Serialization(_) => "Serialization Error",
            QryftError::QrRender(_) => "QR Render Error",
            QryftError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            QryftError::Persistence(msg)
            | QryftError::Conflict(msg)
            | QryftError::DuplicateSlug(msg)
            | QryftError::Validation(msg)
            | QryftError::NotFound(msg)
            | QryftError::Serialization(msg)
            | QryftError::QrRender(msg)
            | QryftError::Config(msg) => msg,
        }
    }

    /// HTTP 状态码映射
    #[cfg(feature = "server")]
    pub fn http_status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            QryftError::Validation(_) => StatusCode::BAD_REQUEST,
            QryftError::NotFound(_) => StatusCode::NOT_FOUND,
            QryftError::Conflict(_) | QryftError::DuplicateSlug(_) => StatusCode::CONFLICT,
            QryftError::Persistence(_)
            | QryftError::Serialization(_)
            | QryftError::QrRender(_)
            | QryftError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于终端）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for QryftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for QryftError {}

// 便捷的构造函数
impl QryftError {
    pub fn persistence<T: Into<String>>(msg: T) -> Self {
        QryftError::Persistence(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        QryftError::Conflict(msg.into())
    }

    pub fn duplicate_slug<T: Into<String>>(msg: T) -> Self {
        QryftError::DuplicateSlug(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        QryftError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        QryftError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        QryftError::Serialization(msg.into())
    }

    pub fn qr_render<T: Into<String>>(msg: T) -> Self {
        QryftError::QrRender(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        QryftError::Config(msg.into())
    }
}

impl From<std::io::Error> for QryftError {
    fn from(err: std::io::Error) -> Self {
        QryftError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for QryftError {
    fn from(err: serde_json::Error) -> Self {
        QryftError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for QryftError {
    fn from(err: config::ConfigError) -> Self {
        QryftError::Config(err.to_string())
    }
}

impl From<qrcode::types::QrError> for QryftError {
    fn from(err: qrcode::types::QrError) -> Self {
        QryftError::QrRender(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, QryftError>;
