//! 领域错误类型

/// 编辑与校验错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("{0} required")]
    MissingField(&'static str),
    #[error("controller must have at least one channel")]
    NoChannels,
    #[error("controller must retain at least one channel")]
    LastChannel,
    #[error("channel not found: {0}")]
    ChannelNotFound(String),
}
