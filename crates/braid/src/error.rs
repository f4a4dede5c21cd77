use thiserror::Error;

/// 构建器配置与运行期的错误分类。
///
/// # 契约说明（What）
/// - 组合、flush、端序编码与驱动本身都是全函数，不会返回错误；
/// - 唯一可校验失败的入口是配置（见 [`crate::BuilderConfig::with_chunk_size`]）；
/// - 缓冲分配失败属于致命条件：driver 无法在丢失缓冲后有意义地续跑，
///   因此交由全局分配器中止进程，而非在此枚举中建模。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// chunk 容量必须为正数，否则增长策略无法取得可写窗口。
    #[error("非法的 chunk 容量：期望大于 0，实际请求 {requested}")]
    InvalidChunkSize {
        /// 调用方请求的容量值。
        requested: usize,
    },
}
