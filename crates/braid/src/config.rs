use crate::error::BuildError;

/// 每个缓冲预留的簿记开销（两个机器字），从名义容量中扣除，
/// 使缓冲连同分配器头部恰好落在整数页边界附近。
pub const CHUNK_OVERHEAD: usize = 2 * core::mem::size_of::<usize>();

/// 增长策略在未被更大写入需求覆盖时采用的默认缓冲容量。
///
/// 取值为 32 KiB 减去 [`CHUNK_OVERHEAD`]：足以摊销大量小写入的分配成本，
/// 同时为流式消费端保持可控的峰值内存。
pub const DEFAULT_CHUNK_SIZE: usize = 32 * 1024 - CHUNK_OVERHEAD;

/// 驱动一次构建所使用的缓冲配置。
///
/// # 设计动机（Why）
/// - 默认容量原本是实现内部的硬编码常量；将其显式化后，测试可以用
///   很小的容量触发分块边界，流式场景也可以按内存预算调优。
///
/// # 契约说明（What）
/// - `chunk_size` 恒为正数，由 [`BuilderConfig::with_chunk_size`] 在构造时校验；
/// - 单次写入请求超过 `chunk_size` 时，增长策略会按该写入的精确尺寸分配，
///   后续分配回落到 `chunk_size`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderConfig {
    chunk_size: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl BuilderConfig {
    /// 以指定的 chunk 容量构造配置。
    ///
    /// - **前置条件**：`chunk_size > 0`；
    /// - **错误**：容量为 0 时返回 [`BuildError::InvalidChunkSize`]。
    pub fn with_chunk_size(chunk_size: usize) -> Result<Self, BuildError> {
        if chunk_size == 0 {
            return Err(BuildError::InvalidChunkSize {
                requested: chunk_size,
            });
        }
        Ok(Self { chunk_size })
    }

    /// 返回当前配置的 chunk 容量。
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}
