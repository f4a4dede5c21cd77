use alloc::{boxed::Box, sync::Arc, vec::Vec};
use core::fmt;

use bytes::Bytes;

use crate::{config::BuilderConfig, drive::ChunkStream};

/// 可组合的不可变构建器：表示一段“待执行的字节写入序列”。
///
/// # 设计动机（Why）
/// - 朴素的构建器在拼接时立即搬运字节，`append` 退化为 O(n)；本类型把写入
///   序列表达为显式标签树，拼接只装箱两个子树，成本与两侧已积累的输出
///   规模无关。
/// - 所有写入动作推迟到驱动阶段执行：一次线性遍历把树解释为 chunk 序列，
///   消费端可以边驱动边拉取。
///
/// # 契约说明（What）
/// - 构建器自身不持有缓冲，也没有可变状态；克隆与跨线程共享都安全；
/// - 对同一构建器可驱动任意多次，每次获得独立的缓冲与逐位一致的输出；
/// - chunk 边界由缓冲策略决定，不构成语义承诺。
#[derive(Clone, Default)]
pub struct Builder {
    pub(crate) node: Node,
}

/// 标签树节点。`Append` 仅装箱左右子树，保证组合为 O(1)。
#[derive(Clone, Default)]
pub(crate) enum Node {
    #[default]
    Empty,
    Byte(u8),
    Append(Box<Node>, Box<Node>),
    Chunk(Bytes),
    ChunkSeq(Vec<Bytes>),
    Write {
        len: usize,
        fill: Arc<dyn Fn(&mut [u8]) + Send + Sync>,
    },
    Flush,
}

impl Builder {
    /// 空构建器：组合运算的单位元，不贡献任何输出。
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 单字节构建器。
    #[must_use]
    pub fn singleton(byte: u8) -> Self {
        Self {
            node: Node::Byte(byte),
        }
    }

    /// 顺序拼接两个构建器。
    ///
    /// - **复杂度**：O(1)，与两侧已表示的输出规模无关，不复制任何字节；
    /// - 与空构建器拼接直接返回另一侧，保持树形精简。
    #[must_use]
    pub fn append(self, other: Builder) -> Builder {
        if matches!(self.node, Node::Empty) {
            return other;
        }
        if matches!(other.node, Node::Empty) {
            return self;
        }
        Builder {
            node: Node::Append(Box::new(self.node), Box::new(other.node)),
        }
    }

    /// 把既有的不可变 chunk 原样接入输出序列。
    ///
    /// 驱动时先 flush 当前缓冲（若有已提交字节），随后直接透传该 chunk，
    /// 不向活动缓冲复制任何内容；空 chunk 依照统一策略被跳过。
    #[must_use]
    pub fn from_chunk(chunk: impl Into<Bytes>) -> Self {
        Self {
            node: Node::Chunk(chunk.into()),
        }
    }

    /// 把一串既有 chunk 依序接入输出序列，语义等同逐个 `from_chunk`。
    #[must_use]
    pub fn from_chunk_sequence<I>(chunks: I) -> Self
    where
        I: IntoIterator<Item = Bytes>,
    {
        Self {
            node: Node::ChunkSeq(chunks.into_iter().collect()),
        }
    }

    /// 显式 flush 点：驱动至此时，若缓冲存在已提交字节则立即冻结产出。
    ///
    /// 借此可以让输出提前对消费端可见，例如在写入一段完整报文后落盘。
    #[must_use]
    pub fn flush() -> Self {
        Self { node: Node::Flush }
    }

    /// 直接写入原语：预留恰好 `len` 字节的可写窗口并交给回调填充。
    ///
    /// # 契约说明（What）
    /// - 回调拿到的是长度恰为 `len` 的 `&mut [u8]` 窗口，越界写入在类型
    ///   层面即不可表达；
    /// - 驱动时增长策略先保证容量充足：单次 `len` 超过配置的 chunk 容量时
    ///   会分配恰好 `len` 字节的缓冲，随后的分配回落到默认容量；
    /// - 回调可能在多次驱动中被重复调用，因此要求 `Fn` 而非 `FnOnce`。
    #[must_use]
    pub fn write_with<F>(len: usize, fill: F) -> Self
    where
        F: Fn(&mut [u8]) + Send + Sync + 'static,
    {
        Self {
            node: Node::Write {
                len,
                fill: Arc::new(fill),
            },
        }
    }

    /// 以默认配置驱动构建器，返回前向拉取的 chunk 流。
    #[must_use]
    pub fn run(&self) -> ChunkStream {
        self.run_with(BuilderConfig::default())
    }

    /// 以指定配置驱动构建器。
    ///
    /// 每次调用分配独立的初始缓冲；多次驱动互不干扰，输出逐位一致。
    #[must_use]
    pub fn run_with(&self, config: BuilderConfig) -> ChunkStream {
        ChunkStream::new(self.node.clone(), config)
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder").field("node", &self.node).finish()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Empty => f.write_str("Empty"),
            Node::Byte(byte) => f.debug_tuple("Byte").field(byte).finish(),
            Node::Append(left, right) => {
                f.debug_tuple("Append").field(left).field(right).finish()
            }
            Node::Chunk(chunk) => f.debug_struct("Chunk").field("len", &chunk.len()).finish(),
            Node::ChunkSeq(chunks) => f
                .debug_struct("ChunkSeq")
                .field("chunks", &chunks.len())
                .finish(),
            Node::Write { len, .. } => f.debug_struct("Write").field("len", len).finish(),
            Node::Flush => f.write_str("Flush"),
        }
    }
}
