use alloc::{collections::VecDeque, vec, vec::Vec};

use bytes::Bytes;
use tracing::trace;

use crate::{buffer::Buffer, builder::Node, config::BuilderConfig};

/// 驱动一个构建器得到的前向拉取 chunk 流。
///
/// # 设计动机（Why）
/// - 输出是“惰性的有限 chunk 序列”：消费端每次 `next()` 只推进到下一个
///   可见 chunk，无需等待整棵树驱动完毕，即可把前缀写往 socket 或文件。
///
/// # 结构设计（How）
/// - `stack`：解释器的显式栈，初始为 `[Flush, root]`——栈底的收尾 flush
///   保证已提交但尚未冻结的字节最终进入输出；
/// - `ready`：就绪队列。单个节点最多同时产出两个 chunk（透传 chunk 前
///   需要先 flush 活动缓冲），因此需要一个小队列做缓冲；
/// - `buffer`：当前活动缓冲，由本次驱动独占持有并沿解释过程向前传递。
///
/// # 契约说明（What）
/// - 单遍、不可重放：重新观察输出需对构建器再次 `run`；
/// - 序列有限，总字节数等于构建器表示的全部写入；
/// - 空 chunk 永不出现在输出中。
pub struct ChunkStream {
    stack: Vec<Node>,
    ready: VecDeque<Bytes>,
    buffer: Buffer,
    config: BuilderConfig,
}

impl ChunkStream {
    pub(crate) fn new(root: Node, config: BuilderConfig) -> Self {
        Self {
            stack: vec![Node::Flush, root],
            ready: VecDeque::new(),
            buffer: Buffer::allocate(config.chunk_size()),
            config,
        }
    }

    /// 增长策略：容量不足时先 flush 当前缓冲，再按 `max(needed, chunk_size)`
    /// 分配新缓冲。超大写入得到恰好匹配的容量，下一次分配回落到默认值。
    fn ensure_free(&mut self, needed: usize) {
        if self.buffer.remaining() >= needed {
            return;
        }
        if let Some(chunk) = self.buffer.flush() {
            self.ready.push_back(chunk);
        }
        self.buffer = Buffer::allocate(needed.max(self.config.chunk_size()));
    }

    fn flush_into_ready(&mut self) {
        if let Some(chunk) = self.buffer.flush() {
            self.ready.push_back(chunk);
        }
    }

    /// 将整个流展平为一段连续字节，便于不关心分块的调用方。
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        let mut out = Vec::new();
        for chunk in self {
            out.extend_from_slice(&chunk);
        }
        out
    }
}

impl Iterator for ChunkStream {
    type Item = Bytes;

    fn next(&mut self) -> Option<Bytes> {
        loop {
            if let Some(chunk) = self.ready.pop_front() {
                return Some(chunk);
            }
            let Some(node) = self.stack.pop() else {
                trace!("构建器驱动完成");
                return None;
            };
            match node {
                Node::Empty => {}
                Node::Byte(byte) => {
                    self.ensure_free(1);
                    self.buffer.write_n(1, |window| window[0] = byte);
                }
                Node::Append(left, right) => {
                    self.stack.push(*right);
                    self.stack.push(*left);
                }
                Node::Chunk(chunk) => {
                    if !chunk.is_empty() {
                        self.flush_into_ready();
                        self.ready.push_back(chunk);
                    }
                }
                Node::ChunkSeq(chunks) => {
                    if chunks.iter().any(|chunk| !chunk.is_empty()) {
                        self.flush_into_ready();
                    }
                    for chunk in chunks {
                        if !chunk.is_empty() {
                            self.ready.push_back(chunk);
                        }
                    }
                }
                Node::Write { len, fill } => {
                    self.ensure_free(len);
                    self.buffer.write_n(len, &*fill);
                }
                Node::Flush => self.flush_into_ready(),
            }
        }
    }
}
