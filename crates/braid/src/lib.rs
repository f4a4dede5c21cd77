#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

//! # braid
//!
//! ## 模块定位（Why）
//! - **职责**：提供二进制序列化层底座所需的“分块字节流构建器”：大量细粒度写入
//!   （单字节、定长整数、既有字节块）以 O(1) 成本组合，驱动后产出一串不可变
//!   chunk，而非一次性的大块分配。
//! - **架构角色**：上层派生/编码设施只消费本 crate 的 `singleton`、`from_chunk`
//!   与端序原语；本 crate 不解析字节、不定义线上格式、不触碰 I/O 设备。
//! - **性能前提**：`append` 绝不复制字节，仅做 O(1) 的结构组合；逐字节写入经由
//!   缓冲摊销为 O(1)，消费端可在构建尚未完成时就开始拉取 chunk。
//!
//! ## 设计概要（How）
//! - `builder` 模块以显式标签树表达“待执行写入序列”，`append` 仅装箱两个子树；
//! - `buffer` 模块基于 `bytes::BytesMut` 实现窗口缓冲，flush 通过
//!   `split().freeze()` 零拷贝冻结已提交区间；
//! - `drive` 模块将标签树解释为前向拉取的 [`ChunkStream`]，一次线性遍历完成驱动；
//! - `encode` 模块在 `singleton`/`append` 之上实现大小端定宽整数编码；
//! - `config` 模块把默认缓冲容量（32 KiB 减去簿记开销）显式化为可配置项。
//!
//! ## 契约说明（What）
//! - 对同一 builder 的多次驱动彼此独立，输出逐位一致；
//! - `run(empty)` 产出空序列；`run(append(a, b))` 展平后等于两段输出的拼接；
//! - chunk 边界是缓冲策略的产物，不属于语义内容，调用方不得依赖具体切分。
//!
//! ## 风险提示（Trade-offs）
//! - 缓冲分配失败视为致命错误（由全局分配器中止），核心 API 不为其建模
//!   可恢复路径；
//! - 空 chunk 一律不进入输出序列，flush 与 `from_chunk` 共用同一规则。

extern crate alloc;

mod buffer;
mod builder;
mod config;
mod drive;
mod encode;
mod error;

pub use builder::Builder;
pub use config::{BuilderConfig, CHUNK_OVERHEAD, DEFAULT_CHUNK_SIZE};
pub use drive::ChunkStream;
pub use encode::{
    put_u8, put_u16_be, put_u16_le, put_u32_be, put_u32_le, put_u64_be, put_u64_le,
};
pub use error::BuildError;

/// 输出序列使用的不可变 chunk 类型，直接复用 `bytes::Bytes` 的引用计数视图。
pub use bytes::Bytes;
