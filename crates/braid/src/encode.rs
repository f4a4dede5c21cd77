//! 端序感知的定宽整数编码原语。
//!
//! 每个编码器只做移位取掩码的字节拆解，并经由 `singleton` + `append` 发射，
//! 正确性仅取决于拆解逻辑本身，与缓冲机制完全解耦。

use crate::builder::Builder;

/// 按大端序（最高有效字节在前）发射 `value` 的低 `width` 个字节。
fn big_endian(value: u64, width: u32) -> Builder {
    let mut out = Builder::new();
    for index in (0..width).rev() {
        out = out.append(Builder::singleton((value >> (index * 8)) as u8));
    }
    out
}

/// 按小端序（最低有效字节在前）发射 `value` 的低 `width` 个字节。
fn little_endian(value: u64, width: u32) -> Builder {
    let mut out = Builder::new();
    for index in 0..width {
        out = out.append(Builder::singleton((value >> (index * 8)) as u8));
    }
    out
}

/// 单字节编码，端序无关。
#[must_use]
pub fn put_u8(value: u8) -> Builder {
    Builder::singleton(value)
}

/// 大端序编码 16 位无符号整数。
#[must_use]
pub fn put_u16_be(value: u16) -> Builder {
    big_endian(u64::from(value), 2)
}

/// 小端序编码 16 位无符号整数。
#[must_use]
pub fn put_u16_le(value: u16) -> Builder {
    little_endian(u64::from(value), 2)
}

/// 大端序编码 32 位无符号整数。
#[must_use]
pub fn put_u32_be(value: u32) -> Builder {
    big_endian(u64::from(value), 4)
}

/// 小端序编码 32 位无符号整数。
#[must_use]
pub fn put_u32_le(value: u32) -> Builder {
    little_endian(u64::from(value), 4)
}

/// 大端序编码 64 位无符号整数。
#[must_use]
pub fn put_u64_be(value: u64) -> Builder {
    big_endian(value, 8)
}

/// 小端序编码 64 位无符号整数。
#[must_use]
pub fn put_u64_le(value: u64) -> Builder {
    little_endian(value, 8)
}
