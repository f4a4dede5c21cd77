//! `encoder_contract` 集成测试：聚焦端序编码原语与大输入稳定性。

use braid::{Builder, BuilderConfig, put_u8, put_u16_be, put_u16_le, put_u32_be, put_u32_le,
    put_u64_be, put_u64_le};

/// 16 位编码的字面值用例：大小端字节序互为镜像。
#[test]
fn u16_literal_layouts() {
    assert_eq!(put_u16_be(0x1234).run().into_vec(), [0x12, 0x34]);
    assert_eq!(put_u16_le(0x1234).run().into_vec(), [0x34, 0x12]);
}

/// 32 位编码的字面值用例。
#[test]
fn u32_literal_layouts() {
    assert_eq!(
        put_u32_be(0xDEAD_BEEF).run().into_vec(),
        [0xDE, 0xAD, 0xBE, 0xEF]
    );
    assert_eq!(
        put_u32_le(0xDEAD_BEEF).run().into_vec(),
        [0xEF, 0xBE, 0xAD, 0xDE]
    );
}

/// 64 位编码的字面值用例。
#[test]
fn u64_literal_layouts() {
    assert_eq!(
        put_u64_be(0x0102_0304_0506_0708).run().into_vec(),
        [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]
    );
    assert_eq!(
        put_u64_le(0x0102_0304_0506_0708).run().into_vec(),
        [0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]
    );
}

/// 单字节编码与 `singleton` 等价。
#[test]
fn u8_matches_singleton() {
    for byte in [0x00, 0x7F, 0x80, 0xFF] {
        assert_eq!(put_u8(byte).run().into_vec(), [byte]);
    }
}

/// 边界值：全零与全一在两种端序下保持定宽输出。
#[test]
fn extreme_values_keep_fixed_width() {
    assert_eq!(put_u64_be(0).run().into_vec(), [0; 8]);
    assert_eq!(put_u64_le(u64::MAX).run().into_vec(), [0xFF; 8]);
    assert_eq!(put_u16_be(0x00FF).run().into_vec(), [0x00, 0xFF]);
}

/// 大输入稳定性：一万个连续 32 位整数展平后恰为四万字节，
/// 且内容与逐个大端编码一致、与 chunk 数量无关。
#[test]
fn ten_thousand_u32_values_flatten_to_forty_thousand_bytes() {
    let builder = (0..10_000u32).fold(Builder::new(), |acc, value| acc.append(put_u32_be(value)));

    let flattened = builder.run().into_vec();
    assert_eq!(flattened.len(), 40_000);
    assert_eq!(&flattened[..4], [0, 0, 0, 0]);
    assert_eq!(&flattened[4..8], [0, 0, 0, 1]);
    assert_eq!(&flattened[39_996..], 9_999u32.to_be_bytes());

    // chunk 容量只影响切分方式，不影响展平内容。
    let tiny = BuilderConfig::with_chunk_size(7).expect("容量合法");
    assert_eq!(builder.run_with(tiny).into_vec(), flattened);
}
