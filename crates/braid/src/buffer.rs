use bytes::{Bytes, BytesMut};
use tracing::trace;

/// 驱动过程中独占持有的写入缓冲：一段定容内存加上“已提交/剩余”游标。
///
/// # 结构设计（How）
/// - `inner`：`BytesMut` 承载底层内存，其长度即本窗口内已提交的字节数；
/// - `capacity`：当前窗口的名义总容量，flush 冻结一段后随之收缩，
///   保证不变量 `used() + remaining() == capacity` 始终成立。
///
/// # 契约说明（What）
/// - 缓冲只被进行中的一次驱动独占访问，不存在并发写入者；
/// - flush 通过 `split().freeze()` 冻结已提交区间，游标越过该区间后
///   原内存不再被写入，因此冻结出的 [`Bytes`] 可安全共享且无需复制。
pub(crate) struct Buffer {
    inner: BytesMut,
    capacity: usize,
}

impl Buffer {
    /// 分配一块容量恰为 `capacity` 的新缓冲。分配失败由全局分配器中止，
    /// 属于致命条件而非可恢复错误。
    pub(crate) fn allocate(capacity: usize) -> Self {
        trace!(capacity, "分配新的构建缓冲");
        Self {
            inner: BytesMut::with_capacity(capacity),
            capacity,
        }
    }

    /// 自上次 flush 以来已提交的字节数。
    pub(crate) fn used(&self) -> usize {
        self.inner.len()
    }

    /// 当前窗口内仍可写入的字节数。
    pub(crate) fn remaining(&self) -> usize {
        self.capacity - self.inner.len()
    }

    /// 将已提交区间冻结为只读 chunk 并重置游标；窗口保留剩余容量。
    ///
    /// - 无已提交字节时不产出任何 chunk（空 chunk 一律不进入输出序列）；
    /// - 冻结不复制：`Bytes` 与剩余窗口共享同一块底层分配。
    pub(crate) fn flush(&mut self) -> Option<Bytes> {
        if self.used() == 0 {
            return None;
        }
        let frozen = self.inner.split().freeze();
        self.capacity -= frozen.len();
        trace!(
            len = frozen.len(),
            remaining = self.capacity,
            "冻结已提交字节为只读 chunk"
        );
        Some(frozen)
    }

    /// 直接写入原语：把一段长度恰为 `len` 的可写窗口交给回调，随后提交。
    ///
    /// # 前置条件
    /// - 调用方必须先通过增长策略证明 `remaining() >= len`，本函数不再做
    ///   运行期容量检查（debug 断言除外）。
    ///
    /// # 后置条件
    /// - 恰好新增 `len` 个已提交字节，内容与回调写入逐位一致；
    ///   外部观察不到部分写入的中间态。
    pub(crate) fn write_n(&mut self, len: usize, fill: impl FnOnce(&mut [u8])) {
        let committed = self.inner.len();
        let spare = self.inner.spare_capacity_mut();
        debug_assert!(
            len <= self.capacity - committed && len <= spare.len(),
            "write_n 的容量前提未成立：请求 {len}，剩余 {}",
            self.capacity - committed
        );
        // SAFETY：
        // 1. `spare` 是 `BytesMut` 尾部的未初始化空闲区，长度经上方断言
        //    且由调用方的 ensure_free 保证不小于 `len`，指针算术不越界；
        // 2. 先以 `write_bytes` 将前 `len` 字节置零，使该区间完成初始化，
        //    之后才将其视作 `&mut [u8]` 暴露给回调，不存在读取未初始化
        //    内存的路径；
        // 3. 回调返回后 `set_len` 仅把长度推进到已初始化的范围内。
        let window = unsafe {
            let ptr = spare.as_mut_ptr().cast::<u8>();
            ptr.write_bytes(0, len);
            core::slice::from_raw_parts_mut(ptr, len)
        };
        fill(window);
        // SAFETY：前 `committed + len` 字节均已初始化（见上）。
        unsafe { self.inner.set_len(committed + len) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_buffer_has_full_capacity() {
        let buffer = Buffer::allocate(64);
        assert_eq!(buffer.used(), 0);
        assert_eq!(buffer.remaining(), 64);
    }

    #[test]
    fn flush_on_empty_buffer_emits_nothing() {
        let mut buffer = Buffer::allocate(16);
        assert!(buffer.flush().is_none());
        assert_eq!(buffer.remaining(), 16);
    }

    #[test]
    fn write_then_flush_freezes_committed_range() {
        let mut buffer = Buffer::allocate(16);
        buffer.write_n(3, |window| window.copy_from_slice(b"abc"));
        assert_eq!(buffer.used(), 3);
        assert_eq!(buffer.remaining(), 13);

        let chunk = buffer.flush().expect("已提交字节应被冻结");
        assert_eq!(&chunk[..], b"abc");
        assert_eq!(buffer.used(), 0);
        assert_eq!(buffer.remaining(), 13);
    }

    #[test]
    fn window_continues_in_same_allocation_after_flush() {
        let mut buffer = Buffer::allocate(8);
        buffer.write_n(4, |window| window.copy_from_slice(b"head"));
        let first = buffer.flush().expect("第一段应冻结成功");
        buffer.write_n(4, |window| window.copy_from_slice(b"tail"));
        let second = buffer.flush().expect("第二段应冻结成功");

        assert_eq!(&first[..], b"head");
        assert_eq!(&second[..], b"tail");
        assert_eq!(buffer.remaining(), 0);
    }

    #[test]
    fn zero_length_write_is_a_noop() {
        let mut buffer = Buffer::allocate(4);
        buffer.write_n(0, |window| assert!(window.is_empty()));
        assert_eq!(buffer.used(), 0);
        assert!(buffer.flush().is_none());
    }
}
