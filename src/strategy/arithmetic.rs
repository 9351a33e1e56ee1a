//! 算术策略 - Sum
//!
//! 求和的淘汰必须知道离开窗口的具体值，因此 Sum 自带一个以 window 为上限的
//! 环形缓冲区：内存 O(window)，每步更新 O(1)。

use std::ops::{AddAssign, SubAssign};

use super::Strategy;
use crate::ring_buffer::RingBuffer;
use crate::window::{WindowCursor, WindowSize};

/// 滚动求和
///
/// 整数类型的结果与逐窗口重新求和完全一致。浮点类型按加入/减去累计，
/// 量级相差很大时会出现舍入误差，例如窗口 2 遍历 `[1e16, 1.0, 1.0]`，
/// 最后只剩 `[1.0]` 时结果为 `0.0`。
#[derive(Debug, Clone)]
pub struct Sum<T> {
    total: T,
    buffer: RingBuffer<T>,
}

impl<T: Default> Sum<T> {
    pub fn new() -> Self {
        Self {
            total: T::default(),
            buffer: RingBuffer::new(0),
        }
    }

    fn reset(&mut self, window: WindowSize) {
        self.total = T::default();
        self.buffer = RingBuffer::new(window.get());
    }
}

impl<T: Default> Default for Sum<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Sum<T>
where
    T: Clone + Default + AddAssign + SubAssign,
{
    fn push(&mut self, value: T) {
        self.total += value.clone();
        // 缓冲区已满时弹出的值同样离开窗口
        if let Some(expired) = self.buffer.push(value) {
            self.total -= expired;
        }
    }
}

impl<T> Strategy for Sum<T>
where
    T: Clone + Default + AddAssign + SubAssign,
{
    type Input = T;
    type Output = T;

    fn init_fixed<I>(&mut self, window: WindowSize, head: I)
    where
        I: Iterator<Item = T>,
    {
        self.reset(window);
        for value in head {
            self.push(value);
        }
    }

    fn init_variable(&mut self, window: WindowSize) {
        self.reset(window);
    }

    fn incorporate(&mut self, value: T, _cursor: &WindowCursor) {
        self.push(value);
    }

    fn evict(&mut self, _cursor: &WindowCursor) {
        if let Some(expired) = self.buffer.pop_oldest() {
            self.total -= expired;
        }
    }

    fn current_value(&self, cursor: &WindowCursor) -> T {
        debug_assert_eq!(self.buffer.len(), cursor.observed());
        self.total.clone()
    }
}
