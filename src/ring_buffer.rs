//! 环形缓冲区 - Sum 保存窗口内的原始值，淘汰时取出离开窗口的值
//!
//! 按需增长，`limit` 只作为淘汰上限，不预先分配。

use std::collections::VecDeque;

/// 有上限的先进先出缓冲区
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    values: VecDeque<T>,
    limit: usize,
}

impl<T> RingBuffer<T> {
    pub fn new(limit: usize) -> Self {
        Self {
            values: VecDeque::new(),
            limit,
        }
    }

    /// 追加新值；达到上限时先弹出并返回最旧值
    pub fn push(&mut self, value: T) -> Option<T> {
        let expired = if self.values.len() >= self.limit {
            self.values.pop_front()
        } else {
            None
        };
        self.values.push_back(value);
        expired
    }

    /// 弹出最旧值
    pub fn pop_oldest(&mut self) -> Option<T> {
        self.values.pop_front()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}
