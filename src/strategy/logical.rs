//! 逻辑策略 - All / Any
//!
//! 两个策略都只记录一个位置：
//! - All: 最近一次假值的位置，窗口起点之前则窗口内全为真
//! - Any: 最近一次真值的位置，落在窗口内则窗口内存在真值
//!
//! 更新 O(1)，内存 O(1)。淘汰无需改动状态，过期的位置在查询时自然落到窗口起点之前。

use std::marker::PhantomData;

use super::{Strategy, Truthy};
use crate::window::{WindowCursor, WindowSize};

/// 哨兵位置：比任何真实 Position (从 1 开始) 都靠前
pub const BEFORE_FIRST_POSITION: u64 = 0;

// ═══════════════════════════════════════════════════════════════════════════
// All - 窗口内全部为真
// ═══════════════════════════════════════════════════════════════════════════

/// 窗口内所有值是否都为真
#[derive(Debug, Clone)]
pub struct All<T> {
    last_falsy: u64,
    _input: PhantomData<fn(T)>,
}

impl<T> All<T> {
    pub fn new() -> Self {
        Self {
            last_falsy: BEFORE_FIRST_POSITION,
            _input: PhantomData,
        }
    }
}

impl<T> Default for All<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Truthy> Strategy for All<T> {
    type Input = T;
    type Output = bool;

    fn init_fixed<I>(&mut self, _window: WindowSize, head: I)
    where
        I: Iterator<Item = T>,
    {
        self.last_falsy = BEFORE_FIRST_POSITION;
        for (position, value) in (1u64..).zip(head) {
            if !value.is_truthy() {
                self.last_falsy = position;
            }
        }
    }

    fn init_variable(&mut self, _window: WindowSize) {
        self.last_falsy = BEFORE_FIRST_POSITION;
    }

    fn incorporate(&mut self, value: T, cursor: &WindowCursor) {
        if !value.is_truthy() {
            self.last_falsy = cursor.position();
        }
    }

    fn evict(&mut self, _cursor: &WindowCursor) {}

    fn current_value(&self, cursor: &WindowCursor) -> bool {
        self.last_falsy < cursor.start()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Any - 窗口内存在真值
// ═══════════════════════════════════════════════════════════════════════════

/// 窗口内是否存在真值
#[derive(Debug, Clone)]
pub struct Any<T> {
    last_truthy: u64,
    _input: PhantomData<fn(T)>,
}

impl<T> Any<T> {
    pub fn new() -> Self {
        Self {
            last_truthy: BEFORE_FIRST_POSITION,
            _input: PhantomData,
        }
    }
}

impl<T> Default for Any<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Truthy> Strategy for Any<T> {
    type Input = T;
    type Output = bool;

    fn init_fixed<I>(&mut self, _window: WindowSize, head: I)
    where
        I: Iterator<Item = T>,
    {
        self.last_truthy = BEFORE_FIRST_POSITION;
        for (position, value) in (1u64..).zip(head) {
            if value.is_truthy() {
                self.last_truthy = position;
            }
        }
    }

    fn init_variable(&mut self, _window: WindowSize) {
        self.last_truthy = BEFORE_FIRST_POSITION;
    }

    fn incorporate(&mut self, value: T, cursor: &WindowCursor) {
        if value.is_truthy() {
            self.last_truthy = cursor.position();
        }
    }

    fn evict(&mut self, _cursor: &WindowCursor) {}

    fn current_value(&self, cursor: &WindowCursor) -> bool {
        self.last_truthy >= cursor.start()
    }
}
