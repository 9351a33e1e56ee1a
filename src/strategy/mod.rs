//! 聚合策略模块
//!
//! 每个策略只维护回答"当前窗口聚合值"所需的辅助状态：
//! - 逻辑策略 (All / Any): O(1) 内存，只记录最近一次假值/真值的位置
//! - 算术策略 (Sum): 需要知道离开窗口的值，O(window) 内存
//!
//! 极值、中位数等策略实现同一个 [`Strategy`] trait 即可接入引擎。

pub mod arithmetic;
pub mod logical;

pub use arithmetic::*;
pub use logical::*;

use crate::window::{WindowCursor, WindowSize};

/// 增量聚合策略 Trait
///
/// 引擎持有 Position / ObservedCount，并在每次调用前更新 [`WindowCursor`]：
/// - `incorporate` 时游标已包含新值
/// - `evict` 时游标已移除最旧值
///
/// 策略不能重新读取已淘汰的值。
pub trait Strategy {
    /// 输入类型
    type Input;

    /// 输出类型
    type Output;

    /// 固定窗口预填充
    ///
    /// `head` 依次产出前 `window - 1` 个值 (第一个值 Position = 1)，
    /// 实现必须消费完 `head`。
    fn init_fixed<I>(&mut self, window: WindowSize, head: I)
    where
        I: Iterator<Item = Self::Input>;

    /// 可变窗口初始化 (空窗口)
    fn init_variable(&mut self, window: WindowSize);

    /// 吸收一个新值
    fn incorporate(&mut self, value: Self::Input, cursor: &WindowCursor);

    /// 淘汰窗口中最旧的值
    fn evict(&mut self, cursor: &WindowCursor);

    /// 当前窗口的聚合值
    fn current_value(&self, cursor: &WindowCursor) -> Self::Output;
}

// ═══════════════════════════════════════════════════════════════════════════
// Truthy
// ═══════════════════════════════════════════════════════════════════════════

/// 值的真假判定，供逻辑策略使用
///
/// 数值非零为真 (NaN 为真)，字符串和集合非空为真，`None` 为假。
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! impl_truthy_int {
    ($($t:ty),*) => {
        $(impl Truthy for $t {
            fn is_truthy(&self) -> bool {
                *self != 0
            }
        })*
    };
}

impl_truthy_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Truthy for f32 {
    fn is_truthy(&self) -> bool {
        *self != 0.0
    }
}

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Truthy for [T] {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Truthy for Vec<T> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().map_or(false, Truthy::is_truthy)
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}
