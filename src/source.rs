//! 数据源 - 只进不退的单遍值生产者
//!
//! 引擎只通过 [`Source::pull`] 读取数据：
//! - `Ok(Some(v))`: 下一个值
//! - `Ok(None)`: 数据结束 (不是错误)
//! - `Err(e)`: 数据源故障，原样传递给调用方

use std::convert::Infallible;

/// 单遍数据源
pub trait Source {
    /// 值类型
    type Item;

    /// 数据源故障类型
    type Error;

    /// 拉取下一个值
    fn pull(&mut self) -> Result<Option<Self::Item>, Self::Error>;
}

impl<S: Source + ?Sized> Source for &mut S {
    type Item = S::Item;
    type Error = S::Error;

    fn pull(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        (**self).pull()
    }
}

impl<S: Source + ?Sized> Source for Box<S> {
    type Item = S::Item;
    type Error = S::Error;

    fn pull(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        (**self).pull()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// 迭代器适配
// ═══════════════════════════════════════════════════════════════════════════

/// 不会失败的迭代器数据源
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    iter: I,
}

impl<I: Iterator> IterSource<I> {
    pub fn new(iter: I) -> Self {
        Self { iter }
    }
}

impl<I: Iterator> Source for IterSource<I> {
    type Item = I::Item;
    type Error = Infallible;

    fn pull(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        Ok(self.iter.next())
    }
}

/// 从任意 `IntoIterator` 构造数据源
pub fn iter_source<I: IntoIterator>(iter: I) -> IterSource<I::IntoIter> {
    IterSource::new(iter.into_iter())
}

/// 产出 `Result<T, E>` 的迭代器数据源，`Err` 视为数据源故障
#[derive(Debug, Clone)]
pub struct TryIterSource<I> {
    iter: I,
}

impl<I> TryIterSource<I> {
    pub fn new(iter: I) -> Self {
        Self { iter }
    }
}

impl<T, E, I> Source for TryIterSource<I>
where
    I: Iterator<Item = Result<T, E>>,
{
    type Item = T;
    type Error = E;

    fn pull(&mut self) -> Result<Option<T>, E> {
        self.iter.next().transpose()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// 计数数据源 (用于验证单遍读取)
// ═══════════════════════════════════════════════════════════════════════════

/// 记录拉取次数的数据源包装
#[derive(Debug, Clone)]
pub struct CountingSource<S> {
    inner: S,
    values: usize,
    end_signals: usize,
    failures: usize,
}

impl<S: Source> CountingSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            values: 0,
            end_signals: 0,
            failures: 0,
        }
    }

    /// 已产出的值个数
    pub fn values_pulled(&self) -> usize {
        self.values
    }

    /// 报告数据结束的次数
    pub fn end_signals(&self) -> usize {
        self.end_signals
    }

    /// 报告故障的次数
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// 总拉取次数
    pub fn total_pulls(&self) -> usize {
        self.values + self.end_signals + self.failures
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Source> Source for CountingSource<S> {
    type Item = S::Item;
    type Error = S::Error;

    fn pull(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        let pulled = self.inner.pull();
        match &pulled {
            Ok(Some(_)) => self.values += 1,
            Ok(None) => self.end_signals += 1,
            Err(_) => self.failures += 1,
        }
        pulled
    }
}
