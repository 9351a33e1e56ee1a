//! 滚动窗口引擎
//!
//! 核心设计：
//! - 窗口语义 (固定 / 可变) 与聚合策略解耦，策略通过 [`Strategy`] 接入
//! - 单遍拉取：每个值只从数据源读取一次，数据结束后不再拉取
//! - 惰性求值：首次 `next()` 时才预填充，输出由调用方按需驱动
//!
//! ```text
//! Fixed:    Prime(w-1) → Sliding ─────────────────────────→ Done
//! Variable: Growing ──(observed == w)──→ Sliding → Draining → Done
//! ```

use std::iter::FusedIterator;
use std::str::FromStr;

use crate::source::Source;
use crate::strategy::Strategy;
use crate::window::{WindowCursor, WindowSize, WindowType};
use crate::Result;

// ═══════════════════════════════════════════════════════════════════════════
// RollingWindow - 构造
// ═══════════════════════════════════════════════════════════════════════════

/// 绑定一个数据源和一个策略的滚动窗口
#[derive(Debug)]
pub struct RollingWindow<S, St> {
    source: S,
    strategy: St,
    window: WindowSize,
    window_type: WindowType,
}

impl<S, St> RollingWindow<S, St>
where
    S: Source,
    St: Strategy<Input = S::Item>,
{
    /// 创建引擎，`window_size == 0` 返回配置错误
    pub fn new(
        source: S,
        strategy: St,
        window_size: usize,
        window_type: WindowType,
    ) -> Result<Self> {
        let window = WindowSize::new(window_size)?;
        Ok(Self {
            source,
            strategy,
            window,
            window_type,
        })
    }

    /// 以字符串指定窗口类型 ("fixed" / "variable")
    pub fn with_window_type(
        source: S,
        strategy: St,
        window_size: usize,
        window_type: &str,
    ) -> Result<Self> {
        let window_type = WindowType::from_str(window_type)?;
        Self::new(source, strategy, window_size, window_type)
    }

    pub fn window_size(&self) -> WindowSize {
        self.window
    }

    pub fn window_type(&self) -> WindowType {
        self.window_type
    }

    /// 生成输出序列 (消费引擎，不可重启)
    pub fn produce(self) -> Outputs<S, St> {
        Outputs {
            source: self.source,
            strategy: self.strategy,
            window: self.window,
            window_type: self.window_type,
            cursor: WindowCursor::new(),
            last_window: None,
            phase: Phase::Init,
        }
    }
}

impl<S, St> IntoIterator for RollingWindow<S, St>
where
    S: Source,
    St: Strategy<Input = S::Item>,
{
    type Item = std::result::Result<St::Output, S::Error>;
    type IntoIter = Outputs<S, St>;

    fn into_iter(self) -> Self::IntoIter {
        self.produce()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Outputs - 输出序列
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// 尚未初始化策略
    Init,
    /// 可变窗口增长期
    Growing,
    /// 窗口已满，每个新值滑动一次
    Sliding,
    /// 可变窗口：数据源已结束，逐个淘汰最旧值
    Draining,
    /// 终止
    Done,
}

/// 聚合值序列
///
/// 每项为 `Ok(聚合值)`；数据源故障时产出一次 `Err`，随后序列结束。
#[derive(Debug)]
pub struct Outputs<S, St> {
    source: S,
    strategy: St,
    window: WindowSize,
    window_type: WindowType,
    cursor: WindowCursor,
    last_window: Option<WindowCursor>,
    phase: Phase,
}

impl<S, St> Outputs<S, St>
where
    S: Source,
    St: Strategy<Input = S::Item>,
{
    /// 产生上一个输出时的窗口 (Position / ObservedCount)
    pub fn last_window(&self) -> Option<WindowCursor> {
        self.last_window
    }

    pub fn window_size(&self) -> WindowSize {
        self.window
    }

    /// 序列是否已结束
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// 固定窗口预填充 w-1 个值
    ///
    /// 返回 `Ok(true)` 表示预填充完成，`Ok(false)` 表示数据源提前结束。
    fn prime(&mut self) -> std::result::Result<bool, S::Error> {
        let wanted = self.window.get() - 1;
        let mut head = Head::new(&mut self.source, wanted);

        self.strategy.init_fixed(self.window, head.by_ref());

        let leftover = head.by_ref().count();
        if leftover > 0 {
            log::warn!(
                "Strategy left {} priming values unconsumed (window={})",
                leftover,
                self.window
            );
        }

        if let Some(e) = head.failure {
            return Err(e);
        }
        if head.consumed < wanted {
            log::debug!(
                "Source ended during priming: {} of {} values (window={})",
                head.consumed,
                wanted,
                self.window
            );
            return Ok(false);
        }

        self.cursor = WindowCursor::primed(head.consumed);
        log::debug!("Primed fixed window with {} values", head.consumed);
        Ok(true)
    }

    /// 新值进入窗口并读取聚合值
    fn incorporate(&mut self, value: S::Item) -> St::Output {
        self.cursor.advance();
        self.strategy.incorporate(value, &self.cursor);
        self.read()
    }

    fn read(&mut self) -> St::Output {
        self.last_window = Some(self.cursor);
        log::trace!(
            "Window at position {} with {} values",
            self.cursor.position(),
            self.cursor.observed()
        );
        self.strategy.current_value(&self.cursor)
    }

    fn evict(&mut self) {
        self.cursor.shrink();
        self.strategy.evict(&self.cursor);
    }

    fn finish(&mut self) {
        log::debug!(
            "Rolling window finished after {} values",
            self.cursor.position()
        );
        self.phase = Phase::Done;
    }
}

impl<S, St> Iterator for Outputs<S, St>
where
    S: Source,
    St: Strategy<Input = S::Item>,
{
    type Item = std::result::Result<St::Output, S::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.phase {
                Phase::Init => match self.window_type {
                    WindowType::Fixed => match self.prime() {
                        Ok(true) => self.phase = Phase::Sliding,
                        Ok(false) => {
                            self.finish();
                            return None;
                        }
                        Err(e) => {
                            self.finish();
                            return Some(Err(e));
                        }
                    },
                    WindowType::Variable => {
                        self.strategy.init_variable(self.window);
                        self.phase = Phase::Growing;
                    }
                },

                Phase::Growing => {
                    return match self.source.pull() {
                        Ok(Some(value)) => {
                            let output = self.incorporate(value);
                            if self.cursor.observed() == self.window.get() {
                                self.evict();
                                self.phase = Phase::Sliding;
                                log::debug!("Variable window filled at size {}", self.window);
                            }
                            Some(Ok(output))
                        }
                        // 窗口未满时结束，不进入收缩阶段
                        Ok(None) => {
                            self.finish();
                            None
                        }
                        Err(e) => {
                            self.finish();
                            Some(Err(e))
                        }
                    };
                }

                Phase::Sliding => match self.source.pull() {
                    Ok(Some(value)) => {
                        let output = self.incorporate(value);
                        self.evict();
                        return Some(Ok(output));
                    }
                    Ok(None) => match self.window_type {
                        WindowType::Fixed => {
                            self.finish();
                            return None;
                        }
                        WindowType::Variable => self.phase = Phase::Draining,
                    },
                    Err(e) => {
                        self.finish();
                        return Some(Err(e));
                    }
                },

                Phase::Draining => {
                    if self.cursor.observed() == 0 {
                        self.finish();
                        return None;
                    }
                    let output = self.read();
                    self.evict();
                    return Some(Ok(output));
                }

                Phase::Done => return None,
            }
        }
    }
}

impl<S, St> FusedIterator for Outputs<S, St>
where
    S: Source,
    St: Strategy<Input = S::Item>,
{
}

// ═══════════════════════════════════════════════════════════════════════════
// Head - 预填充迭代器
// ═══════════════════════════════════════════════════════════════════════════

/// 从数据源最多拉取 `remaining` 个值，结束或故障后不再拉取
struct Head<'a, S: Source> {
    source: &'a mut S,
    remaining: usize,
    consumed: usize,
    exhausted: bool,
    failure: Option<S::Error>,
}

impl<'a, S: Source> Head<'a, S> {
    fn new(source: &'a mut S, remaining: usize) -> Self {
        Self {
            source,
            remaining,
            consumed: 0,
            exhausted: false,
            failure: None,
        }
    }
}

impl<S: Source> Iterator for Head<'_, S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        if self.remaining == 0 || self.exhausted || self.failure.is_some() {
            return None;
        }
        match self.source.pull() {
            Ok(Some(value)) => {
                self.remaining -= 1;
                self.consumed += 1;
                Some(value)
            }
            Ok(None) => {
                self.exhausted = true;
                None
            }
            Err(e) => {
                self.failure = Some(e);
                None
            }
        }
    }
}
