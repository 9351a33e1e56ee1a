//! 窗口数据模型
//!
//! - WindowSize: 目标窗口大小 (正整数，构造后不可变)
//! - WindowType: 固定窗口 / 可变窗口
//! - WindowCursor: Position / ObservedCount，WindowStart 由两者推导

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Result, RollingError};

// ═══════════════════════════════════════════════════════════════════════════
// WindowSize
// ═══════════════════════════════════════════════════════════════════════════

/// 窗口大小 (保证 > 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowSize(NonZeroUsize);

impl WindowSize {
    /// 校验并创建窗口大小，0 返回 `InvalidWindowSize`
    pub fn new(size: usize) -> Result<Self> {
        NonZeroUsize::new(size)
            .map(Self)
            .ok_or(RollingError::InvalidWindowSize(size))
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for WindowSize {
    type Error = RollingError;

    fn try_from(size: usize) -> Result<Self> {
        Self::new(size)
    }
}

impl fmt::Display for WindowSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// WindowType
// ═══════════════════════════════════════════════════════════════════════════

/// 窗口类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    /// 固定窗口: 先预填充 w-1 个值，之后每个值输出一次
    #[default]
    Fixed,
    /// 可变窗口: 从大小 1 开始增长到 w，数据源结束后逐个收缩
    Variable,
}

impl FromStr for WindowType {
    type Err = RollingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(WindowType::Fixed),
            "variable" => Ok(WindowType::Variable),
            _ => Err(RollingError::UnknownWindowType(s.to_string())),
        }
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowType::Fixed => write!(f, "fixed"),
            WindowType::Variable => write!(f, "variable"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// WindowCursor
// ═══════════════════════════════════════════════════════════════════════════

/// 引擎维护的窗口游标
///
/// `position` 为已消费值的个数 (1-indexed，消费第 k 个值后 position = k)，
/// `observed` 为当前窗口内的值个数。窗口起点只通过 [`WindowCursor::start`]
/// 推导，不单独存储。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowCursor {
    position: u64,
    observed: usize,
}

impl WindowCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前位置
    pub fn position(&self) -> u64 {
        self.position
    }

    /// 窗口内的值个数 (ObservedCount)
    pub fn observed(&self) -> usize {
        self.observed
    }

    /// WindowStart = Position - ObservedCount + 1
    ///
    /// 窗口为空时返回 position + 1
    pub fn start(&self) -> u64 {
        self.position + 1 - self.observed as u64
    }

    /// 新值进入窗口
    pub(crate) fn advance(&mut self) {
        self.position += 1;
        self.observed += 1;
    }

    /// 最旧的值离开窗口
    pub(crate) fn shrink(&mut self) {
        debug_assert!(self.observed > 0, "shrink on empty window");
        self.observed = self.observed.saturating_sub(1);
    }

    /// 预填充完成后直接定位 (固定窗口)
    pub(crate) fn primed(consumed: usize) -> Self {
        Self {
            position: consumed as u64,
            observed: consumed,
        }
    }
}
