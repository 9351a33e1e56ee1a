//! # ROLLING
//!
//! 单遍数据流上的滚动窗口聚合 - 每步输出一个聚合值，从不重新扫描窗口
//!
//! ## 核心能力
//!
//! - **窗口引擎**: 固定窗口 / 可变窗口 (增长 → 滑动 → 收缩)
//! - **策略接口**: 任何实现 [`Strategy`] 的聚合都可以接入引擎
//! - **逻辑聚合**: All / Any，O(1) 时间 O(1) 内存
//! - **求和**: Sum，O(1) 时间 O(window) 内存
//! - **按名称构造**: [`rolling`] + [`RollingConfig`] (TOML 配置)
//!
//! ## 架构设计
//!
//! ```text
//! Source (source/) ── pull ──→ RollingWindow (engine/) ── Outputs ──→ 调用方
//!                                   ↓
//!                          Strategy (strategy/)
//!                          ├── All / Any (logical)
//!                          └── Sum (arithmetic) ← RingBuffer
//! ```
//!
//! ## 示例
//!
//! ```
//! use rolling::{iter_source, RollingWindow, Sum, WindowType};
//!
//! let sums: Vec<i32> = RollingWindow::new(iter_source([3, 0, 1, 7, 2]), Sum::new(), 3, WindowType::Fixed)
//!     .unwrap()
//!     .produce()
//!     .map(|r| r.unwrap())
//!     .collect();
//! assert_eq!(sums, vec![4, 8, 10]);
//! ```

// ============================================================================
// 内部模块
// ============================================================================

/// 配置 (TOML)
pub mod config;

/// 滚动窗口引擎
pub mod engine;

/// 按名称选择聚合
pub mod operation;

/// 环形缓冲区
pub mod ring_buffer;

/// 数据源
pub mod source;

/// 聚合策略
pub mod strategy;

/// 窗口数据模型
pub mod window;

// ============================================================================
// 重导出常用类型
// ============================================================================

pub use config::RollingConfig;
pub use engine::{Outputs, RollingWindow};
pub use operation::{rolling, Aggregate, AggregateStream, Operation};
pub use ring_buffer::RingBuffer;
pub use source::{iter_source, CountingSource, IterSource, Source, TryIterSource};
pub use strategy::{All, Any, Strategy, Sum, Truthy, BEFORE_FIRST_POSITION};
pub use window::{WindowCursor, WindowSize, WindowType};

// ============================================================================
// 全局错误类型
// ============================================================================

/// 配置错误类型
///
/// 数据源故障不在此列：它们以数据源自身的错误类型原样传给调用方。
#[derive(Debug, thiserror::Error)]
pub enum RollingError {
    #[error("Invalid window size: {0} (must be a positive integer)")]
    InvalidWindowSize(usize),

    #[error("Unknown window type: {0}")]
    UnknownWindowType(String),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IOError(String),
}

pub type Result<T> = std::result::Result<T, RollingError>;
