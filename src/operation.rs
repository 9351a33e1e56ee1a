//! 按名称选择聚合
//!
//! `rolling(source, &config)` 根据 `config.operation` 选择策略，
//! 把不同策略的输出统一成 [`Aggregate`]。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::RollingConfig;
use crate::engine::RollingWindow;
use crate::source::Source;
use crate::strategy::{All, Any, Sum};
use crate::{Result, RollingError};

/// 聚合操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    All,
    Any,
    #[default]
    Sum,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::All => "all",
            Operation::Any => "any",
            Operation::Sum => "sum",
        }
    }
}

impl FromStr for Operation {
    type Err = RollingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Operation::All),
            "any" => Ok(Operation::Any),
            "sum" => Ok(Operation::Sum),
            _ => Err(RollingError::UnknownOperation(s.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 聚合值
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Aggregate {
    Flag(bool),
    Number(f64),
}

impl Aggregate {
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Aggregate::Flag(b) => Some(*b),
            Aggregate::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Aggregate::Number(n) => Some(*n),
            Aggregate::Flag(_) => None,
        }
    }
}

/// 类型擦除后的聚合值序列
pub type AggregateStream<'a, E> = Box<dyn Iterator<Item = std::result::Result<Aggregate, E>> + 'a>;

/// 按配置构造滚动聚合
///
/// 输入为 `f64`，`sum` 按加入/减去累计，存在浮点舍入误差 (见 [`Sum`])；
/// 需要与逐窗口求和完全一致时，直接使用整数类型的 `Sum`。
pub fn rolling<'a, S>(source: S, config: &RollingConfig) -> Result<AggregateStream<'a, S::Error>>
where
    S: Source<Item = f64> + 'a,
    S::Error: 'a,
{
    let window = config.validate()?.get();
    let window_type = config.window_type;

    log::debug!(
        "Building rolling {} (window={}, type={})",
        config.operation,
        window,
        window_type
    );

    let stream: AggregateStream<'a, S::Error> = match config.operation {
        Operation::All => Box::new(
            RollingWindow::new(source, All::new(), window, window_type)?
                .produce()
                .map(|r| r.map(Aggregate::Flag)),
        ),
        Operation::Any => Box::new(
            RollingWindow::new(source, Any::new(), window, window_type)?
                .produce()
                .map(|r| r.map(Aggregate::Flag)),
        ),
        Operation::Sum => Box::new(
            RollingWindow::new(source, Sum::new(), window, window_type)?
                .produce()
                .map(|r| r.map(Aggregate::Number)),
        ),
    };
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::iter_source;
    use crate::window::WindowType;

    #[test]
    fn test_operation_parse() {
        assert_eq!("All".parse::<Operation>().unwrap(), Operation::All);
        assert_eq!("any".parse::<Operation>().unwrap(), Operation::Any);
        assert_eq!(" SUM ".parse::<Operation>().unwrap(), Operation::Sum);
        assert!(matches!(
            "median".parse::<Operation>(),
            Err(RollingError::UnknownOperation(_))
        ));
    }

    #[test]
    fn test_rolling_by_name() {
        let seq = [8.0, 0.0, 1.0, 3.0, 6.0, 5.0];
        let config = RollingConfig::new(4, WindowType::Fixed, Operation::All);
        let out: Vec<Aggregate> = rolling(iter_source(seq), &config)
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(
            out,
            vec![
                Aggregate::Flag(false),
                Aggregate::Flag(false),
                Aggregate::Flag(true)
            ]
        );
    }

    #[test]
    fn test_rolling_sum_variable() {
        let config = RollingConfig::new(3, WindowType::Variable, Operation::Sum);
        let out: Vec<f64> = rolling(iter_source([3.0, -8.0, 1.0, 7.0, -2.0]), &config)
            .unwrap()
            .filter_map(|r| r.unwrap().as_number())
            .collect();
        assert_eq!(out, vec![3.0, -5.0, -4.0, 0.0, 6.0, 5.0, -2.0]);
    }

    #[test]
    fn test_rolling_rejects_zero_window() {
        let config = RollingConfig::new(0, WindowType::Fixed, Operation::Any);
        assert!(matches!(
            rolling(iter_source(Vec::<f64>::new()), &config),
            Err(RollingError::InvalidWindowSize(0))
        ));
    }

    #[test]
    fn test_aggregate_json() {
        assert_eq!(serde_json::to_string(&Aggregate::Flag(true)).unwrap(), "true");
        assert_eq!(serde_json::to_string(&Aggregate::Number(2.5)).unwrap(), "2.5");
    }
}
