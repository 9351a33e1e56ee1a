//! 滚动聚合命令行
//!
//! 从标准输入逐行读取数值，每个输出窗口打印一行 JSON。
//!
//! 运行: seq 1 10 | cargo run --bin rolling-stream -- --window 3 --op sum

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use rolling::{rolling, Operation, RollingConfig, TryIterSource, WindowType};

fn parse_args(args: &[String]) -> anyhow::Result<RollingConfig> {
    let mut config: Option<RollingConfig> = None;
    let mut window: Option<usize> = None;
    let mut window_type: Option<WindowType> = None;
    let mut operation: Option<Operation> = None;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args
            .get(i + 1)
            .with_context(|| format!("missing value for {}", flag))?;
        match flag {
            "--config" => config = Some(RollingConfig::load_from_file(value)?),
            "--window" => {
                window = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid window size: {}", value))?,
                )
            }
            "--type" => window_type = Some(value.parse()?),
            "--op" => operation = Some(value.parse()?),
            _ => bail!("unknown argument: {}", flag),
        }
        i += 2;
    }

    let mut config = match (config, window) {
        (Some(c), _) => c,
        (None, Some(w)) => RollingConfig::new(w, WindowType::default(), Operation::default()),
        (None, None) => bail!("either --config or --window is required"),
    };
    if let Some(w) = window {
        config.window_size = w;
    }
    if let Some(t) = window_type {
        config.window_type = t;
    }
    if let Some(op) = operation {
        config.operation = op;
    }
    config.validate()?;
    Ok(config)
}

/// 逐行读取数值，每个输出写一行 JSON；非数值行视为数据源故障
fn run_stream<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    config: &RollingConfig,
) -> anyhow::Result<u64> {
    let values = input
        .lines()
        .enumerate()
        .filter(|(_, line)| line.as_ref().map_or(true, |l| !l.trim().is_empty()))
        .map(|(n, line)| -> anyhow::Result<f64> {
            let line = line.context("failed to read input")?;
            line.trim()
                .parse::<f64>()
                .with_context(|| format!("line {}: not a number: {:?}", n + 1, line))
        });

    let mut emitted = 0u64;
    for aggregate in rolling(TryIterSource::new(values), config)? {
        match aggregate {
            Ok(value) => {
                writeln!(out, "{}", serde_json::to_string(&value)?)?;
                emitted += 1;
            }
            Err(e) => {
                log::error!("Source failure after {} outputs: {:#}", emitted, e);
                return Err(e);
            }
        }
    }
    out.flush()?;
    Ok(emitted)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let config = parse_args(&args)?;

    log::info!(
        "rolling-stream: op={}, window={}, type={}",
        config.operation,
        config.window_size,
        config.window_type
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let emitted = run_stream(stdin.lock(), &mut stdout.lock(), &config)?;

    log::info!("rolling-stream: {} outputs", emitted);
    Ok(())
}
