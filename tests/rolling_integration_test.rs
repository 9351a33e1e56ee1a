// 滚动窗口端到端测试
//
// 覆盖：
// 1. All / Any / Sum 参考序列
// 2. 固定 / 可变窗口输出长度
// 3. All / Any 对偶性
// 4. 单遍读取 (计数数据源)
// 5. 数据源故障传递

use rolling::{
    iter_source, rolling, Aggregate, All, Any, CountingSource, Operation, RollingConfig,
    RollingWindow, Strategy, Sum, TryIterSource, WindowType,
};

fn run<St>(data: Vec<St::Input>, strategy: St, window: usize, window_type: WindowType) -> Vec<St::Output>
where
    St: Strategy,
{
    RollingWindow::new(iter_source(data), strategy, window, window_type)
        .unwrap()
        .produce()
        .map(|r| r.unwrap())
        .collect()
}

#[test]
fn all_reference_sequence() {
    let seq = vec![8, 0, 1, 3, 6, 5];

    let w3 = run(seq.clone(), All::new(), 3, WindowType::Fixed);
    assert_eq!(&w3[..2], &[false, false]);
    assert_eq!(w3, vec![false, false, true, true]);

    assert_eq!(
        run(seq, All::new(), 4, WindowType::Fixed),
        vec![false, false, true]
    );
}

#[test]
fn any_reference_sequence() {
    let seq = vec![1, 0, 0, 0, 6, 5];

    let w3 = run(seq.clone(), Any::new(), 3, WindowType::Fixed);
    assert_eq!(&w3[..2], &[true, false]);
    assert_eq!(w3, vec![true, false, true, true]);

    assert_eq!(
        run(seq, Any::new(), 4, WindowType::Fixed),
        vec![true, true, true]
    );
}

#[test]
fn all_any_variable_windows() {
    let seq = vec![1, 0, 1, 1];
    // 窗口: [1] [1,0] [0,1] [1,1] [1]
    assert_eq!(
        run(seq.clone(), All::new(), 2, WindowType::Variable),
        vec![true, false, false, true, true]
    );
    // 窗口: [1] [1,0] [1,0,1] [0,1,1] [1,1] [1]
    assert_eq!(
        run(seq, Any::new(), 3, WindowType::Variable),
        vec![true, true, true, true, true, true]
    );
    assert_eq!(
        run(vec![0, 0, 5], Any::new(), 2, WindowType::Variable),
        vec![false, false, true, true]
    );
}

#[test]
fn sum_fixed_reference() {
    let cases: Vec<(Vec<i64>, usize, Vec<i64>)> = vec![
        (vec![3, 0, 1, 7, 2], 6, vec![]),
        (vec![3, 0, 1, 7, 2], 5, vec![13]),
        (vec![3, 0, 1, 7, 2], 4, vec![11, 10]),
        (vec![3, 0, 1, 7, 2], 3, vec![4, 8, 10]),
        (vec![3, 0, 1, 7, 2], 2, vec![3, 1, 8, 9]),
        (vec![3, 0, 1, 7, 2], 1, vec![3, 0, 1, 7, 2]),
        (vec![3, -8, 1, 7, -2], 5, vec![1]),
        (vec![3, -8, 1, 7, -2], 3, vec![-4, 0, 6]),
        (vec![3, -8, 1, 7, -2], 2, vec![-5, -7, 8, 5]),
    ];
    for (data, window, expected) in cases {
        assert_eq!(
            run(data.clone(), Sum::new(), window, WindowType::Fixed),
            expected,
            "data={:?} window={}",
            data,
            window
        );
    }
}

#[test]
fn sum_variable_reference() {
    let cases: Vec<(Vec<i64>, usize, Vec<i64>)> = vec![
        (vec![3, 0, 1, 7, 2], 5, vec![3, 3, 4, 11, 13, 10, 10, 9, 2]),
        (vec![3, 0, 1, 7, 2], 4, vec![3, 3, 4, 11, 10, 10, 9, 2]),
        (vec![3, 0, 1, 7, 2], 3, vec![3, 3, 4, 8, 10, 9, 2]),
        (vec![3, 0, 1, 7, 2], 2, vec![3, 3, 1, 8, 9, 2]),
        (vec![3, 0, 1, 7, 2], 1, vec![3, 0, 1, 7, 2]),
        (vec![3, -8, 1, 7, -2], 5, vec![3, -5, -4, 3, 1, -2, 6, 5, -2]),
        (vec![3, -8, 1, 7, -2], 2, vec![3, -5, -7, 8, 5, -2]),
    ];
    for (data, window, expected) in cases {
        assert_eq!(
            run(data.clone(), Sum::new(), window, WindowType::Variable),
            expected,
            "data={:?} window={}",
            data,
            window
        );
    }
}

#[test]
fn output_lengths() {
    for n in 0..12usize {
        for w in 1..10usize {
            let data: Vec<i64> = (0..n as i64).collect();

            let fixed = run(data.clone(), Sum::new(), w, WindowType::Fixed);
            assert_eq!(fixed.len(), (n + 1).saturating_sub(w), "fixed n={} w={}", n, w);

            let variable = run(data, Sum::new(), w, WindowType::Variable);
            let expected = if n >= w { n + w - 1 } else { n };
            assert_eq!(variable.len(), expected, "variable n={} w={}", n, w);
        }
    }
}

#[test]
fn all_any_duality() {
    let seq = vec![true, true, false, true, false, false, true, true, true, false];
    let negated: Vec<bool> = seq.iter().map(|b| !b).collect();

    for window_type in [WindowType::Fixed, WindowType::Variable] {
        for w in 1..=seq.len() + 1 {
            let all = run(seq.clone(), All::new(), w, window_type);
            let any = run(negated.clone(), Any::new(), w, window_type);
            assert_eq!(all.len(), any.len());
            for (k, (a, b)) in all.iter().zip(any.iter()).enumerate() {
                assert_eq!(*a, !*b, "w={} k={} type={}", w, k, window_type);
            }
        }
    }
}

#[test]
fn single_pass_over_source() {
    for window_type in [WindowType::Fixed, WindowType::Variable] {
        for w in 1..8 {
            let mut counting = CountingSource::new(iter_source(vec![1, 0, 2, 0, 3]));
            let outputs = RollingWindow::new(&mut counting, Any::new(), w, window_type)
                .unwrap()
                .produce()
                .count();
            assert!(outputs <= 5 + w);

            // 每个值只读取一次，结束信号最多读取一次
            assert!(counting.values_pulled() <= 5);
            assert!(counting.end_signals() <= 1);
            if w <= 6 {
                assert_eq!(counting.values_pulled(), 5, "w={} type={}", w, window_type);
            }
        }
    }
}

#[test]
fn source_failure_is_propagated_unchanged() {
    #[derive(Debug, PartialEq)]
    struct Broken(u32);

    let data = vec![Ok(1.0), Ok(2.0), Ok(3.0), Err(Broken(7)), Ok(5.0)];
    let config = RollingConfig::new(2, WindowType::Fixed, Operation::Sum);
    let out: Vec<Result<Aggregate, Broken>> =
        rolling(TryIterSource::new(data.into_iter()), &config)
            .unwrap()
            .collect();

    assert_eq!(
        out,
        vec![
            Ok(Aggregate::Number(3.0)),
            Ok(Aggregate::Number(5.0)),
            Err(Broken(7)),
        ]
    );
}

#[test]
fn engine_over_strings() {
    let words = vec!["a", "", "b", "c", ""];
    assert_eq!(
        run(words.clone(), All::new(), 2, WindowType::Fixed),
        vec![false, false, true, false]
    );
    assert_eq!(
        run(words, Any::new(), 2, WindowType::Fixed),
        vec![true, true, true, true]
    );
}

#[test]
fn window_longer_than_source_yields_nothing() {
    let huge = usize::MAX / 4;
    assert!(run(vec![3i64, 0, 1], Sum::new(), huge, WindowType::Fixed).is_empty());
    assert!(run(vec![3i64, 0, 1], All::new(), huge, WindowType::Fixed).is_empty());

    let config = RollingConfig::new(huge, WindowType::Fixed, Operation::Sum);
    let out: Vec<_> = rolling(iter_source(vec![3.0, 0.0, 1.0]), &config)
        .unwrap()
        .collect();
    assert!(out.is_empty());
}

#[test]
fn infinite_source_is_lazy() {
    let outputs: Vec<i64> = RollingWindow::new(iter_source(1i64..), Sum::new(), 3, WindowType::Fixed)
        .unwrap()
        .produce()
        .take(4)
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(outputs, vec![6, 9, 12, 15]);
}
