use criterion::{Criterion, criterion_group, criterion_main};
use sitelog::fmt;
use sitelog::frame::{RawFrame, StackFrame, extract};
use std::collections::HashSet;
use std::hint::black_box;

fn sample_frame() -> StackFrame {
    StackFrame {
        file_name: "service.rs".to_string(),
        line: 128,
        method: "handle_request".to_string(),
        type_name: "app::service::Handler".to_string(),
    }
}

fn bench_format_basic(c: &mut Criterion) {
    let frame = sample_frame();
    c.bench_function("fmt::format_basic", |b| {
        b.iter(|| fmt::format_basic(black_box(&frame), Some("request accepted"), true));
    });
}

fn bench_pretty_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("fmt::pretty_lines");

    let flat = r#"{"event": "ready", "port": 8080, "tls": false}"#;
    group.bench_function("flat", |b| {
        b.iter(|| fmt::pretty_lines(black_box(flat)));
    });

    let nested = r#"{"request": {"headers": {"accept": "json"}, "params": [1, 2, 3]}, "ok": true}"#;
    group.bench_function("nested", |b| {
        b.iter(|| fmt::pretty_lines(black_box(nested)));
    });

    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut stack: Vec<RawFrame> = (0u32..4)
        .map(|i| RawFrame::new(format!("sitelog::logger::entry{i}"), Some("logger.rs"), i))
        .collect();
    stack.push(RawFrame::new(
        "app::service::handle",
        Some("service.rs"),
        128,
    ));
    stack.push(RawFrame::new("app::main", Some("main.rs"), 12));
    let skip: HashSet<String> = ["sitelog".to_string()].into_iter().collect();

    c.bench_function("frame::extract", |b| {
        b.iter(|| extract(black_box(&stack), black_box(&skip)));
    });
}

criterion_group!(
    benches,
    bench_format_basic,
    bench_pretty_json,
    bench_extract
);
criterion_main!(benches);
