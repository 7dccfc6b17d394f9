use criterion::{black_box, criterion_group, criterion_main, Criterion};

use binary_log::{binary_log, Encoder};
use log::{info, LevelFilter};
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};
use std::sync::Once;
use std::time::Instant;
use tempfile::tempdir;

const ITERATIONS: usize = 100_000;

static LOGGER_INIT: Once = Once::new();

fn setup_log4rs(log_file: &str) {
    LOGGER_INIT.call_once(|| {
        let logfile = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new("{d} - {m}{n}")))
            .append(true)
            .build(log_file)
            .unwrap();

        let config = Config::builder()
            .appender(Appender::builder().build("logfile", Box::new(logfile)))
            .build(Root::builder().appender("logfile").build(LevelFilter::Info))
            .unwrap();

        log4rs::init_config(config).unwrap();
    });
}

fn bench_encode_in_memory(c: &mut Criterion) {
    // Surface the encoder's tracing events when RUST_LOG is set.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let mut group = c.benchmark_group("encode");

    group.bench_function("record_one_u64_arg", |b| {
        let mut encoder = Encoder::from_writers(Vec::new(), Vec::new());
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            binary_log!(encoder, "request {} handled", black_box(i)).unwrap();
        });
    });

    group.bench_function("record_mixed_args", |b| {
        let mut encoder = Encoder::from_writers(Vec::new(), Vec::new());
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            binary_log!(
                encoder,
                "request {} from {} took {} ms (ok={})",
                black_box(i),
                "10.0.0.1",
                2.75f64,
                true
            )
            .unwrap();
        });
    });

    group.finish();
}

fn bench_logging_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("Logging Comparison");
    group.sample_size(10); // Fewer samples due to I/O operations

    group.bench_function("binary_vs_traditional", |b| {
        b.iter(|| {
            let dir = tempdir().unwrap();

            // Binary logging to file
            let mut encoder = Encoder::create(dir.path().join("perf.blog")).unwrap();
            let binary_start = Instant::now();
            for i in 0..ITERATIONS {
                binary_log!(
                    encoder,
                    "Test perf: iteration={}, cpu={}%, active={}",
                    i,
                    95.0f64,
                    true
                )
                .unwrap();
            }
            encoder.flush().unwrap();
            let binary_duration = binary_start.elapsed();

            // Traditional text logging via log4rs
            let traditional_log_file = dir
                .path()
                .join("traditional.log")
                .to_str()
                .unwrap()
                .to_string();
            setup_log4rs(&traditional_log_file);

            let traditional_start = Instant::now();
            for i in 0..ITERATIONS {
                info!("Test perf: iteration={}, cpu={}%, active={}", i, 95.0f64, true);
            }
            let traditional_duration = traditional_start.elapsed();

            println!("\nPerformance comparison ({} iterations):", ITERATIONS);
            println!("Binary logging: {:?}", binary_duration);
            println!("Traditional logging: {:?}", traditional_duration);
            println!(
                "Speedup: {:.2}x",
                traditional_duration.as_secs_f64() / binary_duration.as_secs_f64()
            );

            black_box((binary_duration, traditional_duration))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_encode_in_memory, bench_logging_comparison);
criterion_main!(benches);
