// scripts/benchmark.rs
use payoff_diagram::analytics::bs_analytic::{bs_call_price, bs_put_price};
use payoff_diagram::engine::{default_range, kinks, sample, DEFAULT_CURVE_POINTS};
use payoff_diagram::error::validation::validate_points;
use payoff_diagram::instruments::{InstrumentKind, Position, PositionId};
use payoff_diagram::math_utils::Timer;
use payoff_diagram::payoff::PayoffVariant;
use payoff_diagram::{PayoffError, PayoffResult, Settings};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::Command;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_model: String,
    cpu_cores: usize,
    rust_version: String,
    rustc_flags: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_model: Self::cpu_model().unwrap_or_else(|| "Unknown CPU".to_string()),
            cpu_cores: num_cpus::get(),
            rust_version: Command::new("rustc")
                .arg("--version")
                .output()
                .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
                .unwrap_or_else(|_| "Unknown Rust version".to_string()),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
            rayon_threads: rayon::current_num_threads(),
        }
    }

    // Only Linux exposes the model name without shelling out
    fn cpu_model() -> Option<String> {
        let content = std::fs::read_to_string("/proc/cpuinfo").ok()?;
        content
            .lines()
            .find(|line| line.starts_with("model name"))
            .and_then(|line| line.split(':').nth(1))
            .map(|s| s.trim().to_string())
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    evaluations: usize,
    time_ms: f64,
    throughput_per_sec: f64,
    checksum: f64,
}

impl BenchmarkResult {
    fn new(name: String, evaluations: usize, time_ms: f64, checksum: f64) -> Self {
        BenchmarkResult {
            name,
            evaluations,
            time_ms,
            throughput_per_sec: evaluations as f64 / (time_ms / 1000.0).max(f64::EPSILON),
            checksum,
        }
    }
}

/// Random portfolio of `legs` positions struck around 100
fn random_portfolio(rng: &mut StdRng, legs: usize) -> Vec<Position> {
    (0..legs)
        .map(|i| {
            let kind = InstrumentKind::ALL[rng.gen_range(0..InstrumentKind::ALL.len())];
            let id = PositionId(i as u64 + 1);
            if kind.is_risk_free() {
                Position::risk_free(id, kind, rng.gen_range(10.0..1000.0))
            } else {
                Position::new(id, kind, rng.gen_range(50.0..150.0), rng.gen_range(0.0..15.0))
                    .with_quantity(rng.gen_range(1..5))
            }
        })
        .collect()
}

fn curve_checksum(positions: &[Position], settings: &Settings, points: usize) -> f64 {
    let range = default_range(positions);
    let curve = sample(positions, range, settings, points, PayoffVariant::Full);
    let markers = kinks(positions, range, settings);
    curve.iter().chain(&markers).map(|p| p.y).sum()
}

fn run_curve_benchmarks(settings: &Settings, points: usize) -> Vec<BenchmarkResult> {
    let mut results = Vec::new();
    let portfolio_count = 10_000;

    for &legs in &[2usize, 8, 32] {
        info!(legs, portfolio_count, points, "benchmarking curve generation");
        let mut rng = StdRng::seed_from_u64(42);
        let portfolios: Vec<Vec<Position>> = (0..portfolio_count)
            .map(|_| random_portfolio(&mut rng, legs))
            .collect();
        let evaluations = portfolio_count * (points + legs);

        let mut timer = Timer::new();
        timer.start();
        let serial: f64 = portfolios.iter().map(|p| curve_checksum(p, settings, points)).sum();
        results.push(BenchmarkResult::new(
            format!("Curve, {} legs (serial)", legs),
            evaluations,
            timer.elapsed_ms(),
            serial,
        ));

        timer.start();
        let parallel: f64 = portfolios.par_iter().map(|p| curve_checksum(p, settings, points)).sum();
        results.push(BenchmarkResult::new(
            format!("Curve, {} legs (rayon)", legs),
            evaluations,
            timer.elapsed_ms(),
            parallel,
        ));
    }

    results
}

fn run_pricing_benchmark(settings: &Settings) -> BenchmarkResult {
    let count = 1_000_000;
    info!(count, "benchmarking Black-Scholes pricing");

    let mut timer = Timer::new();
    timer.start();
    let checksum: f64 = (0..count)
        .map(|i| {
            let strike = 50.0 + (i % 1000) as f64 * 0.1;
            let Settings {
                spot_price: s,
                risk_free_rate: r,
                time_to_maturity: t,
                volatility: sigma,
            } = *settings;
            bs_call_price(s, strike, t, r, sigma) + bs_put_price(s, strike, t, r, sigma)
        })
        .sum();

    BenchmarkResult::new(
        "Black-Scholes call+put".to_string(),
        count * 2,
        timer.elapsed_ms(),
        checksum,
    )
}

/// Curve resolution from `--points N`, default `DEFAULT_CURVE_POINTS`
fn curve_points() -> PayoffResult<usize> {
    let args: Vec<String> = env::args().collect();
    let points = match args.iter().position(|a| a == "--points") {
        Some(i) => args
            .get(i + 1)
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| PayoffError::InvalidConfiguration {
                field: "points".to_string(),
                reason: "expected a positive integer".to_string(),
            })?,
        None => DEFAULT_CURVE_POINTS,
    };
    validate_points(points)?;
    Ok(points)
}

fn write_results_to_csv(
    results: &[BenchmarkResult],
    system_info: &SystemInfo,
    filename: &str,
) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);

    // Write system information as comments
    writeln!(file, "# System Information")?;
    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(file, "# CPU: {}", system_info.cpu_model)?;
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores)?;
    writeln!(file, "# Rust Version: {}", system_info.rust_version)?;
    writeln!(file, "# RUSTFLAGS: {}", system_info.rustc_flags)?;
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads)?;
    writeln!(
        file,
        "# Benchmark Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(file, "#")?;

    writeln!(file, "Benchmark,Evaluations,Time_ms,Throughput_per_sec,Checksum")?;
    for result in results {
        writeln!(
            file,
            "{},{},{:.2},{:.0},{:.6}",
            result.name,
            result.evaluations,
            result.time_ms,
            result.throughput_per_sec,
            result.checksum
        )?;
    }
    file.flush()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("payoff-diagram Benchmark Suite");
    println!("==============================\n");

    println!("Gathering system information...");
    let system_info = SystemInfo::gather();

    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU: {}", system_info.cpu_model);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Rust Version: {}", system_info.rust_version);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!();

    let points = match curve_points() {
        Ok(points) => points,
        Err(e) => {
            eprintln!("Invalid --points: {}", e);
            std::process::exit(2);
        }
    };

    let settings = Settings::default();
    let mut all_results = run_curve_benchmarks(&settings, points);
    all_results.push(run_pricing_benchmark(&settings));

    println!("\n{:=<80}", "");
    println!("BENCHMARK RESULTS");
    println!("{:=<80}", "");
    println!(
        "{:<32} {:>12} {:>12} {:>15} {:>16}",
        "Benchmark", "Evaluations", "Time (ms)", "Throughput/s", "Checksum"
    );
    println!("{:-<80}", "");
    for result in &all_results {
        println!(
            "{:<32} {:>12} {:>12.2} {:>15.0} {:>16.4}",
            result.name, result.evaluations, result.time_ms, result.throughput_per_sec, result.checksum
        );
    }
    println!("{:=<80}", "");

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("benchmark_results_{}.csv", timestamp);
    match write_results_to_csv(&all_results, &system_info, &filename) {
        Ok(()) => println!("\nResults saved to: {}", filename),
        Err(e) => eprintln!("\nCould not write {}: {}", filename, e),
    }

    println!("\nTo reproduce these results:");
    println!("1. Use Rust version: {}", system_info.rust_version);
    println!("2. Set RUSTFLAGS: {}", system_info.rustc_flags);
    println!("3. Run: cargo run --bin benchmark --release -- --points {}", points);
    println!(
        "4. Ensure {} CPU threads available",
        system_info.rayon_threads
    );
}
