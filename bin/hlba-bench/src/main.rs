use clap::Parser;
use colored::Colorize;
use hlba_core::{Packet, DEFAULT_ROWS};
use hlba_engine::{Engine, EngineConfig, OverheadModel, Strategy};
use hlba_host::{generate_packets, HostClock};
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Runs identical batches through the enhanced and the baseline engine.
#[derive(Parser)]
struct Cli {
    #[arg(long, default_value_t = 2)] capacity: usize,
    #[arg(long, default_value_t = 2)] leak_rate: u64,
    #[arg(long, default_value_t = DEFAULT_ROWS)] rows: usize,
    /// Packets per batch.
    #[arg(long, default_value_t = 10)] packets: usize,
    /// Payload sizes to sweep, in bytes.
    #[arg(long, value_delimiter = ',', default_value = "5,10,30,70,100")] sizes: Vec<usize>,
    /// Batches per size; the bucket carries over between them.
    #[arg(long, default_value_t = 1)] rounds: usize,
    #[arg(long)] seed: Option<u64>,
    #[arg(long, default_value_t = OverheadModel::default().enhanced)] enhanced_overhead: f64,
    #[arg(long, default_value_t = OverheadModel::default().baseline)] baseline_overhead: f64,
}

#[derive(Default)]
struct Sample {
    time_ms: f64,
    bandwidth_bps: f64,
    admitted: usize,
    dropped: usize,
}

fn run(engine: &mut Engine, batches: &[Vec<Packet>]) -> anyhow::Result<Sample> {
    let mut s = Sample::default();
    for batch in batches {
        let report = engine.process_now(batch)?;
        s.time_ms += report.processing_time_ms;
        s.bandwidth_bps += report.bandwidth_bps;
        s.admitted += report.admitted.len();
        s.dropped += report.dropped.len();
    }
    let n = batches.len().max(1) as f64;
    s.time_ms /= n;
    s.bandwidth_bps /= n;
    Ok(s)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let overhead = OverheadModel { enhanced: cli.enhanced_overhead, baseline: cli.baseline_overhead };
    let base = EngineConfig::new(cli.capacity, cli.leak_rate)
        .with_rows(cli.rows)
        .with_overhead(overhead);
    base.validate()?;

    let mut rng = match cli.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };

    info!(">>> HLBA BENCH: capacity={} leak_rate={}/s rows={} <<<", cli.capacity, cli.leak_rate, cli.rows);

    println!("{}", "Heightened Leaky Bucket vs Baseline".bold());
    println!("{}", "-".repeat(86));
    println!(
        "{:^8} | {:^14} | {:^14} | {:^9} | {:^9} | {:^12} | {:^10}",
        "Size", "Enhanced (ms)", "Baseline (ms)", "Adm/Drop", "Base A/D", "Enh. bps", "Delta (%)"
    );
    println!("{}", "-".repeat(86));

    let mut next_id = 0u64;
    for &size in &cli.sizes {
        let batches: Vec<Vec<Packet>> = (0..cli.rounds)
            .map(|_| {
                let b = generate_packets(cli.packets, size, next_id, &mut rng);
                next_id += cli.packets as u64;
                b
            })
            .collect();

        let mut enhanced = Engine::with_config(base.with_strategy(Strategy::Enhanced), Box::new(HostClock::new()))?;
        let mut baseline = Engine::with_config(base.with_strategy(Strategy::Baseline), Box::new(HostClock::new()))?;

        let e = run(&mut enhanced, &batches)?;
        let b = run(&mut baseline, &batches)?;
        debug!("size={} enhanced={:?} baseline={:?}", size, enhanced.telemetry(), baseline.telemetry());

        let delta = if b.time_ms > 0.0 {
            let pct = (b.time_ms - e.time_ms) / b.time_ms * 100.0;
            let cell = format!("{:^10}", format!("{:+.3}", pct));
            if pct >= 0.0 { cell.green() } else { cell.red() }
        } else {
            format!("{:^10}", "n/a").dimmed()
        };

        println!(
            "{:^8} | {:^14.5} | {:^14.5} | {:^9} | {:^9} | {:^12.0} | {}",
            size,
            e.time_ms,
            b.time_ms,
            format!("{}/{}", e.admitted, e.dropped),
            format!("{}/{}", b.admitted, b.dropped),
            e.bandwidth_bps,
            delta
        );
    }
    Ok(())
}
