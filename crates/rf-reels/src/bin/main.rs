//! reel-sim — headless spin simulator
//!
//! Usage:
//!   reel-sim --spins 100                 - Full orchestrated spins at 60 fps
//!   reel-sim --spins 10000 --engine-only - Outcome engine draws only
//!   reel-sim --config slot.yaml --json   - Config file, JSON report

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use rf_reels::{
    BET, BalanceLedger, HeadlessBackend, OutcomeEngine, PaylineWin, REEL_COUNT, SYMBOL_COUNT,
    SessionStats, SlotConfig, SpinOrchestrator, TextureAtlas, TimingProfile, symbol_name,
};

/// Frames allowed per spin before giving up
const MAX_FRAMES_PER_SPIN: u32 = 100_000;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProfileArg {
    Normal,
    Turbo,
}

impl From<ProfileArg> for TimingProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Normal => TimingProfile::Normal,
            ProfileArg::Turbo => TimingProfile::Turbo,
        }
    }
}

#[derive(Parser)]
#[command(name = "reel-sim", about = "ReelForge headless spin simulator")]
struct Cli {
    /// Outcome seed (overrides the config file)
    #[arg(short, long)]
    seed: Option<u32>,

    /// Number of spins to play
    #[arg(short = 'n', long, default_value_t = 100)]
    spins: u32,

    /// Starting balance (overrides the config file)
    #[arg(short, long)]
    balance: Option<u64>,

    /// Timing profile
    #[arg(short, long, value_enum)]
    profile: Option<ProfileArg>,

    /// Tick step in milliseconds
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    frame_ms: f64,

    /// Load config from a JSON or YAML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip reel animation, draw outcomes straight from the engine
    #[arg(long)]
    engine_only: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct SpinReport {
    spin_id: u64,
    grid: Vec<Vec<u32>>,
    wins: Vec<PaylineWin>,
    total_win: u64,
    balance: u64,
}

#[derive(Debug, Serialize)]
struct SimReport {
    seed: u32,
    mode: &'static str,
    spins_requested: u32,
    spins_played: u64,
    initial_balance: u64,
    final_balance: u64,
    total_bet: u64,
    total_win: u64,
    biggest_win: u64,
    rtp: f64,
    hit_rate: f64,
    spins: Vec<SpinReport>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = build_config(&cli)?;
    let report = if cli.engine_only {
        run_engine_only(&config, cli.spins)
    } else {
        run_orchestrated(&config, cli.spins, cli.frame_ms)?
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{json}");
    } else {
        print_report(&report);
    }
    Ok(())
}

fn build_config(cli: &Cli) -> Result<SlotConfig> {
    let mut config = match &cli.config {
        Some(path) => SlotConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SlotConfig::seeded(12345),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(balance) = cli.balance {
        config.initial_balance = balance;
    }
    if let Some(profile) = cli.profile {
        config.timing_profile = profile.into();
        config.timing = None;
    }
    // Pin the seed so the report can name it
    config.seed = Some(config.resolved_seed());
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn run_engine_only(config: &SlotConfig, spins: u32) -> SimReport {
    let seed = config.resolved_seed();
    let mut engine = OutcomeEngine::new(seed, SYMBOL_COUNT);
    let mut ledger = BalanceLedger::new(config.initial_balance);
    let mut stats = SessionStats::default();
    let mut report = SimReport::new(seed, "engine_only", spins, config.initial_balance);

    for spin_id in 1..=u64::from(spins) {
        if ledger.debit(BET).is_err() {
            log::info!("Out of credits after {} spins", spin_id - 1);
            break;
        }
        let grid = engine.spin(REEL_COUNT);
        let evaluation = engine.evaluate(&grid);
        let balance = ledger.credit(evaluation.total_win);

        stats.total_spins += 1;
        stats.completed_spins += 1;
        stats.total_bet += BET;
        stats.total_win += evaluation.total_win;
        if evaluation.total_win > 0 {
            stats.winning_spins += 1;
            stats.biggest_win = stats.biggest_win.max(evaluation.total_win);
        }
        report.push(SpinReport {
            spin_id,
            grid: grid.to_vecs(),
            wins: evaluation.wins,
            total_win: evaluation.total_win,
            balance,
        });
    }
    report.finish(&stats, ledger.balance());
    report
}

fn run_orchestrated(config: &SlotConfig, spins: u32, frame_ms: f64) -> Result<SimReport> {
    if !(frame_ms.is_finite() && frame_ms > 0.0) {
        bail!("--frame-ms must be positive, got {frame_ms}");
    }

    let mut orch: SpinOrchestrator<HeadlessBackend> =
        SpinOrchestrator::new(config.clone()).context("Failed to create orchestrator")?;
    orch.initialize(
        HeadlessBackend::new(),
        TextureAtlas::sequential(SYMBOL_COUNT),
    )
    .context("Failed to initialize orchestrator")?;

    let mut report = SimReport::new(orch.seed(), "orchestrated", spins, orch.balance());

    for _ in 0..spins {
        if let Err(e) = orch.spin() {
            log::info!("Spin rejected: {e}");
            break;
        }

        let mut frames = 0;
        while !orch.is_idle() {
            if frames == MAX_FRAMES_PER_SPIN {
                bail!("Spin did not finish within {MAX_FRAMES_PER_SPIN} frames");
            }
            orch.tick(frame_ms);
            frames += 1;
        }

        let trace = orch.trace().ok_or_else(|| anyhow!("No stage trace recorded"))?;
        trace
            .validate()
            .with_context(|| format!("Spin {} broke sequencing", trace.spin_id))?;

        let spin = orch
            .last_spin()
            .ok_or_else(|| anyhow!("Spin finished without a result"))?;
        report.push(SpinReport {
            spin_id: spin.spin_id,
            grid: spin.grid.to_vecs(),
            wins: spin.wins.clone(),
            total_win: spin.wins.iter().map(|w| w.amount).sum(),
            balance: orch.balance(),
        });
    }

    report.finish(orch.stats(), orch.balance());
    orch.clean_up();
    Ok(report)
}

impl SimReport {
    fn new(seed: u32, mode: &'static str, spins_requested: u32, initial_balance: u64) -> Self {
        Self {
            seed,
            mode,
            spins_requested,
            spins_played: 0,
            initial_balance,
            final_balance: initial_balance,
            total_bet: 0,
            total_win: 0,
            biggest_win: 0,
            rtp: 0.0,
            hit_rate: 0.0,
            spins: Vec::new(),
        }
    }

    fn push(&mut self, spin: SpinReport) {
        self.spins.push(spin);
    }

    fn finish(&mut self, stats: &SessionStats, final_balance: u64) {
        self.spins_played = stats.completed_spins;
        self.final_balance = final_balance;
        self.total_bet = stats.total_bet;
        self.total_win = stats.total_win;
        self.biggest_win = stats.biggest_win;
        self.rtp = stats.rtp();
        self.hit_rate = stats.hit_rate();
    }
}

fn print_report(report: &SimReport) {
    println!("🎰 reel-sim ({}) seed {}\n", report.mode, report.seed);
    for spin in report.spins.iter().filter(|s| s.total_win > 0) {
        println!(
            "  spin {:>5}: won {:>5} on {} line(s), balance {}",
            spin.spin_id,
            spin.total_win,
            spin.wins.len(),
            spin.balance
        );
        for win in &spin.wins {
            println!(
                "               line {:>2}: {} x{} = {}",
                win.line_index,
                symbol_name(win.symbol_id),
                win.count,
                win.amount
            );
        }
    }
    println!();
    println!("  Spins:    {}/{}", report.spins_played, report.spins_requested);
    println!("  Balance:  {} → {}", report.initial_balance, report.final_balance);
    println!("  Bet/Win:  {} / {}", report.total_bet, report.total_win);
    println!("  RTP:      {:.2}%", report.rtp * 100.0);
    println!("  Hit rate: {:.2}%", report.hit_rate * 100.0);
    println!("  Biggest:  {}", report.biggest_win);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rf_reels::TimingConfig;

    fn config() -> SlotConfig {
        SlotConfig::seeded(12345)
            .with_balance(1_000_000)
            .with_timing(TimingConfig::turbo())
    }

    #[test]
    fn test_orchestrated_report_uses_session_stats() {
        let report = run_orchestrated(&config(), 40, 1000.0 / 60.0).unwrap();
        let reported: u64 = report.spins.iter().map(|s| s.total_win).sum();

        assert_eq!(report.spins_played, 40);
        assert_eq!(report.total_bet, 40 * BET);
        assert_eq!(report.total_win, reported);
        assert_eq!(
            report.final_balance,
            1_000_000 - report.total_bet + report.total_win
        );
        assert!(report.hit_rate > 0.0 && report.hit_rate <= 1.0);
    }

    #[test]
    fn test_both_modes_agree() {
        let engine = run_engine_only(&config(), 40);
        let orchestrated = run_orchestrated(&config(), 40, 1000.0 / 60.0).unwrap();

        assert_eq!(engine.total_win, orchestrated.total_win);
        assert_eq!(engine.biggest_win, orchestrated.biggest_win);
        assert_eq!(engine.rtp, orchestrated.rtp);
        assert_eq!(engine.hit_rate, orchestrated.hit_rate);
        assert_eq!(engine.final_balance, orchestrated.final_balance);
    }

    #[test]
    fn test_engine_only_stops_when_broke() {
        let report = run_engine_only(&SlotConfig::seeded(12345).with_balance(BET - 1), 10);
        assert_eq!(report.spins_played, 0);
        assert_eq!(report.rtp, 0.0);
        assert_eq!(report.final_balance, BET - 1);
    }
}
