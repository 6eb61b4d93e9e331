//! Matchday CLI
//!
//! Plays a match in the terminal, runs seeded batches and exposes the
//! formation registry and xG model for quick inspection.

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use matchday_core::engine::{MomentumCall, RecordedEvent};
#[cfg(feature = "cli")]
use matchday_core::{
    estimate_shot_quality, simulate_batch, EventUpdate, FinalSummary, Formation, MatchObserver,
    MatchSettings, RunOutcome, Side, SimConfig, Simulation, SquadTemplate,
};
#[cfg(feature = "cli")]
use serde::Serialize;
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "matchday")]
#[command(about = "Simulate football matches from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum Speed {
    /// No waiting between events
    Instant,
    /// 100x faster than realtime
    Fast,
    /// 90 match minutes in 10 real minutes
    Realtime,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Play one match and print the commentary
    Run {
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Pressing dial, 0-10
        #[arg(long, default_value_t = 5.0)]
        press: f32,

        /// Tempo dial, 0-10
        #[arg(long, default_value_t = 5.0)]
        tempo: f32,

        #[arg(long, default_value = "4-4-2")]
        formation: String,

        #[arg(long, value_enum, default_value = "instant")]
        speed: Speed,

        /// JSON config file; its timing section is replaced by --speed
        #[arg(long)]
        config: Option<PathBuf>,

        /// JSON array of 11 roster entries for the home side
        #[arg(long)]
        home_roster: Option<PathBuf>,

        /// JSON array of 11 roster entries for the away side
        #[arg(long)]
        away_roster: Option<PathBuf>,

        /// Print a JSON report instead of commentary
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Play many seeded matches instantly and print aggregates
    Batch {
        #[arg(long, default_value_t = 1)]
        first_seed: u64,

        #[arg(long, default_value_t = 100)]
        count: usize,

        #[arg(long, default_value_t = 5.0)]
        press: f32,

        #[arg(long, default_value_t = 5.0)]
        tempo: f32,

        #[arg(long, default_value = "4-4-2")]
        formation: String,
    },

    /// List the formation registry
    Formations,

    /// Expected-goal value of a shot location
    Xg {
        x: f32,
        y: f32,

        /// Shot taken by the away side (attacking y = 100)
        #[arg(long, default_value = "false")]
        away: bool,
    },
}

// ============================================
// Console observer
// ============================================

#[cfg(feature = "cli")]
#[derive(Default)]
struct ConsoleObserver {
    quiet: bool,
    ticks: usize,
}

#[cfg(feature = "cli")]
impl MatchObserver for ConsoleObserver {
    fn on_start(&mut self) {
        if !self.quiet {
            println!("Kick-off");
        }
    }

    fn on_tick(&mut self, _frame: &matchday_core::TickFrame) {
        self.ticks += 1;
    }

    fn on_event(&mut self, update: &EventUpdate<'_>) {
        if self.quiet {
            return;
        }
        let e = update.event;
        let s = &update.snapshot;
        if e.is_goal() {
            println!("{:>2}' {}  [{}-{}]", e.minute, e.description, s.score_home, s.score_away);
        } else {
            println!("{:>2}' {}", e.minute, e.description);
        }
        if let Some(w) = update.fatigue_warning {
            println!("    {} is tiring (fatigue {:.0})", w.name, w.fatigue);
        }
        match update.momentum_call {
            Some(MomentumCall::HomeDominant) => println!("    The home side is in complete control"),
            Some(MomentumCall::AwayDominant) => println!("    The visitors have all the momentum"),
            None => {}
        }
    }

    fn on_end(&mut self, summary: &FinalSummary) {
        if !self.quiet {
            print_summary(summary, self.ticks);
        }
    }
}

/// Forwards to the console and keeps an owned copy for `--json`.
#[cfg(feature = "cli")]
struct ReportObserver {
    console: ConsoleObserver,
    recorder: matchday_core::RecordingObserver,
}

#[cfg(feature = "cli")]
impl MatchObserver for ReportObserver {
    fn on_start(&mut self) {
        self.console.on_start();
        self.recorder.on_start();
    }

    fn on_tick(&mut self, frame: &matchday_core::TickFrame) {
        self.console.on_tick(frame);
        self.recorder.on_tick(frame);
    }

    fn on_event(&mut self, update: &EventUpdate<'_>) {
        self.console.on_event(update);
        self.recorder.on_event(update);
    }

    fn on_end(&mut self, summary: &FinalSummary) {
        self.console.on_end(summary);
        self.recorder.on_end(summary);
    }
}

#[cfg(feature = "cli")]
#[derive(Serialize)]
struct RunReport<'a> {
    seed: u64,
    formation: &'a str,
    outcome: RunOutcome,
    ticks: usize,
    events: &'a [RecordedEvent],
    summary: Option<&'a FinalSummary>,
}

#[cfg(feature = "cli")]
fn print_summary(summary: &FinalSummary, ticks: usize) {
    println!("\nFull time: {}-{}", summary.score_home, summary.score_away);
    println!(
        "   Shots:    {:>3} - {:<3}",
        summary.totals.home.shots, summary.totals.away.shots
    );
    println!(
        "   Passes:   {:>3} - {:<3}",
        summary.totals.home.passes, summary.totals.away.passes
    );
    println!("   xG:      {:.2} - {:.2}", summary.totals.home.xg, summary.totals.away.xg);
    println!("   Momentum: {:.2}", summary.momentum);
    if ticks > 0 {
        println!("   Ticks:    {}", ticks);
    }
    if let Some(best) = summary
        .home_players
        .iter()
        .max_by(|a, b| a.stats.rating.total_cmp(&b.stats.rating))
    {
        println!("   Best home player: {} ({:.1})", best.name, best.stats.rating);
    }
}

#[cfg(feature = "cli")]
fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} from {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid {what} in {}", path.display()))
}

#[cfg(feature = "cli")]
fn run_match(
    seed: u64,
    settings: MatchSettings,
    speed: Speed,
    config: Option<PathBuf>,
    home_roster: Option<PathBuf>,
    away_roster: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let mut config = match config {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config from {}", path.display()))?;
            SimConfig::from_json_str(&text).with_context(|| format!("invalid config in {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    config.scheduler = match speed {
        Speed::Instant => SimConfig::instant().scheduler,
        Speed::Fast => SimConfig::fast().scheduler,
        Speed::Realtime => SimConfig::realtime().scheduler,
    };

    let mut sim = Simulation::new(seed, config).context("failed to create simulation")?;
    if home_roster.is_some() || away_roster.is_some() {
        let home = match home_roster {
            Some(path) => read_json::<SquadTemplate>(&path, "home roster")?,
            None => SquadTemplate::home_demo(),
        };
        let away = match away_roster {
            Some(path) => read_json::<SquadTemplate>(&path, "away roster")?,
            None => SquadTemplate::away_demo(),
        };
        sim = sim.with_rosters(home, away).context("roster rejected")?;
    }

    let mut observer = ReportObserver {
        console: ConsoleObserver { quiet: json, ticks: 0 },
        recorder: matchday_core::RecordingObserver::new(),
    };
    let outcome = sim.run(&settings, &mut observer).context("match could not start")?;

    if json {
        let report = RunReport {
            seed,
            formation: sim.state().formation.id(),
            outcome,
            ticks: observer.recorder.ticks,
            events: &observer.recorder.events,
            summary: observer.recorder.summary.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if outcome != RunOutcome::Completed {
        println!("Match ended early: {:?}", outcome);
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            seed,
            press,
            tempo,
            formation,
            speed,
            config,
            home_roster,
            away_roster,
            json,
        } => {
            let settings = MatchSettings::new(press, tempo, formation);
            run_match(seed, settings, speed, config, home_roster, away_roster, json)?;
        }

        Commands::Batch {
            first_seed,
            count,
            press,
            tempo,
            formation,
        } => {
            let settings = MatchSettings::new(press, tempo, formation);
            let summary = simulate_batch(first_seed, count, &settings, &SimConfig::default())
                .context("batch failed")?;
            println!("Matches:   {}", summary.matches);
            println!(
                "Results:   {} home wins, {} draws, {} away wins",
                summary.home_wins, summary.draws, summary.away_wins
            );
            println!("Goals:     {:.2} - {:.2}", summary.avg_goals_home, summary.avg_goals_away);
            println!("xG:        {:.2} - {:.2}", summary.avg_xg_home, summary.avg_xg_away);
            println!("Momentum:  {:.3}", summary.avg_final_momentum);
        }

        Commands::Formations => {
            for formation in Formation::ALL {
                println!("{}", formation.id());
                for (slot, (x, y)) in formation.positions().iter().enumerate() {
                    println!("   {:>2}: ({:>4.1}, {:>4.1})", slot, x, y);
                }
            }
        }

        Commands::Xg { x, y, away } => {
            let side = if away { Side::Away } else { Side::Home };
            println!("{:.3}", estimate_shot_quality(x, y, side));
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("matchday CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
