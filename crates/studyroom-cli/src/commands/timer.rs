use std::io::Write;

use clap::Subcommand;
use studyroom_core::{Config, Event, PomodoroMode, PomodoroSnapshot, PomodoroTimer, TickOutcome};

use super::CmdResult;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a countdown in the foreground (Ctrl-C pauses and exits)
    Run {
        /// study, short-break or long-break
        #[arg(long, default_value = "study")]
        mode: PomodoroMode,
        /// Number of sessions to run back to back
        #[arg(long, default_value = "1")]
        cycles: u32,
    },
    /// Print the fixed session lengths
    Durations,
}

pub fn run(action: TimerAction) -> CmdResult {
    match action {
        TimerAction::Run { mode, cycles } => {
            let config = Config::load_or_default();
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run_sessions(mode, cycles.max(1), &config))
        }
        TimerAction::Durations => {
            for mode in PomodoroMode::ALL {
                println!("{:<12} {}", mode.label(), studyroom_core::timer::format_clock(mode.duration_secs()));
            }
            Ok(())
        }
    }
}

enum Step {
    Tick(Option<TickOutcome>),
    Interrupted,
}

async fn run_sessions(mode: PomodoroMode, cycles: u32, config: &Config) -> CmdResult {
    let mut timer = PomodoroTimer::new();
    timer.set_mode(mode);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut completed = 0;
    while completed < cycles {
        timer.start();
        draw(&timer.snapshot(), config)?;

        loop {
            let step = tokio::select! {
                outcome = timer.tick() => Step::Tick(outcome),
                _ = &mut ctrl_c => Step::Interrupted,
            };
            match step {
                Step::Tick(Some(TickOutcome::Counting(snapshot))) => draw(&snapshot, config)?,
                Step::Tick(Some(TickOutcome::Completed(event))) => {
                    announce(&event, config);
                    completed += 1;
                    break;
                }
                Step::Tick(None) => break,
                Step::Interrupted => {
                    timer.pause();
                    let snapshot = timer.snapshot();
                    println!("\nPaused {} at {}", snapshot.label, snapshot.clock);
                    return Ok(());
                }
            }
        }
    }

    let next = timer.snapshot();
    println!("Next up: {} ({})", next.label, next.clock);
    Ok(())
}

fn draw(snapshot: &PomodoroSnapshot, config: &Config) -> CmdResult {
    let mut out = std::io::stdout().lock();
    write!(out, "\r{:<12} {}", snapshot.label, snapshot.clock)?;
    if config.ui.show_progress {
        const WIDTH: usize = 20;
        let filled = ((snapshot.progress * WIDTH as f64).round() as usize).min(WIDTH);
        write!(out, " [{}{}]", "#".repeat(filled), "-".repeat(WIDTH - filled))?;
    }
    out.flush()?;
    Ok(())
}

fn announce(event: &Event, config: &Config) {
    println!();
    if !config.notifications.enabled {
        return;
    }
    if let Some(message) = event.notification() {
        let bell = if config.notifications.bell { "\x07" } else { "" };
        println!("{bell}{message}");
    }
}
