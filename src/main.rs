use std::{io, ops::ControlFlow, process, time::Duration};

mod console;
mod options;
mod stats;

use console::{ConsoleCommand, ConsoleRender};
use gridlife::{Driver, Grid, Pace, RuleSet, RunFlag};
use rand::{SeedableRng, rngs::StdRng};
use stats::Recorder;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn seed_grid(grid: &mut Grid, args: &options::Args) -> gridlife::Result<()> {
    match args.seed() {
        Some(seed) => grid.randomize_with(&mut StdRng::seed_from_u64(seed), args.fill()),
        None => grid.randomize(args.fill()),
    }
}

fn rule_label(grid: &Grid) -> String {
    let rules = grid.rules();
    match RuleSet::catalog().iter().find(|entry| entry.rules == *rules) {
        Some(entry) => entry.to_string(),
        None => rules.to_string(),
    }
}

/// Applies console input between generations, blocking while paused
fn console_tick(
    console: &mut ConsoleRender,
    grid: &mut Grid,
    args: &options::Args,
    pace: &mut Pace,
    paused: &mut bool,
) -> io::Result<ControlFlow<()>> {
    loop {
        let mut advance = false;
        let wait = if *paused {
            Duration::from_millis(50)
        } else {
            Duration::ZERO
        };
        while let Some(cmd) = console.poll_events(wait)? {
            match cmd {
                ConsoleCommand::Exit => return Ok(ControlFlow::Break(())),
                ConsoleCommand::TogglePause => *paused = !*paused,
                ConsoleCommand::Step => advance = true,
                ConsoleCommand::Randomize => seed_grid(grid, args).map_err(io::Error::other)?,
                ConsoleCommand::Clear => grid.clear(),
                ConsoleCommand::Faster => pace.faster(),
                ConsoleCommand::Slower => pace.slower(),
                ConsoleCommand::SelectRule(i) => {
                    if let Some(entry) = RuleSet::catalog().get(i) {
                        grid.set_rules(entry.rules);
                        console.set_rule_label(entry.to_string());
                    }
                }
                // clicks on the scrolled-away margin have no cell to toggle
                ConsoleCommand::Toggle(pos) if pos.within(grid.width(), grid.height()) => {
                    grid.toggle(pos.x, pos.y).map_err(io::Error::other)?;
                }
                ConsoleCommand::Resize { cols, rows } => {
                    let height = (rows as i32 - 1).max(1);
                    grid.resize((cols as i32).max(1), height)
                        .map_err(io::Error::other)?;
                }
                ConsoleCommand::Toggle(_) | ConsoleCommand::Handled => {}
            }
        }
        console.set_delay(pace.delay());
        console.render(grid, *paused)?;
        if !*paused || advance {
            return Ok(ControlFlow::Continue(()));
        }
    }
}

fn run_console(
    grid: &mut Grid,
    args: &options::Args,
    driver: &Driver,
    flag: &RunFlag,
    stats: &mut impl Recorder,
) -> io::Result<()> {
    let mut console = ConsoleRender::new(rule_label(grid))?;
    console.set_delay(driver.delay);
    console.render(grid, false)?;

    let mut paused = false;
    let mut failure = None;
    driver.run(grid, flag, |grid, pace| {
        stats.record(pace.steps(), grid.count_alive());
        if stats.has_report() {
            console.set_report(stats.report());
        }
        match console_tick(&mut console, grid, args, pace, &mut paused) {
            Ok(flow) => flow,
            Err(e) => {
                failure = Some(e);
                ControlFlow::Break(())
            }
        }
    });
    std::mem::drop(console);

    failure.map_or(Ok(()), Err)
}

fn run_plain(grid: &mut Grid, driver: &Driver, flag: &RunFlag, stats: &mut impl Recorder) {
    println!("{}: alive {}", rule_label(grid), grid.count_alive());
    driver.run(grid, flag, |grid, pace| {
        stats.record(pace.steps(), grid.count_alive());
        // report metrics every 500ms
        if stats.has_report() {
            println!("{}", stats.report());
        }
        ControlFlow::Continue(())
    });
    println!("gen:{}, alive:{}", grid.generation(), grid.count_alive());
}

fn main() -> io::Result<()> {
    init_tracing();

    let args = match options::Args::from_env() {
        Ok(Some(args)) => args,
        Ok(None) => return Ok(()),
        Err(msg) => {
            eprintln!("gridlife: {}", msg);
            process::exit(2);
        }
    };

    if args.list_rules() {
        for (i, entry) in RuleSet::catalog().iter().enumerate() {
            println!("{}  {}", (i + 1) % 10, entry);
        }
        return Ok(());
    }

    let rules = args.rules().map_err(io::Error::other)?;
    let terminal = if args.console() {
        Some(crossterm::terminal::size()?)
    } else {
        None
    };
    let (width, height) = args.grid_size(terminal);
    let mut grid = Grid::with_rules(width, height, rules).map_err(io::Error::other)?;
    seed_grid(&mut grid, &args).map_err(io::Error::other)?;

    let driver = Driver {
        delay: args.sleep(),
        max_generations: args.generations(),
    };
    let flag = RunFlag::new();
    let mut stats = stats::SwitchRecorder::new(grid.count_alive(), args.stats_file().is_some());

    if args.console() {
        run_console(&mut grid, &args, &driver, &flag, &mut stats)?;
    } else {
        run_plain(&mut grid, &driver, &flag, &mut stats);
    }

    if let Some(file_name) = args.stats_file() {
        stats.save(file_name)?;
    }

    Ok(())
}
