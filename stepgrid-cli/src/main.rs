mod engine;

use std::fs::File;
use std::time::Duration;

use stepgrid_core::codec::{self, PatternSnapshot};
use stepgrid_core::config::{clamp_cycles, Config};
use stepgrid_core::sequencer::offline::START_OFFSET_SECS;
use stepgrid_core::sequencer::{OfflineTransport, TransportClock};
use stepgrid_core::session::Session;
use stepgrid_core::share;
use stepgrid_types::{pack, SEQUENCE_LENGTH};

use engine::PrintEngine;

const USAGE: &str = "\
usage: stepgrid [-v|--verbose] <command>

commands:
  share <pattern.json>                 print a share link for a pattern file
  load <url-or-token>                  print the pattern carried by a link
  play <url-or-token> [--cycles N] [--realtime]
                                       play a shared pattern, printing each trigger";

/// Simulated time advanced per loop iteration in `play`.
const PLAY_SLICE: Duration = Duration::from_millis(10);

fn init_logging(verbose: bool) {
    use simplelog::{LevelFilter, WriteLogger};

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let log_path = dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("stepgrid")
        .join("stepgrid.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path)
        .or_else(|_| File::create(std::env::temp_dir().join("stepgrid.log")))
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("stepgrid: logging disabled, cannot create log file: {}", e);
            return;
        }
    };

    if let Err(e) = WriteLogger::init(log_level, simplelog::Config::default(), log_file) {
        eprintln!("stepgrid: logging disabled: {}", e);
        return;
    }

    log::info!("stepgrid starting (log level: {:?})", log_level);
}

fn main() -> std::io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    init_logging(verbose);

    let realtime = args.iter().any(|a| a == "--realtime");
    let cycles_arg = args.iter().position(|a| a == "--cycles").and_then(|i| args.get(i + 1));
    let cycles = match cycles_arg.map(|c| c.parse::<u32>()) {
        Some(Ok(n)) => Some(n),
        Some(Err(_)) => fail("--cycles expects a positive number"),
        None => None,
    };

    // positional arguments, skipping flags and the value after --cycles
    let mut positional = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--cycles" {
            iter.next();
        } else if !arg.starts_with('-') {
            positional.push(arg.as_str());
        }
    }

    let config = Config::load();
    let result = match positional.as_slice() {
        ["share", path] => share_file(path, &config),
        ["load", location] => load(location),
        ["play", location] => play(location, cycles, realtime, &config),
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    if let Err(msg) = result {
        fail(&msg);
    }
    Ok(())
}

fn fail(msg: &str) -> ! {
    log::error!("{}", msg);
    eprintln!("stepgrid: {}", msg);
    std::process::exit(1);
}

/// Accept either a full link or a bare token.
fn as_location(arg: &str) -> String {
    if arg.contains('?') {
        arg.to_string()
    } else {
        format!("?{}={}", share::PATTERN_PARAM, arg)
    }
}

fn share_file(path: &str, config: &Config) -> Result<(), String> {
    let contents = std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path, e))?;
    let snapshot: PatternSnapshot =
        serde_json::from_str(&contents).map_err(|e| format!("{} is not a pattern: {}", path, e))?;
    if let Err(e) = codec::validate::check(&snapshot) {
        return Err(format!("{}: {}", path, e));
    }
    let token = share::create_share_token(&snapshot).ok_or("could not encode pattern")?;
    println!("{}", share::share_url(config.share_base_url(), &token));
    Ok(())
}

fn load(location: &str) -> Result<(), String> {
    let snapshot = share::load_from_location_string(&as_location(location))
        .ok_or_else(|| "no valid pattern in link (run with -v and see the log for details)".to_string())?;
    let json = serde_json::to_string_pretty(&snapshot).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}

fn play(location: &str, cycles: Option<u32>, realtime: bool, config: &Config) -> Result<(), String> {
    let mut session = Session::from_config(OfflineTransport::new(config.default_bpm()), config);
    if !session.load_from_location(&as_location(location)) {
        return Err("no valid pattern in link (run with -v and see the log for details)".into());
    }

    let cycles = cycles.map_or_else(|| config.playback_cycles(), clamp_cycles);
    let pack_name = pack(session.pattern().selected_pack_index()).map_or("?", |p| p.name);
    println!(
        "playing {} cycle(s) at {} bpm, pack {}",
        cycles,
        session.clock().bpm(),
        pack_name
    );

    let mut engine = PrintEngine::default();
    session.toggle_playback(&mut engine);
    if !session.clock().is_playing() {
        return Err("playback did not start".into());
    }

    // stop half a step before the downbeat that would begin the next cycle
    let step = session.clock().transport().step_duration();
    let steps = f64::from(cycles) * SEQUENCE_LENGTH as f64;
    let end = START_OFFSET_SECS + (steps - 0.5) * step;

    loop {
        let remaining = end - session.clock().transport().now();
        if remaining <= 1e-6 {
            break;
        }
        let slice = PLAY_SLICE.min(Duration::from_secs_f64(remaining));
        let ticks = session.clock_mut().transport_mut().advance(slice);
        for tick in ticks {
            session.on_tick(tick, &mut engine);
        }
        if realtime {
            std::thread::sleep(slice);
        }
    }

    session.toggle_playback(&mut engine);
    println!("{} trigger(s)", engine.triggered);
    Ok(())
}
