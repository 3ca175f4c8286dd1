//! Bit Arena entry point
//!
//! Runs a headless CPU-only exhibition match. An optional JSON config path
//! may be passed as the first argument.

#[cfg(not(target_arch = "wasm32"))]
use bit_arena::settings::GameConfig;
#[cfg(not(target_arch = "wasm32"))]
use bit_arena::sim::{MatchPhase, MatchState, RenderSnapshot, TickInput, tick};

/// Give up on a match that never settles (one simulated hour)
#[cfg(not(target_arch = "wasm32"))]
const MAX_TICKS: u64 = 36_000;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("Bit Arena (headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let dt = config.settings.dt;
    let mut state = MatchState::new(config.settings, config.tuning)?;
    log::info!("Match initialized with seed: {}", state.settings.seed);

    // Title -> Setup
    let mut input = TickInput::confirm();
    tick(&mut state, &input, dt);
    input.clear_edges();

    // Nobody at the keyboard: pick the CPU-only option
    let Some(cpu_only) = state.settings.human_options.iter().position(|&n| n == 0) else {
        return Err("config offers no CPU-only option (human count 0)".into());
    };
    state.setup.humans = cpu_only;
    input.confirm = true;
    tick(&mut state, &input, dt);
    input.clear_edges();

    if state.phase != MatchPhase::Countdown {
        return Err("setup needs at least two competitors".into());
    }

    let mut last_phase = state.phase;
    while state.phase != MatchPhase::WinnerDisplay {
        if state.time_ticks >= MAX_TICKS {
            log::warn!("Match still running after {} ticks, stopping", MAX_TICKS);
            break;
        }
        tick(&mut state, &input, dt);

        if state.phase != last_phase {
            let snapshot = RenderSnapshot::capture(&state);
            log::info!(
                "t={:.1}s {:?} alive={} {}",
                state.time_ticks as f32 * dt,
                snapshot.phase,
                state.alive_count,
                snapshot.overlay.text()
            );
            last_phase = state.phase;
        }
    }

    let snapshot = RenderSnapshot::capture(&state);
    println!("{}", snapshot.overlay.text());
    log::debug!("Final snapshot: {}", snapshot.to_json()?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on wasm
}
