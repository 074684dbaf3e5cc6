//! Hot Potato headless driver
//!
//! Runs a seeded match with bot-controlled players on a fixed-timestep loop
//! and prints a JSON summary.
//!
//! Usage: `hot-potato [seed] [ticks] [players] [tuning.json]`

use std::f32::consts::PI;
use std::process::ExitCode;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use hot_potato::consts::{ARENA_CENTER, MAX_SUBSTEPS, SIM_DT};
use hot_potato::sim::{GameState, InputState, TickInput, tick};
use hot_potato::{Standings, Tuning};

/// Frame time the driver pretends the host delivers
const FRAME_DT: f32 = 1.0 / 50.0;

struct Args {
    seed: u64,
    ticks: u64,
    players: usize,
    tuning: Option<String>,
}

impl Args {
    fn parse() -> Result<Self, Box<dyn std::error::Error>> {
        let mut args = std::env::args().skip(1);
        let seed = args.next().map(|s| s.parse()).transpose()?.unwrap_or(12345);
        let ticks = args.next().map(|s| s.parse()).transpose()?.unwrap_or(3600);
        let players = args.next().map(|s| s.parse()).transpose()?.unwrap_or(4);
        let tuning = args.next();
        Ok(Self {
            seed,
            ticks,
            players,
            tuning,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary<'a> {
    seed: u64,
    ticks: u64,
    elapsed: f32,
    winner: Option<&'a str>,
    placements: Vec<&'a str>,
    standings: &'a Standings,
    ball_owner: Option<&'a str>,
    ball: Vec2,
    ball_touches_wall: bool,
    boosters: usize,
    obstacles: usize,
}

/// Bot input: every player chases the ball's bearing around the ring
fn bot_input(state: &GameState) -> TickInput {
    let ball = state.ball.pos - ARENA_CENTER;
    let ball_angle = ball.y.atan2(ball.x);
    let mut input = TickInput::default();
    for player in &state.players {
        let rel = player.pos - ARENA_CENTER;
        let mut diff = ball_angle - rel.y.atan2(rel.x);
        if diff > PI {
            diff -= 2.0 * PI;
        } else if diff < -PI {
            diff += 2.0 * PI;
        }
        input.set(&player.name, InputState::movement(0.0, (diff * 4.0).clamp(-1.0, 1.0)));
    }
    input
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse()?;
    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    let names: Vec<String> = (1..=args.players).map(|i| format!("p{i}")).collect();
    let mut state = GameState::new(&names, tuning)?;
    let mut standings = Standings::new(&names);
    let mut rng = Pcg32::seed_from_u64(args.seed);

    log::info!(
        "Hot Potato: seed {}, {} ticks, {} players",
        args.seed,
        args.ticks,
        args.players
    );

    let mut accumulator = 0.0f32;
    'frames: while state.time_ticks < args.ticks {
        accumulator += FRAME_DT.min(0.1);

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = bot_input(&state);
            tick(&mut state, &input, SIM_DT, &mut rng)?;
            standings.record(state.time_ticks, &state.events);
            accumulator -= SIM_DT;
            substeps += 1;

            if state.time_ticks >= args.ticks {
                break 'frames;
            }
        }
    }

    let summary = Summary {
        seed: args.seed,
        ticks: state.time_ticks,
        elapsed: state.elapsed,
        winner: standings.winner(),
        placements: standings.placements(),
        standings: &standings,
        ball_owner: state.ball_owner.as_deref(),
        ball: state.ball.pos,
        ball_touches_wall: state.ball_touches_wall(),
        boosters: state.boosters.len(),
        obstacles: state.obstacles.len(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("hot-potato: {e}");
            ExitCode::FAILURE
        }
    }
}
