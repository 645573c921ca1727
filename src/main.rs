use std::{process::exit, time::Duration};

use clap::{Parser, ValueEnum};
use log::info;

pub use utils::Pos;
mod utils;

pub use world::{EdgePolicy, World, WorldError};
pub mod world;

pub use pattern::Pattern;
pub mod pattern;

pub use session::{Session, SessionOptions};
mod session;

pub use view::Screen;
mod view;

#[derive(Parser, Debug)]
#[command(name = "termlife")]
#[command(about = "an interactive terminal playground for conway's game of life")]
struct Args {
    /// board width in cells, overrides the preset
    #[arg(long)]
    width: Option<i32>,

    /// board height in cells, overrides the preset
    #[arg(long)]
    height: Option<i32>,

    /// board size preset
    #[arg(short, long, value_enum, default_value = "small")]
    preset: SizePreset,

    /// automatic steps per second
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,

    /// edge handling at the board border
    #[arg(short, long, value_enum, default_value = "wrap")]
    edge: EdgeArg,

    /// stamp a named pattern near the origin of the starting board
    #[arg(long, conflicts_with_all = ["random", "empty"])]
    pattern: Option<String>,

    /// fill the starting board randomly instead
    #[arg(long, conflicts_with = "empty")]
    random: bool,

    /// start with an empty board
    #[arg(long)]
    empty: bool,

    /// start paused, in editor mode
    #[arg(long)]
    paused: bool,

    /// pause automatically once the board repeats itself
    #[arg(long)]
    halt_on_cycle: bool,
}

impl Args {
    fn dimensions(&self) -> (i32, i32) {
        let (preset_width, preset_height) = self.preset.dimensions();
        (
            self.width.unwrap_or(preset_width),
            self.height.unwrap_or(preset_height),
        )
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SizePreset {
    Small,
    Medium,
    Large,
}

impl SizePreset {
    fn dimensions(self) -> (i32, i32) {
        match self {
            Self::Small => (40, 20),
            Self::Medium => (80, 30),
            Self::Large => (120, 40),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EdgeArg {
    Wrap,
    Clip,
}

impl From<EdgeArg> for EdgePolicy {
    fn from(arg: EdgeArg) -> Self {
        match arg {
            EdgeArg::Wrap => EdgePolicy::Wrap,
            EdgeArg::Clip => EdgePolicy::Clip,
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let (width, height) = args.dimensions();
    let mut world = World::new(width, height).unwrap_or_else(|error| {
        eprintln!("[error] {error}");
        exit(1);
    });
    world.set_edge_policy(args.edge.into());

    if args.random {
        pattern::scatter(&mut world, &mut rand::thread_rng(), pattern::SCATTER_DENSITY);
    } else if !args.empty {
        let name = args.pattern.as_deref().unwrap_or("glider");
        let seed = Pattern::by_name(name).unwrap_or_else(|| {
            let known = pattern::CATALOG
                .iter()
                .map(|pattern| pattern.name)
                .collect::<Vec<_>>()
                .join(", ");
            eprintln!("[error] unknown pattern '{name}', try one of: {known}");
            exit(1);
        });
        seed.stamp(&mut world, pos!(1, 1));
    }

    info!(
        "starting a {width}x{height} board, {} edges, {} steps per second",
        world.edge_policy().label(),
        args.fps
    );

    let options = SessionOptions {
        start_paused: args.paused,
        step_interval: Duration::from_millis(1000 / u64::from(args.fps)),
        halt_on_cycle: args.halt_on_cycle,
    };
    if let Err(error) = Session::new(world, options).run() {
        eprintln!("[error] {error}");
        exit(1);
    }
}
