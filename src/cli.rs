use clap::Parser;

use crate::{pages::game::rules::Variant, utils::version};

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    #[arg(short, long, value_name = "FLOAT", help = "Game ticks per second", default_value_t = 60.0)]
    pub tick_rate: f64,

    #[arg(short, long, value_name = "FLOAT", help = "Frames per second", default_value_t = 60.0)]
    pub frame_rate: f64,

    #[arg(long, value_enum, help = "Rule variant preselected on the home menu")]
    pub variant: Option<Variant>,
}
