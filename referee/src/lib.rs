//! Runs games from the `tabletop` crate between in-process bots and tallies the results.
mod bots;
mod config;
mod game;
mod matchup;
mod recording;
pub use bots::*;
pub use config::*;
pub use game::*;
pub use matchup::*;
pub use recording::*;

pub struct Config {
    pub rng: rand::rngs::StdRng,
    pub recorder: Option<recording::Recorder>,
}
