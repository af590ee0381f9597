use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tabletop::Direction;

/// Writes one JSON file per game into a directory, numbered from `game_000001.json`.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    moves: Vec<RecordedMove>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            moves: Vec::new(),
        })
    }

    /// Drops moves left over from a game that was aborted with an error.
    pub fn start_game(&mut self) {
        self.moves.clear();
    }

    pub fn store_move(&mut self, player: &str, action: Action) {
        self.moves.push(RecordedMove {
            player: String::from(player),
            action,
        });
    }

    /// Writes out the moves stored since the last recording, together with the result.
    pub fn write_game_recording(&mut self, result: impl ToString) -> anyhow::Result<()> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let writer = BufWriter::new(File::create(filepath)?);
        let recording = GameRecording {
            result: result.to_string(),
            moves: std::mem::take(&mut self.moves),
        };
        serde_json::to_writer_pretty(writer, &recording)?;
        self.num += 1;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GameRecording {
    pub result: String,
    pub moves: Vec<RecordedMove>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordedMove {
    pub player: String,
    pub action: Action,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Fill { row: usize, col: usize },
    Operate { direction: Direction, moved: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Recorder::new(dir.path().join("nope")).is_err());
    }

    #[test]
    fn numbered_recordings() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = Recorder::new(dir.path().to_path_buf()).unwrap();
        recorder.store_move("bot0", Action::Fill { row: 1, col: 2 });
        recorder.write_game_recording("Draw").unwrap();
        recorder.store_move(
            "bot0",
            Action::Operate {
                direction: Direction::Up,
                moved: false,
            },
        );
        recorder.write_game_recording("Stopped").unwrap();
        recorder.store_move("bot1", Action::Fill { row: 0, col: 0 });
        recorder.start_game();
        recorder.write_game_recording("Draw").unwrap();

        let first: GameRecording =
            serde_json::from_reader(File::open(dir.path().join("game_000001.json")).unwrap())
                .unwrap();
        assert_eq!(first.result, "Draw");
        assert_eq!(first.moves.len(), 1);
        assert_eq!(first.moves[0].action, Action::Fill { row: 1, col: 2 });

        let second: serde_json::Value =
            serde_json::from_reader(File::open(dir.path().join("game_000002.json")).unwrap())
                .unwrap();
        assert_eq!(second["moves"][0]["action"]["type"], "operate");
        assert_eq!(second["moves"][0]["action"]["direction"], "up");

        let third: GameRecording =
            serde_json::from_reader(File::open(dir.path().join("game_000003.json")).unwrap())
                .unwrap();
        assert!(third.moves.is_empty());
    }
}
