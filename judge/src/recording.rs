use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use pursuit::Snapshot;
use serde::{Deserialize, Serialize};

/// Collects the snapshots of one game and writes them to a numbered JSON file.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    snapshots: Vec<Snapshot>,
}

/// The contents of one recording file.
#[derive(Serialize, Deserialize)]
pub struct GameRecording {
    pub snapshots: Vec<Snapshot>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            snapshots: Vec::new(),
        })
    }

    pub fn store_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    /// Writes out everything stored since the last call, and starts the next game.
    pub fn write_game_recording(&mut self) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let mut writer = BufWriter::new(File::create(&filepath)?);
        let recording = GameRecording {
            snapshots: std::mem::take(&mut self.snapshots),
        };
        serde_json::to_writer_pretty(&mut writer, &recording)?;
        writer.flush()?;
        self.num += 1;
        Ok(filepath)
    }
}

#[cfg(test)]
mod tests {
    use pursuit::{GridGraph, PursuerCount, PursuitGame};

    use super::*;

    #[test]
    fn missing_directory_is_rejected() {
        assert!(Recorder::new(PathBuf::from("/this/directory/does/not/exist")).is_err());
    }

    #[test]
    fn writes_numbered_files() {
        let directory = std::env::temp_dir().join(format!("judge_recording_{}", std::process::id()));
        std::fs::create_dir_all(&directory).unwrap();
        let mut recorder = Recorder::new(directory.clone()).unwrap();

        let game = PursuitGame::new(GridGraph::build(2, 2).unwrap(), PursuerCount::One);
        recorder.store_snapshot(game.snapshot());
        recorder.store_snapshot(game.snapshot());
        let first = recorder.write_game_recording().unwrap();
        let second = recorder.write_game_recording().unwrap();
        assert_eq!(first, directory.join("game_000001.json"));
        assert_eq!(second, directory.join("game_000002.json"));

        let recording: GameRecording =
            serde_json::from_reader(File::open(&first).unwrap()).unwrap();
        assert_eq!(recording.snapshots.len(), 2);
        assert_eq!(recording.snapshots[0], game.snapshot());
        let recording: GameRecording =
            serde_json::from_reader(File::open(&second).unwrap()).unwrap();
        assert!(recording.snapshots.is_empty());

        std::fs::remove_dir_all(&directory).unwrap();
    }
}
