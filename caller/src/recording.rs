use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use bingo::Snapshot;
use serde::{Deserialize, Serialize};

/// One thing that happened during a session, in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Called { number: u32 },
    Marked { row: usize, column: usize, number: u32 },
    RowWon { row: usize },
    ColumnWon { column: usize },
    BoardWon { calls: usize },
    CallsExhausted { calls: usize },
}

/// A full session on disk: the event log plus the state it ended in.
#[derive(Serialize, Deserialize)]
pub struct SessionRecording {
    pub events: Vec<SessionEvent>,
    pub final_state: Snapshot,
}

/// Writes one JSON file per session into a directory.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    events: Vec<SessionEvent>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            events: Vec::new(),
        })
    }

    pub fn record(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    /// Drains the buffered events into `session_NNNNNN.json`.
    pub fn write_session(&mut self, final_state: Snapshot) -> anyhow::Result<()> {
        let filepath = self.directory.join(format!("session_{:0>6}.json", self.num));
        let writer = BufWriter::new(File::create(filepath)?);
        serde_json::to_writer_pretty(
            writer,
            &SessionRecording {
                events: std::mem::take(&mut self.events),
                final_state,
            },
        )?;
        self.num += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bingo::{ColumnRange, GameConfig, GameEngine};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn written_sessions_parse_back() {
        let directory = std::env::temp_dir().join(format!("caller_rec_{}", std::process::id()));
        std::fs::create_dir_all(&directory).unwrap();

        let config = GameConfig {
            rows: 1,
            column_ranges: vec![ColumnRange { start: 1, end: 9 }],
            target_count: 1,
            call_interval_ms: 1,
        };
        let engine = GameEngine::new(config, StdRng::seed_from_u64(5)).unwrap();

        let mut recorder = Recorder::new(directory.clone()).unwrap();
        recorder.record(SessionEvent::Called { number: 4 });
        recorder.record(SessionEvent::BoardWon { calls: 1 });
        recorder.write_session(engine.snapshot()).unwrap();

        let file = File::open(directory.join("session_000001.json")).unwrap();
        let recording: SessionRecording = serde_json::from_reader(file).unwrap();
        assert_eq!(recording.events.len(), 2);
        assert_eq!(recording.events[0], SessionEvent::Called { number: 4 });
        assert_eq!(recording.final_state, engine.snapshot());

        std::fs::remove_dir_all(directory).unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let missing = std::env::temp_dir().join("caller_rec_does_not_exist");
        assert!(Recorder::new(missing).is_err());
    }
}
