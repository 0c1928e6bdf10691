use anyhow::Context;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::debug;

use crate::e_message::MainMessage;
use crate::e_msg_parser::parse_structured_messages;

/// Parsed messages of one input, or why they could not be read.
#[derive(Debug)]
pub struct InputMessages {
    pub input: PathBuf,
    pub messages: anyhow::Result<Vec<MainMessage>>,
}

/// Returns true if `path` stands for stdin.
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Reads and parses a single input file (or stdin for `-`).
pub fn read_input(path: &Path) -> anyhow::Result<Vec<MainMessage>> {
    if is_stdin(path) {
        return parse_structured_messages(io::stdin().lock())
            .context("failed to parse diagnostics from stdin");
    }
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    parse_structured_messages(io::BufReader::new(file))
        .with_context(|| format!("failed to parse diagnostics from {}", path.display()))
}

// --- Concurrent or sequential collection ---
/// Parses every input, returning results in input order.
pub fn collect_messages(inputs: Vec<PathBuf>, max_concurrency: usize) -> Vec<InputMessages> {
    collect_with(inputs, max_concurrency, read_input)
}

type ReadFn = fn(&Path) -> anyhow::Result<Vec<MainMessage>>;

fn collect_with(inputs: Vec<PathBuf>, max_concurrency: usize, read: ReadFn) -> Vec<InputMessages> {
    let start_total = Instant::now();
    let mut all = Vec::with_capacity(inputs.len());

    #[cfg(feature = "concurrent")]
    {
        use std::sync::mpsc;
        use threadpool::ThreadPool;

        let pool = ThreadPool::new(max_concurrency.max(1));
        let (tx, rx) = mpsc::channel();
        for (index, input) in inputs.iter().cloned().enumerate() {
            let tx = tx.clone();
            pool.execute(move || {
                let messages = read(&input);
                if let Err(e) = tx.send((index, InputMessages { input, messages })) {
                    debug!("collector went away: {}", e);
                }
            });
        }
        drop(tx);
        pool.join();

        let mut received: Vec<Option<InputMessages>> = inputs.iter().map(|_| None).collect();
        for (index, item) in rx {
            received[index] = Some(item);
        }
        for (slot, input) in received.into_iter().zip(inputs) {
            let item = match slot {
                Some(item) => item,
                None => {
                    tracing::warn!("no result for {}; its worker panicked", input.display());
                    let messages = Err(anyhow::anyhow!("worker reading {} panicked", input.display()));
                    InputMessages { input, messages }
                }
            };
            all.push(item);
        }
    }

    #[cfg(not(feature = "concurrent"))]
    {
        let _ = max_concurrency;
        for input in inputs {
            let messages = read(&input);
            all.push(InputMessages { input, messages });
        }
    }

    debug!("collected {} input(s) in {:?}", all.len(), start_total.elapsed());
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_collect_keeps_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut inputs = Vec::new();
        for i in 0..6 {
            let path = dir.path().join(format!("diag{}.json", i));
            let mut file = File::create(&path).unwrap();
            writeln!(
                file,
                r#"{{"message":"message {}","level":"warning","spans":[]}}"#,
                i
            )
            .unwrap();
            inputs.push(path);
        }

        let collected = collect_messages(inputs.clone(), 3);
        assert_eq!(collected.len(), 6);
        for (i, item) in collected.iter().enumerate() {
            assert_eq!(item.input, inputs[i]);
            let messages = item.messages.as_ref().unwrap();
            assert_eq!(messages[0].text(), format!("message {}", i));
        }
    }

    #[cfg(feature = "concurrent")]
    #[test]
    fn test_panicking_worker_is_reported() {
        fn read_or_panic(path: &Path) -> anyhow::Result<Vec<MainMessage>> {
            if path.ends_with("bad.json") {
                panic!("reader blew up");
            }
            Ok(Vec::new())
        }

        let inputs: Vec<PathBuf> = ["a.json", "bad.json", "c.json"]
            .iter()
            .map(PathBuf::from)
            .collect();
        let collected = collect_with(inputs.clone(), 2, read_or_panic);
        assert_eq!(collected.len(), 3);
        for (item, input) in collected.iter().zip(&inputs) {
            assert_eq!(&item.input, input);
        }
        assert!(collected[0].messages.is_ok());
        let err = collected[1].messages.as_ref().unwrap_err();
        assert!(err.to_string().contains("bad.json"), "{}", err);
        assert!(collected[2].messages.is_ok());
    }

    #[test]
    fn test_missing_file_is_reported() {
        let collected = collect_messages(vec![PathBuf::from("does/not/exist.json")], 1);
        let err = collected[0].messages.as_ref().unwrap_err();
        assert!(err.to_string().contains("failed to open"));
    }
}
