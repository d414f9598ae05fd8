//! JSON-lines server over stdin/stdout

use crate::protocol;
use crate::service::GameService;
use crate::stats::write_stats;
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::{info, warn};

/// Serve requests from stdin until EOF, persisting stats to `stats_path`
///
/// # Errors
///
/// Returns an error if stdin/stdout fail or the final stats write fails.
pub fn run_serve(service: &GameService, stats_path: &Path) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    serve_with(service, stdin.lock(), stdout.lock(), stats_path)
}

/// Same as [`run_serve`] over arbitrary streams
///
/// # Errors
///
/// Returns an error if the streams fail or the final stats write fails.
pub fn serve_with<R: BufRead, W: Write>(
    service: &GameService,
    input: R,
    output: W,
    stats_path: &Path,
) -> Result<()> {
    info!(stats = %stats_path.display(), "serving JSON lines on stdin");

    protocol::serve(service, input, output, |service| {
        if let Err(err) = write_stats(stats_path, &service.stats_snapshot()) {
            warn!("failed to persist stats: {err:#}");
        }
    })
    .context("protocol stream failed")?;

    write_stats(stats_path, &service.stats_snapshot())
        .with_context(|| format!("write {}", stats_path.display()))?;
    info!(sessions = service.session_count(), "input closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::service::ServiceConfig;
    use crate::stats::load_stats;
    use crate::wordlists::loader::words_from_slice;
    use crate::wordlists::{FixedWordSource, Vocabulary};
    use serde_json::Value;
    use std::io::Cursor;
    use std::sync::Arc;

    fn service() -> GameService {
        GameService::new(
            Box::new(FixedWordSource::new(Word::parse("crane").unwrap())),
            Arc::new(Vocabulary::new(words_from_slice(&["crane"]))),
            ServiceConfig::default(),
        )
    }

    #[test]
    fn finished_game_is_persisted() {
        let temp = tempfile::tempdir().unwrap();
        let stats_path = temp.path().join("stats.json");
        let service = service();

        let (id, _) = service.create_default_session("carol").unwrap();
        let input = format!(
            "{{\"op\":\"guess\",\"session_id\":\"{id}\",\"word\":\"crane\"}}\n\
             {{\"op\":\"stats\",\"user_id\":\"carol\"}}\n"
        );
        let mut output = Vec::new();
        serve_with(&service, Cursor::new(input), &mut output, &stats_path).unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["status"], "won");
        assert_eq!(lines[1]["stats"]["played"], 1);

        let book = load_stats(&stats_path).unwrap();
        assert_eq!(book.get("carol").won, 1);
    }

    #[test]
    fn empty_input_writes_empty_book() {
        let temp = tempfile::tempdir().unwrap();
        let stats_path = temp.path().join("nested").join("stats.json");
        let mut output = Vec::new();
        serve_with(&service(), Cursor::new(""), &mut output, &stats_path).unwrap();

        assert!(output.is_empty());
        assert!(load_stats(&stats_path).unwrap().is_empty());
    }
}
