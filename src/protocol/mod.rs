//! JSON-lines request/response protocol
//!
//! One JSON object per input line, one JSON object per output line:
//!
//! ```text
//! {"op":"create","word_length":5,"max_attempts":6,"user_id":"alice"}
//! {"op":"get","session_id":"<uuid>"}
//! {"op":"guess","session_id":"<uuid>","word":"slate"}
//! {"op":"stats","user_id":"alice"}
//! ```
//!
//! Success responses carry `"ok": true`; failures carry `"ok": false` and an
//! `error` object with a stable `kind`. A bad line never ends the stream.

use crate::error::GameError;
use crate::game::{SessionId, SessionView, SubmitResult};
use crate::service::GameService;
use crate::stats::{ANONYMOUS_USER, PlayerStats};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

/// A decoded request line
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    Create {
        word_length: Option<usize>,
        max_attempts: Option<usize>,
        user_id: Option<String>,
    },
    Get {
        session_id: SessionId,
    },
    Guess {
        session_id: SessionId,
        word: String,
    },
    Stats {
        user_id: Option<String>,
    },
}

/// Aggregate stats as sent on the wire
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub played: u32,
    pub won: u32,
    pub win_percentage: f64,
    pub current_streak: u32,
    pub max_streak: u32,
    pub distribution: BTreeMap<usize, u32>,
}

impl StatsReport {
    #[must_use]
    pub fn new(stats: &PlayerStats, max_attempts: usize) -> Self {
        Self {
            played: stats.played,
            won: stats.won,
            win_percentage: stats.win_percentage(),
            current_streak: stats.current_streak,
            max_streak: stats.max_streak,
            distribution: stats.distribution_filled(max_attempts),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Session {
        session_id: SessionId,
        session: SessionView,
    },
    Guess {
        session_id: SessionId,
        #[serde(flatten)]
        result: SubmitResult,
    },
    Stats {
        user_id: String,
        stats: StatsReport,
    },
    Error {
        error: ErrorBody,
    },
}

/// One response line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub ok: bool,
    #[serde(flatten)]
    pub body: ResponseBody,
}

impl Response {
    fn success(body: ResponseBody) -> Self {
        Self { ok: true, body }
    }

    fn failure(kind: &str, message: String) -> Self {
        Self {
            ok: false,
            body: ResponseBody::Error {
                error: ErrorBody {
                    kind: kind.to_string(),
                    message,
                },
            },
        }
    }

    /// True if this response reports the end of a game
    #[must_use]
    pub fn ends_game(&self) -> bool {
        matches!(
            &self.body,
            ResponseBody::Guess { result, .. } if result.outcome.is_some()
        )
    }
}

impl From<GameError> for Response {
    fn from(err: GameError) -> Self {
        Self::failure(err.kind(), err.to_string())
    }
}

/// Execute one decoded request against the service
pub fn handle_request(service: &GameService, request: Request) -> Response {
    let result = match request {
        Request::Create {
            word_length,
            max_attempts,
            user_id,
        } => {
            let defaults = service.config();
            service
                .create_session(
                    word_length.unwrap_or(defaults.default_word_length),
                    max_attempts.unwrap_or(defaults.default_max_attempts),
                    user_id.as_deref().unwrap_or(ANONYMOUS_USER),
                )
                .map(|(session_id, session)| ResponseBody::Session {
                    session_id,
                    session,
                })
        }
        Request::Get { session_id } => {
            service
                .get_session(session_id)
                .map(|session| ResponseBody::Session {
                    session_id,
                    session,
                })
        }
        Request::Guess { session_id, word } => service
            .submit_guess(session_id, &word)
            .map(|result| ResponseBody::Guess { session_id, result }),
        Request::Stats { user_id } => {
            let user_id = user_id.unwrap_or_else(|| ANONYMOUS_USER.to_string());
            let stats = service.aggregate_stats(&user_id);
            Ok(ResponseBody::Stats {
                stats: StatsReport::new(&stats, service.config().default_max_attempts),
                user_id,
            })
        }
    };

    match result {
        Ok(body) => Response::success(body),
        Err(err) => {
            debug!(kind = err.kind(), "request failed: {err}");
            err.into()
        }
    }
}

/// Decode and execute one request line
pub fn handle_line(service: &GameService, line: &str) -> Response {
    match serde_json::from_str::<Request>(line) {
        Ok(request) => handle_request(service, request),
        Err(err) => {
            warn!("malformed request: {err}");
            Response::failure("bad_request", err.to_string())
        }
    }
}

/// Serve requests from `input` until EOF
///
/// `on_game_over` runs after every response that ended a game, e.g. to
/// persist statistics.
///
/// # Errors
/// Returns an I/O error if reading input or writing output fails.
pub fn serve<R: BufRead, W: Write>(
    service: &GameService,
    input: R,
    mut output: W,
    mut on_game_over: impl FnMut(&GameService),
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(service, &line);
        let encoded = serde_json::to_string(&response).map_err(io::Error::other)?;
        writeln!(output, "{encoded}")?;
        output.flush()?;

        if response.ends_game() {
            on_game_over(service);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::game::MAX_ATTEMPTS;
    use crate::service::ServiceConfig;
    use crate::wordlists::loader::words_from_slice;
    use crate::wordlists::{FixedWordSource, Vocabulary};
    use serde_json::Value;
    use std::sync::Arc;

    fn service() -> GameService {
        GameService::new(
            Box::new(FixedWordSource::new(Word::parse("crane").unwrap())),
            Arc::new(Vocabulary::new(words_from_slice(&["crane", "slate"]))),
            ServiceConfig::default(),
        )
    }

    fn call(service: &GameService, line: &str) -> Value {
        serde_json::to_value(handle_line(service, line)).unwrap()
    }

    #[test]
    fn decodes_requests() {
        let request: Request =
            serde_json::from_str(r#"{"op":"create","word_length":5,"user_id":"a"}"#).unwrap();
        assert_eq!(
            request,
            Request::Create {
                word_length: Some(5),
                max_attempts: None,
                user_id: Some("a".to_string())
            }
        );
        assert!(serde_json::from_str::<Request>(r#"{"op":"explode"}"#).is_err());
    }

    #[test]
    fn full_game_over_the_wire() {
        let service = service();

        let created = call(&service, r#"{"op":"create","user_id":"alice"}"#);
        assert_eq!(created["ok"], true);
        assert_eq!(created["session"]["status"], "playing");
        assert_eq!(created["session"]["word_length"], 5);
        assert_eq!(created["session"]["max_attempts"], 6);
        assert!(created["session"].get("target").is_none());
        let id = created["session_id"].as_str().unwrap().to_string();

        let first = call(
            &service,
            &format!(r#"{{"op":"guess","session_id":"{id}","word":"slate"}}"#),
        );
        assert_eq!(first["ok"], true);
        assert_eq!(first["status"], "playing");
        assert_eq!(
            first["attempt"]["feedback"],
            serde_json::json!(["absent", "absent", "correct", "absent", "correct"])
        );
        assert!(first.get("revealed_target").is_none());
        assert!(!first.to_string().contains("crane"));

        let second = call(
            &service,
            &format!(r#"{{"op":"guess","session_id":"{id}","word":"crane"}}"#),
        );
        assert_eq!(second["status"], "won");
        assert_eq!(second["revealed_target"], "crane");
        assert_eq!(second["outcome"]["attempts_used"], 2);

        let view = call(&service, &format!(r#"{{"op":"get","session_id":"{id}"}}"#));
        assert_eq!(view["session"]["target"], "crane");
        assert_eq!(view["session"]["attempts"][1]["ordinal"], 2);

        let stats = call(&service, r#"{"op":"stats","user_id":"alice"}"#);
        assert_eq!(stats["stats"]["played"], 1);
        assert_eq!(stats["stats"]["distribution"]["2"], 1);
        assert_eq!(stats["stats"]["distribution"]["6"], 0);
    }

    #[test]
    fn errors_carry_kind() {
        let service = service();
        let missing = call(
            &service,
            &format!(
                r#"{{"op":"guess","session_id":"{}","word":"crane"}}"#,
                SessionId::new()
            ),
        );
        assert_eq!(missing["ok"], false);
        assert_eq!(missing["error"]["kind"], "session_not_found");

        let garbage = call(&service, "not json");
        assert_eq!(garbage["ok"], false);
        assert_eq!(garbage["error"]["kind"], "bad_request");
    }

    #[test]
    fn oversized_attempt_limit_is_invalid_config() {
        let service = service();
        for line in [
            r#"{"op":"create","max_attempts":18446744073709551615}"#.to_owned(),
            format!(r#"{{"op":"create","max_attempts":{}}}"#, MAX_ATTEMPTS + 1),
        ] {
            let response = call(&service, &line);
            assert_eq!(response["ok"], false);
            assert_eq!(response["error"]["kind"], "invalid_config");
        }
        assert_eq!(service.session_count(), 0);

        let response = call(&service, r#"{"op":"create","max_attempts":32}"#);
        assert_eq!(response["ok"], true);
        assert_eq!(response["session"]["max_attempts"], MAX_ATTEMPTS);
    }

    #[test]
    fn serve_processes_every_line() {
        let service = service();
        let input = "{\"op\":\"create\"}\n\nnonsense\n{\"op\":\"stats\"}\n";
        let mut output = Vec::new();
        let mut games_over = 0;

        serve(&service, input.as_bytes(), &mut output, |_| games_over += 1).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["ok"], true);
        assert_eq!(lines[1]["error"]["kind"], "bad_request");
        assert_eq!(lines[2]["user_id"], "anonymous");
        assert_eq!(games_over, 0);
    }

    #[test]
    fn serve_reports_finished_games() {
        let service = service();
        let (id, _) = service.create_session(5, 1, "bob").unwrap();
        let input = format!("{{\"op\":\"guess\",\"session_id\":\"{id}\",\"word\":\"slate\"}}\n");
        let mut finished = Vec::new();

        serve(&service, input.as_bytes(), Vec::new(), |svc| {
            finished.push(svc.aggregate_stats("bob").played);
        })
        .unwrap();

        assert_eq!(finished, [1]);
    }
}
