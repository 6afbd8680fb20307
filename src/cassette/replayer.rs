//! Replays recorded interactions from a cassette.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Replays interactions from a loaded cassette, serving them in recorded
/// order per `port::method` pair.
pub struct CassetteReplayer {
    pending: HashMap<(String, String), VecDeque<Interaction>>,
    served: HashMap<(String, String), usize>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut pending: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            pending
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { pending, served: HashMap::new() }
    }

    /// Return the next interaction for the given port and method.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for the given
    /// port/method combination. Replay is a test mechanism, so running past
    /// the end of a cassette is treated as a broken fixture.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Interaction {
        let key = (port.to_string(), method.to_string());

        let Some(queue) = self.pending.get_mut(&key) else {
            let mut available: Vec<String> =
                self.pending.keys().map(|(p, m)| format!("{p}::{m}")).collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            );
        };

        let served = self.served.entry(key).or_insert(0);
        let Some(interaction) = queue.pop_front() else {
            panic!(
                "Cassette exhausted: all {served} interactions for port={port:?} \
                 method={method:?} have been consumed."
            );
        };
        *served += 1;
        interaction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn completion(seq: u64, text: &str) -> Interaction {
        Interaction {
            seq,
            port: "llm".into(),
            method: "complete".into(),
            input: json!({}),
            output: json!({"ok": {"text": text}}),
        }
    }

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            model: "test-model".into(),
            interactions,
        }
    }

    #[test]
    fn serves_completions_in_recorded_order() {
        let cassette = make_cassette(vec![completion(0, "first"), completion(1, "second")]);
        let mut replayer = CassetteReplayer::new(&cassette);

        let a = replayer.next_interaction("llm", "complete");
        let b = replayer.next_interaction("llm", "complete");
        assert_eq!(a.seq, 0);
        assert_eq!(b.output["ok"]["text"], "second");
    }

    #[test]
    #[should_panic(expected = "have been consumed")]
    fn exhausted_replayer_panics_with_descriptive_message() {
        let cassette = make_cassette(vec![completion(0, "only")]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_interaction("llm", "complete");
        let _ = replayer.next_interaction("llm", "complete");
    }

    #[test]
    #[should_panic(expected = "no interactions recorded")]
    fn unknown_method_panics() {
        let cassette = make_cassette(vec![completion(0, "only")]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_interaction("llm", "stream");
    }
}
