//! Replays recorded tracker interactions from a cassette.

use std::collections::HashMap;

use super::format::{Cassette, Interaction};

/// Serves interactions from a loaded cassette, in order, per tracker method.
pub struct CassetteReplayer {
    /// Per-method queue of interactions (in order).
    queues: HashMap<String, Vec<Interaction>>,
    /// Per-method cursor tracking position.
    cursors: HashMap<String, usize>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<String, Vec<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues.entry(interaction.method.clone()).or_default().push(interaction.clone());
        }
        let cursors = queues.keys().map(|k| (k.clone(), 0)).collect();
        Self { queues, cursors }
    }

    /// Return the next interaction for the given method.
    ///
    /// # Errors
    ///
    /// Returns a message describing what was requested versus what remains
    /// when the cassette has no (more) interactions for `method`.
    pub fn next_interaction(&mut self, method: &str) -> Result<&Interaction, String> {
        let Some(queue) = self.queues.get(method) else {
            let mut available: Vec<&str> = self.queues.keys().map(String::as_str).collect();
            available.sort_unstable();
            return Err(format!(
                "Cassette exhausted: no interactions recorded for method={method:?}. \
                 Available methods: [{}]",
                available.join(", ")
            ));
        };

        let cursor = self.cursors.entry(method.to_string()).or_insert(0);
        if *cursor >= queue.len() {
            return Err(format!(
                "Cassette exhausted: all {count} interactions for method={method:?} \
                 have been consumed. Last interaction was seq={last_seq}.",
                count = queue.len(),
                last_seq = queue.last().map_or(0, |i| i.seq),
            ));
        }

        let interaction = &queue[*cursor];
        *cursor += 1;
        Ok(interaction)
    }

    /// Number of interactions not served yet, across all methods.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queues
            .iter()
            .map(|(method, queue)| queue.len() - self.cursors.get(method).copied().unwrap_or(0))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            tracker: String::new(),
            interactions,
        }
    }

    fn interaction(seq: u64, method: &str, output: serde_json::Value) -> Interaction {
        Interaction { seq, method: method.into(), input: json!({}), output }
    }

    #[test]
    fn replays_each_method_in_order() {
        let cassette = make_cassette(vec![
            interaction(0, "fetch_issue", json!({"Ok": {"key": "A-1"}})),
            interaction(1, "fetch_dashboard_swimlanes", json!({"Ok": []})),
            interaction(2, "fetch_issue", json!({"Ok": {"key": "A-2"}})),
        ]);

        let mut replayer = CassetteReplayer::new(&cassette);
        assert_eq!(replayer.remaining(), 3);

        let i1 = replayer.next_interaction("fetch_issue").unwrap();
        assert_eq!(i1.seq, 0);
        let i2 = replayer.next_interaction("fetch_dashboard_swimlanes").unwrap();
        assert_eq!(i2.seq, 1);
        let i3 = replayer.next_interaction("fetch_issue").unwrap();
        assert_eq!(i3.output, json!({"Ok": {"key": "A-2"}}));

        assert_eq!(replayer.remaining(), 0);
    }

    #[test]
    fn exhausted_method_reports_descriptive_error() {
        let cassette = make_cassette(vec![interaction(0, "fetch_issue", json!({"Ok": {}}))]);

        let mut replayer = CassetteReplayer::new(&cassette);
        replayer.next_interaction("fetch_issue").unwrap();
        let err = replayer.next_interaction("fetch_issue").unwrap_err();
        assert!(err.contains("Cassette exhausted"));
        assert!(err.contains("seq=0"));
    }

    #[test]
    fn unknown_method_lists_available_methods() {
        let cassette = make_cassette(vec![interaction(0, "fetch_issue", json!({"Ok": {}}))]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let err = replayer.next_interaction("delete_swimlane").unwrap_err();
        assert!(err.contains("no interactions recorded"));
        assert!(err.contains("fetch_issue"));
    }
}
