/// Identifies one issued request, so that out-of-order answers can be told apart
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RequestToken(u64);

/// Hands out increasing tokens and remembers which one is the latest
#[derive(Clone, Debug, Default)]
pub struct Sequencer {
    issued: u64,
    in_flight: Option<RequestToken>,
}

impl Sequencer {
    pub fn new() -> Sequencer {
        Sequencer::default()
    }

    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        let tok = RequestToken(self.issued);
        self.in_flight = Some(tok);
        tok
    }

    /// Returns true iff `tok` is the latest issued request, which is then no longer in flight
    pub fn complete(&mut self, tok: RequestToken) -> bool {
        match self.in_flight {
            Some(t) if t == tok => {
                self.in_flight = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Forget the in-flight request, its answer will be dropped
    pub fn cancel(&mut self) {
        self.in_flight = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_completes() {
        let mut s = Sequencer::new();
        let first = s.issue();
        let second = s.issue();
        assert!(first < second);
        assert!(!s.complete(first));
        assert!(s.is_in_flight());
        assert!(s.complete(second));
        assert!(!s.is_in_flight());
        assert!(!s.complete(second));
    }

    #[test]
    fn cancelled_answer_is_dropped() {
        let mut s = Sequencer::new();
        let tok = s.issue();
        s.cancel();
        assert!(!s.complete(tok));
    }

    #[test]
    fn latest_always_wins() {
        bolero::check!()
            .with_type::<Vec<bool>>()
            .cloned()
            .for_each(|answers_in_reverse| {
                let mut s = Sequencer::new();
                let toks = answers_in_reverse
                    .iter()
                    .map(|_| s.issue())
                    .collect::<Vec<_>>();
                let mut accepted = Vec::new();
                for (tok, reverse) in toks.iter().zip(answers_in_reverse.iter()) {
                    // answers of older requests arriving in random order relative to one another
                    if *reverse && s.complete(*tok) {
                        accepted.push(*tok);
                    }
                }
                if let Some(last) = toks.last() {
                    if s.complete(*last) {
                        accepted.push(*last);
                    }
                }
                assert!(accepted.len() <= 1);
                if let Some(a) = accepted.first() {
                    assert_eq!(Some(a), toks.last());
                }
            });
    }
}
