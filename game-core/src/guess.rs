/// How many mismatched positions still count as a close guess.
pub const CLOSE_GUESS_THRESHOLD: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Regular,
    Close,
    Correct,
}

/// Positional character-distance classifier. This is deliberately not an
/// edit distance: characters are compared position by position, the guess
/// lowercased and the secret word taken as stored, and only the secret's
/// unmatched tail adds to the count. A guess longer than the secret is
/// judged on the overlapping prefix alone.
#[derive(Debug, Clone)]
pub struct GuessEvaluator {
    close_threshold: usize,
}

impl Default for GuessEvaluator {
    fn default() -> Self {
        Self {
            close_threshold: CLOSE_GUESS_THRESHOLD,
        }
    }
}

impl GuessEvaluator {
    pub fn with_threshold(close_threshold: usize) -> Self {
        Self { close_threshold }
    }

    pub fn classify(&self, guess: &str, secret: &str) -> GuessOutcome {
        let mismatches = mismatch_count(guess, secret);
        if mismatches == 0 {
            GuessOutcome::Correct
        } else if mismatches <= self.close_threshold {
            GuessOutcome::Close
        } else {
            GuessOutcome::Regular
        }
    }
}

pub fn mismatch_count(guess: &str, secret: &str) -> usize {
    let guess: Vec<char> = guess.to_lowercase().chars().collect();
    let secret: Vec<char> = secret.chars().collect();
    let compared = guess.len().min(secret.len());

    let differing = (0..compared).filter(|&i| guess[i] != secret[i]).count();
    differing + (secret.len() - compared)
}
