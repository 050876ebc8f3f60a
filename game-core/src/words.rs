use game_types::WordChoices;
use rand::seq::SliceRandom;

const EASY_WORDS: &str = "cat\ndog\nsun\nfish\nhouse\ntree\nstar\nball\nmoon\nbook";
const MEDIUM_WORDS: &str =
    "guitar\nrocket\ncastle\npenguin\nladder\nbridge\nanchor\ncactus\nwindmill\nvolcano";
const HARD_WORDS: &str =
    "labyrinth\nmetronome\nperiscope\nscaffolding\nsilhouette\nzeppelin\ngargoyle\nkaleidoscope\nchandelier\ntrampoline";

/// Per-difficulty word lists the drawer picks from.
pub struct WordBank {
    easy: Vec<String>,
    medium: Vec<String>,
    hard: Vec<String>,
}

impl WordBank {
    /// Parse newline-separated lists; blank lines and `#` comments are skipped.
    pub fn from_lists(easy: &str, medium: &str, hard: &str) -> Self {
        Self {
            easy: parse_list(easy),
            medium: parse_list(medium),
            hard: parse_list(hard),
        }
    }

    /// One random word per difficulty.
    pub fn choices(&self) -> WordChoices {
        let mut rng = rand::thread_rng();
        WordChoices {
            easy: pick(&self.easy, &mut rng),
            medium: pick(&self.medium, &mut rng),
            hard: pick(&self.hard, &mut rng),
        }
    }
}

impl Default for WordBank {
    fn default() -> Self {
        Self::from_lists(EASY_WORDS, MEDIUM_WORDS, HARD_WORDS)
    }
}

fn parse_list(list: &str) -> Vec<String> {
    list.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect()
}

fn pick(words: &[String], rng: &mut impl rand::Rng) -> String {
    words.choose(rng).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lists_skipping_comments_and_blanks() {
        let bank = WordBank::from_lists("cat\n# nope\n\n  DOG  ", "guitar", "labyrinth");
        let choices = bank.choices();
        assert!(["cat", "dog"].contains(&choices.easy.as_str()));
        assert_eq!(choices.medium, "guitar");
        assert_eq!(choices.hard, "labyrinth");
    }

    #[test]
    fn default_bank_always_offers_three_words() {
        let bank = WordBank::default();
        for _ in 0..10 {
            let choices = bank.choices();
            assert!(!choices.easy.is_empty());
            assert!(!choices.medium.is_empty());
            assert!(!choices.hard.is_empty());
        }
    }

    #[test]
    fn empty_list_yields_empty_choice() {
        let bank = WordBank::from_lists("", "guitar", "labyrinth");
        assert_eq!(bank.choices().easy, "");
    }
}
