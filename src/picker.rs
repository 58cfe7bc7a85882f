//! Random word selection and scrambling.
//!
//! Both steps are rejection samplers with an explicit attempt bound. When
//! a bound is reached the picker switches to a fallback that always
//! terminates:
//! - word selection samples directly from the unused words (same uniform
//!   distribution over the remaining words);
//! - scrambling returns the word rotated left by one letter, which differs
//!   from the word whenever it has two or more distinct letters.

use crate::error::GameError;
use crate::vocabulary::{Vocabulary, has_scramble};
use crate::debug_log;
use log::info;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

pub const MAX_PICK_ATTEMPTS: usize = 64;
pub const MAX_SHUFFLE_ATTEMPTS: usize = 64;

/// A freshly picked word together with its scramble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedWord {
    pub word: String,
    pub scrambled: String,
}

#[derive(Debug, Clone)]
pub struct WordPicker<R: Rng> {
    rng: R,
}

impl WordPicker<ChaCha8Rng> {
    /// Reproducible picker: the same seed yields the same word sequence.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Picker seeded from the thread RNG. The seed is returned so a game
    /// can be replayed with `seeded`.
    #[must_use]
    pub fn from_entropy() -> (Self, u64) {
        let seed = rand::random::<u64>();
        info!("WordPicker seeded with {seed}");
        (Self::seeded(seed), seed)
    }
}

impl<R: Rng> WordPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Picks an unused word, records it in `used_words`, and scrambles it.
    pub fn pick_next(
        &mut self,
        vocabulary: &Vocabulary,
        used_words: &mut HashSet<String>,
    ) -> Result<PickedWord, GameError> {
        if vocabulary.words().iter().all(|w| used_words.contains(w)) {
            return Err(GameError::ExhaustedVocabulary);
        }

        let word = self.sample_unused(vocabulary, used_words);
        let scrambled = self.scramble(&word)?;
        used_words.insert(word.clone());
        debug_log!(
            "pick_next() - picked '{}' as '{}' ({} used)",
            word,
            scrambled,
            used_words.len()
        );
        Ok(PickedWord { word, scrambled })
    }

    /// Uniformly random permutation of `word` that is not `word` itself.
    pub fn scramble(&mut self, word: &str) -> Result<String, GameError> {
        if !has_scramble(word) {
            return Err(GameError::UnscramblableWord(word.to_string()));
        }

        let mut letters: Vec<char> = word.chars().collect();
        for _ in 0..MAX_SHUFFLE_ATTEMPTS {
            letters.shuffle(&mut self.rng);
            let candidate: String = letters.iter().collect();
            if candidate != word {
                return Ok(candidate);
            }
        }

        debug_log!("scramble() - shuffle bound reached for '{}', rotating", word);
        Ok(rotated(word))
    }

    fn sample_unused(&mut self, vocabulary: &Vocabulary, used_words: &HashSet<String>) -> String {
        let words = vocabulary.words();
        for _ in 0..MAX_PICK_ATTEMPTS {
            let candidate = &words[self.rng.random_range(0..words.len())];
            if !used_words.contains(candidate) {
                return candidate.clone();
            }
        }

        debug_log!("sample_unused() - pick bound reached, sampling from unused words");
        let unused: Vec<&String> = words.iter().filter(|w| !used_words.contains(*w)).collect();
        unused[self.rng.random_range(0..unused.len())].clone()
    }
}

fn rotated(word: &str) -> String {
    let mut letters: Vec<char> = word.chars().collect();
    letters.rotate_left(1);
    letters.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{EMBEDDED_VOCABULARY, load_vocabulary_from_str};

    fn sorted_letters(word: &str) -> Vec<char> {
        let mut letters: Vec<char> = word.chars().collect();
        letters.sort_unstable();
        letters
    }

    #[test]
    fn test_scramble_differs_and_is_permutation() {
        let vocabulary = load_vocabulary_from_str(EMBEDDED_VOCABULARY).unwrap();
        let mut picker = WordPicker::seeded(7);
        for word in vocabulary.words() {
            let scrambled = picker.scramble(word).unwrap();
            assert_ne!(&scrambled, word);
            assert_eq!(sorted_letters(&scrambled), sorted_letters(word));
        }
    }

    #[test]
    fn test_scramble_two_letter_word() {
        let mut picker = WordPicker::seeded(1);
        for _ in 0..20 {
            assert_eq!(picker.scramble("ab").unwrap(), "ba");
        }
    }

    #[test]
    fn test_scramble_repeated_letters() {
        let mut picker = WordPicker::seeded(3);
        for _ in 0..20 {
            let scrambled = picker.scramble("aab").unwrap();
            assert_ne!(scrambled, "aab");
            assert_eq!(sorted_letters(&scrambled), sorted_letters("aab"));
        }
    }

    #[test]
    fn test_scramble_rejects_single_letter_words() {
        let mut picker = WordPicker::seeded(1);
        assert_eq!(
            picker.scramble("aaaa"),
            Err(GameError::UnscramblableWord("aaaa".to_string()))
        );
        assert_eq!(
            picker.scramble("a"),
            Err(GameError::UnscramblableWord("a".to_string()))
        );
    }

    #[test]
    fn test_rotated_fallback_differs() {
        assert_eq!(rotated("abc"), "bca");
        assert_ne!(rotated("abab"), "abab");
        assert_ne!(rotated("aab"), "aab");
    }

    #[test]
    fn test_pick_next_records_used_word() {
        let vocabulary = Vocabulary::new(["cat", "dog", "bird"]).unwrap();
        let mut used = HashSet::new();
        let mut picker = WordPicker::seeded(11);

        let picked = picker.pick_next(&vocabulary, &mut used).unwrap();
        assert!(vocabulary.contains(&picked.word));
        assert!(used.contains(&picked.word));
        assert_eq!(used.len(), 1);
        assert_ne!(picked.scrambled, picked.word);
    }

    #[test]
    fn test_pick_next_never_repeats() {
        let vocabulary = load_vocabulary_from_str(EMBEDDED_VOCABULARY).unwrap();
        let mut used = HashSet::new();
        let mut picker = WordPicker::seeded(42);
        let mut picked_words = HashSet::new();

        for _ in 0..vocabulary.len() {
            let picked = picker.pick_next(&vocabulary, &mut used).unwrap();
            assert!(picked_words.insert(picked.word));
        }
        assert_eq!(used.len(), vocabulary.len());
    }

    #[test]
    fn test_pick_next_skips_used_words() {
        let vocabulary = Vocabulary::new(["cat", "dog", "bird"]).unwrap();
        let mut used: HashSet<String> = ["cat", "bird"].iter().map(|s| s.to_string()).collect();
        let mut picker = WordPicker::seeded(5);

        let picked = picker.pick_next(&vocabulary, &mut used).unwrap();
        assert_eq!(picked.word, "dog");
    }

    #[test]
    fn test_pick_next_exhausted() {
        let vocabulary = Vocabulary::new(["cat", "dog"]).unwrap();
        let mut used: HashSet<String> = ["cat", "dog"].iter().map(|s| s.to_string()).collect();
        let mut picker = WordPicker::seeded(5);

        assert_eq!(
            picker.pick_next(&vocabulary, &mut used),
            Err(GameError::ExhaustedVocabulary)
        );
        assert_eq!(used.len(), 2);
    }

    #[test]
    fn test_entropy_seed_replays_first_word() {
        let vocabulary = load_vocabulary_from_str(EMBEDDED_VOCABULARY).unwrap();
        let (mut original, seed) = WordPicker::from_entropy();
        let mut replay = WordPicker::seeded(seed);

        assert_eq!(
            original.pick_next(&vocabulary, &mut HashSet::new()).unwrap(),
            replay.pick_next(&vocabulary, &mut HashSet::new()).unwrap()
        );
    }

    #[test]
    fn test_failed_scramble_leaves_used_words_untouched() {
        let vocabulary = Vocabulary::unchecked(["zzz"]);
        let mut used = HashSet::new();
        let mut picker = WordPicker::seeded(2);

        assert_eq!(
            picker.pick_next(&vocabulary, &mut used),
            Err(GameError::UnscramblableWord("zzz".to_string()))
        );
        assert!(used.is_empty());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let vocabulary = load_vocabulary_from_str(EMBEDDED_VOCABULARY).unwrap();
        let mut first = WordPicker::seeded(99);
        let mut second = WordPicker::seeded(99);
        let mut used_first = HashSet::new();
        let mut used_second = HashSet::new();

        for _ in 0..10 {
            assert_eq!(
                first.pick_next(&vocabulary, &mut used_first).unwrap(),
                second.pick_next(&vocabulary, &mut used_second).unwrap()
            );
        }
    }
}
