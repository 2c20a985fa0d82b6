use spellquest_core::Direction;
use spellquest_generator::{
    GenerateError, GeneratedPuzzle, GeneratorConfig, GridSizePolicy, PuzzleGenerator, PuzzleSeed,
};
use spellquest_progress::WordList;

use crate::settings::{GeneratorSettings, SettingsError};

/// Command-line overrides for puzzle generation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleOverrides {
    pub size: Option<usize>,
    pub fit: Option<usize>,
    pub all_directions: bool,
}

/// Builds a generator from the settings file, then applies overrides.
///
/// `fit` wins over `size` when both are given.
pub fn build_generator(
    settings: &GeneratorSettings,
    overrides: PuzzleOverrides,
) -> Result<PuzzleGenerator, SettingsError> {
    let mut config: GeneratorConfig = settings.to_config()?;
    if let Some(min) = overrides.fit {
        config = config.size_policy(GridSizePolicy::FitToWords { min });
    } else if let Some(size) = overrides.size {
        config = config.size_policy(GridSizePolicy::Fixed(size));
    }
    if overrides.all_directions {
        config = config.directions(&Direction::ALL);
    }
    Ok(PuzzleGenerator::new(config))
}

/// Generates a puzzle for a word list.
///
/// A list that yields no placeable words is the "no puzzle" empty state and
/// returns `Ok(None)`.
pub fn generate_puzzle(
    generator: &PuzzleGenerator,
    list: &WordList,
    seed: Option<PuzzleSeed>,
) -> Result<Option<GeneratedPuzzle>, GenerateError> {
    let words = list.entries();
    let result = match seed {
        Some(seed) => generator.generate_with_seed(&words, seed),
        None => generator.generate(&words),
    };
    match result {
        Ok(puzzle) => Ok(Some(puzzle)),
        Err(GenerateError::EmptyWordList | GenerateError::NoWordsPlaced) => {
            log::info!("no puzzle for word list {}", list.id);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let settings = GeneratorSettings::default();

        let generator = build_generator(&settings, PuzzleOverrides::default()).unwrap();
        assert_eq!(generator.config(), &GeneratorConfig::default());

        let generator = build_generator(
            &settings,
            PuzzleOverrides {
                size: Some(8),
                fit: Some(6),
                all_directions: true,
            },
        )
        .unwrap();
        assert_eq!(
            generator.config().grid_size_policy(),
            GridSizePolicy::FitToWords { min: 6 }
        );
        assert_eq!(generator.config().allowed_directions(), Direction::ALL);

        let generator = build_generator(
            &settings,
            PuzzleOverrides {
                size: Some(8),
                ..PuzzleOverrides::default()
            },
        )
        .unwrap();
        assert_eq!(generator.config().grid_size_policy(), GridSizePolicy::Fixed(8));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let generator = PuzzleGenerator::default();
        let list = WordList::new("w1", "Animals", ["cat", "dog", "bird"]);
        let seed = PuzzleSeed::from_phrase("monday");

        let a = generate_puzzle(&generator, &list, Some(seed)).unwrap().unwrap();
        let b = generate_puzzle(&generator, &list, Some(seed)).unwrap().unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.seed, seed);
    }

    #[test]
    fn test_unusable_list_is_an_empty_state() {
        let generator = PuzzleGenerator::default();
        let empty = WordList::new("w1", "Empty", Vec::<&str>::new());
        assert!(generate_puzzle(&generator, &empty, None).unwrap().is_none());

        let unusable = WordList::new("w2", "Symbols", ["!", "7", "a"]);
        assert!(generate_puzzle(&generator, &unusable, None).unwrap().is_none());
    }
}
