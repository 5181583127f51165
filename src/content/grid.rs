use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::Card;

/// Sort keys offered on listing pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Title,
    Author,
    Category,
}

impl SortKey {
    fn key(self, card: &Card) -> String {
        match self {
            SortKey::Title => card.title_text(),
            SortKey::Author => card.author_text(),
            SortKey::Category => card.category_text(),
        }
        .to_lowercase()
    }
}

/// The cards of a listing page in their current display order
#[derive(Debug, Clone, Default)]
pub struct Grid {
    cards: Vec<Card>,
}

impl Grid {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    #[cfg(test)]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Reorder in place; equal keys keep their relative order
    pub fn sort(&mut self, key: SortKey) {
        self.cards.sort_by_cached_key(|card| key.key(card));
    }

    /// Reorder uniformly at random
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Cards whose title, author or category contains `term`, in display order
    pub fn filter(&self, term: &str) -> Vec<&Card> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return self.cards.iter().collect();
        }
        self.cards
            .iter()
            .filter(|card| {
                [SortKey::Title, SortKey::Author, SortKey::Category]
                    .into_iter()
                    .any(|k| k.key(card).contains(&term))
            })
            .collect()
    }
}

impl From<Vec<Card>> for Grid {
    fn from(cards: Vec<Card>) -> Self {
        Self::new(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(title: &str, author: &str, category: &str) -> Card {
        Card {
            title: Some(title.into()),
            author: Some(author.into()),
            category: Some(category.into()),
            href: Some(format!("/videos/{}", title.to_lowercase())),
            ..Card::default()
        }
    }

    fn grid() -> Grid {
        Grid::new(vec![
            card("neon", "Zed", "VFX"),
            card("Aurora", "amy", "Motion"),
            card("bloom", "Amy", "vfx"),
        ])
    }

    fn titles<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Vec<&'a str> {
        cards.into_iter().map(Card::title_text).collect()
    }

    #[test]
    fn test_sort_by_title_ignores_case() {
        let mut g = grid();
        g.sort(SortKey::Title);
        assert_eq!(titles(g.cards()), vec!["Aurora", "bloom", "neon"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut g = grid();
        g.sort(SortKey::Author);
        assert_eq!(titles(g.cards()), vec!["Aurora", "bloom", "neon"]);

        g.sort(SortKey::Category);
        assert_eq!(titles(g.cards()), vec!["Aurora", "bloom", "neon"]);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut g = Grid::new((0..20).map(|i| card(&format!("v{i:02}"), "A", "B")).collect());
        g.shuffle(&mut StdRng::seed_from_u64(7));

        let mut shuffled = titles(g.cards());
        assert_ne!(shuffled, (0..20).map(|i| format!("v{i:02}")).collect::<Vec<_>>());
        shuffled.sort_unstable();
        assert_eq!(shuffled, (0..20).map(|i| format!("v{i:02}")).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_is_reproducible_for_a_seed() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut a = grid();
        let mut b = grid();
        a.shuffle(&mut StdRng::seed_from_u64(42));
        b.shuffle(&mut StdRng::seed_from_u64(42));
        assert_eq!(titles(a.cards()), titles(b.cards()));
    }

    #[test]
    fn test_filter_matches_any_field() {
        let g = grid();
        assert_eq!(titles(g.filter(" VFX ")), vec!["neon", "bloom"]);
        assert_eq!(titles(g.filter("amy")), vec!["Aurora", "bloom"]);
        assert!(g.filter("nothing").is_empty());
    }

    #[test]
    fn test_filter_empty_term_shows_all() {
        assert_eq!(grid().filter("   ").len(), 3);
    }
}
