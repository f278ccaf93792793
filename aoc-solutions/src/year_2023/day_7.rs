//! Camel Cards

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 7, tags = ["sorting"])]
pub struct Solver;

const CARDS: &[u8; 13] = b"23456789TJQKA";
const JACK: u8 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandType {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    FullHouse,
    FourOfAKind,
    FiveOfAKind,
}

impl HandType {
    /// Classify a hand by card rank, counting `jokers` as wild
    fn classify(cards: &[u8; 5], jokers: bool) -> Self {
        let mut counts = [0u8; 13];
        let mut wild = 0;
        for &c in cards {
            if jokers && c == JACK {
                wild += 1;
            } else {
                counts[c as usize] += 1;
            }
        }
        counts.sort_unstable_by(|a, b| b.cmp(a));
        // Jokers always join the largest group
        match (counts[0] + wild, counts[1]) {
            (5, _) => HandType::FiveOfAKind,
            (4, _) => HandType::FourOfAKind,
            (3, 2) => HandType::FullHouse,
            (3, _) => HandType::ThreeOfAKind,
            (2, 2) => HandType::TwoPair,
            (2, _) => HandType::OnePair,
            _ => HandType::HighCard,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Hand {
    /// Card ranks, 0 for `2` up to 12 for `A`
    cards: [u8; 5],
    bid: u64,
}

impl Hand {
    fn sort_key(&self, jokers: bool) -> (HandType, [u8; 5]) {
        let tiebreak = self.cards.map(|c| match c {
            JACK if jokers => 0,
            c if jokers && c < JACK => c + 1,
            c => c,
        });
        (HandType::classify(&self.cards, jokers), tiebreak)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Hand>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                let (cards, bid) = line
                    .split_once(' ')
                    .ok_or_else(|| ParseError::at_line(line_idx, "expected `<hand> <bid>`"))?;
                let ranks = cards
                    .bytes()
                    .map(|b| CARDS.iter().position(|&c| c == b).map(|r| r as u8))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| ParseError::at_line(line_idx, format!("unknown card in {cards:?}")))?;
                let cards: [u8; 5] = ranks
                    .try_into()
                    .map_err(|_| ParseError::at_line(line_idx, "a hand has five cards"))?;
                let bid = bid.trim().parse().map_err(|e| ParseError::at_line(line_idx, e))?;
                Ok(Hand { cards, bid })
            })
            .collect()
    }
}

fn winnings(hands: &[Hand], jokers: bool) -> u64 {
    let mut ranked: Vec<_> = hands.iter().map(|h| (h.sort_key(jokers), h.bid)).collect();
    ranked.sort_unstable();
    ranked
        .iter()
        .zip(1u64..)
        .map(|((_, bid), rank)| bid * rank)
        .sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(winnings(shared, false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(winnings(shared, true).to_string())
    }
}
