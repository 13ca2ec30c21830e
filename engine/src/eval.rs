//! Hand evaluation: best 5-of-7 rank, and the `HandEvaluator` operations
//! used at showdown (spec §4.2).

use holdem_shared::{Card, CardRank, CardSuit, HandRank, HandRankCategory, HandResult, PlayerId};

const NUM_SUITS: usize = 4;
const RANK_COUNT_ARRAY_SIZE: usize = 15; // index by ace-high value 2..=14

/// Evaluate the best 5-card hand obtainable from 2 hole cards plus up to
/// 5 community cards.
pub fn evaluate_best_hand(hole: [Card; 2], community: &[Card]) -> HandRank {
    let mut cards = Vec::with_capacity(7);
    cards.push(hole[0]);
    cards.push(hole[1]);
    cards.extend_from_slice(community);
    best_rank_from_cards(&cards)
}

/// Compute the exact best 5-card combination used to produce a hand's
/// rank, for `ShowdownDetails`/`HandResult::best_five`. Enumerates every
/// 5-card subset of the available cards (exact, not an approximation —
/// at most `C(7,5) = 21` combinations) and keeps the highest-ranked one.
/// With fewer than 5 cards available (only relevant for tests exercising
/// partial streets), returns the highest-ranked cards available, padded
/// is never needed in practice since showdown only happens with a full
/// board.
pub fn pick_best_five(hole: [Card; 2], community: &[Card]) -> [Card; 5] {
    let mut all = Vec::with_capacity(7);
    all.push(hole[0]);
    all.push(hole[1]);
    all.extend_from_slice(community);

    if all.len() < 5 {
        all.sort_unstable_by(|a, b| rank_value_high(b.rank()).cmp(&rank_value_high(a.rank())));
        let mut out = [Card::new(CardRank::Ace, CardSuit::Clubs); 5];
        let n = all.len().min(5);
        out[..n].copy_from_slice(&all[..n]);
        return out;
    }

    let n = all.len();
    let mut best_rank: Option<HandRank> = None;
    let mut best_combo = [Card::new(CardRank::Ace, CardSuit::Clubs); 5];

    for i in 0..(n - 4) {
        for j in (i + 1)..(n - 3) {
            for k in (j + 1)..(n - 2) {
                for l in (k + 1)..(n - 1) {
                    for m in (l + 1)..n {
                        let subset = [all[i], all[j], all[k], all[l], all[m]];
                        let rank = best_rank_from_cards(&subset);
                        if best_rank.as_ref().is_none_or(|r| rank > *r) {
                            best_rank = Some(rank);
                            best_combo = subset;
                        }
                    }
                }
            }
        }
    }

    best_combo
}

/// Evaluate every player's best hand and return the ones that tie for
/// strongest (`winners.len() > 1` on a split).
pub fn determine_winners(
    hole_cards: &[(PlayerId, [Card; 2])],
    community: &[Card],
) -> Vec<HandResult> {
    let results: Vec<HandResult> = hole_cards
        .iter()
        .map(|&(player_id, hole)| HandResult {
            player_id,
            rank: evaluate_best_hand(hole, community),
            best_five: pick_best_five(hole, community),
        })
        .collect();

    let best = results.iter().map(|r| &r.rank).max().cloned();
    match best {
        Some(best_rank) => results
            .into_iter()
            .filter(|r| r.rank == best_rank)
            .collect(),
        None => Vec::new(),
    }
}

fn best_rank_from_cards(cards: &[Card]) -> HandRank {
    let flush_suit = analyze_suits_for_flush(cards);

    if let Some(sf) = check_straight_flush(cards, flush_suit) {
        return sf;
    }

    let (counts, all_values) = analyze_card_values(cards);

    if let Some(four_kind) = check_four_of_a_kind(&counts, &all_values) {
        return four_kind;
    }
    if let Some(full_house) = check_full_house(&counts) {
        return full_house;
    }
    if let Some(flush) = check_flush(cards, flush_suit) {
        return flush;
    }
    if let Some(straight) = check_straight(cards) {
        return straight;
    }
    if let Some(three_kind) = check_three_of_a_kind(&counts, &all_values) {
        return three_kind;
    }
    if let Some(two_pair) = check_two_pair(&counts, &all_values) {
        return two_pair;
    }
    if let Some(pair) = check_one_pair(&counts, &all_values) {
        return pair;
    }
    check_high_card(&all_values)
}

fn suit_cards_of(cards: &[Card]) -> [Vec<Card>; NUM_SUITS] {
    let mut suit_cards: [Vec<Card>; NUM_SUITS] = Default::default();
    for &c in cards {
        suit_cards[c.suit().as_usize()].push(c);
    }
    suit_cards
}

fn analyze_suits_for_flush(cards: &[Card]) -> Option<u8> {
    let suit_cards = suit_cards_of(cards);
    (0..NUM_SUITS)
        .find(|&s| suit_cards[s].len() >= 5)
        .map(|s| s as u8)
}

fn analyze_card_values(cards: &[Card]) -> ([u8; RANK_COUNT_ARRAY_SIZE], Vec<u8>) {
    let mut counts = [0u8; RANK_COUNT_ARRAY_SIZE];
    let mut all_values = Vec::with_capacity(cards.len());
    for &c in cards {
        let v = rank_value_high(c.rank());
        counts[v as usize] += 1;
        all_values.push(v);
    }
    (counts, all_values)
}

fn check_straight_flush(cards: &[Card], flush_suit: Option<u8>) -> Option<HandRank> {
    let fs = flush_suit?;
    let suit_cards = suit_cards_of(cards);
    let values = ranks_as_values_unique(&suit_cards[fs as usize]);
    let high = straight_high(&values)?;
    let category = if high == 14 {
        HandRankCategory::RoyalFlush
    } else {
        HandRankCategory::StraightFlush
    };
    Some(HandRank {
        category,
        tiebreakers: vec![high],
    })
}

fn check_four_of_a_kind(
    counts: &[u8; RANK_COUNT_ARRAY_SIZE],
    all_values: &[u8],
) -> Option<HandRank> {
    find_n_of_a_kind(counts, 4, all_values).map(|(quad, kicker)| HandRank {
        category: HandRankCategory::FourKind,
        tiebreakers: vec![quad, kicker],
    })
}

fn check_full_house(counts: &[u8; RANK_COUNT_ARRAY_SIZE]) -> Option<HandRank> {
    find_full_house(counts).map(|(trip, pair)| HandRank {
        category: HandRankCategory::FullHouse,
        tiebreakers: vec![trip, pair],
    })
}

fn check_flush(cards: &[Card], flush_suit: Option<u8>) -> Option<HandRank> {
    let fs = flush_suit?;
    let suit_cards = suit_cards_of(cards);
    let mut vs = suit_cards[fs as usize]
        .iter()
        .map(|&c| rank_value_high(c.rank()))
        .collect::<Vec<u8>>();
    vs.sort_unstable_by(|a, b| b.cmp(a));
    vs.truncate(5);
    Some(HandRank {
        category: HandRankCategory::Flush,
        tiebreakers: vs,
    })
}

fn check_straight(cards: &[Card]) -> Option<HandRank> {
    let values = ranks_as_values_unique(cards);
    straight_high(&values).map(|high| HandRank {
        category: HandRankCategory::Straight,
        tiebreakers: vec![high],
    })
}

fn check_three_of_a_kind(
    counts: &[u8; RANK_COUNT_ARRAY_SIZE],
    all_values: &[u8],
) -> Option<HandRank> {
    find_n_kind_with_kickers(counts, all_values, 3, 2).map(|(trip, kickers)| {
        let mut t = vec![trip];
        t.extend(kickers);
        HandRank {
            category: HandRankCategory::ThreeKind,
            tiebreakers: t,
        }
    })
}

fn check_two_pair(counts: &[u8; RANK_COUNT_ARRAY_SIZE], all_values: &[u8]) -> Option<HandRank> {
    find_two_pair(counts, all_values).map(|(p_high, p_low, kicker)| HandRank {
        category: HandRankCategory::TwoPair,
        tiebreakers: vec![p_high, p_low, kicker],
    })
}

fn check_one_pair(counts: &[u8; RANK_COUNT_ARRAY_SIZE], all_values: &[u8]) -> Option<HandRank> {
    find_n_kind_with_kickers(counts, all_values, 2, 3).map(|(pair, kickers)| {
        let mut t = vec![pair];
        t.extend(kickers);
        HandRank {
            category: HandRankCategory::Pair,
            tiebreakers: t,
        }
    })
}

fn check_high_card(all_values: &[u8]) -> HandRank {
    let mut highs = all_values.to_vec();
    highs.sort_unstable_by(|a, b| b.cmp(a));
    highs.dedup();
    highs.truncate(5);
    HandRank {
        category: HandRankCategory::HighCard,
        tiebreakers: highs,
    }
}

#[inline]
fn rank_value_high(rank: CardRank) -> u8 {
    rank.high_value()
}

fn ranks_as_values_unique(cards: &[Card]) -> Vec<u8> {
    let mut v = cards
        .iter()
        .map(|&c| rank_value_high(c.rank()))
        .collect::<Vec<u8>>();
    v.sort_unstable();
    v.dedup();
    v
}

/// Highest straight present, accounting for the wheel (A-2-3-4-5 → high
/// card 5).
fn straight_high(values_unique_sorted_asc: &[u8]) -> Option<u8> {
    if values_unique_sorted_asc.is_empty() {
        return None;
    }
    let mut present = [false; RANK_COUNT_ARRAY_SIZE];
    for &v in values_unique_sorted_asc {
        if (2..=14).contains(&v) {
            present[v as usize] = true;
        }
    }
    if present[14] {
        present[1] = true;
    }

    let mut best: Option<u8> = None;
    let mut run_len = 0usize;
    let mut last_v = 0usize;

    for v in (1..=14).rev() {
        if present[v] {
            if last_v == 0 || v + 1 == last_v {
                run_len += 1;
            } else {
                run_len = 1;
            }
            if run_len >= 5 {
                let high = (v + 4) as u8;
                if best.is_none_or(|b| high > b) {
                    best = Some(high);
                }
            }
            last_v = v;
        } else {
            run_len = 0;
            last_v = 0;
        }
    }

    best
}

fn find_n_of_a_kind(
    counts: &[u8; RANK_COUNT_ARRAY_SIZE],
    n: u8,
    all_values: &[u8],
) -> Option<(u8, u8)> {
    let rank = (2..=14).rev().find(|&v| counts[v as usize] == n)?;
    let mut kickers = all_values
        .iter()
        .copied()
        .filter(|&v| v != rank)
        .collect::<Vec<u8>>();
    kickers.sort_unstable_by(|a, b| b.cmp(a));
    kickers.first().map(|&k| (rank, k))
}

fn find_full_house(counts: &[u8; RANK_COUNT_ARRAY_SIZE]) -> Option<(u8, u8)> {
    let mut trips = vec![];
    let mut pairs = vec![];
    for v in (2..=14).rev() {
        if counts[v] >= 3 {
            trips.push(v as u8);
        } else if counts[v] >= 2 {
            pairs.push(v as u8);
        }
    }
    let trip = *trips.first()?;
    let pair = pairs.first().copied().or_else(|| trips.get(1).copied());
    pair.map(|p| (trip, p))
}

fn find_n_kind_with_kickers(
    counts: &[u8; RANK_COUNT_ARRAY_SIZE],
    all_values: &[u8],
    n: u8,
    kicker_count: usize,
) -> Option<(u8, Vec<u8>)> {
    let kind_rank = (2..=14).rev().find(|&v| counts[v as usize] == n)?;
    let mut kickers = all_values
        .iter()
        .copied()
        .filter(|&v| v != kind_rank)
        .collect::<Vec<u8>>();
    kickers.sort_unstable_by(|a, b| b.cmp(a));
    kickers.dedup();
    kickers.truncate(kicker_count);
    Some((kind_rank, kickers))
}

fn find_two_pair(counts: &[u8; RANK_COUNT_ARRAY_SIZE], all_values: &[u8]) -> Option<(u8, u8, u8)> {
    let mut pairs = vec![];
    for v in (2..=14).rev() {
        if counts[v] >= 2 {
            pairs.push(v as u8);
        }
    }
    if pairs.len() < 2 {
        return None;
    }
    let p_high = pairs[0];
    let p_low = pairs[1];
    let mut kickers = all_values
        .iter()
        .copied()
        .filter(|&v| v != p_high && v != p_low)
        .collect::<Vec<u8>>();
    kickers.sort_unstable_by(|a, b| b.cmp(a));
    kickers.dedup();
    let kicker = kickers.first().copied().unwrap_or(2);
    Some((p_high, p_low, kicker))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(code: &str) -> Card {
        let rank = match &code[0..1] {
            "A" => CardRank::Ace,
            "2" => CardRank::Two,
            "3" => CardRank::Three,
            "4" => CardRank::Four,
            "5" => CardRank::Five,
            "6" => CardRank::Six,
            "7" => CardRank::Seven,
            "8" => CardRank::Eight,
            "9" => CardRank::Nine,
            "T" => CardRank::Ten,
            "J" => CardRank::Jack,
            "Q" => CardRank::Queen,
            "K" => CardRank::King,
            _ => panic!("bad rank in {code}"),
        };
        let suit = match &code[1..2] {
            "c" => CardSuit::Clubs,
            "d" => CardSuit::Diamonds,
            "h" => CardSuit::Hearts,
            "s" => CardSuit::Spades,
            _ => panic!("bad suit in {code}"),
        };
        Card::new(rank, suit)
    }

    #[test]
    fn royal_flush_beats_straight_flush() {
        let royal = evaluate_best_hand(
            [c("As"), c("Ks")],
            &[c("Qs"), c("Js"), c("Ts"), c("2c"), c("3d")],
        );
        assert_eq!(royal.category, HandRankCategory::RoyalFlush);

        let king_high_sf = evaluate_best_hand(
            [c("Ks"), c("Qs")],
            &[c("Js"), c("Ts"), c("9s"), c("2c"), c("3d")],
        );
        assert_eq!(king_high_sf.category, HandRankCategory::StraightFlush);
        assert!(royal > king_high_sf);
    }

    #[test]
    fn wheel_straight_ranks_as_five_high() {
        let wheel = evaluate_best_hand(
            [c("Ah"), c("2d")],
            &[c("3c"), c("4s"), c("5h"), c("Kc"), c("Qd")],
        );
        assert_eq!(wheel.category, HandRankCategory::Straight);
        assert_eq!(wheel.tiebreakers, vec![5]);
    }

    #[test]
    fn split_pot_on_board_play() {
        let community = [c("As"), c("Ks"), c("Qs"), c("Js"), c("Ts")];
        let results = determine_winners(
            &[
                (PlayerId(0), [c("2c"), c("3d")]),
                (PlayerId(1), [c("4c"), c("5d")]),
            ],
            &community,
        );
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].rank.category, HandRankCategory::RoyalFlush);
    }

    #[test]
    fn two_pair_kicker_breaks_tie() {
        let a = evaluate_best_hand(
            [c("Ah"), c("Kd")],
            &[c("Ac"), c("Ks"), c("2h"), c("3c"), c("4d")],
        );
        let b = evaluate_best_hand(
            [c("Ad"), c("Qd")],
            &[c("Ac"), c("Ks"), c("2h"), c("3c"), c("4d")],
        );
        assert_eq!(a.category, HandRankCategory::TwoPair);
        assert!(a > b);
    }
}
