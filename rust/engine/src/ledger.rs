use serde::{Deserialize, Serialize};

/// A layer of the pot contested only by `eligible_seats`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePot {
    pub amount: u32,
    /// Investment level capping this layer.
    pub threshold: u32,
    pub eligible_seats: Vec<usize>,
}

/// Tracks every chip committed during a hand, per seat.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PotLedger {
    invested: Vec<u32>,
}

impl PotLedger {
    pub fn new(num_seats: usize) -> Self {
        Self {
            invested: vec![0; num_seats],
        }
    }

    pub fn commit(&mut self, seat: usize, amount: u32) {
        self.invested[seat] += amount;
    }

    pub fn invested(&self, seat: usize) -> u32 {
        self.invested[seat]
    }

    pub fn pot_total(&self) -> u32 {
        self.invested.iter().sum()
    }

    /// Splits the pot into layers bounded by each distinct investment level.
    ///
    /// A layer is contested by the `contenders` (non-folded seats) who
    /// invested at least its threshold. Folded seats contribute chips but are
    /// never eligible. Consecutive layers with the same eligible set are
    /// merged, and a layer nobody can win is folded into its neighbour, so the
    /// layers always sum to [`PotLedger::pot_total`]. Layers come out in
    /// ascending threshold order; the last one is the main, uncapped pot.
    pub fn settle(&self, contenders: &[bool]) -> Vec<SidePot> {
        let mut levels: Vec<u32> = self.invested.iter().copied().filter(|&c| c > 0).collect();
        levels.sort_unstable();
        levels.dedup();

        let mut pots: Vec<SidePot> = Vec::new();
        let mut orphaned = 0u32;
        let mut prev = 0u32;
        for level in levels {
            let amount: u32 = self
                .invested
                .iter()
                .map(|&c| c.min(level) - c.min(prev))
                .sum();
            prev = level;

            let eligible: Vec<usize> = (0..self.invested.len())
                .filter(|&s| contenders.get(s).copied().unwrap_or(false) && self.invested[s] >= level)
                .collect();

            if eligible.is_empty() {
                orphaned += amount;
                continue;
            }
            let amount = amount + std::mem::take(&mut orphaned);
            match pots.last_mut() {
                Some(last) if last.eligible_seats == eligible => {
                    last.amount += amount;
                    last.threshold = level;
                }
                _ => pots.push(SidePot {
                    amount,
                    threshold: level,
                    eligible_seats: eligible,
                }),
            }
        }
        if let Some(last) = pots.last_mut() {
            last.amount += orphaned;
        }

        debug_assert!(
            pots.is_empty() || pots.iter().map(|p| p.amount).sum::<u32>() == self.pot_total(),
            "side pots must conserve chips"
        );
        pots
    }
}
