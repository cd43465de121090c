//! Loot Generator: time-weighted stochastic loot spawn count.

/// Computes how many loot items to spawn this tick, given the elapsed
/// time, current loot count, current number of looters (dogs), the
/// configured spawn period and per-period probability, and one draw from a
/// `[0, 1)` uniform source.
///
/// `need = floor(p_eff * (G - L))` where
/// `p_eff = 1 - (1 - p)^(dt / period)` if `G > L`, else `0`; one extra unit
/// is added if `rand_value < p_eff * (G - L) - need`. Never returns more
/// than `G - L` (when `G <= L` the result is always `0`).
pub fn compute_spawn_count(
    dt_ms: u64,
    loot_count: usize,
    looter_count: usize,
    period_ms: u64,
    probability: f64,
    rand_value: f64,
) -> usize {
    if looter_count <= loot_count {
        return 0;
    }
    let gap = (looter_count - loot_count) as f64;
    let p_eff = if period_ms == 0 {
        1.0
    } else {
        1.0 - (1.0 - probability).powf(dt_ms as f64 / period_ms as f64)
    };
    let expected = p_eff * gap;
    let need = expected.floor();
    let extra = if rand_value < expected - need { 1.0 } else { 0.0 };
    (need + extra) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_generation_with_constant_rng() {
        let count = compute_spawn_count(1_000, 0, 1, 1_000, 1.0, 1.0);
        assert_eq!(count, 1);
    }

    #[test]
    fn no_spawn_when_loot_already_meets_looter_count() {
        assert_eq!(compute_spawn_count(1_000, 3, 3, 1_000, 1.0, 1.0), 0);
        assert_eq!(compute_spawn_count(1_000, 5, 3, 1_000, 1.0, 1.0), 0);
    }
}
