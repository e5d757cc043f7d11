// 💡 Eco Tips - Fixed motivational tip set
// Stateless presentation data; selection is uniform random with replacement

use rand::seq::SliceRandom;

/// The tip set shown after a successful calculation
pub const TIPS: &[&str] = &[
    "Use public transportation to reduce emissions.",
    "Adopt a plant-based meal once a week.",
    "Switch to energy-efficient appliances.",
    "Carpool to save fuel and reduce emissions.",
    "Unplug devices when not in use.",
];

/// One tip drawn uniformly at random, with replacement across calls
pub fn random_tip() -> &'static str {
    TIPS.choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(TIPS[0])
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tip_set_is_the_fixed_five() {
        assert_eq!(TIPS.len(), 5);
        assert!(TIPS.contains(&"Unplug devices when not in use."));
    }

    #[test]
    fn test_random_tip_always_comes_from_the_set() {
        for _ in 0..50 {
            assert!(TIPS.contains(&random_tip()));
        }
    }

    #[test]
    fn test_random_tip_varies_across_calls() {
        // With 5 tips, 200 identical draws in a row is practically impossible
        let first = random_tip();
        let varied = (0..200).any(|_| random_tip() != first);
        assert!(varied, "200 draws should not all return the same tip");
    }
}
