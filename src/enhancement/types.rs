use crate::character::StatBlock;

pub const MAX_ENHANCEMENT_LEVEL: u8 = 10;

/// Bonus added to an item's stats by each enhancement.
pub const ENHANCEMENT_STEP: StatBlock = StatBlock::new(2, 2, 5);

/// Gold to go from `current_level` to `current_level + 1`.
/// Zero once the item is maxed.
pub fn enhancement_cost(current_level: u8) -> u64 {
    if current_level >= MAX_ENHANCEMENT_LEVEL {
        return 0;
    }
    (current_level as u64 + 1) * 100
}

/// Gold to take an item from +0 to `target_level`.
pub fn cumulative_enhancement_cost(target_level: u8) -> u64 {
    (0..target_level.min(MAX_ENHANCEMENT_LEVEL))
        .map(enhancement_cost)
        .sum()
}

/// Format an enhancement prefix for display (e.g., "+5 " or "" for +0)
pub fn enhancement_prefix(level: u8) -> String {
    if level == 0 {
        String::new()
    } else {
        format!("+{} ", level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_curve() {
        assert_eq!(enhancement_cost(0), 100);
        assert_eq!(enhancement_cost(4), 500);
        assert_eq!(enhancement_cost(9), 1_000);
        assert_eq!(enhancement_cost(10), 0);
    }

    #[test]
    fn test_full_enhancement_costs_5500() {
        assert_eq!(cumulative_enhancement_cost(10), 5_500);
        assert_eq!(cumulative_enhancement_cost(0), 0);
    }

    #[test]
    fn test_prefix() {
        assert_eq!(enhancement_prefix(0), "");
        assert_eq!(enhancement_prefix(7), "+7 ");
    }
}
