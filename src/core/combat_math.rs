//! Damage arithmetic shared by idle combat and the simulator.

use super::constants::DAMAGE_RANDOMNESS;
use super::rng::RandomSource;

/// Damage for one hit given an explicit variance roll in `[0, 1)`.
///
/// # Arguments
/// * `attack` - Attacker's attack stat
/// * `defense` - Defender's defense stat (half of it is subtracted)
/// * `randomness` - Total spread as a fraction of base damage
/// * `roll` - Uniform draw; 0.5 means no variance
///
/// # Returns
/// Damage dealt, never less than 1
pub fn compute_damage(attack: u32, defense: u32, randomness: f64, roll: f64) -> u32 {
    let base = (attack as f64 - defense as f64 / 2.0).max(1.0);
    let variance = (roll - 0.5) * base * randomness;
    (base + variance).max(1.0).floor() as u32
}

/// Roll a hit with the standard 20% spread.
pub fn roll_damage(attack: u32, defense: u32, rng: &mut dyn RandomSource) -> u32 {
    compute_damage(attack, defense, DAMAGE_RANDOMNESS, rng.next_f64())
}

/// Scale a hit by a critical multiplier, rounding down.
pub fn apply_crit(damage: u32, multiplier: f64) -> u32 {
    (damage as f64 * multiplier).floor() as u32
}
