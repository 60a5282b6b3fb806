//! Spreading a side's losses over the objects holding its ships

/// Split `kills` across `ships`, returning the loss for each object
///
/// Each round divides what is left evenly (floored, at least one) among the
/// objects that still hold ships, in slice order. Panics if `kills` exceeds
/// the ships available.
pub fn distribute_damage(ships: &[u32], kills: u32) -> Vec<u32> {
    let available: u64 = ships.iter().map(|&s| u64::from(s)).sum();
    assert!(
        u64::from(kills) <= available,
        "cannot destroy {} ships, only {} present",
        kills,
        available
    );

    let mut remaining_ships = ships.to_vec();
    let mut losses = vec![0u32; ships.len()];
    let mut remaining = kills;

    while remaining > 0 {
        let holders = remaining_ships.iter().filter(|&&s| s > 0).count() as u32;
        let share = (remaining / holders).max(1);

        for (held, lost) in remaining_ships.iter_mut().zip(losses.iter_mut()) {
            if remaining == 0 {
                break;
            }
            if *held == 0 {
                continue;
            }
            let hit = share.min(*held).min(remaining);
            *held -= hit;
            *lost += hit;
            remaining -= hit;
        }
    }

    losses
}
