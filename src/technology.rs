//! Technology collaborator - effective weapons levels
//!
//! The combat core never stores weapons levels. Each combat round asks a
//! `Technology` implementation for the level each side fights at.

use crate::core::config::GameSettings;
use crate::core::types::{CarrierId, PlayerId, StarId};
use crate::galaxy::Galaxy;

pub trait Technology {
    /// Weapons level of the side defending `star`
    fn star_weapons(
        &self,
        galaxy: &Galaxy,
        settings: &GameSettings,
        star: StarId,
        defenders: &[PlayerId],
        defender_carriers: &[CarrierId],
        opposing_carriers: &[CarrierId],
    ) -> u32;

    /// Weapons level of a carrier-only side; `contested_star` is the star
    /// being attacked, whose specialist may debuff this side
    fn carrier_weapons(
        &self,
        galaxy: &Galaxy,
        settings: &GameSettings,
        players: &[PlayerId],
        carriers: &[CarrierId],
        opposing_carriers: &[CarrierId],
        contested_star: Option<StarId>,
    ) -> u32;
}

/// Research level plus specialist modifiers, minus enemy debuffs
#[derive(Debug, Clone, Copy, Default)]
pub struct ResearchTechnology;

impl ResearchTechnology {
    fn research_level(galaxy: &Galaxy, players: &[PlayerId]) -> u32 {
        players
            .iter()
            .filter_map(|&p| galaxy.player(p))
            .map(|p| p.weapons_level)
            .max()
            .unwrap_or(1)
    }

    fn carrier_bonus(galaxy: &Galaxy, carriers: &[CarrierId]) -> u32 {
        carriers
            .iter()
            .filter_map(|&c| galaxy.carrier(c))
            .filter_map(|c| c.specialist.as_ref())
            .map(|s| s.weapons_bonus)
            .max()
            .unwrap_or(0)
    }

    fn enemy_debuff(galaxy: &Galaxy, opposing: &[CarrierId]) -> u32 {
        opposing
            .iter()
            .filter_map(|&c| galaxy.carrier(c))
            .filter_map(|c| c.specialist.as_ref())
            .map(|s| s.enemy_weapons_debuff)
            .max()
            .unwrap_or(0)
    }
}

impl Technology for ResearchTechnology {
    fn star_weapons(
        &self,
        galaxy: &Galaxy,
        settings: &GameSettings,
        star: StarId,
        defenders: &[PlayerId],
        defender_carriers: &[CarrierId],
        opposing_carriers: &[CarrierId],
    ) -> u32 {
        let base = Self::research_level(galaxy, defenders);

        let star_bonus = galaxy
            .star(star)
            .and_then(|s| s.specialist.as_ref())
            .map_or(0, |s| s.weapons_bonus);
        let specialist_bonus = star_bonus.max(Self::carrier_bonus(galaxy, defender_carriers));
        let defender_bonus = u32::from(settings.defender_bonus);

        let debuff = Self::enemy_debuff(galaxy, opposing_carriers);

        (base + specialist_bonus + defender_bonus).saturating_sub(debuff).max(1)
    }

    fn carrier_weapons(
        &self,
        galaxy: &Galaxy,
        _settings: &GameSettings,
        players: &[PlayerId],
        carriers: &[CarrierId],
        opposing_carriers: &[CarrierId],
        contested_star: Option<StarId>,
    ) -> u32 {
        let base = Self::research_level(galaxy, players);
        let bonus = Self::carrier_bonus(galaxy, carriers);

        let star_debuff = contested_star
            .and_then(|id| galaxy.star(id))
            .and_then(|s| s.specialist.as_ref())
            .map_or(0, |s| s.enemy_weapons_debuff);
        let debuff = Self::enemy_debuff(galaxy, opposing_carriers).max(star_debuff);

        (base + bonus).saturating_sub(debuff).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;
    use crate::galaxy::{CarrierSpecialist, StarSpecialist};

    fn setup() -> (Galaxy, PlayerId, PlayerId, StarId) {
        let mut galaxy = Galaxy::new();
        let blue = galaxy.add_player("Blue", 3);
        let red = galaxy.add_player("Red", 2);
        let star = galaxy.add_star("Home", Vec2::default(), |s| s.with_owner(blue));
        (galaxy, blue, red, star)
    }

    #[test]
    fn test_star_defender_bonus() {
        let (galaxy, blue, _, star) = setup();
        let tech = ResearchTechnology;

        let with_bonus = GameSettings::default();
        let without = GameSettings {
            defender_bonus: false,
            ..GameSettings::default()
        };

        assert_eq!(tech.star_weapons(&galaxy, &with_bonus, star, &[blue], &[], &[]), 4);
        assert_eq!(tech.star_weapons(&galaxy, &without, star, &[blue], &[], &[]), 3);
    }

    #[test]
    fn test_star_specialist_bonus_and_enemy_debuff() {
        let (mut galaxy, blue, red, star) = setup();
        galaxy.stars[star.index()].specialist =
            Some(StarSpecialist { weapons_bonus: 2, ..StarSpecialist::named("Fortress") });
        let jammer = galaxy.spawn_carrier(red, 5, star);
        galaxy.carriers[jammer.index()].specialist =
            Some(CarrierSpecialist::named("Jammer").with_enemy_debuff(4));

        let settings = GameSettings::default();
        // 3 research + 2 specialist + 1 defender bonus - 4 debuff
        assert_eq!(
            ResearchTechnology.star_weapons(&galaxy, &settings, star, &[blue], &[], &[jammer]),
            2
        );
    }

    #[test]
    fn test_weapons_never_below_one() {
        let (mut galaxy, blue, red, star) = setup();
        let own = galaxy.spawn_carrier(blue, 5, star);
        let jammer = galaxy.spawn_carrier(red, 5, star);
        galaxy.carriers[jammer.index()].specialist =
            Some(CarrierSpecialist::named("Jammer").with_enemy_debuff(50));

        let level = ResearchTechnology.carrier_weapons(
            &galaxy,
            &GameSettings::default(),
            &[blue],
            &[own],
            &[jammer],
            None,
        );
        assert_eq!(level, 1);
    }

    #[test]
    fn test_allied_side_uses_best_research() {
        let (mut galaxy, blue, red, star) = setup();
        let a = galaxy.spawn_carrier(blue, 5, star);
        let b = galaxy.spawn_carrier(red, 5, star);

        let level = ResearchTechnology.carrier_weapons(
            &galaxy,
            &GameSettings::default(),
            &[red, blue],
            &[a, b],
            &[],
            None,
        );
        assert_eq!(level, 3);
    }

    #[test]
    fn test_star_specialist_debuffs_attackers() {
        let (mut galaxy, _, red, star) = setup();
        galaxy.stars[star.index()].specialist =
            Some(StarSpecialist { enemy_weapons_debuff: 1, ..StarSpecialist::named("Ion Field") });
        let raider = galaxy.spawn_carrier(red, 5, star);
        let settings = GameSettings::default();

        let at_star = ResearchTechnology.carrier_weapons(&galaxy, &settings, &[red], &[raider], &[], Some(star));
        let in_space = ResearchTechnology.carrier_weapons(&galaxy, &settings, &[red], &[raider], &[], None);

        assert_eq!(at_star, 1);
        assert_eq!(in_space, 2);
    }
}
