//! named seed shapes and random fills for the board.

use rand::Rng;

use crate::{pos, Pos, World};

/// chance for each cell to come up alive in a randomized board.
pub const SCATTER_DENSITY: f64 = 0.3;

/// a reusable shape, stored as offsets relative to a stamp anchor.
/// origin is top-left, y grows downward.
#[derive(Debug, Clone, Copy)]
pub struct Pattern {
    pub name: &'static str,
    cells: &'static [(i32, i32)],
}

/// the built-in shapes, in the order the number keys stamp them.
pub const CATALOG: &[Pattern] = &[
    Pattern {
        name: "glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "block",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
    },
    Pattern {
        name: "blinker",
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
];

impl Pattern {
    /// looks a shape up by name, ignoring case.
    pub fn by_name(name: &str) -> Option<&'static Pattern> {
        CATALOG
            .iter()
            .find(|pattern| pattern.name.eq_ignore_ascii_case(name))
    }

    /// stamps the shape onto the world with its origin at `anchor`.
    ///
    /// the stamp is additive: cells already alive stay alive, and offsets
    /// falling outside the board are dropped by the world itself.
    pub fn stamp(&self, world: &mut World, anchor: Pos) {
        for &(dx, dy) in self.cells {
            world.set_alive(anchor + pos!(dx, dy), true);
        }
    }
}

/// revives each cell with probability `density`. never kills anything.
pub fn scatter(world: &mut World, rng: &mut impl Rng, density: f64) {
    for y in 0..world.height() {
        for x in 0..world.width() {
            if rng.gen_bool(density) {
                world.set_alive(pos!(x, y), true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EdgePolicy;
    use rand::{rngs::StdRng, SeedableRng};

    fn world(width: i32, height: i32) -> World {
        World::new(width, height).unwrap()
    }

    fn alive_cells(world: &World) -> Vec<Pos> {
        let mut cells = Vec::new();
        for y in 0..world.height() {
            for x in 0..world.width() {
                if world.is_alive(pos!(x, y)) {
                    cells.push(pos!(x, y));
                }
            }
        }
        cells
    }

    #[test]
    fn test_by_name_ignores_case() {
        assert_eq!(Pattern::by_name("glider").unwrap().name, "glider");
        assert_eq!(Pattern::by_name("Beacon").unwrap().name, "beacon");
        assert_eq!(Pattern::by_name("BLINKER").unwrap().name, "blinker");
        assert!(Pattern::by_name("r-pentomino").is_none());
    }

    #[test]
    fn test_stamp_is_additive() {
        let mut world = world(8, 8);
        world.set_alive(pos!(6, 6), true);
        Pattern::by_name("glider").unwrap().stamp(&mut world, pos!(0, 0));
        assert!(
            world.is_alive(pos!(6, 6)),
            "stamping must not kill cells outside the footprint"
        );
        assert_eq!(world.population(), 6);
        assert_eq!(world.generation(), 0, "stamping is not a time step");
    }

    #[test]
    fn test_stamp_near_border_drops_overflow() {
        let mut world = world(8, 8);
        Pattern::by_name("block").unwrap().stamp(&mut world, pos!(7, 7));
        assert_eq!(world.population(), 1, "only the in-bounds corner lands");
        assert!(world.is_alive(pos!(7, 7)));

        Pattern::by_name("glider").unwrap().stamp(&mut world, pos!(-1, -1));
        assert_eq!(world.population(), 4, "offsets above or left of the board drop");
    }

    #[test]
    fn test_block_is_a_still_life() {
        for policy in [EdgePolicy::Wrap, EdgePolicy::Clip] {
            let mut world = world(6, 6);
            world.set_edge_policy(policy);
            Pattern::by_name("block").unwrap().stamp(&mut world, pos!(2, 2));
            let before = alive_cells(&world);
            for _ in 0..5 {
                world.advance();
            }
            assert_eq!(alive_cells(&world), before, "block must not move under {policy:?}");
        }
    }

    #[test]
    fn test_blinker_oscillates_with_period_two() {
        let mut world = world(7, 7);
        Pattern::by_name("blinker").unwrap().stamp(&mut world, pos!(2, 3));
        let phase_a = alive_cells(&world);
        world.advance();
        let phase_b = alive_cells(&world);
        assert_ne!(phase_a, phase_b, "a blinker changes every step");
        world.advance();
        assert_eq!(alive_cells(&world), phase_a);
    }

    #[test]
    fn test_toad_and_beacon_oscillate_with_period_two() {
        for name in ["toad", "beacon"] {
            let mut world = world(9, 9);
            Pattern::by_name(name).unwrap().stamp(&mut world, pos!(2, 2));
            let phase_a = alive_cells(&world);
            world.advance();
            assert_ne!(alive_cells(&world), phase_a, "{name} changes every step");
            world.advance();
            assert_eq!(alive_cells(&world), phase_a, "{name} has period two");
        }
    }

    #[test]
    fn test_glider_travels_diagonally() {
        let mut world = world(9, 9);
        Pattern::by_name("glider").unwrap().stamp(&mut world, pos!(2, 2));
        let start = alive_cells(&world);
        for _ in 0..4 {
            world.advance();
        }
        let expected: Vec<Pos> = start.iter().map(|&cell| cell + pos!(1, 1)).collect();
        assert_eq!(
            alive_cells(&world),
            expected,
            "four steps translate the glider by (+1, +1)"
        );
    }

    #[test]
    fn test_scatter_respects_density_bounds() {
        let mut world = world(20, 20);
        let mut rng = StdRng::seed_from_u64(7);

        scatter(&mut world, &mut rng, 0.0);
        assert_eq!(world.population(), 0);

        scatter(&mut world, &mut rng, 0.3);
        let population = world.population();
        assert!(
            population > 40 && population < 240,
            "density 0.3 fill landed at {population} of 400"
        );

        scatter(&mut world, &mut rng, 1.0);
        assert_eq!(world.population(), 400);
    }
}
