#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use crate::actions::{Action, ActionFailure};
    use crate::entity::*;
    use crate::grid::Grid;
    use crate::observations::{Observation, TeamView};
    use crate::types::*;

    fn aircraft(id: u32, team: Team, x: i32, y: i32) -> Entity {
        Entity {
            id: EntityId(id),
            team,
            pos: GridPos::new(x, y),
            alive: true,
            body: EntityBody::Aircraft(AircraftStats {
                radar_range: 5.0,
                weapon: WeaponStats {
                    missiles: 4,
                    max_range: 4.0,
                    base_hit_prob: 0.8,
                    min_hit_prob: 0.1,
                },
            }),
        }
    }

    fn sam(id: u32, team: Team, on: bool) -> Entity {
        Entity {
            id: EntityId(id),
            team,
            pos: GridPos::new(0, 0),
            alive: true,
            body: EntityBody::Sam(SamStats {
                radar_range: 8.0,
                weapon: WeaponStats {
                    missiles: 6,
                    max_range: 6.0,
                    base_hit_prob: 0.8,
                    min_hit_prob: 0.1,
                },
                cooldown_steps: 5,
                remaining_cooldown: 0,
                radar_on: on,
            }),
        }
    }

    // ---- Grid geometry ----

    #[test]
    fn test_grid_bounds() {
        let grid = Grid::new(20, 13);
        assert!(grid.in_bounds(GridPos::new(0, 0)));
        assert!(grid.in_bounds(GridPos::new(19, 12)));
        assert!(!grid.in_bounds(GridPos::new(20, 12)));
        assert!(!grid.in_bounds(GridPos::new(19, 13)));
        assert!(!grid.in_bounds(GridPos::new(-1, 0)));
        assert!(!grid.in_bounds(GridPos::new(0, -1)));
    }

    #[test]
    fn test_grid_distances() {
        let grid = Grid::new(20, 20);
        let a = GridPos::new(0, 0);
        let b = GridPos::new(3, 4);
        assert!((grid.distance(a, b) - 5.0).abs() < 1e-10);
        assert_eq!(grid.manhattan_distance(a, b), 7);
        assert_eq!(grid.manhattan_distance(b, a), 7);
    }

    #[test]
    fn test_grid_neighbors() {
        let grid = Grid::new(10, 10);

        let center = grid.neighbors(GridPos::new(5, 5), false);
        assert_eq!(center.len(), 4);
        let center_diag = grid.neighbors(GridPos::new(5, 5), true);
        assert_eq!(center_diag.len(), 8);

        // Corner is clipped to the grid.
        let corner = grid.neighbors(GridPos::new(0, 0), false);
        assert_eq!(corner.len(), 2);
        let corner_diag = grid.neighbors(GridPos::new(0, 0), true);
        assert_eq!(corner_diag.len(), 3);
    }

    #[test]
    fn test_positions_in_range() {
        let grid = Grid::new(10, 10);
        let cells = grid.positions_in_range(GridPos::new(5, 5), 1.0);
        // Center plus four cardinal cells; diagonals are sqrt(2) away.
        assert_eq!(cells.len(), 5);
        assert!(cells.contains(&GridPos::new(5, 5)));
        assert!(cells.contains(&GridPos::new(6, 5)));
        assert!(!cells.contains(&GridPos::new(6, 6)));

        // Clipped at the corner.
        let corner = grid.positions_in_range(GridPos::new(0, 0), 1.0);
        assert_eq!(corner.len(), 3);
    }

    #[test]
    fn test_to_screen_flips_y() {
        let grid = Grid::new(20, 13);
        assert_eq!(grid.to_screen(GridPos::new(0, 0)), (0, 12));
        assert_eq!(grid.to_screen(GridPos::new(4, 12)), (4, 0));
    }

    // ---- Entity capabilities ----

    #[test]
    fn test_capability_matrix() {
        let air = aircraft(1, Team::Blue, 0, 0);
        assert!(air.can_move() && air.can_shoot());
        assert_eq!(air.kind(), EntityKind::Aircraft);

        let awacs = Entity {
            id: EntityId(2),
            team: Team::Blue,
            pos: GridPos::new(1, 1),
            alive: true,
            body: EntityBody::Awacs(AwacsStats { radar_range: 9.0 }),
        };
        assert!(awacs.can_move() && !awacs.can_shoot());
        assert!(awacs.weapon().is_none());

        let sam = sam(3, Team::Red, true);
        assert!(!sam.can_move() && sam.can_shoot());

        let decoy = Entity {
            id: EntityId(4),
            team: Team::Red,
            pos: GridPos::new(2, 2),
            alive: true,
            body: EntityBody::Decoy,
        };
        assert!(decoy.can_move() && !decoy.can_shoot());
        assert_eq!(decoy.radar_range(), 0.0);
    }

    #[test]
    fn test_sam_active_radar_follows_power_state() {
        let mut s = sam(1, Team::Red, true);
        assert!((s.active_radar_range() - 8.0).abs() < 1e-10);

        s.sam_mut().unwrap().radar_on = false;
        assert_eq!(s.active_radar_range(), 0.0);
        // Configured range is unchanged.
        assert!((s.radar_range() - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_sam_cooldown_lifecycle() {
        let mut s = sam(1, Team::Blue, true);
        let stats = s.sam_mut().unwrap();
        assert_eq!(stats.remaining_cooldown, 0);

        stats.start_cooldown();
        assert_eq!(stats.remaining_cooldown, 5);

        for expected in (0..5).rev() {
            stats.tick_cooldown();
            assert_eq!(stats.remaining_cooldown, expected);
        }
        // Ticking at zero stays at zero.
        stats.tick_cooldown();
        assert_eq!(stats.remaining_cooldown, 0);
    }

    #[test]
    fn test_entity_label() {
        let air = aircraft(7, Team::Blue, 0, 0);
        assert_eq!(air.label(), "Aircraft#7(BLUE)");
        let s = sam(12, Team::Red, false);
        assert_eq!(s.label(), "SAM#12(RED)");
    }

    // ---- Serde round-trips ----

    #[test]
    fn test_action_serde() {
        let actions = vec![
            Action::Wait,
            Action::Move {
                dir: MoveDir::North,
            },
            Action::Shoot {
                target_id: EntityId(9),
            },
            Action::Toggle { on: false },
        ];
        for action in &actions {
            let json = serde_json::to_string(action).unwrap();
            let back: Action = serde_json::from_str(&json).unwrap();
            assert_eq!(*action, back);
        }
    }

    #[test]
    fn test_entity_serde() {
        let entities = vec![
            aircraft(1, Team::Blue, 5, 10),
            sam(2, Team::Red, false),
            Entity {
                id: EntityId(3),
                team: Team::Red,
                pos: GridPos::new(16, 10),
                alive: true,
                body: EntityBody::Decoy,
            },
        ];
        for entity in &entities {
            let json = serde_json::to_string(entity).unwrap();
            let back: Entity = serde_json::from_str(&json).unwrap();
            assert_eq!(*entity, back);
        }
    }

    #[test]
    fn test_failure_reason_codes_distinct() {
        let reasons = [
            ActionFailure::NoMoveCapability,
            ActionFailure::NoShootCapability,
            ActionFailure::OutOfBounds,
            ActionFailure::CellOccupied,
            ActionFailure::CannotToggle,
            ActionFailure::NoMissiles,
            ActionFailure::OnCooldown,
            ActionFailure::TargetNotVisible,
            ActionFailure::TargetDead,
            ActionFailure::OutOfRange,
        ];
        let codes: BTreeSet<&str> = reasons.iter().map(|r| r.as_str()).collect();
        assert_eq!(codes.len(), reasons.len());
    }

    // ---- Team view ----

    fn obs(id: u32, team: Team, distance: f64, seen_by: &[u32]) -> Observation {
        Observation {
            entity_id: EntityId(id),
            kind: EntityKind::Aircraft,
            team,
            pos: GridPos::new(0, 0),
            distance,
            seen_by: seen_by.iter().map(|&i| EntityId(i)).collect(),
        }
    }

    #[test]
    fn test_team_view_merge_keeps_min_distance_and_unions_observers() {
        let mut view = TeamView::default();
        view.merge(obs(5, Team::Red, 4.0, &[1]));
        view.merge(obs(5, Team::Red, 2.5, &[2]));
        view.merge(obs(5, Team::Red, 6.0, &[3]));

        let merged = view.get(EntityId(5)).unwrap();
        assert!((merged.distance - 2.5).abs() < 1e-10);
        let observers: Vec<u32> = merged.seen_by.iter().map(|id| id.0).collect();
        assert_eq!(observers, vec![1, 2, 3]);
    }

    #[test]
    fn test_team_view_reset_preserves_fired_history() {
        let mut view = TeamView::default();
        view.merge(obs(5, Team::Red, 4.0, &[1]));
        view.record_enemy_fired(EntityId(5));

        view.reset();
        assert!(view.is_empty());
        assert!(view.has_enemy_fired(EntityId(5)));

        // History only ever grows.
        view.record_enemy_fired(EntityId(6));
        assert_eq!(view.enemy_fired_ids().count(), 2);
    }

    #[test]
    fn test_team_view_enemy_and_friendly_ids() {
        let mut view = TeamView::default();
        view.merge(obs(1, Team::Blue, 0.0, &[1]));
        view.merge(obs(2, Team::Red, 3.0, &[1]));
        view.merge(obs(3, Team::Red, 4.0, &[1]));

        assert_eq!(view.friendly_ids(Team::Blue), vec![EntityId(1)]);
        assert_eq!(view.enemy_ids(Team::Blue), vec![EntityId(2), EntityId(3)]);
    }

    #[test]
    fn test_team_serde_and_opponent() {
        for team in Team::ALL {
            let json = serde_json::to_string(&team).unwrap();
            let back: Team = serde_json::from_str(&json).unwrap();
            assert_eq!(team, back);
            assert_eq!(team.opponent().opponent(), team);
        }
    }
}
