use super::*;

fn assert_close(a: f32, b: f32) {
    assert!((a - b).abs() < 1e-4, "{a} != {b}");
}

#[test]
fn six_pellets_over_ten_degrees_are_evenly_spaced() {
    let offsets = pellet_offsets(FirePattern::Spread { pellets: 6, spread_degrees: 10.0 });
    let expected = [-5.0, -3.0, -1.0, 1.0, 3.0, 5.0];
    assert_eq!(offsets.len(), expected.len());
    for (got, want) in offsets.iter().zip(expected) {
        assert_close(*got, want);
    }
}

#[test]
fn one_pellet_spread_flies_straight() {
    assert_eq!(pellet_offsets(FirePattern::Spread { pellets: 1, spread_degrees: 45.0 }), vec![0.0]);
    assert_eq!(pellet_offsets(FirePattern::Spread { pellets: 0, spread_degrees: 45.0 }), vec![0.0]);
    assert_eq!(pellet_offsets(FirePattern::Single), vec![0.0]);
}

#[test]
fn offsets_are_symmetric_about_aim() {
    for pellets in 2..12 {
        let offsets = pellet_offsets(FirePattern::Spread { pellets, spread_degrees: 37.0 });
        let n = offsets.len();
        for i in 0..n {
            assert_close(offsets[i], -offsets[n - 1 - i]);
        }
    }
}

#[test]
fn fire_is_rejected_until_cooldown_elapses() {
    let mut weapon = Weapon::new(vec![WeaponConfig { fire_rate: 0.5, ..WeaponConfig::pistol() }]);

    assert_eq!(weapon.try_fire(Vec2::X).map(|d| d.len()), Some(1));
    assert!(weapon.try_fire(Vec2::X).is_none());

    weapon.tick(0.3);
    assert!(weapon.try_fire(Vec2::X).is_none());

    weapon.tick(0.2);
    assert!(weapon.try_fire(Vec2::X).is_some());
}

#[test]
fn spread_emits_pellet_count_unit_directions() {
    let mut weapon = Weapon::new(vec![WeaponConfig::shotgun()]);
    let dirs = weapon.try_fire(Vec2::new(0.0, 3.0)).unwrap();

    assert_eq!(dirs.len(), 6);
    for d in &dirs {
        assert_close(d.length(), 1.0);
    }
    // First and last pellets mirror each other across the aim axis (Y).
    assert_close(dirs[0].x, -dirs[5].x);
    assert_close(dirs[0].y, dirs[5].y);
}

#[test]
fn zero_aim_falls_back_to_up() {
    let mut weapon = Weapon::new(vec![WeaponConfig::pistol()]);
    let dirs = weapon.try_fire(Vec2::ZERO).unwrap();
    assert_eq!(dirs, vec![Vec2::Y]);
}

#[test]
fn select_ignores_out_of_range() {
    let mut weapon = Weapon::default();
    assert!(weapon.select(1));
    assert_eq!(weapon.current().unwrap().name, "Shotgun");
    assert!(!weapon.select(9));
    assert_eq!(weapon.selected(), 1);
}

#[test]
fn empty_loadout_never_fires() {
    let mut weapon = Weapon::new(Vec::new());
    assert!(weapon.current().is_none());
    assert!(weapon.try_fire(Vec2::X).is_none());
}

#[test]
fn max_distance_scales_with_map_extent() {
    let cfg = WeaponConfig { range_fraction: 0.5, ..WeaponConfig::pistol() };
    assert_close(cfg.max_distance(2000.0), 1000.0);

    let wild = WeaponConfig { range_fraction: 4.0, ..WeaponConfig::pistol() };
    assert_close(wild.max_distance(2000.0), 2000.0);
}
