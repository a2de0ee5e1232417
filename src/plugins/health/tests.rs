use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;

#[test]
fn damage_then_lethal_damage_reports_death_once() {
    let mut hp = Health::new(100.0);

    assert_eq!(hp.apply_damage(30.0), DamageOutcome::Hurt);
    assert_eq!(hp.current(), 70.0);
    assert!(hp.is_alive());

    assert_eq!(hp.apply_damage(80.0), DamageOutcome::Died);
    assert_eq!(hp.current(), 0.0);
    assert!(!hp.is_alive());

    // Further hits are no-ops.
    assert_eq!(hp.apply_damage(10.0), DamageOutcome::Ignored);
    assert_eq!(hp.apply_damage(1000.0), DamageOutcome::Ignored);
    assert_eq!(hp.current(), 0.0);
}

#[test]
fn heal_clamps_to_max_and_is_refused_when_dead() {
    let mut hp = Health::new(50.0);
    assert!(!hp.heal(10.0), "already full");

    hp.apply_damage(20.0);
    assert!(hp.heal(100.0));
    assert_eq!(hp.current(), 50.0);

    hp.apply_damage(50.0);
    assert!(!hp.heal(10.0));
    assert_eq!(hp.current(), 0.0);
}

#[test]
fn reset_revives_and_rearms_the_death_latch() {
    let mut hp = Health::new(10.0);
    assert_eq!(hp.apply_damage(10.0), DamageOutcome::Died);

    hp.reset();
    assert_eq!(hp.current(), 10.0);
    assert!(hp.is_alive());
    assert_eq!(hp.apply_damage(10.0), DamageOutcome::Died);
}

#[test]
fn non_positive_amounts_are_ignored() {
    let mut hp = Health::new(10.0);
    assert_eq!(hp.apply_damage(0.0), DamageOutcome::Ignored);
    assert_eq!(hp.apply_damage(-5.0), DamageOutcome::Ignored);
    assert_eq!(hp.apply_damage(f32::NAN), DamageOutcome::Ignored);
    assert_eq!(hp.current(), 10.0);
}

#[test]
fn non_positive_max_is_clamped() {
    let hp = Health::new(0.0);
    assert_eq!(hp.max(), 1.0);
    assert!(hp.is_alive());
}

#[test]
fn bounds_hold_under_random_damage_and_healing() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);

    for _case in 0..2_000 {
        let max: f32 = rng.gen_range(1.0..201.0);
        let mut hp = Health::new(max);
        let mut deaths = 0;

        for _ in 0..20 {
            let amount: f32 = rng.gen_range(0.0..60.0);
            if rng.gen_bool(0.7) {
                if hp.apply_damage(amount) == DamageOutcome::Died {
                    deaths += 1;
                }
            } else {
                hp.heal(amount);
            }

            assert!(hp.current() >= 0.0 && hp.current() <= hp.max());
            assert_eq!(hp.is_alive(), hp.current() > 0.0);
        }

        assert!(deaths <= 1);
    }
}

#[test]
fn strike_writes_died_only_on_killing_blow() {
    use crate::common::test_utils::{drain_messages, ensure_messages, run_system_once};

    let mut world = World::new();
    ensure_messages::<Died>(&mut world);
    let target = world.spawn(Health::new(20.0)).id();

    let hit = move |mut q: Query<&mut Health>, mut died: MessageWriter<Died>| {
        let mut hp = q.get_mut(target).unwrap();
        strike(target, &mut hp, 15.0, &mut died)
    };

    assert_eq!(run_system_once(&mut world, hit), DamageOutcome::Hurt);
    assert!(drain_messages::<Died>(&mut world).is_empty());

    assert_eq!(run_system_once(&mut world, hit), DamageOutcome::Died);
    assert_eq!(run_system_once(&mut world, hit), DamageOutcome::Ignored);
    assert_eq!(drain_messages::<Died>(&mut world), vec![Died { entity: target }]);
}
