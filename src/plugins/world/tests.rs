use bevy::prelude::*;
use avian2d::prelude::*;
use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;

use super::SpawnPoints;

#[test]
fn spawns_walls_on_startup() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    run_system_once(&mut world, super::spawn_arena);

    let walls = world.query::<(&Name, &RigidBody)>().iter(&world)
        .filter(|(n, rb)| n.as_str().starts_with("Wall") && matches!(**rb, RigidBody::Static))
        .count();
    assert_eq!(walls, 4);
}

#[test]
fn spawn_points_stay_inside_the_arena() {
    let half = Vec2::new(500.0, 300.0);
    let points = SpawnPoints::around_arena(half, 50.0);
    assert_eq!(points.0.len(), 8);
    for p in &points.0 {
        assert!(p.x.abs() <= 450.0 && p.y.abs() <= 250.0, "{p:?} outside");
    }
}

#[test]
fn plugin_keeps_caller_spawn_points() {
    let mut app = App::new();
    app.insert_resource(Tunables::default());
    app.insert_resource(SpawnPoints(vec![Vec2::new(1.0, 2.0)]));
    super::plugin(&mut app);
    assert_eq!(app.world().resource::<SpawnPoints>().0, vec![Vec2::new(1.0, 2.0)]);
}
