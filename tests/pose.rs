extern crate scene_graph;

use scene_graph::math::*;
use scene_graph::prelude::*;

fn assert_pose_eq(lhs: Pose, rhs: Pose) {
    let l: &[f64; 16] = lhs.as_ref();
    let r: &[f64; 16] = rhs.as_ref();
    for (a, b) in l.iter().zip(r.iter()) {
        assert!((a - b).abs() < 1e-9, "{:?} != {:?}", lhs, rhs);
    }
}

fn rotation() -> Pose {
    Pose::from_angle_z(Deg(90.0)) * Pose::from_angle_x(Deg(30.0))
}

#[test]
fn root_world_is_local() {
    let registry = NameRegistry::new();
    let root = Node::create_in(&registry, "root");
    assert_eq!(root.local_pose(), identity());
    assert_eq!(root.world_pose(), identity());

    let pose = from_translation(1.0, 0.534, 0.3) * rotation();
    assert!(root.set_world_pose(pose));
    assert_eq!(root.local_pose(), pose);
    assert_eq!(root.world_pose(), root.local_pose());
}

#[test]
fn compose() {
    let registry = NameRegistry::new();
    let e1 = Node::create_in(&registry, "e1");
    let e2 = Node::create_in(&registry, "e2");
    let e3 = Node::create_in(&registry, "e3");
    e1.add_child(&e2);
    e2.add_child(&e3);

    e1.set_local_pose(from_translation(1.0, 0.0, 2.0));
    e2.set_local_pose(Pose::from_angle_y(Deg(90.0)));
    e3.set_local_pose(from_translation(0.0, 0.0, 1.0));

    // Ancestors are applied on the left.
    assert_pose_eq(e3.world_pose(), e1.local_pose() * e2.local_pose() * e3.local_pose());
    assert_pose_eq(e2.world_pose(), e1.local_pose() * e2.local_pose());

    let position = translation(&e3.world_pose());
    assert!((position - Vector3::new(2.0, 0.0, 2.0)).magnitude() < 1e-9);
}

#[test]
fn world_round_trip() {
    let registry = NameRegistry::new();
    let root = Node::create_in(&registry, "root");
    let parent = Node::create_in(&registry, "parent");
    let child = Node::create_in(&registry, "child");
    root.add_child(&parent);
    parent.add_child(&child);

    root.set_local_pose(from_translation(0.5, -1.0, 0.0) * Pose::from_angle_x(Deg(45.0)));
    parent.set_local_pose(from_translation(1.0, 0.534, 0.3) * Pose::from_angle_z(Deg(-60.0)));

    let poses = [
        identity(),
        from_translation(1.0, 2.0, 3.0),
        rotation(),
        from_translation(-4.0, 0.25, 7.5) * rotation(),
    ];

    for &pose in &poses {
        assert!(child.set_world_pose(pose));
        assert_pose_eq(child.world_pose(), pose);
        assert_pose_eq(parent.world_pose() * child.local_pose(), pose);
    }
}

#[test]
fn reparent_keeps_local() {
    let registry = NameRegistry::new();
    let p1 = Node::create_in(&registry, "p1");
    let p2 = Node::create_in(&registry, "p2");
    let child = Node::create_in(&registry, "child");
    p1.set_local_pose(from_translation(1.0, 0.0, 0.0));
    p2.set_local_pose(from_translation(0.0, 1.0, 0.0));
    child.set_local_pose(from_translation(0.0, 0.0, 1.0));

    p1.add_child(&child);
    assert_eq!(child.world_pose(), from_translation(1.0, 0.0, 1.0));

    p2.add_child(&child);
    assert_eq!(child.local_pose(), from_translation(0.0, 0.0, 1.0));
    assert_eq!(child.world_pose(), from_translation(0.0, 1.0, 1.0));

    p2.remove_child(&child);
    assert_eq!(child.world_pose(), child.local_pose());
}

#[test]
fn singular_parent() {
    let registry = NameRegistry::new();
    let parent = Node::create_in(&registry, "parent");
    let child = Node::create_in(&registry, "child");
    parent.add_child(&child);

    let local = from_translation(0.0, 0.0, 1.0);
    child.set_local_pose(local);
    parent.set_local_pose(Pose::from_scale(0.0));

    assert!(!child.set_world_pose(identity()));
    assert_eq!(child.local_pose(), local);
}

#[test]
fn unchecked_matrices() {
    let registry = NameRegistry::new();
    let parent = Node::create_in(&registry, "parent");
    let child = Node::create_in(&registry, "child");
    parent.add_child(&child);

    // Scaling is not a rigid transform, but is accepted as it is.
    parent.set_local_pose(Pose::from_scale(2.0));
    child.set_local_pose(from_translation(1.0, 0.0, 0.0));
    assert_eq!(translation(&child.world_pose()), Vector3::new(2.0, 0.0, 0.0));

    assert!(child.set_world_pose(from_translation(4.0, 0.0, 0.0)));
    let position = translation(&child.local_pose());
    assert!((position - Vector3::new(2.0, 0.0, 0.0)).magnitude() < 1e-9);
}
