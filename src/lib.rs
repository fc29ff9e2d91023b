//! # What is This?
//!
//! A small scene graph for robotics and graphics tooling. It organizes a handful of
//! rigid bodies, like robots, tools and sensors, into a tree of named nodes, and
//! places every node relative to its parent with a 4x4 pose.
//!
//! ```rust
//! use scene_graph::prelude::*;
//!
//! let names = NameRegistry::new();
//! let root = Node::create_in(&names, "Root");
//! let robot = Node::create_in(&names, "Robot");
//! root.add_child(&robot);
//!
//! root.set_local_pose(math::from_translation(1.0, 0.0, 0.0));
//! robot.set_local_pose(math::from_translation(0.0, 2.0, 0.0));
//! assert_eq!(robot.world_pose(), math::from_translation(1.0, 2.0, 0.0));
//!
//! assert_eq!(root.scene_graph(), "+Root\n  -Robot\n");
//! ```
//!
//! Nodes are single-threaded `Rc` values. Misuse like removing a node that is not
//! a child never panics, it is reported through the `log` facade and answered with
//! an explicit outcome value.

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

pub mod errors;
pub mod math;
pub mod names;
pub mod node;
pub mod prelude;
pub mod serialization;
pub mod user_data;
