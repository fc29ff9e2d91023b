pub use crate::errors::{Error, Result};

pub use crate::math;
pub use crate::math::Pose;

pub use crate::names::NameRegistry;
pub use crate::node::Node;
pub use crate::serialization::NodeDocument;
pub use crate::user_data::UserData;
