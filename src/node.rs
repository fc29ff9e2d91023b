use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use inlinable_string::InlinableString;

use crate::math::{Pose, SquareMatrix};
use crate::names::NameRegistry;
use crate::user_data::UserData;

/// `Node` stores a name and a pose, and keeps the tree relationships between
/// objects in scene graph, so you can access the pose of a node in both local
/// and world space.
///
/// Nodes are always handled through `Rc<Node>`. The children list of a node is
/// the only owning path down the tree, while the parent link is a `Weak`
/// back-reference used for traversal. A node is dropped as soon as it has been
/// removed from its parent and no client holds a handle to it.
///
/// World poses, encoding and dropping recurse once per level of the tree, so a
/// chain of many thousands of nodes can overflow the stack. Trees of robots,
/// tools and sensors are a few levels deep.
pub struct Node {
    pub(crate) names: NameRegistry,
    pub(crate) name: RefCell<InlinableString>,
    pub(crate) local_pose: Cell<Pose>,
    pub(crate) parent: RefCell<Weak<Node>>,
    pub(crate) children: RefCell<Vec<Rc<Node>>>,
    pub(crate) user_data: RefCell<HashMap<String, UserData>>,
}

impl Node {
    /// Creates a new root node, with its name resolved by the global registry.
    #[inline]
    pub fn create<T: AsRef<str>>(name: T) -> Rc<Node> {
        Node::create_in(&NameRegistry::global(), name)
    }

    /// Creates a new root node, with its name resolved by `names`.
    pub fn create_in<T: AsRef<str>>(names: &NameRegistry, name: T) -> Rc<Node> {
        let resolved = names.resolve(name.as_ref());

        Rc::new(Node {
            names: names.clone(),
            name: RefCell::new(resolved.as_str().into()),
            local_pose: Cell::new(Pose::identity()),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
            user_data: RefCell::new(HashMap::new()),
        })
    }

    /// Gets the registry this node resolves names through.
    #[inline]
    pub fn names(&self) -> &NameRegistry {
        &self.names
    }

    /// Gets the resolved name of this node.
    #[inline]
    pub fn name(&self) -> String {
        self.name.borrow().to_string()
    }

    /// Renames this node. The new name goes through the same resolution as
    /// `Node::create`, and the old name stays consumed.
    pub fn set_name<T: AsRef<str>>(&self, name: T) {
        let resolved = self.names.resolve(name.as_ref());
        *self.name.borrow_mut() = resolved.as_str().into();
    }
}

impl Node {
    /// Gets the parent node.
    #[inline]
    pub fn parent(&self) -> Option<Rc<Node>> {
        self.parent.borrow().upgrade()
    }

    /// Returns a snapshot of the children, in insertion order.
    #[inline]
    pub fn children(&self) -> Vec<Rc<Node>> {
        self.children.borrow().clone()
    }

    /// Returns the number of direct children.
    #[inline]
    pub fn num_children(&self) -> usize {
        self.children.borrow().len()
    }

    /// Gets the child at `index`, or `None` if out of range.
    pub fn child(&self, index: usize) -> Option<Rc<Node>> {
        let children = self.children.borrow();
        if index >= children.len() {
            warn!(
                "Index {} is larger than number of children {}.",
                index,
                children.len()
            );
            return None;
        }

        Some(children[index].clone())
    }

    /// Returns ture if this is the leaf of a hierarchy, aka. has no child.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.borrow().is_empty()
    }

    /// Returns ture if this is the root of a hierarchy, aka. has no parent.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    /// Returns true if `node` is a direct child of this node.
    #[inline]
    pub fn has_child(&self, node: &Rc<Node>) -> bool {
        self.children
            .borrow()
            .iter()
            .any(|v| Rc::ptr_eq(v, node))
    }

    /// Attachs `node` to this node, after existing children.
    ///
    /// If `node` already has another parent, it is detached from it first. Returns
    /// true if the hierarchy has been changed.
    pub fn add_child<'a, T>(self: &Rc<Self>, node: T) -> bool
    where
        T: Into<Option<&'a Rc<Node>>>,
    {
        let node = match node.into() {
            Some(node) => node,
            None => {
                warn!("Can not add a none node as child of {}.", self);
                return false;
            }
        };

        if self.has_child(node) {
            debug!("{} is already a child of {}.", node, self);
            return false;
        }

        if Rc::ptr_eq(self, node) || self.is_ancestor(node) {
            warn!("{} can not be attached below itself.", node);
            return false;
        }

        if let Some(parent) = node.parent() {
            parent.remove_child(node);
        }

        self.children.borrow_mut().push(node.clone());
        *node.parent.borrow_mut() = Rc::downgrade(self);
        true
    }

    /// Detachs `node` from this node, and returns it if it was a child. The removed
    /// node becomes a root. Its own children are not affected.
    pub fn remove_child<'a, T>(&self, node: T) -> Option<Rc<Node>>
    where
        T: Into<Option<&'a Rc<Node>>>,
    {
        let node = match node.into() {
            Some(node) => node,
            None => {
                warn!("Can not remove a none node from {}.", self);
                return None;
            }
        };

        let removed = {
            let mut children = self.children.borrow_mut();
            children
                .iter()
                .position(|v| Rc::ptr_eq(v, node))
                .map(|index| children.remove(index))
        };

        match removed {
            Some(removed) => {
                *removed.parent.borrow_mut() = Weak::new();
                Some(removed)
            }
            None => {
                warn!("{} is not a child of {}.", node, self);
                None
            }
        }
    }

    /// Detachs the child at `index`. An out of range index changes nothing.
    #[inline]
    pub fn remove_child_at(&self, index: usize) -> Option<Rc<Node>> {
        self.remove_child(self.child(index).as_ref())
    }

    /// Detachs this node from its parent. Returns false if it was already a root.
    pub fn detach(self: &Rc<Self>) -> bool {
        match self.parent() {
            Some(parent) => parent.remove_child(self).is_some(),
            None => false,
        }
    }

    /// Returns an iterator of its ancestors, from parent up to the root.
    #[inline]
    pub fn ancestors(&self) -> Ancestors {
        Ancestors {
            cursor: self.parent(),
        }
    }

    /// Returns an iterator of its descendants in tree order.
    #[inline]
    pub fn descendants(&self) -> Descendants {
        Descendants {
            stack: self.children.borrow().iter().rev().cloned().collect(),
        }
    }

    /// Return true if `rhs` is one of the ancestors of this node.
    pub fn is_ancestor(&self, rhs: &Rc<Node>) -> bool {
        self.ancestors().any(|v| Rc::ptr_eq(&v, rhs))
    }

    /// Returns the root of the tree this node belongs to.
    pub fn root(self: &Rc<Self>) -> Rc<Node> {
        self.ancestors().last().unwrap_or_else(|| self.clone())
    }

    /// Finds a descendant by path and returns it.
    ///
    /// Path components are the names of children separated by '/', starting from
    /// this node. Empty components are skipped, so an empty path returns this node.
    pub fn find<N: AsRef<str>>(self: &Rc<Self>, path: N) -> Option<Rc<Node>> {
        let mut iter = self.clone();
        for component in path.as_ref().split('/') {
            if component.is_empty() {
                continue;
            }

            let next = iter
                .children
                .borrow()
                .iter()
                .find(|v| &**v.name.borrow() == component)
                .cloned();

            iter = next?;
        }

        Some(iter)
    }
}

/// An iterator of its ancestors.
pub struct Ancestors {
    cursor: Option<Rc<Node>>,
}

impl Iterator for Ancestors {
    type Item = Rc<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.cursor.as_ref().and_then(|v| v.parent());
        ::std::mem::replace(&mut self.cursor, next)
    }
}

/// An iterator of its descendants, in tree order.
pub struct Descendants {
    stack: Vec<Rc<Node>>,
}

impl Iterator for Descendants {
    type Item = Rc<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Deep first, so push the children in reverse order.
        self.stack
            .extend(node.children.borrow().iter().rev().cloned());
        Some(node)
    }
}

impl Node {
    /// Sets the pose in local space.
    #[inline]
    pub fn set_local_pose(&self, pose: Pose) {
        self.local_pose.set(pose);
    }

    /// Gets the pose in local space.
    #[inline]
    pub fn local_pose(&self) -> Pose {
        self.local_pose.get()
    }

    /// Sets the pose in world space, by expressing it in the frame of the parent.
    ///
    /// Returns false and keeps the local pose if the world pose of the parent can
    /// not be inversed.
    pub fn set_world_pose(&self, pose: Pose) -> bool {
        if let Some(parent) = self.parent() {
            match parent.world_pose().invert() {
                Some(inverse) => self.set_local_pose(inverse * pose),
                None => {
                    warn!("The world pose of {} can not be inversed.", parent);
                    return false;
                }
            }
        } else {
            self.set_local_pose(pose);
        }

        true
    }

    /// Gets the pose in world space. It is computed from the ancestors every time.
    pub fn world_pose(&self) -> Pose {
        match self.parent() {
            Some(parent) => parent.world_pose() * self.local_pose(),
            None => self.local_pose(),
        }
    }
}

impl Node {
    /// Appends the hierarchy of this node to `description` and returns it.
    ///
    /// Every node takes one line, `indent` spaces followed by `+` for nodes with
    /// children or `-` for leaves and then the name. Children are indented by two
    /// more spaces. The buffer is never cleared.
    pub fn print_scene_graph<'a>(
        &self,
        description: &'a mut String,
        indent: usize,
    ) -> &'a mut String {
        description.extend(::std::iter::repeat(' ').take(indent));
        description.push(if self.is_leaf() { '-' } else { '+' });
        description.push_str(&self.name.borrow());
        description.push('\n');

        for child in self.children.borrow().iter() {
            child.print_scene_graph(description, indent + 2);
        }

        description
    }

    /// Returns the hierarchy of this node as a new string.
    #[inline]
    pub fn scene_graph(&self) -> String {
        let mut description = String::new();
        self.print_scene_graph(&mut description, 0);
        description
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<Node {} at {:p}>", self.name.borrow(), self)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name())
            .field("local_pose", &self.local_pose())
            .field("children", &self.num_children())
            .finish()
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        trace!("{} is destructed!", self);
    }
}
