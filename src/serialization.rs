//! Encoding of a node hierarchy into structured documents.
//!
//! A node is encoded as `{ name, local_pose, children }`, where `local_pose` holds
//! the 16 matrix entries joined by commas and `children` the encoded children in
//! order. Decoding always goes into an existing node.

use std::rc::Rc;

use serde_json::Value;

use crate::errors::*;
use crate::math::Pose;
use crate::node::Node;

/// The header of the binary form.
pub const MAGIC: [u8; 8] = [b'S', b'G', b'N', b'D', b' ', 0, 0, 1];

/// The serializable form of a node and its descendants.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NodeDocument {
    /// The name of this node.
    pub name: String,
    /// The transformation in local space, see `encode_pose`.
    pub local_pose: String,
    /// The children of this node, in order.
    pub children: Vec<NodeDocument>,
}

/// Encodes `pose` as its 16 entries in storage order, joined by commas.
///
/// Entries are written with the shortest representation that parses back to the
/// same `f64`, so the encoding is lossless.
pub fn encode_pose(pose: &Pose) -> String {
    let values: &[f64; 16] = pose.as_ref();
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Parses a pose written by `encode_pose`.
pub fn decode_pose(text: &str) -> Result<Pose> {
    let mut values = [0.0; 16];
    let mut len = 0;

    for token in text.split(',') {
        let token = token.trim();
        let v = token
            .parse::<f64>()
            .map_err(|err| Error::MalformedPose(token.to_owned(), err))?;

        if len < values.len() {
            values[len] = v;
        }

        len += 1;
    }

    if len != values.len() {
        return Err(Error::PoseLength(len));
    }

    let v = values;
    Ok(Pose::new(
        v[0], v[1], v[2], v[3], v[4], v[5], v[6], v[7], v[8], v[9], v[10], v[11], v[12], v[13],
        v[14], v[15],
    ))
}

/// A document whose poses have been parsed already.
struct Decoded {
    name: String,
    local_pose: Pose,
    children: Vec<Decoded>,
}

impl Decoded {
    fn parse(document: &NodeDocument) -> Result<Self> {
        let mut children = Vec::with_capacity(document.children.len());
        for v in &document.children {
            children.push(Decoded::parse(v)?);
        }

        Ok(Decoded {
            name: document.name.clone(),
            local_pose: decode_pose(&document.local_pose)?,
            children,
        })
    }

    fn apply(self, node: &Rc<Node>) {
        node.set_name(&self.name);
        node.set_local_pose(self.local_pose);

        for v in self.children {
            let child = Node::create_in(node.names(), "");
            v.apply(&child);
            node.add_child(&child);
        }
    }
}

impl NodeDocument {
    /// Encodes `node` and all of its descendants.
    pub fn encode(node: &Node) -> Self {
        NodeDocument {
            name: node.name(),
            local_pose: encode_pose(&node.local_pose()),
            children: node
                .children
                .borrow()
                .iter()
                .map(|v| NodeDocument::encode(v))
                .collect(),
        }
    }

    /// Decodes this document into `node`.
    ///
    /// The name and local pose of `node` are overwritten, and a fresh child is
    /// created for every encoded child and appended after the existing children
    /// of `node`. The whole document is validated first, `node` stays untouched if
    /// anything is malformed.
    pub fn decode_into(&self, node: &Rc<Node>) -> Result<()> {
        let decoded = Decoded::parse(self)?;
        decoded.apply(node);
        Ok(())
    }
}

impl Node {
    /// Encodes this node and its descendants.
    #[inline]
    pub fn to_document(&self) -> NodeDocument {
        NodeDocument::encode(self)
    }

    /// Encodes this node and its descendants as JSON value.
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.to_document())?)
    }

    /// Encodes this node and its descendants as JSON text.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_document())?)
    }

    /// Encodes this node and its descendants in the binary form.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = MAGIC.to_vec();
        bincode::serialize_into(&mut bytes, &self.to_document())?;
        Ok(bytes)
    }

    /// Decodes `document` into this node, see `NodeDocument::decode_into`.
    #[inline]
    pub fn load_document(self: &Rc<Self>, document: &NodeDocument) -> Result<()> {
        document.decode_into(self)
    }

    /// Decodes a JSON value into this node.
    pub fn load_json(self: &Rc<Self>, value: &Value) -> Result<()> {
        let document: NodeDocument = serde_json::from_value(value.clone())?;
        document.decode_into(self)
    }

    /// Decodes JSON text into this node.
    pub fn load_json_str(self: &Rc<Self>, text: &str) -> Result<()> {
        let document: NodeDocument = serde_json::from_str(text)?;
        document.decode_into(self)
    }

    /// Decodes the binary form into this node.
    ///
    /// Every length prefix is checked against the bytes left, and the payload must
    /// be consumed entirely.
    pub fn load_bytes(self: &Rc<Self>, bytes: &[u8]) -> Result<()> {
        if bytes.len() < MAGIC.len() || bytes[0..MAGIC.len()] != MAGIC[..] {
            return Err(Error::MagicMismatch);
        }

        let payload = &bytes[MAGIC.len()..];
        let document: NodeDocument = bincode::deserialize(payload)?;

        let len = bincode::serialized_size(&document)? as usize;
        if len < payload.len() {
            return Err(Error::TrailingBytes(payload.len() - len));
        }

        document.decode_into(self)
    }
}
