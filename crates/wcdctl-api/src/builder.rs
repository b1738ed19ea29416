// Request document builder
//
// A small owned tree of XML nodes that renders into the WCD configuration
// dialect: `DeviceConfiguration` root, optional `version` leaf, one element
// per targeted section carrying `action="set"|"get"`, and section-specific
// containers holding leaf values.

use indexmap::IndexMap;
use strum::{AsRefStr, Display};
use xmltree::{Element, EmitterConfig, XMLNode};

use crate::error::Error;
use crate::sections::Section;

/// Action attribute of a section element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    Set,
    Get,
}

/// Payload of a [`RequestNode`]: either ordered children or scalar text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeBody {
    Container(Vec<RequestNode>),
    Leaf(String),
}

/// One element of a request document.
///
/// Children are owned by value, so a node belongs to at most one parent.
/// Leaf nodes refuse children at append time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestNode {
    tag: String,
    attributes: IndexMap<String, String>,
    body: NodeBody,
}

impl RequestNode {
    fn container(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: IndexMap::new(),
            body: NodeBody::Container(Vec::new()),
        }
    }

    fn leaf(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: IndexMap::new(),
            body: NodeBody::Leaf(text.into()),
        }
    }

    /// Container with a caller-supplied tag. Fails on an empty tag.
    pub fn try_container(tag: impl Into<String>) -> Result<Self, Error> {
        let tag = tag.into();
        check_tag(&tag)?;
        Ok(Self::container(tag))
    }

    /// Leaf with a caller-supplied tag. Fails on an empty tag.
    pub fn try_leaf(tag: impl Into<String>, text: impl Into<String>) -> Result<Self, Error> {
        let tag = tag.into();
        check_tag(&tag)?;
        Ok(Self::leaf(tag, text))
    }

    // ── Named kinds ──────────────────────────────────────────────────

    /// `<DeviceConfiguration>` document root.
    pub fn device_configuration() -> Self {
        Self::container("DeviceConfiguration")
    }

    /// `<version>` leaf.
    pub fn version(version: impl Into<String>) -> Self {
        Self::leaf("version", version)
    }

    /// Section element, e.g. `<VLANList action="set">`.
    pub fn service(section: Section, action: Action) -> Self {
        Self::container(section.wire_name()).with_attribute("action", action.as_ref())
    }

    /// `<Entry>` row container.
    pub fn entry() -> Self {
        Self::container("Entry")
    }

    /// `<InterfaceEntry>` row container, led by its `interfaceName` value.
    pub fn interface_entry(interface_name: impl Into<String>) -> Self {
        Self {
            tag: "InterfaceEntry".into(),
            attributes: IndexMap::new(),
            body: NodeBody::Container(vec![Self::value("interfaceName", interface_name)]),
        }
    }

    pub fn global_setting() -> Self {
        Self::container("GlobalSetting")
    }

    pub fn bridge_setting() -> Self {
        Self::container("BridgeSetting")
    }

    pub fn current_local_time() -> Self {
        Self::container("CurrentLocalTime")
    }

    /// `<VLAN>` container.
    pub fn vlan() -> Self {
        Self::container("VLAN")
    }

    /// Scalar device field: `<key>value</key>`.
    ///
    /// `key` is a device field name; callers passing arbitrary input should
    /// go through [`try_leaf`](Self::try_leaf) instead.
    pub fn value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::leaf(key, value)
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    /// Text of a leaf, `None` for containers.
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            NodeBody::Leaf(text) => Some(text),
            NodeBody::Container(_) => None,
        }
    }

    /// Children in document order; empty for leaves.
    pub fn children(&self) -> &[RequestNode] {
        match &self.body {
            NodeBody::Container(children) => children,
            NodeBody::Leaf(_) => &[],
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.body, NodeBody::Leaf(_))
    }

    // ── Mutation ─────────────────────────────────────────────────────

    /// Set an attribute, replacing any previous value for `key`.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Add `child` after the existing children.
    ///
    /// Fails with [`Error::InvalidOperation`] on a leaf; the node is left
    /// untouched in that case.
    pub fn push(&mut self, child: RequestNode) -> Result<&mut Self, Error> {
        match &mut self.body {
            NodeBody::Container(children) => {
                children.push(child);
                Ok(self)
            }
            NodeBody::Leaf(_) => Err(Error::InvalidOperation {
                tag: self.tag.clone(),
                reason: "leaf values cannot hold child elements",
            }),
        }
    }

    /// Owned, chainable form of [`push`](Self::push).
    pub fn append(mut self, child: RequestNode) -> Result<Self, Error> {
        self.push(child)?;
        Ok(self)
    }

    /// Append every node from `children`, stopping at the first failure.
    pub fn extend(
        mut self,
        children: impl IntoIterator<Item = RequestNode>,
    ) -> Result<Self, Error> {
        for child in children {
            self.push(child)?;
        }
        Ok(self)
    }

    // ── Output ───────────────────────────────────────────────────────

    /// Build the generic XML element tree.
    pub fn build(&self) -> Element {
        let mut element = Element::new(&self.tag);
        for (key, value) in &self.attributes {
            element.attributes.insert(key.clone(), value.clone());
        }
        match &self.body {
            NodeBody::Leaf(text) => element.children.push(XMLNode::Text(text.clone())),
            NodeBody::Container(children) => {
                element
                    .children
                    .extend(children.iter().map(|c| XMLNode::Element(c.build())));
            }
        }
        element
    }

    /// Serialize as a complete document (XML declaration, no indentation).
    pub fn to_xml(&self) -> Result<Vec<u8>, Error> {
        let config = EmitterConfig::new().perform_indent(false);
        let mut out = Vec::new();
        self.build()
            .write_with_config(&mut out, config)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        Ok(out)
    }
}

fn check_tag(tag: &str) -> Result<(), Error> {
    if tag.trim().is_empty() {
        return Err(Error::InvalidOperation {
            tag: tag.to_owned(),
            reason: "element tag must not be empty",
        });
    }
    Ok(())
}
