//! Beans
//!
//! A bean is a named, typed unit of construction. Module beans are built by
//! the module itself and declare sockets; socket beans are module-level
//! injection points whose value is supplied from outside the module.

use super::socket::Socket;
use crate::value_objects::TypeDescriptor;
use serde::{Deserialize, Serialize};

/// Whether other modules may see a bean
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Visible to importing modules
    #[default]
    Public,
    /// Visible only inside its module
    Private,
}

/// Instantiation strategy, carried through to code generation untouched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// One instance per module
    #[default]
    Singleton,
    /// One instance per injection
    Prototype,
}

/// A bean reachable through an accessor of its parent bean
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestedBean {
    /// Accessor name (a single identifier)
    pub name: String,
    /// Type the accessor returns
    pub exposed_type: TypeDescriptor,
    /// Markers selectors may inspect
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<String>,
    /// Beans nested in this one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<NestedBean>,
}

impl NestedBean {
    pub fn new(name: impl Into<String>, exposed_type: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            exposed_type,
            annotations: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// Add a bean nested in this one
    pub fn with_nested(mut self, nested: NestedBean) -> Self {
        self.nested.push(nested);
        self
    }
}

/// Module bean or socket bean
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum BeanKind {
    /// Constructed by the module from its sockets
    Module {
        /// Type the bean exposes
        exposed_type: TypeDescriptor,
        /// Constructor and setter injection points
        #[serde(default)]
        sockets: Vec<Socket>,
    },
    /// Supplied from outside the module
    Socket {
        /// The module-level injection point
        socket: Socket,
    },
}

/// A provider of a value that sockets can be wired to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bean {
    /// Simple bean name (a single identifier)
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub strategy: Strategy,
    /// Markers selectors may inspect
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<String>,
    /// Beans exposed through accessors of this bean
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<NestedBean>,
    /// Whether an external instance may replace this bean
    #[serde(default)]
    pub overridable: bool,
    #[serde(flatten)]
    pub kind: BeanKind,
}

impl Bean {
    /// A public singleton module bean without sockets
    pub fn module_bean(name: impl Into<String>, exposed_type: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            strategy: Strategy::Singleton,
            annotations: Vec::new(),
            nested: Vec::new(),
            overridable: false,
            kind: BeanKind::Module {
                exposed_type,
                sockets: Vec::new(),
            },
        }
    }

    /// A public socket bean named after its socket
    pub fn socket_bean(socket: Socket) -> Self {
        Self {
            name: socket.name.clone(),
            visibility: Visibility::Public,
            strategy: Strategy::Singleton,
            annotations: Vec::new(),
            nested: Vec::new(),
            overridable: false,
            kind: BeanKind::Socket { socket },
        }
    }

    /// Add a socket to a module bean; ignored for socket beans
    pub fn with_socket(mut self, socket: Socket) -> Self {
        if let BeanKind::Module { sockets, .. } = &mut self.kind {
            sockets.push(socket);
        }
        self
    }

    /// Add a nested bean
    pub fn with_nested(mut self, nested: NestedBean) -> Self {
        self.nested.push(nested);
        self
    }

    /// Add a marker
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    pub fn prototype(mut self) -> Self {
        self.strategy = Strategy::Prototype;
        self
    }

    pub fn overridable(mut self) -> Self {
        self.overridable = true;
        self
    }

    /// Type the bean provides to the sockets it is wired into
    pub fn exposed_type(&self) -> &TypeDescriptor {
        match &self.kind {
            BeanKind::Module { exposed_type, .. } => exposed_type,
            BeanKind::Socket { socket } => socket.provided_type(),
        }
    }

    /// Sockets declared by a module bean (empty for socket beans)
    pub fn sockets(&self) -> &[Socket] {
        match &self.kind {
            BeanKind::Module { sockets, .. } => sockets,
            BeanKind::Socket { .. } => &[],
        }
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn is_socket_bean(&self) -> bool {
        matches!(self.kind, BeanKind::Socket { .. })
    }

    /// The injection point of a socket bean
    pub fn as_socket(&self) -> Option<&Socket> {
        match &self.kind {
            BeanKind::Socket { socket } => Some(socket),
            BeanKind::Module { .. } => None,
        }
    }
}
