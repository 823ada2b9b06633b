//! Bean Catalog
//!
//! Flattens a [`WiringGraph`] into an arena of beans and sockets addressed
//! by stable indices. Qualified names are computed and validated once here;
//! every later stage works on ids and looks records up by key.

use crate::diagnostics::{Diagnostics, WiringDiagnostic};
use crate::matcher::{Multiplicity, TypeMatcher};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use wireplan_domain::constants::OVERRIDE_SOCKET_NAME;
use wireplan_domain::{
    Bean, BeanFacts, BeanKind, Module, NameKind, NestedBean, QualifiedName, Socket, Strategy,
    TypeDescriptor, Visibility, WiringDirective, WiringGraph,
};

/// Index of a bean in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BeanId(usize);

/// Index of a socket in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SocketId(usize);

/// How a catalog bean came to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    ModuleBean,
    SocketBean,
    Nested { parent: BeanId },
}

/// A bean with its qualified name resolved
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub id: BeanId,
    pub name: QualifiedName,
    pub module: QualifiedName,
    pub exposed_type: TypeDescriptor,
    pub visibility: Visibility,
    pub strategy: Strategy,
    pub annotations: Vec<String>,
    pub kind: EntryKind,
    /// Visible to importing modules: public and not rooted in a socket bean
    pub exported: bool,
}

impl CatalogEntry {
    /// The view selectors evaluate
    pub fn facts(&self) -> BeanFacts<'_> {
        BeanFacts {
            name: &self.name,
            exposed_type: &self.exposed_type,
            annotations: &self.annotations,
        }
    }
}

/// Where a socket comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocketOrigin {
    /// Constructor or setter parameter of a module bean
    BeanSocket,
    /// Module-level injection point supplied by an importer
    SocketBean,
    /// Paired optional socket of an overridable bean, supplied by an importer
    Override,
}

/// A socket with its qualified name and owner resolved
#[derive(Debug, Clone)]
pub struct SocketEntry {
    pub id: SocketId,
    pub name: QualifiedName,
    /// Bean whose construction consumes the socket
    pub owner: BeanId,
    pub module: QualifiedName,
    pub origin: SocketOrigin,
    pub socket: Socket,
}

impl SocketEntry {
    /// Supplied by an importing module rather than by the declaring one
    pub fn is_external(&self) -> bool {
        self.origin != SocketOrigin::BeanSocket
    }

    /// Multiplicity the socket resolves with
    ///
    /// An override socket replaces exactly one bean, so it is single even
    /// when the overridden bean exposes a container or array type.
    pub fn multiplicity(&self, matcher: &TypeMatcher) -> Multiplicity {
        match self.origin {
            SocketOrigin::Override => Multiplicity::Single,
            SocketOrigin::BeanSocket | SocketOrigin::SocketBean => {
                matcher.multiplicity(&self.socket.required_type)
            }
        }
    }
}

/// A module with its beans and sockets flattened
#[derive(Debug, Clone)]
pub struct ModuleEntry {
    pub name: QualifiedName,
    pub imports: Vec<QualifiedName>,
    /// Every bean, nested beans included, in declaration order
    pub beans: Vec<BeanId>,
    /// Every socket declared in the module, external ones included
    pub sockets: Vec<SocketId>,
    pub directives: Vec<WiringDirective>,
}

/// Arena of every bean and socket of a wiring graph
#[derive(Debug, Default)]
pub struct BeanCatalog {
    beans: Vec<CatalogEntry>,
    sockets: Vec<SocketEntry>,
    modules: IndexMap<QualifiedName, ModuleEntry>,
    bean_index: IndexMap<QualifiedName, BeanId>,
    socket_index: IndexMap<QualifiedName, SocketId>,
}

impl BeanCatalog {
    /// Flatten `graph`, reporting declaration problems
    ///
    /// Duplicate names keep the first declaration. Types that cannot be
    /// resolved are reported once per declaring bean.
    pub fn build(graph: &WiringGraph, matcher: &TypeMatcher, diagnostics: &Diagnostics) -> Self {
        let mut catalog = Self::default();
        for module in &graph.modules {
            catalog.add_module(module, matcher, diagnostics);
        }
        catalog
    }

    fn add_module(&mut self, module: &Module, matcher: &TypeMatcher, diagnostics: &Diagnostics) {
        if module.name.kind() != NameKind::Module {
            diagnostics.report(WiringDiagnostic::InvalidDeclaration {
                element: module.name.clone(),
                reason: "a module name must have a single segment".to_string(),
            });
            return;
        }
        if self.modules.contains_key(&module.name) {
            diagnostics.report(WiringDiagnostic::DuplicateName {
                element: module.name.clone(),
                kind: "module".to_string(),
            });
            return;
        }
        self.modules.insert(
            module.name.clone(),
            ModuleEntry {
                name: module.name.clone(),
                imports: module.imports.clone(),
                beans: Vec::new(),
                sockets: Vec::new(),
                directives: module.directives.clone(),
            },
        );
        for bean in &module.beans {
            self.add_bean(&module.name, bean, matcher, diagnostics);
        }
    }

    fn add_bean(
        &mut self,
        module: &QualifiedName,
        bean: &Bean,
        matcher: &TypeMatcher,
        diagnostics: &Diagnostics,
    ) {
        let name = match module.with_bean(&bean.name) {
            Ok(name) if !name.is_nested() => name,
            Ok(_) => {
                diagnostics.report(WiringDiagnostic::InvalidDeclaration {
                    element: module.clone(),
                    reason: format!("bean name '{}' must be a single identifier", bean.name),
                });
                return;
            }
            Err(err) => {
                diagnostics.report(WiringDiagnostic::InvalidDeclaration {
                    element: module.clone(),
                    reason: format!("bean '{}': {err}", bean.name),
                });
                return;
            }
        };
        let kind = match bean.kind {
            BeanKind::Module { .. } => EntryKind::ModuleBean,
            BeanKind::Socket { .. } => EntryKind::SocketBean,
        };
        let Some(id) = self.push_bean(
            CatalogEntry {
                id: BeanId(self.beans.len()),
                name: name.clone(),
                module: module.clone(),
                exposed_type: bean.exposed_type().clone(),
                visibility: bean.visibility,
                strategy: bean.strategy,
                annotations: bean.annotations.clone(),
                kind,
                exported: bean.is_public() && !bean.is_socket_bean(),
            },
            diagnostics,
        ) else {
            return;
        };

        match &bean.kind {
            BeanKind::Module {
                exposed_type,
                sockets,
            } => {
                for socket in sockets {
                    match name.with_socket(&socket.name) {
                        Ok(socket_name) => self.push_socket(
                            socket_name,
                            id,
                            module,
                            SocketOrigin::BeanSocket,
                            socket,
                            matcher,
                            diagnostics,
                        ),
                        Err(err) => diagnostics.report(WiringDiagnostic::InvalidDeclaration {
                            element: name.clone(),
                            reason: format!("socket '{}': {err}", socket.name),
                        }),
                    }
                }
                if bean.overridable {
                    match name.with_socket(OVERRIDE_SOCKET_NAME) {
                        Ok(socket_name) => self.push_socket(
                            socket_name,
                            id,
                            module,
                            SocketOrigin::Override,
                            &Socket::optional(OVERRIDE_SOCKET_NAME, exposed_type.clone()),
                            matcher,
                            diagnostics,
                        ),
                        Err(err) => diagnostics.report(WiringDiagnostic::InvalidDeclaration {
                            element: name.clone(),
                            reason: err.to_string(),
                        }),
                    }
                }
            }
            BeanKind::Socket { socket } => {
                if bean.overridable {
                    diagnostics.report(WiringDiagnostic::InvalidDeclaration {
                        element: name.clone(),
                        reason: "a socket bean cannot be overridable".to_string(),
                    });
                }
                self.push_socket(
                    name.clone(),
                    id,
                    module,
                    SocketOrigin::SocketBean,
                    socket,
                    matcher,
                    diagnostics,
                );
            }
        }

        for nested in &bean.nested {
            self.add_nested(id, nested, diagnostics);
        }
    }

    fn add_nested(&mut self, parent: BeanId, nested: &NestedBean, diagnostics: &Diagnostics) {
        let parent_entry = &self.beans[parent.0];
        let name = match parent_entry.name.nested(&nested.name) {
            Ok(name) => name,
            Err(err) => {
                diagnostics.report(WiringDiagnostic::InvalidDeclaration {
                    element: parent_entry.name.clone(),
                    reason: format!("nested bean '{}': {err}", nested.name),
                });
                return;
            }
        };
        let entry = CatalogEntry {
            id: BeanId(self.beans.len()),
            name,
            module: parent_entry.module.clone(),
            exposed_type: nested.exposed_type.clone(),
            visibility: parent_entry.visibility,
            strategy: parent_entry.strategy,
            annotations: nested.annotations.clone(),
            kind: EntryKind::Nested { parent },
            exported: parent_entry.exported,
        };
        if let Some(id) = self.push_bean(entry, diagnostics) {
            for child in &nested.nested {
                self.add_nested(id, child, diagnostics);
            }
        }
    }

    fn push_bean(&mut self, entry: CatalogEntry, diagnostics: &Diagnostics) -> Option<BeanId> {
        if self.bean_index.contains_key(&entry.name) {
            diagnostics.report(WiringDiagnostic::DuplicateName {
                element: entry.name,
                kind: "bean".to_string(),
            });
            return None;
        }
        if entry.exposed_type.is_malformed() {
            diagnostics.report(WiringDiagnostic::UnresolvedType {
                element: entry.name.clone(),
                type_name: entry.exposed_type.to_string(),
            });
        }
        let id = entry.id;
        self.bean_index.insert(entry.name.clone(), id);
        if let Some(module) = self.modules.get_mut(&entry.module) {
            module.beans.push(id);
        }
        self.beans.push(entry);
        Some(id)
    }

    #[allow(clippy::too_many_arguments)]
    fn push_socket(
        &mut self,
        name: QualifiedName,
        owner: BeanId,
        module: &QualifiedName,
        origin: SocketOrigin,
        socket: &Socket,
        matcher: &TypeMatcher,
        diagnostics: &Diagnostics,
    ) {
        if self.socket_index.contains_key(&name) {
            diagnostics.report(WiringDiagnostic::DuplicateName {
                element: name,
                kind: "socket".to_string(),
            });
            return;
        }
        let mut socket = socket.clone();
        if socket.mutator.is_some() && matcher.multiplicity(&socket.required_type).is_multi() {
            diagnostics.report(WiringDiagnostic::InvalidDeclaration {
                element: name.clone(),
                reason: "only single sockets may declare a mutator; the mutator is ignored"
                    .to_string(),
            });
            socket.mutator = None;
        }
        let id = SocketId(self.sockets.len());
        self.socket_index.insert(name.clone(), id);
        if let Some(entry) = self.modules.get_mut(module) {
            entry.sockets.push(id);
        }
        self.sockets.push(SocketEntry {
            id,
            name,
            owner,
            module: module.clone(),
            origin,
            socket,
        });
    }

    pub fn bean(&self, id: BeanId) -> &CatalogEntry {
        &self.beans[id.0]
    }

    pub fn bean_by_name(&self, name: &QualifiedName) -> Option<&CatalogEntry> {
        self.bean_index.get(name).map(|id| self.bean(*id))
    }

    pub fn socket(&self, id: SocketId) -> &SocketEntry {
        &self.sockets[id.0]
    }

    pub fn socket_by_name(&self, name: &QualifiedName) -> Option<&SocketEntry> {
        self.socket_index.get(name).map(|id| self.socket(*id))
    }

    pub fn module(&self, name: &QualifiedName) -> Option<&ModuleEntry> {
        self.modules.get(name)
    }

    /// Modules in declaration order
    pub fn modules(&self) -> impl Iterator<Item = &ModuleEntry> {
        self.modules.values()
    }

    pub fn beans(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.beans.iter()
    }

    pub fn sockets(&self) -> impl Iterator<Item = &SocketEntry> {
        self.sockets.iter()
    }

    /// Sockets a module's importer must supply
    pub fn external_sockets<'a>(&'a self, module: &'a ModuleEntry) -> impl Iterator<Item = &'a SocketEntry> {
        module
            .sockets
            .iter()
            .map(|id| self.socket(*id))
            .filter(|socket| socket.is_external())
    }

    /// Beans visible to sockets resolved in `module`, ordered by qualified name
    ///
    /// Every bean of the module itself, plus exported beans of directly
    /// imported modules.
    pub fn visible_beans(&self, module: &ModuleEntry) -> Vec<BeanId> {
        let mut visible: Vec<BeanId> = module.beans.clone();
        for import in &module.imports {
            if import == &module.name {
                continue;
            }
            if let Some(imported) = self.modules.get(import) {
                visible.extend(
                    imported
                        .beans
                        .iter()
                        .copied()
                        .filter(|id| self.bean(*id).exported),
                );
            }
        }
        visible.sort_by(|a, b| self.bean(*a).name.cmp(&self.bean(*b).name));
        visible.dedup();
        visible
    }
}
