//! Object identity across a document.
//!
//! On write, the first visit of a shared object writes it inline and later
//! visits write an `xlink:href="#id"` pointing at it. Which objects are
//! "the same" is decided by pointer identity of their [`Arc`], never by
//! value equality: two equal but distinct citations are written twice.
//!
//! On read, the inverse happens: every element declaring an `id` builds its
//! object once, and every reference to that id receives the same [`Arc`].

use crate::dialect::Namespace;
use crate::error::CodecError;
use crate::terms::Class;
use crate::warning::{MessageKey, Warnings};
use isomd_metadata::{Citation, Identifiable, OnlineResource, Responsibility};
use isomd_xml_tree::{Document, Name, NodeId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Model types that may be referenced from several properties.
pub(crate) trait Shared: Identifiable + Sized {
    const CLASS: Class;
    /// Prefix of generated identifiers.
    const ID_PREFIX: &'static str;

    fn set_id(&mut self, id: Option<String>);
    fn wrap(value: Arc<Self>) -> SharedObject;
    fn unwrap(object: &SharedObject) -> Option<Arc<Self>>;
}

/// A built shared object of any kind.
#[derive(Debug, Clone)]
pub(crate) enum SharedObject {
    Citation(Arc<Citation>),
    Responsibility(Arc<Responsibility>),
    OnlineResource(Arc<OnlineResource>),
}

impl SharedObject {
    pub(crate) fn class(&self) -> Class {
        match self {
            SharedObject::Citation(_) => Class::Citation,
            SharedObject::Responsibility(_) => Class::Responsibility,
            SharedObject::OnlineResource(_) => Class::OnlineResource,
        }
    }
}

macro_rules! shared {
    ($ty:ident, $class:ident, $prefix:literal) => {
        impl Shared for $ty {
            const CLASS: Class = Class::$class;
            const ID_PREFIX: &'static str = $prefix;

            fn set_id(&mut self, id: Option<String>) {
                self.id = id;
            }

            fn wrap(value: Arc<Self>) -> SharedObject {
                SharedObject::$ty(value)
            }

            fn unwrap(object: &SharedObject) -> Option<Arc<Self>> {
                match object {
                    SharedObject::$ty(value) => Some(Arc::clone(value)),
                    _ => None,
                }
            }
        }
    };
}

shared!(Citation, Citation, "citation");
shared!(Responsibility, Responsibility, "responsibility");
shared!(OnlineResource, OnlineResource, "onlineResource");

/// Name of the attribute declaring an object identifier.
pub(crate) fn id_attribute() -> Name {
    Name::unqualified("id")
}

fn key<T>(value: &T) -> *const () {
    value as *const T as *const ()
}

fn is_usable_id(id: &str) -> bool {
    !id.is_empty() && !id.chars().any(char::is_whitespace) && !id.starts_with('#')
}

struct Placed {
    node: NodeId,
    id: Option<String>,
}

/// Write side: which objects were already placed in the document.
#[derive(Default)]
pub(crate) struct WriteIdentities {
    placed: HashMap<*const (), Placed>,
    used: HashSet<String>,
    counters: HashMap<&'static str, usize>,
}

impl WriteIdentities {
    /// If `value` was already written, returns the identifier to reference
    /// it by, adding that identifier to the written element when it had
    /// none.
    pub(crate) fn reference<T: Shared>(&mut self, value: &T, doc: &mut Document) -> Option<String> {
        let key = key(value);
        let placed = self.placed.get(&key)?;
        if let Some(id) = &placed.id {
            return Some(id.clone());
        }
        let node = placed.node;
        let id = self.generate(T::ID_PREFIX);
        doc.set_attribute(node, id_attribute(), id.clone());
        if let Some(placed) = self.placed.get_mut(&key) {
            placed.id = Some(id.clone());
        }
        tracing::trace!(id = %id, "identifier added to an already written object");
        Some(id)
    }

    /// Records that `value` is being written as `node`. The object's own
    /// identifier is written when no other object took it already.
    pub(crate) fn place<T: Shared>(&mut self, value: &T, node: NodeId, doc: &mut Document) {
        let id = value
            .id()
            .filter(|id| is_usable_id(id) && !self.used.contains(*id))
            .map(str::to_string);
        if let Some(id) = &id {
            doc.set_attribute(node, id_attribute(), id.clone());
            self.used.insert(id.clone());
        }
        self.placed.insert(key(value), Placed { node, id });
    }

    /// Reserves a document identifier such as a unit definition id.
    /// Returns `false` if it was already taken.
    pub(crate) fn reserve(&mut self, id: &str) -> bool {
        self.used.insert(id.to_string())
    }

    fn generate(&mut self, prefix: &'static str) -> String {
        let counter = self.counters.entry(prefix).or_insert(0);
        loop {
            *counter += 1;
            let candidate = format!("{}-{}", prefix, counter);
            if !self.used.contains(&candidate) {
                self.used.insert(candidate.clone());
                return candidate;
            }
        }
    }
}

/// Read side: declared identifiers and the objects built from them.
#[derive(Default)]
pub(crate) struct ReadIdentities {
    declared: HashMap<String, NodeId>,
    indexed: bool,
    reported: HashSet<String>,
    built: HashMap<NodeId, SharedObject>,
    in_progress: HashSet<NodeId>,
    dangling: Vec<String>,
}

impl ReadIdentities {
    /// Records that `node` declares `id`. The first declaration wins.
    pub(crate) fn declare(&mut self, id: &str, node: NodeId, warnings: &mut Warnings<'_>) {
        match self.declared.get(id) {
            None => {
                self.declared.insert(id.to_string(), node);
            }
            Some(existing) if *existing == node => {}
            Some(_) => {
                if self.reported.insert(id.to_string()) {
                    warnings.emit(MessageKey::DuplicateIdentifier, [id]);
                }
            }
        }
    }

    /// Finds the element declaring `id`.
    ///
    /// Identifiers met so far are checked first. The whole document is
    /// indexed, once, only when that fails, which makes forward references
    /// resolvable.
    pub(crate) fn resolve(
        &mut self,
        doc: &Document,
        id: &str,
        warnings: &mut Warnings<'_>,
    ) -> Option<NodeId> {
        if let Some(node) = self.declared.get(id) {
            return Some(*node);
        }
        if !self.indexed {
            self.index(doc, warnings);
            return self.declared.get(id).copied();
        }
        None
    }

    fn index(&mut self, doc: &Document, warnings: &mut Warnings<'_>) {
        self.indexed = true;
        let Some(root) = doc.root() else {
            return;
        };
        let gml = Namespace::Gml.uri();
        for node in doc.descendants(root) {
            let element = doc.element(node);
            let declared = element
                .attribute(None, "id")
                .or_else(|| element.attribute(Some(gml), "id"));
            if let Some(id) = declared {
                self.declare(id, node, warnings);
            }
        }
        tracing::trace!(ids = self.declared.len(), "document identifiers indexed");
    }

    pub(crate) fn built(&self, node: NodeId) -> Option<&SharedObject> {
        self.built.get(&node)
    }

    pub(crate) fn is_in_progress(&self, node: NodeId) -> bool {
        self.in_progress.contains(&node)
    }

    pub(crate) fn start(&mut self, node: NodeId) {
        self.in_progress.insert(node);
    }

    /// Ends the construction of `node`, recording the built object if any.
    pub(crate) fn finish(&mut self, node: NodeId, object: Option<SharedObject>) {
        self.in_progress.remove(&node);
        if let Some(object) = object {
            self.built.insert(node, object);
        }
    }

    /// Records a reference to an identifier no element declares.
    pub(crate) fn dangling(&mut self, id: &str) {
        if !self.dangling.iter().any(|d| d == id) {
            self.dangling.push(id.to_string());
        }
    }

    /// The consolidated error for all dangling references, if any.
    pub(crate) fn unresolved(&mut self) -> Option<CodecError> {
        if self.dangling.is_empty() {
            None
        } else {
            Some(CodecError::UnresolvedReference {
                ids: std::mem::take(&mut self.dangling),
            })
        }
    }
}
