//! Qualified names
//!
//! A qualified name identifies a module (`com.example.app`), a bean inside a
//! module (`com.example.app:dataSource`) or a socket of a bean
//! (`com.example.app:dataSource:url`). Nested beans extend the bean segment
//! with a dotted path (`com.example.app:dataSource.pool`).

use crate::constants::{MAX_NAME_SEGMENTS, NAME_SEPARATOR, PATH_SEPARATOR};
use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("Invalid regex"));

/// What a qualified name designates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NameKind {
    /// `module`
    Module,
    /// `module:bean`
    Bean,
    /// `module:bean:socket`
    Socket,
}

/// Immutable, validated identifier of a module, bean or socket
///
/// Equality, ordering and hashing follow the normalized string form.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QualifiedName {
    repr: String,
}

impl QualifiedName {
    /// Name of a module
    pub fn module(module: &str) -> Result<Self> {
        Self::from_segments(&[module])
    }

    /// Name of a bean inside a module
    pub fn bean(module: &str, bean: &str) -> Result<Self> {
        Self::from_segments(&[module, bean])
    }

    /// Name of a socket of a bean
    pub fn socket(module: &str, bean: &str, socket: &str) -> Result<Self> {
        Self::from_segments(&[module, bean, socket])
    }

    fn from_segments(segments: &[&str]) -> Result<Self> {
        let normalized: Vec<String> = segments
            .iter()
            .enumerate()
            .map(|(index, segment)| normalize_segment(segment, index))
            .collect::<Result<_>>()?;
        Ok(Self {
            repr: normalized.join(&NAME_SEPARATOR.to_string()),
        })
    }

    /// The normalized string form
    pub fn as_str(&self) -> &str {
        &self.repr
    }

    fn segments(&self) -> impl Iterator<Item = &str> {
        self.repr.split(NAME_SEPARATOR)
    }

    /// Whether this names a module, a bean or a socket
    pub fn kind(&self) -> NameKind {
        match self.segments().count() {
            1 => NameKind::Module,
            2 => NameKind::Bean,
            _ => NameKind::Socket,
        }
    }

    /// The module segment
    pub fn module_name(&self) -> &str {
        self.segments().next().unwrap_or_default()
    }

    /// The bean segment, including any nested path
    pub fn bean_name(&self) -> Option<&str> {
        self.segments().nth(1)
    }

    /// The socket segment
    pub fn socket_name(&self) -> Option<&str> {
        self.segments().nth(2)
    }

    /// The enclosing module's qualified name
    pub fn module_qualified(&self) -> QualifiedName {
        Self {
            repr: self.module_name().to_string(),
        }
    }

    /// The enclosing bean's qualified name, when this names a bean or a socket
    pub fn bean_qualified(&self) -> Option<QualifiedName> {
        self.bean_name().map(|bean| Self {
            repr: format!("{}{NAME_SEPARATOR}{bean}", self.module_name()),
        })
    }

    /// Append a bean segment to a module name
    pub fn with_bean(&self, bean: &str) -> Result<Self> {
        if self.kind() != NameKind::Module {
            return Err(Error::invalid_name(
                self.as_str(),
                "a bean segment can only be appended to a module name",
            ));
        }
        let bean = normalize_segment(bean, 1)?;
        Ok(Self {
            repr: format!("{}{NAME_SEPARATOR}{bean}", self.repr),
        })
    }

    /// Append a socket segment to a bean name
    pub fn with_socket(&self, socket: &str) -> Result<Self> {
        if self.kind() != NameKind::Bean {
            return Err(Error::invalid_name(
                self.as_str(),
                "a socket segment can only be appended to a bean name",
            ));
        }
        let socket = normalize_segment(socket, 2)?;
        Ok(Self {
            repr: format!("{}{NAME_SEPARATOR}{socket}", self.repr),
        })
    }

    /// Name of a bean nested in this bean (`module:bean.nested`)
    pub fn nested(&self, nested: &str) -> Result<Self> {
        if self.kind() != NameKind::Bean {
            return Err(Error::invalid_name(
                self.as_str(),
                "nested beans can only be declared on a bean name",
            ));
        }
        let nested = nested.trim();
        validate_identifier(nested)?;
        Ok(Self {
            repr: format!("{}{PATH_SEPARATOR}{nested}", self.repr),
        })
    }

    /// Whether this names a nested bean
    pub fn is_nested(&self) -> bool {
        self.bean_name()
            .is_some_and(|bean| bean.contains(PATH_SEPARATOR))
    }

    /// Whether this name belongs to the given module
    pub fn belongs_to(&self, module: &QualifiedName) -> bool {
        self.module_name() == module.module_name()
    }
}

fn normalize_segment(segment: &str, index: usize) -> Result<String> {
    let segment = segment.trim();
    if segment.is_empty() {
        return Err(Error::invalid_name(segment, "empty name segment"));
    }
    if index == 2 {
        validate_identifier(segment)?;
    } else {
        for part in segment.split(PATH_SEPARATOR) {
            validate_identifier(part.trim())
                .map_err(|_| Error::invalid_name(segment, format!("'{part}' is not an identifier")))?;
        }
    }
    Ok(segment
        .split(PATH_SEPARATOR)
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(&PATH_SEPARATOR.to_string()))
}

fn validate_identifier(part: &str) -> Result<()> {
    if IDENTIFIER.is_match(part) {
        Ok(())
    } else {
        Err(Error::invalid_name(part, "not a legal identifier"))
    }
}

impl FromStr for QualifiedName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let segments: Vec<&str> = s.split(NAME_SEPARATOR).collect();
        if segments.len() > MAX_NAME_SEGMENTS {
            return Err(Error::invalid_name(
                s,
                format!("at most {MAX_NAME_SEGMENTS} segments are allowed"),
            ));
        }
        Self::from_segments(&segments)
    }
}

impl TryFrom<String> for QualifiedName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<QualifiedName> for String {
    fn from(name: QualifiedName) -> Self {
        name.repr
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

impl fmt::Debug for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QualifiedName({})", self.repr)
    }
}

impl AsRef<str> for QualifiedName {
    fn as_ref(&self) -> &str {
        &self.repr
    }
}
