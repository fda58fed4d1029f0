//! Statically declared field tables for the problem description types.
//!
//! Every scannable description type ([`crate::Cost`], [`crate::Constraints`],
//! [`crate::ModelSpec`]) registers its public fields in a compile-time table.
//! Each entry carries the field's [`Role`] and a comparison function that
//! knows how to detect a deviation from the type's default instance, so
//! scanning is a plain table walk with no runtime introspection.

use std::str::FromStr;

use thiserror::Error;

/// Where in the composed horizon a field applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Applied at every interior stage of the owning phase.
    Path,
    /// Meaningful only at global stage 0.
    InitialOnly,
    /// Meaningful only at the final global stage.
    TerminalOnly,
}

/// Selects which roles a field scan keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleFilter {
    All,
    InitialOnly,
    TerminalOnly,
}

impl RoleFilter {
    /// Returns `true` if a field with the given role survives this filter.
    #[must_use]
    pub fn matches(self, role: Role) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::InitialOnly => role == Role::InitialOnly,
            RoleFilter::TerminalOnly => role == Role::TerminalOnly,
        }
    }
}

/// An error returned when parsing an unrecognized role filter name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported role filter `{0}`, expected `all`, `initial`, or `terminal`")]
pub struct ParseRoleFilterError(pub String);

impl FromStr for RoleFilter {
    type Err = ParseRoleFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "initial" => Ok(Self::InitialOnly),
            "terminal" => Ok(Self::TerminalOnly),
            other => Err(ParseRoleFilterError(other.to_string())),
        }
    }
}

/// One entry in a description type's field table.
///
/// The `differs` function encodes the field's comparison semantics
/// (scalar equality, elementwise array equality) at registration time.
pub struct FieldDef<T> {
    pub name: &'static str,
    pub role: Role,
    pub differs: fn(&T, &T) -> bool,
}

/// A description type with a statically declared field table.
///
/// Index-selector fields and fields handled specially elsewhere (such as the
/// initial-state override on constraints) are left out of the table so scans
/// report values, not structural selectors.
pub trait FieldSchema: Sized {
    fn field_table() -> &'static [FieldDef<Self>];
}
