use alloc::string::String;

use thiserror::Error;

// -----------------------------------------------------------------------------
// DeclarationError

/// A mapper was declared, or used, in a way that can never render.
///
/// Every variant names the mapper it was raised for.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeclarationError {
    #[error("[{mapper}] undefined relation: {key}")]
    UndefinedRelation { mapper: String, key: String },

    #[error("[{mapper}] '{target}' should be a mapper")]
    NotAMapper { mapper: String, target: String },

    #[error("[{mapper}] no scope named {scope} found")]
    UnknownScope { mapper: String, scope: String },

    #[error("[{mapper}] scope must be given at least one non-blank name")]
    EmptyScope { mapper: String },

    #[error("[{mapper}] invalid access path `{path}`: {reason}")]
    InvalidPath {
        mapper: String,
        path: String,
        reason: String,
    },

    #[error("[{mapper}] renderers must produce a map, found {found}")]
    InvalidOutput { mapper: String, found: &'static str },

    #[error("[{mapper}] another mapper is registered under this path")]
    DuplicatePath { mapper: String },

    #[error("[{mapper}] mapper has not been registered")]
    Unregistered { mapper: String },

    #[error("[{mapper}] cyclic inheritance")]
    CyclicInheritance { mapper: String },
}

// -----------------------------------------------------------------------------
// ResolutionError

/// A mapper looked up at render time could not be found.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResolutionError {
    #[error("uninitialized constant {path}")]
    MapperNotFound { path: String },

    #[error("[{mapper}] missing type discriminator `{field}`")]
    MissingDiscriminator { mapper: String, field: String },

    #[error("no mapper found for this type of resource: {type_path}")]
    NoMapperForResource { type_path: String },
}

// -----------------------------------------------------------------------------
// MapperError

/// Any failure of a render call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MapperError {
    #[error(transparent)]
    Declaration(#[from] DeclarationError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

// -----------------------------------------------------------------------------
// Tests
