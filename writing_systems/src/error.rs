// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::PathBuf;

use lang_primitives::{ParseLanguageTagError, WsHandle};
use thiserror::Error;

/// Errors returned by [`Registry`](crate::Registry) operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A language tag could not be parsed.
    #[error("invalid language tag `{tag}`")]
    InvalidTag {
        /// The tag as given.
        tag: String,
        /// Why it was rejected.
        #[source]
        source: ParseLanguageTagError,
    },

    /// Another definition already has this tag.
    #[error("writing system `{0}` is already registered")]
    DuplicateTag(String),

    /// No definition has this handle.
    #[error("no writing system has handle {0}")]
    UnknownHandle(WsHandle),

    /// A definition holds a character the store cannot represent.
    #[error("{field} of writing system `{tag}` contains a control character")]
    UnstorableText {
        /// The writing system's tag.
        tag: String,
        /// The offending field.
        field: &'static str,
    },

    /// Every representable handle has been allocated.
    #[error("writing system handles are exhausted")]
    HandlesExhausted,

    /// Reading or writing the store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors reading or writing the writing system store.
///
/// Loading never partially succeeds: any of these aborts the whole load.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file or directory could not be accessed.
    #[error("failed to access `{}`", .path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A file is not well-formed XML.
    #[error("`{}` is not well-formed XML", .path.display())]
    Xml {
        /// The file.
        path: PathBuf,
        /// The parser error.
        #[source]
        source: roxmltree::Error,
    },

    /// A file is well-formed but does not describe a valid writing system.
    #[error("`{}` is not a valid writing system file: {reason}", .path.display())]
    Malformed {
        /// The file.
        path: PathBuf,
        /// What is wrong with it.
        reason: String,
    },
}
