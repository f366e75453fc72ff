// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provides the foundational types describing preloadable resources.
//!
//! This module defines the "common language" for all preloading operations:
//! what a requested resource looks like ([`ResourceDescriptor`]), how it is
//! classified ([`ResourceKind`]), and the table-driven classifier mapping file
//! extensions to kinds ([`ExtensionTable`]). It has no knowledge of how
//! resources are loaded or stored; those concerns live in the lanes.

mod classify;
mod kind;

pub use classify::*;
pub use kind::*;

use serde::{Deserialize, Serialize};

/// An immutable description of one requested resource.
///
/// Descriptors are the unit of work accepted by the preloader. They come in
/// three shapes, mirroring what hosts actually hand over: a bare path, a path
/// with an explicit kind override, or a font face declaration. A descriptor is
/// never mutated after creation; batches own their copies so that later
/// changes to the caller's list cannot corrupt in-flight state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceDescriptor {
    /// A bare path. The kind is inferred from the file extension.
    Path(String),
    /// A path with an optional explicit kind, bypassing extension lookup.
    Entry {
        /// The resource path.
        src: String,
        /// Explicit kind override; `None` falls back to the extension table.
        kind: Option<ResourceKind>,
    },
    /// A font family backed by one or more source files.
    Font(FontFace),
}

impl ResourceDescriptor {
    /// Returns the key under which this resource is loaded, cached, and
    /// released: the path for path-like descriptors, the family name for
    /// fonts.
    pub fn source(&self) -> &str {
        match self {
            ResourceDescriptor::Path(path) => path,
            ResourceDescriptor::Entry { src, .. } => src,
            ResourceDescriptor::Font(face) => &face.family,
        }
    }

    /// Convenience constructor for a path with an explicit kind.
    pub fn with_kind(src: impl Into<String>, kind: ResourceKind) -> Self {
        ResourceDescriptor::Entry {
            src: src.into(),
            kind: Some(kind),
        }
    }
}

impl From<&str> for ResourceDescriptor {
    fn from(path: &str) -> Self {
        ResourceDescriptor::Path(path.to_string())
    }
}

impl From<String> for ResourceDescriptor {
    fn from(path: String) -> Self {
        ResourceDescriptor::Path(path)
    }
}

/// A font family declaration: a family name plus its source/format pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontFace {
    /// The family name the host will refer to the font by.
    pub family: String,
    /// One or more source files, tried in order by the host's text stack.
    pub sources: Vec<FontSource>,
}

/// One source file of a [`FontFace`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSource {
    /// Path to the font file.
    pub src: String,
    /// Format tag (e.g. `"truetype"`, `"woff"`), passed through to the host.
    pub format: String,
}
