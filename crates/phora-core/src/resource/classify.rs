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

//! Table-driven classification of descriptors into resource kinds.

use super::{ResourceDescriptor, ResourceKind};
use std::collections::HashMap;

/// Maps file extensions to resource kinds.
///
/// The default table covers the conventional asset extensions; hosts extend
/// it at runtime with [`register`](ExtensionTable::register) when they install
/// custom lanes. Classification itself is a pure lookup with no side effects.
///
/// Matching is exact and case-sensitive: `PNG` is not `png`.
#[derive(Debug, Clone)]
pub struct ExtensionTable {
    kinds: HashMap<String, ResourceKind>,
}

impl ExtensionTable {
    /// Creates an empty table with no known extensions.
    pub fn empty() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    /// Associates an extension with a kind, replacing any previous entry.
    pub fn register(&mut self, kind: ResourceKind, extension: impl Into<String>) {
        self.kinds.insert(extension.into(), kind);
    }

    /// Classifies a descriptor.
    ///
    /// Font descriptors are always [`ResourceKind::Font`]; an explicit kind on
    /// an entry wins over the table. Otherwise the extension is taken after
    /// the last `.` of the path (any `?` query suffix stripped) and looked up.
    /// A miss yields [`ResourceKind::Other`] carrying the raw extension, which
    /// callers must treat as a later dispatch failure rather than a kind of
    /// its own.
    pub fn classify(&self, descriptor: &ResourceDescriptor) -> ResourceKind {
        match descriptor {
            ResourceDescriptor::Font(_) => ResourceKind::Font,
            ResourceDescriptor::Entry {
                kind: Some(kind), ..
            } => kind.clone(),
            ResourceDescriptor::Path(path) | ResourceDescriptor::Entry { src: path, .. } => {
                let ext = extension_of(path);
                self.kinds
                    .get(ext)
                    .cloned()
                    .unwrap_or_else(|| ResourceKind::Other(ext.to_string()))
            }
        }
    }
}

impl Default for ExtensionTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for ext in ["png", "jpg", "bmp", "jpeg", "gif"] {
            table.register(ResourceKind::Image, ext);
        }
        for ext in ["mp3", "ogg", "wav", "mp4", "m4a"] {
            table.register(ResourceKind::Sound, ext);
        }
        for ext in ["plist", "xml", "fnt", "tmx", "tsx"] {
            table.register(ResourceKind::Markup, ext);
        }
        table.register(ResourceKind::Binary, "ccbi");
        for ext in ["txt", "vsh", "fsh", "json", "ExportJson", "atlas"] {
            table.register(ResourceKind::Text, ext);
        }
        table
    }
}

/// Extracts the extension of a path: everything after the last `.`, with a
/// trailing query string stripped. A path with no `.` is returned whole, so
/// it misses the table and surfaces as an unknown kind.
fn extension_of(path: &str) -> &str {
    let ext = match path.rfind('.') {
        Some(index) => &path[index + 1..],
        None => path,
    };
    match ext.find('?') {
        Some(index) => &ext[..index],
        None => ext,
    }
}
