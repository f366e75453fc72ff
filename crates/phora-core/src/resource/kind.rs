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

use serde::{Deserialize, Serialize};

/// Classification of a resource descriptor, used for routing work to lanes.
///
/// The named variants cover the kinds the default extension table knows
/// about. [`ResourceKind::Other`] carries an extension (or a host-defined
/// label) verbatim; an `Other` kind with no registered lane is a dispatch
/// failure, never a silent fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Bitmap images destined for a texture cache.
    Image,
    /// Audio clips.
    Sound,
    /// Structured text documents (plist, xml, fnt, tmx, tsx).
    Markup,
    /// Opaque binary blobs.
    Binary,
    /// Plain text files (scripts, shaders, json).
    Text,
    /// Font face declarations.
    Font,
    /// An extension the classifier does not recognize, kept verbatim, or a
    /// host-defined kind registered alongside a custom lane.
    Other(String),
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Image => write!(f, "Image"),
            ResourceKind::Sound => write!(f, "Sound"),
            ResourceKind::Markup => write!(f, "Markup"),
            ResourceKind::Binary => write!(f, "Binary"),
            ResourceKind::Text => write!(f, "Text"),
            ResourceKind::Font => write!(f, "Font"),
            ResourceKind::Other(label) => write!(f, "Other({label})"),
        }
    }
}
