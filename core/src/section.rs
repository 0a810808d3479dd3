//! Sections and the persisted layout document.
//!
//! A `Section` is one rectangular region of a space hosting one app
//! variant. Its frame is assigned at creation and never moves; resizing is
//! not supported, only deletion. The document types at the bottom define
//! the exact shape of saved layout files.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::apps::{AppContent, AppKind};

/// Placeholder written into the `space` field of saved layouts. The wall
/// service substitutes the target space on import, so the client never
/// persists a concrete space name.
pub const SPACE_PLACEHOLDER: &str = "OVE_SPACE";


/// Pixel bounding box of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Frame {
    pub fn new(w: u32, h: u32, x: u32, y: u32) -> Frame {
        Frame { x, y, w, h }
    }
}


/// One rectangular region of a space. Created only through
/// `Space::add_section*`; the id comes from the wall service, or is a local
/// token in offline mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub frame: Frame,
    pub content: AppContent,
}

impl Section {
    pub fn kind(&self) -> AppKind {
        self.content.kind()
    }

    /// Section entry for a saved layout file: frame plus variant-tagged app
    /// marker and load state.
    pub fn to_doc(&self) -> SectionDoc {
        SectionDoc {
            space: SPACE_PLACEHOLDER.to_string(),
            h: self.frame.h,
            w: self.frame.w,
            x: self.frame.x,
            y: self.frame.y,
            app: AppDoc {
                url: self.kind().marker().to_string(),
                states: StatesDoc {
                    load: self.content.load_state(),
                },
            },
        }
    }
}


// ---------------------------------------------------------------------------
// Saved layout documents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutDoc {
    #[serde(rename = "Attribution")]
    pub attribution: Attribution,
    #[serde(rename = "Sections")]
    pub sections: Vec<SectionDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribution {
    #[serde(rename = "Title")]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionDoc {
    pub space: String,
    pub h: u32,
    pub w: u32,
    pub x: u32,
    pub y: u32,
    pub app: AppDoc,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppDoc {
    pub url: String,
    pub states: StatesDoc,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatesDoc {
    pub load: Value,
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
