// Scroll-spy navigation.
//
// The navigation panel lists every player. As the page scrolls, the panel
// either sits in normal flow above the content, floats near the top of the
// viewport while player sections pass by, or pins at the last player once the
// content is scrolled past. While floating, one player entry is marked active.
//
// Breakpoints come from layout measurements and are refreshed on load and on
// resize. Scroll handling only reads them, runs on every scroll event, and
// allocates nothing.

use crate::layout::LayoutProvider;
use crate::normalize::{Category, ProcessedDataset};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Distance from the viewport top at which the floating panel sits.
pub const BUFFER_TOP: f64 = 10.0;

/// Look-ahead below the scroll offset used to pick the player in view.
pub const VIEW_BUFFER: f64 = 200.0;

/// Slack, in pixels, for deciding the page is scrolled to the very bottom.
pub const BOTTOM_TOLERANCE: f64 = 1.0;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavSettings {
    pub buffer_top: f64,
    pub view_buffer: f64,
    pub bottom_tolerance: f64,
}

impl Default for NavSettings {
    fn default() -> Self {
        NavSettings {
            buffer_top: BUFFER_TOP,
            view_buffer: VIEW_BUFFER,
            bottom_tolerance: BOTTOM_TOLERANCE,
        }
    }
}

/// Scroll offsets separating the panel states.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavBreakpoints {
    /// Top of the navigation panel.
    pub pre: f64,
    /// Top of the first player section.
    pub top: f64,
    /// Top of the last player section.
    pub bottom: f64,
}

/// Scroll metrics of the viewport at the time of a scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl Viewport {
    /// Whether the viewport is scrolled to the end of the document.
    pub fn at_bottom(&self, tolerance: f64) -> bool {
        self.document_height - self.scroll_top - self.viewport_height <= tolerance
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollState {
    PreContent,
    InContent,
    PostContent,
}

/// How the navigation panel is positioned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PanelPosition {
    /// Normal document flow.
    Normal,
    /// Fixed in the viewport, `top` pixels from its top edge.
    Fixed { top: f64 },
    /// In flow, shifted down by `offset` to line up with the last player.
    PinnedBottom { offset: f64 },
}

/// Change to the active entry caused by one scroll event. Indices refer to
/// `Navigator::sections`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Unchanged,
    Cleared { previous: usize },
    Selected {
        previous: Option<usize>,
        current: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavUpdate {
    pub state: ScrollState,
    pub position: PanelPosition,
    pub selection: SelectionChange,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("navigation breakpoints have not been computed")]
    BreakpointsUnset,

    #[error("navigator has no player sections")]
    NoSections,

    #[error("no layout bounds for element '{0}'")]
    MissingBounds(String),
}

// ---------------------------------------------------------------------------
// Navigator
// ---------------------------------------------------------------------------

/// Scroll-spy state: cached breakpoints plus the active entry.
#[derive(Debug, Clone)]
pub struct Navigator {
    nav_id: String,
    sections: Vec<String>,
    settings: NavSettings,
    breakpoints: Option<NavBreakpoints>,
    active: Option<usize>,
    position: PanelPosition,
}

impl Navigator {
    /// `sections` are player section ids in document order.
    pub fn new(nav_id: impl Into<String>, sections: Vec<String>, settings: NavSettings) -> Self {
        Navigator {
            nav_id: nav_id.into(),
            sections,
            settings,
            breakpoints: None,
            active: None,
            position: PanelPosition::Normal,
        }
    }

    /// Navigator over every player in the dataset, in dataset order.
    pub fn for_dataset(
        dataset: &ProcessedDataset,
        nav_id: impl Into<String>,
        settings: NavSettings,
    ) -> Self {
        let sections = dataset.careers().map(|(_, player)| player.id()).collect();
        Self::new(nav_id, sections, settings)
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn settings(&self) -> &NavSettings {
        &self.settings
    }

    pub fn breakpoints(&self) -> Option<NavBreakpoints> {
        self.breakpoints
    }

    pub fn position(&self) -> PanelPosition {
        self.position
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.map(|i| self.sections[i].as_str())
    }

    /// Re-measure breakpoints. Call on load and whenever the viewport resizes.
    pub fn recompute_breakpoints<L>(&mut self, layout: &L) -> Result<NavBreakpoints, NavError>
    where
        L: LayoutProvider + ?Sized,
    {
        let (first, last) = match (self.sections.first(), self.sections.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(NavError::NoSections),
        };
        let top_of = |id: &str| {
            layout
                .section_bounds(id)
                .map(|b| b.top)
                .ok_or_else(|| NavError::MissingBounds(id.to_string()))
        };

        let breakpoints = NavBreakpoints {
            pre: top_of(&self.nav_id)?,
            top: top_of(first)?,
            bottom: top_of(last)?,
        };
        if !(breakpoints.pre < breakpoints.top && breakpoints.top <= breakpoints.bottom) {
            warn!("navigation breakpoints are not in document order: {:?}", breakpoints);
        }
        debug!("navigation breakpoints recomputed: {:?}", breakpoints);

        self.breakpoints = Some(breakpoints);
        Ok(breakpoints)
    }

    /// Handle one scroll event.
    pub fn on_scroll<L>(&mut self, viewport: Viewport, layout: &L) -> Result<NavUpdate, NavError>
    where
        L: LayoutProvider + ?Sized,
    {
        let bp = self.breakpoints.ok_or(NavError::BreakpointsUnset)?;
        let offset = viewport.scroll_top;

        let update = if offset < bp.pre {
            NavUpdate {
                state: ScrollState::PreContent,
                position: PanelPosition::Normal,
                selection: self.select(None),
            }
        } else if offset > bp.bottom {
            NavUpdate {
                state: ScrollState::PostContent,
                position: PanelPosition::PinnedBottom {
                    offset: bp.bottom - bp.pre,
                },
                selection: SelectionChange::Unchanged,
            }
        } else {
            let target = if viewport.at_bottom(self.settings.bottom_tolerance) {
                self.sections.len().checked_sub(1)
            } else if offset < bp.top {
                None
            } else {
                // No qualifying section leaves the selection where it was.
                self.section_in_view(offset, layout).or(self.active)
            };
            NavUpdate {
                state: ScrollState::InContent,
                position: PanelPosition::Fixed {
                    top: self.settings.buffer_top,
                },
                selection: self.select(target),
            }
        };

        self.position = update.position;
        Ok(update)
    }

    /// First section, in document order, whose bottom edge lies below the
    /// look-ahead line.
    fn section_in_view<L>(&self, offset: f64, layout: &L) -> Option<usize>
    where
        L: LayoutProvider + ?Sized,
    {
        let threshold = offset + self.settings.view_buffer;
        self.sections
            .iter()
            .position(|id| match layout.section_bounds(id) {
                Some(bounds) => bounds.bottom() > threshold,
                None => {
                    debug!("section '{}' has no layout bounds; skipped", id);
                    false
                }
            })
    }

    fn select(&mut self, target: Option<usize>) -> SelectionChange {
        if target == self.active {
            return SelectionChange::Unchanged;
        }
        let previous = std::mem::replace(&mut self.active, target);
        match target {
            Some(current) => SelectionChange::Selected { previous, current },
            None => match previous {
                Some(previous) => SelectionChange::Cleared { previous },
                None => SelectionChange::Unchanged,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Navigation entries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavEntryKind {
    Category,
    Player,
}

/// One line of the navigation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    pub kind: NavEntryKind,
    pub label: String,
    /// Id of the list item; the active class goes on this element.
    pub id: String,
    /// Anchor the entry links to.
    pub href: String,
}

/// Navigation list for a dataset: each category heading followed by its
/// players.
pub fn nav_entries(dataset: &ProcessedDataset) -> Vec<NavEntry> {
    let mut entries = Vec::new();
    for category in Category::ALL {
        entries.push(NavEntry {
            kind: NavEntryKind::Category,
            label: category.as_str().to_string(),
            id: format!("{category}-li"),
            href: format!("#{category}-vis"),
        });
        for player in dataset.category(category) {
            let id = player.id();
            entries.push(NavEntry {
                kind: NavEntryKind::Player,
                label: player.name.clone(),
                id: format!("{id}-li"),
                href: format!("#{id}"),
            });
        }
    }
    entries
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
