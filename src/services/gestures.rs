//! Gesture-to-operation mapping.
//!
//! Drag events arrive as start/over/end phases with a tagged source and an
//! optional tagged target. Only the end phase produces an operation; the
//! mapper otherwise just remembers what is being dragged so renderers can
//! show feedback.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// What is being dragged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DragSource {
    /// An entry from the icon library, referenced by catalog id
    CatalogIcon {
        /// Catalog icon id
        icon: String,
    },
    /// An icon already on the panel
    PlacedIcon {
        /// Slot it currently occupies
        slot: usize,
    },
}

/// Where the drag was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DropTarget {
    /// A slot, empty or not
    Slot {
        /// Target slot index
        slot: usize,
    },
    /// The badge of a placed icon
    PlacedIcon {
        /// Slot the target icon occupies
        slot: usize,
    },
    /// Anywhere on the panel outside a specific slot
    PanelSurface,
}

/// Gesture lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    /// Drag started
    Start,
    /// Pointer moved over a target (or off all targets)
    Over,
    /// Drag released
    End,
}

/// One event from the drag collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureEvent {
    /// Lifecycle phase
    pub phase: GesturePhase,
    /// Dragged item
    pub source: DragSource,
    /// Target under the pointer, if any
    #[serde(default)]
    pub target: Option<DropTarget>,
}

impl GestureEvent {
    /// Convenience constructor for a release event.
    #[must_use]
    pub const fn end(source: DragSource, target: Option<DropTarget>) -> Self {
        Self {
            phase: GesturePhase::End,
            source,
            target,
        }
    }
}

/// Store mutation requested by a completed gesture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Place a catalog icon at a specific slot
    Place {
        /// Catalog icon id
        icon: String,
        /// Target slot
        slot: usize,
    },
    /// Place a catalog icon in the first empty slot
    PlaceFirstEmpty {
        /// Catalog icon id
        icon: String,
    },
    /// Swap two slots
    Move {
        /// Source slot
        from: usize,
        /// Target slot
        to: usize,
    },
}

/// Maps a completed drag to an operation.
///
/// Returns `None` for drops outside any target, catalog icons dropped onto
/// placed icons, placed icons dropped on the bare surface, and drops back
/// onto the originating slot.
#[must_use]
pub fn dispatch(source: &DragSource, target: Option<DropTarget>) -> Option<Operation> {
    match (source, target?) {
        (DragSource::CatalogIcon { icon }, DropTarget::Slot { slot }) => Some(Operation::Place {
            icon: icon.clone(),
            slot,
        }),
        (DragSource::CatalogIcon { icon }, DropTarget::PanelSurface) => {
            Some(Operation::PlaceFirstEmpty { icon: icon.clone() })
        }
        (DragSource::CatalogIcon { .. }, DropTarget::PlacedIcon { .. })
        | (DragSource::PlacedIcon { .. }, DropTarget::PanelSurface) => None,
        (
            DragSource::PlacedIcon { slot: from },
            DropTarget::Slot { slot: to } | DropTarget::PlacedIcon { slot: to },
        ) => (*from != to).then_some(Operation::Move { from: *from, to }),
    }
}

/// Tracks the active drag and turns release events into operations.
#[derive(Debug, Clone, Default)]
pub struct GestureMapper {
    active: Option<DragSource>,
    over: Option<DropTarget>,
}

impl GestureMapper {
    /// Creates an idle mapper.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active: None,
            over: None,
        }
    }

    /// Source currently being dragged.
    #[must_use]
    pub const fn active(&self) -> Option<&DragSource> {
        self.active.as_ref()
    }

    /// Target currently under the pointer.
    #[must_use]
    pub const fn over(&self) -> Option<DropTarget> {
        self.over
    }

    /// Feeds one event. Only `End` can yield an operation.
    pub fn handle(&mut self, event: GestureEvent) -> Option<Operation> {
        match event.phase {
            GesturePhase::Start => {
                debug!(source = ?event.source, "drag started");
                self.active = Some(event.source);
                self.over = None;
                None
            }
            GesturePhase::Over => {
                if self.active.is_none() {
                    self.active = Some(event.source);
                }
                self.over = event.target;
                None
            }
            GesturePhase::End => {
                self.active = None;
                self.over = None;
                let operation = dispatch(&event.source, event.target);
                debug!(source = ?event.source, target = ?event.target, ?operation, "drag ended");
                operation
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(icon: &str) -> DragSource {
        DragSource::CatalogIcon {
            icon: icon.to_string(),
        }
    }

    #[test]
    fn test_dispatch_table() {
        let cases = [
            (
                catalog("1"),
                Some(DropTarget::Slot { slot: 3 }),
                Some(Operation::Place {
                    icon: "1".to_string(),
                    slot: 3,
                }),
            ),
            (
                catalog("1"),
                Some(DropTarget::PanelSurface),
                Some(Operation::PlaceFirstEmpty {
                    icon: "1".to_string(),
                }),
            ),
            (catalog("1"), Some(DropTarget::PlacedIcon { slot: 2 }), None),
            (catalog("1"), None, None),
            (
                DragSource::PlacedIcon { slot: 0 },
                Some(DropTarget::Slot { slot: 1 }),
                Some(Operation::Move { from: 0, to: 1 }),
            ),
            (
                DragSource::PlacedIcon { slot: 4 },
                Some(DropTarget::PlacedIcon { slot: 2 }),
                Some(Operation::Move { from: 4, to: 2 }),
            ),
            (
                DragSource::PlacedIcon { slot: 1 },
                Some(DropTarget::Slot { slot: 1 }),
                None,
            ),
            (
                DragSource::PlacedIcon { slot: 1 },
                Some(DropTarget::PlacedIcon { slot: 1 }),
                None,
            ),
            (
                DragSource::PlacedIcon { slot: 1 },
                Some(DropTarget::PanelSurface),
                None,
            ),
            (DragSource::PlacedIcon { slot: 1 }, None, None),
        ];

        for (source, target, expected) in cases {
            assert_eq!(
                dispatch(&source, target),
                expected,
                "{source:?} -> {target:?}"
            );
        }
    }

    #[test]
    fn test_mapper_tracks_active_drag() {
        let mut mapper = GestureMapper::new();
        let source = DragSource::PlacedIcon { slot: 2 };

        assert!(mapper
            .handle(GestureEvent {
                phase: GesturePhase::Start,
                source: source.clone(),
                target: None,
            })
            .is_none());
        assert_eq!(mapper.active(), Some(&source));

        mapper.handle(GestureEvent {
            phase: GesturePhase::Over,
            source: source.clone(),
            target: Some(DropTarget::Slot { slot: 5 }),
        });
        assert_eq!(mapper.over(), Some(DropTarget::Slot { slot: 5 }));

        let op = mapper.handle(GestureEvent::end(source, Some(DropTarget::Slot { slot: 5 })));
        assert_eq!(op, Some(Operation::Move { from: 2, to: 5 }));
        assert!(mapper.active().is_none());
        assert!(mapper.over().is_none());
    }

    #[test]
    fn test_drop_outside_clears_active() {
        let mut mapper = GestureMapper::new();
        mapper.handle(GestureEvent {
            phase: GesturePhase::Start,
            source: catalog("5"),
            target: None,
        });

        assert!(mapper.handle(GestureEvent::end(catalog("5"), None)).is_none());
        assert!(mapper.active().is_none());
    }

    #[test]
    fn test_gesture_event_json() {
        let event: GestureEvent = serde_json::from_str(
            r#"{"phase":"end","source":{"type":"catalog-icon","icon":"12"},"target":{"type":"panel-surface"}}"#,
        )
        .unwrap();

        assert_eq!(event.source, catalog("12"));
        assert_eq!(event.target, Some(DropTarget::PanelSurface));

        let no_target: GestureEvent =
            serde_json::from_str(r#"{"phase":"end","source":{"type":"placed-icon","slot":0}}"#)
                .unwrap();
        assert!(no_target.target.is_none());
    }
}
