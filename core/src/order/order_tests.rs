//! Order coordination tests: store round-trips, registration idempotence,
//! repositioning and the drag protocol.

use std::cell::{Cell, RefCell};

use tempfile::TempDir;

use crate::slot::{SiblingWindow, StripGeometry};

use super::drag::{DragController, DragRelease};
use super::store::{FileOrderStore, OrderStore, SIGNAL_FILE, StoreError};
use super::{OrderCoordinator, Placement, reposition_all};

/// In-memory store for coordinator tests.
#[derive(Default)]
struct MemStore {
    names: RefCell<Vec<String>>,
    broadcasts: Cell<u32>,
}

impl OrderStore for MemStore {
    fn read(&self) -> Vec<String> {
        self.names.borrow().clone()
    }

    fn write(&self, names: &[String]) -> Result<(), StoreError> {
        *self.names.borrow_mut() = names.to_vec();
        Ok(())
    }

    fn broadcast(&self) -> Result<(), StoreError> {
        self.broadcasts.set(self.broadcasts.get() + 1);
        Ok(())
    }
}

fn strip() -> StripGeometry {
    StripGeometry {
        width: 1280,
        height: 40,
        reserved_left: Some(1000),
        fallback_inset: 200,
    }
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

// ─────────────────────────────────────────────────────────────────────────
// File store
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn test_save_order_round_trips() {
    let dir = TempDir::new().expect("tempdir");
    let store = FileOrderStore::open(dir.path()).expect("store");

    let order = names(&["cpu", "mem", "net"]);
    store.write(&order).expect("write");
    assert_eq!(store.read(), order);

    // Full replace, not a merge.
    let reordered = names(&["net", "cpu"]);
    store.write(&reordered).expect("write");
    assert_eq!(store.read(), reordered);
}

#[test]
fn test_missing_file_reads_empty() {
    let dir = TempDir::new().expect("tempdir");
    let store = FileOrderStore::open(dir.path()).expect("store");
    assert!(store.read().is_empty());
}

#[test]
fn test_corrupt_file_reads_empty() {
    let dir = TempDir::new().expect("tempdir");
    let store = FileOrderStore::open(dir.path()).expect("store");
    std::fs::write(dir.path().join(super::store::ORDER_FILE), b"{not json]").expect("write");
    assert!(store.read().is_empty());
}

#[test]
fn test_order_file_is_plain_json_array() {
    let dir = TempDir::new().expect("tempdir");
    let store = FileOrderStore::open(dir.path()).expect("store");
    store.write(&names(&["cpu", "mem"])).expect("write");

    let raw = std::fs::read_to_string(dir.path().join(super::store::ORDER_FILE)).expect("read");
    assert_eq!(raw, r#"["cpu","mem"]"#);
}

#[test]
fn test_write_leaves_no_temp_files() {
    let dir = TempDir::new().expect("tempdir");
    let store = FileOrderStore::open(dir.path()).expect("store");
    store.write(&names(&["cpu"])).expect("write");

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .expect("read_dir")
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp file survived the rename");
}

#[test]
fn test_broadcast_touches_signal_file() {
    let dir = TempDir::new().expect("tempdir");
    let store = FileOrderStore::open(dir.path()).expect("store");

    store.broadcast().expect("broadcast");
    let first = std::fs::read_to_string(dir.path().join(SIGNAL_FILE)).expect("signal");
    store.broadcast().expect("broadcast");
    let second = std::fs::read_to_string(dir.path().join(SIGNAL_FILE)).expect("signal");
    // Each broadcast must change the file so watchers see a modification.
    assert_ne!(first, second);
}

// ─────────────────────────────────────────────────────────────────────────
// Coordinator
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn test_register_is_idempotent() {
    let mut coordinator = OrderCoordinator::new(MemStore::default());
    coordinator.register("cpu");
    coordinator.register("mem");
    coordinator.register("cpu");
    assert_eq!(coordinator.order(), names(&["cpu", "mem"]).as_slice());
    assert_eq!(coordinator.index_of("mem"), Some(1));
    assert_eq!(coordinator.index_of("net"), None);
}

#[test]
fn test_register_picks_up_peer_registrations() {
    let mut coordinator = OrderCoordinator::new(MemStore::default());
    coordinator.register("cpu");
    // A peer process appends behind our back.
    coordinator
        .store()
        .write(&names(&["cpu", "net"]))
        .expect("write");
    coordinator.register("mem");
    assert_eq!(coordinator.order(), names(&["cpu", "net", "mem"]).as_slice());
}

#[test]
fn test_save_order_replaces_and_broadcast_counts() {
    let mut coordinator = OrderCoordinator::new(MemStore::default());
    coordinator.register("cpu");
    coordinator.save_order(names(&["mem", "cpu"]));
    assert_eq!(coordinator.order(), names(&["mem", "cpu"]).as_slice());
    assert_eq!(coordinator.store().read(), names(&["mem", "cpu"]));

    coordinator.broadcast_reposition();
    assert_eq!(coordinator.store().broadcasts.get(), 1);
}

// ─────────────────────────────────────────────────────────────────────────
// Reposition pass
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn test_reposition_all_packs_right_to_left() {
    let windows = vec![
        SiblingWindow::new("cpu", 0, 60),
        SiblingWindow::new("mem", 0, 100),
    ];
    let placements = reposition_all(&names(&["cpu", "mem"]), &windows, &strip(), 4);
    assert_eq!(
        placements,
        vec![
            Placement {
                name: "cpu".to_string(),
                x: 940,
            },
            Placement {
                name: "mem".to_string(),
                x: 836,
            },
        ]
    );
}

#[test]
fn test_reposition_all_skips_hidden_widgets() {
    let windows = vec![SiblingWindow::new("mem", 0, 100)];
    let placements = reposition_all(&names(&["cpu", "mem"]), &windows, &strip(), 4);
    // "cpu" is not on screen: it neither appears nor consumes space.
    assert_eq!(
        placements,
        vec![Placement {
            name: "mem".to_string(),
            x: 900,
        }]
    );
}

// ─────────────────────────────────────────────────────────────────────────
// Drag protocol
// ─────────────────────────────────────────────────────────────────────────

fn controller() -> DragController {
    DragController::new("mem", 5, 0.25, 1.0)
}

#[test]
fn test_dead_zone_suppresses_drag() {
    let mut drag = controller();
    drag.pointer_down(930, 900);
    // 5 px of travel is still a click.
    assert!(drag.pointer_move(935, 60, &[], &strip(), 4).is_none());
    assert!(!drag.is_dragging());
    assert_eq!(drag.pointer_up(), DragRelease::Click);
}

#[test]
fn test_drag_tracks_pointer_and_makes_room() {
    let siblings = vec![SiblingWindow::new("cpu", 830, 60)];
    let mut drag = controller();

    // Grab 30 px into a window sitting at x=900.
    drag.pointer_down(930, 900);
    let frame = drag
        .pointer_move(800, 60, &siblings, &strip(), 4)
        .expect("past dead zone");
    assert!(drag.is_dragging());

    // Window follows the pointer minus the grab offset.
    assert_eq!(frame.own_x, 770);
    // Centers: cpu 860, mem 800 -> cpu is now rightmost.
    assert_eq!(frame.preview, names(&["cpu", "mem"]));
    // cpu starts sliding from 830 toward its slot at 940.
    let (_, cpu_x) = frame
        .sibling_moves
        .iter()
        .find(|(n, _)| n == "cpu")
        .expect("cpu move");
    assert!(*cpu_x > 830 && *cpu_x <= 940);
}

#[test]
fn test_commit_persists_final_preview_and_snaps() {
    let siblings = vec![SiblingWindow::new("cpu", 830, 60)];
    let mut drag = controller();
    drag.pointer_down(930, 900);
    drag.pointer_move(800, 60, &siblings, &strip(), 4)
        .expect("dragging");

    match drag.pointer_up() {
        DragRelease::Committed { order, snap_x } => {
            // Persisted order == windows by final center-x, descending.
            assert_eq!(order, names(&["cpu", "mem"]));
            // mem snaps to the slot behind cpu: 940 - 4 - 60 = 876.
            assert_eq!(snap_x, 876);
        }
        DragRelease::Click => panic!("expected a committed drag"),
    }
    assert!(!drag.is_dragging());
}

#[test]
fn test_capture_loss_cancels_drag() {
    let mut drag = controller();
    drag.pointer_down(930, 900);
    drag.pointer_move(800, 60, &[], &strip(), 4).expect("dragging");
    assert!(drag.capture_lost());
    assert!(!drag.is_dragging());
    // A lost capture with no drag in progress is not a cancellation.
    assert!(!drag.capture_lost());
}
