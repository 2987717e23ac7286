//! Horizontal slot allocation against live sibling geometry.
//!
//! Widgets place themselves right-to-left along the strip. The global
//! order list biases where a widget starts looking, but live geometry is
//! authoritative: the overlap pass always runs and always wins, because
//! order intent can be briefly stale relative to actual spans (e.g.
//! mid-resize in a peer process).

/// One visible widget window, in strip-local coordinates, as reported by
/// the sibling enumerator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiblingWindow {
    pub name: String,
    pub left: i32,
    pub width: i32,
}

impl SiblingWindow {
    pub fn new(name: impl Into<String>, left: i32, width: i32) -> Self {
        Self {
            name: name.into(),
            left,
            width,
        }
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn center(&self) -> i32 {
        self.left + self.width / 2
    }
}

/// Geometry of the shared strip.
#[derive(Debug, Clone, Copy)]
pub struct StripGeometry {
    pub width: i32,
    pub height: i32,
    /// Left edge of the reserved system region (clock/tray), when known.
    pub reserved_left: Option<i32>,
    /// Inset from the strip's right edge used when no reserved region is
    /// reported.
    pub fallback_inset: i32,
}

impl StripGeometry {
    /// Rightmost coordinate a widget may occupy.
    pub fn right_boundary(&self) -> i32 {
        self.reserved_left
            .unwrap_or(self.width - self.fallback_inset)
    }

    /// Hard floor for slot left edges; the left third of the strip is
    /// reserved for other fixed system UI.
    pub fn min_left(&self) -> i32 {
        self.width / 3
    }
}

/// A computed placement; derived from a geometry snapshot, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub x: i32,
    pub y: i32,
    pub available_width: i32,
    pub height: i32,
    pub is_valid: bool,
}

/// Compute a non-overlapping slot for a widget `desired_width` px wide.
///
/// With `own_name` present in `order`, the start position is offset left by
/// the cumulative span of visible siblings ranked ahead; either way the
/// overlap pass against live spans runs afterwards. `is_valid` is false
/// when the clamped span cannot fit the requested width; callers must pick
/// an explicit fallback placement in that case.
///
/// Deterministic: identical sibling snapshots and order yield the same
/// slot (right-edge sort ties break on name).
pub fn find_slot(
    desired_width: i32,
    own_name: &str,
    strip: &StripGeometry,
    siblings: &[SiblingWindow],
    margin: i32,
    order: &[String],
) -> Slot {
    let boundary = strip.right_boundary();
    let mut right = boundary;

    if let Some(own_index) = order.iter().position(|n| n == own_name) {
        let ahead: i32 = siblings
            .iter()
            .filter(|s| s.name != own_name)
            .filter(|s| {
                order
                    .iter()
                    .position(|n| *n == s.name)
                    .is_some_and(|i| i < own_index)
            })
            .map(|s| s.width + margin)
            .sum();
        right -= ahead;
    }

    let mut x = right - desired_width;

    let mut others: Vec<&SiblingWindow> =
        siblings.iter().filter(|s| s.name != own_name).collect();
    others.sort_by(|a, b| b.right().cmp(&a.right()).then_with(|| a.name.cmp(&b.name)));

    for sibling in others {
        if x < sibling.right() && right > sibling.left {
            right = sibling.left - margin;
            x = right - desired_width;
        }
    }

    let floor = strip.min_left();
    if x < floor {
        x = floor;
    }
    let available_width = right - x;

    Slot {
        x,
        y: 0,
        available_width,
        height: strip.height,
        is_valid: desired_width > 0 && available_width >= desired_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip() -> StripGeometry {
        StripGeometry {
            width: 1280,
            height: 40,
            reserved_left: Some(1000),
            fallback_inset: 200,
        }
    }

    #[test]
    fn test_fits_right_of_sibling() {
        // Boundary 1000, margin 4, sibling at [800, 900): a 50-wide widget
        // fits at 950 without any push.
        let siblings = vec![SiblingWindow::new("cpu", 800, 100)];
        let slot = find_slot(50, "mem", &strip(), &siblings, 4, &[]);
        assert_eq!(slot.x, 950);
        assert!(slot.is_valid);
    }

    #[test]
    fn test_pushed_left_past_sibling() {
        // A 200-wide widget overlaps [800, 900) and lands at 796-200 = 596.
        let siblings = vec![SiblingWindow::new("cpu", 800, 100)];
        let slot = find_slot(200, "mem", &strip(), &siblings, 4, &[]);
        assert_eq!(slot.x, 596);
        assert_eq!(slot.available_width, 200);
        assert!(slot.is_valid);
    }

    #[test]
    fn test_sequential_slots_never_overlap() {
        let mut siblings: Vec<SiblingWindow> = Vec::new();
        let widths = [60, 120, 45, 200, 80];
        for (i, &w) in widths.iter().enumerate() {
            let name = format!("w{i}");
            let slot = find_slot(w, &name, &strip(), &siblings, 4, &[]);
            assert!(slot.is_valid, "slot {i} invalid");
            siblings.push(SiblingWindow::new(name, slot.x, w));
        }
        for a in 0..siblings.len() {
            for b in a + 1..siblings.len() {
                let (sa, sb) = (&siblings[a], &siblings[b]);
                assert!(
                    sa.right() + 4 <= sb.left || sb.right() + 4 <= sa.left,
                    "{} and {} overlap or break the margin",
                    sa.name,
                    sb.name
                );
            }
        }
    }

    #[test]
    fn test_order_offset_reserves_room_for_ranked_ahead() {
        // "mem" ranks behind "cpu", so it starts left of cpu's span even
        // though cpu is the only live sibling.
        let order = vec!["cpu".to_string(), "mem".to_string()];
        let siblings = vec![SiblingWindow::new("cpu", 896, 100)];
        let slot = find_slot(50, "mem", &strip(), &siblings, 4, &order);
        // Offset: 100 + 4 ahead. Start right = 896, x = 846.
        assert_eq!(slot.x, 846);
        assert!(slot.is_valid);
    }

    #[test]
    fn test_geometry_backstop_overrides_stale_order() {
        // Order claims nothing ranks ahead, but a live sibling occupies the
        // boundary span; the overlap pass still pushes left.
        let order = vec!["mem".to_string(), "cpu".to_string()];
        let siblings = vec![SiblingWindow::new("cpu", 900, 100)];
        let slot = find_slot(50, "mem", &strip(), &siblings, 4, &order);
        assert_eq!(slot.x, 846);
        assert!(slot.is_valid);
    }

    #[test]
    fn test_floor_clamps_and_invalidates() {
        // A widget wider than the space right of the floor cannot fit.
        let slot = find_slot(700, "huge", &strip(), &[], 4, &[]);
        assert_eq!(slot.x, 1280 / 3);
        assert!(!slot.is_valid);
        assert!(slot.available_width < 700);
    }

    #[test]
    fn test_fallback_inset_without_reserved_region() {
        let strip = StripGeometry {
            width: 1280,
            height: 40,
            reserved_left: None,
            fallback_inset: 200,
        };
        let slot = find_slot(50, "mem", &strip, &[], 4, &[]);
        assert_eq!(slot.x, 1280 - 200 - 50);
    }

    #[test]
    fn test_deterministic_for_identical_snapshots() {
        let siblings = vec![
            SiblingWindow::new("a", 900, 60),
            SiblingWindow::new("b", 830, 60),
        ];
        let first = find_slot(80, "c", &strip(), &siblings, 4, &[]);
        let second = find_slot(80, "c", &strip(), &siblings, 4, &[]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_excludes_own_window_from_collisions() {
        // The widget's current on-screen span must not collide with itself.
        let siblings = vec![SiblingWindow::new("mem", 940, 60)];
        let slot = find_slot(60, "mem", &strip(), &siblings, 4, &[]);
        assert_eq!(slot.x, 940);
    }
}
