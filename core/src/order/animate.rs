//! Per-frame convergence of windows toward their target slots.
//!
//! A pure tick: the caller feeds current and target positions, gets back
//! updated positions and a converged flag, and decides whether to keep
//! ticking. Nothing here owns a timer.

/// Ease `current` toward `target` by `factor`, snapping once within
/// `epsilon` px.
pub fn tick_toward(current: f32, target: f32, factor: f32, epsilon: f32) -> f32 {
    let next = current + (target - current) * factor;
    if (target - next).abs() <= epsilon {
        target
    } else {
        next
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlideEntry {
    pub name: String,
    pub current: f32,
    pub target: f32,
}

impl SlideEntry {
    pub fn arrived(&self) -> bool {
        self.current == self.target
    }
}

/// A set of windows sliding toward per-window targets.
#[derive(Debug, Clone, Default)]
pub struct SlideAnimation {
    entries: Vec<SlideEntry>,
}

impl SlideAnimation {
    /// Set (or update) a window's target. A window not yet tracked starts
    /// from `current`; a tracked window keeps its animated position so a
    /// retargeted slide never jumps.
    pub fn set_target(&mut self, name: &str, current: f32, target: f32) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.target = target,
            None => self.entries.push(SlideEntry {
                name: name.to_string(),
                current,
                target,
            }),
        }
    }

    /// Drop windows that are no longer part of the slide.
    pub fn retain(&mut self, keep: impl Fn(&str) -> bool) {
        self.entries.retain(|e| keep(&e.name));
    }

    /// One animation step. Returns true when every window reached its
    /// target.
    pub fn tick(&mut self, factor: f32, epsilon: f32) -> bool {
        let mut converged = true;
        for entry in &mut self.entries {
            entry.current = tick_toward(entry.current, entry.target, factor, epsilon);
            converged &= entry.arrived();
        }
        converged
    }

    /// Current animated positions, rounded to whole pixels.
    pub fn positions(&self) -> impl Iterator<Item = (&str, i32)> {
        self.entries
            .iter()
            .map(|e| (e.name.as_str(), e.current.round() as i32))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_moves_toward_target() {
        let next = tick_toward(0.0, 100.0, 0.25, 1.0);
        assert_eq!(next, 25.0);
    }

    #[test]
    fn test_tick_snaps_within_epsilon() {
        assert_eq!(tick_toward(99.0, 100.0, 0.25, 1.0), 100.0);
    }

    #[test]
    fn test_animation_converges() {
        let mut slide = SlideAnimation::default();
        slide.set_target("cpu", 0.0, 80.0);
        slide.set_target("mem", 200.0, 120.0);

        let mut steps = 0;
        while !slide.tick(0.25, 1.0) {
            steps += 1;
            assert!(steps < 100, "animation failed to converge");
        }
        let positions: Vec<_> = slide.positions().collect();
        assert!(positions.contains(&("cpu", 80)));
        assert!(positions.contains(&("mem", 120)));
    }

    #[test]
    fn test_retarget_keeps_animated_position() {
        let mut slide = SlideAnimation::default();
        slide.set_target("cpu", 0.0, 100.0);
        slide.tick(0.5, 0.1);
        // Retarget mid-flight; the animated position (50) must be kept.
        slide.set_target("cpu", 999.0, 60.0);
        let (_, pos) = slide.positions().next().expect("entry");
        assert_eq!(pos, 50);
    }
}
