//! On-screen controls and click resolution.
//!
//! The panel is a fixed grid of buttons plus one switch. Each control
//! carries the [`PanelCommand`] it emits, so resolving a tap is a lookup
//! rather than a callback.
//!
//! A control is *clicked* when the pointer goes down on it and comes up
//! while the last pressed point is still inside it. Sliding off a control
//! before lifting cancels the click.
//!
//! # Example
//!
//! ```rust
//! use cyd_remote::panel::{ControlPanel, PanelLayout};
//! use cyd_remote::touch::{NormalizedPoint, PointerState, ScreenSize};
//! use cyd_remote::PanelCommand;
//!
//! let layout = PanelLayout::standard(ScreenSize::new(240, 320), &[10, 30, 60]);
//! let mut panel = ControlPanel::new(layout);
//!
//! // Top-left control is "Prop Start"
//! let p = NormalizedPoint::new(20, 20);
//! assert_eq!(panel.handle(PointerState::Pressed(p)), None);
//! assert_eq!(panel.handle(PointerState::Released), Some(PanelCommand::PropStart));
//! ```

use heapless::String as HString;
use heapless::Vec as HVec;

use crate::commands::{CommandLabel, PanelCommand};
use crate::config::MAX_RPM_PRESETS;
use crate::touch::{NormalizedPoint, PointerState, ScreenSize};

/// Maximum number of controls on one panel.
pub const MAX_CONTROLS: usize = 16;

/// Maximum length of the status line.
pub const MAX_STATUS_LEN: usize = 32;

/// Space around the grid, in pixels.
pub const MARGIN: i32 = 8;

/// Space between rows and between controls in a row.
pub const GAP: i32 = 8;

/// Height reserved at the bottom for the status line.
pub const STATUS_HEIGHT: i32 = 24;

/// Status text shown under the controls.
pub type StatusLine = HString<MAX_STATUS_LEN>;

/// Control storage.
pub type Controls = HVec<Control, MAX_CONTROLS>;

// ============================================================================
// Geometry
// ============================================================================

/// Axis-aligned rectangle in screen coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
}

impl Rect {
    /// Creates a rectangle.
    pub const fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns true if the point lies inside (right and bottom edges excluded).
    pub fn contains(&self, point: NormalizedPoint) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width as i32
            && point.y >= self.y
            && point.y < self.y + self.height as i32
    }

    /// Centre of the rectangle.
    pub fn center(&self) -> NormalizedPoint {
        NormalizedPoint::new(
            self.x + self.width as i32 / 2,
            self.y + self.height as i32 / 2,
        )
    }
}

// ============================================================================
// Controls
// ============================================================================

/// What a control does when clicked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKind {
    /// Emits the same command on every click.
    Button(PanelCommand),
    /// Two-state toggle; emits `on` when switched on and `off` when
    /// switched off.
    Switch {
        /// Command sent when the switch turns on.
        on: PanelCommand,
        /// Command sent when the switch turns off.
        off: PanelCommand,
        /// Current state.
        state: bool,
    },
}

/// One on-screen control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Control {
    /// Caption drawn on the control.
    pub label: CommandLabel,
    /// Hit area and drawn bounds.
    pub rect: Rect,
    /// Behaviour on click.
    pub kind: ControlKind,
}

impl Control {
    /// A button labelled after its command.
    pub fn button(cmd: PanelCommand, rect: Rect) -> Self {
        Self {
            label: cmd.label(),
            rect,
            kind: ControlKind::Button(cmd),
        }
    }

    /// A switch starting in the off state.
    pub fn switch(label: &str, on: PanelCommand, off: PanelCommand, rect: Rect) -> Self {
        let mut caption = CommandLabel::new();
        let _ = caption.push_str(label);
        Self {
            label: caption,
            rect,
            kind: ControlKind::Switch {
                on,
                off,
                state: false,
            },
        }
    }

    /// Applies a click and returns the command to send.
    pub fn click(&mut self) -> PanelCommand {
        match &mut self.kind {
            ControlKind::Button(cmd) => *cmd,
            ControlKind::Switch { on, off, state } => {
                *state = !*state;
                if *state {
                    *on
                } else {
                    *off
                }
            }
        }
    }

    /// Switch state, or `None` for buttons.
    pub fn switch_state(&self) -> Option<bool> {
        match self.kind {
            ControlKind::Button(_) => None,
            ControlKind::Switch { state, .. } => Some(state),
        }
    }
}

/// Row template for the standard layout.
enum Slot {
    Button(PanelCommand),
    Lights,
}

const FIXED_ROWS: [&[Slot]; 4] = [
    &[
        Slot::Button(PanelCommand::PropStart),
        Slot::Button(PanelCommand::PropStop),
    ],
    &[
        Slot::Button(PanelCommand::WeightStart),
        Slot::Button(PanelCommand::WeightStop),
    ],
    &[
        Slot::Button(PanelCommand::MotionLeft),
        Slot::Button(PanelCommand::MotionRight),
    ],
    &[Slot::Lights],
];

/// Arrangement of controls on the screen.
#[derive(Clone, Debug)]
pub struct PanelLayout {
    screen: ScreenSize,
    controls: Controls,
}

impl PanelLayout {
    /// An empty layout.
    pub fn new(screen: ScreenSize) -> Self {
        Self {
            screen,
            controls: Controls::new(),
        }
    }

    /// The standard remote-control panel.
    ///
    /// Rows of equal-width controls: prop start/stop, weight start/stop,
    /// motion left/right, the lights switch, then one button per RPM preset
    /// (at most [`MAX_RPM_PRESETS`]). The preset row is left out when
    /// `rpm_presets` is empty.
    pub fn standard(screen: ScreenSize, rpm_presets: &[u32]) -> Self {
        let mut layout = Self::new(screen);
        let presets = &rpm_presets[..rpm_presets.len().min(MAX_RPM_PRESETS)];
        let rows = FIXED_ROWS.len() as i32 + i32::from(!presets.is_empty());

        for (row, slots) in FIXED_ROWS.iter().enumerate() {
            for (col, slot) in slots.iter().enumerate() {
                let rect = layout.cell(row as i32, rows, col as i32, slots.len() as i32);
                let control = match slot {
                    Slot::Button(cmd) => Control::button(*cmd, rect),
                    Slot::Lights => Control::switch(
                        "Lights",
                        PanelCommand::LightsOn,
                        PanelCommand::LightsOff,
                        rect,
                    ),
                };
                layout.push(control);
            }
        }

        for (col, rpm) in presets.iter().enumerate() {
            let rect = layout.cell(rows - 1, rows, col as i32, presets.len() as i32);
            layout.push(Control::button(PanelCommand::SetRpm(*rpm), rect));
        }

        layout
    }

    /// Adds a control. Returns false when the layout is full.
    pub fn push(&mut self, control: Control) -> bool {
        if self.controls.push(control).is_err() {
            log::warn!("panel layout full, control dropped");
            return false;
        }
        true
    }

    /// Screen the layout was built for.
    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    /// The controls in drawing order.
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Band at the bottom of the screen reserved for the status line.
    pub fn status_area(&self) -> Rect {
        let width = (self.screen.width as i32 - 2 * MARGIN).max(1);
        let y = (self.screen.height as i32 - MARGIN - STATUS_HEIGHT).max(0);
        Rect::new(MARGIN, y, width as u16, STATUS_HEIGHT as u16)
    }

    /// Index of the control under `point`.
    pub fn hit(&self, point: NormalizedPoint) -> Option<usize> {
        self.controls.iter().position(|c| c.rect.contains(point))
    }

    fn cell(&self, row: i32, rows: i32, col: i32, cols: i32) -> Rect {
        let grid_w = self.screen.width as i32 - 2 * MARGIN;
        let grid_h = self.screen.height as i32 - 2 * MARGIN - STATUS_HEIGHT;
        let w = ((grid_w - GAP * (cols - 1)) / cols).max(1);
        let h = ((grid_h - GAP * (rows - 1)) / rows).max(1);
        Rect::new(
            MARGIN + col * (w + GAP),
            MARGIN + row * (h + GAP),
            w as u16,
            h as u16,
        )
    }
}

// ============================================================================
// Interaction
// ============================================================================

/// What the display needs to draw one frame.
#[derive(Clone, Copy, Debug)]
pub struct PanelView<'a> {
    /// Screen the controls are laid out for.
    pub screen: ScreenSize,
    /// Controls in drawing order.
    pub controls: &'a [Control],
    /// Control currently held down with the pointer still on it.
    pub highlighted: Option<usize>,
    /// Status line, if one is showing.
    pub status: Option<&'a str>,
    /// Where to draw the status line.
    pub status_area: Rect,
}

/// Resolves pointer states into clicks.
#[derive(Clone, Debug)]
pub struct ControlPanel {
    layout: PanelLayout,
    pressed: Option<usize>,
    last_point: Option<NormalizedPoint>,
    status: Option<StatusLine>,
}

impl ControlPanel {
    /// Creates a panel with nothing pressed.
    pub fn new(layout: PanelLayout) -> Self {
        Self {
            layout,
            pressed: None,
            last_point: None,
            status: None,
        }
    }

    /// Feeds one pointer state. Returns the command of a completed click.
    pub fn handle(&mut self, pointer: PointerState) -> Option<PanelCommand> {
        match pointer {
            PointerState::Pressed(point) => {
                // Only the initial press selects a control
                if self.last_point.is_none() {
                    self.pressed = self.layout.hit(point);
                }
                self.last_point = Some(point);
                None
            }
            PointerState::Released => {
                let last = self.last_point.take();
                let index = self.pressed.take()?;
                let control = self.layout.controls.get_mut(index)?;
                if control.rect.contains(last?) {
                    Some(control.click())
                } else {
                    log::debug!("click on '{}' cancelled", control.label);
                    None
                }
            }
        }
    }

    /// The control held down with the pointer still over it.
    pub fn highlighted(&self) -> Option<usize> {
        let index = self.pressed?;
        let point = self.last_point?;
        self.layout
            .controls
            .get(index)
            .filter(|c| c.rect.contains(point))
            .map(|_| index)
    }

    /// Replaces the status line. Text beyond [`MAX_STATUS_LEN`] is cut.
    pub fn set_status(&mut self, text: &str) {
        let mut end = text.len().min(MAX_STATUS_LEN);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let mut line = StatusLine::new();
        let _ = line.push_str(&text[..end]);
        self.status = Some(line);
    }

    /// Removes the status line.
    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Current status line.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// The layout being driven.
    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> PanelView<'_> {
        PanelView {
            screen: self.layout.screen,
            controls: self.layout.controls(),
            highlighted: self.highlighted(),
            status: self.status(),
            status_area: self.layout.status_area(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> PanelLayout {
        PanelLayout::standard(ScreenSize::default(), &[10, 30, 60])
    }

    fn centre_of(layout: &PanelLayout, cmd: PanelCommand) -> NormalizedPoint {
        layout
            .controls()
            .iter()
            .find(|c| c.kind == ControlKind::Button(cmd))
            .map(|c| c.rect.center())
            .unwrap()
    }

    fn click(panel: &mut ControlPanel, p: NormalizedPoint) -> Option<PanelCommand> {
        assert_eq!(panel.handle(PointerState::Pressed(p)), None);
        panel.handle(PointerState::Released)
    }

    // =========================================================================
    // Rect Tests
    // =========================================================================

    #[test]
    fn rect_contains_excludes_far_edges() {
        let r = Rect::new(10, 10, 20, 20);
        assert!(r.contains(NormalizedPoint::new(10, 10)));
        assert!(r.contains(NormalizedPoint::new(29, 29)));
        assert!(!r.contains(NormalizedPoint::new(30, 15)));
        assert!(!r.contains(NormalizedPoint::new(15, 9)));
    }

    // =========================================================================
    // Layout Tests
    // =========================================================================

    #[test]
    fn standard_layout_has_every_command() {
        let layout = standard();
        assert_eq!(layout.controls().len(), 10);
        for cmd in [
            PanelCommand::PropStart,
            PanelCommand::PropStop,
            PanelCommand::WeightStart,
            PanelCommand::WeightStop,
            PanelCommand::MotionLeft,
            PanelCommand::MotionRight,
            PanelCommand::SetRpm(10),
            PanelCommand::SetRpm(30),
            PanelCommand::SetRpm(60),
        ] {
            let _ = centre_of(&layout, cmd);
        }
        assert_eq!(
            layout.controls().iter().filter(|c| c.switch_state().is_some()).count(),
            1
        );
    }

    #[test]
    fn standard_layout_fits_screen_without_overlap() {
        let layout = standard();
        let screen = layout.screen();
        let status = layout.status_area();
        let controls = layout.controls();
        for (i, c) in controls.iter().enumerate() {
            assert!(c.rect.x >= 0 && c.rect.y >= 0);
            assert!(c.rect.x + c.rect.width as i32 <= screen.width as i32);
            assert!(c.rect.y + c.rect.height as i32 <= status.y);
            for other in &controls[i + 1..] {
                assert!(!c.rect.contains(other.rect.center()));
            }
        }
    }

    #[test]
    fn presets_are_capped() {
        let layout = PanelLayout::standard(ScreenSize::default(), &[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(layout.controls().len(), 7 + MAX_RPM_PRESETS);
    }

    #[test]
    fn empty_presets_drop_the_row() {
        let layout = PanelLayout::standard(ScreenSize::default(), &[]);
        assert_eq!(layout.controls().len(), 7);
        assert!(layout.controls().iter().all(|c| c.rect.height > 49));
    }

    #[test]
    fn push_refuses_past_capacity() {
        let mut layout = PanelLayout::new(ScreenSize::default());
        let rect = Rect::new(0, 0, 10, 10);
        for _ in 0..MAX_CONTROLS {
            assert!(layout.push(Control::button(PanelCommand::PropStop, rect)));
        }
        assert!(!layout.push(Control::button(PanelCommand::PropStop, rect)));
    }

    // =========================================================================
    // Click Tests
    // =========================================================================

    #[test]
    fn press_and_release_inside_clicks_once() {
        let layout = standard();
        let p = centre_of(&layout, PanelCommand::WeightStop);
        let mut panel = ControlPanel::new(layout);
        assert_eq!(click(&mut panel, p), Some(PanelCommand::WeightStop));
        assert_eq!(panel.handle(PointerState::Released), None);
    }

    #[test]
    fn holding_does_not_repeat() {
        let layout = standard();
        let p = centre_of(&layout, PanelCommand::PropStart);
        let mut panel = ControlPanel::new(layout);
        for _ in 0..50 {
            assert_eq!(panel.handle(PointerState::Pressed(p)), None);
        }
        assert_eq!(
            panel.handle(PointerState::Released),
            Some(PanelCommand::PropStart)
        );
    }

    #[test]
    fn dragging_off_cancels() {
        let layout = standard();
        let start = centre_of(&layout, PanelCommand::MotionLeft);
        let other = centre_of(&layout, PanelCommand::MotionRight);
        let mut panel = ControlPanel::new(layout);

        panel.handle(PointerState::Pressed(start));
        assert_eq!(panel.highlighted(), Some(4));
        panel.handle(PointerState::Pressed(other));
        assert_eq!(panel.highlighted(), None);
        assert_eq!(panel.handle(PointerState::Released), None);
    }

    #[test]
    fn sliding_onto_a_control_does_not_click_it() {
        let layout = standard();
        let other = centre_of(&layout, PanelCommand::PropStop);
        let mut panel = ControlPanel::new(layout);

        panel.handle(PointerState::Pressed(NormalizedPoint::new(2, 2)));
        panel.handle(PointerState::Pressed(other));
        assert_eq!(panel.handle(PointerState::Released), None);
    }

    #[test]
    fn switch_alternates() {
        let layout = standard();
        let p = layout
            .controls()
            .iter()
            .find(|c| c.switch_state().is_some())
            .map(|c| c.rect.center())
            .unwrap();
        let mut panel = ControlPanel::new(layout);

        assert_eq!(click(&mut panel, p), Some(PanelCommand::LightsOn));
        assert_eq!(click(&mut panel, p), Some(PanelCommand::LightsOff));
        assert_eq!(click(&mut panel, p), Some(PanelCommand::LightsOn));
    }

    // =========================================================================
    // View Tests
    // =========================================================================

    #[test]
    fn status_is_truncated() {
        let mut panel = ControlPanel::new(standard());
        panel.set_status(&"x".repeat(100));
        assert_eq!(panel.status().map(str::len), Some(MAX_STATUS_LEN));
        panel.clear_status();
        assert_eq!(panel.view().status, None);
    }

    #[test]
    fn view_reflects_panel() {
        let mut panel = ControlPanel::new(standard());
        panel.set_status("Sent: PROP_START");
        let view = panel.view();
        assert_eq!(view.controls.len(), 10);
        assert_eq!(view.status, Some("Sent: PROP_START"));
        assert_eq!(view.highlighted, None);
        assert_eq!(view.screen, ScreenSize::default());
    }
}
