use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

use crate::Coord;
use crate::events::AppEvent;
use crate::events::EditEvent;
use crate::events::Event;
use crate::events::SimEvent;
use crate::render::CELL_WIDTH;

/// Where the grid sits on the terminal, used to map clicks back to cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// Terminal column of the left edge of the grid
    pub col: u16,

    /// Terminal row of the top edge of the grid
    pub row: u16,
}

impl Viewport {
    /// The grid cell under terminal cell `(column, row)`. Points left of or above the grid map
    /// to `None`; points right of or below it map to cells the simulation will refuse.
    pub fn cell_at(&self, column: u16, row: u16) -> Option<(Coord, Coord)> {
        let dx = column.checked_sub(self.col)?;
        let dy = row.checked_sub(self.row)?;

        Some(((dx / CELL_WIDTH) as Coord, dy as Coord))
    }
}

/// Converts a crossterm event into a turmite event.
///
/// While `editing` is set, keys go to the instruction line instead of the simulation.
pub fn convert_event(event: CrossTermEvent, editing: bool, viewport: Viewport) -> Option<Event> {
    match event {
        CrossTermEvent::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            if is_interrupt(&key_event) {
                return Some(Event::App(AppEvent::Exit));
            }

            if editing {
                convert_edit_key(key_event).map(|e| Event::App(AppEvent::EditEvent(e)))
            } else {
                convert_key(key_event)
            }
        }
        CrossTermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) if !editing => {
            let (x, y) = viewport.cell_at(column, row)?;

            Some(Event::Sim(SimEvent::Spawn { x, y }))
        }
        _ => None,
    }
}

fn is_interrupt(key_event: &KeyEvent) -> bool {
    matches!(
        key_event,
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
    )
}

fn convert_key(key_event: KeyEvent) -> Option<Event> {
    match key_event.code {
        KeyCode::Char('q') => Some(Event::App(AppEvent::Exit)),
        KeyCode::Char(' ') => Some(Event::Sim(SimEvent::TogglePause)),
        KeyCode::Char('r' | 'R') => Some(Event::Sim(SimEvent::Reset)),
        KeyCode::Char('i') => Some(Event::App(AppEvent::EditEvent(EditEvent::Start))),
        _ => None,
    }
}

fn convert_edit_key(key_event: KeyEvent) -> Option<EditEvent> {
    match key_event.code {
        KeyCode::Enter => Some(EditEvent::Commit),
        KeyCode::Esc => Some(EditEvent::Cancel),
        KeyCode::Backspace => Some(EditEvent::Pop),
        KeyCode::Char(c) => Some(EditEvent::Push(c)),
        _ => None,
    }
}

/// The instruction line being typed by the user
#[derive(Debug, Default)]
pub struct LineEditor {
    line: Option<String>,
}

impl LineEditor {
    pub fn is_editing(&self) -> bool {
        self.line.is_some()
    }

    pub fn line(&self) -> Option<&str> {
        self.line.as_deref()
    }

    /// Apply an edit. On commit, returns the instructions to load.
    pub fn apply(&mut self, event: EditEvent) -> Option<SimEvent> {
        match event {
            EditEvent::Start => {
                self.line = Some(String::new());

                None
            }
            EditEvent::Push(c) => {
                if let Some(line) = self.line.as_mut() {
                    line.push(c);
                }

                None
            }
            EditEvent::Pop => {
                if let Some(line) = self.line.as_mut() {
                    line.pop();
                }

                None
            }
            EditEvent::Commit => self.line.take().map(SimEvent::SetInstructions),
            EditEvent::Cancel => {
                self.line = None;

                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::Event as CrossTermEvent;
    use crossterm::event::KeyCode;
    use crossterm::event::KeyEvent;
    use crossterm::event::KeyModifiers;
    use crossterm::event::MouseButton;
    use crossterm::event::MouseEvent;
    use crossterm::event::MouseEventKind;

    use super::LineEditor;
    use super::Viewport;
    use super::convert_event;
    use crate::events::AppEvent;
    use crate::events::EditEvent;
    use crate::events::Event;
    use crate::events::SimEvent;

    fn key(code: KeyCode) -> CrossTermEvent {
        CrossTermEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> CrossTermEvent {
        CrossTermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn sim_event(event: Option<Event>) -> Option<SimEvent> {
        match event {
            Some(Event::Sim(e)) => Some(e),
            _ => None,
        }
    }

    #[test]
    fn keys() {
        let vp = Viewport::default();

        assert_eq!(
            sim_event(convert_event(key(KeyCode::Char(' ')), false, vp)),
            Some(SimEvent::TogglePause)
        );
        assert_eq!(
            sim_event(convert_event(key(KeyCode::Char('r')), false, vp)),
            Some(SimEvent::Reset)
        );
        assert!(matches!(
            convert_event(key(KeyCode::Char('q')), false, vp),
            Some(Event::App(AppEvent::Exit))
        ));
        assert!(convert_event(key(KeyCode::Char('z')), false, vp).is_none());
    }

    #[test]
    fn shift_r_resets() {
        let event = CrossTermEvent::Key(KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT));

        assert_eq!(
            sim_event(convert_event(event, false, Viewport::default())),
            Some(SimEvent::Reset)
        );
    }

    #[test]
    fn ctrl_c_exits_while_editing() {
        let event = CrossTermEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert!(matches!(
            convert_event(event, true, Viewport::default()),
            Some(Event::App(AppEvent::Exit))
        ));
    }

    #[test]
    fn editing_captures_keys() {
        let vp = Viewport::default();

        assert!(matches!(
            convert_event(key(KeyCode::Char('r')), true, vp),
            Some(Event::App(AppEvent::EditEvent(EditEvent::Push('r'))))
        ));
        assert!(matches!(
            convert_event(key(KeyCode::Enter), true, vp),
            Some(Event::App(AppEvent::EditEvent(EditEvent::Commit)))
        ));
    }

    #[test]
    fn click_maps_to_cell() {
        let vp = Viewport { col: 2, row: 1 };

        assert_eq!(
            sim_event(convert_event(click(7, 4), false, vp)),
            Some(SimEvent::Spawn { x: 2, y: 3 })
        );

        // Left of the grid
        assert!(convert_event(click(1, 4), false, vp).is_none());

        // Clicks are ignored while typing
        assert!(convert_event(click(7, 4), true, vp).is_none());
    }

    #[test]
    fn line_editor() {
        let mut editor = LineEditor::default();

        assert!(!editor.is_editing());
        assert_eq!(editor.apply(EditEvent::Push('L')), None);
        assert_eq!(editor.line(), None);

        editor.apply(EditEvent::Start);
        editor.apply(EditEvent::Push('L'));
        editor.apply(EditEvent::Push('x'));
        editor.apply(EditEvent::Pop);
        editor.apply(EditEvent::Push('R'));

        assert_eq!(editor.line(), Some("LR"));
        assert_eq!(
            editor.apply(EditEvent::Commit),
            Some(SimEvent::SetInstructions("LR".to_string()))
        );
        assert!(!editor.is_editing());

        editor.apply(EditEvent::Start);
        editor.apply(EditEvent::Push('L'));
        assert_eq!(editor.apply(EditEvent::Cancel), None);
        assert!(!editor.is_editing());
    }
}
