mod cursor;
mod edit;
pub mod layout;
mod spin;
pub mod time;
pub mod validate;

pub use layout::{Cell, FieldLayout};
pub use spin::SpinDirection;
pub use time::{HourMode, TimeValue};
pub use validate::ValidationError;

use crate::terminal::input::{KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};
use crate::widget::{FieldAction, InteractionResult};

use self::cursor::{CursorState, NavKey, NavOutcome};
use self::spin::SpinPlan;

/// An editable `hh:mm:ss` / `hh:mm:ss xM` time field.
///
/// The field owns the canonical time plus the cursor state and interprets
/// key events one at a time: arrows and Tab move between cells, digits and
/// the AM/PM letters overtype the character under the cursor, Up and Down
/// step a cell or a single digit. Every accepted edit is validated as a
/// whole string before it is committed, so the display never shows an
/// invalid time.
pub struct TimeField {
    layout: FieldLayout,
    value: TimeValue,
    text: String,
    cursor: CursorState,
    focused: bool,
    listeners: Vec<Box<dyn FnMut(&str) + Send>>,
}

impl TimeField {
    /// A field showing midnight: `12:00:00 AM` or `00:00:00`.
    pub fn new(mode: HourMode) -> Self {
        let layout = FieldLayout::new(mode);
        let value = TimeValue::midnight();
        let text = value.render(mode);
        Self {
            layout,
            value,
            text,
            cursor: CursorState::at(0),
            focused: false,
            listeners: Vec::new(),
        }
    }

    /// Start from a display string in either format. A string that fails
    /// validation leaves the midnight default in place.
    pub fn with_value(mut self, initial: &str) -> Self {
        if let Ok(value) = validate::validate(initial) {
            self.value = value;
            self.text = value.render(self.layout.mode());
        }
        self
    }

    pub fn hour_mode(&self) -> HourMode {
        self.layout.mode()
    }

    /// The current display string.
    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn time(&self) -> TimeValue {
        self.value
    }

    /// Canonical 24-hour (hour, minute, second).
    pub fn time_components(&self) -> (u8, u8, u8) {
        (self.value.hour(), self.value.minute(), self.value.second())
    }

    /// Replace the value from a display string in either format; the field
    /// re-renders it in its own mode. The cursor stays where it was.
    pub fn set_value(&mut self, candidate: &str) -> Result<(), ValidationError> {
        let value = validate::validate(candidate)?;
        self.commit(value);
        Ok(())
    }

    /// Replace the value from canonical 24-hour components.
    pub fn set_time_components(
        &mut self,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<(), ValidationError> {
        let value = TimeValue::new(hour, minute, second)?;
        self.commit(value);
        Ok(())
    }

    /// Register a listener called with the display string after every
    /// committed change.
    pub fn on_value_changed(&mut self, listener: impl FnMut(&str) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn focus(&mut self) {
        self.focused = true;
        self.cursor = CursorState::at(0);
    }

    pub fn blur(&mut self) {
        self.focused = false;
        self.cursor = CursorState::at(0);
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Character index the next keystroke applies to.
    pub fn cursor(&self) -> usize {
        self.cursor.pos()
    }

    /// Normalized (start, end) selection span, end exclusive.
    pub fn selection(&self) -> Option<(usize, usize)> {
        self.cursor.selection()
    }

    /// Columns the field wants, including one of margin.
    pub fn preferred_width(&self) -> usize {
        self.layout.display_len() + 1
    }

    /// Step the cell or digit at the cursor, as the Up/Down keys do. Spin
    /// buttons in a host UI route through here.
    pub fn spin(&mut self, dir: SpinDirection) -> InteractionResult {
        self.apply_spin(dir)
    }

    /// Offer one key event to the field.
    ///
    /// Returns `handled: false` for keys the field does not own (Enter,
    /// Esc, control chords, Tab past either end) so the host can apply its
    /// defaults. Everything else is consumed, whether or not it changed
    /// anything.
    pub fn handle_key(&mut self, key: KeyEvent) -> InteractionResult {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            || key.modifiers.contains(KeyModifiers::ALT)
        {
            return InteractionResult::ignored();
        }
        let select = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Left => self.apply_nav(NavKey::Left, select),
            KeyCode::Right => self.apply_nav(NavKey::Right, select),
            KeyCode::Tab if select => self.apply_nav(NavKey::BackTab, false),
            KeyCode::Tab => self.apply_nav(NavKey::Tab, false),
            KeyCode::BackTab => self.apply_nav(NavKey::BackTab, false),
            KeyCode::Up => self.apply_spin(SpinDirection::Up),
            KeyCode::Down => self.apply_spin(SpinDirection::Down),
            // Cells are never emptied, deletion keys do nothing.
            KeyCode::Backspace | KeyCode::Delete => InteractionResult::consumed(),
            KeyCode::Char(ch) => self.apply_typed(ch),
            _ => InteractionResult::ignored(),
        }
    }

    /// Spans for one rendered line, with the selection highlighted while
    /// the field has focus.
    pub fn render_spans(&self) -> SpanLine {
        let selection = if self.focused { self.cursor.selection() } else { None };
        match selection {
            Some((start, end)) => {
                let highlight = Style::new().background(Color::Blue).color(Color::White);
                let mut line = SpanLine::new();
                if start > 0 {
                    line.push(Span::new(&self.text[..start]));
                }
                line.push(Span::styled(&self.text[start..end], highlight));
                if end < self.text.len() {
                    line.push(Span::new(&self.text[end..]));
                }
                line
            }
            None => vec![Span::new(self.text.clone())],
        }
    }

    fn commit(&mut self, value: TimeValue) {
        self.value = value;
        self.text = value.render(self.layout.mode());
        for listener in &mut self.listeners {
            listener(&self.text);
        }
    }

    fn changed(&self) -> InteractionResult {
        InteractionResult::with_action(FieldAction::ValueChanged {
            text: self.text.clone(),
        })
    }

    fn apply_nav(&mut self, key: NavKey, select: bool) -> InteractionResult {
        match cursor::navigate(self.cursor, &self.layout, key, select) {
            NavOutcome::Moved(next) => {
                self.cursor = next;
                InteractionResult::handled()
            }
            NavOutcome::Swallowed => InteractionResult::consumed(),
            NavOutcome::PassThrough => InteractionResult::ignored(),
        }
    }

    fn apply_typed(&mut self, ch: char) -> InteractionResult {
        if !ch.is_ascii_digit() && !matches!(ch, 'A' | 'P' | 'M' | ' ') {
            // Swallow stray printables so they cannot leak into the host.
            return InteractionResult::consumed();
        }
        // Overtyping a selection starts at its first character.
        let pos = match self.cursor.selection() {
            Some((start, _)) => start,
            None => self.cursor.pos(),
        };
        let whole_cell = self.cursor.is_whole_cell(&self.layout);
        let Some(candidate) = edit::apply_char(&self.text, pos, ch, whole_cell, &self.layout)
        else {
            return InteractionResult::consumed();
        };
        let Ok(value) = validate::validate(&candidate) else {
            return InteractionResult::consumed();
        };
        self.commit(value);
        self.cursor = CursorState::at(self.advance_from(pos));
        self.changed()
    }

    fn apply_spin(&mut self, dir: SpinDirection) -> InteractionResult {
        let pos = self.cursor.pos();
        match spin::plan(self.value, &self.text, &self.cursor, dir, &self.layout) {
            Some(SpinPlan::Cell(value)) => {
                let Some(cell) = self.layout.cell_at(pos) else {
                    return InteractionResult::consumed();
                };
                self.commit(value);
                self.cursor = CursorState::cell_selection(&self.layout, cell);
                self.changed()
            }
            Some(SpinPlan::Digit(ch)) => {
                let Some(candidate) = edit::apply_char(&self.text, pos, ch, false, &self.layout)
                else {
                    return InteractionResult::consumed();
                };
                let Ok(value) = validate::validate(&candidate) else {
                    return InteractionResult::consumed();
                };
                self.commit(value);
                // Keep the digit selected so the next Up/Down steps it too.
                self.cursor = CursorState::char_selection(pos);
                self.changed()
            }
            None => InteractionResult::consumed(),
        }
    }

    /// One editable position right of `pos`: within the cell it is the next
    /// character, at a cell end it hops the delimiter into the next cell,
    /// and at the end of the field it stays put.
    fn advance_from(&self, pos: usize) -> usize {
        let Some(cell) = self.layout.cell_at(pos) else {
            return pos;
        };
        if pos < self.layout.end(cell) {
            pos + 1
        } else if let Some(next) = self.layout.next_cell(cell) {
            self.layout.start(next)
        } else {
            pos
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::plain(code)
    }

    fn shifted(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::SHIFT)
    }

    fn field_12(value: &str) -> TimeField {
        let mut field = TimeField::new(HourMode::Hour12).with_value(value);
        field.focus();
        field
    }

    fn field_24(value: &str) -> TimeField {
        let mut field = TimeField::new(HourMode::Hour24).with_value(value);
        field.focus();
        field
    }

    #[test]
    fn new_fields_default_to_midnight() {
        assert_eq!(TimeField::new(HourMode::Hour12).value(), "12:00:00 AM");
        assert_eq!(TimeField::new(HourMode::Hour24).value(), "00:00:00");
        let field = TimeField::new(HourMode::Hour12).with_value("99:00:00");
        assert_eq!(field.value(), "12:00:00 AM");
    }

    #[test]
    fn up_then_down_restores_every_cell_across_wraparound() {
        let mut field = field_24("23:59:59");
        loop {
            let before = field.value().to_string();
            field.handle_key(key(KeyCode::Up));
            assert_ne!(field.value(), before);
            field.handle_key(key(KeyCode::Down));
            assert_eq!(field.value(), before);
            if !field.handle_key(key(KeyCode::Tab)).handled {
                break;
            }
        }

        let mut field = field_12("12:59:59 AM");
        loop {
            let before = field.value().to_string();
            field.handle_key(key(KeyCode::Down));
            field.handle_key(key(KeyCode::Up));
            assert_eq!(field.value(), before);
            if !field.handle_key(key(KeyCode::Tab)).handled {
                break;
            }
        }
    }

    #[test]
    fn up_without_selection_steps_the_hour_and_selects_the_cell() {
        let mut field = field_24("12:00:00");
        let result = field.handle_key(key(KeyCode::Up));
        assert!(result.handled);
        assert_eq!(field.value(), "13:00:00");
        assert_eq!(field.selection(), Some((0, 2)));
        assert_eq!(field.cursor(), 0);
    }

    #[test]
    fn typing_one_then_two_builds_a_twelve_over_a_selected_hour() {
        let mut field = field_12("11:30:00 PM");
        field.handle_key(shifted(KeyCode::Right));
        field.handle_key(shifted(KeyCode::Right));
        assert_eq!(field.selection(), Some((0, 2)));

        let result = field.handle_key(key(KeyCode::Char('1')));
        assert!(result.handled);
        assert_eq!(field.value(), "11:30:00 PM");
        assert_eq!(field.cursor(), 1);
        assert_eq!(field.selection(), None);

        field.handle_key(key(KeyCode::Char('2')));
        assert_eq!(field.value(), "12:30:00 PM");
        assert_eq!(field.time_components(), (12, 30, 0));
    }

    #[test]
    fn rejected_digit_leaves_display_and_cursor_alone() {
        let mut field = field_24("19:00:00");
        let result = field.handle_key(key(KeyCode::Char('2')));
        assert!(result.handled);
        assert!(!result.request_render);
        assert!(result.actions.is_empty());
        assert_eq!(field.value(), "19:00:00");
        assert_eq!(field.cursor(), 0);
    }

    #[test]
    fn hour_spin_crosses_midnight_in_twelve_hour_mode() {
        let mut field = field_12("11:59:59 PM");
        field.handle_key(key(KeyCode::Up));
        assert_eq!(field.value(), "12:59:59 AM");
        assert_eq!(field.time_components(), (0, 59, 59));
        field.handle_key(key(KeyCode::Down));
        assert_eq!(field.value(), "11:59:59 PM");
    }

    #[test]
    fn meridiem_cell_spins_by_twelve_hours() {
        let mut field = field_12(" 9:15:42 AM");
        for _ in 0..3 {
            field.handle_key(key(KeyCode::Tab));
        }
        assert_eq!(field.selection(), Some((9, 11)));
        field.handle_key(key(KeyCode::Up));
        assert_eq!(field.value(), " 9:15:42 PM");
        assert_eq!(field.time_components(), (21, 15, 42));
        field.handle_key(key(KeyCode::Down));
        assert_eq!(field.value(), " 9:15:42 AM");
    }

    #[test]
    fn single_digit_spin_keeps_the_digit_selected() {
        let mut field = field_24("12:30:00");
        for code in [KeyCode::Right, KeyCode::Right] {
            field.handle_key(key(code));
        }
        assert_eq!(field.cursor(), 3);
        field.handle_key(shifted(KeyCode::Right));
        assert_eq!(field.selection(), Some((3, 4)));

        field.handle_key(key(KeyCode::Up));
        assert_eq!(field.value(), "12:40:00");
        assert_eq!(field.selection(), Some((3, 4)));

        field.handle_key(key(KeyCode::Up));
        assert_eq!(field.value(), "12:50:00");
        field.handle_key(key(KeyCode::Up));
        assert_eq!(field.value(), "12:00:00");
    }

    #[test]
    fn navigation_skips_delimiters_in_both_directions() {
        let mut field = field_12("10:20:30 AM");
        field.handle_key(key(KeyCode::Right));
        assert_eq!(field.cursor(), 1);
        field.handle_key(key(KeyCode::Right));
        assert_eq!(field.cursor(), 3);
        for _ in 0..4 {
            field.handle_key(key(KeyCode::Right));
        }
        assert_eq!(field.cursor(), 9);
        field.handle_key(key(KeyCode::Left));
        assert_eq!(field.cursor(), 7);
    }

    #[test]
    fn right_at_the_field_end_is_swallowed() {
        let mut field = field_24("10:20:30");
        for _ in 0..5 {
            field.handle_key(key(KeyCode::Right));
        }
        assert_eq!(field.cursor(), 7);
        let result = field.handle_key(key(KeyCode::Right));
        assert!(result.handled);
        assert!(!result.request_render);
        assert_eq!(field.cursor(), 7);
    }

    #[test]
    fn left_at_the_field_start_defers_to_the_host() {
        let mut field = field_24("10:20:30");
        let result = field.handle_key(key(KeyCode::Left));
        assert!(!result.handled);
        assert_eq!(field.cursor(), 0);
    }

    #[test]
    fn tab_selects_whole_cells_and_passes_through_at_the_end() {
        let mut field = field_24("10:20:30");
        let result = field.handle_key(key(KeyCode::Tab));
        assert!(result.handled);
        assert_eq!(field.selection(), Some((3, 5)));
        field.handle_key(key(KeyCode::Tab));
        assert_eq!(field.selection(), Some((6, 8)));
        let result = field.handle_key(key(KeyCode::Tab));
        assert!(!result.handled);
        assert_eq!(field.selection(), Some((6, 8)));
    }

    #[test]
    fn shift_tab_walks_backwards_and_passes_through_at_the_hour() {
        let mut field = field_12("10:20:30 AM");
        for _ in 0..3 {
            field.handle_key(key(KeyCode::Tab));
        }
        assert_eq!(field.selection(), Some((9, 11)));
        field.handle_key(shifted(KeyCode::Tab));
        assert_eq!(field.selection(), Some((6, 8)));
        field.handle_key(key(KeyCode::BackTab));
        assert_eq!(field.selection(), Some((3, 5)));
        field.handle_key(key(KeyCode::BackTab));
        assert_eq!(field.selection(), Some((0, 2)));
        let result = field.handle_key(key(KeyCode::BackTab));
        assert!(!result.handled);
    }

    #[test]
    fn deletion_keys_are_swallowed_without_changes() {
        let mut field = field_24("10:20:30");
        for code in [KeyCode::Backspace, KeyCode::Delete] {
            let result = field.handle_key(key(code));
            assert!(result.handled);
            assert!(!result.request_render);
            assert_eq!(field.value(), "10:20:30");
        }
    }

    #[test]
    fn stray_printables_are_swallowed_but_chords_and_commands_pass() {
        let mut field = field_24("10:20:30");
        assert!(field.handle_key(key(KeyCode::Char('Z'))).handled);
        assert!(field.handle_key(key(KeyCode::Char('%'))).handled);
        assert_eq!(field.value(), "10:20:30");

        let chord = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(!field.handle_key(chord).handled);
        assert!(!field.handle_key(key(KeyCode::Enter)).handled);
        assert!(!field.handle_key(key(KeyCode::Esc)).handled);
        assert!(!field.handle_key(key(KeyCode::Home)).handled);
    }

    #[test]
    fn listener_fires_exactly_once_per_commit() {
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut field = field_24("10:20:30");
        field.on_value_changed(move |text| {
            sink.lock().expect("listener sink").push(text.to_string());
        });

        field.handle_key(key(KeyCode::Char('2')));
        field.handle_key(key(KeyCode::Tab));
        field.handle_key(key(KeyCode::Char('x')));
        field.handle_key(key(KeyCode::Up));
        field.set_value("11:59:59 PM").expect("valid value");
        assert!(field.set_value("25:00:00").is_err());

        let seen = seen.lock().expect("listener sink");
        assert_eq!(seen.as_slice(), &["20:20:30", "20:21:30", "23:59:59"]);
    }

    #[test]
    fn set_value_converts_between_formats() {
        let mut field = field_24("00:00:00");
        field.set_value("11:59:59 PM").expect("valid value");
        assert_eq!(field.value(), "23:59:59");

        let mut field = field_12("12:00:00 AM");
        field.set_value("23:59:59").expect("valid value");
        assert_eq!(field.value(), "11:59:59 PM");
        field.set_value("09:05:00 AM").expect("valid value");
        assert_eq!(field.value(), " 9:05:00 AM");
    }

    #[test]
    fn set_value_rejection_keeps_the_old_display() {
        let mut field = field_24("13:30:09");
        field.handle_key(key(KeyCode::Right));
        assert_eq!(field.set_value("25:00:00"), Err(ValidationError::HourRange));
        assert_eq!(field.value(), "13:30:09");
        assert_eq!(field.cursor(), 1);
    }

    #[test]
    fn set_time_components_checks_each_range() {
        let mut field = field_12("12:00:00 AM");
        field.set_time_components(13, 45, 9).expect("valid components");
        assert_eq!(field.value(), " 1:45:09 PM");
        assert_eq!(
            field.set_time_components(24, 0, 0),
            Err(ValidationError::HourRange)
        );
        assert_eq!(
            field.set_time_components(0, 60, 0),
            Err(ValidationError::MinuteRange)
        );
        assert_eq!(
            field.set_time_components(0, 0, 60),
            Err(ValidationError::SecondRange)
        );
        assert_eq!(field.value(), " 1:45:09 PM");
    }

    #[test]
    fn typing_a_meridiem_letter_flips_the_half_day() {
        let mut field = field_12(" 9:15:42 PM");
        for _ in 0..6 {
            field.handle_key(key(KeyCode::Right));
        }
        assert_eq!(field.cursor(), 9);
        let result = field.handle_key(key(KeyCode::Char('A')));
        assert!(result.handled);
        assert_eq!(field.value(), " 9:15:42 AM");
        assert_eq!(field.time_components(), (9, 15, 42));
        assert_eq!(field.cursor(), 10);

        // The trailing M is fixed; nothing types over it.
        let result = field.handle_key(key(KeyCode::Char('P')));
        assert!(result.handled);
        assert_eq!(field.value(), " 9:15:42 AM");
    }

    #[test]
    fn typing_a_blank_over_the_tens_advances_into_the_ones() {
        let mut field = field_12("11:30:00 PM");
        field.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(field.value(), " 1:30:00 PM");
        assert_eq!(field.cursor(), 1);
        field.handle_key(key(KeyCode::Char('9')));
        assert_eq!(field.value(), " 9:30:00 PM");
    }

    #[test]
    fn committing_the_last_digit_of_a_cell_hops_the_delimiter() {
        let mut field = field_24("13:30:00");
        field.handle_key(key(KeyCode::Right));
        assert_eq!(field.cursor(), 1);
        field.handle_key(key(KeyCode::Char('4')));
        assert_eq!(field.value(), "14:30:00");
        assert_eq!(field.cursor(), 3);
    }

    #[test]
    fn typing_into_a_selected_minute_cell_zero_pads() {
        let mut field = field_24("12:45:00");
        field.handle_key(key(KeyCode::Tab));
        assert_eq!(field.selection(), Some((3, 5)));
        field.handle_key(key(KeyCode::Char('7')));
        assert_eq!(field.value(), "12:07:00");
        assert_eq!(field.cursor(), 4);
        assert_eq!(field.selection(), None);
    }

    #[test]
    fn focus_and_blur_reset_the_cursor() {
        let mut field = field_24("12:45:00");
        field.handle_key(key(KeyCode::Tab));
        assert_eq!(field.selection(), Some((3, 5)));
        field.blur();
        assert!(!field.is_focused());
        assert_eq!(field.cursor(), 0);
        assert_eq!(field.selection(), None);
        field.focus();
        assert!(field.is_focused());
        assert_eq!(field.cursor(), 0);
    }

    #[test]
    fn spin_buttons_behave_like_the_arrow_keys() {
        let mut field = field_24("12:00:00");
        let result = field.spin(SpinDirection::Up);
        assert!(result.handled);
        assert_eq!(field.value(), "13:00:00");
        assert_eq!(field.selection(), Some((0, 2)));
        field.spin(SpinDirection::Down);
        assert_eq!(field.value(), "12:00:00");
    }

    #[test]
    fn render_spans_highlight_the_selection_only_while_focused() {
        let mut field = field_24("12:45:00");
        field.handle_key(key(KeyCode::Tab));
        let line = field.render_spans();
        assert_eq!(line.len(), 3);
        assert_eq!(line[0].text, "12:");
        assert_eq!(line[1].text, "45");
        assert!(line[1].style.background.is_some());
        assert_eq!(line[2].text, ":00");

        field.blur();
        let line = field.render_spans();
        assert_eq!(line.len(), 1);
        assert_eq!(line[0].text, "12:45:00");
    }

    #[test]
    fn preferred_width_tracks_the_display_format() {
        assert_eq!(TimeField::new(HourMode::Hour24).preferred_width(), 9);
        assert_eq!(TimeField::new(HourMode::Hour12).preferred_width(), 12);
    }
}
