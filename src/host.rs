use crate::field::{SpinDirection, TimeField, ValidationError};
use crate::terminal::input::KeyEvent;
use crate::widget::InteractionResult;

/// A host-owned single-line text surface a `TimeField` can drive: it
/// displays the text and owns the native cursor and selection.
pub trait TextHost {
    fn text(&self) -> String;
    fn set_text(&mut self, text: &str);
    fn set_cursor(&mut self, pos: usize);
    fn set_selection(&mut self, start: usize, end: usize);
    fn clear_selection(&mut self);
}

/// Keeps a `TextHost` mirroring a `TimeField`.
///
/// Routes key events and spins through the field, then pushes the display
/// string, selection and cursor back to the host. Text goes first because
/// most native surfaces reset their cursor and selection when their text
/// is replaced; the field's cursor state is re-asserted right after.
pub struct HostBinding<H: TextHost> {
    field: TimeField,
    host: H,
}

impl<H: TextHost> HostBinding<H> {
    pub fn new(field: TimeField, host: H) -> Self {
        let mut binding = Self { field, host };
        binding.sync();
        binding
    }

    pub fn field(&self) -> &TimeField {
        &self.field
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_parts(self) -> (TimeField, H) {
        (self.field, self.host)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> InteractionResult {
        let result = self.field.handle_key(key);
        if result.request_render {
            self.sync();
        }
        result
    }

    pub fn spin(&mut self, dir: SpinDirection) -> InteractionResult {
        let result = self.field.spin(dir);
        if result.request_render {
            self.sync();
        }
        result
    }

    pub fn set_value(&mut self, candidate: &str) -> Result<(), ValidationError> {
        self.field.set_value(candidate)?;
        self.sync();
        Ok(())
    }

    pub fn focus(&mut self) {
        self.field.focus();
        self.sync();
    }

    pub fn blur(&mut self) {
        self.field.blur();
        self.sync();
    }

    fn sync(&mut self) {
        if self.host.text() != self.field.value() {
            self.host.set_text(self.field.value());
        }
        match self.field.selection() {
            Some((start, end)) => self.host.set_selection(start, end),
            None => self.host.clear_selection(),
        }
        self.host.set_cursor(self.field.cursor());
    }
}
