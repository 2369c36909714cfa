//! Form field value objects

/// How a field's value is edited and shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    /// Rendered as bullets
    Secret,
    /// Digits only
    Number,
    /// Yes/no, flipped with the space bar
    Flag,
}

const FLAG_ON: &str = "yes";
const FLAG_OFF: &str = "no";

/// A single input with its label and value
#[derive(Debug, Clone, Default)]
pub struct FormField {
    pub label: String,
    pub value: String,
    pub kind: FieldKind,
}

impl FormField {
    /// Create a new text field
    pub fn text(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
            kind: FieldKind::Text,
        }
    }

    /// Create a new masked field
    pub fn secret(label: &str) -> Self {
        Self {
            kind: FieldKind::Secret,
            ..Self::text(label)
        }
    }

    /// Create a numeric field with an initial value
    pub fn number(label: &str, value: i64) -> Self {
        Self {
            kind: FieldKind::Number,
            value: value.to_string(),
            ..Self::text(label)
        }
    }

    /// Create a yes/no field
    pub fn flag(label: &str, on: bool) -> Self {
        Self {
            kind: FieldKind::Flag,
            value: if on { FLAG_ON } else { FLAG_OFF }.to_string(),
            ..Self::text(label)
        }
    }

    /// Replace the value, e.g. when editing an existing record
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn as_text(&self) -> &str {
        &self.value
    }

    /// Parsed number; `None` when blank or out of range
    pub fn as_number<T: std::str::FromStr>(&self) -> Option<T> {
        self.value.trim().parse().ok()
    }

    pub fn is_on(&self) -> bool {
        self.value == FLAG_ON
    }

    /// Trimmed value, `None` when blank
    pub fn optional(&self) -> Option<String> {
        let value = self.value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        match self.kind {
            FieldKind::Text | FieldKind::Secret => self.value.push(c),
            FieldKind::Number => {
                if c.is_ascii_digit() {
                    self.value.push(c);
                }
            }
            FieldKind::Flag => {
                if c == ' ' {
                    self.toggle();
                }
            }
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if self.kind != FieldKind::Flag {
            self.value.pop();
        }
    }

    pub fn toggle(&mut self) {
        let next = if self.is_on() { FLAG_OFF } else { FLAG_ON };
        self.value = next.to_string();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self.kind {
            FieldKind::Text | FieldKind::Number => self.value.clone(),
            FieldKind::Secret => "•".repeat(self.value.chars().count()),
            FieldKind::Flag if self.is_on() => "[x] yes".to_string(),
            FieldKind::Flag => "[ ] no".to_string(),
        }
    }
}
