/// One entry of a picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickItem {
    pub label: String,
    pub description: String,
}

impl PickItem {
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
        }
    }
}

/// Picker interaction, delivered in the order the user produced it. The
/// stream ends after `Accepted` or `Canceled`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PickerEvent {
    /// The highlighted item changed to the item at this index.
    ActiveChanged(usize),
    /// The user accepted the item at this index.
    Accepted(usize),
    Canceled,
}
