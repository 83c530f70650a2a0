use std::cell::OnceCell;

use pdflayout_core::LayoutError;

/// Lift a provider result into the library error type.
pub(crate) trait Lift<T> {
    fn lift(self) -> Result<T, LayoutError>;
}

impl<T, E: Into<LayoutError>> Lift<T> for Result<T, E> {
    fn lift(self) -> Result<T, LayoutError> {
        self.map_err(Into::into)
    }
}

/// Fallible [`OnceCell::get_or_init`]. A failed init leaves the cell empty.
pub(crate) fn try_init<T>(
    cell: &OnceCell<T>,
    init: impl FnOnce() -> Result<T, LayoutError>,
) -> Result<&T, LayoutError> {
    if let Some(value) = cell.get() {
        return Ok(value);
    }
    let value = init()?;
    Ok(cell.get_or_init(|| value))
}
