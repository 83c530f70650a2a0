//! Tagged-PDF structure tree.

use std::fmt;
use std::fmt::Write as _;

use pdflayout_core::LayoutError;
use pdflayout_provider::{PrimitiveProvider, StructInfo};

use crate::util::Lift;

/// One structure element and its attributes.
///
/// Children are fetched from the provider on each call to
/// [`Structure::children`].
pub struct Structure<P: PrimitiveProvider> {
    element: P::StructElement,
    info: StructInfo,
}

impl<P: PrimitiveProvider> Structure<P> {
    pub(crate) fn load(element: P::StructElement) -> Result<Self, LayoutError> {
        let info = P::struct_element_info(&element).lift()?;
        Ok(Self { element, info })
    }

    /// Structure type, e.g. `"Table"`.
    pub fn kind(&self) -> &str {
        &self.info.kind
    }

    pub fn title(&self) -> Option<&str> {
        self.info.title.as_deref()
    }

    pub fn alt_text(&self) -> Option<&str> {
        self.info.alt_text.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.info.id.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.info.language.as_deref()
    }

    pub fn marked_id(&self) -> Option<i32> {
        self.info.marked_id
    }

    /// A string attribute of the element, e.g. `"Summary"` on a table.
    pub fn attribute(&self, name: &str) -> Result<Option<String>, LayoutError> {
        P::struct_element_attribute(&self.element, name).lift()
    }

    pub fn children(&self) -> Result<Vec<Structure<P>>, LayoutError> {
        P::struct_element_children(&self.element)
            .lift()?
            .into_iter()
            .map(Structure::load)
            .collect()
    }

    /// Indented dump of this element and its subtree, two spaces per level.
    pub fn describe(&self) -> Result<String, LayoutError> {
        let mut out = String::new();
        self.describe_into(&mut out, 0)?;
        Ok(out)
    }

    fn describe_into(&self, out: &mut String, indent: usize) -> Result<(), LayoutError> {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{:indent$}{self}", "");
        for child in self.children()? {
            child.describe_into(out, indent + 2)?;
        }
        Ok(())
    }
}

impl<P: PrimitiveProvider> fmt::Display for Structure<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.title().or(self.alt_text()).unwrap_or("");
        write!(f, "S({}: {label}, ", self.kind())?;
        match (self.id(), self.marked_id()) {
            (Some(id), _) => write!(f, "{id})"),
            (None, Some(mcid)) => write!(f, "{mcid})"),
            (None, None) => f.write_str("-)"),
        }
    }
}

impl<P: PrimitiveProvider> fmt::Debug for Structure<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Structure").field("info", &self.info).finish()
    }
}
