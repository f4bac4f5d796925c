//! Text dumps of sizer trees.
//!
//! [`SizerTreeDebug`] renders a sizer, its items and nested sizers as an
//! indented tree, which is usually the fastest way to see why something
//! ended up where it did:
//!
//! ```text
//! BoxSizer sizer#1 @ 0,0 200x100
//! ├── widget WidgetId(1v1) @ 0,0 200x30 p=0
//! ├── spacer 0x10 @ 0,30 200x10 p=1
//! └── GridSizer sizer#2 @ 0,40 200x60 p=1
//!     └── widget WidgetId(2v1) @ 0,40 50x20 p=0 (hidden)
//! ```

use std::fmt;

use trellis_core::Rect;

use super::item::{ItemKind, SizerItem};
use super::Sizer;

/// Branch characters used when drawing the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// `|` and `+--`.
    Ascii,
    /// Box-drawing characters.
    #[default]
    Unicode,
    /// Dashes only.
    Compact,
}

/// What to include in a sizer tree dump.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    pub style: TreeStyle,
    /// Print sizer and widget ids.
    pub show_ids: bool,
    /// Print each node's rectangle from the last layout.
    pub show_geometry: bool,
    /// Print hidden items (marked `(hidden)`).
    pub show_hidden: bool,
    /// Maximum nesting depth to descend into (`None` for unlimited).
    pub max_depth: Option<usize>,
    /// Spaces per nesting level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_geometry: true,
            show_hidden: true,
            max_depth: None,
            indent_size: 3,
        }
    }
}

impl TreeFormatOptions {
    /// Kinds and shapes only.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_geometry: false,
            ..Default::default()
        }
    }
}

/// Displays a sizer tree.
#[derive(Debug, Clone)]
pub struct SizerTreeDebug<'a> {
    sizer: &'a Sizer,
    options: TreeFormatOptions,
}

impl<'a> SizerTreeDebug<'a> {
    pub fn new(sizer: &'a Sizer) -> Self {
        Self::with_options(sizer, TreeFormatOptions::default())
    }

    pub fn with_options(sizer: &'a Sizer, options: TreeFormatOptions) -> Self {
        Self { sizer, options }
    }

    fn write_sizer_header(&self, f: &mut fmt::Formatter<'_>, sizer: &Sizer) -> fmt::Result {
        f.write_str(sizer.kind().name())?;
        if self.options.show_ids {
            write!(f, " {}", sizer.id())?;
        }
        Ok(())
    }

    fn write_children(&self, f: &mut fmt::Formatter<'_>, sizer: &Sizer, depth: usize, prefix: &str) -> fmt::Result {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return Ok(());
        }
        let visible: Vec<&SizerItem> = sizer
            .items()
            .iter()
            .filter(|item| self.options.show_hidden || item.is_shown())
            .collect();
        let count = visible.len();
        for (i, item) in visible.into_iter().enumerate() {
            let is_last = i + 1 == count;
            let (connector, continuation) = self.connectors(is_last);
            write!(f, "{prefix}{connector}")?;
            self.write_item(f, item)?;
            if let Some(nested) = item.as_sizer() {
                let child_prefix = format!("{prefix}{continuation}");
                self.write_children(f, nested, depth + 1, &child_prefix)?;
            }
        }
        Ok(())
    }

    fn write_item(&self, f: &mut fmt::Formatter<'_>, item: &SizerItem) -> fmt::Result {
        match item.kind() {
            ItemKind::Widget(id) => {
                f.write_str("widget")?;
                if self.options.show_ids {
                    write!(f, " {id:?}")?;
                }
            }
            ItemKind::Sizer(sizer) => self.write_sizer_header(f, sizer)?,
            ItemKind::Spacer(spacer) => write!(f, "spacer {}x{}", spacer.size.width, spacer.size.height)?,
        }
        if self.options.show_geometry {
            write_rect(f, item.rect())?;
        }
        write!(f, " p={}", item.proportion())?;
        if !item.is_shown() {
            f.write_str(" (hidden)")?;
        }
        writeln!(f)
    }

    fn connectors(&self, is_last: bool) -> (String, String) {
        let pad = " ".repeat(self.options.indent_size);
        let (tee, corner, pipe) = match self.options.style {
            TreeStyle::Ascii => ("+--", "`--", "|"),
            TreeStyle::Unicode => ("\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}", "\u{2502}"),
            TreeStyle::Compact => ("-", "-", " "),
        };
        if is_last {
            (format!("{corner} "), format!(" {pad}"))
        } else {
            (format!("{tee} "), format!("{pipe}{pad}"))
        }
    }
}

fn write_rect(f: &mut fmt::Formatter<'_>, rect: Rect) -> fmt::Result {
    write!(f, " @ {},{} {}x{}", rect.left(), rect.top(), rect.width(), rect.height())
}

impl fmt::Display for SizerTreeDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_sizer_header(f, self.sizer)?;
        if self.options.show_geometry {
            write_rect(f, self.sizer.rect())?;
        }
        writeln!(f)?;
        self.write_children(f, self.sizer, 1, "")
    }
}

impl Sizer {
    /// Tree dump of this sizer with default options.
    pub fn debug_tree(&self) -> SizerTreeDebug<'_> {
        SizerTreeDebug::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizer::flags::SizerFlags;
    use crate::sizer::test_support::store_with;
    use trellis_core::Size;

    #[test]
    fn test_minimal_tree() {
        let (mut store, ids) = store_with(&[Size::new(10, 10), Size::new(10, 10)]);
        let mut inner = Sizer::horizontal();
        inner.add_widget(&mut store, ids[1], SizerFlags::new(0)).unwrap();
        let mut root = Sizer::vertical();
        root.add_widget(&mut store, ids[0], SizerFlags::new(1)).unwrap();
        root.add_space(4, 6, SizerFlags::new(0)).unwrap();
        root.add_sizer(inner, SizerFlags::new(0)).unwrap();

        let options = TreeFormatOptions {
            style: TreeStyle::Ascii,
            ..TreeFormatOptions::minimal()
        };
        let text = SizerTreeDebug::with_options(&root, options).to_string();
        let expected = "BoxSizer\n\
                        +-- widget p=1\n\
                        +-- spacer 4x6 p=0\n\
                        `-- BoxSizer p=0\n\
                        \x20   `-- widget p=0\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_hidden_items_filtered() {
        let (mut store, ids) = store_with(&[Size::new(10, 10)]);
        let mut root = Sizer::vertical();
        root.add_widget(&mut store, ids[0], SizerFlags::new(0)).unwrap();
        root.hide_index(&mut store, 0).unwrap();

        let shown = root.debug_tree().to_string();
        assert!(shown.contains("(hidden)"));
        assert!(shown.starts_with(&format!("BoxSizer {} @ 0,0 0x0", root.id())));

        let options = TreeFormatOptions {
            show_hidden: false,
            ..TreeFormatOptions::default()
        };
        let filtered = SizerTreeDebug::with_options(&root, options).to_string();
        assert_eq!(filtered.lines().count(), 1);
    }

    #[test]
    fn test_max_depth() {
        let mut inner = Sizer::horizontal();
        inner.add_spacer(3).unwrap();
        let mut root = Sizer::vertical();
        root.add_sizer(inner, SizerFlags::new(0)).unwrap();

        let options = TreeFormatOptions {
            max_depth: Some(1),
            ..TreeFormatOptions::minimal()
        };
        let text = SizerTreeDebug::with_options(&root, options).to_string();
        assert_eq!(text.lines().count(), 2);
    }
}
