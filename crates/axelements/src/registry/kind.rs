/*!
Known element kinds.

A kind is the prefix-stripped role or subrole an element reports. The common
ones get a variant; anything else is carried as [`ElementKind::Other`] with
its raw name, so a newly introduced platform role never needs a code change.
*/

#![allow(missing_docs)]

use std::fmt;

use crate::types::TypeName;

macro_rules! element_kinds {
  ($($variant:ident),* $(,)?) => {
    /// Tagged kind of a UI element, with a fallback for unlisted names.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub enum ElementKind {
      $($variant,)*
      /// A role or subrole with no dedicated variant.
      Other(TypeName),
    }

    impl ElementKind {
      const KNOWN_NAMES: &'static [&'static str] = &[$(stringify!($variant),)*];

      /// Class name of this kind.
      pub fn name(&self) -> &str {
        match self {
          $(Self::$variant => stringify!($variant),)*
          Self::Other(name) => name.as_str(),
        }
      }

      /// Kind for a prefix-stripped role or subrole name.
      pub fn from_name(name: &str) -> Self {
        $(
          if name == stringify!($variant) {
            return Self::$variant;
          }
        )*
        Self::Other(TypeName::from(name))
      }
    }
  };
}

element_kinds! {
  // Structure
  Application,
  SystemWide,
  Window,
  StandardWindow,
  FloatingWindow,
  SystemFloatingWindow,
  Dialog,
  SystemDialog,
  Sheet,
  Drawer,
  Popover,
  Group,
  SplitGroup,
  Splitter,
  ScrollArea,
  ScrollBar,
  Toolbar,
  TabGroup,
  LayoutArea,
  LayoutItem,
  WebArea,

  // Menus
  Menu,
  MenuBar,
  MenuBarItem,
  MenuItem,
  MenuButton,

  // Buttons
  Button,
  CloseButton,
  MinimizeButton,
  ZoomButton,
  FullScreenButton,
  ToolbarButton,
  SortButton,
  PopUpButton,
  CheckBox,
  RadioButton,
  RadioGroup,
  DisclosureTriangle,
  Toggle,
  Switch,
  Incrementor,

  // Text
  StaticText,
  TextField,
  TextArea,
  SearchField,
  SecureTextField,
  ComboBox,
  Heading,
  Link,

  // Collections
  List,
  ContentList,
  DefinitionList,
  Table,
  Outline,
  Browser,
  Grid,
  Row,
  OutlineRow,
  TableRow,
  Column,
  Cell,

  // Indicators
  Slider,
  ValueIndicator,
  ProgressIndicator,
  BusyIndicator,
  LevelIndicator,
  RelevanceIndicator,
  ColorWell,
  Image,

  // Dock
  ApplicationDockItem,
  DocumentDockItem,
  FolderDockItem,
  MinimizedWindowDockItem,
  TrashDockItem,
  SeparatorDockItem,
  ProcessSwitcherList,

  Unknown,
}

impl ElementKind {
  /// Every kind that has a dedicated variant.
  pub fn known() -> impl Iterator<Item = Self> {
    Self::KNOWN_NAMES.iter().copied().map(Self::from_name)
  }

  pub const fn is_known(&self) -> bool {
    !matches!(self, Self::Other(_))
  }

  pub const fn is_window(&self) -> bool {
    matches!(
      self,
      Self::Window
        | Self::StandardWindow
        | Self::FloatingWindow
        | Self::SystemFloatingWindow
        | Self::Dialog
        | Self::SystemDialog
        | Self::Sheet
    )
  }

  pub const fn is_button(&self) -> bool {
    matches!(
      self,
      Self::Button
        | Self::CloseButton
        | Self::MinimizeButton
        | Self::ZoomButton
        | Self::FullScreenButton
        | Self::ToolbarButton
        | Self::SortButton
        | Self::PopUpButton
        | Self::MenuButton
    )
  }

  pub const fn is_text_input(&self) -> bool {
    matches!(
      self,
      Self::TextField | Self::TextArea | Self::SearchField | Self::SecureTextField | Self::ComboBox
    )
  }

  pub const fn is_dock_item(&self) -> bool {
    matches!(
      self,
      Self::ApplicationDockItem
        | Self::DocumentDockItem
        | Self::FolderDockItem
        | Self::MinimizedWindowDockItem
        | Self::TrashDockItem
        | Self::SeparatorDockItem
    )
  }
}

impl fmt::Display for ElementKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
