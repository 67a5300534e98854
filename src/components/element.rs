//! Modelled DOM node state.
//!
//! An element entity carries the pieces of DOM state the engine reads or
//! writes: its id, class list, inline style, text content, `data-*`
//! attributes and layout box. The host mirrors these back onto the real page.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// DOM id of an element.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: String,
}

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        Element { id: id.into() }
    }
}

/// The element's `class` attribute.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(pub SmallVec<[String; 4]>);

impl ClassList {
    pub fn from_classes<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = ClassList::default();
        for class in classes {
            list.add(class);
        }
        list
    }

    /// Add a class. Returns false if it was already present.
    pub fn add(&mut self, class: impl Into<String>) -> bool {
        let class = class.into();
        if self.contains(&class) {
            return false;
        }
        self.0.push(class);
        true
    }

    /// Remove a class. Returns false if it was not present.
    pub fn remove(&mut self, class: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|c| c != class);
        before != self.0.len()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    /// Replace `from` with `to`, keeping the two mutually exclusive.
    pub fn swap(&mut self, from: &str, to: &str) {
        self.remove(from);
        self.add(to);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Inline style properties the engine writes.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    /// `width` as a CSS length, e.g. `"40%"`.
    pub width: Option<String>,
}

/// The element's text content.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct TextContent(pub String);

/// `data-*` attributes, keyed without the `data-` prefix.
#[derive(Component, Debug, Clone, Default)]
pub struct DataAttributes(pub FxHashMap<String, String>);

impl DataAttributes {
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

/// Vertical extent of an element in document coordinates.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct LayoutBox {
    pub top: f32,
    pub height: f32,
}

impl LayoutBox {
    pub fn new(top: f32, height: f32) -> Self {
        LayoutBox {
            top,
            height: height.max(0.0),
        }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Everything needed to spawn a plain element.
#[derive(Bundle, Debug, Clone)]
pub struct ElementBundle {
    pub element: Element,
    pub classes: ClassList,
    pub style: Style,
    pub text: TextContent,
    pub data: DataAttributes,
    pub layout: LayoutBox,
}

impl ElementBundle {
    pub fn new(id: impl Into<String>, top: f32, height: f32) -> Self {
        ElementBundle {
            element: Element::new(id),
            classes: ClassList::default(),
            style: Style::default(),
            text: TextContent::default(),
            data: DataAttributes::default(),
            layout: LayoutBox::new(top, height),
        }
    }

    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes = ClassList::from_classes(classes);
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.set(key, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = TextContent(text.into());
        self
    }
}
