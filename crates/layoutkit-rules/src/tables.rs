//! Class tables.
//!
//! One static table per semantic axis, mapping a semantic key (`"lg"`,
//! `"between"`, `"3"`) to exactly one utility class. The keys and tokens are
//! part of the versioned contract: safelists and editor tooling depend on them.

use std::borrow::Cow;

use serde::Serialize;

/// A configurable style dimension backed by its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Gap,
    Padding,
    Align,
    Justify,
    Cols,
}

impl Axis {
    pub const ALL: [Axis; 5] = [
        Axis::Gap,
        Axis::Padding,
        Axis::Align,
        Axis::Justify,
        Axis::Cols,
    ];

    /// The prop name that selects a value on this axis.
    pub fn prop(self) -> &'static str {
        match self {
            Axis::Gap => "gap",
            Axis::Padding => "padding",
            Axis::Align => "align",
            Axis::Justify => "justify",
            Axis::Cols => "cols",
        }
    }

    pub fn from_prop(prop: &str) -> Option<Axis> {
        Axis::ALL.into_iter().find(|axis| axis.prop() == prop)
    }

    pub fn table(self) -> &'static ClassTable {
        match self {
            Axis::Gap => &GAP,
            Axis::Padding => &PADDING,
            Axis::Align => &ALIGN,
            Axis::Justify => &JUSTIFY,
            Axis::Cols => &COLS,
        }
    }
}

/// Semantic key → utility class, in declaration order.
#[derive(Debug)]
pub struct ClassTable {
    pub axis: Axis,
    pub entries: &'static [(&'static str, &'static str)],
}

impl ClassTable {
    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, token)| *token)
    }

    /// Reverse lookup: the first key producing `token`.
    pub fn key_for(&self, token: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, t)| *t == token)
            .map(|(key, _)| *key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(key, _)| *key)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(_, token)| *token)
    }
}

pub static GAP: ClassTable = ClassTable {
    axis: Axis::Gap,
    entries: &[
        ("none", "gap-0"),
        ("xs", "gap-1"),
        ("sm", "gap-2"),
        ("md", "gap-4"),
        ("lg", "gap-6"),
        ("xl", "gap-8"),
        ("2xl", "gap-12"),
        ("3xl", "gap-16"),
    ],
};

pub static PADDING: ClassTable = ClassTable {
    axis: Axis::Padding,
    entries: &[
        ("none", "p-0"),
        ("xs", "p-1"),
        ("sm", "p-2"),
        ("md", "p-4"),
        ("lg", "p-6"),
        ("xl", "p-8"),
        ("2xl", "p-12"),
    ],
};

pub static ALIGN: ClassTable = ClassTable {
    axis: Axis::Align,
    entries: &[
        ("start", "items-start"),
        ("center", "items-center"),
        ("end", "items-end"),
        ("stretch", "items-stretch"),
        ("baseline", "items-baseline"),
    ],
};

pub static JUSTIFY: ClassTable = ClassTable {
    axis: Axis::Justify,
    entries: &[
        ("start", "justify-start"),
        ("center", "justify-center"),
        ("end", "justify-end"),
        ("between", "justify-between"),
        ("around", "justify-around"),
        ("evenly", "justify-evenly"),
    ],
};

pub static COLS: ClassTable = ClassTable {
    axis: Axis::Cols,
    entries: &[
        ("1", "grid-cols-1"),
        ("2", "grid-cols-2"),
        ("3", "grid-cols-3"),
        ("4", "grid-cols-4"),
        ("5", "grid-cols-5"),
        ("6", "grid-cols-6"),
        ("7", "grid-cols-7"),
        ("8", "grid-cols-8"),
        ("9", "grid-cols-9"),
        ("10", "grid-cols-10"),
        ("11", "grid-cols-11"),
        ("12", "grid-cols-12"),
    ],
};

/// Column class for a numeric `cols={n}`.
///
/// Table entries cover 1–12; larger counts are synthesized as
/// `grid-cols-{n}` following the framework's naming. Zero has no class.
pub fn cols_class(n: u32) -> Option<Cow<'static, str>> {
    if n == 0 {
        return None;
    }
    match COLS.get(&n.to_string()) {
        Some(token) => Some(Cow::Borrowed(token)),
        None => Some(Cow::Owned(format!("grid-cols-{n}"))),
    }
}
