//! Field model: specs describing how a field is prompted, and the typed
//! values the codec produces from operator text.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::tag::{self, Tag};

/// How a field's value is obtained and validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Routing or correlation identifier, taken verbatim.
    Identifier,
    /// Free text, taken verbatim.
    FreeText,
    /// Closed set of `(display label, protocol code)` pairs. The order of
    /// the pairs defines the 1-based prompt index.
    Enumeration(&'static [(&'static str, &'static str)]),
    /// Base-10 decimal carried downstream with a fixed number of fractional
    /// digits, independent of what the operator typed.
    Decimal { scale: u32 },
}

/// A named protocol field and how to prompt for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub tag: Tag,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn identifier(name: &'static str, tag: Tag) -> Self {
        Self {
            name,
            tag,
            kind: FieldKind::Identifier,
        }
    }

    pub const fn free_text(name: &'static str, tag: Tag) -> Self {
        Self {
            name,
            tag,
            kind: FieldKind::FreeText,
        }
    }

    pub const fn enumeration(
        name: &'static str,
        tag: Tag,
        choices: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            name,
            tag,
            kind: FieldKind::Enumeration(choices),
        }
    }

    pub const fn decimal(name: &'static str, tag: Tag, scale: u32) -> Self {
        Self {
            name,
            tag,
            kind: FieldKind::Decimal { scale },
        }
    }

    /// Display labels of an enumeration, in prompt order. Empty for other kinds.
    pub fn labels(&self) -> Vec<&'static str> {
        match self.kind {
            FieldKind::Enumeration(choices) => choices.iter().map(|(label, _)| *label).collect(),
            _ => Vec::new(),
        }
    }

    /// Protocol code for a 1-based choice index.
    pub fn code_for(&self, index: usize) -> Option<&'static str> {
        match self.kind {
            FieldKind::Enumeration(choices) => index
                .checked_sub(1)
                .and_then(|i| choices.get(i))
                .map(|(_, code)| *code),
            _ => None,
        }
    }
}

// --- Catalogue ---

pub const SENDER_COMP_ID: FieldSpec = FieldSpec::identifier("SenderCompID", tag::SENDER_COMP_ID);
pub const TARGET_COMP_ID: FieldSpec = FieldSpec::identifier("TargetCompID", tag::TARGET_COMP_ID);
pub const TARGET_SUB_ID: FieldSpec = FieldSpec::identifier("TargetSubID", tag::TARGET_SUB_ID);
pub const CL_ORD_ID: FieldSpec = FieldSpec::identifier("ClOrdID", tag::CL_ORD_ID);
pub const ORIG_CL_ORD_ID: FieldSpec = FieldSpec::identifier("OrigClOrdID", tag::ORIG_CL_ORD_ID);
pub const SYMBOL: FieldSpec = FieldSpec::free_text("Symbol", tag::SYMBOL);

pub const SIDE: FieldSpec = FieldSpec::enumeration(
    "Side",
    tag::SIDE,
    &[
        ("Buy", "1"),
        ("Sell", "2"),
        ("Sell Short", "5"),
        ("Sell Short Exempt", "6"),
        ("Cross", "8"),
        ("Cross Short", "9"),
        ("Cross Short Exempt", "A"),
    ],
);

pub const ORD_TYPE: FieldSpec = FieldSpec::enumeration(
    "OrdType",
    tag::ORD_TYPE,
    &[
        ("Market", "1"),
        ("Limit", "2"),
        ("Stop", "3"),
        ("Stop Limit", "4"),
    ],
);

pub const TIME_IN_FORCE: FieldSpec = FieldSpec::enumeration(
    "TimeInForce",
    tag::TIME_IN_FORCE,
    &[
        ("Day", "0"),
        ("IOC", "3"),
        ("OPG", "2"),
        ("GTC", "1"),
        ("GTX", "5"),
    ],
);

pub const ORDER_QTY: FieldSpec = FieldSpec::decimal("OrderQty", tag::ORDER_QTY, 2);
pub const PRICE: FieldSpec = FieldSpec::decimal("Price", tag::PRICE, 2);
pub const STOP_PX: FieldSpec = FieldSpec::decimal("Stop Price", tag::STOP_PX, 2);

/// A typed field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Identifier(String),
    Text(String),
    /// Enumeration code, e.g. "1" for Side=Buy.
    Code(String),
    Int(u32),
    Decimal { value: Decimal, scale: u32 },
}

impl FieldValue {
    /// The value as it appears on the wire.
    pub fn render(&self) -> String {
        match self {
            FieldValue::Identifier(s) | FieldValue::Text(s) | FieldValue::Code(s) => s.clone(),
            FieldValue::Int(n) => n.to_string(),
            FieldValue::Decimal { value, scale } => {
                let mut scaled =
                    value.round_dp_with_strategy(*scale, RoundingStrategy::MidpointAwayFromZero);
                scaled.rescale(*scale);
                scaled.to_string()
            }
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Identifier(s) | FieldValue::Text(s) | FieldValue::Code(s) => Some(s),
            _ => None,
        }
    }
}

/// A single tag/value pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub tag: Tag,
    pub value: FieldValue,
}

impl Field {
    pub fn new(tag: Tag, value: FieldValue) -> Self {
        Self { tag, value }
    }

    pub fn identifier(tag: Tag, value: impl Into<String>) -> Self {
        Self::new(tag, FieldValue::Identifier(value.into()))
    }

    pub fn text(tag: Tag, value: impl Into<String>) -> Self {
        Self::new(tag, FieldValue::Text(value.into()))
    }

    pub fn code(tag: Tag, value: impl Into<String>) -> Self {
        Self::new(tag, FieldValue::Code(value.into()))
    }

    pub fn int(tag: Tag, value: u32) -> Self {
        Self::new(tag, FieldValue::Int(value))
    }

    pub fn decimal(tag: Tag, value: Decimal, scale: u32) -> Self {
        Self::new(tag, FieldValue::Decimal { value, scale })
    }

    /// `tag=value`
    pub fn render(&self) -> String {
        format!("{}={}", self.tag, self.value.render())
    }
}

/// Capability to accept field writes. Implemented by the header, by plain
/// field maps and by every request message.
pub trait FieldWriter {
    fn set(&mut self, field: Field);
}

/// Ordered set of fields keyed by tag.
///
/// Insertion order is preserved; writing a tag that is already present
/// replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap {
    fields: Vec<Field>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tag: Tag) -> Option<&FieldValue> {
        self.fields.iter().find(|f| f.tag == tag).map(|f| &f.value)
    }

    pub fn get_str(&self, tag: Tag) -> Option<&str> {
        self.get(tag).and_then(FieldValue::as_str)
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.get(tag).is_some()
    }

    pub fn remove(&mut self, tag: Tag) -> Option<FieldValue> {
        let pos = self.fields.iter().position(|f| f.tag == tag)?;
        Some(self.fields.remove(pos).value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FieldWriter for FieldMap {
    fn set(&mut self, field: Field) {
        match self.fields.iter_mut().find(|f| f.tag == field.tag) {
            Some(existing) => existing.value = field.value,
            None => self.fields.push(field),
        }
    }
}
