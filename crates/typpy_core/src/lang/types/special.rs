//! Special typing forms: `Any`, `Optional[...]` and `Union[...]`.
//!
//! These are not classes. `Any` accepts everything, the other two build union types.

/// Stable identifier for special typing forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialFormId {
    Any,
    Optional,
    Union,
}

#[derive(Debug, Clone, Copy)]
pub struct SpecialFormInfo {
    pub id: SpecialFormId,
    pub canonical: &'static str,
    /// Whether the form must be subscripted to denote a type.
    pub subscripted: bool,
}

/// Registry of special forms, ordered like [`SpecialFormId`].
pub const SPECIAL_FORMS: &[SpecialFormInfo] = &[
    SpecialFormInfo {
        id: SpecialFormId::Any,
        canonical: "Any",
        subscripted: false,
    },
    SpecialFormInfo {
        id: SpecialFormId::Optional,
        canonical: "Optional",
        subscripted: true,
    },
    SpecialFormInfo {
        id: SpecialFormId::Union,
        canonical: "Union",
        subscripted: true,
    },
];

pub fn from_str(name: &str) -> Option<SpecialFormId> {
    SPECIAL_FORMS.iter().find(|f| f.canonical == name).map(|f| f.id)
}

pub fn as_str(id: SpecialFormId) -> &'static str {
    SPECIAL_FORMS[id as usize].canonical
}
