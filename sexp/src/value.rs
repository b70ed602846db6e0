//! The s-expression object model.
use std::fmt;

use crate::string::SimpleString;

/// An s-expression: either a string or a list of s-expressions.
#[derive(Clone, PartialEq, Eq)]
pub enum Sexp {
    String(SexpString),
    List(Vec<Sexp>),
}

impl Sexp {
    pub fn string(&self) -> Option<&SexpString> {
        match self {
            Sexp::String(s) => Some(s),
            Sexp::List(_) => None,
        }
    }

    pub fn list(&self) -> Option<&[Sexp]> {
        match self {
            Sexp::List(items) => Some(items),
            Sexp::String(_) => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Sexp::List(_))
    }

    /// Treats this value as an association list entry.
    ///
    /// Returns the elements following the head when this is a list whose
    /// first element is a string equal to `tag`, or, for a list of such
    /// entries, the first entry that matches.
    pub fn lookup(&self, tag: &[u8]) -> Option<&[Sexp]> {
        let items = self.list()?;
        match items.split_first() {
            Some((Sexp::String(head), rest)) if head.value().as_bytes() == tag => Some(rest),
            _ => items.iter().find_map(|item| match item.list()?.split_first()? {
                (Sexp::String(head), rest) if head.value().as_bytes() == tag => Some(rest),
                _ => None,
            }),
        }
    }
}

impl fmt::Debug for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sexp::String(s) => s.fmt(f),
            Sexp::List(items) => items.fmt(f),
        }
    }
}

impl From<SexpString> for Sexp {
    fn from(s: SexpString) -> Self {
        Sexp::String(s)
    }
}

impl From<SimpleString> for Sexp {
    fn from(s: SimpleString) -> Self {
        Sexp::String(s.into())
    }
}

impl From<&str> for Sexp {
    fn from(s: &str) -> Self {
        Sexp::String(s.into())
    }
}

impl From<&[u8]> for Sexp {
    fn from(s: &[u8]) -> Self {
        Sexp::String(s.into())
    }
}

impl From<Vec<Sexp>> for Sexp {
    fn from(items: Vec<Sexp>) -> Self {
        Sexp::List(items)
    }
}

/// A string value with an optional presentation hint.
#[derive(Clone, PartialEq, Eq)]
pub struct SexpString {
    hint: Option<SimpleString>,
    value: SimpleString,
}

impl SexpString {
    pub fn new(value: impl Into<SimpleString>) -> Self {
        SexpString {
            hint: None,
            value: value.into(),
        }
    }

    pub fn with_hint(value: impl Into<SimpleString>, hint: impl Into<SimpleString>) -> Self {
        SexpString {
            hint: Some(hint.into()),
            value: value.into(),
        }
    }

    pub fn hint(&self) -> Option<&SimpleString> {
        self.hint.as_ref()
    }

    pub fn value(&self) -> &SimpleString {
        &self.value
    }

    pub fn into_value(self) -> SimpleString {
        self.value
    }
}

impl fmt::Debug for SexpString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(hint) = &self.hint {
            write!(f, "[{:?}]", hint)?;
        }
        self.value.fmt(f)
    }
}

impl From<SimpleString> for SexpString {
    fn from(value: SimpleString) -> Self {
        SexpString::new(value)
    }
}

impl From<&str> for SexpString {
    fn from(value: &str) -> Self {
        SexpString::new(value)
    }
}

impl From<&[u8]> for SexpString {
    fn from(value: &[u8]) -> Self {
        SexpString::new(value)
    }
}


#[cfg(test)]
mod test {
    use super::*;

    fn alist() -> Sexp {
        Sexp::List(vec![
            "private-key".into(),
            Sexp::List(vec![
                "rsa".into(),
                Sexp::List(vec!["n".into(), (&b"\x00\xab"[..]).into()]),
                Sexp::List(vec!["e".into(), (&b"\x01\x00\x01"[..]).into()]),
            ]),
        ])
    }

    #[test]
    fn test_lookup() {
        let key = alist();
        let rsa = key.lookup(b"private-key").unwrap();
        assert_eq!(1, rsa.len());
        let params = rsa[0].lookup(b"rsa").unwrap();
        assert_eq!(2, params.len());

        let e = params[1].lookup(b"e").unwrap();
        assert_eq!(b"\x01\x00\x01", e[0].string().unwrap().value().as_bytes());

        assert_eq!(
            b"\x00\xab",
            rsa[0].list().unwrap()[1].lookup(b"n").unwrap()[0]
                .string()
                .unwrap()
                .value()
                .as_bytes()
        );
        assert!(key.lookup(b"public-key").is_none());
        assert!(Sexp::from("atom").lookup(b"atom").is_none());
    }

    #[test]
    fn test_lookup_entry_list() {
        let entries = Sexp::List(vec![
            Sexp::List(vec!["a".into(), "1".into()]),
            Sexp::List(vec!["b".into(), "2".into()]),
        ]);
        let b = entries.lookup(b"b").unwrap();
        assert_eq!(&[Sexp::from("2")], b);
    }

    #[test]
    fn test_debug() {
        let value = Sexp::List(vec![
            "hi".into(),
            SexpString::with_hint("ho", "fancy").into(),
        ]);
        assert_eq!(r#"[b"hi", [b"fancy"]b"ho"]"#, format!("{:?}", value));
    }
}
