//! Structured names for management objects: `domain:key=value,key=value`.
//!
//! Property order is irrelevant; the canonical form sorts keys. Values containing
//! reserved characters are written quoted (`name="a,b"`) with `\"`, `\\`, `\n`, `\*` and
//! `\?` escapes. A trailing `*` in the property list makes the name a pattern that matches
//! any name carrying at least the listed properties.

use crate::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Domain under which the broker registers its management objects.
pub const DEFAULT_DOMAIN: &str = "com.sun.messaging.jms.server";

pub const TYPE_BROKER: &str = "Broker";
pub const TYPE_SERVICE: &str = "Service";
pub const TYPE_DESTINATION: &str = "Destination";
pub const TYPE_CONNECTION: &str = "Connection";
pub const TYPE_TRANSACTION_MANAGER: &str = "TransactionManager";
pub const TYPE_CLUSTER: &str = "Cluster";
pub const TYPE_LOG: &str = "Log";

pub const SUBTYPE_CONFIG: &str = "Config";
pub const SUBTYPE_MONITOR: &str = "Monitor";

pub const DEST_TYPE_QUEUE: &str = "q";
pub const DEST_TYPE_TOPIC: &str = "t";

const RESERVED: &[char] = &[',', '=', ':', '"', '*', '?', '\n'];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectName {
    domain: String,
    properties: BTreeMap<String, String>,
    property_pattern: bool,
}

impl ObjectName {
    /// Starts a name in `domain` with no properties yet.
    pub fn builder(domain: impl Into<String>) -> ObjectNameBuilder {
        ObjectNameBuilder {
            name: Self { domain: domain.into(), properties: BTreeMap::new(), property_pattern: false },
        }
    }

    /// Parses `domain:key=value,...`.
    ///
    /// # Errors
    /// Returns [`DomainError::MalformedObjectName`] on an empty domain, an empty or
    /// duplicated key, a missing `=`, reserved characters in an unquoted value, or an
    /// unterminated quote.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let (domain, props) = s.split_once(':').ok_or_else(|| malformed(s, "missing ':'"))?;
        let mut builder = Self::builder(domain);

        let mut rest = props;
        while !rest.is_empty() {
            if rest == "*" {
                builder.name.property_pattern = true;
                break;
            }
            let (key, after_key) = rest.split_once('=').ok_or_else(|| malformed(s, "missing '='"))?;
            let (value, remaining) = if after_key.starts_with('"') {
                parse_quoted(s, after_key)?
            } else {
                let end = after_key.find(',').unwrap_or(after_key.len());
                let (raw, tail) = after_key.split_at(end);
                if raw.contains(RESERVED) {
                    return Err(malformed(s, "reserved character in unquoted value"));
                }
                (raw.to_owned(), tail)
            };
            if builder.name.properties.contains_key(key) {
                return Err(malformed(s, "duplicate key"));
            }
            builder = builder.property(key, value);

            rest = match remaining.strip_prefix(',') {
                Some(next) if next.is_empty() => return Err(malformed(s, "trailing ','")),
                Some(next) => next,
                None if remaining.is_empty() => "",
                None => return Err(malformed(s, "expected ',' after value")),
            };
        }

        builder.build()
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub const fn is_pattern(&self) -> bool {
        self.property_pattern
    }

    /// Same properties, different domain.
    #[must_use]
    pub fn in_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Whether `self` satisfies `pattern`.
    ///
    /// A non-pattern only matches an equal name. A property pattern matches names in the
    /// same domain (or any domain when the pattern's domain is `*`) carrying every listed
    /// property with an equal value.
    #[must_use]
    pub fn matches(&self, pattern: &Self) -> bool {
        let domain_ok = pattern.domain == "*" || pattern.domain == self.domain;
        if !pattern.property_pattern {
            return domain_ok && pattern.properties == self.properties;
        }
        domain_ok && pattern.properties.iter().all(|(k, v)| self.properties.get(k) == Some(v))
    }

    /// The broker configuration object.
    #[must_use]
    pub fn broker_config() -> Self {
        Self::typed(TYPE_BROKER, SUBTYPE_CONFIG)
    }

    /// The broker monitor object.
    #[must_use]
    pub fn broker_monitor() -> Self {
        Self::typed(TYPE_BROKER, SUBTYPE_MONITOR)
    }

    #[must_use]
    pub fn service_config(service: &str) -> Self {
        Self::typed_named(TYPE_SERVICE, SUBTYPE_CONFIG, [("name", service)])
    }

    #[must_use]
    pub fn service_monitor(service: &str) -> Self {
        Self::typed_named(TYPE_SERVICE, SUBTYPE_MONITOR, [("name", service)])
    }

    /// `dest_type` is [`DEST_TYPE_QUEUE`] or [`DEST_TYPE_TOPIC`].
    #[must_use]
    pub fn destination_config(dest_type: &str, name: &str) -> Self {
        Self::typed_named(TYPE_DESTINATION, SUBTYPE_CONFIG, [("desttype", dest_type), ("name", name)])
    }

    #[must_use]
    pub fn destination_monitor(dest_type: &str, name: &str) -> Self {
        Self::typed_named(TYPE_DESTINATION, SUBTYPE_MONITOR, [("desttype", dest_type), ("name", name)])
    }

    #[must_use]
    pub fn connection_config(id: &str) -> Self {
        Self::typed_named(TYPE_CONNECTION, SUBTYPE_CONFIG, [("id", id)])
    }

    #[must_use]
    pub fn connection_monitor(id: &str) -> Self {
        Self::typed_named(TYPE_CONNECTION, SUBTYPE_MONITOR, [("id", id)])
    }

    fn typed(kind: &str, subtype: &str) -> Self {
        Self::typed_named(kind, subtype, [])
    }

    fn typed_named<const N: usize>(kind: &str, subtype: &str, extra: [(&str, &str); N]) -> Self {
        let mut properties = BTreeMap::new();
        properties.insert("type".to_owned(), kind.to_owned());
        properties.insert("subtype".to_owned(), subtype.to_owned());
        for (k, v) in extra {
            properties.insert(k.to_owned(), v.to_owned());
        }
        Self { domain: DEFAULT_DOMAIN.to_owned(), properties, property_pattern: false }
    }
}

/// Incremental construction of an [`ObjectName`].
#[derive(Debug, Clone)]
pub struct ObjectNameBuilder {
    name: ObjectName,
}

impl ObjectNameBuilder {
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.name.properties.insert(key.into(), value.into());
        self
    }

    /// Turns the name into a property pattern (`,*`).
    #[must_use]
    pub const fn pattern(mut self) -> Self {
        self.name.property_pattern = true;
        self
    }

    /// # Errors
    /// Returns [`DomainError::MalformedObjectName`] if the domain is empty or contains `:`,
    /// a key is empty or holds reserved characters, or a non-pattern name has no properties.
    pub fn build(self) -> Result<ObjectName, DomainError> {
        let name = self.name;
        if name.domain.is_empty() || name.domain.contains(':') {
            return Err(malformed(&name.domain, "invalid domain"));
        }
        if name.properties.is_empty() && !name.property_pattern {
            return Err(malformed(&name.domain, "no key properties"));
        }
        if let Some(key) = name.properties.keys().find(|k| k.is_empty() || k.contains(RESERVED)) {
            return Err(malformed(key, "invalid key"));
        }
        Ok(name)
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.domain)?;
        for (i, (k, v)) in self.properties.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{k}=")?;
            write_value(f, v)?;
        }
        if self.property_pattern {
            f.write_str(if self.properties.is_empty() { "*" } else { ",*" })?;
        }
        Ok(())
    }
}

impl FromStr for ObjectName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ObjectName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    if !value.contains(RESERVED) && !value.contains('\\') {
        return f.write_str(value);
    }
    f.write_str("\"")?;
    for c in value.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '*' => f.write_str("\\*")?,
            '?' => f.write_str("\\?")?,
            other => write!(f, "{other}")?,
        }
    }
    f.write_str("\"")
}

/// Parses a quoted value starting at the opening quote; returns the value and the rest.
fn parse_quoted<'a>(whole: &str, s: &'a str) -> Result<(String, &'a str), DomainError> {
    let mut value = String::new();
    let mut chars = s.char_indices().skip(1);
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((value, &s[i + 1..])),
            '\\' => match chars.next() {
                Some((_, 'n')) => value.push('\n'),
                Some((_, esc @ ('"' | '\\' | '*' | '?'))) => value.push(esc),
                _ => return Err(malformed(whole, "invalid escape in quoted value")),
            },
            other => value.push(other),
        }
    }
    Err(malformed(whole, "unterminated quote"))
}

fn malformed(subject: &str, reason: &'static str) -> DomainError {
    DomainError::MalformedObjectName {
        message: format!("{reason} in '{subject}'").into(),
        context: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form_sorts_keys() {
        let name = ObjectName::parse("mq:type=Destination,name=orders,desttype=q").unwrap();
        assert_eq!(name.to_string(), "mq:desttype=q,name=orders,type=Destination");
        assert_eq!(name, ObjectName::parse("mq:desttype=q,type=Destination,name=orders").unwrap());
    }

    #[test]
    fn quoted_values_round_trip() {
        let name = ObjectName::parse(r#"mq:name="a,b\"c",type=Destination"#).unwrap();
        assert_eq!(name.property("name"), Some("a,b\"c"));
        let again = ObjectName::parse(&name.to_string()).unwrap();
        assert_eq!(name, again);
    }

    #[test]
    fn rejects_malformed_names() {
        for bad in ["", "mq", ":type=x", "mq:", "mq:type", "mq:type=a,type=b", "mq:type=a,", r#"mq:n="x"#, "mq:n=a*b"] {
            assert!(
                matches!(ObjectName::parse(bad), Err(DomainError::MalformedObjectName { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn patterns_match_supersets() {
        let orders = ObjectName::destination_config(DEST_TYPE_QUEUE, "orders");
        let all_destinations = ObjectName::parse(&format!("{DEFAULT_DOMAIN}:type=Destination,*")).unwrap();
        let any_domain = ObjectName::parse("*:subtype=Config,*").unwrap();
        let monitors = ObjectName::parse(&format!("{DEFAULT_DOMAIN}:subtype=Monitor,*")).unwrap();

        assert!(all_destinations.is_pattern());
        assert!(orders.matches(&all_destinations));
        assert!(orders.matches(&any_domain));
        assert!(!orders.matches(&monitors));
        assert!(orders.matches(&orders.clone()));
        assert!(!ObjectName::broker_config().matches(&orders));
    }

    #[test]
    fn broker_helpers_use_default_domain() {
        let name = ObjectName::service_monitor("jms");
        assert_eq!(name.domain(), DEFAULT_DOMAIN);
        assert_eq!(name.property("type"), Some(TYPE_SERVICE));
        assert_eq!(name.property("subtype"), Some(SUBTYPE_MONITOR));
        assert_eq!(name.in_domain("test").domain(), "test");
    }
}
