//! Test identity passed to every result call.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fmt;

/// Dotted name identifying one test method, e.g. `ErrorTest.test_foo`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TestId(String);

impl TestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id for `method` on fixture type `F`, using the unqualified type name.
    pub fn for_method<F>(method: &str) -> Self {
        let full = std::any::type_name::<F>();
        let base = full.split('<').next().unwrap_or(full);
        let short = base.rsplit("::").next().unwrap_or(base);
        Self(format!("{short}.{method}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The method part of the id (after the last `.`).
    pub fn method(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TestId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SkipTest;
    struct Wrapper<T>(std::marker::PhantomData<T>);

    #[test]
    fn id_uses_short_type_name() {
        let id = TestId::for_method::<SkipTest>("test_skip");
        assert_eq!(id.as_str(), "SkipTest.test_skip");
        assert_eq!(id.method(), "test_skip");
        assert_eq!(
            TestId::for_method::<Wrapper<SkipTest>>("test_x").to_string(),
            "Wrapper.test_x"
        );
    }
}
