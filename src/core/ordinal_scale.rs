use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Maps domain keys to range values by position, cycling the range when the
/// domain is longer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdinalScale<V> {
    domain: IndexSet<String>,
    range: Vec<V>,
}

impl<V> OrdinalScale<V> {
    pub fn new<I, S>(domain: I, range: Vec<V>) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if range.is_empty() {
            return Err(ChartError::InvalidData(
                "ordinal scale range must not be empty".to_owned(),
            ));
        }
        Ok(Self {
            domain: domain.into_iter().map(Into::into).collect(),
            range,
        })
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        let index = self.domain.get_index_of(key)?;
        self.range.get(index % self.range.len())
    }

    /// Domain keys paired with their values, in domain order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &V)> {
        self.domain
            .iter()
            .enumerate()
            .map(|(index, key)| (key.as_str(), &self.range[index % self.range.len()]))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_cycles_over_longer_domain() {
        let scale = OrdinalScale::new(["a", "b", "c"], vec![1, 2]).expect("scale");
        assert_eq!(scale.get("a"), Some(&1));
        assert_eq!(scale.get("c"), Some(&1));
        assert_eq!(scale.get("z"), None);
        assert_eq!(scale.entries().count(), 3);
    }
}
