use serde::{Deserialize, Deserializer};

/// Comma-separated id list as it arrives in query strings (`?ids=a,b,c`).
///
/// Blank segments are dropped, so `ids=` yields an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdList(pub Vec<String>);

impl IdList {
    pub fn parse(raw: &str) -> Self {
        IdList(
            raw.split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl<'de> Deserialize<'de> for IdList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(IdList::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Query {
        ids: IdList,
    }

    #[test]
    fn splits_on_commas() {
        assert_eq!(
            IdList::parse("a,b,c").into_inner(),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn blank_segments_are_dropped() {
        assert!(IdList::parse("").is_empty());
        assert_eq!(IdList::parse(" a ,, b,").into_inner(), vec!["a", "b"]);
    }

    #[test]
    fn deserializes_from_string_field() {
        let query: Query = serde_json::from_str(r#"{"ids":"x,y"}"#).unwrap();
        assert_eq!(query.ids, IdList(vec!["x".into(), "y".into()]));
    }
}
